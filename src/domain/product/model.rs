//! Product domain entity and expiry-derived field rules

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Shelf status derived from the expiry date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Healthy,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    Expired,
}

impl ProductStatus {
    /// Status for a given number of days until expiry (negative = past expiry).
    pub fn for_days_left(days: i64) -> Self {
        if days < 0 {
            Self::Expired
        } else if days <= 7 {
            Self::ExpiringSoon
        } else {
            Self::Healthy
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Healthy" => Some(Self::Healthy),
            "Expiring Soon" => Some(Self::ExpiringSoon),
            "Expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::ExpiringSoon => write!(f, "Expiring Soon"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}

/// Whole days between today and the expiry date (negative once expired).
pub fn days_until_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Urgency priority, 0 (most urgent) through 4.
///
/// Note the last tier runs to day 15 while the discount table below runs
/// to day 14; the two tables are specified independently.
pub fn priority_for_days_left(days: i64) -> i32 {
    if days < 0 {
        0 // Expired
    } else if days <= 3 {
        1 // Urgent
    } else if days <= 7 {
        2 // Soon
    } else if days <= 15 {
        3 // Warning
    } else {
        4 // Healthy
    }
}

/// Suggested clearance discount for the dashboard alerts.
pub fn discount_percent_for_days_left(days: i64) -> u32 {
    if days < 0 {
        50
    } else if days <= 3 {
        40
    } else if days <= 7 {
        30
    } else if days <= 14 {
        20
    } else {
        10
    }
}

/// One inventory product record.
///
/// `status` and `priority` are cached derived values: pure functions of
/// `expiry_date` relative to "today". They are recomputed on every create,
/// on every update that changes the expiry date, and by the periodic
/// refresh sweep. They are never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub status: ProductStatus,
    pub priority: i32,
    pub supplier: Option<String>,
    pub price: Option<f64>,
    pub added_date: NaiveDate,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new record from a draft, assigning the id and derived fields.
    pub fn from_draft(id: String, draft: ProductDraft, today: NaiveDate) -> Self {
        let days = days_until_expiry(draft.expiry_date, today);
        let now = Utc::now();
        Self {
            id,
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            expiry_date: draft.expiry_date,
            status: ProductStatus::for_days_left(days),
            priority: priority_for_days_left(days),
            supplier: draft.supplier,
            price: draft.price,
            added_date: today,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        days_until_expiry(self.expiry_date, today)
    }

    /// Recompute the cached derived fields. Returns true if either changed.
    pub fn refresh_derived(&mut self, today: NaiveDate) -> bool {
        let days = self.days_until_expiry(today);
        let status = ProductStatus::for_days_left(days);
        let priority = priority_for_days_left(days);
        let changed = status != self.status || priority != self.priority;
        self.status = status;
        self.priority = priority;
        changed
    }

    /// Merge a patch into this record, re-deriving status/priority when the
    /// expiry date changes. Fields absent from the patch are left alone.
    pub fn apply_patch(&mut self, patch: ProductPatch, today: NaiveDate) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(supplier) = patch.supplier {
            self.supplier = Some(supplier);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(expiry) = patch.expiry_date {
            self.expiry_date = expiry;
            self.refresh_derived(today);
        }
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match across name, category, id, supplier.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
            || self.id.to_lowercase().contains(&needle)
            || self
                .supplier
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&needle))
    }
}

/// Data supplied when creating a product; derived fields are computed.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub supplier: Option<String>,
    pub price: Option<f64>,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub expiry_date: Option<NaiveDate>,
    pub supplier: Option<String>,
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.expiry_date.is_none()
            && self.supplier.is_none()
            && self.price.is_none()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn sample_draft(days_from_today: i64) -> ProductDraft {
        ProductDraft {
            name: "Fresh Milk".into(),
            category: "Dairy".into(),
            quantity: 25,
            expiry_date: today() + Duration::days(days_from_today),
            supplier: Some("Dairy Corp".into()),
            price: Some(2.99),
        }
    }

    #[test]
    fn status_boundaries() {
        assert_eq!(ProductStatus::for_days_left(-1), ProductStatus::Expired);
        assert_eq!(ProductStatus::for_days_left(0), ProductStatus::ExpiringSoon);
        assert_eq!(ProductStatus::for_days_left(7), ProductStatus::ExpiringSoon);
        assert_eq!(ProductStatus::for_days_left(8), ProductStatus::Healthy);
        assert_eq!(ProductStatus::for_days_left(45), ProductStatus::Healthy);
    }

    #[test]
    fn priority_boundaries() {
        assert_eq!(priority_for_days_left(-1), 0);
        assert_eq!(priority_for_days_left(0), 1);
        assert_eq!(priority_for_days_left(3), 1);
        assert_eq!(priority_for_days_left(4), 2);
        assert_eq!(priority_for_days_left(7), 2);
        assert_eq!(priority_for_days_left(8), 3);
        assert_eq!(priority_for_days_left(15), 3);
        assert_eq!(priority_for_days_left(16), 4);
    }

    #[test]
    fn discount_tiers_are_independent_of_priority() {
        assert_eq!(discount_percent_for_days_left(-1), 50);
        assert_eq!(discount_percent_for_days_left(3), 40);
        assert_eq!(discount_percent_for_days_left(7), 30);
        assert_eq!(discount_percent_for_days_left(14), 20);
        // day 15 already falls off the discount table while still priority 3
        assert_eq!(discount_percent_for_days_left(15), 10);
        assert_eq!(priority_for_days_left(15), 3);
    }

    #[test]
    fn from_draft_derives_status_and_priority() {
        let p = Product::from_draft("prod_1".into(), sample_draft(2), today());
        assert_eq!(p.status, ProductStatus::ExpiringSoon);
        assert_eq!(p.priority, 1);
        assert_eq!(p.added_date, today());
    }

    #[test]
    fn from_draft_expired_yesterday() {
        let p = Product::from_draft("prod_2".into(), sample_draft(-1), today());
        assert_eq!(p.status, ProductStatus::Expired);
        assert_eq!(p.priority, 0);
    }

    #[test]
    fn patch_without_expiry_keeps_derived_fields() {
        let mut p = Product::from_draft("prod_3".into(), sample_draft(30), today());
        p.apply_patch(
            ProductPatch {
                quantity: Some(5),
                ..Default::default()
            },
            today(),
        );
        assert_eq!(p.quantity, 5);
        assert_eq!(p.status, ProductStatus::Healthy);
        assert_eq!(p.priority, 4);
    }

    #[test]
    fn patch_with_expiry_rederives() {
        let mut p = Product::from_draft("prod_4".into(), sample_draft(30), today());
        p.apply_patch(
            ProductPatch {
                expiry_date: Some(today() + Duration::days(2)),
                ..Default::default()
            },
            today(),
        );
        assert_eq!(p.status, ProductStatus::ExpiringSoon);
        assert_eq!(p.priority, 1);
    }

    #[test]
    fn refresh_derived_reports_drift() {
        let mut p = Product::from_draft("prod_5".into(), sample_draft(8), today());
        assert_eq!(p.priority, 3);
        // next day the record crosses into the 7-day tier
        assert!(p.refresh_derived(today() + Duration::days(1)));
        assert_eq!(p.status, ProductStatus::ExpiringSoon);
        assert_eq!(p.priority, 2);
        // a second refresh on the same day is a no-op
        assert!(!p.refresh_derived(today() + Duration::days(1)));
    }

    #[test]
    fn text_match_covers_all_fields() {
        let p = Product::from_draft("prod_6".into(), sample_draft(10), today());
        assert!(p.matches_text("milk"));
        assert!(p.matches_text("DAIRY"));
        assert!(p.matches_text("prod_6"));
        assert!(p.matches_text("corp"));
        assert!(!p.matches_text("bakery"));
    }

    #[test]
    fn status_display_and_parse_round_trip() {
        for status in [
            ProductStatus::Healthy,
            ProductStatus::ExpiringSoon,
            ProductStatus::Expired,
        ] {
            assert_eq!(ProductStatus::parse(&status.to_string()), Some(status));
        }
        assert_eq!(ProductStatus::parse("Stale"), None);
    }
}
