//! In-memory filtering, sorting and pagination for product lists.
//!
//! The inventory view recomputes the whole pipeline on every request:
//! filter predicates are AND-composed, then a single stable comparator
//! sort is applied, then the page is sliced. Stable sort keeps the
//! output deterministic for a given input order.

use std::cmp::Ordering;

use chrono::NaiveDate;

use super::model::{Product, ProductStatus};

/// Zero or more AND-composed predicates over the product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub expires_from: Option<NaiveDate>,
    pub expires_to: Option<NaiveDate>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref text) = self.search {
            if !product.matches_text(text) {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if product.status != status {
                return false;
            }
        }
        if let Some(min) = self.min_quantity {
            if product.quantity < min {
                return false;
            }
        }
        if let Some(max) = self.max_quantity {
            if product.quantity > max {
                return false;
            }
        }
        if let Some(from) = self.expires_from {
            if product.expiry_date < from {
                return false;
            }
        }
        if let Some(to) = self.expires_to {
            if product.expiry_date > to {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Sortable product columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Category,
    Quantity,
    ExpiryDate,
    AddedDate,
    Price,
    Status,
    Priority,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "category" => Some(Self::Category),
            "quantity" => Some(Self::Quantity),
            "expiry_date" => Some(Self::ExpiryDate),
            "added_date" => Some(Self::AddedDate),
            "price" => Some(Self::Price),
            "status" => Some(Self::Status),
            "priority" => Some(Self::Priority),
            _ => None,
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        Self::ExpiryDate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Asc
    }
}

fn compare(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        // string fields compare case-insensitively, like the table view
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::ExpiryDate => a.expiry_date.cmp(&b.expiry_date),
        SortField::AddedDate => a.added_date.cmp(&b.added_date),
        SortField::Price => a
            .price
            .unwrap_or(0.0)
            .partial_cmp(&b.price.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        SortField::Status => a.status.to_string().cmp(&b.status.to_string()),
        SortField::Priority => a.priority.cmp(&b.priority),
    }
}

/// Stable single-comparator sort.
pub fn sort_products(products: &mut [Product], field: SortField, order: SortOrder) {
    products.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// Slice out a 1-based page of `per_page` items, returning the page and the
/// pre-pagination total.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let page = page.max(1);
    let start = ((page - 1) as usize).saturating_mul(per_page as usize);
    let page_items = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();
    (page_items, total)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::model::ProductDraft;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn product(id: &str, name: &str, category: &str, quantity: i32, days: i64) -> Product {
        Product::from_draft(
            id.to_string(),
            ProductDraft {
                name: name.into(),
                category: category.into(),
                quantity,
                expiry_date: today() + Duration::days(days),
                supplier: None,
                price: Some(1.0),
            },
            today(),
        )
    }

    fn fixture() -> Vec<Product> {
        vec![
            product("prod_a", "Fresh Milk", "Dairy", 25, 2),
            product("prod_b", "Organic Eggs", "Dairy", 12, 30),
            product("prod_c", "Whole Wheat Bread", "Bakery", 8, -1),
            product("prod_d", "Greek Yogurt", "Dairy", 15, 5),
            product("prod_e", "Orange Juice", "Beverages", 20, 45),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filtered = ProductFilter::default().apply(fixture());
        assert_eq!(filtered.len(), 5);
    }

    #[test]
    fn category_and_status_compose() {
        let filter = ProductFilter {
            category: Some("Dairy".into()),
            status: Some(ProductStatus::ExpiringSoon),
            ..Default::default()
        };
        let filtered = filter.apply(fixture());
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prod_a", "prod_d"]);
    }

    #[test]
    fn quantity_thresholds_are_inclusive() {
        let filter = ProductFilter {
            min_quantity: Some(12),
            max_quantity: Some(20),
            ..Default::default()
        };
        let filtered = filter.apply(fixture());
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prod_b", "prod_d", "prod_e"]);
    }

    #[test]
    fn expiry_range_is_inclusive() {
        let filter = ProductFilter {
            expires_from: Some(today()),
            expires_to: Some(today() + Duration::days(5)),
            ..Default::default()
        };
        let filtered = filter.apply(fixture());
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prod_a", "prod_d"]);
    }

    #[test]
    fn free_text_search_filters() {
        let filter = ProductFilter {
            search: Some("juice".into()),
            ..Default::default()
        };
        let filtered = filter.apply(fixture());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "prod_e");
    }

    #[test]
    fn sort_by_expiry_ascending() {
        let mut products = fixture();
        sort_products(&mut products, SortField::ExpiryDate, SortOrder::Asc);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prod_c", "prod_a", "prod_d", "prod_b", "prod_e"]);
    }

    #[test]
    fn sort_by_name_is_case_insensitive() {
        let mut products = vec![
            product("prod_1", "apples", "Fruits", 1, 10),
            product("prod_2", "Bananas", "Fruits", 1, 10),
            product("prod_3", "Cherries", "Fruits", 1, 10),
        ];
        sort_products(&mut products, SortField::Name, SortOrder::Desc);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Cherries", "Bananas", "apples"]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut products = fixture();
        // three Dairy rows tie on category; input order must survive
        sort_products(&mut products, SortField::Category, SortOrder::Asc);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prod_c", "prod_e", "prod_a", "prod_b", "prod_d"]);
    }

    #[test]
    fn pagination_slices_and_reports_total() {
        let (page, total) = paginate(fixture(), 1, 2);
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        let (page3, _) = paginate(fixture(), 3, 2);
        assert_eq!(page3.len(), 1);
        let (beyond, total) = paginate(fixture(), 9, 2);
        assert_eq!(total, 5);
        assert!(beyond.is_empty());
    }

    #[test]
    fn pipeline_is_deterministic() {
        let filter = ProductFilter {
            category: Some("Dairy".into()),
            ..Default::default()
        };
        let run = || {
            let mut filtered = filter.apply(fixture());
            sort_products(&mut filtered, SortField::Quantity, SortOrder::Desc);
            let (page, _) = paginate(filtered, 1, 2);
            page.into_iter().map(|p| p.id).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
        assert_eq!(run(), ["prod_a", "prod_d"]);
    }
}
