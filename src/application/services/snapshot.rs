//! Whole-state snapshot export/import and CSV rendering
//!
//! The snapshot is the wire format of the entire store: products, profile,
//! operation log and an export timestamp. Import replaces the product
//! collection wholesale (and the profile when present); it is best-effort,
//! not transactional.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::operation_log::{OperationEntry, LOG_CAPACITY};
use crate::domain::product::Product;
use crate::domain::profile::StoreProfile;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};
use crate::notifications::{Event, SharedEventBus, SnapshotImportedEvent};

/// Whole-state export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub profile: Option<StoreProfile>,
    pub log: Vec<OperationEntry>,
    pub exported_at: DateTime<Utc>,
}

/// What an import actually replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub products: usize,
    pub profile_replaced: bool,
}

pub struct SnapshotService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl SnapshotService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    /// Assemble the whole-state document.
    pub async fn export(&self) -> DomainResult<Snapshot> {
        Ok(Snapshot {
            products: self.repos.products().find_all().await?,
            profile: self.repos.profile().get().await?,
            log: self.repos.operations().recent(LOG_CAPACITY).await?,
            exported_at: Utc::now(),
        })
    }

    /// Parse and apply a snapshot document.
    ///
    /// Replaces the product collection wholesale, re-deriving cached
    /// status/priority on the way in; replaces the profile when the
    /// document carries one. The stored operation log is not restored.
    pub async fn import(&self, payload: &str) -> DomainResult<ImportSummary> {
        let snapshot: Snapshot = serde_json::from_str(payload).map_err(|e| {
            error!("Snapshot import rejected: {}", e);
            DomainError::ImportFailed(e.to_string())
        })?;

        let today = Utc::now().date_naive();
        let mut products = snapshot.products;
        for product in &mut products {
            product.refresh_derived(today);
        }

        let count = self.repos.products().replace_all(products).await?;

        let profile_replaced = match snapshot.profile {
            Some(profile) => {
                self.repos.profile().set(profile).await?;
                true
            }
            None => false,
        };

        let entry = OperationEntry::new(
            "DATA STRUCTURE",
            "IMPORT",
            format!("Imported {} products", count),
            None,
            count as i32,
        );
        self.repos.operations().append(entry).await?;

        self.event_bus
            .publish(Event::SnapshotImported(SnapshotImportedEvent {
                product_count: count,
                profile_replaced,
                timestamp: Utc::now(),
            }));

        info!(products = count, profile_replaced, "snapshot imported");
        Ok(ImportSummary {
            products: count,
            profile_replaced,
        })
    }
}

// ── CSV rendering ──────────────────────────────────────────────

const CSV_HEADER: &str = "ID,Product Name,Category,Quantity,Expiry Date,Status,Price,Supplier";

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render the fixed-column CSV document. An empty list is rejected: no
/// file is produced and the caller surfaces the error.
pub fn render_csv(products: &[Product]) -> DomainResult<String> {
    if products.is_empty() {
        return Err(DomainError::NothingToExport);
    }

    let mut lines = Vec::with_capacity(products.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for p in products {
        lines.push(format!(
            "{},{},{},{},{},{},{},{}",
            p.id,
            csv_quote(&p.name),
            p.category,
            p.quantity,
            p.expiry_date,
            p.status,
            p.price.unwrap_or(0.0),
            p.supplier.as_deref().unwrap_or(""),
        ));
    }
    Ok(lines.join("\n"))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{ProductDraft, ProductStatus};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use crate::notifications::create_event_bus;
    use chrono::Duration;

    fn fixture_product(id: &str, name: &str, days_from_now: i64) -> Product {
        Product::from_draft(
            id.to_string(),
            ProductDraft {
                name: name.into(),
                category: "Dairy".into(),
                quantity: 25,
                expiry_date: Utc::now().date_naive() + Duration::days(days_from_now),
                supplier: Some("Dairy Corp".into()),
                price: Some(2.99),
            },
            Utc::now().date_naive(),
        )
    }

    fn service_with(repos: Arc<InMemoryRepositoryProvider>) -> SnapshotService {
        SnapshotService::new(repos, create_event_bus())
    }

    #[tokio::test]
    async fn export_then_import_round_trip() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos
            .products()
            .insert(fixture_product("prod_1", "Fresh Milk", 2))
            .await
            .unwrap();
        repos
            .profile()
            .set(StoreProfile::default())
            .await
            .unwrap();

        let svc = service_with(repos.clone());
        let snapshot = svc.export().await.unwrap();
        let json = serde_json::to_string_pretty(&snapshot).unwrap();

        // import into a fresh store
        let fresh = Arc::new(InMemoryRepositoryProvider::new());
        let svc2 = service_with(fresh.clone());
        let summary = svc2.import(&json).await.unwrap();

        assert_eq!(summary.products, 1);
        assert!(summary.profile_replaced);
        let restored = fresh.products().find_all().await.unwrap();
        assert_eq!(restored[0].name, "Fresh Milk");
        assert_eq!(restored[0].status, ProductStatus::ExpiringSoon);
    }

    #[tokio::test]
    async fn import_rederives_cached_fields() {
        let json = serde_json::json!({
            "products": [{
                "id": "prod_x",
                "name": "Stale Yogurt",
                "category": "Dairy",
                "quantity": 4,
                "expiry_date": (Utc::now().date_naive() - Duration::days(2)).to_string(),
                // lies about its derived fields
                "status": "Healthy",
                "priority": 4,
                "supplier": null,
                "price": 1.0,
                "added_date": Utc::now().date_naive().to_string()
            }],
            "profile": null,
            "log": [],
            "exported_at": Utc::now().to_rfc3339()
        })
        .to_string();

        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let svc = service_with(repos.clone());
        svc.import(&json).await.unwrap();

        let restored = repos.products().find_all().await.unwrap();
        assert_eq!(restored[0].status, ProductStatus::Expired);
        assert_eq!(restored[0].priority, 0);
    }

    #[tokio::test]
    async fn malformed_import_fails_without_mutation() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos
            .products()
            .insert(fixture_product("prod_1", "Fresh Milk", 2))
            .await
            .unwrap();

        let svc = service_with(repos.clone());
        let result = svc.import("{ not json").await;
        assert!(matches!(result, Err(DomainError::ImportFailed(_))));
        assert_eq!(repos.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn import_logs_the_operation() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let svc = service_with(repos.clone());
        let snapshot = Snapshot {
            products: vec![fixture_product("prod_1", "Fresh Milk", 2)],
            profile: None,
            log: vec![],
            exported_at: Utc::now(),
        };
        svc.import(&serde_json::to_string(&snapshot).unwrap())
            .await
            .unwrap();

        let log = repos.operations().recent(1).await.unwrap();
        assert_eq!(log[0].structure, "DATA STRUCTURE");
        assert_eq!(log[0].operation, "IMPORT");
        assert!(log[0].description.contains("1 products"));
    }

    #[test]
    fn csv_has_fixed_header_and_quoted_names() {
        let products = vec![fixture_product("prod_1", "Fresh \"Whole\" Milk", 2)];
        let csv = render_csv(&products).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Product Name,Category,Quantity,Expiry Date,Status,Price,Supplier"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("prod_1,\"Fresh \"\"Whole\"\" Milk\",Dairy,25,"));
        assert!(row.contains("Expiring Soon"));
        assert!(row.ends_with(",Dairy Corp"));
    }

    #[test]
    fn csv_renders_missing_price_and_supplier() {
        let mut product = fixture_product("prod_2", "Plain Rice", 90);
        product.price = None;
        product.supplier = None;
        let csv = render_csv(&[product]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",Healthy,0,"));
        assert!(row.ends_with(','));
    }

    #[test]
    fn empty_csv_export_is_rejected() {
        assert!(matches!(render_csv(&[]), Err(DomainError::NothingToExport)));
    }
}
