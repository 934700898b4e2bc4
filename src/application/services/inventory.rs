//! Inventory service
//!
//! All writes to the product collection go through here: derived fields are
//! computed in one place, every mutation appends an operation-log entry and
//! publishes an event so listening views refresh.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use log::debug;
use tracing::info;

use crate::domain::operation_log::OperationEntry;
use crate::domain::product::{Product, ProductDraft, ProductPatch, ProductStatus};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::DomainResult;
use crate::notifications::{
    Event, OperationLoggedEvent, ProductEvent, ProductRemovedEvent, SharedEventBus,
};

/// Default window for "expiring soon" queries, in days.
pub const EXPIRING_WINDOW_DAYS: i64 = 7;
/// Default low-stock threshold, in units.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Aggregate counters for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryStats {
    pub total: u64,
    pub low_stock: u64,
    pub expiring_soon: u64,
    pub expired: u64,
    pub categories: BTreeMap<String, u64>,
    pub total_value: f64,
}

pub struct InventoryService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl InventoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        self.repos.products().find_all().await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Option<Product>> {
        self.repos.products().find_by_id(id).await
    }

    pub async fn search(&self, text: &str) -> DomainResult<Vec<Product>> {
        self.repos.products().search(text).await
    }

    /// Create a record: assign an id, derive status/priority, stamp the
    /// added date, log the push and notify.
    pub async fn add(&self, draft: ProductDraft, source: Option<String>) -> DomainResult<Product> {
        let id = format!("prod_{}", uuid::Uuid::new_v4().simple());
        let product = Product::from_draft(id, draft, Self::today());
        let saved = self.repos.products().insert(product).await?;

        self.log_operation(
            "STACK",
            "PUSH",
            format!("Added \"{}\" to inventory stack", saved.name),
            source,
        )
        .await?;
        self.event_bus.publish(Event::ProductAdded(ProductEvent {
            product_id: saved.id.clone(),
            name: saved.name.clone(),
            status: saved.status.to_string(),
            priority: saved.priority,
            timestamp: Utc::now(),
        }));

        info!(product_id = %saved.id, name = %saved.name, "product added");
        Ok(saved)
    }

    /// Merge a patch; re-derives status/priority when the expiry date is in
    /// the patch. Returns `None` (a no-op) when the id is absent.
    pub async fn update(
        &self,
        id: &str,
        patch: ProductPatch,
        source: Option<String>,
    ) -> DomainResult<Option<Product>> {
        let Some(mut product) = self.repos.products().find_by_id(id).await? else {
            debug!("update skipped, product {} absent", id);
            return Ok(None);
        };

        product.apply_patch(patch, Self::today());
        self.repos.products().update(product.clone()).await?;

        self.log_operation(
            "ARRAY",
            "UPDATE",
            format!("Updated product \"{}\" in array", product.name),
            source,
        )
        .await?;
        self.event_bus.publish(Event::ProductUpdated(ProductEvent {
            product_id: product.id.clone(),
            name: product.name.clone(),
            status: product.status.to_string(),
            priority: product.priority,
            timestamp: Utc::now(),
        }));

        Ok(Some(product))
    }

    /// Delete a record. Idempotent in effect: an absent id leaves the
    /// collection unchanged and reports `false`.
    pub async fn remove(&self, id: &str, source: Option<String>) -> DomainResult<bool> {
        let existing = self.repos.products().find_by_id(id).await?;
        let removed = self.repos.products().delete(id).await?;

        if let (true, Some(product)) = (removed, existing) {
            self.log_operation(
                "QUEUE",
                "DEQUEUE",
                format!("Removed \"{}\" from inventory queue", product.name),
                source,
            )
            .await?;
            self.event_bus
                .publish(Event::ProductRemoved(ProductRemovedEvent {
                    product_id: product.id,
                    name: product.name,
                    timestamp: Utc::now(),
                }));
        }
        Ok(removed)
    }

    /// Records expiring within `days`, strictly in the future, soonest first.
    pub async fn expiring_within(&self, days: i64) -> DomainResult<Vec<Product>> {
        let today = Self::today();
        let mut products: Vec<Product> = self
            .repos
            .products()
            .find_all()
            .await?
            .into_iter()
            .filter(|p| {
                let left = p.days_until_expiry(today);
                left > 0 && left <= days
            })
            .collect();
        products.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date));
        Ok(products)
    }

    /// Records with quantity below the threshold, emptiest first.
    pub async fn low_stock(&self, threshold: i32) -> DomainResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .repos
            .products()
            .find_all()
            .await?
            .into_iter()
            .filter(|p| p.quantity < threshold)
            .collect();
        products.sort_by(|a, b| a.quantity.cmp(&b.quantity));
        Ok(products)
    }

    /// Record with the lowest priority value; first wins on ties. Logs a
    /// priority-queue peek.
    pub async fn most_urgent(&self, source: Option<String>) -> DomainResult<Option<Product>> {
        let products = self.repos.products().find_all().await?;
        // first record wins on equal priority
        let urgent = products.into_iter().fold(None::<Product>, |min, p| match min {
            Some(m) if p.priority < m.priority => Some(p),
            Some(m) => Some(m),
            None => Some(p),
        });

        if let Some(ref product) = urgent {
            self.log_operation(
                "PRIORITY QUEUE",
                "PEEK",
                format!(
                    "Found most urgent: {} (Priority: {})",
                    product.name, product.priority
                ),
                source,
            )
            .await?;
        }
        Ok(urgent)
    }

    /// Newest additions by added date.
    pub async fn recent_additions(&self, limit: usize) -> DomainResult<Vec<Product>> {
        let mut products = self.repos.products().find_all().await?;
        products.sort_by(|a, b| b.added_date.cmp(&a.added_date));
        products.truncate(limit);
        Ok(products)
    }

    /// Dashboard aggregates over the whole collection.
    pub async fn stats(&self) -> DomainResult<InventoryStats> {
        let products = self.repos.products().find_all().await?;
        let today = Self::today();

        let mut categories: BTreeMap<String, u64> = BTreeMap::new();
        let mut total_value = 0.0;
        let mut low_stock = 0;
        let mut expiring_soon = 0;
        let mut expired = 0;

        for p in &products {
            *categories.entry(p.category.clone()).or_insert(0) += 1;
            total_value += p.quantity as f64 * p.price.unwrap_or(0.0);
            if p.quantity < LOW_STOCK_THRESHOLD {
                low_stock += 1;
            }
            let left = p.days_until_expiry(today);
            if left < 0 {
                expired += 1;
            } else if left > 0 && left <= EXPIRING_WINDOW_DAYS {
                expiring_soon += 1;
            }
        }

        Ok(InventoryStats {
            total: products.len() as u64,
            low_stock,
            expiring_soon,
            expired,
            categories,
            total_value,
        })
    }

    /// Current status counts, used by alerting.
    pub async fn by_status(&self, status: ProductStatus) -> DomainResult<Vec<Product>> {
        Ok(self
            .repos
            .products()
            .find_all()
            .await?
            .into_iter()
            .filter(|p| p.status == status)
            .collect())
    }

    /// Append to the bounded operation log and notify listeners.
    pub async fn log_operation(
        &self,
        structure: &str,
        operation: &str,
        description: String,
        source: Option<String>,
    ) -> DomainResult<OperationEntry> {
        let product_count = self.repos.products().count().await? as i32;
        let entry = OperationEntry::new(structure, operation, description, source, product_count);
        let entry = self.repos.operations().append(entry).await?;

        self.event_bus
            .publish(Event::OperationLogged(OperationLoggedEvent {
                entry_id: entry.id.clone(),
                structure: entry.structure.clone(),
                operation: entry.operation.clone(),
                description: entry.description.clone(),
                timestamp: entry.timestamp,
            }));
        Ok(entry)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use crate::notifications::create_event_bus;
    use chrono::Duration;

    fn service() -> InventoryService {
        InventoryService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            create_event_bus(),
        )
    }

    fn draft(name: &str, quantity: i32, days_from_now: i64) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category: "Dairy".into(),
            quantity,
            expiry_date: Utc::now().date_naive() + Duration::days(days_from_now),
            supplier: None,
            price: Some(2.0),
        }
    }

    #[tokio::test]
    async fn add_then_list_includes_record_with_generated_id() {
        let svc = service();
        let a = svc.add(draft("Fresh Milk", 25, 2), None).await.unwrap();
        let b = svc.add(draft("Greek Yogurt", 15, 5), None).await.unwrap();

        assert!(a.id.starts_with("prod_"));
        assert_ne!(a.id, b.id);

        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|p| p.id == a.id));
    }

    #[tokio::test]
    async fn add_derives_status_and_logs_push() {
        let svc = service();
        let p = svc.add(draft("Fresh Milk", 25, 2), None).await.unwrap();
        assert_eq!(p.status, ProductStatus::ExpiringSoon);
        assert_eq!(p.priority, 1);

        let log = svc.repos.operations().recent(10).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].structure, "STACK");
        assert_eq!(log[0].operation, "PUSH");
        assert!(log[0].description.contains("Fresh Milk"));
        assert_eq!(log[0].product_count, 1);
    }

    #[tokio::test]
    async fn update_of_absent_id_is_a_no_op() {
        let svc = service();
        let result = svc
            .update("prod_ghost", ProductPatch::default(), None)
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(svc.repos.operations().recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_new_expiry_rederives() {
        let svc = service();
        let p = svc.add(draft("Organic Eggs", 12, 30), None).await.unwrap();
        assert_eq!(p.priority, 4);

        let updated = svc
            .update(
                &p.id,
                ProductPatch {
                    expiry_date: Some(Utc::now().date_naive() + Duration::days(2)),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ProductStatus::ExpiringSoon);
        assert_eq!(updated.priority, 1);
    }

    #[tokio::test]
    async fn remove_is_idempotent_in_effect() {
        let svc = service();
        let p = svc.add(draft("Fresh Milk", 25, 2), None).await.unwrap();

        assert!(svc.remove(&p.id, None).await.unwrap());
        assert!(!svc.remove(&p.id, None).await.unwrap());
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn expiring_window_excludes_today_and_expired() {
        let svc = service();
        svc.add(draft("Expired Bread", 8, -1), None).await.unwrap();
        svc.add(draft("Due Today", 5, 0), None).await.unwrap();
        svc.add(draft("Fresh Milk", 25, 2), None).await.unwrap();
        svc.add(draft("Greek Yogurt", 15, 5), None).await.unwrap();
        svc.add(draft("Orange Juice", 20, 45), None).await.unwrap();

        let expiring = svc.expiring_within(7).await.unwrap();
        let names: Vec<&str> = expiring.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Fresh Milk", "Greek Yogurt"]);
    }

    #[tokio::test]
    async fn low_stock_sorts_emptiest_first() {
        let svc = service();
        svc.add(draft("Bread", 8, 10), None).await.unwrap();
        svc.add(draft("Milk", 25, 10), None).await.unwrap();
        svc.add(draft("Eggs", 3, 10), None).await.unwrap();

        let low = svc.low_stock(LOW_STOCK_THRESHOLD).await.unwrap();
        let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Eggs", "Bread"]);
    }

    #[tokio::test]
    async fn most_urgent_picks_lowest_priority_and_logs_peek() {
        let svc = service();
        svc.add(draft("Orange Juice", 20, 45), None).await.unwrap();
        svc.add(draft("Fresh Milk", 25, 2), None).await.unwrap();
        svc.add(draft("Expired Bread", 8, -1), None).await.unwrap();

        let urgent = svc.most_urgent(None).await.unwrap().unwrap();
        assert_eq!(urgent.name, "Expired Bread");
        assert_eq!(urgent.priority, 0);

        let log = svc.repos.operations().recent(1).await.unwrap();
        assert_eq!(log[0].structure, "PRIORITY QUEUE");
        assert_eq!(log[0].operation, "PEEK");
    }

    #[tokio::test]
    async fn stats_aggregates_counts_and_value() {
        let svc = service();
        svc.add(draft("Expired Bread", 8, -1), None).await.unwrap();
        svc.add(draft("Fresh Milk", 25, 2), None).await.unwrap();
        svc.add(draft("Orange Juice", 20, 45), None).await.unwrap();

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.expiring_soon, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.categories.get("Dairy"), Some(&3));
        // (8 + 25 + 20) * 2.0
        assert!((stats.total_value - 106.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn mutations_publish_events() {
        let bus = create_event_bus();
        let svc = InventoryService::new(Arc::new(InMemoryRepositoryProvider::new()), bus.clone());
        let mut subscriber = bus.subscribe();

        let p = svc.add(draft("Fresh Milk", 25, 2), None).await.unwrap();

        // the log append lands first, then the product event
        let first = subscriber.recv().await.unwrap();
        assert_eq!(first.event.event_type(), "operation_logged");
        let second = subscriber.recv().await.unwrap();
        assert_eq!(second.event.event_type(), "product_added");
        assert_eq!(second.event.product_id(), Some(p.id.as_str()));
    }
}
