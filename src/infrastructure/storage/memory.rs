//! In-memory storage implementation for development and testing

use std::sync::RwLock;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::operation_log::{OperationEntry, OperationLogRepository, LOG_CAPACITY};
use crate::domain::product::{Product, ProductRepository};
use crate::domain::profile::{ProfileRepository, StoreProfile};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::DomainResult;

/// In-memory repository provider.
///
/// Backs the same traits as the SeaORM provider with process-local maps.
/// Listing order follows insertion (created_at, then id) so query results
/// stay deterministic.
pub struct InMemoryRepositoryProvider {
    products: InMemoryProductRepository,
    operations: InMemoryOperationLogRepository,
    profile: InMemoryProfileRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            products: InMemoryProductRepository {
                records: DashMap::new(),
            },
            operations: InMemoryOperationLogRepository {
                entries: DashMap::new(),
            },
            profile: InMemoryProfileRepository {
                profile: RwLock::new(None),
            },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn operations(&self) -> &dyn OperationLogRepository {
        &self.operations
    }

    fn profile(&self) -> &dyn ProfileRepository {
        &self.profile
    }
}

// ── Products ───────────────────────────────────────────────────

struct InMemoryProductRepository {
    records: DashMap<String, Product>,
}

impl InMemoryProductRepository {
    fn sorted(&self) -> Vec<Product> {
        let mut all: Vec<Product> = self.records.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        all
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        Ok(self.sorted())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Product>> {
        Ok(self.records.get(id).map(|p| p.clone()))
    }

    async fn insert(&self, product: Product) -> DomainResult<Product> {
        self.records.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> DomainResult<()> {
        use crate::domain::DomainError;
        if !self.records.contains_key(&product.id) {
            return Err(DomainError::NotFound {
                entity: "Product",
                field: "id",
                value: product.id,
            });
        }
        self.records.insert(product.id.clone(), product);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        Ok(self.records.remove(id).is_some())
    }

    async fn search(&self, text: &str) -> DomainResult<Vec<Product>> {
        Ok(self
            .sorted()
            .into_iter()
            .filter(|p| p.matches_text(text))
            .collect())
    }

    async fn replace_all(&self, products: Vec<Product>) -> DomainResult<usize> {
        self.records.clear();
        let count = products.len();
        for product in products {
            self.records.insert(product.id.clone(), product);
        }
        Ok(count)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.records.len() as u64)
    }
}

// ── Operation log ──────────────────────────────────────────────

struct InMemoryOperationLogRepository {
    entries: DashMap<String, OperationEntry>,
}

impl InMemoryOperationLogRepository {
    fn newest_first(&self) -> Vec<OperationEntry> {
        let mut all: Vec<OperationEntry> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        all
    }
}

#[async_trait]
impl OperationLogRepository for InMemoryOperationLogRepository {
    async fn append(&self, entry: OperationEntry) -> DomainResult<OperationEntry> {
        self.entries.insert(entry.id.clone(), entry.clone());

        let all = self.newest_first();
        for stale in all.iter().skip(LOG_CAPACITY) {
            self.entries.remove(&stale.id);
        }
        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> DomainResult<Vec<OperationEntry>> {
        Ok(self.newest_first().into_iter().take(limit).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.entries.len() as u64)
    }

    async fn clear(&self) -> DomainResult<()> {
        self.entries.clear();
        Ok(())
    }
}

// ── Profile ────────────────────────────────────────────────────

struct InMemoryProfileRepository {
    profile: RwLock<Option<StoreProfile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get(&self) -> DomainResult<Option<StoreProfile>> {
        Ok(self.profile.read().expect("profile lock poisoned").clone())
    }

    async fn set(&self, profile: StoreProfile) -> DomainResult<StoreProfile> {
        *self.profile.write().expect("profile lock poisoned") = Some(profile.clone());
        Ok(profile)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductDraft;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn product(id: &str, name: &str) -> Product {
        Product::from_draft(
            id.to_string(),
            ProductDraft {
                name: name.into(),
                category: "Dairy".into(),
                quantity: 10,
                expiry_date: today() + Duration::days(5),
                supplier: Some("Dairy Corp".into()),
                price: Some(1.5),
            },
            today(),
        )
    }

    #[tokio::test]
    async fn insert_then_find_round_trip() {
        let provider = InMemoryRepositoryProvider::new();
        provider
            .products()
            .insert(product("prod_1", "Fresh Milk"))
            .await
            .unwrap();

        let all = provider.products().find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Fresh Milk");
        assert!(provider
            .products()
            .find_by_id("prod_1")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn delete_missing_is_a_no_op() {
        let provider = InMemoryRepositoryProvider::new();
        provider
            .products()
            .insert(product("prod_1", "Fresh Milk"))
            .await
            .unwrap();

        assert!(!provider.products().delete("prod_ghost").await.unwrap());
        assert_eq!(provider.products().count().await.unwrap(), 1);
        assert!(provider.products().delete("prod_1").await.unwrap());
        assert_eq!(provider.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn search_scans_all_text_fields() {
        let provider = InMemoryRepositoryProvider::new();
        provider
            .products()
            .insert(product("prod_1", "Fresh Milk"))
            .await
            .unwrap();
        provider
            .products()
            .insert(product("prod_2", "Orange Juice"))
            .await
            .unwrap();

        let hits = provider.products().search("MILK").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "prod_1");
        // supplier matches both
        assert_eq!(provider.products().search("corp").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn log_never_exceeds_capacity() {
        let provider = InMemoryRepositoryProvider::new();
        for i in 0..LOG_CAPACITY + 50 {
            provider
                .operations()
                .append(OperationEntry::new(
                    "STACK",
                    "PUSH",
                    format!("entry {}", i),
                    None,
                    i as i32,
                ))
                .await
                .unwrap();
        }
        assert_eq!(
            provider.operations().count().await.unwrap(),
            LOG_CAPACITY as u64
        );
        let recent = provider.operations().recent(10).await.unwrap();
        assert_eq!(recent.len(), 10);
    }

    #[tokio::test]
    async fn replace_all_swaps_collection_wholesale() {
        let provider = InMemoryRepositoryProvider::new();
        provider
            .products()
            .insert(product("prod_1", "Fresh Milk"))
            .await
            .unwrap();

        let replaced = provider
            .products()
            .replace_all(vec![
                product("prod_2", "Organic Eggs"),
                product("prod_3", "Greek Yogurt"),
            ])
            .await
            .unwrap();
        assert_eq!(replaced, 2);
        assert!(provider
            .products()
            .find_by_id("prod_1")
            .await
            .unwrap()
            .is_none());
        assert_eq!(provider.products().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn profile_upsert() {
        let provider = InMemoryRepositoryProvider::new();
        assert!(provider.profile().get().await.unwrap().is_none());

        provider.profile().set(StoreProfile::default()).await.unwrap();
        let stored = provider.profile().get().await.unwrap().unwrap();
        assert_eq!(stored.store_name, "Main Store");
    }
}
