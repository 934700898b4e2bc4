//! Product repository interface

use async_trait::async_trait;

use super::model::Product;
use crate::domain::DomainResult;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Product>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Product>>;
    async fn insert(&self, product: Product) -> DomainResult<Product>;
    async fn update(&self, product: Product) -> DomainResult<()>;
    /// Returns false when the id was absent; never an error.
    async fn delete(&self, id: &str) -> DomainResult<bool>;
    /// Case-insensitive substring match across name, category, id, supplier.
    async fn search(&self, text: &str) -> DomainResult<Vec<Product>>;
    /// Wholesale replacement of the collection (snapshot import).
    async fn replace_all(&self, products: Vec<Product>) -> DomainResult<usize>;
    async fn count(&self) -> DomainResult<u64>;
}
