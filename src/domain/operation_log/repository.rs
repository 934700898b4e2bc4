//! Operation log repository interface

use async_trait::async_trait;

use super::model::OperationEntry;
use crate::domain::DomainResult;

#[async_trait]
pub trait OperationLogRepository: Send + Sync {
    /// Append an entry, dropping the oldest beyond [`super::LOG_CAPACITY`].
    async fn append(&self, entry: OperationEntry) -> DomainResult<OperationEntry>;
    /// Newest-first slice of at most `limit` entries.
    async fn recent(&self, limit: usize) -> DomainResult<Vec<OperationEntry>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn clear(&self) -> DomainResult<()>;
}
