//! Unified repository access for the domain layer

use super::operation_log::OperationLogRepository;
use super::product::ProductRepository;
use super::profile::ProfileRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let product = repos.products().find_by_id("prod_1").await?;
///     let log = repos.operations().recent(10).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn products(&self) -> &dyn ProductRepository;
    fn operations(&self) -> &dyn OperationLogRepository;
    fn profile(&self) -> &dyn ProfileRepository;
}
