//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::operation_log::OperationLogRepository;
use crate::domain::product::ProductRepository;
use crate::domain::profile::ProfileRepository;
use crate::domain::repositories::RepositoryProvider;

use super::operation_log_repository::SeaOrmOperationLogRepository;
use super::product_repository::SeaOrmProductRepository;
use super::profile_repository::SeaOrmProfileRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let products = repos.products().find_all().await?;
/// let log = repos.operations().recent(10).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    products: SeaOrmProductRepository,
    operations: SeaOrmOperationLogRepository,
    profile: SeaOrmProfileRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            products: SeaOrmProductRepository::new(db.clone()),
            operations: SeaOrmOperationLogRepository::new(db.clone()),
            profile: SeaOrmProfileRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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
