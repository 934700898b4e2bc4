//! SeaORM repository implementations

mod operation_log_repository;
mod product_repository;
mod profile_repository;
mod repository_provider;

pub use operation_log_repository::SeaOrmOperationLogRepository;
pub use product_repository::SeaOrmProductRepository;
pub use profile_repository::SeaOrmProfileRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
