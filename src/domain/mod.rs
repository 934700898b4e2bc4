//! Core domain layer: entities, derived-field rules and repository traits.

pub mod error;
pub mod operation_log;
pub mod product;
pub mod profile;
pub mod repositories;

pub use error::{DomainError, DomainResult, InfraError};
pub use operation_log::{OperationEntry, OperationLogRepository, LOG_CAPACITY};
pub use product::{
    days_until_expiry, discount_percent_for_days_left, priority_for_days_left, Product,
    ProductDraft, ProductPatch, ProductRepository, ProductStatus,
};
pub use profile::{ProfilePatch, ProfileRepository, StoreProfile};
pub use repositories::RepositoryProvider;
