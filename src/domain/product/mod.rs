//! Product aggregate: model, derived-field rules, list queries and repository.

pub mod model;
pub mod query;
pub mod repository;

pub use model::{
    days_until_expiry, discount_percent_for_days_left, priority_for_days_left, Product,
    ProductDraft, ProductPatch, ProductStatus,
};
pub use query::{ProductFilter, SortField, SortOrder};
pub use repository::ProductRepository;
