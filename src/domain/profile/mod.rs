pub mod model;
pub mod repository;

pub use model::{ProfilePatch, StoreProfile};
pub use repository::ProfileRepository;
