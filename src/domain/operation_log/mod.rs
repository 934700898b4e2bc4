pub mod model;
pub mod repository;

pub use model::{OperationEntry, LOG_CAPACITY};
pub use repository::OperationLogRepository;
