//! Dashboard module — aggregate stats and urgency alerts

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
