//! Operations module — log access and the decorative simulator

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
