//! HTTP REST API interfaces
//!
//! - `common`: response envelope, pagination and validated JSON extractor
//! - `modules`: request handlers for all resources
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
