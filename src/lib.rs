//! # ExpirySync
//!
//! Inventory-expiry tracking service.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, derived-field rules and traits
//! - **application**: Services, the status refresh sweep and the simulator
//! - **infrastructure**: Database (SeaORM/SQLite) and in-memory storage
//! - **interfaces**: REST API with Swagger documentation, WebSocket push
//! - **notifications**: Real-time event bus for UI clients
//! - **server**: Reusable server runtime with graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use infrastructure::storage::InMemoryRepositoryProvider;

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};

// Re-export server runtime
pub use server::{init_tracing, ServerHandle, ServerOptions};
