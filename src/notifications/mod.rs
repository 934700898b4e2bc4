//! Notifications module
//!
//! Provides real-time event notifications via WebSocket for UI clients.
//!
//! # Features
//! - Event bus for pub/sub messaging
//! - WebSocket endpoint for UI clients
//! - Filtering by product and event type
//!
//! # Usage
//! ```ignore
//! use expirysync::notifications::{create_event_bus, Event, ProductEvent};
//! use chrono::Utc;
//!
//! // Create event bus
//! let event_bus = create_event_bus();
//!
//! // Publish events
//! event_bus.publish(Event::ProductAdded(ProductEvent {
//!     product_id: "prod_1".to_string(),
//!     name: "Fresh Milk".to_string(),
//!     status: "Expiring Soon".to_string(),
//!     priority: 1,
//!     timestamp: Utc::now(),
//! }));
//! ```
//!
//! # WebSocket Endpoint
//! Connect to `/api/v1/notifications/ws` with optional query parameters:
//! - `product_id` - Filter events by product
//! - `event_types` - Comma-separated list of event types to receive

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
