//! Notification events
//!
//! Defines all event types that can be broadcasted to listening clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// Product added to the inventory
    ProductAdded(ProductEvent),
    /// Product fields changed
    ProductUpdated(ProductEvent),
    /// Product removed from the inventory
    ProductRemoved(ProductRemovedEvent),
    /// An operation-log entry was appended
    OperationLogged(OperationLoggedEvent),
    /// A snapshot import replaced the stored collections
    SnapshotImported(SnapshotImportedEvent),
    /// Store profile changed
    ProfileUpdated(ProfileUpdatedEvent),
    /// The periodic sweep re-derived drifted status/priority values
    StatusRefreshed(StatusRefreshedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ProductAdded(_) => "product_added",
            Event::ProductUpdated(_) => "product_updated",
            Event::ProductRemoved(_) => "product_removed",
            Event::OperationLogged(_) => "operation_logged",
            Event::SnapshotImported(_) => "snapshot_imported",
            Event::ProfileUpdated(_) => "profile_updated",
            Event::StatusRefreshed(_) => "status_refreshed",
        }
    }

    /// Get the product ID if applicable
    pub fn product_id(&self) -> Option<&str> {
        match self {
            Event::ProductAdded(e) | Event::ProductUpdated(e) => Some(&e.product_id),
            Event::ProductRemoved(e) => Some(&e.product_id),
            Event::OperationLogged(_)
            | Event::SnapshotImported(_)
            | Event::ProfileUpdated(_)
            | Event::StatusRefreshed(_) => None,
        }
    }
}

/// Product added/updated event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEvent {
    pub product_id: String,
    pub name: String,
    pub status: String,
    pub priority: i32,
    pub timestamp: DateTime<Utc>,
}

/// Product removed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRemovedEvent {
    pub product_id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

/// Operation-log append event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationLoggedEvent {
    pub entry_id: String,
    pub structure: String,
    pub operation: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot import event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotImportedEvent {
    pub product_count: usize,
    pub profile_replaced: bool,
    pub timestamp: DateTime<Utc>,
}

/// Profile update event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdatedEvent {
    pub name: String,
    pub store_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Derived-field refresh sweep event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRefreshedEvent {
    pub updated: usize,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
