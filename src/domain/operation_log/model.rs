//! Bounded operation-log entries
//!
//! A cosmetic action history, not an audit or write-ahead log. The log is a
//! bounded ring: appends prepend and the oldest entries beyond capacity are
//! dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of retained entries.
pub const LOG_CAPACITY: usize = 100;

/// One logged operation with its display labels and context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Free-text structure label, e.g. "STACK" or "PRIORITY QUEUE".
    pub structure: String,
    /// Free-text operation label, e.g. "PUSH".
    pub operation: String,
    pub description: String,
    /// Where the operation was triggered from (page or service name).
    pub source: Option<String>,
    /// Product count at the time of logging.
    pub product_count: i32,
}

impl OperationEntry {
    pub fn new(
        structure: impl Into<String>,
        operation: impl Into<String>,
        description: impl Into<String>,
        source: Option<String>,
        product_count: i32,
    ) -> Self {
        Self {
            id: format!("log_{}", uuid::Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            structure: structure.into(),
            operation: operation.into(),
            description: description.into(),
            source,
            product_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_gets_unique_id() {
        let a = OperationEntry::new("STACK", "PUSH", "Added \"Milk\"", None, 1);
        let b = OperationEntry::new("STACK", "PUSH", "Added \"Milk\"", None, 1);
        assert!(a.id.starts_with("log_"));
        assert_ne!(a.id, b.id);
    }
}
