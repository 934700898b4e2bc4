//! Operation log and simulator DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::simulator::SimulatedOperation;
use crate::domain::operation_log::OperationEntry;

#[derive(Debug, Serialize, ToSchema)]
pub struct OperationEntryDto {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub structure: String,
    pub operation: String,
    pub description: String,
    pub source: Option<String>,
    pub product_count: i32,
}

impl From<OperationEntry> for OperationEntryDto {
    fn from(e: OperationEntry) -> Self {
        Self {
            id: e.id,
            timestamp: e.timestamp,
            structure: e.structure,
            operation: e.operation,
            description: e.description,
            source: e.source,
            product_count: e.product_count,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOperationsParams {
    /// Newest entries to return. Default: 50
    #[serde(default = "default_log_limit")]
    pub limit: usize,
}

fn default_log_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SimulateRequest {
    /// Operation tag, e.g. "STACK_PUSH" or "BINARY_SEARCH"
    pub operation: String,
    /// Product whose name is interpolated into the description
    pub product_id: Option<String>,
    /// Search term for BINARY_SEARCH
    pub search_term: Option<String>,
    /// Page or view that triggered the simulation
    pub source: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SimulatedOperationDto {
    pub id: String,
    pub tag: String,
    pub structure: String,
    pub operation: String,
    pub description: String,
    /// Canned source snippet for display
    pub code: String,
    pub timestamp: DateTime<Utc>,
}

impl From<SimulatedOperation> for SimulatedOperationDto {
    fn from(op: SimulatedOperation) -> Self {
        Self {
            id: op.id,
            tag: op.tag.to_string(),
            structure: op.structure.to_string(),
            operation: op.operation.to_string(),
            description: op.description,
            code: op.code.to_string(),
            timestamp: op.timestamp,
        }
    }
}
