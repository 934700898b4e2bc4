//! Application services

mod inventory;
mod snapshot;
mod status_refresh;

pub use inventory::{InventoryService, InventoryStats};
pub use snapshot::{render_csv, ImportSummary, Snapshot, SnapshotService};
pub use status_refresh::{RefreshConfig, StatusRefreshMonitor};
