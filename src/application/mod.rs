//! Application layer: use-case services and the operation simulator.

pub mod services;
pub mod simulator;

pub use services::{
    InventoryService, InventoryStats, RefreshConfig, SnapshotService, StatusRefreshMonitor,
};
pub use simulator::{OperationTag, SimulatedOperation, SimulationContext, SimulatorService};
