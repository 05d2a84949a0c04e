pub mod aggregate;
pub mod careers;
pub mod engine;
pub mod matcher;
pub mod reference;
pub mod simulator;

pub use crate::domain::ports::{ReferenceSource, SnapshotStore};
pub use crate::utils::error::Result;
pub use engine::PlannerEngine;
pub use reference::ReferenceData;
pub use simulator::{run_simulation, SimulationType};
