pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliArgs, Command};

pub use adapters::{BundledReference, FileReference, LocalSnapshotStore};
pub use config::PlannerConfig;
pub use core::{run_simulation, PlannerEngine, ReferenceData, SimulationType};
pub use domain::grade::Grade;
pub use domain::model::{
    SimulationInput, SimulationRecord, SimulationResult, StudentSnapshot, StudyHabits,
    SubjectRecord,
};
pub use domain::ports::{ReferenceSource, SnapshotStore};
pub use utils::error::{PlannerError, Result};
