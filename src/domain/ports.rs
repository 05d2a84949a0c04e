use crate::domain::course::{CareerEntry, CourseRequirement};
use crate::domain::model::{SimulationRecord, StudentSnapshot};
use crate::utils::error::Result;

/// Record store holding student snapshots and their simulation history.
pub trait SnapshotStore: Send + Sync {
    fn load_snapshot(&self, student_id: &str) -> Result<StudentSnapshot>;
    fn save_simulation(&self, record: &SimulationRecord) -> Result<()>;
    fn simulation_history(&self, student_id: &str) -> Result<Vec<SimulationRecord>>;
}

/// Source of the read-only reference tables.
pub trait ReferenceSource: Send + Sync {
    fn courses(&self) -> Result<Vec<CourseRequirement>>;
    fn careers(&self) -> Result<Vec<CareerEntry>>;
}
