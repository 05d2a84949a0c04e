use crate::domain::model::{SimulationRecord, StudentSnapshot};
use crate::domain::ports::SnapshotStore;
use crate::utils::error::{PlannerError, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// Snapshot store backed by a directory: `<id>.json` holds the snapshot and
/// `<id>.simulations.jsonl` one simulation record per line.
#[derive(Debug, Clone)]
pub struct LocalSnapshotStore {
    base_path: PathBuf,
}

impl LocalSnapshotStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn file_for(&self, student_id: &str, suffix: &str) -> Result<PathBuf> {
        // Ids become file names, so anything that could escape the directory is rejected.
        let safe = !student_id.is_empty()
            && student_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(PlannerError::InvalidConfigValueError {
                field: "student_id".to_string(),
                value: student_id.to_string(),
                reason: "Only letters, digits, '-' and '_' are allowed".to_string(),
            });
        }
        Ok(self.base_path.join(format!("{}{}", student_id, suffix)))
    }

    pub fn save_snapshot(&self, snapshot: &StudentSnapshot) -> Result<()> {
        let path = self.file_for(&snapshot.student_id, ".json")?;
        fs::create_dir_all(&self.base_path)?;
        fs::write(&path, serde_json::to_vec_pretty(snapshot)?)?;
        tracing::debug!("Saved snapshot to {}", path.display());
        Ok(())
    }
}

impl SnapshotStore for LocalSnapshotStore {
    fn load_snapshot(&self, student_id: &str) -> Result<StudentSnapshot> {
        let path = self.file_for(student_id, ".json")?;
        if !path.exists() {
            return Err(PlannerError::NotFoundError {
                what: format!("student '{}' in {}", student_id, self.base_path.display()),
            });
        }
        let data = fs::read(&path)?;
        let snapshot: StudentSnapshot = serde_json::from_slice(&data)?;
        tracing::debug!(
            "Loaded snapshot for {}: {} subjects, {} history records",
            student_id,
            snapshot.subjects.len(),
            snapshot.academic_history.len()
        );
        Ok(snapshot)
    }

    fn save_simulation(&self, record: &SimulationRecord) -> Result<()> {
        let path = self.file_for(&record.student_id, ".simulations.jsonl")?;
        fs::create_dir_all(&self.base_path)?;

        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;
        tracing::info!(
            "Recorded {} simulation for {}",
            record.simulation_type,
            record.student_id
        );
        Ok(())
    }

    fn simulation_history(&self, student_id: &str) -> Result<Vec<SimulationRecord>> {
        let path = self.file_for(student_id, ".simulations.jsonl")?;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grade::Grade;
    use crate::domain::model::{SimulationResult, SubjectRecord};
    use tempfile::TempDir;

    fn sample_snapshot() -> StudentSnapshot {
        StudentSnapshot {
            student_id: "s-100".to_string(),
            subjects: vec![SubjectRecord::new("Mathematics", Some(Grade::A2), 5.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_snapshot_round_trip_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalSnapshotStore::new(temp_dir.path());

        store.save_snapshot(&sample_snapshot()).unwrap();
        let loaded = store.load_snapshot("s-100").unwrap();
        assert_eq!(loaded, sample_snapshot());
    }

    #[test]
    fn test_missing_snapshot_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalSnapshotStore::new(temp_dir.path());
        assert!(matches!(
            store.load_snapshot("nobody"),
            Err(PlannerError::NotFoundError { .. })
        ));
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalSnapshotStore::new(temp_dir.path());
        assert!(store.load_snapshot("../etc/passwd").is_err());
        assert!(store.load_snapshot("").is_err());
    }

    #[test]
    fn test_simulation_history_appends() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalSnapshotStore::new(temp_dir.path().join("nested"));
        let snapshot = sample_snapshot();
        assert!(store.simulation_history("s-100").unwrap().is_empty());

        for scenario in ["first", "second"] {
            let input = snapshot.simulation_input("unknown-type", None);
            let record =
                SimulationRecord::new(&snapshot, &input, scenario, SimulationResult::empty());
            store.save_simulation(&record).unwrap();
        }

        let history = store.simulation_history("s-100").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].scenario_description, "first");
        assert_eq!(history[1].scenario_description, "second");
        assert_eq!(history[1].input_parameters.subjects, 1);
    }
}
