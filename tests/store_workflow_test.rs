use anyhow::Result;
use pathway_planner::domain::model::{PredictedOutcomes, StudyHabits, SubjectChange};
use pathway_planner::{
    LocalSnapshotStore, PlannerConfig, PlannerEngine, PlannerError, SnapshotStore,
};
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "student_id": "s-042",
  "full_name": "Test Student",
  "current_level": "Sec 4",
  "subjects": [
    {"subject_name": "English Language", "grade_estimate": "B3", "study_hours_per_week": 3},
    {"subject_name": "Mathematics", "grade_estimate": "C5", "study_hours_per_week": 4},
    {"subject_name": "Physics", "grade_estimate": "C6", "study_hours_per_week": 2}
  ],
  "academic_history": [
    {"subject_name": "Mathematics", "grade": "C5", "exam_type": "Prelim"}
  ],
  "cca_records": [{"cca_name": "Football", "leaps_points": 3}],
  "goals": [
    {
      "goal_type": "course",
      "target_institution": "Ngee Ann Polytechnic (NP)",
      "target_course": "Computer Engineering",
      "target_score": "10"
    }
  ]
}"#;

fn setup() -> Result<(TempDir, LocalSnapshotStore, PlannerEngine)> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("s-042.json"), SNAPSHOT)?;

    let toml = format!(
        "[storage]\ndata_dir = \"{}\"\n\n[simulation]\nprobability_ceiling = 100\n",
        dir.path().display()
    );
    let config = PlannerConfig::from_toml_str(&toml)?;
    let store = LocalSnapshotStore::new(&config.storage.data_dir);
    let engine = PlannerEngine::new(config)?;
    Ok((dir, store, engine))
}

#[test]
fn test_pathway_analysis_uses_first_goal() -> Result<()> {
    let (_dir, store, engine) = setup()?;

    let record =
        engine.simulate_and_record(&store, "s-042", "pathway-analysis", None, "Goal check")?;
    let PredictedOutcomes::Pathway(outcome) = &record.predicted_outcomes else {
        panic!("expected pathway outcome");
    };
    assert_eq!(outcome.current_l1r5, 14);
    assert_eq!(outcome.target_score, 10);
    assert_eq!(outcome.gap, 4);
    assert!(outcome.achievable);
    assert_eq!(outcome.probability, 60);
    assert_eq!(outcome.target_institution, "Ngee Ann Polytechnic (NP)");
    assert_eq!(record.recommendations.len(), 2);
    assert_eq!(record.input_parameters.subjects, 3);
    assert_eq!(record.input_parameters.history, 1);
    Ok(())
}

#[test]
fn test_history_accumulates_in_order() -> Result<()> {
    let (_dir, store, engine) = setup()?;

    let habits = StudyHabits {
        hours_per_week: None,
        subject_changes: vec![SubjectChange {
            add: Some("Chemistry".to_string()),
            remove: Some("Physics".to_string()),
        }],
    };
    engine.simulate_and_record(&store, "s-042", "subject-change", Some(habits), "Swap")?;
    engine.simulate_and_record(&store, "s-042", "leaps-impact", None, "CCA")?;

    let history = store.simulation_history("s-042")?;
    let types: Vec<&str> = history.iter().map(|r| r.simulation_type.as_str()).collect();
    assert_eq!(types, vec!["subject-change", "leaps-impact"]);
    assert!(history[0].created_at <= history[1].created_at);

    let PredictedOutcomes::Leaps(leaps) = &history[1].predicted_outcomes else {
        panic!("expected leaps outcome");
    };
    assert_eq!(leaps.current_leaps_points, 3.0);
    assert_eq!(leaps.potential_additional_points, 0.0);
    Ok(())
}

#[test]
fn test_careers_without_pathway_use_history() -> Result<()> {
    let (_dir, store, engine) = setup()?;
    let snapshot = store.load_snapshot("s-042")?;

    let careers = engine.careers(&snapshot);
    let titles: Vec<&str> = careers.iter().map(|c| c.title.as_str()).collect();
    // Mathematics 70 and neutral defaults elsewhere leave only the catch-all.
    assert_eq!(titles, vec!["Business Analyst"]);
    Ok(())
}

#[test]
fn test_unknown_student_and_bad_ids() -> Result<()> {
    let (_dir, store, engine) = setup()?;

    let err = engine
        .simulate_and_record(&store, "s-999", "leaps-impact", None, "")
        .unwrap_err();
    assert!(matches!(err, PlannerError::NotFoundError { .. }));

    let err = store.load_snapshot("../etc/passwd").unwrap_err();
    assert!(matches!(err, PlannerError::InvalidConfigValueError { .. }));
    assert!(store.simulation_history("s-042")?.is_empty());
    Ok(())
}
