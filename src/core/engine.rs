use crate::config::PlannerConfig;
use crate::core::careers::predict_careers;
use crate::core::matcher::{
    browse_recommendations, courses_for_institution, history_subjects, pathway_recommendations,
};
use crate::core::reference::ReferenceData;
use crate::core::simulator::run_simulation;
use crate::domain::course::{CareerMatch, CourseRecommendations, CourseRequirement, Track};
use crate::domain::model::{
    SimulationInput, SimulationRecord, SimulationResult, StudentSnapshot, StudyHabits,
};
use crate::domain::ports::SnapshotStore;
use crate::utils::error::Result;

/// Entry point bundling the configuration with the loaded reference tables.
/// Every operation is a pure function of its arguments; the engine holds
/// no per-student state.
pub struct PlannerEngine {
    config: PlannerConfig,
    reference: ReferenceData,
}

impl PlannerEngine {
    /// Loads the reference tables named in the config (bundled by default).
    pub fn new(config: PlannerConfig) -> Result<Self> {
        let reference = ReferenceData::load(&config.reference)?;
        Ok(Self::with_reference(config, reference))
    }

    pub fn with_reference(config: PlannerConfig, reference: ReferenceData) -> Self {
        Self { config, reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn simulate(&self, input: &SimulationInput) -> SimulationResult {
        tracing::info!(
            "Running {} simulation over {} subjects",
            input.simulation_type,
            input.current_subjects.len()
        );
        let result = run_simulation(input, &self.config.simulation);
        tracing::debug!(
            "Simulation finished with confidence {} and {} recommendations",
            result.confidence_score,
            result.recommendations.len()
        );
        result
    }

    /// Runs a simulation for a stored student and appends the outcome to
    /// their history.
    pub fn simulate_and_record(
        &self,
        store: &dyn SnapshotStore,
        student_id: &str,
        simulation_type: &str,
        study_habits: Option<StudyHabits>,
        scenario_description: &str,
    ) -> Result<SimulationRecord> {
        let snapshot = store.load_snapshot(student_id)?;
        let input = snapshot.simulation_input(simulation_type, study_habits);
        let result = self.simulate(&input);
        let record = SimulationRecord::new(&snapshot, &input, scenario_description, result);
        store.save_simulation(&record)?;
        Ok(record)
    }

    pub fn browse_courses<S: AsRef<str>>(&self, subjects: &[S]) -> CourseRecommendations<'_> {
        let recommendations =
            browse_recommendations(&self.reference, subjects, &self.config.matcher);
        tracing::info!("Found {} courses sharing a subject", recommendations.total());
        recommendations
    }

    /// Shortlist built from the student's exam history. Only records of
    /// `matcher.history_exam_type` count unless `all_records` is set, as for
    /// an ITE student moving on to polytechnic.
    pub fn pathway_courses(
        &self,
        snapshot: &StudentSnapshot,
        all_records: bool,
    ) -> CourseRecommendations<'_> {
        let matcher = &self.config.matcher;
        let exam_type = (!all_records).then_some(matcher.history_exam_type.as_str());
        let subjects = history_subjects(&snapshot.academic_history, exam_type);
        let recommendations = pathway_recommendations(&self.reference, &subjects, matcher);
        tracing::info!(
            "Pathway shortlist for '{}' from {} records: {} polytechnic, {} ITE",
            snapshot.student_id,
            subjects.len(),
            recommendations.polytechnic.len(),
            recommendations.ite.len()
        );
        recommendations
    }

    pub fn careers(&self, snapshot: &StudentSnapshot) -> Vec<CareerMatch> {
        predict_careers(
            &self.reference.careers,
            snapshot.pathway.as_ref(),
            &snapshot.academic_history,
            &self.config.careers,
        )
    }

    pub fn institution_courses(&self, track: Track, institution: &str) -> Vec<&CourseRequirement> {
        courses_for_institution(self.reference.courses(track), institution)
    }
}
