use crate::domain::grade::{lenient_grade, Grade};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subject the student is currently enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub subject_name: String,
    #[serde(default, deserialize_with = "lenient_grade")]
    pub grade_estimate: Option<Grade>,
    #[serde(default)]
    pub study_hours_per_week: f64,
}

impl SubjectRecord {
    pub fn new(subject_name: impl Into<String>, grade_estimate: Option<Grade>, hours: f64) -> Self {
        Self {
            subject_name: subject_name.into(),
            grade_estimate,
            study_hours_per_week: hours,
        }
    }
}

/// A historical exam result. `grade` stays a raw label because history mixes
/// O-Level grades with plain letter grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    pub subject_name: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub exam_type: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub term: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CcaRecord {
    #[serde(default)]
    pub cca_name: Option<String>,
    #[serde(default)]
    pub cca_category: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub participation_level: Option<String>,
    #[serde(default)]
    pub achievements: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub leaps_points: Option<f64>,
}

/// A goal as the student recorded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_type: String,
    pub target_institution: String,
    #[serde(default)]
    pub target_course: Option<String>,
    #[serde(default)]
    pub target_score: Option<String>,
    #[serde(default)]
    pub target_year: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Target descriptor consumed by pathway analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetGoal {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub required_score: Option<String>,
}

impl From<&Goal> for TargetGoal {
    fn from(goal: &Goal) -> Self {
        Self {
            institution: Some(goal.target_institution.clone()),
            course: goal.target_course.clone(),
            required_score: goal.target_score.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectChange {
    #[serde(default)]
    pub add: Option<String>,
    #[serde(default)]
    pub remove: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyHabits {
    #[serde(default)]
    pub hours_per_week: Option<f64>,
    #[serde(default)]
    pub subject_changes: Vec<SubjectChange>,
}

/// The chosen post-secondary route, e.g. an ITE course followed by a diploma.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathwaySelection {
    #[serde(default)]
    pub pathway_type: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub ite_course_name: Option<String>,
}

impl PathwaySelection {
    /// Course names to look up careers for, ITE course first.
    pub fn course_names(&self) -> Vec<&str> {
        match (&self.ite_course_name, &self.course_name) {
            (Some(ite), Some(diploma)) => vec![ite.as_str(), diploma.as_str()],
            (_, Some(course)) => vec![course.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Everything the record store holds for one student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentSnapshot {
    pub student_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub current_level: Option<String>,
    #[serde(default)]
    pub subjects: Vec<SubjectRecord>,
    #[serde(default)]
    pub academic_history: Vec<AcademicRecord>,
    #[serde(default)]
    pub cca_records: Vec<CcaRecord>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub pathway: Option<PathwaySelection>,
}

impl StudentSnapshot {
    /// Distinct subject names from the exam history, in first-seen order.
    pub fn history_subject_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in &self.academic_history {
            if !names.contains(&record.subject_name) {
                names.push(record.subject_name.clone());
            }
        }
        names
    }

    /// Builds simulator input from this snapshot. The first goal, if any,
    /// becomes the pathway-analysis target.
    pub fn simulation_input(
        &self,
        simulation_type: &str,
        study_habits: Option<StudyHabits>,
    ) -> SimulationInput {
        SimulationInput {
            simulation_type: simulation_type.to_string(),
            current_subjects: self.subjects.clone(),
            academic_history: self.academic_history.clone(),
            cca_records: self.cca_records.clone(),
            study_habits,
            target_goal: self.goals.first().map(TargetGoal::from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub simulation_type: String,
    #[serde(default)]
    pub current_subjects: Vec<SubjectRecord>,
    #[serde(default)]
    pub academic_history: Vec<AcademicRecord>,
    #[serde(default)]
    pub cca_records: Vec<CcaRecord>,
    #[serde(default)]
    pub study_habits: Option<StudyHabits>,
    #[serde(default)]
    pub target_goal: Option<TargetGoal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(kind: &str, message: impl Into<String>, priority: Priority) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPrediction {
    pub subject: String,
    pub current: Grade,
    pub predicted: Grade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OLevelOutcome {
    pub current_l1r5: u32,
    pub predicted_l1r5: u32,
    pub improvement: i32,
    pub subject_predictions: Vec<SubjectPrediction>,
    pub study_hours_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectChangeOutcome {
    pub current_l1r5: u32,
    pub predicted_l1r5_with_changes: u32,
    pub difference: i32,
    pub new_subject_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayOutcome {
    pub current_l1r5: u32,
    pub target_score: i32,
    pub gap: i32,
    pub achievable: bool,
    pub target_institution: String,
    pub probability: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeapsOutcome {
    pub current_leaps_points: f64,
    pub potential_additional_points: f64,
    pub projected_total: f64,
    pub via_impact: f64,
}

/// Per-mode outcome record. Serializes as a plain object; `Empty` is `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictedOutcomes {
    OLevel(OLevelOutcome),
    SubjectChange(SubjectChangeOutcome),
    Pathway(PathwayOutcome),
    Leaps(LeapsOutcome),
    Empty {},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub predicted_outcomes: PredictedOutcomes,
    pub confidence_score: u32,
    pub recommendations: Vec<Recommendation>,
}

impl SimulationResult {
    /// Result for an unsupported simulation type.
    pub fn empty() -> Self {
        Self {
            predicted_outcomes: PredictedOutcomes::Empty {},
            confidence_score: 0,
            recommendations: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.predicted_outcomes, PredictedOutcomes::Empty {})
            && self.recommendations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParameters {
    pub subjects: usize,
    pub history: usize,
}

/// A simulation run as handed to the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub student_id: String,
    pub simulation_type: String,
    pub scenario_description: String,
    pub input_parameters: InputParameters,
    pub predicted_outcomes: PredictedOutcomes,
    pub confidence_score: u32,
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
}

impl SimulationRecord {
    pub fn new(
        snapshot: &StudentSnapshot,
        input: &SimulationInput,
        scenario_description: impl Into<String>,
        result: SimulationResult,
    ) -> Self {
        Self {
            student_id: snapshot.student_id.clone(),
            simulation_type: input.simulation_type.clone(),
            scenario_description: scenario_description.into(),
            input_parameters: InputParameters {
                subjects: input.current_subjects.len(),
                history: input.academic_history.len(),
            },
            predicted_outcomes: result.predicted_outcomes,
            confidence_score: result.confidence_score,
            recommendations: result.recommendations,
            created_at: Utc::now(),
        }
    }
}
