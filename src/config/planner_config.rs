use crate::core::aggregate::L1R5_SUBJECTS;
use crate::domain::grade::Grade;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters for the planner. Every section is optional in the TOML
/// file; omitted values take the defaults documented on each field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub simulation: SimulationConfig,
    pub matcher: MatcherConfig,
    pub careers: CareerConfig,
    pub reference: ReferenceConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Weekly hour increase above which a grade improves a full step (5).
    pub strong_increase_hours: f64,
    /// Weekly hour increase above which a grade improves half a step (2).
    pub moderate_increase_hours: f64,
    /// Weekly hour change below which a grade drops a step (-3).
    pub decrease_hours: f64,
    /// Grade predicted for a subject with no current estimate (B4).
    pub default_grade: Grade,
    /// Number of best subjects summed into the aggregate (6).
    pub aggregate_subject_count: usize,
    /// Grade assumed for a newly added subject (B3).
    pub new_subject_grade: Grade,
    /// Weekly hours assumed for a newly added subject (3).
    pub new_subject_hours: f64,
    /// Predicted aggregate above which weaker subjects need attention (15).
    pub study_focus_threshold: u32,
    /// Predicted point value above which a subject is listed as weak (4).
    pub weak_subject_points: u8,
    pub base_confidence: u32,
    pub confidence_per_record: u32,
    pub max_history_bonus: u32,
    pub subject_change_confidence: u32,
    pub pathway_confidence: u32,
    pub leaps_confidence: u32,
    /// Target aggregate used when a goal has no parseable score (12).
    pub default_target_score: i32,
    /// Largest aggregate gap still considered achievable (6).
    pub achievable_gap: i32,
    pub achievable_probability_floor: i32,
    pub unreachable_probability_floor: i32,
    /// Optional upper clamp on the pathway probability. Unset by default,
    /// which lets the heuristic exceed 100 for targets already beaten.
    pub probability_ceiling: Option<i32>,
    /// Maximum LEAPS bonus from VIA hours (3).
    pub leaps_bonus_cap: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            strong_increase_hours: 5.0,
            moderate_increase_hours: 2.0,
            decrease_hours: -3.0,
            default_grade: Grade::B4,
            aggregate_subject_count: L1R5_SUBJECTS,
            new_subject_grade: Grade::B3,
            new_subject_hours: 3.0,
            study_focus_threshold: 15,
            weak_subject_points: 4,
            base_confidence: 75,
            confidence_per_record: 2,
            max_history_bonus: 15,
            subject_change_confidence: 70,
            pathway_confidence: 80,
            leaps_confidence: 85,
            default_target_score: 12,
            achievable_gap: 6,
            achievable_probability_floor: 50,
            unreachable_probability_floor: 20,
            probability_ceiling: None,
            leaps_bonus_cap: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Polytechnic courses must score strictly above this percentage (30).
    pub poly_min_score: f64,
    /// ITE courses must score strictly above this percentage (20).
    pub ite_min_score: f64,
    /// Polytechnic list requires an average grade point at or below this (6).
    pub poly_max_average: f64,
    /// ITE list requires an average grade point at or above this (5).
    pub ite_min_average: f64,
    /// Length cap for each pathway recommendation list (10).
    pub max_results: usize,
    /// Browse mode keeps courses strictly above this percentage (0).
    pub browse_min_score: f64,
    /// Exam type whose history records feed the pathway shortlist
    /// ("Secondary School"). Ignored when every record is requested.
    pub history_exam_type: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            poly_min_score: 30.0,
            ite_min_score: 20.0,
            poly_max_average: 6.0,
            ite_min_average: 5.0,
            max_results: 10,
            browse_min_score: 0.0,
            history_exam_type: "Secondary School".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerConfig {
    pub max_results: usize,
}

impl Default for CareerConfig {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}

/// Optional overrides for the bundled reference tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub poly_courses_csv: Option<String>,
    pub ite_courses_csv: Option<String>,
    pub careers_json: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./students".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
}

impl PlannerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PLANNER_DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let sim = &self.simulation;
        let ordered = sim.moderate_increase_hours < sim.strong_increase_hours;
        if !ordered {
            return Err(PlannerError::InvalidConfigValueError {
                field: "simulation.moderate_increase_hours".to_string(),
                value: sim.moderate_increase_hours.to_string(),
                reason: format!(
                    "Must be below simulation.strong_increase_hours ({})",
                    sim.strong_increase_hours
                ),
            });
        }
        validation::validate_range("simulation.decrease_hours", sim.decrease_hours, f64::MIN, 0.0)?;
        validation::validate_positive_number(
            "simulation.aggregate_subject_count",
            sim.aggregate_subject_count,
            1,
        )?;
        validation::validate_range(
            "simulation.new_subject_hours",
            sim.new_subject_hours,
            0.0,
            168.0,
        )?;
        validation::validate_range(
            "simulation.weak_subject_points",
            sim.weak_subject_points,
            1,
            9,
        )?;
        for (field, value) in [
            ("simulation.base_confidence", sim.base_confidence),
            ("simulation.subject_change_confidence", sim.subject_change_confidence),
            ("simulation.pathway_confidence", sim.pathway_confidence),
            ("simulation.leaps_confidence", sim.leaps_confidence),
            (
                "simulation.max_confidence",
                sim.base_confidence.saturating_add(sim.max_history_bonus),
            ),
        ] {
            validation::validate_range(field, value, 0, 100)?;
        }
        validation::validate_range("simulation.leaps_bonus_cap", sim.leaps_bonus_cap, 0.0, 100.0)?;

        let matcher = &self.matcher;
        for (field, value) in [
            ("matcher.poly_min_score", matcher.poly_min_score),
            ("matcher.ite_min_score", matcher.ite_min_score),
            ("matcher.browse_min_score", matcher.browse_min_score),
        ] {
            validation::validate_range(field, value, 0.0, 100.0)?;
        }
        validation::validate_range("matcher.poly_max_average", matcher.poly_max_average, 1.0, 9.0)?;
        validation::validate_range("matcher.ite_min_average", matcher.ite_min_average, 1.0, 9.0)?;
        validation::validate_positive_number("matcher.max_results", matcher.max_results, 1)?;
        validation::validate_non_empty_string(
            "matcher.history_exam_type",
            &matcher.history_exam_type,
        )?;
        validation::validate_positive_number("careers.max_results", self.careers.max_results, 1)?;

        for (field, path) in [
            ("reference.poly_courses_csv", &self.reference.poly_courses_csv),
            ("reference.ite_courses_csv", &self.reference.ite_courses_csv),
            ("reference.careers_json", &self.reference.careers_json),
        ] {
            if let Some(path) = path {
                validation::validate_path(field, path)?;
            }
        }
        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;

        Ok(())
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.matcher.poly_min_score, 30.0);
        assert_eq!(config.simulation.achievable_gap, 6);
        assert!(config.simulation.probability_ceiling.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_override() {
        let toml_content = r#"
[simulation]
achievable_gap = 4
new_subject_grade = "A2"
probability_ceiling = 100

[matcher]
max_results = 3
history_exam_type = "O-Level"
"#;
        let config = PlannerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.simulation.achievable_gap, 4);
        assert_eq!(config.simulation.new_subject_grade, Grade::A2);
        assert_eq!(config.simulation.probability_ceiling, Some(100));
        assert_eq!(config.simulation.default_target_score, 12);
        assert_eq!(config.matcher.max_results, 3);
        assert_eq!(config.matcher.ite_min_score, 20.0);
        assert_eq!(config.matcher.history_exam_type, "O-Level");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PLANNER_TEST_DATA_DIR", "/var/lib/planner");

        let toml_content = r#"
[storage]
data_dir = "${PLANNER_TEST_DATA_DIR}"
"#;
        let config = PlannerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.data_dir, "/var/lib/planner");

        std::env::remove_var("PLANNER_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[matcher]
poly_min_score = 130.0
"#;
        let config = PlannerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[simulation]
strong_increase_hours = 2.0
moderate_increase_hours = 4.0
"#;
        let config = PlannerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[simulation]
base_confidence = 90
max_history_bonus = 20
"#;
        let config = PlannerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[matcher]
history_exam_type = " "
"#;
        let config = PlannerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = PlannerConfig::from_toml_str("[matcher\nmax_results = 1").unwrap_err();
        assert!(matches!(err, PlannerError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[careers]\nmax_results = 3\n")
            .unwrap();

        let config = PlannerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.careers.max_results, 3);
    }
}
