use crate::config::PlannerConfig;
use crate::domain::model::{StudyHabits, SubjectChange};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "pathway-planner")]
#[command(about = "Grade simulation and post-secondary pathway matching")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding student snapshots (overrides storage.data_dir)
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a what-if simulation for a stored student
    Simulate {
        student_id: String,

        /// o-level-prediction, subject-change, pathway-analysis or leaps-impact
        #[arg(short = 't', long = "type", default_value = "o-level-prediction")]
        simulation_type: String,

        /// Requested total weekly study hours
        #[arg(long)]
        hours: Option<f64>,

        /// Subject to add (repeatable)
        #[arg(long)]
        add: Vec<String>,

        /// Subject to drop (repeatable)
        #[arg(long)]
        remove: Vec<String>,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Append the result to the student's simulation history
        #[arg(long)]
        record: bool,
    },

    /// Courses sharing at least one subject
    Courses {
        /// Use the subjects of a stored student
        #[arg(long, conflicts_with = "subjects")]
        student: Option<String>,

        #[arg(long, value_delimiter = ',')]
        subjects: Vec<String>,
    },

    /// Polytechnic and ITE shortlist from a stored student's exam history
    Pathway {
        student_id: String,

        /// Use every exam record, not only secondary-school ones
        #[arg(long)]
        all_records: bool,
    },

    /// Career matches for a stored student
    Careers { student_id: String },

    /// Courses offered by an institution, e.g. "Singapore Polytechnic (SP)"
    Institution {
        name: String,

        /// Search the ITE table instead of the polytechnic one
        #[arg(long)]
        ite: bool,
    },

    /// Stored simulation history for a student
    History { student_id: String },
}

impl CliArgs {
    /// Whether JSON logging is on, known before overrides are applied.
    pub fn wants_json_logs(&self, config: &PlannerConfig) -> bool {
        self.json_logs || config.logging.json
    }

    /// Applies command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut PlannerConfig) {
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
            tracing::info!("🔧 Data directory overridden to: {}", dir);
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}

impl Command {
    /// Study habits described by the simulate flags, if any were given.
    pub fn study_habits(&self) -> Option<StudyHabits> {
        let Command::Simulate {
            hours, add, remove, ..
        } = self
        else {
            return None;
        };
        if hours.is_none() && add.is_empty() && remove.is_empty() {
            return None;
        }

        let removals = remove.iter().map(|r| SubjectChange {
            add: None,
            remove: Some(r.clone()),
        });
        let additions = add.iter().map(|a| SubjectChange {
            add: Some(a.clone()),
            remove: None,
        });
        Some(StudyHabits {
            hours_per_week: *hours,
            subject_changes: removals.chain(additions).collect(),
        })
    }
}

impl Validate for CliArgs {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            validation::validate_path("data_dir", dir)?;
        }
        match &self.command {
            Command::Simulate {
                student_id, hours, ..
            } => {
                validation::validate_non_empty_string("student_id", student_id)?;
                if let Some(hours) = hours {
                    validation::validate_range("hours", *hours, 0.0, 168.0)?;
                }
            }
            Command::Pathway { student_id, .. }
            | Command::Careers { student_id }
            | Command::History { student_id } => {
                validation::validate_non_empty_string("student_id", student_id)?;
            }
            Command::Institution { name, .. } => {
                validation::validate_non_empty_string("name", name)?;
            }
            Command::Courses { student, subjects } => {
                if subjects.is_empty() {
                    validation::validate_required_field("student", student)?;
                }
            }
        }
        Ok(())
    }
}
