use crate::adapters::{BundledReference, FileReference};
use crate::config::ReferenceConfig;
use crate::domain::course::{CareerEntry, CourseRequirement, Track};
use crate::domain::ports::ReferenceSource;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;

/// Read-only tables the matcher and career predictor score against.
/// Loaded once and passed by reference into every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub poly_courses: Vec<CourseRequirement>,
    pub ite_courses: Vec<CourseRequirement>,
    pub careers: Vec<CareerEntry>,
}

impl ReferenceData {
    pub fn from_source(source: &dyn ReferenceSource) -> Result<Self> {
        let (poly_courses, ite_courses): (Vec<_>, Vec<_>) = source
            .courses()?
            .into_iter()
            .partition(|c| c.track == Track::Polytechnic);

        let data = Self {
            poly_courses,
            ite_courses,
            careers: source.careers()?,
        };
        data.validate()?;

        tracing::info!(
            "Reference data loaded: {} polytechnic courses, {} ITE courses, {} career entries",
            data.poly_courses.len(),
            data.ite_courses.len(),
            data.careers.len()
        );
        Ok(data)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_source(&BundledReference)
    }

    /// Bundled tables with any file overrides from the config applied.
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        let source = FileReference::new(
            config.poly_courses_csv.as_ref().map(PathBuf::from),
            config.ite_courses_csv.as_ref().map(PathBuf::from),
            config.careers_json.as_ref().map(PathBuf::from),
        );
        Self::from_source(&source)
    }

    pub fn courses(&self, track: Track) -> &[CourseRequirement] {
        match track {
            Track::Polytechnic => &self.poly_courses,
            Track::Ite => &self.ite_courses,
        }
    }
}

impl Validate for ReferenceData {
    fn validate(&self) -> Result<()> {
        for course in self.poly_courses.iter().chain(&self.ite_courses) {
            validation::validate_non_empty_string("course.name", &course.name)?;
            validation::validate_unique(
                &format!("{}.required_subjects", course.name),
                &course.required_subjects,
            )?;
            if course.required_subjects.is_empty() {
                tracing::warn!("Course '{}' lists no required subjects", course.name);
            }
        }
        for entry in &self.careers {
            if entry.jobs.is_empty() {
                return Err(PlannerError::ReferenceDataError {
                    message: format!("Career entry '{}' has no jobs", entry.course),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_partitions_by_track() {
        let data = ReferenceData::builtin().unwrap();
        assert_eq!(data.courses(Track::Polytechnic).len(), 132);
        assert_eq!(data.courses(Track::Ite).len(), 20);
        assert!(data.poly_courses.iter().all(|c| c.track == Track::Polytechnic));
    }

    #[test]
    fn test_duplicate_subject_is_rejected() {
        let mut data = ReferenceData::builtin().unwrap();
        data.ite_courses[0].required_subjects.push("Physics".to_string());
        data.ite_courses[0].required_subjects.push("Physics".to_string());
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_load_without_overrides_matches_builtin() {
        let loaded = ReferenceData::load(&ReferenceConfig::default()).unwrap();
        assert_eq!(loaded, ReferenceData::builtin().unwrap());
    }
}
