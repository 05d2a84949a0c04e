use crate::utils::error::{PlannerError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PlannerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so check containment rather than exclusion.
    let in_range = value >= min && value <= max;
    if !in_range {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Rejects a list that repeats an entry, e.g. a course requiring the same subject twice.
pub fn validate_unique(field_name: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(PlannerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("matcher.max_results", 5, 1).is_ok());
        assert!(validate_positive_number("matcher.max_results", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("matcher.poly_min_score", 30.0, 0.0, 100.0).is_ok());
        assert!(validate_range("matcher.poly_min_score", 100.5, 0.0, 100.0).is_err());
        assert!(validate_range("matcher.poly_min_score", f64::NAN, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_validate_unique() {
        let subjects = vec!["Mathematics".to_string(), "Physics".to_string()];
        assert!(validate_unique("subjects", &subjects).is_ok());

        let repeated = vec!["Physics".to_string(), "Physics".to_string()];
        assert!(validate_unique("subjects", &repeated).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(12);
        assert_eq!(*validate_required_field("target", &present).unwrap(), 12);
        let absent: Option<u32> = None;
        assert!(validate_required_field("target", &absent).is_err());
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("data_dir", "./data").is_ok());
        assert!(validate_path("data_dir", "").is_err());
        assert!(validate_non_empty_string("student_id", "  ").is_err());
    }
}
