use crate::config::MatcherConfig;
use crate::core::aggregate::average_grade_point;
use crate::core::reference::ReferenceData;
use crate::domain::course::{CourseRecommendations, CourseRequirement, MatchResult, Track};
use crate::domain::model::{AcademicRecord, SubjectRecord};
use regex::Regex;
use std::collections::HashSet;

/// Scores one course against the student's subjects. Matching and missing
/// subjects keep the course's own ordering.
pub fn score_course<'a>(
    course: &'a CourseRequirement,
    subjects: &HashSet<&str>,
) -> MatchResult<'a> {
    let (matching_subjects, missing_subjects): (Vec<String>, Vec<String>) = course
        .required_subjects
        .iter()
        .cloned()
        .partition(|s| subjects.contains(s.as_str()));

    let denominator = course.required_subjects.len().max(1) as f64;
    let score_percent = matching_subjects.len() as f64 * 100.0 / denominator;

    MatchResult {
        course,
        matching_subjects,
        missing_subjects,
        score_percent,
    }
}

/// Scores every course and keeps those strictly above `min_score`, best
/// first. Equal scores keep table order.
pub fn rank_courses<'a, S: AsRef<str>>(
    courses: &'a [CourseRequirement],
    subjects: &[S],
    min_score: f64,
) -> Vec<MatchResult<'a>> {
    let subject_set: HashSet<&str> = subjects.iter().map(|s| s.as_ref()).collect();
    let mut ranked: Vec<MatchResult<'a>> = courses
        .iter()
        .map(|course| score_course(course, &subject_set))
        .filter(|m| m.score_percent > min_score)
        .collect();
    ranked.sort_by(|a, b| b.score_percent.total_cmp(&a.score_percent));
    ranked
}

/// Every course sharing at least one subject with the student, unlimited.
pub fn browse_recommendations<'a, S: AsRef<str>>(
    reference: &'a ReferenceData,
    subjects: &[S],
    config: &MatcherConfig,
) -> CourseRecommendations<'a> {
    CourseRecommendations {
        polytechnic: rank_courses(&reference.poly_courses, subjects, config.browse_min_score),
        ite: rank_courses(&reference.ite_courses, subjects, config.browse_min_score),
    }
}

/// Course shortlist for the pathway selector. The average grade point
/// decides which tracks are open: polytechnic needs an average at or below
/// `poly_max_average`, ITE at or above `ite_min_average`.
pub fn pathway_recommendations<'a>(
    reference: &'a ReferenceData,
    subjects: &[SubjectRecord],
    config: &MatcherConfig,
) -> CourseRecommendations<'a> {
    if subjects.is_empty() {
        return CourseRecommendations::default();
    }

    let names: Vec<&str> = subjects.iter().map(|s| s.subject_name.as_str()).collect();
    let average = average_grade_point(subjects);

    let shortlist = |track: Track, min_score: f64, eligible: bool| -> Vec<MatchResult<'a>> {
        if !eligible {
            return Vec::new();
        }
        let mut ranked = rank_courses(reference.courses(track), &names, min_score);
        ranked.truncate(config.max_results);
        ranked
    };

    let recommendations = CourseRecommendations {
        polytechnic: shortlist(
            Track::Polytechnic,
            config.poly_min_score,
            average <= config.poly_max_average,
        ),
        ite: shortlist(Track::Ite, config.ite_min_score, average >= config.ite_min_average),
    };

    tracing::debug!(
        "Average grade point {:.2}: {} polytechnic and {} ITE matches",
        average,
        recommendations.polytechnic.len(),
        recommendations.ite.len()
    );
    recommendations
}

/// Exam history as graded subjects for the pathway shortlist. With an
/// `exam_type`, only records of that type are kept. Labels outside the
/// `A1..F9` scale count as ungraded.
pub fn history_subjects(
    history: &[AcademicRecord],
    exam_type: Option<&str>,
) -> Vec<SubjectRecord> {
    history
        .iter()
        .filter(|r| exam_type.map_or(true, |t| r.exam_type == t))
        .map(|r| {
            let grade = r.grade.as_deref().and_then(|g| g.parse().ok());
            SubjectRecord::new(r.subject_name.clone(), grade, 0.0)
        })
        .collect()
}

/// Institution code from a display name, e.g. "Temasek Polytechnic (TP)" gives "TP".
pub fn institution_code(display_name: &str) -> Option<String> {
    let re = Regex::new(r"\(([^)]+)\)").ok()?;
    re.captures(display_name)
        .map(|caps| caps[1].trim().to_string())
}

/// Courses offered at an institution, in table order.
pub fn courses_for_institution<'a>(
    courses: &'a [CourseRequirement],
    institution: &str,
) -> Vec<&'a CourseRequirement> {
    let Some(code) = institution_code(institution) else {
        return Vec::new();
    };
    courses
        .iter()
        .filter(|c| c.institution_tags.iter().any(|tag| *tag == code))
        .collect()
}
