//! Grade-point arithmetic shared by the simulator and the matcher.

use crate::config::SimulationConfig;
use crate::domain::grade::{points_or_mid, Grade};
use crate::domain::model::SubjectRecord;

/// Subjects counted in an L1R5 aggregate.
pub const L1R5_SUBJECTS: usize = 6;

/// Mean point value across subjects, with ungraded subjects counted as
/// mid-scale. An empty list averages to mid-scale.
pub fn average_grade_point(subjects: &[SubjectRecord]) -> f64 {
    if subjects.is_empty() {
        return f64::from(Grade::MID_SCALE_POINTS);
    }
    let total: u32 = subjects
        .iter()
        .map(|s| u32::from(points_or_mid(s.grade_estimate)))
        .sum();
    f64::from(total) / subjects.len() as f64
}

/// Sum of the `count` best (lowest) point values. With `L1R5_SUBJECTS` this
/// is the L1R5 aggregate. Shorter lists are summed as they are.
pub fn aggregate_points(subjects: &[SubjectRecord], count: usize) -> u32 {
    let mut points: Vec<u32> = subjects
        .iter()
        .map(|s| u32::from(points_or_mid(s.grade_estimate)))
        .collect();
    points.sort_unstable();
    points.into_iter().take(count).sum()
}

/// Step function from a weekly study-hour change to a predicted grade.
pub fn predict_grade_change(
    current: Option<Grade>,
    hours_delta: f64,
    config: &SimulationConfig,
) -> Grade {
    let Some(grade) = current else {
        return config.default_grade;
    };

    let points = f64::from(grade.points());
    let adjusted = if hours_delta > config.strong_increase_hours {
        (points - 1.0).max(1.0)
    } else if hours_delta > config.moderate_increase_hours {
        (points - 0.5).max(1.0)
    } else if hours_delta < config.decrease_hours {
        (points + 1.0).min(9.0)
    } else {
        points
    };

    // Halves round up, so a half-step gain from B4 (3.5) stays at B4.
    let rounded = (adjusted + 0.5).floor() as u8;
    Grade::from_points(rounded).unwrap_or(grade)
}
