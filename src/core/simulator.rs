use crate::config::SimulationConfig;
use crate::core::aggregate::{aggregate_points, predict_grade_change};
use crate::domain::grade::Grade;
use crate::domain::model::{
    LeapsOutcome, OLevelOutcome, PathwayOutcome, PredictedOutcomes, Priority, Recommendation,
    SimulationInput, SimulationResult, SubjectChangeOutcome, SubjectPrediction, SubjectRecord,
};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationType {
    OLevelPrediction,
    SubjectChange,
    PathwayAnalysis,
    LeapsImpact,
}

impl SimulationType {
    pub const ALL: [SimulationType; 4] = [
        SimulationType::OLevelPrediction,
        SimulationType::SubjectChange,
        SimulationType::PathwayAnalysis,
        SimulationType::LeapsImpact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SimulationType::OLevelPrediction => "o-level-prediction",
            SimulationType::SubjectChange => "subject-change",
            SimulationType::PathwayAnalysis => "pathway-analysis",
            SimulationType::LeapsImpact => "leaps-impact",
        }
    }
}

impl fmt::Display for SimulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SimulationType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unsupported simulation type '{}'", s))
    }
}

/// Runs one simulation. Unknown types yield an empty result.
pub fn run_simulation(input: &SimulationInput, config: &SimulationConfig) -> SimulationResult {
    let simulation_type = match input.simulation_type.parse::<SimulationType>() {
        Ok(t) => t,
        Err(reason) => {
            tracing::warn!("{}; returning empty result", reason);
            return SimulationResult::empty();
        }
    };

    tracing::debug!(
        "Running {} over {} subjects",
        simulation_type,
        input.current_subjects.len()
    );

    match simulation_type {
        SimulationType::OLevelPrediction => simulate_o_level_prediction(input, config),
        SimulationType::SubjectChange => simulate_subject_change(input, config),
        SimulationType::PathwayAnalysis => simulate_pathway_analysis(input, config),
        SimulationType::LeapsImpact => simulate_leaps_impact(input, config),
    }
}

fn requested_hours(input: &SimulationInput) -> Option<f64> {
    input.study_habits.as_ref().and_then(|h| h.hours_per_week)
}

fn simulate_o_level_prediction(
    input: &SimulationInput,
    config: &SimulationConfig,
) -> SimulationResult {
    let subjects = &input.current_subjects;
    let count = config.aggregate_subject_count;
    let current_l1r5 = aggregate_points(subjects, count);

    let current_total_hours: f64 = subjects.iter().map(|s| s.study_hours_per_week).sum();
    let hours_diff = requested_hours(input).unwrap_or(current_total_hours) - current_total_hours;
    let per_subject_delta = if subjects.is_empty() {
        0.0
    } else {
        hours_diff / subjects.len() as f64
    };

    let subject_predictions: Vec<SubjectPrediction> = subjects
        .iter()
        .map(|s| SubjectPrediction {
            subject: s.subject_name.clone(),
            current: s.grade_estimate.unwrap_or(config.default_grade),
            predicted: predict_grade_change(s.grade_estimate, per_subject_delta, config),
        })
        .collect();

    let predicted_subjects: Vec<SubjectRecord> = subjects
        .iter()
        .zip(&subject_predictions)
        .map(|(s, p)| SubjectRecord {
            grade_estimate: Some(p.predicted),
            ..s.clone()
        })
        .collect();
    let predicted_l1r5 = aggregate_points(&predicted_subjects, count);

    let history_bonus = u32::try_from(input.academic_history.len())
        .unwrap_or(u32::MAX)
        .saturating_mul(config.confidence_per_record)
        .min(config.max_history_bonus);
    let confidence_score = config.base_confidence.saturating_add(history_bonus);

    let mut recommendations = Vec::new();
    if predicted_l1r5 > config.study_focus_threshold {
        recommendations.push(Recommendation::new(
            "Study Focus",
            "Your predicted L1R5 indicates room for improvement. Focus on weaker subjects.",
            Priority::High,
        ));
    }
    if hours_diff < 0.0 {
        recommendations.push(Recommendation::new(
            "Study Hours",
            "Reducing study hours may negatively impact your results. Consider maintaining current effort.",
            Priority::Medium,
        ));
    }
    let weak_subjects: Vec<&str> = subject_predictions
        .iter()
        .filter(|p| p.predicted.points() > config.weak_subject_points)
        .map(|p| p.subject.as_str())
        .collect();
    recommendations.push(Recommendation::new(
        "Subject Performance",
        format!(
            "Focus on {} for maximum L1R5 improvement.",
            weak_subjects.join(", ")
        ),
        Priority::High,
    ));

    SimulationResult {
        predicted_outcomes: PredictedOutcomes::OLevel(OLevelOutcome {
            current_l1r5,
            predicted_l1r5,
            improvement: current_l1r5 as i32 - predicted_l1r5 as i32,
            subject_predictions,
            study_hours_change: hours_diff,
        }),
        confidence_score,
        recommendations,
    }
}

fn simulate_subject_change(input: &SimulationInput, config: &SimulationConfig) -> SimulationResult {
    let current = &input.current_subjects;
    let mut new_subjects = current.clone();

    let changes = input
        .study_habits
        .as_ref()
        .map(|h| h.subject_changes.as_slice())
        .unwrap_or_default();
    for change in changes {
        if let Some(remove) = change.remove.as_deref().filter(|r| !r.is_empty()) {
            new_subjects.retain(|s| s.subject_name != remove);
        }
        if let Some(add) = change.add.as_deref().filter(|a| !a.is_empty()) {
            new_subjects.push(SubjectRecord::new(
                add,
                Some(config.new_subject_grade),
                config.new_subject_hours,
            ));
        }
    }

    let count = config.aggregate_subject_count;
    let current_l1r5 = aggregate_points(current, count);
    let new_l1r5 = aggregate_points(&new_subjects, count);

    let recommendation = if new_l1r5 < current_l1r5 {
        Recommendation::new(
            "Subject Change",
            "This subject combination may improve your L1R5 score.",
            Priority::High,
        )
    } else {
        Recommendation::new(
            "Subject Change",
            "Consider your interest and aptitude, not just predicted scores.",
            Priority::Medium,
        )
    };

    SimulationResult {
        predicted_outcomes: PredictedOutcomes::SubjectChange(SubjectChangeOutcome {
            current_l1r5,
            predicted_l1r5_with_changes: new_l1r5,
            difference: current_l1r5 as i32 - new_l1r5 as i32,
            new_subject_list: new_subjects.into_iter().map(|s| s.subject_name).collect(),
        }),
        confidence_score: config.subject_change_confidence,
        recommendations: vec![recommendation],
    }
}

/// Leading integer of a score string, e.g. "12 points" is 12.
pub fn parse_required_score(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().ok().map(|n| sign * n)
}

fn simulate_pathway_analysis(
    input: &SimulationInput,
    config: &SimulationConfig,
) -> SimulationResult {
    let current_l1r5 = aggregate_points(&input.current_subjects, config.aggregate_subject_count);
    let goal = input.target_goal.as_ref();
    // Targets outside the aggregate scale are clamped onto it.
    let max_aggregate = i32::try_from(config.aggregate_subject_count)
        .unwrap_or(i32::MAX)
        .saturating_mul(i32::from(Grade::F9.points()));
    let target_score = goal
        .and_then(|g| g.required_score.as_deref())
        .and_then(parse_required_score)
        .unwrap_or(config.default_target_score)
        .clamp(0, max_aggregate);

    let gap = i32::try_from(current_l1r5)
        .unwrap_or(i32::MAX)
        .saturating_sub(target_score);
    let achievable = gap <= config.achievable_gap;

    let institution = goal
        .and_then(|g| g.institution.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or("Not specified");
    let course = goal
        .and_then(|g| g.course.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or("Not specified");

    let mut recommendations = Vec::new();
    if achievable {
        recommendations.push(Recommendation::new(
            "Pathway",
            format!(
                "Your goal of {} - {} is achievable with focused effort.",
                institution, course
            ),
            Priority::High,
        ));
        if gap > 0 {
            recommendations.push(Recommendation::new(
                "Action Plan",
                format!(
                    "Improve {} subjects by one grade to reach your target.",
                    gap
                ),
                Priority::High,
            ));
        }
    } else {
        recommendations.push(Recommendation::new(
            "Alternative Pathway",
            "Consider polytechnic pathways or alternative courses that align with your current trajectory.",
            Priority::High,
        ));
    }

    let mut probability = if achievable {
        config
            .achievable_probability_floor
            .max(100i32.saturating_sub(gap.saturating_mul(10)))
    } else {
        config
            .unreachable_probability_floor
            .max(50i32.saturating_sub(gap.saturating_mul(5)))
    };
    if let Some(ceiling) = config.probability_ceiling {
        probability = probability.min(ceiling);
    }

    SimulationResult {
        predicted_outcomes: PredictedOutcomes::Pathway(PathwayOutcome {
            current_l1r5,
            target_score,
            gap,
            achievable,
            target_institution: institution.to_string(),
            probability,
        }),
        confidence_score: config.pathway_confidence,
        recommendations,
    }
}

fn simulate_leaps_impact(input: &SimulationInput, config: &SimulationConfig) -> SimulationResult {
    let current_leaps_points: f64 = input
        .cca_records
        .iter()
        .map(|cca| cca.leaps_points.unwrap_or(0.0))
        .sum();
    let via_hours = requested_hours(input).unwrap_or(0.0);
    let additional_points = via_hours.min(config.leaps_bonus_cap);

    let recommendations = vec![
        Recommendation::new(
            "LEAPS 2.0",
            format!(
                "Current LEAPS points: {}. VIA projects can add up to {} bonus points.",
                current_leaps_points, config.leaps_bonus_cap
            ),
            Priority::Medium,
        ),
        Recommendation::new(
            "Leadership",
            "Taking leadership roles in CCA or VIA projects significantly boosts your LEAPS profile.",
            Priority::High,
        ),
    ];

    SimulationResult {
        predicted_outcomes: PredictedOutcomes::Leaps(LeapsOutcome {
            current_leaps_points,
            potential_additional_points: additional_points,
            projected_total: current_leaps_points + additional_points,
            via_impact: additional_points,
        }),
        confidence_score: config.leaps_confidence,
        recommendations,
    }
}
