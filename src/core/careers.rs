use crate::config::CareerConfig;
use crate::domain::course::{CareerEntry, CareerMatch, Demand};
use crate::domain::model::{AcademicRecord, PathwaySelection};
use std::collections::{HashMap, HashSet};

/// Percentage equivalent of a recorded grade. Covers both the O-level
/// scale and plain letter grades; anything else is ignored.
pub fn grade_percentage(grade: &str) -> Option<f64> {
    let pct = match grade.trim().to_ascii_uppercase().as_str() {
        "A1" => 90.0,
        "A2" => 85.0,
        "B3" => 80.0,
        "B4" => 75.0,
        "C5" => 70.0,
        "C6" => 65.0,
        "D7" => 60.0,
        "E8" => 55.0,
        "F9" => 50.0,
        "A" => 85.0,
        "B" => 75.0,
        "C" => 65.0,
        "D" => 55.0,
        "F" => 40.0,
        _ => return None,
    };
    Some(pct)
}

/// Average percentage per subject. Subjects without a recognised grade
/// are left out.
pub fn subject_averages(history: &[AcademicRecord]) -> HashMap<String, f64> {
    let mut totals: HashMap<&str, (f64, u32)> = HashMap::new();
    for record in history {
        let Some(pct) = record.grade.as_deref().and_then(grade_percentage) else {
            continue;
        };
        let entry = totals.entry(record.subject_name.as_str()).or_insert((0.0, 0));
        entry.0 += pct;
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(subject, (sum, count))| (subject.to_string(), sum / f64::from(count)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectGroupScores {
    pub math: f64,
    pub science: f64,
    pub language: f64,
    pub computing: f64,
}

impl SubjectGroupScores {
    const NEUTRAL: f64 = 70.0;

    pub fn from_history(history: &[AcademicRecord]) -> Self {
        let averages = subject_averages(history);
        let first_of = |subjects: &[&str]| subjects.iter().find_map(|s| averages.get(*s).copied());

        Self {
            math: first_of(&["Mathematics"]).unwrap_or(Self::NEUTRAL),
            science: first_of(&["Physics", "Chemistry", "Biology", "Science"])
                .unwrap_or(Self::NEUTRAL),
            language: first_of(&["English Language", "English"]).unwrap_or(Self::NEUTRAL),
            computing: first_of(&["Computer Applications", "Computing"]).unwrap_or(0.0),
        }
    }
}

fn demand_match(demand: Demand) -> u32 {
    match demand {
        Demand::VeryHigh => 95,
        Demand::High => 85,
        Demand::Medium => 70,
        Demand::Low => 60,
    }
}

/// Jobs listed for the selected courses, first occurrence of each title kept.
fn careers_for_selection(
    careers: &[CareerEntry],
    selection: &PathwaySelection,
) -> Vec<CareerMatch> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for course in selection.course_names() {
        let Some(entry) = careers.iter().find(|c| c.course == course) else {
            tracing::debug!("No career table entry for '{}'", course);
            continue;
        };
        for job in &entry.jobs {
            if !seen.insert(job.title.as_str()) {
                continue;
            }
            matches.push(CareerMatch {
                title: job.title.clone(),
                match_percent: demand_match(job.demand),
                description: format!("Growth: {}", job.growth),
                skills: Vec::new(),
                salary: Some(job.salary.clone()),
            });
        }
    }
    matches
}

fn archetype(
    title: &str,
    score: f64,
    description: &str,
    skills: [&str; 2],
    salary: &str,
) -> CareerMatch {
    CareerMatch {
        title: title.to_string(),
        match_percent: score.round() as u32,
        description: description.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        salary: Some(salary.to_string()),
    }
}

/// Broad career archetypes suggested from subject-group strength.
fn heuristic_careers(scores: SubjectGroupScores) -> Vec<CareerMatch> {
    let SubjectGroupScores {
        math: m,
        science: s,
        language: l,
        computing: c,
    } = scores;
    let mut matches = Vec::new();

    if c > 75.0 || m > 80.0 {
        matches.push(archetype(
            "Software Engineer",
            c * 0.4 + m * 0.4 + s * 0.2,
            "Design and develop software applications",
            ["Programming", "Problem Solving"],
            "$4,500 - $7,000",
        ));
    }
    if s > 75.0 && m > 75.0 {
        matches.push(archetype(
            "Data Scientist",
            m * 0.5 + s * 0.3 + c * 0.2,
            "Analyze complex data for insights",
            ["Statistics", "Programming"],
            "$5,000 - $8,000",
        ));
    }
    if m > 75.0 || s > 75.0 {
        matches.push(archetype(
            "Engineer",
            m * 0.5 + s * 0.5,
            "Apply scientific principles to solve problems",
            ["Mathematics", "Physics"],
            "$4,000 - $6,500",
        ));
    }
    if s > 70.0 {
        matches.push(archetype(
            "Healthcare Professional",
            s * 0.6 + m * 0.2 + l * 0.2,
            "Provide medical care and support",
            ["Biology", "Chemistry"],
            "$3,800 - $6,000",
        ));
    }
    matches.push(archetype(
        "Business Analyst",
        m * 0.3 + l * 0.4 + s * 0.3,
        "Help businesses make data-driven decisions",
        ["Analysis", "Communication"],
        "$4,200 - $6,800",
    ));
    matches
}

/// Career matches for a student. The career table is consulted for the
/// selected pathway first; the academic-history heuristic is used when
/// that yields nothing.
pub fn predict_careers(
    careers: &[CareerEntry],
    selection: Option<&PathwaySelection>,
    history: &[AcademicRecord],
    config: &CareerConfig,
) -> Vec<CareerMatch> {
    let mut matches = selection
        .map(|s| careers_for_selection(careers, s))
        .unwrap_or_default();

    if matches.is_empty() {
        let scores = SubjectGroupScores::from_history(history);
        tracing::debug!("Falling back to subject-group heuristic: {:?}", scores);
        matches = heuristic_careers(scores);
    }

    matches.sort_by(|a, b| b.match_percent.cmp(&a.match_percent));
    matches.truncate(config.max_results);
    matches
}
