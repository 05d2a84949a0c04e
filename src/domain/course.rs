use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    Polytechnic,
    #[serde(rename = "ITE")]
    Ite,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Polytechnic => f.write_str("Polytechnic"),
            Track::Ite => f.write_str("ITE"),
        }
    }
}

/// Entry requirements for one course at one or more institutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRequirement {
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    pub category: String,
    pub track: Track,
    pub required_subjects: Vec<String>,
    #[serde(default)]
    pub institution_tags: Vec<String>,
}

/// A course scored against a student's subjects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub course: &'a CourseRequirement,
    pub matching_subjects: Vec<String>,
    pub missing_subjects: Vec<String>,
    pub score_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourseRecommendations<'a> {
    pub polytechnic: Vec<MatchResult<'a>>,
    pub ite: Vec<MatchResult<'a>>,
}

impl CourseRecommendations<'_> {
    pub fn total(&self) -> usize {
        self.polytechnic.len() + self.ite.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Demand {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerJob {
    pub title: String,
    pub salary: String,
    pub demand: Demand,
    pub growth: String,
}

/// Careers a course typically leads to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerEntry {
    pub course: String,
    pub jobs: Vec<CareerJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub title: String,
    pub match_percent: u32,
    pub description: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub salary: Option<String>,
}
