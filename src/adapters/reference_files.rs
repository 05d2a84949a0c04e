use crate::domain::course::{CareerEntry, CourseRequirement, Track};
use crate::domain::ports::ReferenceSource;
use crate::utils::error::{PlannerError, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const BUNDLED_POLY_COURSES: &str = include_str!("../../data/poly_courses.csv");
const BUNDLED_ITE_COURSES: &str = include_str!("../../data/ite_courses.csv");
const BUNDLED_CAREERS: &str = include_str!("../../data/careers.json");

/// One row of a course table: `code,name,category,institutions,subjects`,
/// with `;` separating entries inside the list columns.
#[derive(Debug, Deserialize)]
struct CourseRow {
    #[serde(default)]
    code: Option<String>,
    name: String,
    category: String,
    #[serde(default)]
    institutions: String,
    subjects: String,
}

fn split_list(field: &str) -> Vec<String> {
    field
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_courses<R: Read>(reader: R, track: Track) -> Result<Vec<CourseRequirement>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut courses = Vec::new();
    for row in csv_reader.deserialize::<CourseRow>() {
        let row = row?;
        if row.name.is_empty() {
            return Err(PlannerError::ReferenceDataError {
                message: format!("{} course row {} has no name", track, courses.len() + 1),
            });
        }
        courses.push(CourseRequirement {
            code: row.code.filter(|c| !c.is_empty()),
            name: row.name,
            category: row.category,
            track,
            required_subjects: split_list(&row.subjects),
            institution_tags: split_list(&row.institutions),
        });
    }

    tracing::debug!("Parsed {} {} courses", courses.len(), track);
    Ok(courses)
}

pub fn parse_careers<R: Read>(reader: R) -> Result<Vec<CareerEntry>> {
    let careers: Vec<CareerEntry> = serde_json::from_reader(reader)?;
    Ok(careers)
}

/// Tables compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledReference;

impl ReferenceSource for BundledReference {
    fn courses(&self) -> Result<Vec<CourseRequirement>> {
        let mut courses = parse_courses(BUNDLED_POLY_COURSES.as_bytes(), Track::Polytechnic)?;
        courses.extend(parse_courses(BUNDLED_ITE_COURSES.as_bytes(), Track::Ite)?);
        Ok(courses)
    }

    fn careers(&self) -> Result<Vec<CareerEntry>> {
        parse_careers(BUNDLED_CAREERS.as_bytes())
    }
}

/// Tables read from operator-supplied files. Any table without a path falls
/// back to the bundled one.
#[derive(Debug, Clone, Default)]
pub struct FileReference {
    poly_courses_csv: Option<PathBuf>,
    ite_courses_csv: Option<PathBuf>,
    careers_json: Option<PathBuf>,
}

impl FileReference {
    pub fn new(
        poly_courses_csv: Option<PathBuf>,
        ite_courses_csv: Option<PathBuf>,
        careers_json: Option<PathBuf>,
    ) -> Self {
        Self {
            poly_courses_csv,
            ite_courses_csv,
            careers_json,
        }
    }

    fn load_courses(
        path: Option<&Path>,
        bundled: &str,
        track: Track,
    ) -> Result<Vec<CourseRequirement>> {
        match path {
            Some(path) => {
                tracing::info!("Loading {} courses from {}", track, path.display());
                parse_courses(File::open(path)?, track)
            }
            None => parse_courses(bundled.as_bytes(), track),
        }
    }
}

impl ReferenceSource for FileReference {
    fn courses(&self) -> Result<Vec<CourseRequirement>> {
        let mut courses = Self::load_courses(
            self.poly_courses_csv.as_deref(),
            BUNDLED_POLY_COURSES,
            Track::Polytechnic,
        )?;
        courses.extend(Self::load_courses(
            self.ite_courses_csv.as_deref(),
            BUNDLED_ITE_COURSES,
            Track::Ite,
        )?);
        Ok(courses)
    }

    fn careers(&self) -> Result<Vec<CareerEntry>> {
        match &self.careers_json {
            Some(path) => {
                tracing::info!("Loading career table from {}", path.display());
                parse_careers(File::open(path)?)
            }
            None => BundledReference.careers(),
        }
    }
}
