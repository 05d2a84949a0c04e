use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// O-Level grade on the nine-step scale. Point value 1 is the best grade, 9 the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A1,
    A2,
    B3,
    B4,
    C5,
    C6,
    D7,
    E8,
    F9,
}

impl Grade {
    pub const ALL: [Grade; 9] = [
        Grade::A1,
        Grade::A2,
        Grade::B3,
        Grade::B4,
        Grade::C5,
        Grade::C6,
        Grade::D7,
        Grade::E8,
        Grade::F9,
    ];

    /// Point value substituted for a subject with no grade.
    pub const MID_SCALE_POINTS: u8 = 5;

    pub fn points(self) -> u8 {
        match self {
            Grade::A1 => 1,
            Grade::A2 => 2,
            Grade::B3 => 3,
            Grade::B4 => 4,
            Grade::C5 => 5,
            Grade::C6 => 6,
            Grade::D7 => 7,
            Grade::E8 => 8,
            Grade::F9 => 9,
        }
    }

    pub fn from_points(points: u8) -> Option<Grade> {
        Grade::ALL.get(usize::from(points).checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::A1 => "A1",
            Grade::A2 => "A2",
            Grade::B3 => "B3",
            Grade::B4 => "B4",
            Grade::C5 => "C5",
            Grade::C6 => "C6",
            Grade::D7 => "D7",
            Grade::E8 => "E8",
            Grade::F9 => "F9",
        }
    }
}

/// Point value of an optional grade, falling back to mid-scale.
pub fn points_or_mid(grade: Option<Grade>) -> u8 {
    grade.map_or(Grade::MID_SCALE_POINTS, Grade::points)
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGrade(pub String);

impl fmt::Display for UnknownGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown grade label '{}'", self.0)
    }
}

impl std::error::Error for UnknownGrade {}

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::ALL
            .iter()
            .copied()
            .find(|g| g.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

/// Deserializes an optional grade, mapping unrecognised labels to `None`
/// so that a bad label behaves like an ungraded subject.
pub fn lenient_grade<'de, D>(deserializer: D) -> Result<Option<Grade>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|label| label.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_round_trip_for_every_grade() {
        for grade in Grade::ALL {
            let points = grade.points();
            let back = Grade::from_points(points).unwrap();
            assert_eq!(back.points(), points);
            assert_eq!(back, grade);
        }
    }

    #[test]
    fn test_scale_is_monotonic() {
        for pair in Grade::ALL.windows(2) {
            assert!(pair[0].points() < pair[1].points());
        }
    }

    #[test]
    fn test_from_points_outside_scale() {
        assert_eq!(Grade::from_points(0), None);
        assert_eq!(Grade::from_points(10), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("B4".parse::<Grade>().unwrap(), Grade::B4);
        assert_eq!(" c6 ".parse::<Grade>().unwrap(), Grade::C6);
        assert!("A".parse::<Grade>().is_err());
    }

    #[test]
    fn test_lenient_deserialization() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "lenient_grade")]
            grade: Option<Grade>,
        }

        let row: Row = serde_json::from_str(r#"{"grade": "A2"}"#).unwrap();
        assert_eq!(row.grade, Some(Grade::A2));

        let row: Row = serde_json::from_str(r#"{"grade": "Z0"}"#).unwrap();
        assert_eq!(row.grade, None);

        let row: Row = serde_json::from_str(r#"{"grade": null}"#).unwrap();
        assert_eq!(row.grade, None);

        let row: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(row.grade, None);
    }

    #[test]
    fn test_points_or_mid() {
        assert_eq!(points_or_mid(None), 5);
        assert_eq!(points_or_mid(Some(Grade::A1)), 1);
    }
}
