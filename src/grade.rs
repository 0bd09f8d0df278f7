use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GradeError;

/// Letter grades accepted by the calculator.
///
/// The set is closed, so the grade point lookup is total and an unknown grade
/// can only be rejected at parse time, never silently multiplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "O")]
    O,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "U")]
    U,
    #[serde(rename = "SA")]
    SA,
    #[serde(rename = "W")]
    W,
}

impl Grade {
    /// All grades in selector order.
    pub const ALL: [Grade; 9] = [
        Grade::O,
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::C,
        Grade::U,
        Grade::SA,
        Grade::W,
    ];

    /// Grade point value of this grade.
    pub fn points(self) -> f64 {
        match self {
            Grade::O => 10.0,
            Grade::APlus => 9.0,
            Grade::A => 8.0,
            Grade::BPlus => 7.0,
            Grade::B => 6.0,
            Grade::C => 5.0,
            Grade::U | Grade::SA | Grade::W => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::O => "O",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::U => "U",
            Grade::SA => "SA",
            Grade::W => "W",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Grade::ALL
            .into_iter()
            .find(|grade| grade.as_str() == wanted)
            .ok_or_else(|| GradeError::InvalidGrade(s.trim().to_string()))
    }
}
