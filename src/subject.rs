use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GradeError, Result};
use crate::grade::Grade;

pub const MIN_CREDITS: f64 = 0.5;
pub const MAX_CREDITS: f64 = 5.0;
pub const CREDIT_STEP: f64 = 0.5;

/// Credits given to a freshly added subject, and the fallback for an empty field.
pub const DEFAULT_CREDITS: f64 = 1.0;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub grade: Option<Grade>,
    pub credits: f64,
}

/// A single edit applied to a subject.
#[derive(Clone, Debug, PartialEq)]
pub enum SubjectField {
    Name(String),
    Grade(Option<Grade>),
    Credits(f64),
}

impl Subject {
    pub fn create() -> Self {
        Subject {
            id: Uuid::new_v4(),
            name: String::new(),
            grade: None,
            credits: DEFAULT_CREDITS,
        }
    }

    pub fn apply(&mut self, field: SubjectField) -> Result<()> {
        match field {
            SubjectField::Name(name) => self.name = name,
            SubjectField::Grade(grade) => self.grade = grade,
            SubjectField::Credits(credits) => self.credits = validate_credits(credits)?,
        }
        Ok(())
    }
}

pub fn validate_credits(credits: f64) -> Result<f64> {
    let steps = credits / CREDIT_STEP;
    if !credits.is_finite()
        || !(MIN_CREDITS..=MAX_CREDITS).contains(&credits)
        || steps.fract() != 0.0
    {
        return Err(GradeError::InvalidCredits(credits.to_string()));
    }
    Ok(credits)
}

/// Parses a credits field as typed by the user.
///
/// An empty field falls back to [`DEFAULT_CREDITS`]; anything else must be a
/// number within range.
pub fn parse_credits(input: &str) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_CREDITS);
    }
    let credits = input
        .parse::<f64>()
        .map_err(|_| GradeError::InvalidCredits(input.to_string()))?;
    validate_credits(credits)
}
