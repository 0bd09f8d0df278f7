//! Credit-weighted grade point averages.
//!
//! The same reduction serves both granularities: a semester GPA feeds it one
//! semester's subjects, the CGPA feeds it every subject of every semester.

use crate::grade::Grade;
use crate::semester::Semester;
use crate::subject::Subject;

/// Weighted average of grade points over `(grade, credits)` pairs.
///
/// Only entries with a grade and positive credits count. Returns 0 when no
/// credits qualify instead of dividing by zero.
///
/// # Examples
/// ```
/// use grademate::aggregator::compute_average;
/// use grademate::grade::Grade;
///
/// let gpa = compute_average([(Some(Grade::O), 4.0), (Some(Grade::B), 3.0)]);
/// assert!((gpa - 58.0 / 7.0).abs() < 1e-9);
/// assert_eq!(compute_average([]), 0.0);
/// ```
pub fn compute_average<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (Option<Grade>, f64)>,
{
    let mut total_points = 0.0;
    let mut total_credits = 0.0;

    for (grade, credits) in pairs {
        if let Some(grade) = grade {
            if credits > 0.0 {
                total_points += grade.points() * credits;
                total_credits += credits;
            }
        }
    }

    if total_credits > 0.0 {
        total_points / total_credits
    } else {
        0.0
    }
}

pub fn semester_gpa(subjects: &[Subject]) -> f64 {
    compute_average(subjects.iter().map(|s| (s.grade, s.credits)))
}

/// CGPA over the flattened subjects of all semesters, weighted globally.
pub fn cumulative_gpa(semesters: &[Semester]) -> f64 {
    compute_average(
        semesters
            .iter()
            .flat_map(|semester| semester.subjects.iter())
            .map(|s| (s.grade, s.credits)),
    )
}
