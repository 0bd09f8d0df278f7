use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregator::semester_gpa;
use crate::error::{GradeError, Result};
use crate::subject::{Subject, SubjectField};

pub const MAX_SUBJECTS: usize = 20;

/// One semester and its cached GPA.
///
/// `subjects` is only mutated through the methods below so that `gpa` is
/// always in step with it.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Semester {
    pub id: Uuid,
    pub number: usize,
    pub subjects: Vec<Subject>,
    pub gpa: f64,
}

impl Semester {
    pub fn create(number: usize) -> Self {
        Semester {
            id: Uuid::new_v4(),
            number,
            subjects: Vec::new(),
            gpa: 0.0,
        }
    }

    pub fn add_subject(&mut self) -> Result<&Subject> {
        if self.subjects.len() >= MAX_SUBJECTS {
            return Err(GradeError::SubjectLimit {
                limit: MAX_SUBJECTS,
            });
        }
        self.subjects.push(Subject::create());
        self.recalculate();
        Ok(&self.subjects[self.subjects.len() - 1])
    }

    /// Applies `field` to the subject at 1-based `position`.
    pub fn update_subject(&mut self, position: usize, field: SubjectField) -> Result<()> {
        let index = self.subject_index(position)?;
        self.subjects[index].apply(field)?;
        self.recalculate();
        Ok(())
    }

    pub fn remove_subject(&mut self, position: usize) -> Result<Subject> {
        let index = self.subject_index(position)?;
        let removed = self.subjects.remove(index);
        self.recalculate();
        Ok(removed)
    }

    pub fn recalculate(&mut self) {
        self.gpa = semester_gpa(&self.subjects);
        debug!("semester {} gpa recomputed: {:.4}", self.number, self.gpa);
    }

    fn subject_index(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.subjects.len() {
            return Err(GradeError::SubjectNotFound {
                semester: self.number,
                subject: position,
            });
        }
        Ok(position - 1)
    }
}
