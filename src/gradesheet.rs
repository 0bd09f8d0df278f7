use log::warn;
use serde::{Deserialize, Serialize};

use crate::aggregator::cumulative_gpa;
use crate::error::{GradeError, Result};
use crate::semester::{MAX_SUBJECTS, Semester};
use crate::subject::{Subject, SubjectField};

pub const MAX_SEMESTERS: usize = 10;

/// In-memory session state: the ordered semesters being edited.
///
/// Semesters and subjects are addressed by their 1-based position in the
/// current list. A semester's `number` is fixed when it is created and is not
/// renumbered when earlier semesters are removed.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct GradeSheet {
    semesters: Vec<Semester>,
}

impl GradeSheet {
    pub fn gradesheet_create() -> Self {
        GradeSheet::default()
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn semester(&self, position: usize) -> Result<&Semester> {
        position
            .checked_sub(1)
            .and_then(|index| self.semesters.get(index))
            .ok_or(GradeError::SemesterNotFound(position))
    }

    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    pub fn add_semester(&mut self) -> Result<&Semester> {
        if self.semesters.len() >= MAX_SEMESTERS {
            warn!("semester limit of {} reached", MAX_SEMESTERS);
            return Err(GradeError::SemesterLimit {
                limit: MAX_SEMESTERS,
            });
        }
        let number = self.semesters.len() + 1;
        self.semesters.push(Semester::create(number));
        Ok(&self.semesters[self.semesters.len() - 1])
    }

    pub fn remove_semester(&mut self, position: usize) -> Result<Semester> {
        let index = self.semester_index(position)?;
        Ok(self.semesters.remove(index))
    }

    pub fn add_subject(&mut self, position: usize) -> Result<&Subject> {
        let semester = self.semester_mut(position)?;
        if semester.subjects.len() >= MAX_SUBJECTS {
            warn!(
                "subject limit of {} reached in semester {}",
                MAX_SUBJECTS, semester.number
            );
        }
        semester.add_subject()
    }

    pub fn update_subject(
        &mut self,
        position: usize,
        subject_position: usize,
        field: SubjectField,
    ) -> Result<()> {
        self.semester_mut(position)?
            .update_subject(subject_position, field)
    }

    pub fn remove_subject(&mut self, position: usize, subject_position: usize) -> Result<Subject> {
        self.semester_mut(position)?.remove_subject(subject_position)
    }

    /// Overall CGPA across every subject of every semester.
    pub fn cgpa(&self) -> f64 {
        cumulative_gpa(&self.semesters)
    }

    pub fn gradesheet_display(&self) {
        println!("{}", self.gradesheet_render());
    }

    /// Text listing of every semester and subject, closed by the CGPA line.
    pub fn gradesheet_render(&self) -> String {
        if self.semesters.is_empty() {
            return "(no semesters)".to_string();
        }
        let mut lines = Vec::new();
        for (position, semester) in self.semesters.iter().enumerate() {
            lines.push(format!(
                "[{}] Semester {}\t\tGPA: {:.2}\t\t({}/{} subjects)",
                position + 1,
                semester.number,
                semester.gpa,
                semester.subjects.len(),
                MAX_SUBJECTS
            ));
            for (n, subject) in semester.subjects.iter().enumerate() {
                let grade = subject.grade.map_or("-", |g| g.as_str());
                let name = if subject.name.is_empty() {
                    "(unnamed)"
                } else {
                    subject.name.as_str()
                };
                lines.push(format!("\t{}\t{:<24}{:<8}{}", n + 1, name, grade, subject.credits));
            }
        }
        lines.push(format!("CGPA: {:.2}", self.cgpa()));
        lines.join("\n")
    }

    fn semester_index(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.semesters.len() {
            return Err(GradeError::SemesterNotFound(position));
        }
        Ok(position - 1)
    }

    fn semester_mut(&mut self, position: usize) -> Result<&mut Semester> {
        let index = self.semester_index(position)?;
        Ok(&mut self.semesters[index])
    }
}
