use thiserror::Error;

/// Everything that can go wrong while editing a grade sheet or exporting a report.
///
/// The capacity variants are soft: the operation is a no-op and the user is told
/// why. Export variants (`Render`, `Image`, `Pdf`, `Io`) are collapsed into one
/// generic notice by the interactive session.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("You can only add up to {limit} semesters.")]
    SemesterLimit { limit: usize },

    #[error("You can only add up to {limit} subjects per semester.")]
    SubjectLimit { limit: usize },

    #[error("no semester at position {0}")]
    SemesterNotFound(usize),

    #[error("no subject at position {subject} in semester {semester}")]
    SubjectNotFound { semester: usize, subject: usize },

    #[error("invalid grade '{0}'")]
    InvalidGrade(String),

    #[error("invalid credits '{0}': expected 0.5 to 5 in steps of 0.5")]
    InvalidCredits(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[cfg(feature = "export")]
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("document assembly failed: {0}")]
    Pdf(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid report format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("invalid report format: {0}")]
    InvalidFormat(String),
}

impl GradeError {
    /// True for the soft "maximum limit reached" rejections.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            GradeError::SemesterLimit { .. } | GradeError::SubjectLimit { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;
