/// Failure raised while resolving user-entered grades.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GradeError {
    /// The grade does not normalize to any key of the grade table.
    /// Holds the raw string as the user typed it.
    #[error("Invalid grade: {grade}")]
    InvalidGrade { grade: String },
}

/// Failure raised while building a [`GradeTable`](super::GradeTable).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("grade table is empty")]
    Empty,
    #[error("grade `{0}` appears more than once in the grade table")]
    DuplicateGrade(String),
    #[error("grade `{0}` must be trimmed, uppercase and non-empty")]
    NotNormalized(String),
    #[error("grade `{grade}` has invalid point value {points}")]
    InvalidPoints { grade: String, points: f64 },
}
