//! Grade-point computation core.
//!
//! Converts letter grades to grade points through a [`GradeTable`],
//! combines them into semester and cumulative averages, and maps an
//! average onto an honorary [`Distinction`]. Everything here is pure.

pub mod average;
pub mod distinction;
pub mod error;
pub mod table;

pub use average::{calculate_overall_average, calculate_semester_average};
pub use distinction::{Distinction, classify_distinction};
pub use error::{GradeError, TableError};
pub use table::GradeTable;
