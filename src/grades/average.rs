use super::error::GradeError;
use super::table::GradeTable;

/// Arithmetic mean of the grade points for one semester.
///
/// Each grade is trimmed and uppercased before lookup, so `" a+ "` and
/// `"A+"` resolve to the same entry. The first grade that does not resolve
/// aborts the whole calculation; no partial average is produced.
///
/// Callers must pass at least one grade. An empty slice divides by zero
/// and yields `NaN`.
///
/// # Errors
///
/// Returns [`GradeError::InvalidGrade`] carrying the raw, un-normalized
/// string of the first unknown grade.
pub fn calculate_semester_average<S: AsRef<str>>(
    grades: &[S],
    table: &GradeTable,
) -> Result<f64, GradeError> {
    debug_assert!(!grades.is_empty(), "semester needs at least one module");

    let mut sum = 0.0;
    for grade in grades {
        let raw = grade.as_ref();
        match table.points(&GradeTable::normalize(raw)) {
            Some(points) => sum += points,
            None => {
                return Err(GradeError::InvalidGrade {
                    grade: raw.to_string(),
                });
            }
        }
    }

    Ok(sum / grades.len() as f64)
}

/// Module-count-weighted mean of this semester's average and a prior
/// cumulative average.
///
/// No range checks happen here; out-of-range prior values produce whatever
/// the arithmetic gives. `current_count` is positive whenever a semester
/// average exists, so the divisor is never zero for valid callers.
pub fn calculate_overall_average(
    current_average: f64,
    current_count: usize,
    prior_average: f64,
    prior_count: f64,
) -> f64 {
    let current_count = current_count as f64;
    (prior_average * prior_count + current_average * current_count) / (current_count + prior_count)
}
