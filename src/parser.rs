//! JSON parser for grade tables.

use anyhow::{Context, Result};

use crate::grades::GradeTable;

/// Decodes a [`GradeTable`] from a JSON object such as
/// `{"A+": 4.3, "A": 4.0, "F": 0.0}`.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON object of grade points, or
/// if the table fails validation (duplicate, lowercase or padded keys,
/// negative points, no entries).
pub fn parse_table(bytes: &[u8]) -> Result<GradeTable> {
    serde_json::from_slice(bytes).context("invalid grade table")
}
