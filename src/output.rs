//! Output formatting and persistence for calculation results.
//!
//! Supports human-readable lines, JSON serialization, and CSV export.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use tracing::{debug, info};

use crate::grades::GradeTable;
use crate::session::GpaReport;

/// Logs a report the way it is presented to a student.
pub fn print_pretty(report: &GpaReport) {
    info!("This semester's GPA: {}", report.semester_display());
    if let Some(overall) = report.overall_display() {
        info!("Overall cumulative GPA: {}", overall);
    }
    match (&report.message, report.distinction) {
        (Some(message), _) => info!("{}", message),
        (None, Some(distinction)) => info!("Distinction: {}", distinction),
        (None, None) => info!("Distinction: none"),
    }
}

/// Logs a grade table from the highest grade point down.
pub fn print_table(table: &GradeTable) {
    for (grade, points) in table.iter() {
        info!("{:<3} {:.1}", grade, points);
    }
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes records to a CSV file with a header row, replacing any existing
/// file.
pub fn write_records<T: Serialize>(path: &str, records: &[T]) -> Result<()> {
    debug!(path, rows = records.len(), "Writing CSV records");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
