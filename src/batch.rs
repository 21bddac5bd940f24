//! Bulk evaluation of students listed in a CSV file.
//!
//! Input columns: `student_id,grades,prior_average,prior_modules`, where
//! `grades` holds every module grade in one field separated by spaces,
//! `;` or `,` (quote the field when using commas). A row that cannot be
//! evaluated is written out with its error rather than stopping the run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use tracing::{info, warn};

use crate::grades::GradeTable;
use crate::output::write_records;
use crate::session::{CalculationRequest, GpaReport, PriorPolicy, PriorRecord, calculate};

/// A single row deserialized from the input CSV.
#[derive(Debug, Deserialize)]
pub struct StudentRow {
    pub student_id: String,
    #[serde(default)]
    pub grades: String,
    #[serde(default)]
    pub prior_average: String,
    #[serde(default)]
    pub prior_modules: String,
}

impl StudentRow {
    pub fn to_request(&self) -> CalculationRequest {
        CalculationRequest::new(split_grades(&self.grades))
            .with_prior(PriorRecord::parse(&self.prior_average, &self.prior_modules))
    }
}

/// A single row of the results CSV.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct BatchResult {
    pub student_id: String,
    pub module_count: usize,
    pub semester_average: Option<f64>,
    pub overall_average: Option<f64>,
    pub distinction: Option<String>,
    pub error: Option<String>,
}

impl BatchResult {
    pub fn from_report(student_id: &str, report: &GpaReport) -> Self {
        BatchResult {
            student_id: student_id.to_string(),
            module_count: report.module_count,
            semester_average: Some(report.semester_average),
            overall_average: report.overall_average,
            distinction: report.distinction.map(|d| d.label().to_string()),
            error: None,
        }
    }

    pub fn from_error(student_id: &str, module_count: usize, error: &str) -> Self {
        BatchResult {
            student_id: student_id.to_string(),
            module_count,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Counts reported after a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[BatchResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        BatchSummary {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}

/// Splits a grades field on whitespace, `;` and `,`.
pub fn split_grades(field: &str) -> Vec<String> {
    field
        .split(|c: char| c.is_whitespace() || c == ';' || c == ',')
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Evaluates every student row read from `reader`.
///
/// # Errors
///
/// Fails only when the CSV itself is malformed; per-student problems end
/// up in [`BatchResult::error`].
pub fn evaluate<R: Read>(
    reader: R,
    table: &GradeTable,
    policy: &PriorPolicy,
) -> Result<Vec<BatchResult>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut results = Vec::new();

    for row in rdr.deserialize() {
        let row: StudentRow = row?;
        let request = row.to_request();

        let result = match calculate(&request, table, policy) {
            Ok(report) => BatchResult::from_report(&row.student_id, &report),
            Err(e) => {
                warn!(student_id = %row.student_id, error = %e, "Student could not be evaluated");
                BatchResult::from_error(&row.student_id, request.grades.len(), &e.to_string())
            }
        };
        results.push(result);
    }

    Ok(results)
}

/// Evaluates the CSV at `input` and writes the results CSV to `output`.
#[tracing::instrument(skip(table, policy))]
pub fn run_batch(
    input: &str,
    output: &str,
    table: &GradeTable,
    policy: &PriorPolicy,
) -> Result<BatchSummary> {
    let file = File::open(input).with_context(|| format!("failed to open {input}"))?;
    let results = evaluate(file, table, policy)?;

    write_records(output, &results).with_context(|| format!("failed to write {output}"))?;

    let summary = BatchSummary::from_results(&results);
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Batch complete"
    );
    Ok(summary)
}
