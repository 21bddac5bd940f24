use gpa_calc::batch::{BatchSummary, evaluate, run_batch};
use gpa_calc::grades::{
    Distinction, GradeError, GradeTable, calculate_overall_average, calculate_semester_average,
    classify_distinction,
};
use gpa_calc::parser::parse_table;
use gpa_calc::session::{CalculationRequest, PriorPolicy, PriorRecord, calculate};
use std::env;
use std::fs;

fn fixture_table() -> GradeTable {
    let bytes = include_bytes!("fixtures/smu_gpa.json");
    parse_table(bytes).expect("Failed to parse grade table")
}

#[test]
fn test_fixture_matches_builtin_table() {
    assert_eq!(fixture_table(), GradeTable::smu());
}

#[test]
fn test_full_pipeline() {
    let table = fixture_table();
    let grades = ["A+", "a", "B-"];

    let semester = calculate_semester_average(&grades, &table).unwrap();
    assert_eq!(format!("{semester:.2}"), "3.67");

    let overall = calculate_overall_average(semester, grades.len(), 4.0, 3.0);
    assert!(overall > semester);
    assert_eq!(classify_distinction(overall), Some(Distinction::SummaCumLaude));
}

#[test]
fn test_every_grade_case_and_padding() {
    let table = fixture_table();
    for (grade, points) in table.iter() {
        let variants = [
            grade.to_string(),
            grade.to_lowercase(),
            format!("  {grade}\t"),
        ];
        for variant in variants {
            assert_eq!(calculate_semester_average(&[variant], &table), Ok(points));
        }
    }
}

#[test]
fn test_invalid_grade_is_atomic() {
    let table = fixture_table();
    assert_eq!(
        calculate_semester_average(&["A", "B", "E"], &table),
        Err(GradeError::InvalidGrade { grade: "E".into() })
    );
}

#[test]
fn test_session_report() {
    let request = CalculationRequest::new(["A", "A-", "B+", "A"])
        .with_prior(PriorRecord::parse("3.8", "16"));
    let report = calculate(&request, &fixture_table(), &PriorPolicy::default()).unwrap();

    // (4.0 + 3.7 + 3.3 + 4.0) / 4 = 3.75; (3.8 * 16 + 3.75 * 4) / 20 = 3.79
    assert_eq!(report.semester_display(), "3.75");
    assert_eq!(report.overall_display().as_deref(), Some("3.79"));
    assert_eq!(report.distinction, Some(Distinction::MagnaCumLaude));
}

#[test]
fn test_batch_fixture() {
    let file = fs::File::open("tests/fixtures/students.csv").unwrap();
    let results = evaluate(file, &fixture_table(), &PriorPolicy::default()).unwrap();
    assert_eq!(
        BatchSummary::from_results(&results),
        BatchSummary {
            total: 5,
            succeeded: 3,
            failed: 2
        }
    );
}

#[test]
fn test_run_batch_writes_results() {
    let output = format!("{}/gpa_calc_test_batch_results.csv", env::temp_dir().display());
    let _ = fs::remove_file(&output);

    let summary = run_batch(
        "tests/fixtures/students.csv",
        &output,
        &fixture_table(),
        &PriorPolicy::default(),
    )
    .unwrap();
    assert_eq!(summary.total, 5);

    let content = fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("student_id,module_count,semester_average,overall_average,distinction,error")
    );
    assert_eq!(lines.count(), 5);

    fs::remove_file(&output).unwrap();
}
