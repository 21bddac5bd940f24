//! One calculation pass: validate what the user entered, run the grade
//! core, and shape the result for display.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::grades::{
    Distinction, GradeError, GradeTable, calculate_overall_average, calculate_semester_average,
    classify_distinction,
};

/// Prior cumulative average and the number of modules behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriorRecord {
    pub average: f64,
    pub modules: f64,
}

impl PriorRecord {
    /// Reads a prior record from two free-text fields.
    ///
    /// Both fields must be non-blank numbers; otherwise there is no prior
    /// record at all and the calculation covers the current semester only.
    pub fn parse(average: &str, modules: &str) -> Option<Self> {
        let average = average.trim().parse::<f64>().ok()?;
        let modules = modules.trim().parse::<f64>().ok()?;
        if !average.is_finite() || !modules.is_finite() {
            return None;
        }
        Some(Self { average, modules })
    }
}

/// Accepted inclusive ranges `[0, max]` for a [`PriorRecord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorPolicy {
    pub max_average: f64,
    pub max_modules: f64,
}

impl Default for PriorPolicy {
    fn default() -> Self {
        Self {
            max_average: 4.3,
            max_modules: 100.0,
        }
    }
}

impl PriorPolicy {
    pub fn check(&self, prior: &PriorRecord) -> Result<(), CalculationError> {
        if !(0.0..=self.max_average).contains(&prior.average) {
            return Err(CalculationError::InvalidPriorAverage {
                value: prior.average,
                max: self.max_average,
            });
        }
        if !(0.0..=self.max_modules).contains(&prior.modules) {
            return Err(CalculationError::InvalidPriorModules {
                value: prior.modules,
                max: self.max_modules,
            });
        }
        Ok(())
    }
}

/// Everything the user supplies for one calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationRequest {
    pub grades: Vec<String>,
    pub prior: Option<PriorRecord>,
}

impl CalculationRequest {
    pub fn new<I, S>(grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            grades: grades.into_iter().map(Into::into).collect(),
            prior: None,
        }
    }

    pub fn with_prior(mut self, prior: Option<PriorRecord>) -> Self {
        self.prior = prior;
        self
    }
}

/// Reasons a calculation is refused. The messages are meant for end users.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Please select the number of modules you have taken.")]
    NoModules,
    #[error("Please select grades for all {count} remaining modules.")]
    MissingGrades { count: usize },
    #[error("Please enter a valid value for your past GPA (0 to {max})!")]
    InvalidPriorAverage { value: f64, max: f64 },
    #[error("Please enter a valid value for your past number of modules!")]
    InvalidPriorModules { value: f64, max: f64 },
    #[error(transparent)]
    Grade(#[from] GradeError),
}

/// Outcome of a successful calculation.
#[derive(Debug, Clone, Serialize)]
pub struct GpaReport {
    pub generated_at: DateTime<Utc>,
    pub module_count: usize,
    pub semester_average: f64,
    pub overall_average: Option<f64>,
    pub distinction: Option<Distinction>,
    pub message: Option<String>,
}

impl GpaReport {
    pub fn semester_display(&self) -> String {
        to_fixed_2(self.semester_average)
    }

    pub fn overall_display(&self) -> Option<String> {
        self.overall_average.map(to_fixed_2)
    }
}

/// Runs a full calculation.
///
/// Input problems are reported before any arithmetic, so a failed request
/// never yields a partial report. The distinction is taken from the
/// overall average when a prior record is present, otherwise from the
/// semester average as displayed (two decimals).
#[tracing::instrument(skip_all, fields(modules = request.grades.len(), prior = request.prior.is_some()))]
pub fn calculate(
    request: &CalculationRequest,
    table: &GradeTable,
    policy: &PriorPolicy,
) -> Result<GpaReport, CalculationError> {
    if request.grades.is_empty() {
        return Err(CalculationError::NoModules);
    }

    let missing = request
        .grades
        .iter()
        .filter(|g| g.trim().is_empty())
        .count();
    if missing > 0 {
        return Err(CalculationError::MissingGrades { count: missing });
    }

    if let Some(prior) = &request.prior {
        policy.check(prior)?;
    }

    let module_count = request.grades.len();
    let semester_average = calculate_semester_average(&request.grades, table)?;

    let overall_average = request.prior.map(|prior| {
        calculate_overall_average(semester_average, module_count, prior.average, prior.modules)
    });

    let final_average = match overall_average {
        Some(overall) => overall,
        None => round_for_display(semester_average),
    };
    let distinction = classify_distinction(final_average);
    let message = distinction.and_then(|d| celebration(d, final_average));

    debug!(
        semester_average,
        ?overall_average,
        ?distinction,
        "Calculation complete"
    );

    Ok(GpaReport {
        generated_at: Utc::now(),
        module_count,
        semester_average,
        overall_average,
        distinction,
        message,
    })
}

/// Message shown alongside a distinction. Merit and High Merit get none.
pub fn celebration(distinction: Distinction, average: f64) -> Option<String> {
    let cheer = match distinction {
        Distinction::SummaCumLaude => "You sir/ma'am, are a genius!",
        Distinction::MagnaCumLaude if average >= 3.7 => {
            "Owwwww dean lister, time to show off to friends!"
        }
        Distinction::MagnaCumLaude => "Keep up and you will become a dean lister!",
        Distinction::CumLaude => "Higher employment rate and starting salary await you!",
        Distinction::HighMerit | Distinction::Merit => return None,
    };
    Some(format!("You will get {distinction}! {cheer}"))
}

/// Formats with two decimals, resolving exact ties away from zero
/// (3.625 becomes "3.63", not the round-half-even "3.62").
pub fn to_fixed_2(value: f64) -> String {
    if value.is_finite() && is_hundredths_tie(value) {
        // Next representable magnitude sits just past the tie.
        let nudged = f64::from_bits(value.to_bits() + 1);
        return format!("{nudged:.2}");
    }
    format!("{value:.2}")
}

/// True when the exact binary value ends in a 5 at the third decimal
/// place with nothing after it.
fn is_hundredths_tie(value: f64) -> bool {
    let exact = format!("{:.1074}", value.abs());
    let Some((_, fraction)) = exact.split_once('.') else {
        return false;
    };
    fraction.as_bytes().get(2) == Some(&b'5') && fraction[3..].bytes().all(|b| b == b'0')
}

fn round_for_display(value: f64) -> f64 {
    to_fixed_2(value).parse().unwrap_or(value)
}
