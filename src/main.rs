//! CLI entry point for the GPA calculator.
//!
//! Provides subcommands for calculating one student's semester and
//! cumulative GPA, evaluating a CSV of students, classifying a GPA, and
//! listing the grade table in use.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gpa_calc::{
    batch::run_batch,
    config::AppConfig,
    fetch::load_table,
    grades::classify_distinction,
    output::{print_json, print_pretty, print_table},
    session::{CalculationRequest, PriorRecord, calculate},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gpa_calc")]
#[command(about = "Semester and cumulative GPA calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the GPA for this semester's module grades
    Calculate {
        /// One letter grade per module (case-insensitive), e.g. A+ b c-
        #[arg(value_name = "GRADE", num_args = 1.., required = true)]
        grades: Vec<String>,

        /// Past cumulative GPA
        #[arg(long, allow_hyphen_values = true)]
        prior_gpa: Option<String>,

        /// Number of modules taken before this semester
        #[arg(long, allow_hyphen_values = true)]
        prior_modules: Option<String>,

        /// Grade table file or URL (defaults to GPA_TABLE_SOURCE, then the SMU scale)
        #[arg(short, long)]
        table: Option<String>,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Evaluate every student in a CSV file
    Batch {
        /// CSV with columns student_id,grades,prior_average,prior_modules
        #[arg(short, long)]
        input: String,

        /// CSV file to write results to
        #[arg(short, long, default_value = "results.csv")]
        output: String,

        /// Grade table file or URL
        #[arg(short, long)]
        table: Option<String>,
    },
    /// Show the honorary distinction for a GPA
    Classify {
        #[arg(value_name = "GPA", allow_hyphen_values = true)]
        average: f64,
    },
    /// List the grade table
    Table {
        /// Grade table file or URL
        #[arg(short, long)]
        table: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let _file_guard = init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate {
            grades,
            prior_gpa,
            prior_modules,
            table,
            json,
        } => {
            let table = load_table(table.as_deref().or(config.table_source.as_deref())).await?;
            let prior = PriorRecord::parse(
                prior_gpa.as_deref().unwrap_or_default(),
                prior_modules.as_deref().unwrap_or_default(),
            );
            let request = CalculationRequest::new(grades).with_prior(prior);

            let report = calculate(&request, &table, &config.policy)?;
            if json {
                print_json(&report)?;
            } else {
                print_pretty(&report);
            }
        }
        Commands::Batch {
            input,
            output,
            table,
        } => {
            let table = load_table(table.as_deref().or(config.table_source.as_deref())).await?;
            let summary = run_batch(&input, &output, &table, &config.policy)?;
            info!(
                output = %output,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Results written"
            );
        }
        Commands::Classify { average } => match classify_distinction(average) {
            Some(distinction) => info!(average, "{}", distinction),
            None => info!(average, "none"),
        },
        Commands::Table { table } => {
            let table = load_table(table.as_deref().or(config.table_source.as_deref())).await?;
            print_table(&table);
        }
    }

    Ok(())
}

/// Colored stderr output plus a JSON daily-rolling log file.
fn init_tracing() -> WorkerGuard {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gpa_calc.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gpa_calc.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
