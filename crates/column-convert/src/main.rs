//! CLI entry point for single-column type coercion.

use anyhow::{Result, anyhow};
use clap::Parser;
use column_convert::{ConvertOptions, DetectedType, TypeConverter};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Best-effort column type coercion",
    long_about = "Coerces one column of a CSV file toward a detected type tag.\n\n\
                  Unconvertible values become nulls instead of errors; a warning\n\
                  is logged for each value the fallback chain could not handle.\n\n\
                  EXAMPLES:\n  \
                  # Convert the 'fare' column to numbers\n  \
                  column-convert -i titanic.csv -c fare -t number -o out.csv\n\n  \
                  # Preview the conversion as JSON\n  \
                  column-convert -i titanic.csv -c embarked_at -t date --json"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: String,

    /// Name of the column to convert
    #[arg(short, long)]
    column: String,

    /// Detected type to coerce toward (number, bool, id, date, object, constant)
    #[arg(short = 't', long = "type")]
    detected_type: DetectedType,

    /// Output CSV path
    ///
    /// If not specified, only a conversion summary is printed
    #[arg(short, long)]
    output: Option<String>,

    /// Disable the European-locale fallback for number parsing
    #[arg(long)]
    no_locale_fallback: bool,

    /// Additional missing-value marker (repeatable)
    #[arg(long = "na-marker")]
    na_markers: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output a JSON summary to stdout instead of human-readable text
    ///
    /// Disables all logs; only the JSON summary is written to stdout
    #[arg(long)]
    json: bool,
}

/// Conversion summary emitted with `--json` and used for the text summary.
#[derive(Debug, Serialize)]
struct ConvertSummary {
    input_file: String,
    column: String,
    detected_type: String,
    rows: usize,
    nulls_before: usize,
    nulls_after: usize,
    dtype_after: String,
    output_file: Option<String>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let mut data = load_csv_with_fallbacks(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let values = data
        .column(&args.column)
        .map_err(|_| {
            anyhow!(
                "Column '{}' not found. Available columns: {:?}",
                args.column,
                data.get_column_names()
            )
        })?
        .as_materialized_series()
        .clone();
    let nulls_before = values.null_count();

    let mut options_builder = ConvertOptions::builder();
    if args.no_locale_fallback {
        options_builder = options_builder.locale_fallback(false);
    }
    for marker in &args.na_markers {
        options_builder = options_builder.extra_na_marker(marker);
    }
    let options = options_builder.build()?;

    let converter = TypeConverter::for_type(args.detected_type).with_options(options);
    let converted = converter.fit(&values).transform(&values)?;

    let summary = ConvertSummary {
        input_file: args.input.clone(),
        column: args.column.clone(),
        detected_type: args.detected_type.to_string(),
        rows: converted.len(),
        nulls_before,
        nulls_after: converted.null_count(),
        dtype_after: converted.dtype().to_string(),
        output_file: args.output.clone(),
    };

    if let Some(ref output) = args.output {
        data.replace(&args.column, converted)?;
        write_csv(&mut data, output)?;
        info!("Converted dataset written to: {}", output);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary);

    Ok(())
}

/// Print a human-readable conversion summary.
///
/// Uses `println!` intentionally: this is the primary CLI output and should
/// stay visible regardless of log level.
fn print_summary(summary: &ConvertSummary) {
    println!();
    println!("{}", "=".repeat(60));
    println!("CONVERSION COMPLETE");
    println!("{}", "=".repeat(60));
    println!("Column: {} -> {}", summary.column, summary.detected_type);
    println!("Rows: {}", summary.rows);
    println!(
        "Nulls: {} -> {} ({} values could not be converted)",
        summary.nulls_before,
        summary.nulls_after,
        summary.nulls_after.saturating_sub(summary.nulls_before)
    );
    println!("Output dtype: {}", summary.dtype_after);
    if let Some(ref output) = summary.output_file {
        println!("Output file: {}", output);
    } else {
        println!("No output file written (use --output to save)");
    }
    println!("{}", "=".repeat(60));
}

/// Load CSV with fallback strategies.
///
/// Schema inference is disabled so every column arrives as strings. The
/// converter owns all type decisions; letting the reader guess types first
/// would hide the raw values it needs to see.
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    CsvReadOptions::default()
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
        .map_err(|e| anyhow!("Could not read CSV file '{}': {}", path, e))
}

fn write_csv(data: &mut DataFrame, path: &str) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).finish(data)?;
    Ok(())
}
