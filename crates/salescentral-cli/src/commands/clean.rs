//! Clean command - clean a local export of one dataset.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use salescentral::input::{parse_card_pdf, parse_json_table};
use salescentral::load::write_csv;
use salescentral::{CleanerConfig, DataCleaner, Dataset, Parser, Table};

use crate::cli::OutputFormat;

pub fn run(
    dataset: Dataset,
    input: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    keep_duplicates: bool,
    combine_date_time: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("File not found: {}", input.display()).into());
    }

    println!(
        "{} {} from {}",
        "Cleaning".cyan().bold(),
        dataset.to_string().white().bold(),
        input.display().to_string().white()
    );

    let raw = read_export(&input)?;
    let cleaner = DataCleaner::with_config(CleanerConfig {
        deduplicate: !keep_duplicates,
        combine_date_time,
        ..CleanerConfig::default()
    });
    let (cleaned, report) = cleaner.clean_with_report(dataset, raw)?;

    let output_path = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}_clean.{}", stem, format))
    });

    let flat = cleaned.reset_key();
    match format {
        OutputFormat::Csv => write_csv(&flat, &output_path)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&flat.to_records())?;
            fs::write(&output_path, json)?;
        }
    }

    println!(
        "Kept {} of {} rows ({} removed, {:.0}% retained)",
        report.rows_out.to_string().white().bold(),
        report.rows_in,
        report.rows_removed().to_string().yellow(),
        report.retention() * 100.0
    );
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// Read a CSV, JSON or card PDF export, chosen by extension.
fn read_export(path: &Path) -> Result<Table, Box<dyn std::error::Error>> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(parse_json_table(&fs::read(path)?)?),
        "pdf" => Ok(parse_card_pdf(&fs::read(path)?)?),
        _ => {
            let (table, _source) = Parser::new().parse_file(path)?;
            Ok(table)
        }
    }
}
