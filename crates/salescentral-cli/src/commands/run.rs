//! Run command - extract, clean and load datasets.

use std::path::{Path, PathBuf};

use colored::Colorize;
use salescentral::{EtlConfig, EtlJob};

use crate::cli::DatasetChoice;

/// Config file picked up from the working directory.
const DEFAULT_CONFIG: &str = "salescentral.toml";

pub fn run(
    choice: DatasetChoice,
    config_path: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => EtlConfig::load(&path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => EtlConfig::load(DEFAULT_CONFIG)?,
        None => EtlConfig::default().with_env_overrides(),
    };

    let mut job = EtlJob::from_config(config)?;
    let results = job.run_datasets(&choice.datasets());
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();

    if json_output {
        let outcomes: Vec<_> = results
            .iter()
            .map(|(dataset, result)| match result {
                Ok(outcome) => serde_json::json!({
                    "dataset": dataset,
                    "outcome": outcome,
                }),
                Err(e) => serde_json::json!({
                    "dataset": dataset,
                    "error": e.to_string(),
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for (dataset, result) in &results {
            match result {
                Ok(outcome) if outcome.loaded => println!(
                    "{} {:12} {:>7} rows -> {}",
                    "✓".green().bold(),
                    dataset.to_string(),
                    outcome.report.rows_out,
                    outcome.destination.cyan()
                ),
                Ok(outcome) => println!(
                    "{} {:12} {:>7} rows -> {} {}",
                    "!".yellow().bold(),
                    dataset.to_string(),
                    outcome.report.rows_out,
                    outcome.destination.cyan(),
                    "(load failed, see log)".yellow()
                ),
                Err(e) => println!(
                    "{} {:12} {}",
                    "✗".red().bold(),
                    dataset.to_string(),
                    e.to_string().red()
                ),
            }
        }

        let dir = &job.config().warehouse.output_dir;
        println!();
        println!(
            "{} {}",
            "Warehouse output in".green().bold(),
            dir.display().to_string().white()
        );
    }

    if failed > 0 {
        return Err(format!("{} of {} datasets failed", failed, results.len()).into());
    }
    Ok(())
}
