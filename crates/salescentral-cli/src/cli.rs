//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use salescentral::Dataset;
use std::path::PathBuf;

use crate::logging::LogFormat;

/// SalesCentral: extract, clean and load retail sales data
#[derive(Parser)]
#[command(name = "salescentral")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a local CSV, JSON or card PDF export of one dataset
    Clean {
        /// Dataset the export holds (users, cards, stores, products, orders, date_times)
        #[arg(value_name = "DATASET")]
        dataset: Dataset,

        /// Path to the raw export
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output path (default: <input>_clean.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Keep duplicate rows
        #[arg(long)]
        keep_duplicates: bool,

        /// Fold date-time parts into a single date_time column
        #[arg(long)]
        combine_date_time: bool,
    },

    /// Run the extract/clean/load job
    Run {
        /// Dataset to run, or "all"
        #[arg(value_name = "DATASET", default_value = "all")]
        dataset: DatasetChoice,

        /// Path to the TOML config (default: salescentral.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print outcomes as JSON
        #[arg(long)]
        json: bool,
    },

    /// List datasets with their sources and warehouse tables
    Datasets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One dataset or all of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetChoice {
    All,
    One(Dataset),
}

impl DatasetChoice {
    pub fn datasets(&self) -> Vec<Dataset> {
        match self {
            DatasetChoice::All => Dataset::all().to_vec(),
            DatasetChoice::One(dataset) => vec![*dataset],
        }
    }
}

impl std::str::FromStr for DatasetChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(DatasetChoice::All);
        }
        s.parse::<Dataset>()
            .map(DatasetChoice::One)
            .map_err(|e| e.to_string())
    }
}
