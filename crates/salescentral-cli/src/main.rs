//! SalesCentral CLI - retail sales ETL.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_format);

    let result = match cli.command {
        Commands::Clean {
            dataset,
            input,
            output,
            format,
            keep_duplicates,
            combine_date_time,
        } => commands::clean::run(
            dataset,
            input,
            output,
            format,
            keep_duplicates,
            combine_date_time,
        ),

        Commands::Run {
            dataset,
            config,
            json,
        } => commands::run::run(dataset, config, json),

        Commands::Datasets { json } => commands::datasets::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
