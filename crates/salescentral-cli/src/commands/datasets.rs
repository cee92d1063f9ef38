//! Datasets command - list datasets and where they are loaded.

use colored::Colorize;
use salescentral::Dataset;

pub fn run(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        let datasets: Vec<_> = Dataset::all()
            .iter()
            .map(|dataset| {
                serde_json::json!({
                    "dataset": dataset,
                    "source": dataset.default_source(),
                    "schema": dataset.target_schema(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&datasets)?);
        return Ok(());
    }

    println!(
        "{:12} {:20} {:14} {}",
        "DATASET".bold(),
        "TABLE".bold(),
        "PRIMARY KEY".bold(),
        "SOURCE".bold()
    );
    for dataset in Dataset::all() {
        let schema = dataset.target_schema();
        println!(
            "{:12} {:20} {:14} {}",
            dataset.to_string().white(),
            schema.table.cyan(),
            schema.primary_key.as_deref().unwrap_or("-"),
            dataset.default_source().dimmed()
        );
    }

    Ok(())
}
