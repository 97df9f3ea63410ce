//! Hausprep: Feature Preparation CLI Tool
//!
//! A command-line tool that turns a raw housing dataset into headerless
//! training and validation CSV files for regression training.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use hausprep::cli::{confirm_overwrite, existing_outputs, Cli, Commands};
use hausprep::pipeline::{load_dataset, prepare_features, write_prepared, PipelineConfig, PipelineOutcome};
use hausprep::report::{export_manifest, PreparationSummary};
use hausprep::utils::{
    create_spinner, finish_with_failure, finish_with_success, init_logging, print_banner,
    print_completion, print_config, print_count, print_info, print_step_header, print_step_time,
    print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::InitConfig { output } => init_config(output.as_deref()),
        };
    }

    let config = cli.resolve_config()?;

    // Print styled banner and configuration card
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let existing = existing_outputs(&[
        config.train_output_path.as_path(),
        config.validation_output_path.as_path(),
    ]);
    if !existing.is_empty() && !cli.no_confirm && !confirm_overwrite(&existing)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading input...");
    let (raw, rows, cols, memory_mb) = match load_dataset(
        &config.input_path,
        config.infer_schema_length,
        &config.null_values,
    ) {
        Ok(loaded) => loaded,
        Err(e) => {
            finish_with_failure(&spinner, "Failed to load dataset");
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    let load_elapsed = step_start.elapsed();
    print_step_time(load_elapsed);

    // Step 2: Select, transform, impute, encode
    print_step_header(2, "Prepare Features");
    let step_start = Instant::now();
    let spinner = create_spinner("Selecting, transforming and encoding columns...");
    let prepared = match prepare_features(&raw, &config) {
        Ok(prepared) => prepared,
        Err(e) => {
            finish_with_failure(&spinner, "Feature preparation failed");
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Features prepared");

    let imputed_total: usize = prepared.imputed.iter().map(|(_, n)| n).sum();
    if imputed_total == 0 {
        print_info("No missing values needed imputation");
    } else {
        for (column, count) in prepared.imputed.iter().filter(|(_, n)| *n > 0) {
            print_count("missing value(s) imputed in", *count, Some(column.as_str()));
        }
    }
    print_count(
        "one-hot column(s)",
        prepared.encoder.n_features_out(),
        Some(format!("(from {} categorical columns)", config.categorical_columns.len()).as_str()),
    );
    print_success(&format!(
        "Feature table: {} rows × {} columns",
        prepared.features.height(),
        prepared.features.width()
    ));
    let prepare_elapsed = step_start.elapsed();
    print_step_time(prepare_elapsed);

    // Step 3: Split and save
    print_step_header(3, "Split & Save");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing partitions...");
    if let Err(e) = write_prepared(&prepared, &config) {
        finish_with_failure(&spinner, "Failed to write partitions");
        return Err(e);
    }
    finish_with_success(
        &spinner,
        &format!(
            "Saved {} and {}",
            config.train_output_path.display(),
            config.validation_output_path.display()
        ),
    );

    let outcome = PipelineOutcome::from_prepared(&prepared, rows, cols);
    if let Some(path) = &config.manifest_path {
        export_manifest(&outcome, &config, path)?;
        print_success(&format!("Manifest written to {}", path.display()));
    }
    let save_elapsed = step_start.elapsed();
    print_step_time(save_elapsed);

    // Display summary
    let mut summary = PreparationSummary::from_outcome(&outcome);
    summary.set_load_time(load_elapsed);
    summary.set_prepare_time(prepare_elapsed);
    summary.set_save_time(save_elapsed);
    summary.display();

    print_completion();

    Ok(())
}

/// Write the default configuration as pretty JSON
fn init_config(output: Option<&std::path::Path>) -> Result<()> {
    let json = PipelineConfig::default().to_json_pretty()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write config file: {}", path.display()))?;
            print_success(&format!("Default configuration written to {}", path.display()));
        }
        None => println!("{}", json),
    }
    Ok(())
}
