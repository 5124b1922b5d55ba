//! Preparar CLI
//!
//! Single-command entry point for the preparar library.
//!
//! # Usage
//!
//! ```bash
//! # Print a feature-extraction job flow to stdout
//! preparar -t svm -p feature --input-file training.tsv --id-field 0 \
//!     --text-field 1 --label-field 2 --data-store features.tsv
//!
//! # Write a learning job flow to a file
//! preparar -t quiet -p learn --input-file training.tsv --id-field 0 \
//!     --text-field 1 --label-field 2 --feature-file features.tsv \
//!     --data-store model.ser -o learn_flow.yaml
//!
//! # Validate parameters without writing anything
//! preparar -t svm -p feature --input-file training.tsv --id-field 0 \
//!     --text-field 1 --label-field 2 --data-store features.tsv --dry-run
//! ```

use clap::Parser;
use preparar::cli::Cli;
use preparar::{compile, save, validate};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet_output {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match run(&cli, log_level) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

// Notes go to stderr; stdout is reserved for the document itself.
fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        eprintln!("{msg}");
    }
}

fn run(cli: &Cli, level: LogLevel) -> Result<(), String> {
    let params = cli.to_params();
    validate(&params).map_err(|e| e.to_string())?;
    let spec = compile(&params);

    if cli.dry_run {
        log(
            level,
            LogLevel::Normal,
            "Dry run - parameters validated successfully",
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Reader: {}", spec.collection_reader.class_name),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Analyzer: {}", spec.collection_analyzer.class_name),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Data stores: {}", spec.data_stores.len()),
        );
        return Ok(());
    }

    match cli.output.as_deref() {
        // The document itself goes to stdout; no log lines around it
        None | Some("-") => save(&spec, Some("-")).map_err(|e| format!("Write error: {e}"))?,
        Some(path) => {
            log(
                level,
                LogLevel::Normal,
                &format!("Compiling {} {} job flow", cli.task, cli.phase),
            );
            save(&spec, Some(path)).map_err(|e| format!("Write error: {e}"))?;
            log(level, LogLevel::Normal, &format!("Wrote job flow to {path}"));
        }
    }

    Ok(())
}
