mod cli;
mod logging;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use colored::*;
use dotenv::dotenv;
use fastq_manifest::{
    config, ManifestBuilder, ManifestSettings, ManifestSummary, PairingStrategy, SuffixPattern,
    TracingReporter,
};
use tracing::{debug, error};

fn main() -> ExitCode {
    dotenv().ok();

    let args = Cli::parse();

    if let Err(err) = fs::create_dir_all(&args.output) {
        eprintln!(
            "Error creating output directory {}: {}",
            args.output.display(),
            err
        );
        return ExitCode::FAILURE;
    }

    let _guard = match logging::init_logger(&args.output) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error initializing logging: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(summary) => {
            println!(
                "{} read pairs written to {} ({} skipped, {} directories, started {}, {})",
                format!("{}", summary.rows_written).green(),
                summary.output_path.display(),
                format!("{}", summary.pairs_skipped).red(),
                summary.directories_scanned,
                summary.started_at.format("%Y-%m-%d %H:%M:%S"),
                format!("{:.2}s", summary.duration.as_secs_f64()).green(),
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> anyhow::Result<ManifestSummary> {
    let app_config = config::load_configuration().context("Error loading configuration")?;
    debug!("config: {:?}", app_config);

    let validation = args.fastq_validation.unwrap_or(app_config.fastq_validation);
    let max_depth = config::depth_limit(args.max_depth.unwrap_or(app_config.max_depth));
    let pairing = match &args.file_suffix {
        Some(suffix) => PairingStrategy::Suffix(SuffixPattern::parse(suffix)?),
        None => app_config.pairing()?,
    };

    let settings = ManifestSettings::new(&args.input, &args.output)
        .with_validation(validation)
        .with_max_depth(max_depth)
        .with_pairing(pairing);

    let builder = ManifestBuilder::new(settings);
    debug!("settings: {:?}", builder.settings());
    let summary = builder.build(&TracingReporter)?;
    Ok(summary)
}
