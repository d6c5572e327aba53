use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use district_pulse::algorithm::recover_schema_error;
use district_pulse::export::{ANOMALY_FILE, UNIFIED_FILE};
use district_pulse::{
    AnomalyEngine, PulseConfig, RunSummary, load_biometric_dir, load_enrolment_dir,
    merge_daily_counts, write_anomalies, write_unified,
};
use log::{error, info, warn};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

const USAGE: &str = "usage: district-pulse <enrolment_dir> <biometric_dir> <output_dir> [config.json]";

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!(USAGE);
    }
    let enrolment_dir = PathBuf::from(&args[0]);
    let biometric_dir = PathBuf::from(&args[1]);
    let output_dir = PathBuf::from(&args[2]);

    let config = match args.get(3) {
        Some(path) => PulseConfig::from_json_file(Path::new(path))
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => PulseConfig::default(),
    }
    .with_env_overrides();
    info!("{}", config.detection);

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build_global()
        .context("Failed to configure the worker pool")?;
    info!("Using {} worker threads", config.threads);

    let start = Instant::now();
    let engine = AnomalyEngine::new(config.detection.clone())?;

    let mut schema_errors = Vec::new();
    let enrolment = recover_schema_error(
        load_enrolment_dir(&enrolment_dir, &config.columns),
        "enrolment",
        &mut schema_errors,
    )
    .context("Failed to load enrolment records")?;
    let biometric = recover_schema_error(
        load_biometric_dir(&biometric_dir, &config.columns),
        "biometric",
        &mut schema_errors,
    )
    .context("Failed to load biometric records")?;

    let mut report = engine.run(&enrolment, &biometric);
    report.schema_errors = schema_errors;
    for schema_error in &report.schema_errors {
        error!("{schema_error}");
    }

    write_anomalies(&output_dir.join(ANOMALY_FILE), &report.anomalies)
        .context("Failed to export anomalies")?;

    if enrolment.is_empty() || biometric.is_empty() {
        warn!("Skipping unified daily export, one of the feeds is empty");
    } else {
        let unified = merge_daily_counts(&enrolment, &biometric);
        write_unified(&output_dir.join(UNIFIED_FILE), &unified)
            .context("Failed to export unified daily data")?;
    }

    let summary = RunSummary::calculate(&report, &enrolment, &biometric);
    info!("{summary}");
    info!("Processing complete in {:?}", start.elapsed());

    if report.has_schema_errors() {
        bail!("{} input feed(s) could not be used", report.schema_errors.len());
    }
    Ok(())
}
