use crate::manifest::{ManifestRow, ManifestSettings};
use crate::sniffer::Verdict;
use std::path::Path;
use tracing::{debug, info, warn};

/// Receives run events from the walker and the manifest builder.
///
/// The CLI logs them through tracing; tests record them. All methods have
/// default no-op implementations.
pub trait ManifestReporter: Send + Sync {
    fn on_run_start(&self, _settings: &ManifestSettings) {}
    fn on_directory(&self, _dir: &Path, _depth: usize, _candidates: usize) {}
    fn on_walk_error(&self, _path: Option<&Path>, _message: &str) {}
    fn on_missing_read(&self, _sample_id: &str, _path: &Path) {}
    fn on_invalid_read(&self, _sample_id: &str, _path: &Path, _verdict: &Verdict) {}
    fn on_row_written(&self, _row: &ManifestRow) {}
    fn on_run_complete(&self, _output: &Path, _rows_written: usize) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl ManifestReporter for SilentReporter {}

/// Writes every event to the active tracing subscriber.
pub struct TracingReporter;

impl ManifestReporter for TracingReporter {
    fn on_run_start(&self, settings: &ManifestSettings) {
        info!("Input directory: {}", settings.input.display());
        info!("Output directory: {}", settings.output_dir.display());
        info!("FASTQ validation: {}", settings.validation);
        info!("Max depth: {}", settings.max_depth);
        info!("Pairing: {}", settings.pairing);
    }

    fn on_directory(&self, dir: &Path, depth: usize, candidates: usize) {
        debug!(
            "Scanned {} (depth {}): {} candidate pairs",
            dir.display(),
            depth,
            candidates
        );
    }

    fn on_walk_error(&self, path: Option<&Path>, message: &str) {
        match path {
            Some(path) => warn!("Skipping {}: {}", path.display(), message),
            None => warn!("Skipping unreadable entry: {}", message),
        }
    }

    fn on_missing_read(&self, sample_id: &str, path: &Path) {
        warn!(
            "Read file {} for sample {} does not exist, skipping sample",
            path.display(),
            sample_id
        );
    }

    fn on_invalid_read(&self, sample_id: &str, path: &Path, verdict: &Verdict) {
        warn!(
            "Read file {} for sample {} failed validation ({}), skipping sample",
            path.display(),
            sample_id,
            verdict
        );
    }

    fn on_row_written(&self, row: &ManifestRow) {
        debug!("Added sample {}", row.id);
    }

    fn on_run_complete(&self, output: &Path, rows_written: usize) {
        info!("Manifest written to {}", output.display());
        info!("Total read pairs: {}", rows_written);
    }
}
