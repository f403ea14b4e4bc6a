use crate::error::{Error, Result};
use crate::pairing::{CandidatePair, PairingStrategy};
use crate::progress::ManifestReporter;
use crate::scanner;
use crate::sniffer::ValidationMode;
use chrono::{DateTime, Local};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const MANIFEST_FILE_NAME: &str = "manifest.csv";
pub const MANIFEST_HEADER: [&str; 3] = ["ID", "R1", "R2"];

#[derive(Debug, Clone)]
pub struct ManifestSettings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub validation: ValidationMode,
    pub max_depth: usize,
    pub pairing: PairingStrategy,
}

impl ManifestSettings {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            validation: ValidationMode::default(),
            max_depth: 0,
            pairing: PairingStrategy::default(),
        }
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_pairing(mut self, pairing: PairingStrategy) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE_NAME)
    }

    /// Depth actually walked: `max_depth`, raised to what the pairing
    /// strategy needs.
    pub fn walk_depth(&self) -> usize {
        self.max_depth.max(self.pairing.min_depth())
    }
}

/// One validated sample: both reads exist and passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub id: String,
    pub read1: PathBuf,
    pub read2: PathBuf,
}

impl ManifestRow {
    fn to_record(&self) -> [String; 3] {
        [
            self.id.clone(),
            self.read1.display().to_string(),
            self.read2.display().to_string(),
        ]
    }
}

#[derive(Debug)]
pub struct ManifestSummary {
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub pairs_skipped: usize,
    pub directories_scanned: usize,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
}

pub struct ManifestBuilder {
    settings: ManifestSettings,
}

impl ManifestBuilder {
    pub fn new(settings: ManifestSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ManifestSettings {
        &self.settings
    }

    /// Walk the input tree and write `manifest.csv` into the output
    /// directory. Fails only if the input is not a directory or the manifest
    /// cannot be written; bad pairs are reported and skipped.
    pub fn build(&self, reporter: &dyn ManifestReporter) -> Result<ManifestSummary> {
        let settings = &self.settings;
        if !settings.input.is_dir() {
            return Err(Error::NotADirectory(settings.input.clone()));
        }

        reporter.on_run_start(settings);
        let started_at = Local::now();
        let start = Instant::now();

        let output_path = settings.manifest_path();
        let mut writer = csv::Writer::from_writer(File::create(&output_path)?);
        writer.write_record(MANIFEST_HEADER)?;

        let mut rows_written = 0;
        let mut pairs_skipped = 0;

        let walk = scanner::walk_candidates(
            &settings.input,
            settings.walk_depth(),
            &settings.pairing,
            reporter,
            |dir, candidate| {
                match self.resolve(dir, candidate, reporter) {
                    Some(row) => {
                        writer.write_record(row.to_record())?;
                        writer.flush()?;
                        rows_written += 1;
                        reporter.on_row_written(&row);
                    }
                    None => pairs_skipped += 1,
                }
                Ok(())
            },
        )?;

        writer.flush()?;
        reporter.on_run_complete(&output_path, rows_written);

        Ok(ManifestSummary {
            output_path,
            rows_written,
            pairs_skipped,
            directories_scanned: walk.directories,
            started_at,
            duration: start.elapsed(),
        })
    }

    /// Turns a candidate into a row, or reports why it was dropped.
    pub fn resolve(
        &self,
        dir: &Path,
        candidate: &CandidatePair,
        reporter: &dyn ManifestReporter,
    ) -> Option<ManifestRow> {
        let id = self
            .settings
            .pairing
            .sample_id(&self.settings.input, dir, candidate);
        let reads = [
            dir.join(candidate.read_name('1')),
            dir.join(candidate.read_name('2')),
        ];

        let mut missing = false;
        for read in reads.iter().filter(|read| !read.exists()) {
            reporter.on_missing_read(&id, read);
            missing = true;
        }
        if missing {
            return None;
        }

        for read in &reads {
            let verdict = self.settings.validation.check(read);
            if !verdict.is_valid() {
                reporter.on_invalid_read(&id, read, &verdict);
                return None;
            }
        }

        let [read1, read2] = reads;
        Some(ManifestRow { id, read1, read2 })
    }
}
