pub mod config;
pub mod error;
pub mod manifest;
pub mod pairing;
pub mod progress;
pub mod scanner;
pub mod sniffer;

pub use crate::config::AppConfig;
pub use error::Error;
pub use manifest::{ManifestBuilder, ManifestRow, ManifestSettings, ManifestSummary};
pub use pairing::{CandidatePair, PairingStrategy, SuffixPattern};
pub use progress::{ManifestReporter, SilentReporter, TracingReporter};
pub use sniffer::{ValidationMode, Verdict};
