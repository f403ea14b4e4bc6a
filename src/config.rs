use crate::error::Result;
use crate::pairing::{PairingStrategy, SuffixPattern};
use crate::sniffer::ValidationMode;
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const CONFIG_FILE_NAME: &str = "FastqManifest";
const ENV_PREFIX: &str = "FASTQ_MANIFEST";

/// Run defaults, layered from built-in values, an optional
/// `FastqManifest.{toml,yaml,json}` file and `FASTQ_MANIFEST_*` environment
/// variables. Command line flags override all of them.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub fastq_validation: ValidationMode,
    pub max_depth: i64,
    pub file_suffix: Option<String>,
}

impl AppConfig {
    /// Negative depths mean the same as zero: scan the input root only.
    pub fn depth_limit(&self) -> usize {
        depth_limit(self.max_depth)
    }

    pub fn pairing(&self) -> Result<PairingStrategy> {
        match &self.file_suffix {
            Some(suffix) => Ok(PairingStrategy::Suffix(SuffixPattern::parse(suffix)?)),
            None => Ok(PairingStrategy::Inferred),
        }
    }
}

pub fn depth_limit(max_depth: i64) -> usize {
    if max_depth < 0 {
        debug!("max_depth {} treated as 0", max_depth);
    }
    usize::try_from(max_depth).unwrap_or(0)
}

pub fn load_configuration() -> Result<AppConfig> {
    load_configuration_from(Path::new(CONFIG_FILE_NAME))
}

pub fn load_configuration_from(path: &Path) -> Result<AppConfig> {
    let builder = Config::builder()
        .set_default("fastq_validation", "strict")?
        .set_default("max_depth", 0)?
        .add_source(ConfigFile::from(path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}
