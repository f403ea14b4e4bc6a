use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input path must be a directory -> {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("File suffix must contain exactly one \"x\" placeholder: {0:?}")]
    InvalidSuffix(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
