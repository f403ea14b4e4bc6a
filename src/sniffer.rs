//! Cheap structural checks on read files.
//!
//! Nothing here returns an error: an unreadable file is reported as a
//! [`Verdict`] so a single bad file never aborts a run.

use crate::pairing::multi_extension;
use clap::ValueEnum;
use flate2::read::MultiGzDecoder;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Extensions accepted in relaxed mode.
pub const FASTQ_EXTENSIONS: [&str; 4] = [".fq", ".fq.gz", ".fastq", ".fastq.gz"];

/// Outcome of validating a single read file.
#[derive(Debug)]
pub enum Verdict {
    Valid,
    /// Readable, but the first record is not framed as `@header / seq / +`.
    Malformed,
    /// Open, read or decompression failed.
    Unreadable(io::Error),
    /// Relaxed mode only.
    BadExtension,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "valid"),
            Verdict::Malformed => write!(f, "not a well-formed FASTQ file"),
            Verdict::Unreadable(err) => write!(f, "could not be read: {}", err),
            Verdict::BadExtension => write!(
                f,
                "extension is not one of {}",
                FASTQ_EXTENSIONS.join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Open every file and check the first record's framing
    #[default]
    Strict,
    /// Only check the file extension
    Relaxed,
}

impl ValidationMode {
    pub fn check(self, path: &Path) -> Verdict {
        match self {
            ValidationMode::Strict => inspect(path),
            ValidationMode::Relaxed => {
                if has_fastq_extension(path) {
                    Verdict::Valid
                } else {
                    Verdict::BadExtension
                }
            }
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Strict => write!(f, "strict"),
            ValidationMode::Relaxed => write!(f, "relaxed"),
        }
    }
}

/// True iff the file starts with the gzip magic number. Fails closed.
pub fn is_compressed(path: &Path) -> bool {
    let mut magic = [0u8; 2];
    match File::open(path).and_then(|mut file| file.read_exact(&mut magic)) {
        Ok(()) => magic == GZIP_MAGIC,
        Err(err) => {
            debug!("Could not read magic bytes of {}: {}", path.display(), err);
            false
        }
    }
}

pub fn is_well_formed(path: &Path) -> bool {
    inspect(path).is_valid()
}

/// Reads the first three lines (decompressing if needed) and checks that
/// line 1 starts with `@` and line 3 starts with `+`.
pub fn inspect(path: &Path) -> Verdict {
    match first_record_is_framed(path) {
        Ok(true) => Verdict::Valid,
        Ok(false) => Verdict::Malformed,
        Err(err) => {
            debug!("Failed to inspect {}: {}", path.display(), err);
            Verdict::Unreadable(err)
        }
    }
}

fn first_record_is_framed(path: &Path) -> io::Result<bool> {
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if is_compressed(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    let mut lines = reader.split(b'\n');

    let mut head = Vec::with_capacity(3);
    for _ in 0..3 {
        match lines.next() {
            Some(line) => head.push(line?),
            None => return Ok(false),
        }
    }

    Ok(head[0].starts_with(b"@") && head[2].starts_with(b"+"))
}

/// Relaxed-mode check: the whole multi-part extension must be on the
/// allow-list. Pure name test, no I/O.
pub fn has_fastq_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| FASTQ_EXTENSIONS.contains(&multi_extension(name).as_str()))
        .unwrap_or(false)
}
