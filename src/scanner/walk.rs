use crate::error::Result;
use crate::pairing::{CandidatePair, PairingStrategy};
use crate::progress::ManifestReporter;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    pub directories: usize,
    pub candidates: usize,
}

/// Top-down traversal of `root`. Every visited directory's files are paired
/// and each candidate is handed to `on_candidate` together with its
/// directory. Directories at `depth >= max_depth` are scanned but not
/// descended into, so `max_depth == 0` scans the root only.
///
/// Unreadable directories are reported and skipped. Only an error returned
/// by `on_candidate` stops the walk.
pub fn walk_candidates<F>(
    root: &Path,
    max_depth: usize,
    pairing: &PairingStrategy,
    reporter: &dyn ManifestReporter,
    mut on_candidate: F,
) -> Result<WalkStats>
where
    F: FnMut(&Path, &CandidatePair) -> Result<()>,
{
    let mut stats = WalkStats::default();

    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                reporter.on_walk_error(err.path(), &err.to_string());
                continue;
            }
        };
        // A symlinked root reports a symlink file type.
        if entry.depth() > 0 && !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let names = list_file_names(dir, reporter);
        let candidates = pairing.candidates(&names);
        reporter.on_directory(dir, entry.depth(), candidates.len());

        stats.directories += 1;
        stats.candidates += candidates.len();
        for candidate in &candidates {
            on_candidate(dir, candidate)?;
        }
    }

    Ok(stats)
}

/// Sorted names of the non-directory entries of `dir`.
fn list_file_names(dir: &Path, reporter: &dyn ManifestReporter) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            reporter.on_walk_error(Some(dir), &format!("Error reading directory: {}", err));
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                reporter.on_walk_error(Some(dir), &format!("Error reading entry: {}", err));
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => debug!("Skipping non UTF-8 file name {:?}", name),
        }
    }

    names.sort();
    names
}
