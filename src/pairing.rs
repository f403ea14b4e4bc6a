//! Read-pair inference over a single directory listing.
//!
//! Names are compared only with their immediate neighbour in sorted order.
//! Two names of equal length that differ in exactly one character are taken
//! to be the R1/R2 files of one sample, the differing character being the
//! read number.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// A pair of file names that differ only in the read-number position.
///
/// Both names are `prefix + digit + remainder + extension`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePair {
    prefix: String,
    remainder: String,
    extension: String,
}

impl CandidatePair {
    pub fn new(
        prefix: impl Into<String>,
        remainder: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            remainder: remainder.into(),
            extension: extension.into(),
        }
    }

    /// Builds the candidate from `name` with the read number at char index `n`.
    fn split_at(name: &[char], n: usize) -> Self {
        let mut ext_start = extension_start(name);
        if ext_start <= n {
            ext_start = name[n + 1..]
                .iter()
                .position(|c| *c == '.')
                .map_or(name.len(), |offset| n + 1 + offset);
        }

        Self {
            prefix: name[..n].iter().collect(),
            remainder: name[n + 1..ext_start].iter().collect(),
            extension: name[ext_start..].iter().collect(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name with `digit` in the read-number position.
    pub fn read_name(&self, digit: char) -> String {
        let mut name = String::with_capacity(
            self.prefix.len() + self.remainder.len() + self.extension.len() + 1,
        );
        name.push_str(&self.prefix);
        name.push(digit);
        name.push_str(&self.remainder);
        name.push_str(&self.extension);
        name
    }

    pub fn sample_id(&self) -> String {
        normalize_sample_id(&format!("{}{}", self.prefix, self.remainder))
    }
}

impl fmt::Display for CandidatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[12]{}{}", self.prefix, self.remainder, self.extension)
    }
}

/// Strips one trailing `R`, then one trailing `_`.
pub fn normalize_sample_id(stem: &str) -> String {
    let id = stem.strip_suffix('R').unwrap_or(stem);
    let id = id.strip_suffix('_').unwrap_or(id);
    id.to_string()
}

/// The multi-part extension of `name`, such as `.fastq.gz`.
pub fn multi_extension(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    chars[extension_start(&chars)..].iter().collect()
}

/// Char index where the multi-part extension begins (`.fastq.gz`), or
/// `name.len()` when there is none. Leading dots belong to the stem and a
/// name ending in `.` has no extension.
fn extension_start(name: &[char]) -> usize {
    if name.last() == Some(&'.') {
        return name.len();
    }
    let leading_dots = name.iter().take_while(|c| **c == '.').count();
    name[leading_dots..]
        .iter()
        .position(|c| *c == '.')
        .map_or(name.len(), |offset| leading_dots + offset)
}

/// Index of the only differing char, if the names are the same length and
/// differ in exactly one position.
fn single_difference(a: &[char], b: &[char]) -> Option<usize> {
    if a.len() != b.len() {
        return None;
    }
    let mut diffs = a
        .iter()
        .zip(b)
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(i, _)| i);
    match (diffs.next(), diffs.next()) {
        (Some(n), None) => Some(n),
        _ => None,
    }
}

/// Sliding comparison of each name with the one before it. `names` must
/// already be sorted.
pub fn infer_pairs<S: AsRef<str>>(names: &[S]) -> Vec<CandidatePair> {
    let mut candidates = Vec::new();
    let mut previous: Option<Vec<char>> = None;

    for name in names {
        let current: Vec<char> = name.as_ref().chars().collect();
        if let Some(n) = previous
            .as_deref()
            .and_then(|prev| single_difference(prev, &current))
        {
            candidates.push(CandidatePair::split_at(&current, n));
        }
        previous = Some(current);
    }

    candidates
}

/// An explicit naming convention such as `_x.fastq.gz`, where `x` marks the
/// read number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixPattern {
    before: String,
    after: String,
}

impl SuffixPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.matches('x').count() != 1 {
            return Err(Error::InvalidSuffix(pattern.to_string()));
        }
        let (before, after) = pattern
            .split_once('x')
            .ok_or_else(|| Error::InvalidSuffix(pattern.to_string()))?;
        Ok(Self {
            before: before.to_string(),
            after: after.to_string(),
        })
    }

    pub fn render(&self, digit: char) -> String {
        format!("{}{}{}", self.before, digit, self.after)
    }

    /// One candidate per name ending with the read 1 suffix. The read 2 file
    /// is not looked for here.
    pub fn pairs<S: AsRef<str>>(&self, names: &[S]) -> Vec<CandidatePair> {
        let read1 = self.render('1');
        names
            .iter()
            .filter_map(|name| name.as_ref().strip_suffix(read1.as_str()))
            .map(|stem| {
                CandidatePair::new(format!("{}{}", stem, self.before), "", self.after.as_str())
            })
            .collect()
    }
}

impl fmt::Display for SuffixPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.before, self.after)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PairingStrategy {
    /// Infer pairs from adjacent names one character apart.
    #[default]
    Inferred,
    Suffix(SuffixPattern),
}

impl PairingStrategy {
    pub fn candidates<S: AsRef<str>>(&self, names: &[S]) -> Vec<CandidatePair> {
        match self {
            PairingStrategy::Inferred => infer_pairs(names),
            PairingStrategy::Suffix(pattern) => pattern.pairs(names),
        }
    }

    /// Suffix mode treats each directory below `root` as one sample and
    /// names it after the directory. Everything else is named after the
    /// file stem.
    pub fn sample_id(&self, root: &Path, dir: &Path, candidate: &CandidatePair) -> String {
        match self {
            PairingStrategy::Suffix(_) if dir != root => dir
                .file_name()
                .and_then(|name| name.to_str())
                .map(String::from)
                .unwrap_or_else(|| candidate.sample_id()),
            _ => candidate.sample_id(),
        }
    }

    /// Sample directories sit directly under the root in suffix mode, so at
    /// least one level is always scanned there.
    pub fn min_depth(&self) -> usize {
        match self {
            PairingStrategy::Inferred => 0,
            PairingStrategy::Suffix(_) => 1,
        }
    }
}

impl fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingStrategy::Inferred => write!(f, "inferred"),
            PairingStrategy::Suffix(pattern) => write!(f, "suffix {}", pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_illumina_style_names() {
        let names = ["sampleA_R1.fastq.gz", "sampleA_R2.fastq.gz"];
        let pairs = infer_pairs(&names);

        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.prefix(), "sampleA_R");
        assert_eq!(pair.remainder(), "");
        assert_eq!(pair.extension(), ".fastq.gz");
        assert_eq!(pair.read_name('1'), names[0]);
        assert_eq!(pair.read_name('2'), names[1]);
        assert_eq!(pair.sample_id(), "sampleA");
    }

    #[test]
    fn test_remainder_after_read_number() {
        let names = ["S1_L001_R1_001.fastq.gz", "S1_L001_R2_001.fastq.gz"];
        let pairs = infer_pairs(&names);

        assert_eq!(pairs, vec![CandidatePair::new("S1_L001_R", "_001", ".fastq.gz")]);
        assert_eq!(pairs[0].sample_id(), "S1_L001_R_001");
    }

    #[test]
    fn test_unequal_lengths_never_pair() {
        let names = ["sample_1.fq", "sample_2.fq.gz", "sample_10.fq"];
        assert!(infer_pairs(&names).is_empty());
    }

    #[test]
    fn test_two_differences_never_pair() {
        let names = ["a_L1_R1.fq", "a_L2_R2.fq"];
        assert!(infer_pairs(&names).is_empty());
    }

    #[test]
    fn test_identical_neighbours_never_pair() {
        let names = ["a_1.fq", "a_1.fq"];
        assert!(infer_pairs(&names).is_empty());
    }

    #[test]
    fn test_only_adjacent_names_are_compared() {
        // a_1.fq and a_2.fq are one apart but a_2.fa sorts between them.
        let names = ["a_1.fq", "a_2.fa", "a_2.fq"];
        let pairs = infer_pairs(&names);
        assert_eq!(pairs, vec![CandidatePair::new("a_2.f", "", "")]);

        // Three in a row: 1-2 and 2-3 are compared, 1-3 never is.
        let names = ["a_1.fq", "a_2.fq", "a_3.fq"];
        let pairs = infer_pairs(&names);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|p| p.read_name('1') == "a_1.fq"));
    }

    #[test]
    fn test_difference_inside_extension() {
        let names = ["reads.fq1", "reads.fq2"];
        let pairs = infer_pairs(&names);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].read_name('1'), "reads.fq1");
        assert_eq!(pairs[0].read_name('2'), "reads.fq2");

        let names = ["r.a1.gz", "r.a2.gz"];
        let pairs = infer_pairs(&names);
        assert_eq!(pairs, vec![CandidatePair::new("r.a", "", ".gz")]);
    }

    #[test]
    fn test_hidden_and_extensionless_names() {
        let pairs = infer_pairs(&[".s_1", ".s_2"]);
        assert_eq!(pairs, vec![CandidatePair::new(".s_", "", "")]);

        let pairs = infer_pairs(&["s1.", "s2."]);
        assert_eq!(pairs, vec![CandidatePair::new("s", ".", "")]);
    }

    #[test]
    fn test_multi_extension() {
        assert_eq!(multi_extension("a_R1.fastq.gz"), ".fastq.gz");
        assert_eq!(multi_extension("s.v2_R1.fastq.gz"), ".v2_R1.fastq.gz");
        assert_eq!(multi_extension(".hidden"), "");
        assert_eq!(multi_extension("trailing."), "");
    }

    #[test]
    fn test_empty_listing() {
        let names: [&str; 0] = [];
        assert!(infer_pairs(&names).is_empty());
        assert!(infer_pairs(&["lonely_R1.fq"]).is_empty());
    }

    #[test]
    fn test_normalize_sample_id() {
        assert_eq!(normalize_sample_id("sampleA_R"), "sampleA");
        assert_eq!(normalize_sample_id("sampleA_"), "sampleA");
        assert_eq!(normalize_sample_id("sampleAR"), "sampleA");
        assert_eq!(normalize_sample_id("sampleA_RR"), "sampleA_R");
        assert_eq!(normalize_sample_id("sample__"), "sample_");
        assert_eq!(normalize_sample_id(""), "");
    }

    #[test]
    fn test_normalize_is_identity_on_clean_ids() {
        for id in ["sampleA", "S1_L001_R_001", "x.y"] {
            assert_eq!(normalize_sample_id(id), id);
            assert_eq!(normalize_sample_id(&normalize_sample_id(id)), id);
        }
    }

    #[test]
    fn test_non_ascii_names_compare_by_char() {
        let pairs = infer_pairs(&["échantillon_R1.fq", "échantillon_R2.fq"]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].sample_id(), "échantillon");
    }

    #[test]
    fn test_suffix_pattern_requires_one_placeholder() {
        assert!(SuffixPattern::parse("_x.fastq.gz").is_ok());
        assert!(matches!(
            SuffixPattern::parse("_R.fastq.gz"),
            Err(Error::InvalidSuffix(_))
        ));
        assert!(matches!(
            SuffixPattern::parse("_x.fxq"),
            Err(Error::InvalidSuffix(_))
        ));
    }

    #[test]
    fn test_suffix_strategy_pairs_by_convention() {
        let pattern = SuffixPattern::parse("_x.fq").unwrap();
        let strategy = PairingStrategy::Suffix(pattern);
        let names = ["a_1.fq", "a_2.fq", "b_1.fq", "notes.txt"];
        let pairs = strategy.candidates(&names);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].read_name('2'), "a_2.fq");
        assert_eq!(pairs[0].sample_id(), "a");
        assert_eq!(pairs[1].read_name('2'), "b_2.fq");
    }

    #[test]
    fn test_suffix_strategy_names_samples_after_directory() {
        let strategy = PairingStrategy::Suffix(SuffixPattern::parse("_x.fastq.gz").unwrap());
        let candidate = strategy.candidates(&["S01_L001_1.fastq.gz"]).remove(0);
        let root = Path::new("reads");

        assert_eq!(strategy.sample_id(root, &root.join("S01"), &candidate), "S01");
        assert_eq!(strategy.sample_id(root, root, &candidate), "S01_L001");
        assert_eq!(strategy.min_depth(), 1);

        let inferred = PairingStrategy::Inferred;
        assert_eq!(inferred.sample_id(root, &root.join("S01"), &candidate), "S01_L001");
        assert_eq!(inferred.min_depth(), 0);
    }

    #[test]
    fn test_suffix_strategy_strips_read_marker() {
        let pattern = SuffixPattern::parse("x.fastq.gz").unwrap();
        let pairs = pattern.pairs(&["s9_R1.fastq.gz"]);
        assert_eq!(pairs[0].sample_id(), "s9");
        assert_eq!(pattern.to_string(), "x.fastq.gz");
    }
}
