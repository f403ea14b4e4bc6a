use clap::Parser;
use fastq_manifest::ValidationMode;
use std::path::PathBuf;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "fastq-manifest")]
#[command(about = "Paired-end FASTQ manifest generator", long_about = None)]
pub struct Cli {
    /// Path to reads dir
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory for manifest.csv and the log file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Check file contents (strict) or only extensions (relaxed)
    #[arg(long = "fastq_validation", value_enum)]
    pub fastq_validation: Option<ValidationMode>,

    /// How many directory levels below the input to descend
    #[arg(long = "max_depth", allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Explicit naming convention, "x" marks the read number. Example: "_x.fastq.gz"
    #[arg(short = 's', long = "file_suffix")]
    pub file_suffix: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_spec_flags() {
        let cli = Cli::try_parse_from([
            "fastq-manifest",
            "--input",
            "reads",
            "--output",
            "out",
            "--fastq_validation",
            "relaxed",
            "--max_depth",
            "-1",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("reads"));
        assert_eq!(cli.fastq_validation, Some(ValidationMode::Relaxed));
        assert_eq!(cli.max_depth, Some(-1));
        assert!(cli.file_suffix.is_none());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["fastq-manifest", "-o", "out"]).is_err());
    }
}
