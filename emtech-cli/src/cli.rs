//! CLI argument parsing for emtech

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use emtech_core::{Granularity, RecoveryPolicy};

/// Symbol unit of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    /// Character n-grams (default order 4)
    Chars,
    /// Word-token n-grams (default order 2)
    Words,
}

impl GranularityArg {
    pub fn default_order(self) -> usize {
        match self {
            GranularityArg::Chars => 4,
            GranularityArg::Words => 2,
        }
    }
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Chars => Granularity::Chars,
            GranularityArg::Words => Granularity::Words,
        }
    }
}

/// What to do when the current context was never observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecoveryArg {
    /// Restart from the seed (or the most frequent context if the seed is unknown)
    RestartSeed,
    /// Jump to a random context, weighted by frequency
    RandomContext,
}

impl From<RecoveryArg> for RecoveryPolicy {
    fn from(arg: RecoveryArg) -> Self {
        match arg {
            RecoveryArg::RestartSeed => RecoveryPolicy::RestartSeed,
            RecoveryArg::RandomContext => RecoveryPolicy::RandomContext,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "emtech")]
#[command(version)]
#[command(about = "N-gram text generation and qubit toolkit", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize text sources and build a frequency table
    Build(BuildArgs),
    /// Generate a sequence from a saved frequency table
    Generate(GenerateArgs),
    /// Token-length statistics of a text file
    Analyze(AnalyzeArgs),
    /// Export a saved frequency table as CSV
    Export(ExportArgs),
    /// Print the numeric qubit walkthrough
    Qubit,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Raw text sources (e.g. Project Gutenberg books)
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<PathBuf>,

    /// Output table file
    #[arg(short, long, default_value = "table.bin")]
    pub output: PathBuf,

    /// N-gram order (defaults to 4 for chars, 2 for words)
    #[arg(short = 'n', long)]
    pub order: Option<usize>,

    /// Symbol unit
    #[arg(short, long, value_enum, default_value = "chars")]
    pub granularity: GranularityArg,

    /// Line marker preceding the content of each source
    #[arg(long, value_name = "TEXT")]
    pub start_marker: Option<String>,

    /// Line marker following the content of each source
    #[arg(long, value_name = "TEXT")]
    pub end_marker: Option<String>,

    /// Squeeze runs of spaces in the corpus
    #[arg(long)]
    pub collapse_spaces: bool,

    /// Also write the table as CSV next to the output file
    #[arg(long)]
    pub csv: bool,

    /// Count n-grams on all CPU cores
    #[arg(long)]
    pub parallel: bool,
}

impl BuildArgs {
    pub fn order(&self) -> usize {
        self.order.unwrap_or_else(|| self.granularity.default_order())
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Table file written by `build`
    #[arg(short, long, default_value = "table.bin")]
    pub table: PathBuf,

    /// Starting context (n-1 symbols); prompted for when missing
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Total number of symbols to generate; prompted for when missing
    #[arg(short, long)]
    pub length: Option<usize>,

    /// File receiving the generated sequence
    #[arg(short, long, default_value = "generated.txt")]
    pub output: PathBuf,

    /// Recovery policy for unseen contexts
    #[arg(long, value_enum, default_value = "restart-seed")]
    pub recovery: RecoveryArg,

    /// Fixed RNG seed for reproducible output
    #[arg(long, value_name = "U64")]
    pub rng_seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Text file to analyze
    pub file: PathBuf,

    /// Dictionary word list used to count real words
    #[arg(short, long, value_name = "FILE")]
    pub words: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Table file written by `build`
    #[arg(short, long, default_value = "table.bin")]
    pub table: PathBuf,

    /// CSV destination
    #[arg(long, default_value = "table.csv")]
    pub csv: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let cli = Cli::parse_from(["emtech", "build", "a.txt", "b.txt"]);
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.sources.len(), 2);
        assert_eq!(args.output, PathBuf::from("table.bin"));
        assert_eq!(args.order(), 4);
        assert!(!args.csv);
    }

    #[test]
    fn test_build_words_default_order() {
        let cli = Cli::parse_from(["emtech", "build", "-g", "words", "a.txt"]);
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.order(), 2);
        assert_eq!(Granularity::from(args.granularity), Granularity::Words);
    }

    #[test]
    fn test_build_requires_source() {
        assert!(Cli::try_parse_from(["emtech", "build"]).is_err());
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::parse_from([
            "emtech", "-vv", "generate", "--seed", "THE", "--length", "50", "--recovery", "random-context",
            "--rng-seed", "7",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.seed.as_deref(), Some("THE"));
        assert_eq!(args.length, Some(50));
        assert_eq!(RecoveryPolicy::from(args.recovery), RecoveryPolicy::RandomContext);
        assert_eq!(args.rng_seed, Some(7));
        assert_eq!(args.output, PathBuf::from("generated.txt"));
    }

    #[test]
    fn test_generate_prompts_when_missing() {
        let cli = Cli::parse_from(["emtech", "generate"]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(args.seed.is_none());
        assert!(args.length.is_none());
    }
}
