//! Command line argument parsing for the toponym CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Toponym - spelling correction and autocomplete for place names
#[derive(Parser, Debug, Clone)]
#[command(name = "toponym")]
#[command(about = "Spelling correction and autocomplete for state, city and street names")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ToponymArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Checker configuration file (JSON). TOPONYM_* environment variables override its directories.
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ToponymArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct the spelling of a name
    Correct(CorrectArgs),

    /// Suggest names containing a substring
    Suggest(SuggestArgs),

    /// List ranked spelling candidates for a term
    Lookup(LookupArgs),

    /// Compute the Damerau-Levenshtein distance between two strings
    Distance(DistanceArgs),

    /// Show training statistics
    Stats,
}

/// Arguments for spelling correction
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Context (site) to correct in, e.g. MLA
    #[arg(value_name = "CONTEXT")]
    pub context: String,

    /// Text to correct
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Context key: a site, a state code or a "stateCode-cityCode" pair
    #[arg(value_name = "CONTEXT")]
    pub context: String,

    /// Substring to look for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Attach name codes to the suggestions
    #[arg(long)]
    pub codes: bool,
}

/// Arguments for candidate lookup
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Context (site) to look in
    #[arg(value_name = "CONTEXT")]
    pub context: String,

    /// Term to look up
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Maximum edit distance
    #[arg(short = 'd', long, default_value = "2")]
    pub max_distance: usize,
}

/// Arguments for distance computation
#[derive(Parser, Debug, Clone)]
pub struct DistanceArgs {
    /// First string
    #[arg(value_name = "A")]
    pub a: String,

    /// Second string
    #[arg(value_name = "B")]
    pub b: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_correct_command() {
        let args = ToponymArgs::try_parse_from([
            "toponym",
            "--config",
            "toponym.json",
            "correct",
            "MLA",
            "bs aires",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("toponym.json")));
        if let Command::Correct(correct_args) = args.command {
            assert_eq!(correct_args.context, "MLA");
            assert_eq!(correct_args.text, "bs aires");
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_suggest_command() {
        let args =
            ToponymArgs::try_parse_from(["toponym", "suggest", "MLA", "cord", "--codes"]).unwrap();

        if let Command::Suggest(suggest_args) = args.command {
            assert_eq!(suggest_args.context, "MLA");
            assert_eq!(suggest_args.query, "cord");
            assert!(suggest_args.codes);
        } else {
            panic!("Expected Suggest command");
        }
    }

    #[test]
    fn test_lookup_command() {
        let args = ToponymArgs::try_parse_from([
            "toponym",
            "lookup",
            "MLA",
            "cordba",
            "--max-distance",
            "3",
        ])
        .unwrap();

        if let Command::Lookup(lookup_args) = args.command {
            assert_eq!(lookup_args.term, "cordba");
            assert_eq!(lookup_args.max_distance, 3);
        } else {
            panic!("Expected Lookup command");
        }

        let args = ToponymArgs::try_parse_from(["toponym", "lookup", "MLA", "cordba"]).unwrap();
        if let Command::Lookup(lookup_args) = args.command {
            assert_eq!(lookup_args.max_distance, 2);
        } else {
            panic!("Expected Lookup command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = ToponymArgs::try_parse_from(["toponym", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Verbose flag
        let args = ToponymArgs::try_parse_from(["toponym", "-v", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = ToponymArgs::try_parse_from(["toponym", "-vv", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Quiet flag
        let args = ToponymArgs::try_parse_from(["toponym", "--quiet", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            ToponymArgs::try_parse_from(["toponym", "--format", "json", "distance", "a", "b"])
                .unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
        assert!(ToponymArgs::try_parse_from(["toponym", "--format", "yaml", "stats"]).is_err());
    }
}
