//! Command implementations for the toponym CLI.

use std::time::Instant;

use crate::checker::Checker;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::CheckerConfig;
use crate::error::Result;
use crate::spelling::levenshtein::damerau_levenshtein_distance;

/// Execute a CLI command.
pub fn execute_command(args: ToponymArgs) -> Result<()> {
    match &args.command {
        Command::Correct(correct_args) => correct(correct_args.clone(), &args),
        Command::Suggest(suggest_args) => suggest(suggest_args.clone(), &args),
        Command::Lookup(lookup_args) => lookup(lookup_args.clone(), &args),
        Command::Distance(distance_args) => distance(distance_args.clone(), &args),
        Command::Stats => show_stats(&args),
    }
}

/// Load the configuration named on the command line, then apply environment overrides.
fn load_config(cli_args: &ToponymArgs) -> Result<CheckerConfig> {
    let config = match &cli_args.config {
        Some(path) => {
            if cli_args.verbosity() > 1 {
                println!("Loading configuration from: {}", path.display());
            }
            CheckerConfig::from_file(path)?
        }
        None => CheckerConfig::default(),
    };
    Ok(config.with_env_overrides())
}

/// Build a checker from the configuration.
fn load_checker(cli_args: &ToponymArgs) -> Result<Checker> {
    Checker::from_config(load_config(cli_args)?)
}

/// Correct the spelling of a name.
fn correct(args: CorrectArgs, cli_args: &ToponymArgs) -> Result<()> {
    let checker = load_checker(cli_args)?;
    let correction = checker.correct(&args.text, &args.context);

    output_result(
        "Spelling correction",
        &CorrectionResult {
            changed: correction != args.text,
            context: args.context,
            input: args.text,
            correction,
        },
        cli_args,
    )
}

/// Suggest names containing a substring.
fn suggest(args: SuggestArgs, cli_args: &ToponymArgs) -> Result<()> {
    let checker = load_checker(cli_args)?;
    let suggestions = checker.suggest_with_codes(&args.query, &args.context, args.codes);

    output_result(
        "Suggestions",
        &SuggestionsResult {
            context: args.context,
            query: args.query,
            suggestions,
        },
        cli_args,
    )
}

/// List ranked spelling candidates.
fn lookup(args: LookupArgs, cli_args: &ToponymArgs) -> Result<()> {
    let checker = load_checker(cli_args)?;
    let candidates = checker.lookup(&args.term, &args.context, args.max_distance);

    output_result(
        "Spelling candidates",
        &LookupResult {
            context: args.context,
            term: args.term,
            max_distance: args.max_distance,
            candidates,
        },
        cli_args,
    )
}

/// Compute an edit distance. Needs no trained data.
fn distance(args: DistanceArgs, cli_args: &ToponymArgs) -> Result<()> {
    let distance = damerau_levenshtein_distance(&args.a, &args.b);

    output_result(
        "Damerau-Levenshtein distance",
        &DistanceResult {
            a: args.a,
            b: args.b,
            distance,
        },
        cli_args,
    )
}

/// Train from the configuration and show what was built.
fn show_stats(cli_args: &ToponymArgs) -> Result<()> {
    let start_time = Instant::now();
    let checker = load_checker(cli_args)?;
    let duration = start_time.elapsed();

    let mut spelling_contexts: Vec<String> = checker
        .corrector()
        .index()
        .contexts()
        .map(str::to_string)
        .collect();
    spelling_contexts.sort();

    output_result(
        "Training statistics",
        &StatsResult {
            spelling_contexts,
            suggestion_contexts: checker.suggestor().context_count(),
            report: checker.report(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}
