//! fuzzyrank: fuzzy search and relevance ranking over JSON records.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fuzzyrank_search::{
    levenshtein_distance, par_rank_with_stats, similarity, FieldSpec, SearchOptions,
};
use fuzzyrank_telemetry::{metrics, Timer};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

mod config;
mod output;

use config::Config;

/// Fuzzy search and relevance ranking over JSON records
#[derive(Parser)]
#[command(name = "fuzzyrank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long, global = true, env = "FUZZYRANK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging and print a summary
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and rank records from a JSON array
    Search {
        /// Search query (blank returns every record unchanged)
        #[arg(short, long, default_value = "")]
        query: String,

        /// JSON file with an array of records (stdin when omitted or "-")
        #[arg(short, long)]
        records: Option<PathBuf>,

        /// Field path to search, repeatable (e.g. -f name -f profile.email)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Similarity threshold between 0 and 1
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Search profile from the configuration file
        #[arg(short, long)]
        profile: Option<String>,

        /// Include scores and matched fields in the output
        #[arg(short, long)]
        scores: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the edit distance between two strings
    Distance {
        a: String,
        b: String,
    },

    /// Print the similarity (0 to 1) between two strings
    Similarity {
        a: String,
        b: String,
    },

    /// List search profiles from the configuration file
    Profiles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let mut telemetry = config.schema.telemetry.clone();
    if cli.verbose {
        telemetry.log_level = "debug".to_string();
    }
    fuzzyrank_telemetry::init_with_config(&telemetry)?;

    if let Some(ref path) = config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    match cli.command {
        Commands::Search {
            query,
            records,
            fields,
            threshold,
            limit,
            profile,
            scores,
            format,
        } => {
            let mut options = match profile {
                Some(ref name) => config.profile(name)?.clone(),
                None => SearchOptions::default(),
            };
            if !fields.is_empty() {
                options.fields = fields.into_iter().map(FieldSpec::from).collect();
            }
            if let Some(threshold) = threshold {
                options.threshold = threshold;
            }
            if limit.is_some() {
                options.limit = limit;
            }
            options.validate().context("Invalid search options")?;

            let candidates = read_records(records.as_deref())?;
            run_search(&candidates, &options, &query, scores, format, cli.verbose)?;
        }

        Commands::Distance { a, b } => {
            println!("{}", levenshtein_distance(&a, &b));
        }

        Commands::Similarity { a, b } => {
            println!("{:.4}", similarity(&a, &b));
        }

        Commands::Profiles => {
            if config.schema.profiles.is_empty() {
                eprintln!("No profiles configured");
            }
            for (name, options) in &config.schema.profiles {
                let fields: Vec<&str> = options.fields.iter().map(|f| f.path.as_str()).collect();
                println!("{}\tthreshold={}\tfields={}", name, options.threshold, fields.join(","));
            }
        }
    }

    Ok(())
}

fn run_search(
    candidates: &[Value],
    options: &SearchOptions,
    query: &str,
    scores: bool,
    format: Format,
    verbose: bool,
) -> Result<()> {
    let timer = Timer::start("search");
    let (results, stats) = par_rank_with_stats(candidates, options, query);
    let elapsed = timer.stop();

    metrics().record_search(stats.candidates, stats.matches, query.trim().is_empty());

    match format {
        Format::Json if scores => println!("{}", serde_json::to_string_pretty(&results)?),
        Format::Json => {
            let items: Vec<&Value> = results.iter().map(|result| &result.item).collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Format::Text => output::print_results(&results, scores),
    }

    if verbose {
        output::print_summary(&stats, elapsed);
        tracing::debug!(metrics = %metrics().export_json(), "Search metrics");
    }

    Ok(())
}

fn read_records(path: Option<&Path>) -> Result<Vec<Value>> {
    let content = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read records from {}", p.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read records from stdin")?;
            buffer
        }
    };

    let records = fuzzyrank_search::parse_records(&content).context("Records must be a JSON array")?;
    if records.iter().any(|record| !record.is_object()) {
        bail!("Every record must be a JSON object");
    }

    Ok(records)
}
