//! serpvis: brand visibility CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serpvis::config::{default_config_json, load_config, CONFIG_FILENAME};
use serpvis::engine::VisibilityEngine;
use serpvis::reporter::{ConsoleReporter, CsvReporter, JsonReporter};
use serpvis::rules::{default_rules, validate_rules};
use serpvis::source::{FileSource, SerpApiClient};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// serpvis: brand visibility across Google SERP features
#[derive(Parser, Debug)]
#[command(name = "serpvis")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File with keywords to check, one per line
    keywords: Option<PathBuf>,

    /// Extra keyword to check (repeatable)
    #[arg(long = "keyword", short = 'k', value_name = "KEYWORD")]
    keyword: Vec<String>,

    /// Brand name to track (falls back to the config file)
    #[arg(long, short)]
    brand: Option<String>,

    /// SerpAPI key (falls back to the SERPAPI_KEY environment variable)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Directory of saved SERP payloads (<keyword-slug>.json); skips the network
    #[arg(long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Interface language code sent with each query (default: en)
    #[arg(long)]
    hl: Option<String>,

    /// Geolocation country code sent with each query (default: us)
    #[arg(long)]
    gl: Option<String>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Write CSV to FILE (default: visibility_<brand>_<date>.csv)
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "")]
    csv: Option<PathBuf>,

    /// Minimum average score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Milliseconds to wait between keyword fetches
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Quiet mode (one line per keyword)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (include SERP metadata URLs)
    #[arg(long, short)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to config file (default: search .serpvisrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .serpvisrc.json with sensible defaults
    Init {
        /// Minimum average score threshold (e.g. 1.5)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        match cmd {
            Commands::Init { threshold, dir } => return run_init(threshold, dir.as_deref()),
        }
    }

    let work_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&work_dir, args.config.as_deref())?;

    let keywords = collect_keywords(args.keywords.as_deref(), &args.keyword)?;
    if keywords.is_empty() {
        anyhow::bail!("No keywords given; pass a keywords file or --keyword");
    }

    let brand = args
        .brand
        .clone()
        .or_else(|| config.brand.clone().filter(|b| !b.is_empty()))
        .ok_or_else(|| {
            anyhow::anyhow!("No brand given; pass --brand or set it in {}", CONFIG_FILENAME)
        })?;

    let rules = match config.features.clone() {
        Some(features) => features,
        None => default_rules(),
    };
    validate_rules(&rules)?;

    let delay = args.delay_ms.or(config.delay_ms).unwrap_or(1200);
    let mut engine = VisibilityEngine::new()
        .with_rules(rules)
        .with_delay(Duration::from_millis(delay));
    if let Some(weights) = config.weights {
        engine = engine.with_weights(weights);
    }
    if let Some(thresholds) = config.thresholds {
        engine = engine.with_thresholds(thresholds);
    }
    if args.quiet {
        engine = engine.quiet();
    }

    let (rows, failures) = if let Some(ref dir) = args.input {
        let source = FileSource::new(dir.clone());
        engine.run(&source, &brand, &keywords)
    } else {
        let api_key = args
            .api_key
            .clone()
            .or_else(|| std::env::var("SERPAPI_KEY").ok())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key; pass --api-key, set SERPAPI_KEY, or use --input for saved results"
                )
            })?;
        let hl = args.hl.clone().or_else(|| config.hl.clone());
        let gl = args.gl.clone().or_else(|| config.gl.clone());
        let source = SerpApiClient::new(api_key).with_locale(
            hl.unwrap_or_else(|| "en".to_string()),
            gl.unwrap_or_else(|| "us".to_string()),
        );
        engine.run(&source, &brand, &keywords)
    };

    let stats = engine.aggregate_stats(&rows, failures);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        println!("{}", reporter.report_with_summary(&rows, &stats));
    } else if args.quiet {
        let mut reporter = ConsoleReporter::new();
        if args.no_color {
            reporter = reporter.without_colors();
        }
        for row in &rows {
            reporter.report_quiet(row);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.no_color {
            reporter = reporter.without_colors();
        }
        if args.verbose {
            reporter = reporter.verbose();
        }
        reporter.report_many(&rows, &stats);
    }

    if let Some(ref csv_arg) = args.csv {
        let path = if csv_arg.as_os_str().is_empty() {
            PathBuf::from(CsvReporter::default_filename(&brand))
        } else {
            csv_arg.clone()
        };
        CsvReporter::new(engine.rules()).write_file(&path, &rows)?;
        if !args.quiet {
            eprintln!("{}: CSV written to {}", "Info".blue(), path.display());
        }
    }

    // Check threshold (CLI overrides config)
    if let Some(threshold) = args.threshold.or(config.threshold) {
        if stats.average_score < threshold {
            if !args.quiet && !args.json {
                eprintln!(
                    "\n{}: Average score {:.2} is below threshold {:.2}",
                    "Failed".red().bold(),
                    stats.average_score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Read keywords from the file (one per line, blank lines and # comments
/// skipped) and append any --keyword values, preserving input order.
fn collect_keywords(file: Option<&Path>, extra: &[String]) -> Result<Vec<String>> {
    let mut keywords = Vec::new();
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keywords file: {}", path.display()))?;
        keywords.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }
    keywords.extend(
        extra
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()),
    );
    Ok(keywords)
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::from(2));
    }

    std::fs::write(&config_path, default_config_json(threshold))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    eprintln!("{}: Created {}", "Info".blue(), config_path.display());
    Ok(ExitCode::SUCCESS)
}
