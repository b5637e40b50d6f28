//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - runs the projection and/or extraction pipelines
//! - prints reports
//! - writes optional exports

use std::fs;
use std::path::Path;

use clap::Parser;

use crate::cli::{Command, EstimateArgs, ExtractArgs, ExtractionSource, ProjectArgs};
use crate::domain::{ProjectionConfig, TableUrls, TaggerKind, TierMarkdowns};
use crate::error::AppError;
use crate::extract::{HttpNerTagger, LexiconTagger, SAMPLE_DESCRIPTIONS, Tagger};

pub mod pipeline;

/// Entry point for the `salcast` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Project(args) => handle_project(args),
        Command::Extract(args) => handle_extract(args),
        Command::Estimate(args) => handle_estimate(args),
    }
}

fn handle_project(args: ProjectArgs) -> Result<(), AppError> {
    let config = projection_config_from_args(&args);
    let run = pipeline::run_projection(&config)?;

    println!("{}", crate::report::format_projection_table(&run));
    println!("{}", crate::report::format_sources(&run.tables));

    if args.extract {
        let texts = load_texts(&args.source)?;
        let roles = run.rows.iter().map(|r| r.role.as_str());
        let tagger = build_tagger(&args.source, args.timeout, roles)?;
        let outcomes = pipeline::run_extraction(tagger.as_ref(), &texts);
        println!("{}", crate::report::format_postings(&outcomes));
    }

    if let Some(path) = &config.export_csv {
        crate::io::export::write_projections_csv(path, &run)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::report::write_report_json(path, &run, &config)?;
    }

    Ok(())
}

fn handle_extract(args: ExtractArgs) -> Result<(), AppError> {
    let texts = load_texts(&args.source)?;
    let tagger = build_tagger(&args.source, args.timeout, std::iter::empty::<&str>())?;
    let outcomes = pipeline::run_extraction(tagger.as_ref(), &texts);
    println!("{}", crate::report::format_postings(&outcomes));
    Ok(())
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    validate_estimate(&args)?;
    let estimate = crate::models::weighted_regression(
        args.base,
        args.experience,
        args.skills_premium,
        args.location_factor,
    );
    println!("{}", crate::report::format_estimate(&args, estimate));
    Ok(())
}

fn validate_estimate(args: &EstimateArgs) -> Result<(), AppError> {
    let inputs = [
        ("--base", args.base),
        ("--experience", args.experience),
        ("--skills-premium", args.skills_premium),
        ("--location-factor", args.location_factor),
    ];
    for (flag, value) in inputs {
        if !value.is_finite() {
            return Err(AppError::new(2, format!("{flag} must be finite, got {value}.")));
        }
    }
    Ok(())
}

pub fn projection_config_from_args(args: &ProjectArgs) -> ProjectionConfig {
    ProjectionConfig {
        urls: TableUrls {
            salary: args.salary_url.clone(),
            demand: args.demand_url.clone(),
            geographic: args.geographic_url.clone(),
            skills: args.skills_url.clone(),
        },
        offline: args.offline,
        timeout_secs: args.timeout,
        base_year: args.base_year,
        inflation_rate: args.inflation,
        markdowns: TierMarkdowns {
            entry: args.entry_markdown,
            mid: args.mid_markdown,
            senior: args.senior_markdown,
        },
        growth_period_years: args.period,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Posting texts from `--text`, `--input`, or the built-in samples.
fn load_texts(source: &ExtractionSource) -> Result<Vec<String>, AppError> {
    let mut texts = source.texts.clone();
    if let Some(path) = &source.input {
        texts.extend(read_lines(path)?);
    }
    if texts.is_empty() {
        texts = SAMPLE_DESCRIPTIONS.iter().map(|s| s.to_string()).collect();
    }
    Ok(texts)
}

fn read_lines(path: &Path) -> Result<Vec<String>, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn build_tagger<'a>(
    source: &ExtractionSource,
    timeout_secs: u64,
    known_roles: impl IntoIterator<Item = &'a str>,
) -> Result<Box<dyn Tagger>, AppError> {
    match source.tagger {
        TaggerKind::Lexicon => Ok(Box::new(LexiconTagger::with_extra_roles(known_roles))),
        TaggerKind::Remote => {
            let url = source.ner_url.clone().ok_or_else(|| {
                AppError::new(2, "`--tagger remote` needs --ner-url (or NER_API_URL).")
            })?;
            Ok(Box::new(HttpNerTagger::new(url, source.ner_token.clone(), timeout_secs)?))
        }
    }
}

/// Rewrite argv so `salcast` defaults to `salcast project`.
///
/// Rules:
/// - `salcast`                      -> `salcast project`
/// - `salcast --offline ...`        -> `salcast project --offline ...`
/// - `salcast --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("project".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "project" | "extract" | "estimate");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "project".to_string());
        return argv;
    }

    argv
}
