//! Command-line parsing for the salary projector.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! models and pipelines. Every remote endpoint can also be supplied through the
//! environment (or a `.env` file).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::{DEFAULT_DEMAND_URL, DEFAULT_GEOGRAPHIC_URL, DEFAULT_SALARY_URL, DEFAULT_SKILLS_URL};
use crate::domain::TaggerKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "salcast", version, about = "Multi-factor salary projection and job-posting extraction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project next-year salaries per role and tier (the default command).
    Project(ProjectArgs),
    /// Extract role, level and salary range from job-posting text.
    Extract(ExtractArgs),
    /// Linear salary estimate from experience, skills premium and location.
    Estimate(EstimateArgs),
}

/// Options for the projection pipeline.
#[derive(Debug, Parser, Clone)]
pub struct ProjectArgs {
    /// Salary base table endpoint.
    #[arg(long, env = "SALARY_API_URL", default_value = DEFAULT_SALARY_URL)]
    pub salary_url: String,

    /// Demand factor table endpoint.
    #[arg(long, env = "DEMAND_API_URL", default_value = DEFAULT_DEMAND_URL)]
    pub demand_url: String,

    /// Geographic factor table endpoint.
    #[arg(long, env = "GEOGRAPHIC_API_URL", default_value = DEFAULT_GEOGRAPHIC_URL)]
    pub geographic_url: String,

    /// Skill premium table endpoint.
    #[arg(long, env = "SKILLS_API_URL", default_value = DEFAULT_SKILLS_URL)]
    pub skills_url: String,

    /// Skip HTTP entirely and use the built-in fallback tables.
    #[arg(long)]
    pub offline: bool,

    /// HTTP timeout in seconds (tables and remote tagger).
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Year of the salary base table; projections target the following year.
    #[arg(long, default_value_t = 2024)]
    pub base_year: i32,

    /// Annual inflation rate (decimal).
    #[arg(long, default_value_t = 0.025, allow_negative_numbers = true)]
    pub inflation: f64,

    /// Historical entry-level salary as a fraction of the current one.
    #[arg(long, default_value_t = 0.95)]
    pub entry_markdown: f64,

    /// Historical mid-level salary as a fraction of the current one.
    #[arg(long, default_value_t = 0.90)]
    pub mid_markdown: f64,

    /// Historical senior-level salary as a fraction of the current one.
    #[arg(long, default_value_t = 0.85)]
    pub senior_markdown: f64,

    /// Years between the historical and current salary.
    #[arg(long, default_value_t = 1)]
    pub period: u32,

    /// Also run the extraction pipeline and print its table.
    #[arg(long)]
    pub extract: bool,

    #[command(flatten)]
    pub source: ExtractionSource,

    /// Export per-role, per-tier projections to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full projection report to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for the extraction pipeline only.
#[derive(Debug, Parser, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub source: ExtractionSource,

    /// HTTP timeout in seconds for the remote tagger.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

/// Where posting text comes from and how it is tagged.
#[derive(Debug, Args, Clone)]
pub struct ExtractionSource {
    /// Posting text (repeatable).
    #[arg(long = "text", value_name = "TEXT")]
    pub texts: Vec<String>,

    /// File with one posting per line.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Tagger backend.
    #[arg(long, value_enum, default_value_t = TaggerKind::Lexicon)]
    pub tagger: TaggerKind,

    /// Token-classification endpoint for `--tagger remote`.
    #[arg(long, env = "NER_API_URL")]
    pub ner_url: Option<String>,

    /// Bearer token for the token-classification endpoint.
    #[arg(long, env = "NER_API_TOKEN", hide_env_values = true)]
    pub ner_token: Option<String>,
}

/// Options for the regression estimate.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Base salary.
    #[arg(long)]
    pub base: f64,

    /// Years of experience.
    #[arg(long, default_value_t = 0.0)]
    pub experience: f64,

    /// Total skills premium (decimal).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub skills_premium: f64,

    /// Location factor (decimal).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub location_factor: f64,
}
