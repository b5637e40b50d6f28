//! Shared domain types.
//!
//! These are plain value objects, created fresh per run:
//!
//! - loaded tables (`RoleSalaryBase`, `FactorTable`, `SkillFactorMap`)
//! - projection outputs (`ProjectedSalary`)
//! - extraction inputs/outputs (`TaggedToken`, `StructuredPosting`)

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Monetary amount in the table's currency units.
pub type Money = f64;

/// Seniority tier of a salary figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Entry,
    Mid,
    Senior,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Entry, Tier::Mid, Tier::Senior];

    pub fn display_name(self) -> &'static str {
        match self {
            Tier::Entry => "Entry-Level",
            Tier::Mid => "Mid-Level",
            Tier::Senior => "Senior-Level",
        }
    }

    /// Column name used by salary tables, e.g. `Entry-Level 2024`.
    pub fn column(self, year: i32) -> String {
        format!("{} {year}", self.display_name())
    }
}

/// Base salaries for one role, one figure per tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSalaryBase {
    pub role: String,
    pub entry_level: Money,
    pub mid_level: Money,
    pub senior_level: Money,
}

impl RoleSalaryBase {
    pub fn salary(&self, tier: Tier) -> Money {
        match tier {
            Tier::Entry => self.entry_level,
            Tier::Mid => self.mid_level,
            Tier::Senior => self.senior_level,
        }
    }
}

/// Result of looking a role up in a factor table.
///
/// Keeps "stored zero" and "no entry" apart; only the resolver collapses the
/// latter to a neutral factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactorLookup {
    Present(f64),
    Unavailable,
}

impl FactorLookup {
    pub fn or_neutral(self) -> f64 {
        match self {
            FactorLookup::Present(v) => v,
            FactorLookup::Unavailable => 0.0,
        }
    }
}

/// Per-role factor (demand or geographic), keyed by exact role name.
///
/// Matching is case- and whitespace-sensitive: `"Data Analyst "` is a
/// different role from `"Data Analyst"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorTable {
    factors: HashMap<String, f64>,
}

impl FactorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the role is already present (first entry wins).
    pub fn insert_first(&mut self, role: impl Into<String>, factor: f64) {
        self.factors.entry(role.into()).or_insert(factor);
    }

    pub fn lookup(&self, role: &str) -> FactorLookup {
        match self.factors.get(role) {
            Some(v) => FactorLookup::Present(*v),
            None => FactorLookup::Unavailable,
        }
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FactorTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = FactorTable::new();
        for (role, factor) in iter {
            table.insert_first(role, factor);
        }
        table
    }
}

/// Skill name -> premium fraction. Only the sum matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillFactorMap {
    premiums: BTreeMap<String, f64>,
}

impl SkillFactorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, skill: impl Into<String>, premium: f64) {
        self.premiums.insert(skill.into(), premium);
    }

    pub fn total_premium(&self) -> f64 {
        self.premiums.values().sum()
    }

    pub fn len(&self) -> usize {
        self.premiums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.premiums.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for SkillFactorMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = SkillFactorMap::new();
        for (skill, premium) in iter {
            map.insert(skill, premium);
        }
        map
    }
}

/// A current/historical pair for the growth model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthInput {
    pub current_value: Money,
    pub historical_value: Money,
    pub period_years: u32,
}

/// Projected salaries for one role in the target year.
///
/// Values carry full precision; rounding happens only when rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSalary {
    pub role: String,
    pub entry_level: Money,
    pub mid_level: Money,
    pub senior_level: Money,
}

impl ProjectedSalary {
    pub fn salary(&self, tier: Tier) -> Money {
        match tier {
            Tier::Entry => self.entry_level,
            Tier::Mid => self.mid_level,
            Tier::Senior => self.senior_level,
        }
    }
}

/// A role whose projection could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleFailure {
    /// Index of the role in the salary table.
    pub position: usize,
    pub role: String,
    pub reason: String,
}

/// One token as labelled by the external tagger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    pub tag: String,
    pub score: f64,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, tag: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
            score,
        }
    }
}

/// Structured fields pulled out of a free-text job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredPosting {
    pub role: String,
    pub level: String,
    pub salary_range: Option<String>,
}

/// Fraction of the current salary assumed for the historical value, per tier.
///
/// `0.95` means "the salary was 5% lower one period ago".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierMarkdowns {
    pub entry: f64,
    pub mid: f64,
    pub senior: f64,
}

impl TierMarkdowns {
    pub fn get(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Entry => self.entry,
            Tier::Mid => self.mid,
            Tier::Senior => self.senior,
        }
    }
}

impl Default for TierMarkdowns {
    fn default() -> Self {
        Self {
            entry: 0.95,
            mid: 0.90,
            senior: 0.85,
        }
    }
}

/// Which tagger backs the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaggerKind {
    /// Offline keyword tagger.
    Lexicon,
    /// Remote NER inference endpoint.
    Remote,
}

/// Remote endpoints for the four input tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TableUrls {
    pub salary: String,
    pub demand: String,
    pub geographic: String,
    pub skills: String,
}

/// A full projection run's configuration as understood by the pipeline.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    pub urls: TableUrls,
    pub offline: bool,
    pub timeout_secs: u64,

    /// Year of the base salary table; projections target `base_year + 1`.
    pub base_year: i32,
    pub inflation_rate: f64,
    pub markdowns: TierMarkdowns,
    pub growth_period_years: u32,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl ProjectionConfig {
    pub fn target_year(&self) -> i32 {
        self.base_year + 1
    }
}

/// A saved projection report (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub base_year: i32,
    pub year: i32,
    pub inflation_rate: f64,
    /// Table name -> `remote` or `fallback (<reason>)`.
    pub sources: BTreeMap<String, String>,
    pub rows: Vec<ProjectedSalary>,
    #[serde(default)]
    pub failures: Vec<RoleFailure>,
}
