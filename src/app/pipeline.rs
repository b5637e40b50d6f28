//! Shared pipeline logic used by the CLI subcommands.
//!
//! Projection: tables -> factors -> growth -> adjustment chain -> rows.
//! Extraction: text -> tagger -> tag merge -> postings.
//!
//! The two pipelines share types only; extraction never feeds projection.

use log::{debug, warn};

use crate::data::{HttpTableFetcher, InputTables, TableFetcher, load_input_tables};
use crate::domain::{
    FactorTable, GrowthInput, ProjectedSalary, ProjectionConfig, RoleFailure, RoleSalaryBase,
    SkillFactorMap, StructuredPosting, Tier,
};
use crate::error::{AppError, ModelError, RetrievalFailure};
use crate::extract::{Tagger, merge_tagged_tokens};
use crate::models::{project_salary, resolve_factor};

/// All computed outputs of a single projection run.
///
/// Every role of the salary table ends up in exactly one of `rows` or
/// `failures`; both keep table order.
#[derive(Debug, Clone)]
pub struct ProjectionRun {
    pub base_year: i32,
    pub year: i32,
    pub rows: Vec<ProjectedSalary>,
    pub failures: Vec<RoleFailure>,
    pub tables: InputTables,
}

impl ProjectionRun {
    /// Projected rows paired with the base salaries they came from.
    pub fn projected(&self) -> impl Iterator<Item = (&RoleSalaryBase, &ProjectedSalary)> {
        let failures = &self.failures;
        self.tables
            .salaries
            .value()
            .iter()
            .enumerate()
            .filter(move |(idx, _)| !failures.iter().any(|f| f.position == *idx))
            .map(|(_, base)| base)
            .zip(&self.rows)
    }
}

/// Load the input tables (remote or fallback) and project every role.
pub fn run_projection(config: &ProjectionConfig) -> Result<ProjectionRun, AppError> {
    let tables = if config.offline {
        InputTables::from_fallbacks("offline mode")
    } else {
        resolve_input_tables(HttpTableFetcher::new(config.timeout_secs), config)
    };

    run_projection_with_tables(config, tables)
}

/// Fetch through `fetcher`, or use every fallback table if it could not be built.
pub fn resolve_input_tables<F: TableFetcher>(
    fetcher: Result<F, RetrievalFailure>,
    config: &ProjectionConfig,
) -> InputTables {
    match fetcher {
        Ok(fetcher) => load_input_tables(&fetcher, &config.urls, config.base_year),
        Err(err) => {
            warn!("HTTP client unavailable: {err}. Using fallback data for every table.");
            InputTables::from_fallbacks(&err.to_string())
        }
    }
}

/// Project every role from already-resolved tables.
///
/// A role the growth model rejects is recorded in `failures`; the other roles
/// are still projected.
pub fn run_projection_with_tables(
    config: &ProjectionConfig,
    tables: InputTables,
) -> Result<ProjectionRun, AppError> {
    validate_config(config)?;

    let mut rows = Vec::new();
    let mut failures = Vec::new();
    for (position, base) in tables.salaries.value().iter().enumerate() {
        match project_role(
            base,
            tables.demand.value(),
            tables.geographic.value(),
            tables.skills.value(),
            config,
        ) {
            Ok(row) => rows.push(row),
            Err(err) => {
                warn!("Skipping projection for '{}': {err}", base.role);
                failures.push(RoleFailure {
                    position,
                    role: base.role.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(ProjectionRun {
        base_year: config.base_year,
        year: config.target_year(),
        rows,
        failures,
        tables,
    })
}

/// Project one role across all tiers.
///
/// The historical value for each tier is `base * markdown`, so the growth
/// rate is defined as long as the base salary and markdown are positive.
pub fn project_role(
    base: &RoleSalaryBase,
    demand: &FactorTable,
    geographic: &FactorTable,
    skills: &SkillFactorMap,
    config: &ProjectionConfig,
) -> Result<ProjectedSalary, ModelError> {
    let demand_factor = resolve_factor(demand, &base.role);
    let geographic_factor = resolve_factor(geographic, &base.role);

    let project_tier = |tier: Tier| -> Result<f64, ModelError> {
        let current = base.salary(tier);
        let growth_rate = GrowthInput {
            current_value: current,
            historical_value: current * config.markdowns.get(tier),
            period_years: config.growth_period_years,
        }
        .rate()?;

        let projected = project_salary(
            current,
            config.inflation_rate,
            growth_rate,
            skills,
            demand_factor,
            geographic_factor,
        );
        debug!(
            "{} {}: base={current:.2} growth={growth_rate:.4} -> {projected:.2}",
            base.role,
            tier.display_name()
        );
        Ok(projected)
    };

    Ok(ProjectedSalary {
        role: base.role.clone(),
        entry_level: project_tier(Tier::Entry)?,
        mid_level: project_tier(Tier::Mid)?,
        senior_level: project_tier(Tier::Senior)?,
    })
}

/// Reject configurations the models cannot handle.
pub fn validate_config(config: &ProjectionConfig) -> Result<(), AppError> {
    if !config.inflation_rate.is_finite() {
        return Err(AppError::new(2, "Inflation rate must be finite."));
    }
    if config.growth_period_years == 0 {
        return Err(AppError::new(2, "Growth period must be >= 1 year."));
    }
    for tier in Tier::ALL {
        let m = config.markdowns.get(tier);
        if !(m.is_finite() && m > 0.0 && m <= 1.0) {
            return Err(AppError::new(
                2,
                format!(
                    "Invalid {} markdown {m}: must be in (0, 1].",
                    tier.display_name()
                ),
            ));
        }
    }
    Ok(())
}

/// Extraction result for one input text.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Extracted(StructuredPosting),
    Unavailable(String),
}

/// Tag and merge each text in order. A tagger failure only affects its own text.
pub fn run_extraction<S: AsRef<str>>(tagger: &dyn Tagger, texts: &[S]) -> Vec<ExtractionOutcome> {
    texts
        .iter()
        .enumerate()
        .map(|(idx, text)| match tagger.tag(text.as_ref()) {
            Ok(tokens) => ExtractionOutcome::Extracted(merge_tagged_tokens(&tokens)),
            Err(err) => {
                warn!("Extraction unavailable for input #{}: {err}", idx + 1);
                ExtractionOutcome::Unavailable(err.to_string())
            }
        })
        .collect()
}
