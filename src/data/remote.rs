//! Remote table retrieval with per-table fallback.
//!
//! Each of the four input tables is fetched independently. Any failure
//! (transport, non-2xx, undecodable or unmappable body) is logged and the
//! static fallback table is substituted; retrieval never aborts a run.

use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::data::fallback;
use crate::data::tables::{map_factor_table, map_salary_table, map_skill_table};
use crate::domain::{FactorTable, RoleSalaryBase, SkillFactorMap, TableUrls};
use crate::error::RetrievalFailure;

pub const DEFAULT_SALARY_URL: &str = "https://api.mockdatasalary.com/salaries";
pub const DEFAULT_DEMAND_URL: &str = "https://api.mockjobdemand.com/demand";
pub const DEFAULT_GEOGRAPHIC_URL: &str = "https://api.mockgeographic.com/factors";
pub const DEFAULT_SKILLS_URL: &str = "https://api.mockskills.com/premiums";

const DEMAND_KEY: &str = "Demand Factor";
const GEOGRAPHIC_KEY: &str = "Geographic Factor";

/// Source of raw JSON tables.
pub trait TableFetcher: Sync {
    fn fetch_json(&self, url: &str) -> Result<Value, RetrievalFailure>;
}

/// `TableFetcher` over HTTP GET.
pub struct HttpTableFetcher {
    client: Client,
}

impl HttpTableFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, RetrievalFailure> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RetrievalFailure::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl TableFetcher for HttpTableFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value, RetrievalFailure> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| RetrievalFailure::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(RetrievalFailure::Status(resp.status().as_u16()));
        }

        resp.json::<Value>()
            .map_err(|e| RetrievalFailure::Malformed(format!("invalid JSON body: {e}")))
    }
}

/// A table together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    Remote(T),
    Fallback { value: T, reason: String },
}

impl<T> Sourced<T> {
    pub fn value(&self) -> &T {
        match self {
            Sourced::Remote(value) | Sourced::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Sourced::Fallback { .. })
    }

    /// Short label for reports: `remote` or `fallback (<reason>)`.
    pub fn describe(&self) -> String {
        match self {
            Sourced::Remote(_) => "remote".to_string(),
            Sourced::Fallback { reason, .. } => format!("fallback ({reason})"),
        }
    }
}

/// The four inputs of the projection pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTables {
    pub salaries: Sourced<Vec<RoleSalaryBase>>,
    pub demand: Sourced<FactorTable>,
    pub geographic: Sourced<FactorTable>,
    pub skills: Sourced<SkillFactorMap>,
}

impl InputTables {
    /// Every table from its fallback, tagged with `reason`.
    pub fn from_fallbacks(reason: &str) -> Self {
        Self {
            salaries: Sourced::Fallback {
                value: fallback::salaries(),
                reason: reason.to_string(),
            },
            demand: Sourced::Fallback {
                value: fallback::demand_factors(),
                reason: reason.to_string(),
            },
            geographic: Sourced::Fallback {
                value: fallback::geographic_factors(),
                reason: reason.to_string(),
            },
            skills: Sourced::Fallback {
                value: fallback::skill_premiums(),
                reason: reason.to_string(),
            },
        }
    }
}

/// Fetch and map all four tables concurrently, falling back per table.
pub fn load_input_tables(fetcher: &dyn TableFetcher, urls: &TableUrls, base_year: i32) -> InputTables {
    let ((salaries, demand), (geographic, skills)) = rayon::join(
        || {
            rayon::join(
                || {
                    resolve_table(
                        fetcher,
                        "salary",
                        &urls.salary,
                        |v| map_salary_table(v, base_year),
                        fallback::salaries,
                    )
                },
                || {
                    resolve_table(
                        fetcher,
                        "demand",
                        &urls.demand,
                        |v| map_factor_table(v, DEMAND_KEY),
                        fallback::demand_factors,
                    )
                },
            )
        },
        || {
            rayon::join(
                || {
                    resolve_table(
                        fetcher,
                        "geographic",
                        &urls.geographic,
                        |v| map_factor_table(v, GEOGRAPHIC_KEY),
                        fallback::geographic_factors,
                    )
                },
                || {
                    resolve_table(
                        fetcher,
                        "skills",
                        &urls.skills,
                        map_skill_table,
                        fallback::skill_premiums,
                    )
                },
            )
        },
    );

    InputTables {
        salaries,
        demand,
        geographic,
        skills,
    }
}

fn resolve_table<T>(
    fetcher: &dyn TableFetcher,
    name: &str,
    url: &str,
    map: impl FnOnce(&Value) -> Result<T, RetrievalFailure>,
    fallback: impl FnOnce() -> T,
) -> Sourced<T> {
    match fetcher.fetch_json(url).and_then(|raw| map(&raw)) {
        Ok(value) => {
            info!("Loaded {name} table from {url}.");
            Sourced::Remote(value)
        }
        Err(err) => {
            warn!("Failed to fetch {name} table from {url}: {err}. Using fallback data.");
            Sourced::Fallback {
                value: fallback(),
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticFetcher;

    impl TableFetcher for StaticFetcher {
        fn fetch_json(&self, url: &str) -> Result<Value, RetrievalFailure> {
            match url {
                "salary" => Ok(json!([
                    {"Role": "QA Engineer", "Entry-Level 2024": 60000, "Mid-Level 2024": 80000, "Senior-Level 2024": 100000}
                ])),
                "demand" => Ok(json!([{"Role": "QA Engineer", "Demand Factor": 0.0}])),
                "geographic" => Err(RetrievalFailure::Status(503)),
                "skills" => Ok(json!({"Rust": 0.1})),
                _ => Err(RetrievalFailure::Transport("unknown url".into())),
            }
        }
    }

    fn urls() -> TableUrls {
        TableUrls {
            salary: "salary".into(),
            demand: "demand".into(),
            geographic: "geographic".into(),
            skills: "skills".into(),
        }
    }

    #[test]
    fn each_table_falls_back_independently() {
        let tables = load_input_tables(&StaticFetcher, &urls(), 2024);

        assert!(!tables.salaries.is_fallback());
        assert_eq!(tables.salaries.value()[0].role, "QA Engineer");
        assert!(!tables.demand.is_fallback());
        assert!(!tables.skills.is_fallback());

        assert!(tables.geographic.is_fallback());
        assert_eq!(tables.geographic.value(), &fallback::geographic_factors());
        assert_eq!(tables.geographic.describe(), "fallback (request failed with status 503)");
    }

    #[test]
    fn unmappable_body_falls_back() {
        let mut u = urls();
        u.salary = "skills".into();
        let tables = load_input_tables(&StaticFetcher, &u, 2024);
        assert!(tables.salaries.is_fallback());
        assert_eq!(tables.salaries.value(), &fallback::salaries());
    }

    #[test]
    fn wrong_base_year_falls_back() {
        let tables = load_input_tables(&StaticFetcher, &urls(), 2030);
        assert!(tables.salaries.is_fallback());
    }

    #[test]
    fn unreachable_host_falls_back() {
        // Port 9 (discard) is closed on any sane test host.
        let fetcher = HttpTableFetcher::new(2).unwrap();
        let result = fetcher.fetch_json("http://127.0.0.1:9/salaries");
        assert!(matches!(result, Err(RetrievalFailure::Transport(_))));
    }

    #[test]
    fn from_fallbacks_marks_every_table() {
        let tables = InputTables::from_fallbacks("offline mode");
        assert_eq!(tables.salaries.describe(), "fallback (offline mode)");
        assert!(tables.demand.is_fallback());
        assert!(tables.geographic.is_fallback());
        assert!(tables.skills.is_fallback());
    }
}
