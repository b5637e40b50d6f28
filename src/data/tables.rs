//! Mapping raw JSON tables into typed records.
//!
//! Remote tables use display-style keys (`"Entry-Level 2024"`,
//! `"Demand Factor"`). They are converted here, once, so the projection code
//! only ever sees `RoleSalaryBase`, `FactorTable` and `SkillFactorMap`.
//!
//! Invalid rows are logged and skipped. A table is `Malformed` only when it is
//! not an array of rows or none of its rows is usable.

use std::collections::BTreeMap;

use log::warn;
use serde_json::{Map, Value};

use crate::domain::{FactorTable, RoleSalaryBase, SkillFactorMap, Tier};
use crate::error::RetrievalFailure;

const ROLE_KEY: &str = "Role";

/// Salary table: `[{"Role": .., "Entry-Level <Y>": .., "Mid-Level <Y>": .., "Senior-Level <Y>": ..}]`.
pub fn map_salary_table(raw: &Value, base_year: i32) -> Result<Vec<RoleSalaryBase>, RetrievalFailure> {
    let items = as_array(raw)?;

    let out: Vec<RoleSalaryBase> = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| keep_valid("salary", salary_row(item, idx, base_year)))
        .collect();

    if out.is_empty() {
        return Err(malformed(format!("salary table has no valid roles ({} rows)", items.len())));
    }
    Ok(out)
}

/// Factor table: `[{"Role": .., "<factor_key>": ..}]`.
///
/// Roles whose row was skipped resolve to a neutral factor later on.
pub fn map_factor_table(raw: &Value, factor_key: &str) -> Result<FactorTable, RetrievalFailure> {
    let items = as_array(raw)?;

    let valid: Vec<(&str, f64)> = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| keep_valid(factor_key, factor_row(item, idx, factor_key)))
        .collect();

    if valid.is_empty() && !items.is_empty() {
        return Err(malformed(format!("no valid '{factor_key}' rows ({} rows)", items.len())));
    }
    Ok(valid.into_iter().collect())
}

fn salary_row(item: &Value, idx: usize, base_year: i32) -> Result<RoleSalaryBase, RetrievalFailure> {
    let row = as_row(item, idx)?;
    let role = role_of(row, idx)?;
    let salary = |tier: Tier| -> Result<f64, RetrievalFailure> {
        let key = tier.column(base_year);
        let v = number_of(row, &key, idx)?;
        if !(v.is_finite() && v > 0.0) {
            return Err(malformed(format!("row {idx} ('{role}'): '{key}' must be > 0, got {v}")));
        }
        Ok(v)
    };

    Ok(RoleSalaryBase {
        role: role.to_string(),
        entry_level: salary(Tier::Entry)?,
        mid_level: salary(Tier::Mid)?,
        senior_level: salary(Tier::Senior)?,
    })
}

fn factor_row<'a>(item: &'a Value, idx: usize, factor_key: &str) -> Result<(&'a str, f64), RetrievalFailure> {
    let row = as_row(item, idx)?;
    let role = role_of(row, idx)?;
    let factor = number_of(row, factor_key, idx)?;
    if !factor.is_finite() {
        return Err(malformed(format!("row {idx} ('{role}'): non-finite '{factor_key}'")));
    }
    Ok((role, factor))
}

fn keep_valid<T>(table: &str, row: Result<T, RetrievalFailure>) -> Option<T> {
    match row {
        Ok(row) => Some(row),
        Err(err) => {
            warn!("Skipping {table} row: {err}");
            None
        }
    }
}

/// Skill table: `{"<skill>": <premium>, ..}`.
pub fn map_skill_table(raw: &Value) -> Result<SkillFactorMap, RetrievalFailure> {
    let premiums: BTreeMap<String, f64> = serde_json::from_value(raw.clone())
        .map_err(|e| malformed(format!("skill table: {e}")))?;
    Ok(premiums.into_iter().collect())
}

fn as_array(raw: &Value) -> Result<&Vec<Value>, RetrievalFailure> {
    raw.as_array()
        .ok_or_else(|| malformed("expected a JSON array of rows"))
}

fn as_row(item: &Value, idx: usize) -> Result<&Map<String, Value>, RetrievalFailure> {
    item.as_object()
        .ok_or_else(|| malformed(format!("row {idx} is not an object")))
}

fn role_of(row: &Map<String, Value>, idx: usize) -> Result<&str, RetrievalFailure> {
    row.get(ROLE_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("row {idx}: missing string '{ROLE_KEY}'")))
}

fn number_of(row: &Map<String, Value>, key: &str, idx: usize) -> Result<f64, RetrievalFailure> {
    row.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed(format!("row {idx}: missing numeric '{key}'")))
}

fn malformed(msg: impl Into<String>) -> RetrievalFailure {
    RetrievalFailure::Malformed(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FactorLookup;
    use serde_json::json;

    #[test]
    fn salary_rows_map_by_year_columns() {
        let raw = json!([
            {"Role": "Data Analyst", "Entry-Level 2024": 70000, "Mid-Level 2024": 95000, "Senior-Level 2024": 120000.5}
        ]);
        let rows = map_salary_table(&raw, 2024).unwrap();
        assert_eq!(
            rows,
            vec![RoleSalaryBase {
                role: "Data Analyst".into(),
                entry_level: 70000.0,
                mid_level: 95000.0,
                senior_level: 120000.5,
            }]
        );
    }

    #[test]
    fn salary_row_missing_column_is_skipped() {
        let raw = json!([
            {"Role": "QA Engineer", "Entry-Level 2024": 60000, "Mid-Level 2024": 80000, "Senior-Level 2024": 100000},
            {"Role": "Intern", "Entry-Level 2024": 30000, "Mid-Level 2024": 35000}
        ]);
        let rows = map_salary_table(&raw, 2024).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].role, "QA Engineer");
    }

    #[test]
    fn salary_row_with_non_positive_salary_is_skipped() {
        let raw = json!([
            {"Role": "Intern", "Entry-Level 2024": 0, "Mid-Level 2024": 1, "Senior-Level 2024": 2},
            "not a row",
            {"Role": "Tester", "Entry-Level 2024": 1, "Mid-Level 2024": 2, "Senior-Level 2024": 3}
        ]);
        let rows = map_salary_table(&raw, 2024).unwrap();
        let roles: Vec<_> = rows.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(roles, vec!["Tester"]);
    }

    #[test]
    fn salary_table_without_valid_rows_is_malformed() {
        let raw = json!([{"Role": "Data Analyst", "Entry-Level 2024": 70000, "Mid-Level 2024": 95000}]);
        let err = map_salary_table(&raw, 2024).unwrap_err();
        assert!(matches!(err, RetrievalFailure::Malformed(ref m) if m.contains("no valid roles")));
    }

    #[test]
    fn salary_table_rejects_empty_and_non_array() {
        assert!(map_salary_table(&json!([]), 2024).is_err());
        assert!(map_salary_table(&json!({"Role": "x"}), 2024).is_err());
    }

    #[test]
    fn factor_rows_keep_zero_and_negative() {
        let raw = json!([
            {"Role": "Data Analyst", "Demand Factor": 0.0},
            {"Role": "Typist", "Demand Factor": -0.3},
            {"Role": "Data Analyst", "Demand Factor": 0.5}
        ]);
        let table = map_factor_table(&raw, "Demand Factor").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("Data Analyst"), FactorLookup::Present(0.0));
        assert_eq!(table.lookup("Typist"), FactorLookup::Present(-0.3));
    }

    #[test]
    fn bad_factor_row_is_skipped_and_resolves_neutral() {
        let raw = json!([
            {"Role": "Data Analyst", "Geographic Factor": 0.04},
            {"Role": "Data Scientist", "Geographic Factor": "high"},
            {"Geographic Factor": 0.5}
        ]);
        let table = map_factor_table(&raw, "Geographic Factor").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("Data Analyst"), FactorLookup::Present(0.04));
        assert_eq!(table.lookup("Data Scientist"), FactorLookup::Unavailable);
    }

    #[test]
    fn empty_factor_table_is_valid() {
        assert!(map_factor_table(&json!([]), "Demand Factor").unwrap().is_empty());
    }

    #[test]
    fn factor_table_rejects_wrong_key() {
        let raw = json!([{"Role": "Data Analyst", "Demand Factor": 0.1}]);
        assert!(map_factor_table(&raw, "Geographic Factor").is_err());
    }

    #[test]
    fn skill_table_sums() {
        let raw = json!({"Python": 0.05, "SQL": 0.03, "MachineLearning": 0.02});
        let skills = map_skill_table(&raw).unwrap();
        assert_eq!(skills.len(), 3);
        assert!((skills.total_premium() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn skill_table_rejects_non_numeric() {
        assert!(map_skill_table(&json!({"Python": "high"})).is_err());
        assert!(map_skill_table(&json!([1, 2])).is_err());
    }
}
