//! Static tables used when a remote table is unavailable.

use crate::domain::{FactorTable, RoleSalaryBase, SkillFactorMap};

const SALARIES: [(&str, f64, f64, f64); 2] = [
    ("Data Analyst", 70_000.0, 95_000.0, 120_000.0),
    ("Data Scientist", 90_000.0, 120_000.0, 150_000.0),
];

const DEMAND: [(&str, f64); 2] = [("Data Analyst", 0.10), ("Data Scientist", 0.12)];

const GEOGRAPHIC: [(&str, f64); 2] = [("Data Analyst", 0.05), ("Data Scientist", 0.07)];

const SKILLS: [(&str, f64); 3] = [("Python", 0.05), ("SQL", 0.03), ("MachineLearning", 0.02)];

pub fn salaries() -> Vec<RoleSalaryBase> {
    SALARIES
        .iter()
        .map(|&(role, entry, mid, senior)| RoleSalaryBase {
            role: role.to_string(),
            entry_level: entry,
            mid_level: mid,
            senior_level: senior,
        })
        .collect()
}

pub fn demand_factors() -> FactorTable {
    DEMAND.into_iter().collect()
}

pub fn geographic_factors() -> FactorTable {
    GEOGRAPHIC.into_iter().collect()
}

pub fn skill_premiums() -> SkillFactorMap {
    SKILLS.into_iter().collect()
}
