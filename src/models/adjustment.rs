//! Adjustment chain: inflation + growth, skills, then demand + geography.
//!
//! Order matters. Each stage multiplies the previous stage's output:
//!
//! ```text
//! s1 = base * (1 + inflation + growth)
//! s2 = s1   * (1 + Σ skill premiums)
//! s3 = s2   * (1 + demand + geographic)
//! ```
//!
//! Inflation and growth are summed into one rate and applied once; they are
//! not compounded separately.

use crate::domain::{Money, SkillFactorMap};

/// The per-stage values of one projection, useful for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentStages {
    pub after_growth_and_inflation: Money,
    pub after_skills: Money,
    pub final_value: Money,
}

/// Run every stage and keep the intermediate values.
pub fn project_stages(
    base: Money,
    inflation_rate: f64,
    growth_rate: f64,
    skill_factors: &SkillFactorMap,
    demand_factor: f64,
    geographic_factor: f64,
) -> AdjustmentStages {
    let after_growth_and_inflation = base * (1.0 + inflation_rate + growth_rate);
    let after_skills = after_growth_and_inflation * (1.0 + skill_factors.total_premium());
    let final_value = after_skills * (1.0 + demand_factor + geographic_factor);

    AdjustmentStages {
        after_growth_and_inflation,
        after_skills,
        final_value,
    }
}

/// Projected salary at full precision.
pub fn project_salary(
    base: Money,
    inflation_rate: f64,
    growth_rate: f64,
    skill_factors: &SkillFactorMap,
    demand_factor: f64,
    geographic_factor: f64,
) -> Money {
    project_stages(
        base,
        inflation_rate,
        growth_rate,
        skill_factors,
        demand_factor,
        geographic_factor,
    )
    .final_value
}

/// Round to cents for presentation.
pub fn round_cents(value: Money) -> Money {
    (value * 100.0).round() / 100.0
}
