//! Linear salary estimate from experience, skills and location.

use crate::domain::Money;

const PER_EXPERIENCE_YEAR: f64 = 10_000.0;
const PER_SKILLS_PREMIUM: f64 = 20_000.0;
const PER_LOCATION_FACTOR: f64 = 30_000.0;

/// `base + 10000·experience + 20000·skills_premium + 30000·location_factor`
pub fn weighted_regression(
    base_salary: Money,
    experience_years: f64,
    skills_premium: f64,
    location_factor: f64,
) -> Money {
    base_salary
        + PER_EXPERIENCE_YEAR * experience_years
        + PER_SKILLS_PREMIUM * skills_premium
        + PER_LOCATION_FACTOR * location_factor
}
