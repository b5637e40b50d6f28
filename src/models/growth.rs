//! Compound annual growth rate.
//!
//! `rate = (current / historical)^(1 / years) - 1`
//!
//! Inputs outside the real domain are reported, never patched: the caller
//! owns the choice of historical value and must keep it positive.

use crate::domain::GrowthInput;
use crate::error::ModelError;

/// CAGR that turns `historical_value` into `current_value` over `period_years`.
pub fn compound_annual_growth_rate(
    current_value: f64,
    historical_value: f64,
    period_years: u32,
) -> Result<f64, ModelError> {
    if period_years == 0 {
        return Err(ModelError::InvalidPeriod);
    }
    if !(current_value.is_finite() && historical_value.is_finite())
        || current_value < 0.0
        || historical_value < 0.0
    {
        return Err(ModelError::InvalidDomain {
            current: current_value,
            historical: historical_value,
        });
    }
    if historical_value == 0.0 {
        return Err(ModelError::DivisionByZero);
    }

    Ok((current_value / historical_value).powf(1.0 / f64::from(period_years)) - 1.0)
}

impl GrowthInput {
    pub fn rate(&self) -> Result<f64, ModelError> {
        compound_annual_growth_rate(self.current_value, self.historical_value, self.period_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_growth_is_zero_rate() {
        for &x in &[1.0, 70_000.0, 123_456.78] {
            for n in 1..=5 {
                let r = compound_annual_growth_rate(x, x, n).unwrap();
                assert!(r.abs() < 1e-12, "x={x} n={n} r={r}");
            }
        }
    }

    #[test]
    fn doubling_in_one_year_is_one_hundred_percent() {
        for &h in &[1.0, 95_000.0, 0.5] {
            let r = compound_annual_growth_rate(2.0 * h, h, 1).unwrap();
            assert!((r - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn multi_year_rate_compounds_back_to_current() {
        let r = compound_annual_growth_rate(121.0, 100.0, 2).unwrap();
        assert!((r - 0.1).abs() < 1e-12);
    }

    #[test]
    fn markdown_of_five_percent() {
        let r = compound_annual_growth_rate(70_000.0, 70_000.0 * 0.95, 1).unwrap();
        assert!((r - (1.0 / 0.95 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_historical_is_division_by_zero() {
        assert_eq!(
            compound_annual_growth_rate(100.0, 0.0, 1),
            Err(ModelError::DivisionByZero)
        );
    }

    #[test]
    fn negative_inputs_are_invalid_domain() {
        assert!(matches!(
            compound_annual_growth_rate(-1.0, 100.0, 2),
            Err(ModelError::InvalidDomain { .. })
        ));
        assert!(matches!(
            compound_annual_growth_rate(100.0, -5.0, 1),
            Err(ModelError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn zero_period_is_rejected() {
        assert_eq!(
            compound_annual_growth_rate(100.0, 90.0, 0),
            Err(ModelError::InvalidPeriod)
        );
    }

    #[test]
    fn growth_input_delegates() {
        let input = GrowthInput {
            current_value: 200.0,
            historical_value: 100.0,
            period_years: 1,
        };
        assert!((input.rate().unwrap() - 1.0).abs() < 1e-12);
    }
}
