//! Retirement savings projection
//!
//! Compounds a present balance plus monthly contributions forward at a fixed
//! monthly return, producing the nominal future value, its inflation-adjusted
//! counterpart, and a year-by-year series for charting.

use serde::{Deserialize, Serialize};

use crate::numeric::finite_or;

/// Inputs for a retirement projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlan {
    pub current_age: u32,
    pub retire_age: u32,
    /// Balance already saved
    pub current_savings: f64,
    /// Contribution added at the end of every month
    pub monthly_contribution: f64,
    /// Expected nominal annual return, in percent
    pub annual_return_pct: f64,
    /// Assumed annual inflation, in percent
    pub annual_inflation_pct: f64,
}

/// Balance sampled at the end of a projection year, in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyPoint {
    /// Years from now, starting at 1
    pub year: u32,
    pub nominal: i64,
    /// Nominal deflated back to today's purchasing power
    pub real: i64,
}

/// Projection output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementProjection {
    pub nominal_future_value: f64,
    /// Future value in today's purchasing power
    pub real_future_value: f64,
    pub yearly_series: Vec<YearlyPoint>,
}

/// Project savings from the current age to the retirement age.
///
/// A retirement age at or below the current age projects nothing: both
/// future values equal the current savings and the series is empty.
pub fn project(plan: &RetirementPlan) -> RetirementProjection {
    let savings = finite_or(plan.current_savings, 0.0);
    let contribution = finite_or(plan.monthly_contribution, 0.0);
    let months = plan.retire_age.saturating_sub(plan.current_age).saturating_mul(12);
    let r = finite_or(plan.annual_return_pct, 0.0) / 1200.0;
    let i = finite_or(plan.annual_inflation_pct, 0.0) / 1200.0;

    if months == 0 {
        return RetirementProjection {
            nominal_future_value: savings,
            real_future_value: savings,
            yearly_series: Vec::new(),
        };
    }

    let growth = (1.0 + r).powf(f64::from(months));
    let contribution_growth = if r == 0.0 {
        contribution * f64::from(months)
    } else {
        contribution * (growth - 1.0) / r
    };
    let nominal_future_value = savings * growth + contribution_growth;
    let real_future_value = if i > 0.0 {
        nominal_future_value / (1.0 + i).powf(f64::from(months))
    } else {
        nominal_future_value
    };

    let mut yearly_series = Vec::with_capacity((months / 12) as usize);
    let mut balance = savings;
    for month in 1..=months {
        balance = balance * (1.0 + r) + contribution;
        if month % 12 == 0 {
            let deflator = if i > 0.0 {
                (1.0 + i).powf(f64::from(month))
            } else {
                1.0
            };
            yearly_series.push(YearlyPoint {
                year: month / 12,
                nominal: balance.round() as i64,
                real: (balance / deflator).round() as i64,
            });
        }
    }

    RetirementProjection {
        nominal_future_value,
        real_future_value,
        yearly_series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn test_plan() -> RetirementPlan {
        RetirementPlan {
            current_age: 30,
            retire_age: 65,
            current_savings: 50_000.0,
            monthly_contribution: 1_000.0,
            annual_return_pct: 7.0,
            annual_inflation_pct: 2.5,
        }
    }

    #[test]
    fn test_no_horizon_returns_current_savings() {
        let mut plan = test_plan();
        plan.retire_age = 30;

        let projection = project(&plan);
        assert_eq!(projection.nominal_future_value, 50_000.0);
        assert_eq!(projection.real_future_value, 50_000.0);
        assert!(projection.yearly_series.is_empty());

        plan.retire_age = 25;
        assert_eq!(project(&plan).nominal_future_value, 50_000.0);
    }

    #[test]
    fn test_zero_return_is_plain_accumulation() {
        let mut plan = test_plan();
        plan.annual_return_pct = 0.0;
        plan.annual_inflation_pct = 0.0;

        let projection = project(&plan);
        let months = 35.0 * 12.0;
        assert_abs_diff_eq!(
            projection.nominal_future_value,
            50_000.0 + 1_000.0 * months,
            epsilon = 1e-6
        );
        assert_eq!(
            projection.real_future_value,
            projection.nominal_future_value
        );
    }

    #[test]
    fn test_closed_form_matches_simulation() {
        let projection = project(&test_plan());
        let last = projection.yearly_series.last().unwrap();

        // The series samples the same month-by-month accumulation the
        // closed form sums, so the final year matches to rounding.
        assert_abs_diff_eq!(
            last.nominal as f64,
            projection.nominal_future_value,
            epsilon = 1.0
        );
        assert_abs_diff_eq!(
            last.real as f64,
            projection.real_future_value,
            epsilon = 1.0
        );
    }

    #[test]
    fn test_series_has_one_point_per_year() {
        let projection = project(&test_plan());
        assert_eq!(projection.yearly_series.len(), 35);
        for (index, point) in projection.yearly_series.iter().enumerate() {
            assert_eq!(point.year as usize, index + 1);
        }
    }

    #[test]
    fn test_inflation_discounts_real_value() {
        let projection = project(&test_plan());
        assert!(projection.real_future_value < projection.nominal_future_value);
        for point in &projection.yearly_series {
            assert!(point.real <= point.nominal);
        }
    }

    #[test]
    fn test_growth_compounds() {
        let mut plan = test_plan();
        plan.monthly_contribution = 0.0;
        plan.annual_inflation_pct = 0.0;

        let projection = project(&plan);
        let expected = 50_000.0 * (1.0 + 7.0 / 1200.0_f64).powf(420.0);
        assert_relative_eq!(projection.nominal_future_value, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_non_finite_inputs_coerce() {
        let mut plan = test_plan();
        plan.current_savings = f64::NAN;
        plan.annual_return_pct = 0.0;
        plan.annual_inflation_pct = 0.0;

        let projection = project(&plan);
        assert_abs_diff_eq!(
            projection.nominal_future_value,
            1_000.0 * 420.0,
            epsilon = 1e-6
        );
    }
}
