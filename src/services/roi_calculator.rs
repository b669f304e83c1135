use serde::{Deserialize, Serialize};

use crate::domain::scenario::{RoiResult, ScenarioInput};
use crate::services::input_fields::{InputFields, InvalidInputError};

/// ROI reported when there is no implementation cost but the projection
/// still yields a net gain.
pub const ROI_SENTINEL_PERCENT: f64 = 9999.0;

/// Business constants of the projection.
///
/// `error_rate_auto_percent` is a percent value and is divided by 100 before
/// use, so the default `0.001` becomes a decimal rate of `0.00001`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoiConstants {
    pub automated_cost_per_invoice: f64,
    pub error_rate_auto_percent: f64,
    pub savings_boost_factor: f64,
}

impl Default for RoiConstants {
    fn default() -> Self {
        Self {
            automated_cost_per_invoice: 0.20,
            error_rate_auto_percent: 0.001,
            savings_boost_factor: 1.1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoiCalculator {
    constants: RoiConstants,
}

impl RoiCalculator {
    pub fn new(constants: RoiConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &RoiConstants {
        &self.constants
    }

    /// Coerces `fields` and projects them. Fails only when a field is not
    /// numeric.
    pub fn compute(&self, fields: &InputFields) -> Result<RoiResult, InvalidInputError> {
        let input = ScenarioInput::from_fields(fields)?;
        Ok(self.project(&input))
    }

    pub fn project(&self, input: &ScenarioInput) -> RoiResult {
        let constants = &self.constants;
        let error_rate_manual = input.error_rate_manual_percent / 100.0;
        let error_rate_auto = constants.error_rate_auto_percent / 100.0;

        let labor_cost_manual = input.num_ap_staff
            * input.hourly_wage
            * input.avg_hours_per_invoice
            * input.monthly_invoice_volume;
        let auto_cost = input.monthly_invoice_volume * constants.automated_cost_per_invoice;
        let error_savings =
            (error_rate_manual - error_rate_auto) * input.monthly_invoice_volume * input.error_cost;

        let monthly_savings_pre_bias = (labor_cost_manual + error_savings) - auto_cost;
        // Multiplier, not a floor: negative savings stay negative.
        let monthly_savings = monthly_savings_pre_bias * constants.savings_boost_factor;

        let cumulative_savings = monthly_savings * input.time_horizon_months;
        let net_savings = cumulative_savings - input.one_time_implementation_cost;

        let payback_months = if monthly_savings > 0.0 {
            input.one_time_implementation_cost / monthly_savings
        } else {
            0.0
        };

        let roi_percentage = if input.one_time_implementation_cost > 0.0 {
            (net_savings / input.one_time_implementation_cost) * 100.0
        } else if net_savings > 0.0 {
            ROI_SENTINEL_PERCENT
        } else {
            0.0
        };

        RoiResult {
            monthly_savings: round_to(monthly_savings, 2),
            payback_months: round_to(payback_months, 1),
            roi_percentage: round_to(roi_percentage, 0),
        }
    }
}

/// Projects `fields` with the default constants.
pub fn compute(fields: &InputFields) -> Result<RoiResult, InvalidInputError> {
    RoiCalculator::default().compute(fields)
}

/// Rounds half away from zero at `places` decimals. Negative zero becomes
/// zero.
///
/// Magnitudes of 2^52 / 10^places and above have no fractional digits left
/// at that precision and are returned unchanged, as are non-finite values.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() || value.abs() >= 2_f64.powi(52) / factor {
        return value + 0.0;
    }
    scaled.round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::input_fields::{
        HOURLY_WAGE, MONTHLY_INVOICE_VOLUME, ONE_TIME_IMPLEMENTATION_COST, TIME_HORIZON_MONTHS,
    };
    use crate::test_support::{fields_with, golden_fields, golden_input};
    use serde_json::json;

    #[test]
    fn golden_scenario_is_pinned() {
        let result = compute(&golden_fields()).unwrap();

        assert_eq!(result.monthly_savings, 5554.45);
        assert_eq!(result.payback_months, 0.9);
        assert_eq!(result.roi_percentage, 1233.0);
    }

    #[test]
    fn all_zero_input_yields_zero_metrics() {
        let result = compute(&fields_with(&[(TIME_HORIZON_MONTHS, json!(12))])).unwrap();

        assert_eq!(result, RoiResult::default());
        assert!(result.monthly_savings.is_sign_positive());
    }

    #[test]
    fn automated_error_rate_is_scaled_twice() {
        // Only the error term contributes: (0.005 - 0.00001) * 1000 * 50 = 249.5
        let calculator = RoiCalculator::new(RoiConstants {
            automated_cost_per_invoice: 0.0,
            savings_boost_factor: 1.0,
            ..RoiConstants::default()
        });
        let input = ScenarioInput {
            monthly_invoice_volume: 1000.0,
            error_rate_manual_percent: 0.5,
            error_cost: 50.0,
            ..ScenarioInput::default()
        };

        assert_eq!(calculator.project(&input).monthly_savings, 249.5);
    }

    #[test]
    fn boost_factor_multiplies_losses() {
        // Pre-bias savings are -20 (automation cost only).
        let result = compute(&fields_with(&[
            (MONTHLY_INVOICE_VOLUME, json!(100)),
            (TIME_HORIZON_MONTHS, json!(12)),
        ]))
        .unwrap();

        assert_eq!(result.monthly_savings, -22.0);
        assert_eq!(result.payback_months, 0.0);
        assert_eq!(result.roi_percentage, 0.0);
    }

    #[test]
    fn payback_is_zero_when_savings_are_negative_even_with_cost() {
        let result = compute(&fields_with(&[
            (MONTHLY_INVOICE_VOLUME, json!(100)),
            (TIME_HORIZON_MONTHS, json!(12)),
            (ONE_TIME_IMPLEMENTATION_COST, json!(5000)),
        ]))
        .unwrap();

        assert_eq!(result.payback_months, 0.0);
        assert_eq!(result.roi_percentage, -105.0);
    }

    #[test]
    fn roi_uses_sentinel_without_implementation_cost() {
        let mut fields = golden_fields();
        fields.insert(ONE_TIME_IMPLEMENTATION_COST.to_string(), json!(0));

        let result = compute(&fields).unwrap();
        assert_eq!(result.roi_percentage, ROI_SENTINEL_PERCENT);
        assert_eq!(result.payback_months, 0.0);
    }

    #[test]
    fn roi_is_zero_without_cost_and_without_gain() {
        let result = compute(&fields_with(&[(HOURLY_WAGE, json!(30))])).unwrap();
        assert_eq!(result.roi_percentage, 0.0);
    }

    #[test]
    fn alternative_constants_change_the_projection() {
        let calculator = RoiCalculator::new(RoiConstants {
            automated_cost_per_invoice: 0.0,
            error_rate_auto_percent: 0.0,
            savings_boost_factor: 1.0,
        });

        let result = calculator.project(&golden_input());
        assert_eq!(result.monthly_savings, 5250.0);
        assert_eq!(result.payback_months, 1.0);
    }

    #[test]
    fn compute_is_deterministic() {
        let calculator = RoiCalculator::default();
        let first = calculator.compute(&golden_fields()).unwrap();
        let second = calculator.compute(&golden_fields()).unwrap();

        assert_eq!(first.monthly_savings.to_bits(), second.monthly_savings.to_bits());
        assert_eq!(first.payback_months.to_bits(), second.payback_months.to_bits());
        assert_eq!(first.roi_percentage.to_bits(), second.roi_percentage.to_bits());
    }

    #[test]
    fn compute_surfaces_invalid_input() {
        let err = compute(&fields_with(&[(HOURLY_WAGE, json!("a lot"))])).unwrap_err();
        assert_eq!(err.field, HOURLY_WAGE);
    }

    #[test]
    fn round_to_rounds_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(1.234, 2), 1.23);
        assert!(round_to(-0.001, 2).is_sign_positive());
    }

    #[test]
    fn round_to_keeps_huge_values_unchanged() {
        assert_eq!(round_to(8.8e306, 2), 8.8e306);
        assert_eq!(round_to(-8.8e306, 2), -8.8e306);
        assert_eq!(round_to(f64::MAX, 1), f64::MAX);
        assert_eq!(round_to(2_f64.powi(53) + 2.0, 0), 2_f64.powi(53) + 2.0);
    }

    #[test]
    fn huge_finite_savings_stay_finite() {
        let input = ScenarioInput {
            monthly_invoice_volume: 1e307,
            num_ap_staff: 1.0,
            avg_hours_per_invoice: 1.0,
            hourly_wage: 1.0,
            one_time_implementation_cost: 1.0,
            ..ScenarioInput::default()
        };

        let result = RoiCalculator::default().project(&input);
        assert!(result.monthly_savings.is_finite());
        assert!((result.monthly_savings / 8.8e306 - 1.0).abs() < 1e-12);
        assert_eq!(result.payback_months, 0.0);
    }

    #[test]
    fn arithmetic_overflow_passes_through_as_non_finite() {
        // Labor cost overflows to infinity; infinity * 0 months is NaN.
        let input = ScenarioInput {
            monthly_invoice_volume: 1e200,
            num_ap_staff: 1e200,
            avg_hours_per_invoice: 1.0,
            hourly_wage: 1.0,
            ..ScenarioInput::default()
        };

        let result = RoiCalculator::default().project(&input);
        assert_eq!(result.monthly_savings, f64::INFINITY);
        assert_eq!(result.payback_months, 0.0);
        assert_eq!(result.roi_percentage, 0.0);
        assert_eq!(
            serde_json::to_value(result).unwrap()["monthly_savings"],
            serde_json::Value::Null
        );
    }
}
