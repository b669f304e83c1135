use serde_json::{Value, json};

use crate::domain::scenario::{NewScenario, RoiResult, ScenarioInput};
use crate::services::input_fields::InputFields;

/// Inputs of the pinned regression scenario.
pub fn golden_fields() -> InputFields {
    fields_with(&[
        ("monthly_invoice_volume", json!(1000)),
        ("num_ap_staff", json!(2)),
        ("avg_hours_per_invoice", json!(0.1)),
        ("hourly_wage", json!(25)),
        ("error_rate_manual", json!(0.5)),
        ("error_cost", json!(50)),
        ("time_horizon_months", json!(12)),
        ("one_time_implementation_cost", json!(5000)),
    ])
}

pub fn golden_input() -> ScenarioInput {
    ScenarioInput {
        monthly_invoice_volume: 1000.0,
        num_ap_staff: 2.0,
        avg_hours_per_invoice: 0.1,
        hourly_wage: 25.0,
        error_rate_manual_percent: 0.5,
        error_cost: 50.0,
        time_horizon_months: 12.0,
        one_time_implementation_cost: 5000.0,
    }
}

pub fn golden_result() -> RoiResult {
    RoiResult {
        monthly_savings: 5554.45,
        payback_months: 0.9,
        roi_percentage: 1233.0,
    }
}

pub fn fields_with(entries: &[(&str, Value)]) -> InputFields {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

pub fn new_scenario(name: &str) -> NewScenario {
    NewScenario {
        scenario_name: name.to_string(),
        input: golden_input(),
        result: golden_result(),
        email: None,
    }
}
