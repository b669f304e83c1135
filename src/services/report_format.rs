use crate::domain::scenario::{RoiResult, Scenario, ScenarioInput, ScenarioSummary};
use crate::services::roi_calculator::ROI_SENTINEL_PERCENT;

pub fn format_roi_report(scenario: &Scenario) -> String {
    let email = match &scenario.email {
        Some(email) => email.to_string(),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("ROI Report".to_string());
    lines.push(format!("Scenario: {}", scenario.scenario_name));
    lines.push(format!("Scenario id: {}", scenario.id));
    lines.push(format!(
        "Created: {}",
        scenario.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(format!("Prepared for: {email}"));
    lines.push(String::new());
    lines.extend(format_input_table(&scenario.input));
    lines.push(String::new());
    lines.push(format_result_table(&scenario.result, scenario.input.time_horizon_months));

    lines.join("\n")
}

pub fn format_result_table(result: &RoiResult, time_horizon_months: f64) -> String {
    let lines = [
        "Results:".to_string(),
        "Metric | Value".to_string(),
        "-------|------".to_string(),
        format!("Monthly savings | {:.2}", result.monthly_savings),
        format!("Payback period | {}", format_payback(result.payback_months)),
        format!(
            "ROI over {} months | {}",
            time_horizon_months,
            format_roi(result.roi_percentage)
        ),
    ];
    lines.join("\n")
}

pub fn format_scenario_list(scenarios: &[ScenarioSummary]) -> String {
    if scenarios.is_empty() {
        return "No scenarios saved.".to_string();
    }

    let mut lines = vec![
        "Id | Name | Monthly savings | ROI | Created".to_string(),
        "---|------|-----------------|-----|--------".to_string(),
    ];
    lines.extend(scenarios.iter().map(|s| {
        format!(
            "{} | {} | {:.2} | {} | {}",
            s.id,
            s.scenario_name,
            s.monthly_savings,
            format_roi(s.roi_percentage),
            s.created_at.format("%Y-%m-%d %H:%M")
        )
    }));
    lines.join("\n")
}

fn format_input_table(input: &ScenarioInput) -> Vec<String> {
    vec![
        "Inputs:".to_string(),
        "Input | Value".to_string(),
        "------|------".to_string(),
        format!("Monthly invoice volume | {}", input.monthly_invoice_volume),
        format!("AP staff | {}", input.num_ap_staff),
        format!("Manual hours per invoice | {}", input.avg_hours_per_invoice),
        format!("Hourly wage | {:.2}", input.hourly_wage),
        format!("Manual error rate | {}%", input.error_rate_manual_percent),
        format!("Cost per error | {:.2}", input.error_cost),
        format!("Projection period | {} months", input.time_horizon_months),
        format!(
            "One-time implementation cost | {:.2}",
            input.one_time_implementation_cost
        ),
    ]
}

fn format_payback(payback_months: f64) -> String {
    if payback_months > 0.0 {
        format!("{payback_months:.1} months")
    } else {
        "n/a".to_string()
    }
}

fn format_roi(roi_percentage: f64) -> String {
    if roi_percentage == ROI_SENTINEL_PERCENT {
        format!("{ROI_SENTINEL_PERCENT:.0}% (no implementation cost)")
    } else {
        format!("{roi_percentage:.0}%")
    }
}
