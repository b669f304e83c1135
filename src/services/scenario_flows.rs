//! The three caller-facing flows built on the calculator: a bare simulation,
//! saving a named scenario, and the email-gated report.
//!
//! Results are always recomputed from the inputs; result fields sent by a
//! caller are ignored, as is any key that is not a known input.

use serde::Serialize;
use thiserror::Error;

use crate::domain::lead::{EmailAddress, EmailError};
use crate::domain::scenario::{NewScenario, RoiResult, Scenario, ScenarioInput};
use crate::services::input_fields::{
    InputFields, InvalidInputError, ScenarioNameError, email_from_fields,
    scenario_name_from_fields,
};
use crate::services::report_format::format_roi_report;
use crate::services::roi_calculator::RoiCalculator;
use crate::services::scenario_store::{ScenarioStore, StoreError};

#[derive(Error, Debug)]
pub enum ScenarioFlowError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error(transparent)]
    InvalidScenarioName(#[from] ScenarioNameError),
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize, Debug, Clone)]
pub struct LeadReport {
    pub scenario: Scenario,
    pub report: String,
}

pub fn simulate(
    calculator: &RoiCalculator,
    fields: &InputFields,
) -> Result<RoiResult, InvalidInputError> {
    calculator.compute(fields)
}

pub fn save_scenario(
    calculator: &RoiCalculator,
    store: &dyn ScenarioStore,
    fields: &InputFields,
) -> Result<Scenario, ScenarioFlowError> {
    let new_scenario = build_new_scenario(calculator, fields, None)?;
    let scenario = store.insert(new_scenario)?;
    tracing::info!(
        id = scenario.id,
        name = %scenario.scenario_name,
        "scenario saved"
    );
    Ok(scenario)
}

/// Persists the scenario together with the caller's email and renders the
/// report. Nothing is stored when the email is missing or invalid.
pub fn generate_report(
    calculator: &RoiCalculator,
    store: &dyn ScenarioStore,
    fields: &InputFields,
) -> Result<LeadReport, ScenarioFlowError> {
    let email = email_from_fields(fields).ok_or(EmailError::Missing)?;
    let email = EmailAddress::parse(email)?;

    let new_scenario = build_new_scenario(calculator, fields, Some(email))?;
    let scenario = store.insert(new_scenario)?;
    tracing::info!(id = scenario.id, "lead captured");

    let report = format_roi_report(&scenario);
    Ok(LeadReport { scenario, report })
}

fn build_new_scenario(
    calculator: &RoiCalculator,
    fields: &InputFields,
    email: Option<EmailAddress>,
) -> Result<NewScenario, ScenarioFlowError> {
    let scenario_name = scenario_name_from_fields(fields)?;
    let input = ScenarioInput::from_fields(fields)?;
    let result = calculator.project(&input);
    Ok(NewScenario {
        scenario_name,
        input,
        result,
        email,
    })
}
