use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::lead::EmailAddress;

pub type ScenarioId = u64;

pub const DEFAULT_SCENARIO_NAME: &str = "New Scenario";
pub const MAX_SCENARIO_NAME_LENGTH: usize = 100;

/// Business inputs of one ROI projection, already coerced to numbers.
///
/// `error_rate_manual_percent` is a percent value: `0.5` means 0.5%.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct ScenarioInput {
    pub monthly_invoice_volume: f64,
    pub num_ap_staff: f64,
    pub avg_hours_per_invoice: f64,
    pub hourly_wage: f64,
    #[serde(rename = "error_rate_manual")]
    pub error_rate_manual_percent: f64,
    pub error_cost: f64,
    pub time_horizon_months: f64,
    pub one_time_implementation_cost: f64,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct RoiResult {
    pub monthly_savings: f64,
    pub payback_months: f64,
    pub roi_percentage: f64,
}

/// The only shape that may be handed to a scenario store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScenario {
    pub scenario_name: String,
    pub input: ScenarioInput,
    pub result: RoiResult,
    pub email: Option<EmailAddress>,
}

impl NewScenario {
    pub fn into_scenario(self, id: ScenarioId, created_at: DateTime<Utc>) -> Scenario {
        Scenario {
            id,
            scenario_name: self.scenario_name,
            input: self.input,
            result: self.result,
            email: self.email,
            created_at,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: ScenarioId,
    pub scenario_name: String,
    #[serde(flatten)]
    pub input: ScenarioInput,
    #[serde(flatten)]
    pub result: RoiResult,
    pub email: Option<EmailAddress>,
    pub created_at: DateTime<Utc>,
}

impl Scenario {
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            id: self.id,
            scenario_name: self.scenario_name.clone(),
            monthly_savings: self.result.monthly_savings,
            roi_percentage: self.result.roi_percentage,
            created_at: self.created_at,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioSummary {
    pub id: ScenarioId,
    pub scenario_name: String,
    pub monthly_savings: f64,
    pub roi_percentage: f64,
    pub created_at: DateTime<Utc>,
}
