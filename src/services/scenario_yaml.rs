use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::lead::EmailAddress;
use crate::domain::scenario::{NewScenario, RoiResult, Scenario, ScenarioId, ScenarioInput};
use crate::services::scenario_store::{ScenarioStore, StoreError, lock, next_id};

#[derive(Serialize, Deserialize, Default)]
struct StoreRecord {
    #[serde(default)]
    scenarios: Vec<ScenarioRecord>,
}

#[derive(Serialize, Deserialize)]
struct ScenarioRecord {
    id: ScenarioId,
    scenario_name: String,
    monthly_invoice_volume: f64,
    num_ap_staff: f64,
    avg_hours_per_invoice: f64,
    hourly_wage: f64,
    error_rate_manual: f64,
    error_cost: f64,
    time_horizon_months: f64,
    one_time_implementation_cost: f64,
    monthly_savings: f64,
    payback_months: f64,
    roi_percentage: f64,
    email: Option<String>,
    created_at: String,
}

impl From<&Scenario> for ScenarioRecord {
    fn from(scenario: &Scenario) -> Self {
        let input = &scenario.input;
        let result = &scenario.result;
        Self {
            id: scenario.id,
            scenario_name: scenario.scenario_name.clone(),
            monthly_invoice_volume: input.monthly_invoice_volume,
            num_ap_staff: input.num_ap_staff,
            avg_hours_per_invoice: input.avg_hours_per_invoice,
            hourly_wage: input.hourly_wage,
            error_rate_manual: input.error_rate_manual_percent,
            error_cost: input.error_cost,
            time_horizon_months: input.time_horizon_months,
            one_time_implementation_cost: input.one_time_implementation_cost,
            monthly_savings: result.monthly_savings,
            payback_months: result.payback_months,
            roi_percentage: result.roi_percentage,
            email: scenario.email.as_ref().map(|email| email.to_string()),
            created_at: scenario.created_at.to_rfc3339(),
        }
    }
}

impl ScenarioRecord {
    fn into_scenario(self, path: &Path) -> Result<Scenario, StoreError> {
        let corrupt = |reason: String| StoreError::Corrupt {
            path: path.to_path_buf(),
            id: self.id,
            reason,
        };

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| corrupt(format!("invalid created_at {:?}: {e}", self.created_at)))?
            .with_timezone(&Utc);
        let email = self
            .email
            .as_deref()
            .map(EmailAddress::parse)
            .transpose()
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(Scenario {
            id: self.id,
            scenario_name: self.scenario_name,
            input: ScenarioInput {
                monthly_invoice_volume: self.monthly_invoice_volume,
                num_ap_staff: self.num_ap_staff,
                avg_hours_per_invoice: self.avg_hours_per_invoice,
                hourly_wage: self.hourly_wage,
                error_rate_manual_percent: self.error_rate_manual,
                error_cost: self.error_cost,
                time_horizon_months: self.time_horizon_months,
                one_time_implementation_cost: self.one_time_implementation_cost,
            },
            result: RoiResult {
                monthly_savings: self.monthly_savings,
                payback_months: self.payback_months,
                roi_percentage: self.roi_percentage,
            },
            email,
            created_at,
        })
    }
}

/// Scenario store kept in a single YAML file. A missing file is an empty
/// store; it is created on the first insert.
pub struct YamlScenarioStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl YamlScenarioStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Scenario>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let record: StoreRecord =
            serde_yaml::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        record
            .scenarios
            .into_iter()
            .map(|scenario| scenario.into_scenario(&self.path))
            .collect()
    }

    fn save(&self, scenarios: &[Scenario]) -> Result<(), StoreError> {
        let record = StoreRecord {
            scenarios: scenarios.iter().map(ScenarioRecord::from).collect(),
        };
        let yaml = serde_yaml::to_string(&record).map_err(StoreError::Serialize)?;

        let write_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let tmp_path = self.path.with_extension("yaml.tmp");
        let mut file = std::fs::File::create(&tmp_path).map_err(write_error)?;
        file.write_all(yaml.as_bytes()).map_err(write_error)?;
        file.sync_all().map_err(write_error)?;
        std::fs::rename(&tmp_path, &self.path).map_err(write_error)
    }
}

impl ScenarioStore for YamlScenarioStore {
    fn insert(&self, scenario: NewScenario) -> Result<Scenario, StoreError> {
        let _guard = lock(&self.guard)?;
        let mut scenarios = self.load()?;
        let scenario = scenario.into_scenario(next_id(&scenarios), Utc::now());
        scenarios.push(scenario.clone());
        self.save(&scenarios)?;
        Ok(scenario)
    }

    fn list(&self) -> Result<Vec<Scenario>, StoreError> {
        let _guard = lock(&self.guard)?;
        self.load()
    }

    fn get(&self, id: ScenarioId) -> Result<Option<Scenario>, StoreError> {
        let _guard = lock(&self.guard)?;
        Ok(self.load()?.into_iter().find(|s| s.id == id))
    }
}
