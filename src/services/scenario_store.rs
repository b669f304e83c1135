use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use thiserror::Error;

use crate::domain::scenario::{NewScenario, Scenario, ScenarioId};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read scenario store {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write scenario store {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to parse scenario store {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to serialize scenarios: {0}")]
    Serialize(serde_yaml::Error),
    #[error("scenario {id} in {path} is corrupt: {reason}")]
    Corrupt {
        path: PathBuf,
        id: ScenarioId,
        reason: String,
    },
    #[error("scenario store lock was poisoned")]
    Poisoned,
}

/// Persistence of immutable scenarios. There is no update or delete.
pub trait ScenarioStore: Send + Sync {
    /// Assigns the next id and the creation time, then persists.
    fn insert(&self, scenario: NewScenario) -> Result<Scenario, StoreError>;
    /// All scenarios in insertion order.
    fn list(&self) -> Result<Vec<Scenario>, StoreError>;
    fn get(&self, id: ScenarioId) -> Result<Option<Scenario>, StoreError>;
}

pub(crate) fn next_id(scenarios: &[Scenario]) -> ScenarioId {
    scenarios.iter().map(|s| s.id).max().unwrap_or(0) + 1
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex.lock().map_err(|_| StoreError::Poisoned)
}

#[derive(Debug, Default)]
pub struct InMemoryScenarioStore {
    scenarios: Mutex<Vec<Scenario>>,
}

impl InMemoryScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioStore for InMemoryScenarioStore {
    fn insert(&self, scenario: NewScenario) -> Result<Scenario, StoreError> {
        let mut scenarios = lock(&self.scenarios)?;
        let scenario = scenario.into_scenario(next_id(&scenarios), Utc::now());
        scenarios.push(scenario.clone());
        Ok(scenario)
    }

    fn list(&self) -> Result<Vec<Scenario>, StoreError> {
        Ok(lock(&self.scenarios)?.clone())
    }

    fn get(&self, id: ScenarioId) -> Result<Option<Scenario>, StoreError> {
        Ok(lock(&self.scenarios)?.iter().find(|s| s.id == id).cloned())
    }
}
