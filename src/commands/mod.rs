use thiserror::Error;

use roi_simulator::services::input_fields::InvalidInputError;
use roi_simulator::services::input_yaml::InputYamlError;
use roi_simulator::services::roi_constants_yaml::RoiConstantsYamlError;
use roi_simulator::services::scenario_flows::ScenarioFlowError;
use roi_simulator::services::scenario_store::StoreError;

pub mod base_commands;
pub mod report_cmd;
pub mod scenario_cmd;
pub mod serve_cmd;
pub mod simulate_cmd;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Input(#[from] InputYamlError),
    #[error(transparent)]
    Constants(#[from] RoiConstantsYamlError),
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error(transparent)]
    Flow(#[from] ScenarioFlowError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Scenario {0} not found")]
    ScenarioNotFound(u64),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to start server: {0}")]
    Serve(#[from] warp::Error),
}
