use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::input_fields::InputFields;

#[derive(Error, Debug)]
pub enum InputYamlError {
    #[error("failed to read input file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse input file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Loads a mapping of wire keys to values. JSON files parse as well since
/// they are valid YAML. An empty file is an empty mapping.
pub fn load_input_fields_from_file<P: AsRef<Path>>(path: P) -> Result<InputFields, InputYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| InputYamlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_input_fields_from_str(&contents).map_err(|source| InputYamlError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn deserialize_input_fields_from_str(input: &str) -> Result<InputFields, serde_yaml::Error> {
    if input.trim().is_empty() {
        return Ok(InputFields::new());
    }
    serde_yaml::from_str(input)
}
