use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::roi_calculator::RoiConstants;

#[derive(Error, Debug)]
pub enum RoiConstantsYamlError {
    #[error("failed to read constants file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse constants yaml {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("constant {name} must be a finite number")]
    NotFinite { name: &'static str },
}

/// Loads [`RoiConstants`] from a YAML file. Keys that are left out keep their
/// default value; unknown keys are rejected.
pub fn load_roi_constants_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<RoiConstants, RoiConstantsYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| RoiConstantsYamlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let constants: RoiConstants =
        serde_yaml::from_str(&contents).map_err(|source| RoiConstantsYamlError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate(constants)
}

/// Returns the default constants when no file is given.
pub fn load_roi_constants_if_provided(
    path: Option<&str>,
) -> Result<RoiConstants, RoiConstantsYamlError> {
    match path {
        Some(path) => load_roi_constants_from_yaml_file(path),
        None => Ok(RoiConstants::default()),
    }
}

fn validate(constants: RoiConstants) -> Result<RoiConstants, RoiConstantsYamlError> {
    let values = [
        ("automated_cost_per_invoice", constants.automated_cost_per_invoice),
        ("error_rate_auto_percent", constants.error_rate_auto_percent),
        ("savings_boost_factor", constants.savings_boost_factor),
    ];
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(RoiConstantsYamlError::NotFinite { name: *name }),
        None => Ok(constants),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("constants.yaml");
        file.write_str("savings_boost_factor: 1.0\n").unwrap();

        let constants = load_roi_constants_from_yaml_file(file.path()).unwrap();
        assert_eq!(constants.savings_boost_factor, 1.0);
        assert_eq!(constants.automated_cost_per_invoice, 0.20);
        assert_eq!(constants.error_rate_auto_percent, 0.001);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("constants.yaml");
        file.write_str("min_roi_boost: 2.0\n").unwrap();

        let result = load_roi_constants_from_yaml_file(file.path());
        assert!(matches!(result, Err(RoiConstantsYamlError::Parse { .. })));
    }

    #[test]
    fn non_finite_constants_are_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("constants.yaml");
        file.write_str("automated_cost_per_invoice: .nan\n").unwrap();

        let result = load_roi_constants_from_yaml_file(file.path());
        assert!(matches!(
            result,
            Err(RoiConstantsYamlError::NotFinite {
                name: "automated_cost_per_invoice"
            })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let result = load_roi_constants_from_yaml_file(temp.path().join("constants.yaml"));
        assert!(matches!(result, Err(RoiConstantsYamlError::Read { .. })));
    }

    #[test]
    fn no_path_yields_defaults() {
        assert_eq!(
            load_roi_constants_if_provided(None).unwrap(),
            RoiConstants::default()
        );
    }
}
