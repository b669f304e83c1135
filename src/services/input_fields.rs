//! Coercion of a named-field mapping (decoded JSON or YAML) into a
//! [`ScenarioInput`].
//!
//! Rules per field:
//! - missing key => `0`
//! - number => used as is
//! - string => trimmed and parsed as `f64`
//! - boolean => `1` / `0`
//! - anything else, or a value that is not finite => [`InvalidInputError`]

use std::num::ParseFloatError;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::scenario::{
    DEFAULT_SCENARIO_NAME, MAX_SCENARIO_NAME_LENGTH, ScenarioInput,
};

pub type InputFields = Map<String, Value>;

pub const MONTHLY_INVOICE_VOLUME: &str = "monthly_invoice_volume";
pub const NUM_AP_STAFF: &str = "num_ap_staff";
pub const AVG_HOURS_PER_INVOICE: &str = "avg_hours_per_invoice";
pub const HOURLY_WAGE: &str = "hourly_wage";
pub const ERROR_RATE_MANUAL: &str = "error_rate_manual";
pub const ERROR_COST: &str = "error_cost";
pub const TIME_HORIZON_MONTHS: &str = "time_horizon_months";
pub const ONE_TIME_IMPLEMENTATION_COST: &str = "one_time_implementation_cost";
pub const SCENARIO_NAME: &str = "scenario_name";
pub const EMAIL: &str = "email";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("could not parse {value:?} as a number")]
    Parse {
        value: String,
        source: ParseFloatError,
    },
    #[error("expected a number, found {0}")]
    UnsupportedType(&'static str),
    #[error("{0} is not a finite number")]
    NotFinite(String),
}

/// Raised when a named input cannot be coerced to a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid input data: `{field}` {cause}")]
pub struct InvalidInputError {
    pub field: &'static str,
    #[source]
    pub cause: CoercionError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioNameError {
    #[error("scenario name must be a string")]
    NotAString,
    #[error("scenario name exceeds 100 characters")]
    TooLong,
}

impl ScenarioInput {
    pub fn from_fields(fields: &InputFields) -> Result<Self, InvalidInputError> {
        Ok(Self {
            monthly_invoice_volume: coerce_field(fields, MONTHLY_INVOICE_VOLUME)?,
            num_ap_staff: coerce_field(fields, NUM_AP_STAFF)?,
            avg_hours_per_invoice: coerce_field(fields, AVG_HOURS_PER_INVOICE)?,
            hourly_wage: coerce_field(fields, HOURLY_WAGE)?,
            error_rate_manual_percent: coerce_field(fields, ERROR_RATE_MANUAL)?,
            error_cost: coerce_field(fields, ERROR_COST)?,
            time_horizon_months: coerce_field(fields, TIME_HORIZON_MONTHS)?,
            one_time_implementation_cost: coerce_field(fields, ONE_TIME_IMPLEMENTATION_COST)?,
        })
    }
}

fn coerce_field(fields: &InputFields, field: &'static str) -> Result<f64, InvalidInputError> {
    match fields.get(field) {
        None => Ok(0.0),
        Some(value) => coerce_value(value).map_err(|cause| InvalidInputError { field, cause }),
    }
}

fn coerce_value(value: &Value) -> Result<f64, CoercionError> {
    let number = match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| CoercionError::NotFinite(number.to_string()))?,
        Value::String(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|source| CoercionError::Parse {
                    value: text.clone(),
                    source,
                })?
        }
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => return Err(CoercionError::UnsupportedType("null")),
        Value::Array(_) => return Err(CoercionError::UnsupportedType("an array")),
        Value::Object(_) => return Err(CoercionError::UnsupportedType("an object")),
    };

    if number.is_finite() {
        Ok(number)
    } else {
        Err(CoercionError::NotFinite(value.to_string()))
    }
}

/// Reads the scenario name, falling back to [`DEFAULT_SCENARIO_NAME`] when it
/// is missing or blank.
pub fn scenario_name_from_fields(fields: &InputFields) -> Result<String, ScenarioNameError> {
    let name = match fields.get(SCENARIO_NAME) {
        None | Some(Value::Null) => return Ok(DEFAULT_SCENARIO_NAME.to_string()),
        Some(Value::String(name)) => name.trim(),
        Some(_) => return Err(ScenarioNameError::NotAString),
    };

    if name.is_empty() {
        Ok(DEFAULT_SCENARIO_NAME.to_string())
    } else if name.chars().count() > MAX_SCENARIO_NAME_LENGTH {
        Err(ScenarioNameError::TooLong)
    } else {
        Ok(name.to_string())
    }
}

/// Returns the raw `email` value when it is a non-empty string.
pub fn email_from_fields(fields: &InputFields) -> Option<&str> {
    fields
        .get(EMAIL)
        .and_then(Value::as_str)
        .filter(|email| !email.trim().is_empty())
}
