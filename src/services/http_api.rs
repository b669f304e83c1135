//! JSON API over the scenario flows.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | POST | `/api/simulate` | 200 with the ROI result |
//! | GET | `/api/scenarios` | 200 with scenario summaries |
//! | POST | `/api/scenarios` | 201 with the new id |
//! | GET | `/api/scenarios/{id}` | 200 with the full scenario |
//! | POST | `/api/report/generate` | 200 with the rendered report |
//! | GET | `/health` | 200 `OK` |
//!
//! Every failure answers with `{"error": "<message>"}`.

use std::convert::Infallible;
use std::sync::Arc;

use serde_json::{Value, json};
use thiserror::Error;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{Reply, Response};
use warp::{Filter, Rejection};

use crate::domain::scenario::{ScenarioId, ScenarioSummary};
use crate::services::input_fields::InputFields;
use crate::services::roi_calculator::RoiCalculator;
use crate::services::scenario_flows::{
    ScenarioFlowError, generate_report, save_scenario, simulate,
};
use crate::services::scenario_store::{ScenarioStore, StoreError};

const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Clone)]
pub struct ApiState {
    calculator: Arc<RoiCalculator>,
    store: Arc<dyn ScenarioStore>,
}

impl ApiState {
    pub fn new(calculator: RoiCalculator, store: Arc<dyn ScenarioStore>) -> Self {
        Self {
            calculator: Arc::new(calculator),
            store,
        }
    }
}

#[derive(Error, Debug)]
enum ApiError {
    #[error("invalid JSON body: {0}")]
    InvalidBody(String),
    #[error("Scenario not found")]
    NotFound,
    #[error(transparent)]
    Flow(#[from] ScenarioFlowError),
    #[error("store task failed: {0}")]
    Task(tokio::task::JoinError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Flow(ScenarioFlowError::Store(err))
    }
}

impl ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Flow(ScenarioFlowError::Store(err)) => {
                tracing::error!(error = %err, "scenario store failure");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error");
            }
            ApiError::Task(err) => {
                tracing::error!(error = %err, "store task failed");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error");
            }
            ApiError::Flow(_) => StatusCode::BAD_REQUEST,
        };
        error_response(status, &self.to_string())
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
        .into_response()
}

fn json_response<T: serde::Serialize>(status: StatusCode, value: &T) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

pub fn routes(state: ApiState) -> impl Filter<Extract = (Response,), Error = Infallible> + Clone {
    let health = warp::path!("health")
        .and(warp::get())
        .map(|| "OK".into_response());

    let simulate_route = warp::path!("api" / "simulate")
        .and(warp::post())
        .and(body_bytes())
        .and(with_state(state.clone()))
        .and_then(simulate_handler);

    let list_route = warp::path!("api" / "scenarios")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(list_scenarios_handler);

    let create_route = warp::path!("api" / "scenarios")
        .and(warp::post())
        .and(body_bytes())
        .and(with_state(state.clone()))
        .and_then(create_scenario_handler);

    let get_route = warp::path!("api" / "scenarios" / ScenarioId)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(get_scenario_handler);

    let report_route = warp::path!("api" / "report" / "generate")
        .and(warp::post())
        .and(body_bytes())
        .and(with_state(state))
        .and_then(generate_report_handler);

    health
        .or(simulate_route)
        .unify()
        .or(list_route)
        .unify()
        .or(create_route)
        .unify()
        .or(get_route)
        .unify()
        .or(report_route)
        .unify()
        .recover(handle_rejection)
        .unify()
}

fn with_state(state: ApiState) -> impl Filter<Extract = (ApiState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn body_bytes() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::bytes())
}

/// An empty body is an empty mapping; anything else must be a JSON object.
fn parse_fields(body: &[u8]) -> Result<InputFields, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(InputFields::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(ApiError::InvalidBody("expected a JSON object".to_string())),
        Err(err) => Err(ApiError::InvalidBody(err.to_string())),
    }
}

async fn simulate_handler(body: Bytes, state: ApiState) -> Result<Response, Rejection> {
    let response = parse_fields(&body).and_then(|fields| {
        simulate(&state.calculator, &fields)
            .map_err(|err| ApiError::Flow(ScenarioFlowError::InvalidInput(err)))
    });
    Ok(match response {
        Ok(result) => json_response(StatusCode::OK, &result),
        Err(err) => err.into_response(),
    })
}

async fn list_scenarios_handler(state: ApiState) -> Result<Response, Rejection> {
    let response = run_blocking(move || state.store.list().map_err(ApiError::from)).await;
    Ok(match response {
        Ok(scenarios) => {
            let summaries: Vec<ScenarioSummary> = scenarios.iter().map(|s| s.summary()).collect();
            json_response(StatusCode::OK, &summaries)
        }
        Err(err) => err.into_response(),
    })
}

async fn create_scenario_handler(body: Bytes, state: ApiState) -> Result<Response, Rejection> {
    let response = match parse_fields(&body) {
        Ok(fields) => {
            run_blocking(move || {
                save_scenario(&state.calculator, state.store.as_ref(), &fields)
                    .map_err(ApiError::from)
            })
            .await
        }
        Err(err) => Err(err),
    };
    Ok(match response {
        Ok(scenario) => json_response(
            StatusCode::CREATED,
            &json!({ "message": "Scenario saved", "id": scenario.id }),
        ),
        Err(err) => err.into_response(),
    })
}

async fn get_scenario_handler(id: ScenarioId, state: ApiState) -> Result<Response, Rejection> {
    let response = run_blocking(move || state.store.get(id).map_err(ApiError::from)).await;
    Ok(match response {
        Ok(Some(scenario)) => json_response(StatusCode::OK, &scenario),
        Ok(None) => ApiError::NotFound.into_response(),
        Err(err) => err.into_response(),
    })
}

async fn generate_report_handler(body: Bytes, state: ApiState) -> Result<Response, Rejection> {
    let response = match parse_fields(&body) {
        Ok(fields) => {
            run_blocking(move || {
                generate_report(&state.calculator, state.store.as_ref(), &fields)
                    .map_err(ApiError::from)
            })
            .await
        }
        Err(err) => Err(err),
    };
    Ok(match response {
        Ok(lead) => json_response(
            StatusCode::OK,
            &json!({
                "message": "Lead captured. Report ready.",
                "id": lead.scenario.id,
                "report": lead.report,
            }),
        ),
        Err(err) => err.into_response(),
    })
}

/// Runs store access on the blocking pool.
async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(ApiError::Task)?
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length header is required")
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    };
    Ok(error_response(status, message))
}
