use std::net::SocketAddr;
use std::sync::Arc;

use warp::Filter;

use roi_simulator::services::http_api::{ApiState, routes};
use roi_simulator::services::roi_calculator::RoiCalculator;
use roi_simulator::services::roi_constants_yaml::load_roi_constants_if_provided;
use roi_simulator::services::scenario_yaml::YamlScenarioStore;

use crate::commands::CommandError;

pub async fn serve_command(
    bind: SocketAddr,
    store: &str,
    constants: Option<&str>,
) -> Result<(), CommandError> {
    let calculator = RoiCalculator::new(load_roi_constants_if_provided(constants)?);
    let state = ApiState::new(calculator, Arc::new(YamlScenarioStore::new(store)));
    let api = routes(state).with(warp::trace::request());

    let (addr, server) = warp::serve(api).try_bind_with_graceful_shutdown(bind, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for shutdown signal");
        }
    })?;
    tracing::info!(%addr, store, "serving ROI API");
    println!("Serving ROI API on http://{addr}");

    server.await;
    tracing::info!("server stopped");
    Ok(())
}
