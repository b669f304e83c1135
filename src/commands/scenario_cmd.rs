use serde_json::Value;

use roi_simulator::domain::scenario::ScenarioSummary;
use roi_simulator::services::input_fields::SCENARIO_NAME;
use roi_simulator::services::input_yaml::load_input_fields_from_file;
use roi_simulator::services::report_format::format_scenario_list;
use roi_simulator::services::roi_calculator::RoiCalculator;
use roi_simulator::services::roi_constants_yaml::load_roi_constants_if_provided;
use roi_simulator::services::scenario_flows::save_scenario;
use roi_simulator::services::scenario_store::ScenarioStore;
use roi_simulator::services::scenario_yaml::YamlScenarioStore;

use crate::commands::CommandError;

pub fn save_command(
    input: &str,
    name: Option<String>,
    store: &str,
    constants: Option<&str>,
) -> Result<(), CommandError> {
    let calculator = RoiCalculator::new(load_roi_constants_if_provided(constants)?);
    let mut fields = load_input_fields_from_file(input)?;
    if let Some(name) = name {
        fields.insert(SCENARIO_NAME.to_string(), Value::String(name));
    }

    let scenario_store = YamlScenarioStore::new(store);
    let scenario = save_scenario(&calculator, &scenario_store, &fields)?;
    println!(
        "Scenario {} '{}' saved to {store}",
        scenario.id, scenario.scenario_name
    );
    Ok(())
}

pub fn list_command(store: &str) -> Result<(), CommandError> {
    let summaries: Vec<ScenarioSummary> = YamlScenarioStore::new(store)
        .list()?
        .iter()
        .map(|scenario| scenario.summary())
        .collect();
    println!("{}", format_scenario_list(&summaries));
    Ok(())
}

pub fn show_command(id: u64, store: &str) -> Result<(), CommandError> {
    let scenario = YamlScenarioStore::new(store)
        .get(id)?
        .ok_or(CommandError::ScenarioNotFound(id))?;
    print!("{}", serde_yaml::to_string(&scenario)?);
    Ok(())
}
