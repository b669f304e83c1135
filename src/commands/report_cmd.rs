use serde_json::Value;

use roi_simulator::services::input_fields::EMAIL;
use roi_simulator::services::input_yaml::load_input_fields_from_file;
use roi_simulator::services::roi_calculator::RoiCalculator;
use roi_simulator::services::roi_constants_yaml::load_roi_constants_if_provided;
use roi_simulator::services::scenario_flows::generate_report;
use roi_simulator::services::scenario_yaml::YamlScenarioStore;

use crate::commands::CommandError;

pub fn report_command(
    input: &str,
    email: Option<String>,
    output: Option<&str>,
    store: &str,
    constants: Option<&str>,
) -> Result<(), CommandError> {
    let calculator = RoiCalculator::new(load_roi_constants_if_provided(constants)?);
    let mut fields = load_input_fields_from_file(input)?;
    if let Some(email) = email {
        fields.insert(EMAIL.to_string(), Value::String(email));
    }

    let scenario_store = YamlScenarioStore::new(store);
    let lead = generate_report(&calculator, &scenario_store, &fields)?;

    match output {
        Some(output) => {
            std::fs::write(output, format!("{}\n", lead.report)).map_err(|source| {
                CommandError::Write {
                    path: output.to_string(),
                    source,
                }
            })?;
            println!(
                "Report for scenario {} written to {output}",
                lead.scenario.id
            );
        }
        None => println!("{}", lead.report),
    }
    Ok(())
}
