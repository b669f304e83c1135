use roi_simulator::domain::scenario::ScenarioInput;
use roi_simulator::services::input_yaml::load_input_fields_from_file;
use roi_simulator::services::report_format::format_result_table;
use roi_simulator::services::roi_calculator::RoiCalculator;
use roi_simulator::services::roi_constants_yaml::load_roi_constants_if_provided;

use crate::commands::CommandError;

pub fn simulate_command(
    input: &str,
    output: Option<&str>,
    constants: Option<&str>,
) -> Result<(), CommandError> {
    let calculator = RoiCalculator::new(load_roi_constants_if_provided(constants)?);
    let fields = load_input_fields_from_file(input)?;
    let scenario_input = ScenarioInput::from_fields(&fields)?;
    let result = calculator.project(&scenario_input);

    println!(
        "{}",
        format_result_table(&result, scenario_input.time_horizon_months)
    );

    if let Some(output) = output {
        let yaml = serde_yaml::to_string(&result)?;
        std::fs::write(output, yaml).map_err(|source| CommandError::Write {
            path: output.to_string(),
            source,
        })?;
        println!("Simulation result written to {output}");
    }
    Ok(())
}
