pub mod http_api;
pub mod input_fields;
pub mod input_yaml;
pub mod report_format;
pub mod roi_calculator;
pub mod roi_constants_yaml;
pub mod scenario_flows;
pub mod scenario_store;
pub mod scenario_yaml;
