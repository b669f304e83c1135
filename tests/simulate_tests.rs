use assert_fs::prelude::*;
use predicates::prelude::*;

const GOLDEN_INPUT: &str = "monthly_invoice_volume: 1000
num_ap_staff: 2
avg_hours_per_invoice: 0.1
hourly_wage: 25
error_rate_manual: 0.5
error_cost: 50
time_horizon_months: 12
one_time_implementation_cost: 5000
";

#[test]
fn simulate_prints_result_table_and_writes_yaml() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("input.yaml");
    input.write_str(GOLDEN_INPUT).unwrap();
    let output = temp.child("result.yaml");
    let output_arg = output.path().to_str().unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("roi-simulator");
    cmd.args([
        "simulate",
        "-i",
        input.path().to_str().unwrap(),
        "-o",
        output_arg,
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Monthly savings | 5554.45"))
        .stdout(predicate::str::contains("Payback period | 0.9 months"))
        .stdout(predicate::str::contains("ROI over 12 months | 1233%"))
        .stdout(predicate::str::contains(format!(
            "Simulation result written to {output_arg}"
        )));

    output.assert(predicate::str::contains("monthly_savings: 5554.45"));
    output.assert(predicate::str::contains("payback_months: 0.9"));
    output.assert(predicate::str::contains("roi_percentage: 1233.0"));
}

#[test]
fn simulate_accepts_json_input_and_custom_constants() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("input.json");
    input
        .write_str(
            r#"{"monthly_invoice_volume": 1000, "num_ap_staff": 2, "avg_hours_per_invoice": 0.1,
"hourly_wage": 25, "error_rate_manual": 0.5, "error_cost": 50, "time_horizon_months": 12,
"one_time_implementation_cost": 5000}"#,
        )
        .unwrap();
    let constants = temp.child("constants.yaml");
    constants
        .write_str(
            "automated_cost_per_invoice: 0.0\nerror_rate_auto_percent: 0.0\nsavings_boost_factor: 1.0\n",
        )
        .unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("roi-simulator");
    cmd.args([
        "simulate",
        "-i",
        input.path().to_str().unwrap(),
        "-c",
        constants.path().to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Monthly savings | 5250.00"));
}

#[test]
fn simulate_fails_on_non_numeric_input() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("input.yaml");
    input.write_str("hourly_wage: twenty five\n").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("roi-simulator");
    cmd.args(["simulate", "-i", input.path().to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid input data"))
        .stderr(predicate::str::contains("hourly_wage"));
}

#[test]
fn simulate_fails_on_missing_input_file() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("roi-simulator");
    cmd.args(["simulate", "-i", "/nonexistent/input.yaml"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}
