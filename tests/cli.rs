use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn calculator() -> Command {
    Command::cargo_bin("pricing-calculator").unwrap()
}

#[test]
fn calc_prints_summary_for_sample() {
    calculator()
        .args(["calc", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Pricing Summary ==="))
        .stdout(predicate::str::contains("$215.28"))
        .stdout(predicate::str::contains("$7,277.40"))
        .stdout(predicate::str::contains("Executive"));
}

#[test]
fn calc_json_exposes_metrics() {
    let output = calculator()
        .args(["calc", "--sample", "--json", "--strategy", "margin"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["strategy"], "margin");
    assert_eq!(report["metrics"]["price_source"], "margin");
    assert_eq!(report["metrics"]["effective_cost"], 156.0);
    assert_eq!(report["metrics"]["scenario_details"].as_array().unwrap().len(), 4);
}

#[test]
fn set_assignments_override_sample() {
    let output = calculator()
        .args(["calc", "--sample", "--json"])
        .args(["--set", "priceOverride=500", "--set", "units=10"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["inputs"]["units"], 10);
    assert_eq!(report["metrics"]["selected_price"], 500.0);
    assert_eq!(report["metrics"]["price_source"], "override");
}

#[test]
fn undefined_margin_is_null_in_json() {
    let output = calculator()
        .args(["calc", "--sample", "--json", "--set", "margin_percent=100"])
        .output()
        .unwrap();

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["metrics"]["margin_price"].is_null());
}

#[test]
fn unknown_field_is_rejected() {
    calculator()
        .args(["calc", "--set", "shipping=4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown input field"));
}

#[test]
fn out_of_range_discount_is_rejected() {
    calculator()
        .args(["calc", "--set", "discount_percent=100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("discount_percent"));
}

#[test]
fn config_file_drives_calculation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricing.toml");

    calculator()
        .arg("template")
        .arg(&path)
        .assert()
        .success();

    let output = calculator()
        .args(["calc", "--json", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["strategy"], "markup");
    assert_eq!(report["inputs"]["units"], 150);
}

#[test]
fn config_file_overlays_sample_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[inputs]\nbase_cost = 10\n").unwrap();

    let output = calculator()
        .args(["calc", "--sample", "--json", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["inputs"]["base_cost"], 10.0);
    assert_eq!(report["inputs"]["units"], 150);
    assert_eq!(report["inputs"]["markup_percent"], 38.0);
    assert_eq!(report["metrics"]["price_source"], "markup");
    assert_eq!(report["metrics"]["effective_cost"], 46.0);
}

#[test]
fn config_without_sample_starts_from_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[inputs]\nbase_cost = 10\n").unwrap();

    let output = calculator()
        .args(["calc", "--json", "--config"])
        .arg(&path)
        .output()
        .unwrap();

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["inputs"]["units"], 1);
    assert_eq!(report["metrics"]["effective_cost"], 10.0);
}

#[test]
fn template_refuses_to_overwrite() {
    let file = tempfile::NamedTempFile::new().unwrap();

    calculator()
        .arg("template")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    calculator()
        .args(["template", "--force"])
        .arg(file.path())
        .assert()
        .success();
}

#[test]
fn scenarios_json_keeps_order() {
    let output = calculator()
        .args(["scenarios", "--sample", "--json"])
        .output()
        .unwrap();

    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    let labels: Vec<_> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, ["Value Anchor", "Core", "Premium", "Executive"]);
}

#[test]
fn fields_lists_every_input() {
    calculator()
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default"))
        .stdout(predicate::str::contains("Sample"))
        .stdout(predicate::str::contains("base_cost"))
        .stdout(predicate::str::contains("target_profit"));
}
