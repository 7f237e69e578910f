//! End-to-end tests for the `parvar` binary.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// TEST FIXTURES
// =============================================================================

const RATE_CLOSE_JSON: &str = r#"[
    {"timestamp": "2024-01-01T00:00:00Z", "rate_close": "100.0"},
    {"timestamp": "2024-01-02T00:00:00Z", "rate_close": "101.0"},
    {"timestamp": "2024-01-03T00:00:00Z", "rate_close": "99.0"},
    {"timestamp": "2024-01-04T00:00:00Z", "rate_close": "102.0"},
    {"timestamp": "2024-01-05T00:00:00Z", "rate_close": "98.0"},
    {"timestamp": "2024-01-06T00:00:00Z", "rate_close": "100.0"}
]"#;

const PRICES_CSV: &str = "date,close\n\
2024-01-01,100.0\n\
2024-01-02,101.0\n\
2024-01-03,99.0\n\
2024-01-04,102.0\n\
2024-01-05,98.0\n\
2024-01-06,100.0\n";

const YEARLY_VAR: f64 = 11587.763359466944;
const DAILY_VAR: f64 = 606.5312551659341;

/// Closing prices driven by GARCH(1,1) shocks (ω = 0.05, α = 0.10,
/// β = 0.85 in percent units), from a fixed-seed LCG.
fn garch_prices(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut uniform = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    let mut variance: f64 = 1.0;
    let mut price = 100.0;
    let mut prices = vec![price];
    for _ in 1..n {
        let u1 = 1.0 - uniform();
        let u2 = uniform();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        let shock = variance.sqrt() * z;
        variance = 0.05 + 0.10 * shock * shock + 0.85 * variance;
        price *= (shock / 100.0).exp();
        prices.push(price);
    }
    prices
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prices.json"), RATE_CLOSE_JSON).unwrap();
    fs::write(dir.path().join("prices.csv"), PRICES_CSV).unwrap();
    dir
}

fn parvar(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("parvar").unwrap();
    cmd.current_dir(dir)
        .env_remove("PARVAR_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn minimal_output(cmd: &mut Command) -> f64 {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap().trim().parse().unwrap()
}

// =============================================================================
// VAR COMMAND
// =============================================================================

#[test]
fn var_minimal_prints_yearly_figure() {
    let dir = workspace();
    let value = minimal_output(parvar(dir.path()).args([
        "--format",
        "minimal",
        "var",
        "--prices",
        "prices.json",
        "--risk-level",
        "0.01",
        "--collateral",
        "10000",
        "--horizon",
        "yearly",
    ]));
    assert_relative_eq!(value, YEARLY_VAR, max_relative = 1e-9);
}

#[test]
fn var_accepts_numeric_horizon_codes() {
    let dir = workspace();
    let value = minimal_output(parvar(dir.path()).args([
        "-f",
        "minimal",
        "var",
        "-p",
        "prices.json",
        "--horizon",
        "0",
    ]));
    assert_relative_eq!(value, DAILY_VAR, max_relative = 1e-9);
}

#[test]
fn var_reads_csv() {
    let dir = workspace();
    let value = minimal_output(parvar(dir.path()).args([
        "--format",
        "minimal",
        "var",
        "--prices",
        "prices.csv",
    ]));
    assert_relative_eq!(value, YEARLY_VAR, max_relative = 1e-9);
}

#[test]
fn var_json_output() {
    let dir = workspace();
    let output = parvar(dir.path())
        .args(["--format", "json", "var", "--prices", "prices.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["source"], "historical");
    assert_eq!(value["observations"], 6);
    assert_eq!(value["horizon"], "yearly");
    assert_relative_eq!(
        value["horizon_var"].as_f64().unwrap(),
        YEARLY_VAR,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        value["daily_var"].as_f64().unwrap(),
        DAILY_VAR,
        max_relative = 1e-9
    );
}

#[test]
fn var_table_output() {
    let dir = workspace();
    parvar(dir.path())
        .args(["var", "--prices", "prices.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VaR (yearly)"))
        .stdout(predicate::str::contains("11587.76"));
}

#[test]
fn var_csv_output_has_header() {
    let dir = workspace();
    parvar(dir.path())
        .args(["--format", "csv", "var", "--prices", "prices.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("source,observations"));
}

#[test]
fn student_t_without_dof_fits_tail() {
    let dir = workspace();
    let prices = serde_json::to_string(&garch_prices(600, 7)).unwrap();
    fs::write(dir.path().join("long.json"), prices).unwrap();

    let value = json_output(parvar(dir.path()).args([
        "--format",
        "json",
        "var",
        "--prices",
        "long.json",
        "--model",
        "student-t",
    ]));

    let model = value["model"].as_str().unwrap();
    assert!(model.starts_with("student-t(ν="), "model = {model}");
    assert!(value["z_score"].as_f64().unwrap() > 2.3263478740408408);
}

#[test]
fn student_t_fit_needs_history() {
    let dir = workspace();
    parvar(dir.path())
        .args(["var", "--prices", "prices.json", "--model", "student-t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InsufficientDataError"));
}

#[test]
fn garch_volatility_from_flag() {
    let dir = workspace();
    let prices = serde_json::to_string(&garch_prices(600, 42)).unwrap();
    fs::write(dir.path().join("long.json"), prices).unwrap();

    let value = json_output(parvar(dir.path()).args([
        "--format",
        "json",
        "var",
        "--prices",
        "long.json",
        "--volatility",
        "garch",
    ]));

    assert_eq!(value["source"], "garch");
    assert_eq!(value["observations"], 600);
    let alpha = value["garch_alpha"].as_f64().unwrap();
    let beta = value["garch_beta"].as_f64().unwrap();
    assert!(alpha > 0.0 && beta > 0.0 && alpha + beta < 1.0);
    assert_relative_eq!(
        value["horizon_var"].as_f64().unwrap(),
        value["daily_var"].as_f64().unwrap() * 365f64.sqrt(),
        max_relative = 1e-12
    );
}

#[test]
fn garch_needs_more_prices() {
    let dir = workspace();
    parvar(dir.path())
        .args(["var", "--prices", "prices.json", "--volatility", "garch"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("InsufficientDataError"));
}

#[test]
fn unordered_timestamps_warn() {
    let dir = workspace();
    fs::write(
        dir.path().join("reversed.json"),
        r#"[
            {"timestamp": "2024-01-06T00:00:00Z", "rate_close": 100.0},
            {"timestamp": "2024-01-05T00:00:00Z", "rate_close": 98.0},
            {"timestamp": "2024-01-04T00:00:00Z", "rate_close": 102.0}
        ]"#,
    )
    .unwrap();

    parvar(dir.path())
        .args(["--format", "minimal", "var", "--prices", "reversed.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not in ascending order"));
}

// =============================================================================
// ERROR REPORTING
// =============================================================================

#[test]
fn invalid_risk_level_fails() {
    let dir = workspace();
    parvar(dir.path())
        .args(["var", "--prices", "prices.json", "--risk-level", "1.5"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("InvalidParameterError"));
}

#[test]
fn invalid_collateral_fails() {
    let dir = workspace();
    parvar(dir.path())
        .args(["var", "--prices", "prices.json", "--collateral", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidParameterError"));
}

#[test]
fn single_price_fails() {
    let dir = workspace();
    fs::write(dir.path().join("one.json"), "[100.0]").unwrap();
    parvar(dir.path())
        .args(["var", "--prices", "one.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InsufficientDataError"));
}

#[test]
fn zero_price_fails() {
    let dir = workspace();
    fs::write(dir.path().join("zero.json"), "[100.0, 0.0, 101.0]").unwrap();
    parvar(dir.path())
        .args(["var", "--prices", "zero.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NonPositivePriceError"));
}

#[test]
fn unknown_horizon_rejected_by_parser() {
    let dir = workspace();
    parvar(dir.path())
        .args(["var", "--prices", "prices.json", "--horizon", "7"])
        .assert()
        .failure();
}

// =============================================================================
// IMPLIED COMMAND
// =============================================================================

#[test]
fn implied_daily_var() {
    let dir = workspace();
    let value = minimal_output(parvar(dir.path()).args([
        "--format",
        "minimal",
        "implied",
        "--vol",
        "65",
        "--horizon",
        "daily",
        "--risk-level",
        "0.01",
        "--collateral",
        "10000",
    ]));
    let expected = 10_000.0 * 2.3263478740408408 * 0.65 / 365.0_f64.sqrt();
    assert_relative_eq!(value, expected, max_relative = 1e-9);
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn config_file_supplies_defaults() {
    let dir = workspace();
    fs::write(
        dir.path().join("custom.toml"),
        "horizon = \"daily\"\ncollateral = 20000.0\n",
    )
    .unwrap();

    let value = minimal_output(parvar(dir.path()).args([
        "--config",
        "custom.toml",
        "--format",
        "minimal",
        "var",
        "--prices",
        "prices.json",
    ]));
    assert_relative_eq!(value, 2.0 * DAILY_VAR, max_relative = 1e-9);
}

#[test]
fn default_config_file_is_picked_up() {
    let dir = workspace();
    fs::write(dir.path().join("parvar.toml"), "horizon = \"daily\"\n").unwrap();

    let value = minimal_output(parvar(dir.path()).args([
        "--format",
        "minimal",
        "var",
        "--prices",
        "prices.json",
    ]));
    assert_relative_eq!(value, DAILY_VAR, max_relative = 1e-9);
}

#[test]
fn flags_override_config() {
    let dir = workspace();
    fs::write(dir.path().join("parvar.toml"), "horizon = \"daily\"\n").unwrap();

    let value = minimal_output(parvar(dir.path()).args([
        "--format",
        "minimal",
        "var",
        "--prices",
        "prices.json",
        "--horizon",
        "yearly",
    ]));
    assert_relative_eq!(value, YEARLY_VAR, max_relative = 1e-9);
}

#[test]
fn unknown_config_key_fails() {
    let dir = workspace();
    fs::write(dir.path().join("bad.toml"), "confidence = 0.99\n").unwrap();
    parvar(dir.path())
        .args(["--config", "bad.toml", "var", "--prices", "prices.json"])
        .assert()
        .failure();
}

// =============================================================================
// BATCH COMMAND
// =============================================================================

#[test]
fn batch_reports_every_entry() {
    let dir = workspace();
    fs::write(
        dir.path().join("manifest.json"),
        r#"[
            {"id": "file", "prices_file": "prices.json"},
            {"id": "inline", "prices": [100.0, 101.0, 99.0, 102.0, 98.0, 100.0], "horizon": "daily"}
        ]"#,
    )
    .unwrap();

    let output = parvar(dir.path())
        .args(["--format", "minimal", "batch", "--manifest", "manifest.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines: Vec<f64> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| l.trim().parse().unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_relative_eq!(lines[0], YEARLY_VAR, max_relative = 1e-9);
    assert_relative_eq!(lines[1], DAILY_VAR, max_relative = 1e-9);
}

#[test]
fn batch_failure_is_isolated() {
    let dir = workspace();
    fs::write(
        dir.path().join("manifest.json"),
        r#"[
            {"id": "good", "prices": [100.0, 101.0, 99.0, 102.0, 98.0, 100.0]},
            {"id": "short", "prices": [100.0]},
            {"id": "bad-alpha", "prices": [100.0, 101.0], "risk_level": 2.0}
        ]"#,
    )
    .unwrap();

    parvar(dir.path())
        .args(["--format", "minimal", "batch", "--manifest", "manifest.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("11587.76"))
        .stdout(predicate::str::contains("InsufficientDataError"))
        .stdout(predicate::str::contains("InvalidParameterError"))
        .stderr(predicate::str::contains("2 of 3 batch requests failed"));
}

#[test]
fn batch_entry_without_prices_is_isolated() {
    let dir = workspace();
    fs::write(
        dir.path().join("manifest.json"),
        r#"[
            {"id": "good", "prices": [100, 101, 99, 102, 98, 100]},
            {"id": "no-prices"}
        ]"#,
    )
    .unwrap();

    parvar(dir.path())
        .args(["--format", "minimal", "batch", "--manifest", "manifest.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("11587.76"))
        .stdout(predicate::str::contains("InvalidParameterError"))
        .stderr(predicate::str::contains("1 of 2 batch requests failed"));
}
