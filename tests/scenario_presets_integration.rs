use std::fs;
use std::process::{Command, Output};

#[derive(Debug)]
struct Summary {
    ticks: f64,
    load_active_ticks: f64,
    total_energy_consumed: f64,
}

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_dynamics() {
    let baseline = run_and_parse_summary(&["--scenario", "scenarios/baseline.toml"]);
    let mcu = run_and_parse_summary(&["--scenario", "scenarios/mcu.toml"]);
    let harvesting = run_and_parse_summary(&["--scenario", "scenarios/harvesting.toml"]);

    assert!((baseline.ticks - 241.0).abs() < 1e-9, "{baseline:?}");
    assert!((harvesting.ticks - 481.0).abs() < 1e-9, "{harvesting:?}");

    assert!(baseline.load_active_ticks > 0.0, "{baseline:?}");
    assert!(
        (baseline.total_energy_consumed - mcu.total_energy_consumed).abs() > 1e-3,
        "expected resistor and mcu loads to differ: baseline={baseline:?}, mcu={mcu:?}"
    );
    assert!(
        (mcu.total_energy_consumed - harvesting.total_energy_consumed).abs() > 1e-3,
        "expected constant and harvesting supplies to differ: mcu={mcu:?}, harvesting={harvesting:?}"
    );
}

#[test]
fn preset_and_scenario_file_agree() {
    let from_file = run_and_parse_summary(&["--scenario", "scenarios/baseline.toml"]);
    let from_preset = run_and_parse_summary(&["--preset", "baseline"]);

    assert!((from_file.ticks - from_preset.ticks).abs() < 1e-9);
    assert!((from_file.total_energy_consumed - from_preset.total_energy_consumed).abs() < 1e-9);
}

#[test]
fn seed_override_changes_harvesting_run() {
    let a = run_and_parse_summary(&["--preset", "harvesting", "--seed", "1"]);
    let b = run_and_parse_summary(&["--preset", "harvesting", "--seed", "1"]);
    let c = run_and_parse_summary(&["--preset", "harvesting", "--seed", "2"]);

    assert!((a.total_energy_consumed - b.total_energy_consumed).abs() < 1e-12);
    assert!(
        (a.total_energy_consumed - c.total_energy_consumed).abs() > 0.0
            || (a.load_active_ticks - c.load_active_ticks).abs() > 0.0,
        "expected seeds to differ: {a:?} vs {c:?}"
    );
}

#[test]
fn exports_are_written_alongside_the_run() {
    let dir = std::env::temp_dir().join(format!("behs-sim-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    let csv = dir.join("run.csv");
    let sheet = dir.join("run.tsv");
    let log = dir.join("run.log");

    let output = run(&[
        "--preset",
        "mcu",
        "--quiet",
        "--csv-out",
        csv.to_str().expect("utf-8 path"),
        "--sheet-out",
        sheet.to_str().expect("utf-8 path"),
        "--log-out",
        log.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success());

    let csv_text = fs::read_to_string(&csv).expect("csv should exist");
    assert_eq!(csv_text.lines().count(), 3 * 241 + 1);

    let sheet_text = fs::read_to_string(&sheet).expect("sheet should exist");
    assert_eq!(sheet_text.lines().count(), 3 * 241 + 1);
    assert!(sheet_text.lines().all(|l| l.split('\t').count() == 8));

    let log_text = fs::read_to_string(&log).expect("log should exist");
    assert!(!log_text.is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_inputs_exit_with_failure() {
    assert!(!run(&["--preset", "unknown"]).status.success());
    assert!(!run(&["--scenario", "scenarios/missing.toml"]).status.success());
    assert!(!run(&["--preset", "baseline", "--scenario", "scenarios/baseline.toml"]).status.success());
    assert!(!run(&["--seed", "abc"]).status.success());
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_behs-sim"))
        .args(args)
        .output()
        .expect("behs-sim process should run")
}

fn run_and_parse_summary(args: &[&str]) -> Summary {
    let output = run(&[args, &["--quiet"]].concat());

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    Summary {
        ticks: parse_metric(&stdout, "Ticks:", ""),
        load_active_ticks: parse_metric(&stdout, "Load active ticks:", ""),
        total_energy_consumed: parse_metric(&stdout, "Total energy consumed:", "J"),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing summary line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid summary format for line `{line}`"));

    raw.trim_end_matches(unit)
        .trim()
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed to parse `{label}` from `{line}`"))
}
