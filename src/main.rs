//! BEHS simulator entry point: CLI wiring and config-driven simulation run.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process;

use behs_sim::config::ScenarioConfig;
use behs_sim::io::ComponentLabels;
use behs_sim::io::export::{export_csv, write_csv};
use behs_sim::io::log::export_log;
use behs_sim::io::sheet;
use behs_sim::logging::init_tracing;
use behs_sim::sim::summary::RunSummary;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    log_out: Option<String>,
    csv_out: Option<String>,
    sheet_out: Option<String>,
    quiet: bool,
    verbose: bool,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("behs-sim — battery-less energy-harvesting system simulator");
    eprintln!();
    eprintln!("Usage: behs-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>    Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>      Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>         Override the harvesting supply seed");
    eprintln!("  --log-out <path>     Write the human-readable run log");
    eprintln!("  --csv-out <path>     Export tick snapshots to CSV");
    eprintln!("  --sheet-out <path>   Export tick snapshots as a tab-separated sheet");
    eprintln!("  --quiet              Print only the run summary");
    eprintln!("  --verbose            Trace every tick on stderr");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                Plot the run in the terminal");
    eprintln!("  --help               Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

/// Returns the value following flag `args[*i]`, exiting when it is missing.
fn flag_value(args: &[String], i: &mut usize, what: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {} requires {what}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        log_out: None,
        csv_out: None,
        sheet_out: None,
        quiet: false,
        verbose: false,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => cli.scenario_path = Some(flag_value(&args, &mut i, "a path argument")),
            "--preset" => cli.preset = Some(flag_value(&args, &mut i, "a name argument")),
            "--seed" => {
                let raw = flag_value(&args, &mut i, "a u64 argument");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--log-out" => cli.log_out = Some(flag_value(&args, &mut i, "a path argument")),
            "--csv-out" => cli.csv_out = Some(flag_value(&args, &mut i, "a path argument")),
            "--sheet-out" => cli.sheet_out = Some(flag_value(&args, &mut i, "a path argument")),
            "--quiet" | "-q" => cli.quiet = true,
            "--verbose" | "-v" => cli.verbose = true,
            #[cfg(feature = "tui")]
            "--tui" => cli.tui = true,
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --scenario and --preset are mutually exclusive");
        process::exit(1);
    }

    cli
}

fn load_scenario(cli: &CliArgs) -> ScenarioConfig {
    // --scenario takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };

    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed_override {
        scenario.supply.seed = seed;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    scenario
}

fn main() {
    let cli = parse_args();
    let scenario = load_scenario(&cli);

    #[cfg(feature = "tui")]
    if cli.tui {
        let name = cli
            .scenario_path
            .as_deref()
            .or(cli.preset.as_deref())
            .unwrap_or("baseline");
        if let Err(e) = behs_sim::tui::run(scenario, name) {
            eprintln!("error: plotter failed: {e}");
            process::exit(1);
        }
        return;
    }

    init_tracing(cli.verbose);

    let mut sim = scenario.build();
    let labels = ComponentLabels::of(&sim);
    let snapshots = sim.run().unwrap_or_else(|e| {
        tracing::error!(error = %e, "simulation aborted");
        eprintln!("error: {e}");
        process::exit(1);
    });

    if !cli.quiet {
        for s in &snapshots {
            println!("{s}");
        }
    }
    println!("\n{}", RunSummary::from_snapshots(&snapshots));

    if let Some(ref path) = cli.log_out {
        if let Err(e) = export_log(&snapshots, &labels, Path::new(path)) {
            eprintln!("error: failed to write log: {e}");
            process::exit(1);
        }
        eprintln!("Run log written to {path}");
    }

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&snapshots, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("CSV written to {path}");
    }

    if let Some(ref path) = cli.sheet_out {
        // Convert the CSV file when one was written, otherwise an in-memory export
        let result = match cli.csv_out {
            Some(ref csv_path) => sheet::convert_file(Path::new(csv_path), Path::new(path)),
            None => {
                let mut buf = Vec::new();
                write_csv(&snapshots, &mut buf)
                    .map_err(csv::Error::from)
                    .and_then(|()| File::create(path).map_err(csv::Error::from))
                    .and_then(|file| sheet::convert(buf.as_slice(), BufWriter::new(file)))
            }
        };
        if let Err(e) = result {
            eprintln!("error: failed to write sheet: {e}");
            process::exit(1);
        }
        eprintln!("Sheet written to {path}");
    }
}
