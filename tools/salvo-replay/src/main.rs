//! salvo-replay: headless engagement runner and calibration flight.
//!
//! Usage:
//!   salvo-replay run --config salvo.json --seed 7 --ticks 2000 --projectiles 6 --targets 4
//!   salvo-replay calibrate --ticks 400 --settle 3

use std::path::PathBuf;
use std::process;

use serde::Serialize;

use salvo_control::calibration::{CalibrationConfig, CalibrationReport, Calibrator};
use salvo_core::types::{Position, Velocity};
use salvo_sim::{HostSimulation, SimConfig, SimStats};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "calibrate" => cmd_calibrate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "salvo-replay: SALVO guidance replay tool\n\
         \n\
         Commands:\n\
         \n\
         run        Fly a seeded salvo against random targets and print a JSON summary\n\
         \n\
           --config <path>    JSON run config (optional, defaults otherwise)\n\
           --seed <N>         Override the config seed\n\
           --ticks <N>        Ticks to simulate (default: 2000)\n\
           --projectiles <N>  Salvo size (default: 4)\n\
           --targets <N>      Target count (default: 3)\n\
         \n\
         calibrate  Fly one projectile through a hard reversal and print its turn model\n\
         \n\
           --ticks <N>        Ticks to simulate (default: 400)\n\
           --settle <secs>    Straight flight before the reversal (default: 3)\n"
    );
}

fn parse_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(e),
    }
}

// --- Run command ---

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    stats: SimStats,
    remaining_projectiles: usize,
    remaining_targets: usize,
}

fn load_config(path: Option<PathBuf>) -> SimConfig {
    let Some(path) = path else {
        return SimConfig::default();
    };
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => fail(format!("cannot read {}: {e}", path.display())),
    };
    match SimConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => fail(e),
    }
}

fn cmd_run(args: &[String]) {
    let mut config = load_config(parse_value::<String>(args, "--config").map(PathBuf::from));
    if let Some(seed) = parse_value(args, "--seed") {
        config.seed = seed;
    }
    let ticks: u64 = parse_value(args, "--ticks").unwrap_or(2000);
    let projectiles: usize = parse_value(args, "--projectiles").unwrap_or(4);
    let targets: usize = parse_value(args, "--targets").unwrap_or(3);
    let seed = config.seed;

    let mut sim = match HostSimulation::new(config) {
        Ok(sim) => sim,
        Err(e) => fail(e),
    };
    sim.spawn_targets(targets);
    sim.launch_salvo(1, projectiles);
    log::info!("running seed {seed}: {projectiles} projectiles, {targets} targets, {ticks} ticks");

    for _ in 0..ticks {
        sim.tick();
        if sim.projectile_count() == 0 {
            break;
        }
    }

    print_json(&RunSummary {
        seed,
        stats: sim.stats().clone(),
        remaining_projectiles: sim.projectile_count(),
        remaining_targets: sim.target_count(),
    });
}

// --- Calibrate command ---

fn cmd_calibrate(args: &[String]) {
    let ticks: u64 = parse_value(args, "--ticks").unwrap_or(400);
    let mut calibration = CalibrationConfig::default();
    if let Some(settle) = parse_value(args, "--settle") {
        calibration.settle_secs = settle;
    }

    let mut sim = match HostSimulation::new(SimConfig::default()) {
        Ok(sim) => sim,
        Err(e) => fail(e),
    };
    sim.launch(
        1,
        Position::new(0.0, 500.0, 0.0),
        Velocity::new(0.0, 0.0, 100.0),
    );

    let mut calibrator = Calibrator::new(calibration);
    for _ in 0..ticks {
        sim.tick_with(|input| calibrator.update(input));
        if calibrator.report().is_some() {
            break;
        }
    }

    let report: Option<CalibrationReport> =
        calibrator.report().copied().or_else(|| calibrator.measurement());
    match report {
        Some(report) => print_json(&report),
        None => fail("no projectile was measured"),
    }
}
