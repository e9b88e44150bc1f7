use approx::assert_abs_diff_eq;
use salvo_core::commands::HostCommand;
use salvo_core::components::{ControlChannel, ProjectileRecord, ProjectileReport};
use salvo_core::constants::DT;
use salvo_core::state::TickInput;
use salvo_core::types::{Position, SimTime, Velocity};
use test_log::test;

use crate::altitude::AltitudeHold;
use crate::calibration::{CalibrationConfig, CalibrationPhase, Calibrator};
use crate::pd::{PdController, PdGains};
use crate::propulsion::CruiseControl;

fn report(id: u64, position: Position, velocity: Velocity, age: f64) -> ProjectileReport {
    ProjectileReport {
        projectile: ProjectileRecord {
            id,
            position,
            velocity,
            time_since_launch: age,
        },
        parts: Vec::new(),
    }
}

fn input(tick: u64, projectiles: Vec<ProjectileReport>) -> TickInput {
    TickInput {
        time: SimTime {
            tick,
            elapsed_secs: tick as f64 * DT,
        },
        sensor_groups: Vec::new(),
        channels: vec![ControlChannel { id: 1, projectiles }],
    }
}

/// Heading in the horizontal plane, rotated `deg` degrees from north.
fn heading(deg: f64, speed: f64) -> Velocity {
    let r = deg.to_radians();
    Velocity::new(r.sin() * speed, 0.0, r.cos() * speed)
}

fn detonated(commands: &[HostCommand]) -> Vec<u64> {
    commands
        .iter()
        .filter_map(|c| match c {
            HostCommand::Detonate { projectile, .. } => Some(*projectile),
            _ => None,
        })
        .collect()
}

fn hud_lines(commands: &[HostCommand]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, HostCommand::LogHud { .. }))
        .count()
}

// ---- PD loops ----

#[test]
fn test_pd_first_sample_has_no_derivative() {
    let mut pd = PdController::new(PdGains { kp: 2.0, kd: 1.0 });
    assert_abs_diff_eq!(pd.update(3.0, 0.1), 6.0, epsilon = 1e-9);
    // 2*2 + (2-3)/0.1
    assert_abs_diff_eq!(pd.update(2.0, 0.1), -6.0, epsilon = 1e-9);

    pd.reset();
    assert_abs_diff_eq!(pd.update(2.0, 0.1), 4.0, epsilon = 1e-9);
}

#[test]
fn test_pd_ignores_derivative_without_elapsed_time() {
    let mut pd = PdController::new(PdGains { kp: 1.0, kd: 5.0 });
    pd.update(1.0, DT);
    assert_abs_diff_eq!(pd.update(4.0, 0.0), 4.0, epsilon = 1e-9);
}

#[test]
fn test_altitude_hold_output_clamped() {
    let mut low = AltitudeHold::new(100.0, 0.5);
    assert_abs_diff_eq!(low.update(0.0, DT), 1.0);

    let mut high = AltitudeHold::new(100.0, 0.5);
    assert_abs_diff_eq!(high.update(1000.0, DT), 0.0);

    let mut level = AltitudeHold::new(100.0, 0.5);
    assert_abs_diff_eq!(level.update(100.0, DT), 0.5, epsilon = 1e-9);
}

#[test]
fn test_cruise_control_ramps_and_saturates() {
    let mut cruise = CruiseControl::new(200.0);
    let first = cruise.update(0.0, DT);
    let second = cruise.update(0.0, DT);
    assert!(first > 0.0);
    assert!(second > first);

    for _ in 0..500 {
        cruise.update(0.0, DT);
    }
    assert_abs_diff_eq!(cruise.output(), 1.0);

    for _ in 0..2000 {
        cruise.update(400.0, DT);
    }
    assert_abs_diff_eq!(cruise.output(), 0.0);
}

// ---- Calibration ----

#[test]
fn test_calibration_detonates_extra_projectiles() {
    let mut cal = Calibrator::new(CalibrationConfig::default());
    let v = heading(0.0, 100.0);
    let crowd = vec![
        report(1, Position::default(), v, 0.0),
        report(2, Position::new(10.0, 0.0, 0.0), v, 0.0),
        report(3, Position::new(20.0, 0.0, 0.0), v, 0.0),
    ];

    let commands = cal.update(&input(0, crowd.clone()));
    assert_eq!(detonated(&commands), vec![2, 3]);
    assert_eq!(hud_lines(&commands), 1);
    assert_eq!(cal.phase(), CalibrationPhase::Settling);

    // Warns again on every tick the crowd persists, but detonates only once.
    let again = cal.update(&input(1, crowd));
    assert_eq!(hud_lines(&again), 1);
    assert!(detonated(&again).is_empty());
}

#[test]
fn test_calibration_keeps_tracked_projectile_when_another_appears_first() {
    let mut cal = Calibrator::new(CalibrationConfig::default());
    let v = heading(0.0, 100.0);
    let measured = report(5, Position::new(0.0, 50.0, 0.0), v, 0.0);
    let newcomer = report(3, Position::new(5.0, 10.0, 0.0), v, 0.0);

    cal.update(&input(0, vec![measured.clone()]));
    assert_eq!(cal.measurement().map(|m| m.projectile), Some(5));

    let commands = cal.update(&input(1, vec![newcomer.clone(), measured.clone()]));
    assert_eq!(detonated(&commands), vec![3]);
    assert!(cal.report().is_none());
    assert_eq!(cal.measurement().map(|m| m.projectile), Some(5));

    let aimed: Vec<u64> = commands
        .iter()
        .filter_map(|c| match c {
            HostCommand::SetAimPoint { projectile, .. } => Some(*projectile),
            _ => None,
        })
        .collect();
    assert_eq!(aimed, vec![5]);

    // The detonated newcomer is not re-adopted once the measured one is gone.
    let after = cal.update(&input(2, vec![newcomer]));
    assert_eq!(cal.report().map(|r| r.projectile), Some(5));
    assert!(detonated(&after).is_empty());
    assert!(cal.measurement().is_none());
}

#[test]
fn test_calibration_aims_ahead_then_behind() {
    let config = CalibrationConfig {
        settle_secs: 1.0,
        ..CalibrationConfig::default()
    };
    let mut cal = Calibrator::new(config);
    let pos = Position::new(0.0, 50.0, 0.0);
    let v = heading(0.0, 100.0);

    let early = cal.update(&input(0, vec![report(1, pos, v, 0.0)]));
    let aim = early
        .iter()
        .find_map(|c| match c {
            HostCommand::SetAimPoint { position, .. } => Some(*position),
            _ => None,
        })
        .unwrap();
    assert!(aim.z > pos.z);

    let late = cal.update(&input(60, vec![report(1, pos, v, 1.5)]));
    let aim = late
        .iter()
        .find_map(|c| match c {
            HostCommand::SetAimPoint { position, .. } => Some(*position),
            _ => None,
        })
        .unwrap();
    assert!(aim.z < pos.z);
    assert_eq!(cal.phase(), CalibrationPhase::Reversing);
}

#[test]
fn test_calibration_reports_when_projectile_lost() {
    let config = CalibrationConfig {
        settle_secs: 2.0,
        ..CalibrationConfig::default()
    };
    let mut cal = Calibrator::new(config);
    let mut position = Position::new(0.0, 100.0, 0.0);

    // Accelerates to 200 m/s, then turns one degree per tick once reversing.
    for tick in 0..200u64 {
        let age = tick as f64 * DT;
        let velocity = if tick < 100 {
            heading(0.0, (100.0 + tick as f64 * 2.0).min(200.0))
        } else {
            heading((tick - 100) as f64, 180.0)
        };
        position = position.projected(&velocity, DT);
        cal.update(&input(tick, vec![report(7, position, velocity, age)]));
        assert!(cal.report().is_none());
    }

    let commands = cal.update(&input(200, Vec::new()));
    assert_eq!(hud_lines(&commands), 1);
    assert_eq!(cal.phase(), CalibrationPhase::Done);

    let report = cal.report().copied().unwrap();
    assert_eq!(report.projectile, 7);
    assert_abs_diff_eq!(report.cruise_speed, 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(report.turn_rate_deg, 1.0 / DT, epsilon = 1e-3);
}

#[test]
fn test_calibration_report_serializes() {
    let mut cal = Calibrator::new(CalibrationConfig::default());
    cal.update(&input(0, vec![report(3, Position::default(), heading(0.0, 50.0), 0.0)]));
    cal.update(&input(1, Vec::new()));

    let json = serde_json::to_string(cal.report().unwrap()).unwrap();
    assert!(json.contains("\"cruise_speed\":50"));
    assert!(json.contains("\"turn_rate_deg\":0"));
}
