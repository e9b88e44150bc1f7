#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::commands::HostCommand;
    use crate::components::*;
    use crate::config::{ConfigError, GuidanceConfig, TurnModel};
    use crate::enums::*;
    use crate::state::TickInput;
    use crate::types::{Position, SimTime, Velocity};

    #[test]
    fn test_position_range_and_projection() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert_abs_diff_eq!(a.range_to(&b), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.horizontal_range_to(&b), 3.0, epsilon = 1e-12);

        let moved = a.projected(&Velocity::new(10.0, 0.0, -4.0), 0.5);
        assert_eq!(moved, Position::new(5.0, 0.0, -2.0));
        assert_eq!(b.raised(10.0), Position::new(3.0, 14.0, 0.0));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..40 {
            time.advance();
        }
        assert_eq!(time.tick, 40);
        assert_abs_diff_eq!(time.elapsed_secs, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_part_kind_from_name() {
        assert_eq!(PartKind::from_name("Missile Variable Thruster"), PartKind::VariableThruster);
        assert_eq!(PartKind::from_name("short range thruster"), PartKind::ShortRangeThruster);
        assert_eq!(PartKind::from_name("Torpedo Propeller"), PartKind::Propeller);
        assert_eq!(PartKind::from_name("missile fuel tank"), PartKind::FuelTank);
        assert_eq!(PartKind::from_name("warhead"), PartKind::Other);
        assert!(PartKind::VariableThruster.is_air_propulsion());
        assert!(!PartKind::Propeller.is_air_propulsion());
        assert!(PartKind::Propeller.is_water_propulsion());
    }

    #[test]
    fn test_target_usability() {
        let mut target = TargetRecord {
            id: 1,
            aim_point: Position::new(0.0, 10.0, 0.0),
            velocity: Velocity::default(),
            player_choice: false,
            protected: false,
            priority: 0,
            score: 1.0,
            valid: true,
        };
        assert!(target.is_usable());
        target.aim_point.y = f64::NAN;
        assert!(!target.is_usable());
        target.aim_point.y = 0.0;
        target.valid = false;
        assert!(!target.is_usable());
    }

    #[test]
    fn test_host_command_tagged_json() {
        let cmd = HostCommand::Detonate {
            channel: 2,
            projectile: 9,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"Detonate\""), "got {json}");
        let back: HostCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
        assert_eq!(back.projectile(), Some(9));
        assert_eq!(
            HostCommand::Log {
                message: "x".into()
            }
            .projectile(),
            None
        );
    }

    #[test]
    fn test_tick_input_from_json_defaults_parts() {
        let json = r#"{
            "time": { "tick": 3, "elapsed_secs": 0.075 },
            "sensor_groups": [],
            "channels": [
                { "id": 0, "projectiles": [
                    { "projectile": { "id": 5,
                        "position": { "x": 0, "y": 1, "z": 0 },
                        "velocity": { "x": 0, "y": 0, "z": 50 },
                        "time_since_launch": 0.2 } }
                ] }
            ]
        }"#;
        let input: TickInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.projectile_count(), 1);
        assert!(input.channels[0].projectiles[0].parts.is_empty());
    }

    #[test]
    fn test_default_config_validates() {
        GuidanceConfig::default().validate().unwrap();
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = GuidanceConfig::from_json(
            r#"{ "chase_unicorns": true,
                 "turn_model": { "turn_rate_deg": 90.0, "cruise_speed": 250.0 },
                 "proximity_arming": { "mode": "FuelFraction", "fraction": 0.2 } }"#,
        )
        .unwrap();
        assert!(config.chase_unicorns);
        assert_eq!(
            config.turn_model,
            Some(TurnModel {
                turn_rate_deg: 90.0,
                cruise_speed: 250.0
            })
        );
        assert_eq!(
            config.proximity_arming,
            ProximityArming::FuelFraction { fraction: 0.2 }
        );
        // Untouched fields keep their defaults.
        assert_eq!(config.max_range, GuidanceConfig::default().max_range);
        assert_abs_diff_eq!(config.off_course_angle(), 45f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = GuidanceConfig::from_json(r#"{ "min_thrust": 0.9, "max_thrust": 0.5 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedThrustBounds { .. }));

        let err = GuidanceConfig::from_json(r#"{ "max_range": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                name: "max_range",
                ..
            }
        ));

        let err = GuidanceConfig::from_json(r#"{ "steer_interval_ticks": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));

        let err = GuidanceConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid config JSON"));
    }
}
