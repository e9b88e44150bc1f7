//! Host simulation engine.
//!
//! `HostSimulation` plays the part of the game host: it owns the hecs world,
//! hands guidance a fresh `TickInput` every tick, applies the commands it
//! gets back and advances the flight model. Same config and seed produce the
//! same command stream.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use salvo_core::commands::HostCommand;
use salvo_core::config::{ConfigError, GuidanceConfig};
use salvo_core::constants::*;
use salvo_core::state::TickInput;
use salvo_core::types::{Position, SimTime, Velocity};
use salvo_guidance::GuidanceEngine;

use crate::components::{ProjectileBody, TargetBody};
use crate::systems;
use crate::systems::movement::FlightModel;
use crate::world_setup;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub guidance: GuidanceConfig,
    pub world_radius: f64,
    pub lethal_radius: f64,
    pub top_speed: f64,
    pub acceleration: f64,
    pub turn_rate_deg: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            guidance: GuidanceConfig::default(),
            world_radius: DEFAULT_WORLD_RADIUS,
            lethal_radius: DEFAULT_LETHAL_RADIUS,
            top_speed: SIM_TOP_SPEED,
            acceleration: SIM_ACCELERATION,
            turn_rate_deg: SIM_TURN_RATE_DEG,
        }
    }
}

impl SimConfig {
    /// Parse a JSON run config. Missing fields take their defaults and the
    /// guidance section is validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.guidance.validate()?;
        Ok(config)
    }

    fn flight_model(&self) -> FlightModel {
        FlightModel {
            top_speed: self.top_speed,
            acceleration: self.acceleration,
            turn_rate: self.turn_rate_deg.to_radians(),
        }
    }
}

/// Running totals for a simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimStats {
    pub ticks: u64,
    pub launched: u64,
    pub detonations: u64,
    pub targets_destroyed: Vec<u64>,
    pub log_lines: u64,
    /// Operator HUD lines, in order.
    pub hud: Vec<String>,
}

pub struct HostSimulation {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    guidance: GuidanceEngine,
    config: SimConfig,
    next_id: u64,
    despawn_buffer: Vec<Entity>,
    stats: SimStats,
}

impl HostSimulation {
    /// Create a simulation with an empty world. Fails if the guidance
    /// tunables are invalid.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let guidance = GuidanceEngine::with_config(config.guidance.clone())?;
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            guidance,
            config,
            next_id: 1,
            despawn_buffer: Vec::new(),
            stats: SimStats::default(),
        })
    }

    /// Launch `count` projectiles on `channel` from around the origin.
    pub fn launch_salvo(&mut self, channel: u32, count: usize) -> Vec<u64> {
        (0..count)
            .map(|_| {
                let (position, velocity) = world_setup::launch_state(&mut self.rng);
                self.launch(channel, position, velocity)
            })
            .collect()
    }

    /// Launch one projectile with the standard part layout.
    pub fn launch(&mut self, channel: u32, position: Position, velocity: Velocity) -> u64 {
        let id = self.allocate_id();
        let body = ProjectileBody {
            id,
            channel,
            launched_at: self.time.elapsed_secs,
            parts: world_setup::default_parts(),
            aim: None,
        };
        world_setup::spawn_projectile(&mut self.world, body, position, velocity);
        self.stats.launched += 1;
        log::debug!("launched projectile {id} on channel {channel}");
        id
    }

    /// Scatter `count` surface targets ahead of the launcher.
    pub fn spawn_targets(&mut self, count: usize) -> Vec<u64> {
        (0..count)
            .map(|_| {
                let id = self.allocate_id();
                let (body, position, velocity) = world_setup::random_target(&mut self.rng, id);
                world_setup::spawn_target(&mut self.world, body, position, velocity);
                id
            })
            .collect()
    }

    /// Place a target with neutral doctrine flags.
    pub fn add_target(&mut self, position: Position, velocity: Velocity) -> u64 {
        let id = self.allocate_id();
        let body = TargetBody {
            id,
            player_choice: false,
            protected: false,
            priority: 1,
            score: 0.0,
        };
        world_setup::spawn_target(&mut self.world, body, position, velocity);
        id
    }

    /// Advance one tick and return the commands guidance issued.
    pub fn tick(&mut self) -> Vec<HostCommand> {
        let input = systems::sensors::build_tick_input(&self.world, self.time);
        let commands = self.guidance.tick(&input);
        self.advance(&commands);
        commands
    }

    /// Advance one tick with another controller in place of guidance, such
    /// as the calibration flight.
    pub fn tick_with<F>(&mut self, controller: F) -> Vec<HostCommand>
    where
        F: FnOnce(&TickInput) -> Vec<HostCommand>,
    {
        let input = systems::sensors::build_tick_input(&self.world, self.time);
        let commands = controller(&input);
        self.advance(&commands);
        commands
    }

    fn advance(&mut self, commands: &[HostCommand]) {
        systems::commands::apply(&mut self.world, commands, &mut self.stats);

        systems::movement::fly(&mut self.world, &self.config.flight_model());
        systems::movement::run(&mut self.world);

        let destroyed = systems::detonation::run(&mut self.world, self.config.lethal_radius);
        self.stats.targets_destroyed.extend(destroyed);
        systems::cleanup::run(
            &mut self.world,
            self.config.world_radius,
            &mut self.despawn_buffer,
        );

        self.time.advance();
        self.stats.ticks += 1;
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn guidance(&self) -> &GuidanceEngine {
        &self.guidance
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn projectile_count(&self) -> usize {
        self.world.query::<&ProjectileBody>().iter().count()
    }

    pub fn target_count(&self) -> usize {
        self.world.query::<&TargetBody>().iter().count()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
