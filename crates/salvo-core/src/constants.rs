//! Default tunables and fixed parameters.

/// Host tick rate (Hz).
pub const TICK_RATE: u32 = 40;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Thrust ---

/// Default thrust floor (fraction of full power).
pub const DEFAULT_MIN_THRUST: f64 = 0.1;

/// Default thrust ceiling (fraction of full power).
pub const DEFAULT_MAX_THRUST: f64 = 1.0;

/// Register index that receives the thrust fraction on a variable thruster.
pub const THRUST_REGISTER: usize = 2;

// --- Fuel ---

/// Fuel held by one fuel tank part.
pub const DEFAULT_FUEL_TANK_CAPACITY: f64 = 5000.0;

/// Fuel burned per second by one variable thruster at full power.
pub const DEFAULT_BURN_RATE_PER_THRUSTER: f64 = 150.0;

/// Default fuel fraction below which the overshoot check arms (fuel-aware mode).
pub const DEFAULT_FUEL_ABORT_FRACTION: f64 = 0.1;

// --- Feasibility ---

/// Height band around sea level where either domain may engage (meters).
pub const DEFAULT_CROSSOVER_TOLERANCE: f64 = 10.0;

/// Maximum straight-line engagement range (meters).
pub const DEFAULT_MAX_RANGE: f64 = 3000.0;

// --- Ranking ---

/// Angle beyond which all targets are equally off-course (degrees).
pub const DEFAULT_OFF_COURSE_ANGLE_DEG: f64 = 45.0;

// --- Steering ---

/// Altitude below which non-water projectiles hold a skim height (meters).
pub const DEFAULT_SEA_SKIM_HEIGHT: f64 = 5.0;

/// Depression angle to the target past which the skim guard releases the dive (degrees).
pub const DEFAULT_SKIM_DIVE_ANGLE_DEG: f64 = 20.0;

/// Flight age under which an untargeted air projectile climbs (seconds).
pub const DEFAULT_CLIMB_AGE: f64 = 2.0;

/// How far above the projectile the climb aim point sits (meters).
pub const DEFAULT_CLIMB_HEIGHT: f64 = 1000.0;

/// Lookahead used by the overshoot check (seconds).
pub const OVERSHOOT_LOOKAHEAD_SECS: f64 = 0.5;

/// Default proximity-abort distance (meters, distance arming mode).
pub const DEFAULT_PROXIMITY_RADIUS: f64 = 30.0;

// --- Scheduling ---

/// Seconds of flight time between target reassessments.
pub const DEFAULT_REASSIGN_INTERVAL: f64 = 0.5;

/// Steer every N host ticks.
pub const DEFAULT_STEER_INTERVAL_TICKS: u32 = 1;

// --- Turn model ---

/// Default empirical turn rate (degrees per second).
pub const DEFAULT_TURN_RATE_DEG: f64 = 60.0;

/// Default empirical cruise speed (m/s).
pub const DEFAULT_CRUISE_SPEED: f64 = 200.0;

/// Speeds and distances below this are treated as zero.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

// --- Host simulation ---

/// Entities farther than this from the origin are removed (meters).
pub const DEFAULT_WORLD_RADIUS: f64 = 20_000.0;

/// Targets within this distance of a detonation are destroyed (meters).
pub const DEFAULT_LETHAL_RADIUS: f64 = 40.0;

/// Projectile speed at full thrust (m/s).
pub const SIM_TOP_SPEED: f64 = 250.0;

/// Speed change per second toward the thrust-commanded speed (m/s²).
pub const SIM_ACCELERATION: f64 = 80.0;

/// Physical turn rate of simulated projectiles (degrees per second).
pub const SIM_TURN_RATE_DEG: f64 = 90.0;

/// Launch height above sea level (meters).
pub const SIM_LAUNCH_HEIGHT: f64 = 10.0;

/// Speed off the rail (m/s).
pub const SIM_LAUNCH_SPEED: f64 = 120.0;

/// Registers per simulated part.
pub const SIM_PART_REGISTERS: usize = 4;
