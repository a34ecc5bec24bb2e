//! Simulation constants and tuning parameters.
//!
//! Velocities are in pixels per tick and durations in seconds of simulation
//! time. `SimConfig` falls back to these values for any key a config file omits.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World ---

/// Default world width in pixels.
pub const WORLD_WIDTH: f64 = 1200.0;

/// Default world height in pixels (y grows downward).
pub const WORLD_HEIGHT: f64 = 800.0;

/// Number of floating platforms generated in addition to the ground.
pub const PLATFORM_COUNT: usize = 8;

pub const PLATFORM_WIDTH: f64 = 200.0;
pub const PLATFORM_HEIGHT: f64 = 20.0;

/// Height of the ground platform spanning the full world width.
pub const GROUND_HEIGHT: f64 = 50.0;

// --- Player ---

pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_HEIGHT: f64 = 80.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Horizontal speed while an arrow key is held.
pub const PLAYER_SPEED: f64 = 5.0;

/// Downward acceleration applied each tick.
pub const GRAVITY: f64 = 0.5;

/// Initial upward velocity of a jump.
pub const JUMP_POWER: f64 = 12.0;

// --- Enemies ---

pub const ENEMY_SIZE: f64 = 60.0;

/// Base horizontal speed before wave and type multipliers.
pub const ENEMY_BASE_SPEED: f64 = 2.0;

/// Distance inside the screen edge where enemies appear.
pub const ENEMY_SPAWN_INSET: f64 = 100.0;

/// Enemies are despawned once their x leaves `[-margin, width + margin]`.
pub const ENEMY_DESPAWN_MARGIN: f64 = 100.0;

/// Health removed from the player per overlapping tick.
pub const CONTACT_DAMAGE: i32 = 10;

/// Base enemy spawn interval in seconds (scaled by `rules::enemy_spawn_interval`).
pub const ENEMY_SPAWN_INTERVAL: f64 = 3.0;

/// Floor for the wave-scaled enemy spawn interval.
pub const MIN_ENEMY_SPAWN_INTERVAL: f64 = 0.8;

/// Upper bound on enemies spawned per spawner firing.
pub const MAX_ENEMIES_PER_SPAWN: u32 = 3;

// --- Projectiles ---

pub const PRIMARY_DAMAGE: i32 = 10;
pub const PRIMARY_SPEED: f64 = 10.0;
pub const PRIMARY_SIZE: f64 = 10.0;
pub const PRIMARY_COOLDOWN_SECS: f64 = 0.15;

pub const SECONDARY_DAMAGE: i32 = 25;
pub const SECONDARY_SPEED: f64 = 7.0;
pub const SECONDARY_SIZE: f64 = 16.0;
pub const SECONDARY_COOLDOWN_SECS: f64 = 0.5;

/// Projectiles are despawned once they leave the world grown by this margin.
pub const PROJECTILE_DESPAWN_MARGIN: f64 = 20.0;

// --- Powerups ---

pub const POWERUP_SIZE: f64 = 30.0;
pub const POWERUP_SPAWN_INTERVAL: f64 = 4.0;
pub const POWERUP_SPAWN_CHANCE: f64 = 0.15;
pub const POWERUP_HEAL: i32 = 25;
pub const POWERUP_SCORE: u32 = 50;
pub const INVINCIBILITY_SECS: f64 = 5.0;

/// How long the presentation side shows a pickup message.
pub const POWERUP_MESSAGE_SECS: f64 = 2.0;

// --- Waves ---

pub const WAVE_ADVANCE_DELAY_SECS: f64 = 3.0;
pub const WAVE_MESSAGE_SECS: f64 = 2.0;

/// Kill target of the first wave.
pub const BASE_KILL_TARGET: u32 = 10;

/// Additional kills required per wave after the first.
pub const KILL_TARGET_PER_WAVE: u32 = 5;

// --- Scoring ---

pub const KILL_SCORE_BASE: u32 = 10;
pub const KILL_SCORE_PER_TYPE: u32 = 5;
pub const KILL_SCORE_PER_WAVE: u32 = 2;

// --- Channels ---

/// Default bound on each message queue before the oldest message is dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
