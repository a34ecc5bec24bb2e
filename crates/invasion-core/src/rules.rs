//! Gameplay formulas: wave scaling, scoring and spawn cadence.

use crate::constants::*;
use crate::enums::EnemyType;

/// Kills needed to clear `wave` (wave 1 = 10, wave 2 = 15, ...).
pub fn kill_target(wave: u32) -> u32 {
    BASE_KILL_TARGET + wave.saturating_sub(1) * KILL_TARGET_PER_WAVE
}

/// Score awarded for destroying an enemy of `enemy_type` during `wave`.
pub fn kill_score(enemy_type: EnemyType, wave: u32) -> u32 {
    KILL_SCORE_BASE
        + (enemy_type.tier() as u32 - 1) * KILL_SCORE_PER_TYPE
        + wave.saturating_sub(1) * KILL_SCORE_PER_WAVE
}

/// Seconds between enemy spawner firings; shrinks as waves advance.
pub fn enemy_spawn_interval(wave: u32) -> f64 {
    (ENEMY_SPAWN_INTERVAL * 1.5 - wave as f64 * 0.15).max(MIN_ENEMY_SPAWN_INTERVAL)
}

/// Enemies created per spawner firing.
pub fn enemies_per_spawn(wave: u32) -> u32 {
    wave.clamp(1, MAX_ENEMIES_PER_SPAWN)
}

/// Percent weights for basic/tough/fast enemies during `wave`.
pub fn enemy_type_weights(wave: u32) -> [u32; 3] {
    match wave {
        0 | 1 => [90, 10, 0],
        2 => [70, 20, 10],
        _ => [50, 30, 20],
    }
}

/// Starting health of an enemy spawned during `wave`.
pub fn enemy_health(enemy_type: EnemyType, wave: u32) -> i32 {
    let scale = 1.0 + wave.saturating_sub(1) as f64 * 0.2;
    (enemy_type.base_health() as f64 * scale).round() as i32
}

/// Horizontal speed magnitude of an enemy spawned during `wave`.
pub fn enemy_speed(enemy_type: EnemyType, wave: u32) -> f64 {
    let scale = 1.0 + wave.saturating_sub(1) as f64 * 0.1;
    ENEMY_BASE_SPEED * scale * enemy_type.speed_multiplier()
}

/// Wave completion as a percentage, clamped to 0..=100.
pub fn wave_progress(kills: u32, target: u32) -> u32 {
    if target == 0 {
        return 100;
    }
    (kills.saturating_mul(100) / target).min(100)
}
