//! Entity spawn factories for setting up the world.
//!
//! Creates the player, the platforms, enemies, projectiles and powerups with
//! their kind-specific data filled in.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invasion_core::components::*;
use invasion_core::config::SimConfig;
use invasion_core::constants::*;
use invasion_core::enums::*;
use invasion_core::rules;
use invasion_core::types::EntityId;

use crate::world::World;

/// Populate an empty world: ground, floating platforms, then the player.
/// Returns the player id.
pub fn setup_world(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) -> EntityId {
    spawn_platforms(world, rng, config);
    spawn_player(world, config)
}

/// Ground spanning the full width plus `platform_count` random platforms.
pub fn spawn_platforms(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) {
    world.create_entity(
        EntityKind::Platform,
        0.0,
        config.world_height - GROUND_HEIGHT,
        config.world_width,
        GROUND_HEIGHT,
    );

    for _ in 0..config.platform_count {
        let x = rng.gen_range(0.0..=config.world_width - PLATFORM_WIDTH).floor();
        let y = rng.gen_range(100.0..=config.world_height - 150.0).floor();
        world.create_entity(EntityKind::Platform, x, y, PLATFORM_WIDTH, PLATFORM_HEIGHT);
    }
}

/// Player at a quarter of the width, standing on the ground.
pub fn spawn_player(world: &mut World, config: &SimConfig) -> EntityId {
    let x = config.world_width / 4.0;
    let y = config.world_height - GROUND_HEIGHT - PLAYER_HEIGHT;
    world.create_entity(EntityKind::Player, x, y, PLAYER_WIDTH, PLAYER_HEIGHT)
}

/// Pick an enemy type using the wave's weighted distribution.
pub fn roll_enemy_type(rng: &mut ChaCha8Rng, wave: u32) -> EnemyType {
    let weights = rules::enemy_type_weights(wave);
    match WeightedIndex::new(weights) {
        Ok(dist) => EnemyType::ALL[dist.sample(rng)],
        Err(_) => EnemyType::Basic,
    }
}

/// Spawn one enemy on a random side, 100 px inside the edge, heading for the
/// screen centre.
pub fn spawn_random_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    wave: u32,
) -> EntityId {
    let enemy_type = roll_enemy_type(rng, wave);
    let from_right = rng.gen_bool(0.5);
    let x = if from_right {
        config.world_width - ENEMY_SPAWN_INSET
    } else {
        ENEMY_SPAWN_INSET
    };
    let y = rng.gen_range(50.0..=config.world_height - 150.0).floor();
    spawn_enemy(world, config, enemy_type, wave, x, y)
}

/// Spawn an enemy of `enemy_type` at (`x`, `y`) with wave-scaled stats.
/// Velocity always points toward the horizontal centre of the world.
pub fn spawn_enemy(
    world: &mut World,
    config: &SimConfig,
    enemy_type: EnemyType,
    wave: u32,
    x: f64,
    y: f64,
) -> EntityId {
    let id = world.create_entity(EntityKind::Enemy, x, y, ENEMY_SIZE, ENEMY_SIZE);
    let direction = if x < config.world_width / 2.0 { 1.0 } else { -1.0 };

    if let Some(mut body) = world.get_mut::<Body>(id) {
        body.velocity.x = rules::enemy_speed(enemy_type, wave) * direction;
    }
    if let Some(mut vitals) = world.get_mut::<Vitals>(id) {
        vitals.health = rules::enemy_health(enemy_type, wave);
    }
    if let Some(mut traits) = world.get_mut::<EnemyTraits>(id) {
        traits.enemy_type = enemy_type;
        traits.wave = wave;
    }
    id
}

/// Spawn a projectile of `weapon` centred on `origin_center`, travelling in
/// `direction` (+1 right, -1 left).
pub fn spawn_projectile(
    world: &mut World,
    weapon: WeaponType,
    origin_center: glam::DVec2,
    direction: f64,
) -> EntityId {
    let (damage, speed, size) = weapon_params(weapon);
    let id = world.create_entity(
        EntityKind::Projectile,
        origin_center.x - size / 2.0,
        origin_center.y - size / 2.0,
        size,
        size,
    );
    if let Some(mut body) = world.get_mut::<Body>(id) {
        body.velocity.x = speed * direction;
    }
    if let Some(mut traits) = world.get_mut::<ProjectileTraits>(id) {
        *traits = ProjectileTraits {
            damage,
            source: ProjectileSource::Player,
            weapon_type: weapon,
            direction,
        };
    }
    id
}

/// (damage, speed px/tick, size px) for a weapon.
pub fn weapon_params(weapon: WeaponType) -> (i32, f64, f64) {
    match weapon {
        WeaponType::Primary => (PRIMARY_DAMAGE, PRIMARY_SPEED, PRIMARY_SIZE),
        WeaponType::Secondary => (SECONDARY_DAMAGE, SECONDARY_SPEED, SECONDARY_SIZE),
    }
}

/// Seconds between shots for a weapon.
pub fn weapon_cooldown(weapon: WeaponType) -> f64 {
    match weapon {
        WeaponType::Primary => PRIMARY_COOLDOWN_SECS,
        WeaponType::Secondary => SECONDARY_COOLDOWN_SECS,
    }
}

/// Spawn a powerup of a uniformly random type at a random interior position.
pub fn spawn_random_powerup(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) -> EntityId {
    let powerup_type = PowerupType::ALL[rng.gen_range(0..PowerupType::ALL.len())];
    let x = rng.gen_range(100.0..=config.world_width - 100.0).floor();
    let y = rng.gen_range(100.0..=config.world_height - 200.0).floor();
    spawn_powerup(world, powerup_type, x, y)
}

pub fn spawn_powerup(world: &mut World, powerup_type: PowerupType, x: f64, y: f64) -> EntityId {
    let id = world.create_entity(EntityKind::Powerup, x, y, POWERUP_SIZE, POWERUP_SIZE);
    if let Some(mut traits) = world.get_mut::<PowerupTraits>(id) {
        traits.powerup_type = powerup_type;
    }
    id
}
