//! ECS components for hecs entities.
//!
//! Every entity carries an `EntityId`, an `EntityKind`, a `Body` and `Vitals`.
//! Exactly one kind-specific component decides which kind-indexed collection
//! (hecs archetype) it lives in. Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Aabb;

/// Bounding box plus velocity (pixels per tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub bounds: Aabb,
    pub velocity: DVec2,
}

impl Body {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            bounds: Aabb::new(x, y, width, height),
            velocity: DVec2::ZERO,
        }
    }

    /// Pure translation by velocity.
    pub fn integrate(&mut self) {
        self.bounds.pos += self.velocity;
    }
}

/// Health and liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: i32,
    pub active: bool,
}

impl Vitals {
    pub fn new(health: i32) -> Self {
        Self {
            health,
            active: true,
        }
    }
}

/// Player-only state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Set only by landing on top of a platform during the current tick.
    pub grounded: bool,
    /// A jump started and the player has not landed since.
    pub jumping: bool,
    pub invincible: bool,
    /// Bumped on every invincibility pickup so only the latest expiry clears the flag.
    pub invincibility_generation: u32,
}

/// Enemy-only state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyTraits {
    pub enemy_type: EnemyType,
    /// Wave number at spawn. Affects presentation tier only.
    pub wave: u32,
    /// Simulation time of the last contact damage this enemy dealt.
    pub last_contact_secs: Option<f64>,
}

/// Projectile-only state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTraits {
    pub damage: i32,
    pub source: ProjectileSource,
    pub weapon_type: WeaponType,
    /// +1.0 travelling right, -1.0 travelling left.
    pub direction: f64,
}

impl Default for ProjectileTraits {
    fn default() -> Self {
        Self {
            damage: crate::constants::PRIMARY_DAMAGE,
            source: ProjectileSource::Player,
            weapon_type: WeaponType::Primary,
            direction: 1.0,
        }
    }
}

/// Powerup-only state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerupTraits {
    pub powerup_type: PowerupType,
}

/// Marks a static platform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Platform;

/// Starting health for a freshly created entity of `kind`.
pub fn default_health(kind: EntityKind) -> i32 {
    match kind {
        EntityKind::Player => crate::constants::PLAYER_MAX_HEALTH,
        EntityKind::Enemy => EnemyType::Basic.base_health(),
        EntityKind::Platform | EntityKind::Projectile | EntityKind::Powerup => 1,
    }
}
