//! World snapshot, the render-ready copy of the world sent out once per tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityId;

/// Immutable copy of the world at the end of a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub game_state: GameState,
    pub player_score: u32,
    pub player_health: i32,
    /// Top-left corner of the player's box, for the camera.
    pub player_position: DVec2,
    /// All live entities, ordered by id.
    pub entities: Vec<EntityView>,
    pub wave: u32,
    /// Kills in the current wave as a percentage of the target (0-100).
    pub wave_progress: u32,
    /// Seconds of `Playing` time since the game started.
    pub game_time: f64,
    pub player_facing_right: bool,
}

impl WorldSnapshot {
    pub fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }
}

/// One entity as seen by the presentation side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "w")]
    pub width: f64,
    #[serde(rename = "h")]
    pub height: f64,
    pub vx: f64,
    pub vy: f64,
    pub health: i32,
    pub active: bool,
    #[serde(flatten)]
    pub detail: KindView,
}

impl EntityView {
    pub fn kind(&self) -> EntityKind {
        self.detail.kind()
    }
}

/// Kind tag plus the kind-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindView {
    Player {
        grounded: bool,
        invincible: bool,
    },
    Enemy {
        enemy_type: EnemyType,
        wave: u32,
    },
    Platform,
    Projectile {
        damage: i32,
        source: ProjectileSource,
        weapon_type: WeaponType,
        direction: f64,
    },
    Powerup {
        powerup_type: PowerupType,
    },
}

impl KindView {
    pub fn kind(&self) -> EntityKind {
        match self {
            KindView::Player { .. } => EntityKind::Player,
            KindView::Enemy { .. } => EntityKind::Enemy,
            KindView::Platform => EntityKind::Platform,
            KindView::Projectile { .. } => EntityKind::Projectile,
            KindView::Powerup { .. } => EntityKind::Powerup,
        }
    }
}
