//! Discrete events emitted by the simulation for the presentation side.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyType, PowerupType};
use crate::state::WorldSnapshot;

/// Fire-and-forget notification. Serialized with a `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// An enemy was destroyed at (`x`, `y`), its centre.
    Explosion {
        x: f64,
        y: f64,
        enemy_type: EnemyType,
        wave: u32,
    },
    /// A powerup was picked up.
    PowerupMessage {
        message: String,
        duration: f64,
        color: [u8; 3],
        x: f64,
        y: f64,
        powerup_type: PowerupType,
    },
    /// Wave cleared / wave starting banner.
    WaveMessage { message: String, duration: f64 },
    /// The simulation is shutting down; the orchestrator should stop.
    ExitGame,
}

/// Everything published on the outgoing channel.
///
/// Snapshots serialize as a bare object, events carry their own `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Snapshot(WorldSnapshot),
    Event(GameEvent),
}

impl OutboundMessage {
    pub fn is_exit(&self) -> bool {
        matches!(self, OutboundMessage::Event(GameEvent::ExitGame))
    }
}
