//! Powerup pickups.

use tracing::debug;

use invasion_core::components::{PlayerState, PowerupTraits};
use invasion_core::constants::{POWERUP_HEAL, POWERUP_MESSAGE_SECS, POWERUP_SCORE};
use invasion_core::enums::{EntityKind, PowerupType};
use invasion_core::events::GameEvent;
use invasion_core::shared::SharedGameState;
use invasion_core::types::EntityId;

use crate::world::World;

/// Apply and remove every powerup overlapping the player.
///
/// Returns the invincibility generation to expire later, if an invincibility
/// powerup was collected.
pub fn run(
    world: &mut World,
    player: EntityId,
    shared: &SharedGameState,
    events: &mut Vec<GameEvent>,
) -> Option<u32> {
    let player_box = world.body(player)?.bounds;
    let mut invincibility = None;

    for id in world.ids_of_kind(EntityKind::Powerup) {
        let (Some(body), Some(traits)) = (world.body(id), world.get::<PowerupTraits>(id)) else {
            continue;
        };
        if !body.bounds.collides(&player_box) {
            continue;
        }

        let powerup_type = traits.powerup_type;
        match powerup_type {
            PowerupType::Health => {
                shared.heal(POWERUP_HEAL);
            }
            PowerupType::Score => {
                shared.add_score(POWERUP_SCORE);
            }
            PowerupType::Invincibility => {
                if let Some(mut state) = world.get_mut::<PlayerState>(player) {
                    state.invincible = true;
                    state.invincibility_generation = state.invincibility_generation.wrapping_add(1);
                    invincibility = Some(state.invincibility_generation);
                }
            }
        }

        let center = body.bounds.center();
        let (message, color) = pickup_message(powerup_type);
        events.push(GameEvent::PowerupMessage {
            message: message.to_string(),
            duration: POWERUP_MESSAGE_SECS,
            color,
            x: center.x,
            y: center.y,
            powerup_type,
        });
        debug!(%id, ?powerup_type, "powerup collected");
        world.remove_entity(id);
    }

    invincibility
}

/// Banner text and RGB colour for a pickup.
pub fn pickup_message(powerup_type: PowerupType) -> (&'static str, [u8; 3]) {
    match powerup_type {
        PowerupType::Health => ("+25 Health", [0, 255, 0]),
        PowerupType::Score => ("+50 Score", [255, 255, 0]),
        PowerupType::Invincibility => ("Invincible!", [0, 255, 255]),
    }
}
