//! Snapshot system: builds a `WorldSnapshot` from the world.
//!
//! Read-only; it never modifies the world.

use invasion_core::shared::SharedView;
use invasion_core::state::WorldSnapshot;
use invasion_core::types::SimTime;

use crate::wave::WaveState;
use crate::world::World;

/// Build the per-tick snapshot published to the presentation side. The
/// shared scalars ride along so the HUD and camera need no other channel.
pub fn build_snapshot(
    world: &World,
    tick: u64,
    time: &SimTime,
    shared: SharedView,
    wave: &WaveState,
    player_facing_right: bool,
) -> WorldSnapshot {
    WorldSnapshot {
        tick,
        game_state: shared.game_state,
        player_score: shared.player_score,
        player_health: shared.player_health,
        player_position: shared.player_position,
        entities: world.snapshot(),
        wave: wave.number,
        wave_progress: wave.progress(),
        game_time: time.elapsed_secs,
        player_facing_right,
    }
}
