//! Spawn & wave director: fires due timer tasks.
//!
//! The enemy and powerup spawners are periodic tasks that re-arm themselves
//! when they fire. Wave advance and invincibility expiry are one-shots. All
//! of them run only while the engine is ticking in `Playing`, because the
//! scheduler is driven by simulation ticks.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use invasion_core::components::PlayerState;
use invasion_core::config::SimConfig;
use invasion_core::constants::*;
use invasion_core::events::GameEvent;
use invasion_core::rules;

use crate::scheduler::{Scheduler, TimerTask};
use crate::wave::WaveState;
use crate::world::World;
use crate::world_setup;

/// Arm both spawners for a fresh game.
pub fn arm_spawners(scheduler: &mut Scheduler, now_tick: u64, wave: u32) {
    scheduler.schedule_in(now_tick, rules::enemy_spawn_interval(wave), TimerTask::SpawnEnemies);
    scheduler.schedule_in(now_tick, POWERUP_SPAWN_INTERVAL, TimerTask::SpawnPowerup);
}

/// Schedule the delayed move to the next wave.
pub fn schedule_wave_advance(scheduler: &mut Scheduler, now_tick: u64) {
    scheduler.schedule_in(now_tick, WAVE_ADVANCE_DELAY_SECS, TimerTask::AdvanceWave);
}

/// Schedule the end of the invincibility granted under `generation`.
pub fn schedule_invincibility_expiry(scheduler: &mut Scheduler, now_tick: u64, generation: u32) {
    scheduler.schedule_in(
        now_tick,
        INVINCIBILITY_SECS,
        TimerTask::ExpireInvincibility { generation },
    );
}

/// Fire every task due at `now_tick`.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    scheduler: &mut Scheduler,
    wave: &mut WaveState,
    events: &mut Vec<GameEvent>,
    now_tick: u64,
) {
    for task in scheduler.due(now_tick) {
        match task {
            TimerTask::SpawnEnemies => {
                let count = rules::enemies_per_spawn(wave.number);
                for _ in 0..count {
                    let id = world_setup::spawn_random_enemy(world, rng, config, wave.number);
                    debug!(%id, wave = wave.number, "enemy spawned");
                }
                scheduler.schedule_in(
                    now_tick,
                    rules::enemy_spawn_interval(wave.number),
                    TimerTask::SpawnEnemies,
                );
            }
            TimerTask::SpawnPowerup => {
                if rng.gen_bool(POWERUP_SPAWN_CHANCE) {
                    let id = world_setup::spawn_random_powerup(world, rng, config);
                    debug!(%id, "powerup spawned");
                }
                scheduler.schedule_in(now_tick, POWERUP_SPAWN_INTERVAL, TimerTask::SpawnPowerup);
            }
            TimerTask::AdvanceWave => {
                let cleared = wave.number;
                let next = wave.advance();
                info!(cleared, next, target = wave.target, "wave advanced");
                events.extend(wave_messages(cleared, next));
            }
            TimerTask::ExpireInvincibility { generation } => {
                expire_invincibility(world, generation);
            }
        }
    }
}

/// Clear the player's invincibility unless a later pickup renewed it.
fn expire_invincibility(world: &mut World, generation: u32) {
    let Some(player) = world.player() else {
        return;
    };
    if let Some(mut state) = world.get_mut::<PlayerState>(player) {
        if state.invincibility_generation == generation {
            state.invincible = false;
            debug!("invincibility expired");
        }
    }
}

/// The cleared / starting banner pair.
pub fn wave_messages(cleared: u32, next: u32) -> [GameEvent; 2] {
    [
        GameEvent::WaveMessage {
            message: format!("Wave {cleared} Cleared!"),
            duration: WAVE_MESSAGE_SECS,
        },
        GameEvent::WaveMessage {
            message: format!("Wave {next} Starting!"),
            duration: WAVE_MESSAGE_SECS,
        },
    ]
}
