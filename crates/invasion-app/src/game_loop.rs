//! Game loop thread: runs the simulation engine at 60 Hz and publishes
//! snapshots and events.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Inbound messages are polled from the inbound queue each tick;
//! nothing here blocks on the presentation side.

use std::io;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use invasion_core::commands::InboundMessage;
use invasion_core::config::SimConfig;
use invasion_core::constants::TICK_RATE;
use invasion_core::events::OutboundMessage;
use invasion_sim::SimulationEngine;

use crate::state::{AppState, OutboundQueue};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Log a drop summary every this many dropped messages.
const DROP_LOG_EVERY: u64 = 600;

/// Whether the loop should keep going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Spawns the game loop in a new thread. The thread returns the number of
/// engine ticks it ran.
pub fn spawn_game_loop(
    config: SimConfig,
    state: AppState,
    max_ticks: Option<u64>,
) -> io::Result<JoinHandle<u64>> {
    std::thread::Builder::new()
        .name("invasion-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::new(config, state.shared.clone());
            run_game_loop(&mut engine, &state, max_ticks)
        })
}

/// The game loop. Runs until an exit request, shutdown, or `max_ticks`.
pub fn run_game_loop(engine: &mut SimulationEngine, state: &AppState, max_ticks: Option<u64>) -> u64 {
    info!(seed = engine.config().seed, "game loop started");
    let mut next_tick_time = Instant::now();
    let first_frame = engine.frame();
    let mut ticks = 0u64;

    while state.is_running() {
        let control = pump(engine, state);
        // An exit message ends the pass before the engine ticks.
        ticks = engine.frame() - first_frame;
        if control == LoopControl::Exit {
            break;
        }
        if max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "tick limit reached");
            break;
        }

        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset instead of spiralling to catch up.
            next_tick_time = now;
        }
    }

    state.shutdown();
    info!(ticks, "game loop stopped");
    ticks
}

/// One loop iteration: dispatch pending inbound messages, tick, publish.
///
/// Messages that are not addressed to the simulation stay queued. An
/// `exit_game` message ends the loop before the tick runs.
pub fn pump(engine: &mut SimulationEngine, state: &AppState) -> LoopControl {
    let messages = state.inbound.take_matching(InboundMessage::is_for_simulation);
    if messages.iter().any(|m| matches!(m, InboundMessage::ExitGame)) {
        info!("exit_game received");
        return LoopControl::Exit;
    }
    for message in messages {
        engine.handle_message(message);
    }

    let snapshot = engine.tick();
    publish(&state.outbound, OutboundMessage::Snapshot(snapshot));
    for event in engine.drain_events() {
        publish(&state.outbound, OutboundMessage::Event(event));
    }

    if engine.exit_requested() {
        LoopControl::Exit
    } else {
        LoopControl::Continue
    }
}

/// Push onto the outbound queue, warning when the consumer has fallen behind.
pub fn publish(queue: &OutboundQueue, message: OutboundMessage) {
    if queue.push(message) {
        let dropped = queue.dropped();
        if dropped == 1 || dropped % DROP_LOG_EVERY == 0 {
            warn!(dropped, capacity = queue.capacity(), "outbound queue full, dropping oldest");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invasion_core::commands::InputFrame;
    use invasion_core::enums::{GameState, Key};
    use invasion_core::events::GameEvent;

    fn setup(config: SimConfig) -> (SimulationEngine, AppState) {
        let state = AppState::new(&config);
        let engine = SimulationEngine::new(config, state.shared.clone());
        (engine, state)
    }

    fn send_keys(state: &AppState, held: &[Key]) {
        state
            .inbound
            .push(InboundMessage::Input(InputFrame::new(held, &[])));
    }

    #[test]
    fn test_pump_publishes_one_snapshot_per_tick() {
        let (mut engine, state) = setup(SimConfig::default());
        for _ in 0..3 {
            assert_eq!(pump(&mut engine, &state), LoopControl::Continue);
        }
        let published = state.outbound.drain();
        assert_eq!(published.len(), 3);
        assert!(published
            .iter()
            .all(|m| matches!(m, OutboundMessage::Snapshot(_))));
    }

    #[test]
    fn test_pump_keeps_publishing_outside_playing() {
        let (mut engine, state) = setup(SimConfig::default());
        pump(&mut engine, &state);
        match state.outbound.try_pop() {
            Some(OutboundMessage::Snapshot(snapshot)) => {
                assert_eq!(snapshot.game_state, GameState::Menu);
                assert!(!snapshot.entities.is_empty());
            }
            other => panic!("expected a snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_pump_dispatches_input() {
        let (mut engine, state) = setup(SimConfig::default());
        send_keys(&state, &[Key::Space]);
        pump(&mut engine, &state);
        assert_eq!(state.shared.game_state(), GameState::Playing);
    }

    #[test]
    fn test_exit_message_stops_before_tick() {
        let (mut engine, state) = setup(SimConfig::default());
        state.inbound.push(InboundMessage::ExitGame);
        assert_eq!(pump(&mut engine, &state), LoopControl::Exit);
        assert!(state.outbound.is_empty());
        assert_eq!(engine.frame(), 0);
    }

    #[test]
    fn test_unrelated_messages_stay_queued() {
        let (mut engine, state) = setup(SimConfig::default());
        let other = InboundMessage::Other(serde_json::json!({"type": "chat", "text": "hi"}));
        state.inbound.push(other.clone());
        send_keys(&state, &[]);
        pump(&mut engine, &state);
        assert_eq!(state.inbound.drain(), vec![other]);
    }

    #[test]
    fn test_quit_key_publishes_exit_event_and_stops() {
        let (mut engine, state) = setup(SimConfig::default());
        send_keys(&state, &[Key::Quit]);
        assert_eq!(pump(&mut engine, &state), LoopControl::Exit);
        let published = state.outbound.drain();
        assert!(published.last().is_some_and(OutboundMessage::is_exit));
    }

    #[test]
    fn test_run_game_loop_honours_tick_limit() {
        let (mut engine, state) = setup(SimConfig::default());
        let ticks = run_game_loop(&mut engine, &state, Some(3));
        assert_eq!(ticks, 3);
        assert_eq!(state.outbound.len(), 3);
        assert!(!state.is_running());
    }

    #[test]
    fn test_run_game_loop_counts_only_ticks_that_ran() {
        let (mut engine, state) = setup(SimConfig::default());
        assert_eq!(pump(&mut engine, &state), LoopControl::Continue);
        state.inbound.push(InboundMessage::ExitGame);
        assert_eq!(run_game_loop(&mut engine, &state, None), 0);
        assert_eq!(engine.frame(), 1);

        let (mut engine, state) = setup(SimConfig::default());
        send_keys(&state, &[Key::Quit]);
        assert_eq!(run_game_loop(&mut engine, &state, None), 1);
    }

    #[test]
    fn test_run_game_loop_stops_on_shutdown() {
        let (mut engine, state) = setup(SimConfig::default());
        state.shutdown();
        assert_eq!(run_game_loop(&mut engine, &state, None), 0);
    }

    #[test]
    fn test_publish_drops_oldest_when_full() {
        let queue = OutboundQueue::bounded(2);
        for i in 0..3 {
            publish(
                &queue,
                OutboundMessage::Event(GameEvent::WaveMessage {
                    message: format!("m{i}"),
                    duration: 1.0,
                }),
            );
        }
        assert_eq!(queue.dropped(), 1);
        let remaining = queue.drain();
        assert_eq!(remaining.len(), 2);
        assert!(matches!(
            &remaining[0],
            OutboundMessage::Event(GameEvent::WaveMessage { message, .. }) if message == "m1"
        ));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
