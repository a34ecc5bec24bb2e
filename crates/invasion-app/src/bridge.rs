//! JSON-lines stdio bridge to an external presentation process.
//!
//! Each inbound line is one message (`{"type": "input", ...}` or
//! `{"type": "exit_game"}`); each outbound message is written as one line.
//! Malformed lines are logged and skipped. End of input counts as an exit
//! request so the simulation stops when the presentation side goes away.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, warn};

use invasion_core::commands::InboundMessage;

use crate::state::{InboundQueue, OutboundQueue};

/// Outcome of one [`write_outbound`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    /// An `exit_game` event was among the lines written.
    pub exit_seen: bool,
}

/// Feed every JSON line from `reader` into `inbound` until end of input,
/// then enqueue `exit_game`. Returns the number of messages accepted.
pub fn read_inbound<R: BufRead>(reader: R, inbound: &InboundQueue) -> usize {
    let mut accepted = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, "inbound stream failed, treating as closed");
                break;
            }
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match InboundMessage::from_json(text) {
            Ok(message) => {
                if inbound.push(message) {
                    warn!(dropped = inbound.dropped(), "inbound queue full, dropping oldest");
                }
                accepted += 1;
            }
            Err(error) => warn!(line = index + 1, %error, "ignoring malformed inbound message"),
        }
    }
    debug!(accepted, "inbound stream closed");
    inbound.push(InboundMessage::ExitGame);
    accepted
}

/// Write everything queued on `outbound` to `writer`, one JSON object per line.
pub fn write_outbound<W: Write>(writer: &mut W, outbound: &OutboundQueue) -> io::Result<WriteSummary> {
    let mut summary = WriteSummary::default();
    for message in outbound.drain() {
        serde_json::to_writer(&mut *writer, &message)?;
        writer.write_all(b"\n")?;
        summary.written += 1;
        summary.exit_seen |= message.is_exit();
    }
    writer.flush()?;
    Ok(summary)
}

/// Read stdin on a background thread. The thread ends at end of input.
pub fn spawn_stdin_reader(inbound: Arc<InboundQueue>) -> io::Result<JoinHandle<usize>> {
    std::thread::Builder::new()
        .name("invasion-stdin".into())
        .spawn(move || read_inbound(io::stdin().lock(), &inbound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use invasion_core::enums::{GameState, Key};
    use invasion_core::events::{GameEvent, OutboundMessage};
    use invasion_core::commands::InputFrame;
    use invasion_core::config::SimConfig;
    use invasion_core::state::WorldSnapshot;
    use invasion_sim::SimulationEngine;

    use crate::game_loop::pump;
    use crate::state::AppState;

    #[test]
    fn test_read_inbound_skips_malformed_lines() {
        let input = concat!(
            "{\"type\":\"input\",\"keys\":{\"left\":true},\"key_press\":{}}\n",
            "not json\n",
            "\n",
            "[1,2,3]\n",
            "{\"type\":\"chat\"}\n",
        );
        let queue = InboundQueue::bounded(16);
        let accepted = read_inbound(input.as_bytes(), &queue);
        assert_eq!(accepted, 2);

        let messages = queue.drain();
        assert_eq!(messages.len(), 3);
        match &messages[0] {
            InboundMessage::Input(frame) => assert!(frame.held().contains(Key::Left)),
            other => panic!("expected input, got {other:?}"),
        }
        assert!(matches!(messages[1], InboundMessage::Other(_)));
        assert_eq!(messages[2], InboundMessage::ExitGame);
    }

    #[test]
    fn test_read_inbound_eof_requests_exit() {
        let queue = InboundQueue::bounded(4);
        assert_eq!(read_inbound(&b""[..], &queue), 0);
        assert_eq!(queue.drain(), vec![InboundMessage::ExitGame]);
    }

    #[test]
    fn test_write_outbound_one_line_per_message() {
        let queue = OutboundQueue::bounded(8);
        queue.push(OutboundMessage::Snapshot(WorldSnapshot {
            tick: 1,
            game_state: GameState::Menu,
            player_score: 0,
            player_health: 100,
            player_position: Default::default(),
            entities: Vec::new(),
            wave: 1,
            wave_progress: 0,
            game_time: 0.0,
            player_facing_right: true,
        }));
        queue.push(OutboundMessage::Event(GameEvent::ExitGame));

        let mut out = Vec::new();
        let summary = write_outbound(&mut out, &queue).unwrap();
        assert_eq!(summary.written, 2);
        assert!(summary.exit_seen);
        assert!(queue.is_empty());

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let snapshot: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(snapshot["wave"], 1);
        assert_eq!(snapshot["game_state"], "menu");
        let event: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(event["type"], "exit_game");
    }

    #[test]
    fn test_shared_scalars_reach_the_output_line() {
        let config = SimConfig::default();
        let state = AppState::new(&config);
        let mut engine = SimulationEngine::new(config, state.shared.clone());

        state
            .inbound
            .push(InboundMessage::Input(InputFrame::new(&[Key::Space], &[])));
        pump(&mut engine, &state);
        state.shared.apply_damage(30);
        state.shared.add_score(70);
        pump(&mut engine, &state);

        let mut out = Vec::new();
        write_outbound(&mut out, &state.outbound).unwrap();
        let text = String::from_utf8(out).unwrap();
        let last: serde_json::Value = text
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .filter(|value| value.get("type").is_none())
            .last()
            .unwrap();

        assert_eq!(last["game_state"], "playing");
        assert_eq!(last["player_score"], 70);
        assert_eq!(last["player_health"], 70);
        let position = state.shared.player_position();
        assert_eq!(last["player_position"], serde_json::json!([position.x, position.y]));

        let player = last["entities"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["kind"] == "player")
            .unwrap();
        assert_eq!(player["health"], 70);
    }
}
