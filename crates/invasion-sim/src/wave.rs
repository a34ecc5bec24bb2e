//! Wave bookkeeping: kill counting against a per-wave target.

use invasion_core::rules;

/// Progress of the current wave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveState {
    /// Starts at 1, only ever increases within a game.
    pub number: u32,
    pub kills: u32,
    pub target: u32,
    /// Latched when the target is reached so the advance is scheduled once.
    pub message_shown: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            number: 1,
            kills: 0,
            target: rules::kill_target(1),
            message_shown: false,
        }
    }
}

impl WaveState {
    /// Count a kill. Returns `true` exactly once per wave, on the kill that
    /// first reaches the target.
    pub fn register_kill(&mut self) -> bool {
        self.kills += 1;
        if self.kills >= self.target && !self.message_shown {
            self.message_shown = true;
            return true;
        }
        false
    }

    /// Move to the next wave and return its number.
    pub fn advance(&mut self) -> u32 {
        self.number += 1;
        self.target = rules::kill_target(self.number);
        self.kills = 0;
        self.message_shown = false;
        self.number
    }

    /// Percent of the target reached (0-100).
    pub fn progress(&self) -> u32 {
        rules::wave_progress(self.kills, self.target)
    }
}
