//! Scalars shared between the simulation and the presentation side.
//!
//! Each scalar sits behind its own lock and every method holds that lock for
//! exactly one read-modify-write. The only nested acquisition is
//! health -> game state inside [`SharedGameState::apply_damage`]; nothing
//! takes them in the opposite order.

use std::sync::{Mutex, MutexGuard, PoisonError};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::PLAYER_MAX_HEALTH;
use crate::enums::GameState;

/// The cross-boundary state block. Share it as `Arc<SharedGameState>`.
#[derive(Debug)]
pub struct SharedGameState {
    game_state: Mutex<GameState>,
    player_score: Mutex<u32>,
    player_health: Mutex<i32>,
    player_position: Mutex<DVec2>,
}

/// A point-in-time read of all four scalars (each read under its own lock).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedView {
    pub game_state: GameState,
    pub player_score: u32,
    pub player_health: i32,
    pub player_position: DVec2,
}

/// Critical sections are single scalar updates, so a poisoned lock still
/// holds a consistent value.
fn guard<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for SharedGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedGameState {
    pub fn new() -> Self {
        Self {
            game_state: Mutex::new(GameState::Menu),
            player_score: Mutex::new(0),
            player_health: Mutex::new(PLAYER_MAX_HEALTH),
            player_position: Mutex::new(DVec2::ZERO),
        }
    }

    // --- game state ---

    pub fn game_state(&self) -> GameState {
        *guard(&self.game_state)
    }

    pub fn set_game_state(&self, state: GameState) {
        *guard(&self.game_state) = state;
    }

    /// Move to `to` only if currently in `from`. Returns whether it happened.
    pub fn transition(&self, from: GameState, to: GameState) -> bool {
        let mut state = guard(&self.game_state);
        if *state == from {
            *state = to;
            true
        } else {
            false
        }
    }

    // --- score ---

    pub fn score(&self) -> u32 {
        *guard(&self.player_score)
    }

    /// Returns the new score.
    pub fn add_score(&self, points: u32) -> u32 {
        let mut score = guard(&self.player_score);
        *score = score.saturating_add(points);
        *score
    }

    // --- health ---

    pub fn health(&self) -> i32 {
        *guard(&self.player_health)
    }

    /// Subtract `amount`, clamped at 0. Reaching 0 moves the game to `GameOver`.
    /// Returns the new health.
    pub fn apply_damage(&self, amount: i32) -> i32 {
        let mut health = guard(&self.player_health);
        *health = (*health - amount.max(0)).max(0);
        if *health == 0 {
            *guard(&self.game_state) = GameState::GameOver;
        }
        *health
    }

    /// Add `amount`, clamped at the maximum. Returns the new health.
    pub fn heal(&self, amount: i32) -> i32 {
        let mut health = guard(&self.player_health);
        *health = (*health + amount.max(0)).min(PLAYER_MAX_HEALTH);
        *health
    }

    // --- position ---

    pub fn player_position(&self) -> DVec2 {
        *guard(&self.player_position)
    }

    pub fn set_player_position(&self, position: DVec2) {
        *guard(&self.player_position) = position;
    }

    /// Reset score and health for a new game. Game state and position are
    /// left to the caller.
    pub fn reset_player(&self) {
        *guard(&self.player_score) = 0;
        *guard(&self.player_health) = PLAYER_MAX_HEALTH;
    }

    pub fn view(&self) -> SharedView {
        SharedView {
            game_state: self.game_state(),
            player_score: self.score(),
            player_health: self.health(),
            player_position: self.player_position(),
        }
    }
}
