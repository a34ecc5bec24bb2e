//! Alien Invasion orchestration process.
//!
//! Runs the simulation on its own fixed-rate thread and bridges its queues
//! to a presentation process over JSON lines on stdio.

pub mod bridge;
pub mod game_loop;
pub mod state;

pub use invasion_core as core;
