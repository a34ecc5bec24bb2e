//! Fundamental geometric and simulation types.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Process-unique entity identity. Ids increase monotonically and are never reused,
/// not even across a game reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned bounding box. `pos` is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: DVec2,
    pub size: DVec2,
}

impl Aabb {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> DVec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test. Boxes that only touch along an edge do not collide.
    pub fn collides(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Strict overlap on the x axis only.
    pub fn overlaps_horizontally(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

/// Simulation time tracking. Only advances while the game is `Playing`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick. Elapsed time is derived from the tick count so it
    /// does not drift.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * self.dt();
    }
}

/// Convert a duration in seconds to a whole number of ticks (at least one).
pub fn secs_to_ticks(secs: f64) -> u64 {
    ((secs * crate::constants::TICK_RATE as f64).round() as u64).max(1)
}
