//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They hold no state of their own; the engine passes in what they need.

pub mod combat;
pub mod director;
pub mod input;
pub mod physics;
pub mod pickups;
pub mod snapshot;
