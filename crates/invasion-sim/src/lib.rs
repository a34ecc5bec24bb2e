//! Simulation core for Alien Invasion.
//!
//! Owns the entity world, runs systems at a fixed tick rate and produces
//! `WorldSnapshot`s plus discrete events for the presentation side.

pub mod engine;
pub mod scheduler;
pub mod systems;
pub mod wave;
pub mod world;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use invasion_core as core;
pub use world::World;
