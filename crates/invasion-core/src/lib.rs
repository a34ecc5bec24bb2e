//! Core types and definitions for the Alien Invasion simulation.
//!
//! This crate defines the vocabulary shared by the simulation and the
//! orchestrating process: components, wire messages, snapshots, events,
//! the shared state block, message queues, configuration and game rules.
//! It has no threads and no I/O beyond reading a config file.

pub mod channel;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod rules;
pub mod shared;
pub mod state;
pub mod types;
