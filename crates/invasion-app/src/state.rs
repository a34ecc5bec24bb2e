//! Handles shared between the game loop thread and the stdio bridge.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use invasion_core::channel::MessageQueue;
use invasion_core::commands::InboundMessage;
use invasion_core::config::SimConfig;
use invasion_core::events::OutboundMessage;
use invasion_core::shared::SharedGameState;

/// Presentation -> simulation messages.
pub type InboundQueue = MessageQueue<InboundMessage>;
/// Simulation -> presentation snapshots and events.
pub type OutboundQueue = MessageQueue<OutboundMessage>;

/// Everything the two sides share. Cheap to clone; every clone refers to the
/// same queues and scalars.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The four independently locked scalars.
    pub shared: Arc<SharedGameState>,
    pub inbound: Arc<InboundQueue>,
    pub outbound: Arc<OutboundQueue>,
    /// Cleared to ask the game loop to stop at the next tick boundary.
    running: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            shared: Arc::new(SharedGameState::new()),
            inbound: Arc::new(MessageQueue::bounded(config.inbound_capacity)),
            outbound: Arc::new(MessageQueue::bounded(config.outbound_capacity)),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ask the game loop to stop. It observes this at its next tick.
    pub fn shutdown(&self) {
        self.running.store(false, Ordering::Release);
    }
}
