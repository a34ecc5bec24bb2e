//! Deterministic timer scheduler driven by simulation ticks.
//!
//! The spawners and the one-shot delays (wave advance, invincibility expiry)
//! are tasks keyed by due tick. The engine advances the scheduler with the
//! current tick; nothing here reads the wall clock, so tests drive timers
//! simply by ticking.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use invasion_core::types::secs_to_ticks;

/// Work a timer performs when it comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerTask {
    /// Periodic: spawn a group of enemies, then re-arm.
    SpawnEnemies,
    /// Periodic: maybe spawn a powerup, then re-arm.
    SpawnPowerup,
    /// One-shot: move to the next wave.
    AdvanceWave,
    /// One-shot: clear invincibility if no later pickup renewed it.
    ExpireInvincibility { generation: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    due_tick: u64,
    /// Insertion order; breaks ties so same-tick tasks fire FIFO.
    seq: u64,
    task: TimerTask,
}

/// Min-heap of pending tasks.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `now_tick + delay_secs` (at least one tick later).
    pub fn schedule_in(&mut self, now_tick: u64, delay_secs: f64, task: TimerTask) {
        self.schedule_at(now_tick + secs_to_ticks(delay_secs), task);
    }

    pub fn schedule_at(&mut self, due_tick: u64, task: TimerTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled {
            due_tick,
            seq,
            task,
        }));
    }

    /// Pop every task due at or before `now_tick`, earliest first.
    pub fn due(&mut self, now_tick: u64) -> Vec<TimerTask> {
        let mut fired = Vec::new();
        while let Some(Reverse(next)) = self.queue.peek() {
            if next.due_tick > now_tick {
                break;
            }
            if let Some(Reverse(entry)) = self.queue.pop() {
                fired.push(entry.task);
            }
        }
        fired
    }

    /// Whether a task equal to `task` is pending.
    pub fn is_pending(&self, task: TimerTask) -> bool {
        self.queue.iter().any(|Reverse(s)| s.task == task)
    }

    /// Tick at which the earliest pending `task` fires.
    pub fn due_tick_of(&self, task: TimerTask) -> Option<u64> {
        self.queue
            .iter()
            .filter(|Reverse(s)| s.task == task)
            .map(|Reverse(s)| s.due_tick)
            .min()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
