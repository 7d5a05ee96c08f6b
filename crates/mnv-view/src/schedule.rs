//! Follow-up task scheduling.
//!
//! Callbacks in the node view return immediately; work that must run
//! after the current layout pass (so freshly loaded intrinsic dimensions
//! are actually available) is posted here as a named follow-up task and
//! drained by the host once the pass completes. This replaces implicit
//! zero-delay timers with an explicit primitive the host can drive
//! deterministically.

use std::collections::VecDeque;

/// Deferred work items the node view can post for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Reconcile the stored size with a freshly captured aspect ratio,
    /// using the current stored width (not the intrinsic size).
    CorrectiveResize,
}

/// FIFO of pending follow-ups with duplicate suppression: posting a task
/// that is already queued is a no-op, so event floods collapse into one
/// deferred pass.
#[derive(Debug, Default)]
pub struct FollowUpQueue {
    queue: VecDeque<FollowUp>,
}

impl FollowUpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, task: FollowUp) {
        if !self.queue.contains(&task) {
            self.queue.push_back(task);
        }
    }

    pub fn pop(&mut self) -> Option<FollowUp> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
