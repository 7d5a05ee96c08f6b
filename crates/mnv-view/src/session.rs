//! Resize drag session state machine.
//!
//! One `ResizeController` lives inside each media node view and owns the
//! lifecycle of a horizontal resize drag: pointer-down on the handle
//! starts a session, every pointer-move produces at most one candidate
//! size, pointer-up ends it. Direction and magnitude come purely from
//! consecutive pointer x-coordinates, so the math is resolution- and
//! device-independent. `last_pointer_x` is rebased on every observed
//! move (not kept at the drag origin), accepted or not, which keeps the
//! visual result tracking pointer travel even when the host coalesces
//! move events.

use mnv_core::geometry::{AspectRatio, Dimensions, constrain_candidate};

/// Which way the pointer travelled since the last processed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    /// Pointer moved left, toward the content.
    Shrink,
    /// Pointer moved right, away from the content.
    Grow,
}

/// Drag session controller for one media node view.
#[derive(Debug, Default)]
pub struct ResizeController {
    active: bool,
    /// Last observed pointer x. Meaningless while inactive.
    last_pointer_x: f64,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin a session at the given pointer position. No document side
    /// effect — the first attribute update comes from a later move.
    pub fn start(&mut self, pointer_x: f64) {
        self.active = true;
        self.last_pointer_x = pointer_x;
    }

    /// End the session. Idempotent when already inactive.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Re-anchor the reference position without producing a candidate.
    /// Callers that must skip a move (attributes or ratio not available
    /// yet) still rebase here, so a later accepted move measures from
    /// the pointer's true last position instead of applying the whole
    /// accumulated travel in one jump.
    pub fn rebase(&mut self, pointer_x: f64) {
        if self.active {
            self.last_pointer_x = pointer_x;
        }
    }

    /// Process one pointer-move and compute the candidate size, if any.
    ///
    /// Returns `None` when inactive, when the pointer has not moved a
    /// whole pixel, or when the candidate violates the constraint
    /// pipeline (in which case the prior size stays in effect —
    /// rejected, not floored).
    pub fn pointer_move(
        &mut self,
        pointer_x: f64,
        current: Dimensions,
        container_width: u32,
        ratio: AspectRatio,
    ) -> Option<Dimensions> {
        if !self.active {
            return None;
        }

        let delta = self.last_pointer_x - pointer_x;
        if delta == 0.0 {
            return None;
        }

        let direction = if delta > 0.0 {
            DragDirection::Shrink
        } else {
            DragDirection::Grow
        };
        let magnitude = delta.abs().round() as i64;
        if magnitude == 0 {
            // Sub-pixel travel: the candidate would equal the current
            // size, so skip the redundant update but keep tracking.
            self.last_pointer_x = pointer_x;
            return None;
        }

        let candidate_width = match direction {
            DragDirection::Shrink => i64::from(current.width) - magnitude,
            DragDirection::Grow => i64::from(current.width) + magnitude,
        };

        // Rebase before the constraint check: the next delta is relative
        // to this position whether or not the candidate is accepted.
        self.last_pointer_x = pointer_x;

        let accepted = constrain_candidate(candidate_width, container_width, ratio);
        if accepted.is_none() {
            log::debug!(
                "resize candidate {candidate_width}px rejected ({direction:?}, container {container_width}px)"
            );
        }
        accepted
    }
}
