//! Drag-to-decision state machine for the card deck.
//!
//! Converts a stream of horizontal pointer offsets into one of
//! {Save, Skip, cancel}. A release past the commit threshold does not make
//! the decision final: the tracker enters a fixed-length settle (the card
//! flying off screen) and the decision is delivered only when the settle
//! completes, so the host has fully retired the card before the next one
//! is presented. A release inside the threshold springs back over the same
//! settle window and delivers nothing.
//!
//! At most one gesture is live at a time — `begin` is ignored while a
//! previous gesture is still settling. Events that arrive outside their
//! expected phase (`update` with no active drag, `release` with no `begin`)
//! are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::constants::gesture::{COMMIT_RATIO, DRAG_DEADZONE, SETTLE_MS};

/// Terminal outcome of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeOutcome {
    /// Swiped right: keep the entry.
    Save,
    /// Swiped left: pass on the entry.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Settling,
}

/// What a release resolved to. The decision itself is still pending until
/// the settle completes; see [`SwipeTracker::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseVerdict {
    Commit(SwipeOutcome),
    Cancel,
    /// There was no active drag to release.
    NoGesture,
}

/// State machine for one card's drag gesture.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    phase: GesturePhase,
    current_dx: f32,
    settle_elapsed_ms: f32,
    pending: Option<SwipeOutcome>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
            current_dx: 0.0,
            settle_elapsed_ms: 0.0,
            pending: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Current horizontal offset, for rendering the card under the pointer.
    pub fn offset(&self) -> f32 {
        self.current_dx
    }

    /// Whether the drag has left the deadzone and counts as engaged for
    /// visual feedback.
    pub fn is_engaged(&self) -> bool {
        self.phase == GesturePhase::Dragging && self.current_dx.abs() >= DRAG_DEADZONE
    }

    /// Start tracking a drag. Ignored while a previous gesture is still
    /// settling, so at most one gesture is live at a time.
    pub fn begin(&mut self) {
        if self.phase == GesturePhase::Settling {
            return;
        }
        self.phase = GesturePhase::Dragging;
        self.current_dx = 0.0;
    }

    /// Record the current horizontal offset. No-op without an active drag.
    pub fn update(&mut self, dx: f32) {
        if self.phase != GesturePhase::Dragging {
            return;
        }
        self.current_dx = dx;
    }

    /// End the drag and resolve it against the commit threshold.
    ///
    /// The threshold is `COMMIT_RATIO × card_width` and the comparison is
    /// strict: a release exactly at the threshold cancels. Either way the
    /// tracker enters the settle phase; a committed outcome is delivered by
    /// [`advance`](Self::advance) once the settle completes.
    pub fn release(&mut self, dx: f32, card_width: f32) -> ReleaseVerdict {
        if self.phase != GesturePhase::Dragging {
            return ReleaseVerdict::NoGesture;
        }

        let threshold = COMMIT_RATIO * card_width;
        let verdict = if dx > threshold {
            ReleaseVerdict::Commit(SwipeOutcome::Save)
        } else if dx < -threshold {
            ReleaseVerdict::Commit(SwipeOutcome::Skip)
        } else {
            ReleaseVerdict::Cancel
        };

        self.phase = GesturePhase::Settling;
        self.current_dx = dx;
        self.settle_elapsed_ms = 0.0;
        self.pending = match verdict {
            ReleaseVerdict::Commit(outcome) => Some(outcome),
            _ => None,
        };
        verdict
    }

    /// Advance the settle animation by `dt_ms`.
    ///
    /// Returns the committed outcome exactly once, on the call where the
    /// settle completes. Cancelled gestures complete silently. No-op while
    /// idle or dragging.
    pub fn advance(&mut self, dt_ms: f32) -> Option<SwipeOutcome> {
        if self.phase != GesturePhase::Settling {
            return None;
        }
        self.settle_elapsed_ms += dt_ms;
        if self.settle_elapsed_ms < SETTLE_MS {
            return None;
        }
        self.phase = GesturePhase::Idle;
        self.current_dx = 0.0;
        self.settle_elapsed_ms = 0.0;
        self.pending.take()
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 320.0;

    /// Run a full gesture and drain the settle, returning the decision.
    fn swipe(dx: f32) -> (ReleaseVerdict, Option<SwipeOutcome>) {
        let mut t = SwipeTracker::new();
        t.begin();
        t.update(dx);
        let verdict = t.release(dx, WIDTH);
        let mut decided = None;
        for _ in 0..30 {
            if let Some(outcome) = t.advance(16.0) {
                assert!(decided.is_none(), "decision delivered twice");
                decided = Some(outcome);
            }
        }
        (verdict, decided)
    }

    #[test]
    fn right_past_threshold_saves() {
        let (verdict, decided) = swipe(0.30 * WIDTH);
        assert_eq!(verdict, ReleaseVerdict::Commit(SwipeOutcome::Save));
        assert_eq!(decided, Some(SwipeOutcome::Save));
    }

    #[test]
    fn left_past_threshold_skips() {
        let (verdict, decided) = swipe(-0.30 * WIDTH);
        assert_eq!(verdict, ReleaseVerdict::Commit(SwipeOutcome::Skip));
        assert_eq!(decided, Some(SwipeOutcome::Skip));
    }

    #[test]
    fn inside_threshold_cancels() {
        let (verdict, decided) = swipe(0.10 * WIDTH);
        assert_eq!(verdict, ReleaseVerdict::Cancel);
        assert_eq!(decided, None);
    }

    #[test]
    fn exactly_at_threshold_cancels() {
        let (verdict, _) = swipe(0.25 * WIDTH);
        assert_eq!(verdict, ReleaseVerdict::Cancel);
        let (verdict, _) = swipe(-0.25 * WIDTH);
        assert_eq!(verdict, ReleaseVerdict::Cancel);
    }

    #[test]
    fn decision_waits_for_settle() {
        let mut t = SwipeTracker::new();
        t.begin();
        t.release(0.5 * WIDTH, WIDTH);
        // Not delivered at release, nor partway through the settle.
        assert_eq!(t.advance(100.0), None);
        assert_eq!(t.advance(100.0), None);
        assert_eq!(t.advance(100.0), Some(SwipeOutcome::Save));
        // And never again.
        assert_eq!(t.advance(100.0), None);
        assert_eq!(t.phase(), GesturePhase::Idle);
    }

    #[test]
    fn begin_ignored_while_settling() {
        let mut t = SwipeTracker::new();
        t.begin();
        t.release(0.5 * WIDTH, WIDTH);
        t.begin();
        assert_eq!(t.phase(), GesturePhase::Settling);
        // The original decision still lands.
        t.advance(150.0);
        assert_eq!(t.advance(150.0), Some(SwipeOutcome::Save));
    }

    #[test]
    fn update_without_begin_is_noop() {
        let mut t = SwipeTracker::new();
        t.update(50.0);
        assert_eq!(t.phase(), GesturePhase::Idle);
        assert_eq!(t.offset(), 0.0);
    }

    #[test]
    fn release_without_begin_is_noop() {
        let mut t = SwipeTracker::new();
        assert_eq!(t.release(200.0, WIDTH), ReleaseVerdict::NoGesture);
        assert_eq!(t.phase(), GesturePhase::Idle);
    }

    #[test]
    fn deadzone_gates_engagement() {
        let mut t = SwipeTracker::new();
        t.begin();
        t.update(4.0);
        assert!(!t.is_engaged());
        // Still tracked even inside the deadzone.
        assert_eq!(t.offset(), 4.0);
        t.update(6.0);
        assert!(t.is_engaged());
        t.update(-6.0);
        assert!(t.is_engaged());
    }

    #[test]
    fn cancel_settle_blocks_begin_then_frees() {
        let mut t = SwipeTracker::new();
        t.begin();
        t.release(10.0, WIDTH);
        t.begin();
        assert_eq!(t.phase(), GesturePhase::Settling);
        assert_eq!(t.advance(300.0), None);
        t.begin();
        assert_eq!(t.phase(), GesturePhase::Dragging);
    }
}
