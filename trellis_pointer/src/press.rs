// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press tracking: the `idle -> pressed -> idle` state machine behind every button.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use trellis_pointer::context::PointerContext;
//! use trellis_pointer::input::PointerPhase;
//! use trellis_pointer::press::{PressOutcome, PressState, PressTracker};
//!
//! let cx = PointerContext::new();
//! let mut button = PressTracker::new(&cx);
//! let bounds = Rect::new(0.0, 0.0, 40.0, 20.0);
//!
//! button.handle(PointerPhase::Down, bounds, Point::new(10.0, 10.0));
//! assert_eq!(button.state(), PressState::Pressed);
//! assert_eq!(
//!     button.handle(PointerPhase::Up, bounds, Point::new(12.0, 9.0)),
//!     PressOutcome::Click
//! );
//! assert_eq!(button.state(), PressState::Idle);
//! ```

use kurbo::{Point, Rect};
use trellis_tree::strictly_contains;

use crate::context::{ControlId, PointerContext};
use crate::input::PointerPhase;

/// Press state of a single control.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PressState {
    /// Not pressed.
    Idle,
    /// Pressed with the pointer inside the control.
    Pressed,
    /// Pressed, but the pointer has left the control; releasing now does not click.
    TrackingOutside,
}

/// Result of feeding one phase into a [`PressTracker`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PressOutcome {
    /// Nothing to report.
    Continue,
    /// The press completed on this control: emit a click.
    Click,
}

/// Tracks presses on one control against a shared [`PointerContext`].
#[derive(Clone, Debug)]
pub struct PressTracker {
    id: ControlId,
    context: PointerContext,
    state: PressState,
    enabled: bool,
}

impl PressTracker {
    /// Register a new control with `context`.
    pub fn new(context: &PointerContext) -> Self {
        Self {
            id: context.register(),
            context: context.clone(),
            state: PressState::Idle,
            enabled: true,
        }
    }

    /// This control's identifier within its context.
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// The shared context.
    pub fn context(&self) -> &PointerContext {
        &self.context
    }

    /// Current state.
    ///
    /// A control that lost the pointer to another control reports `Idle` from its next event.
    pub fn state(&self) -> PressState {
        self.state
    }

    /// Returns true while the control should render as pressed.
    pub fn shows_pressed(&self) -> bool {
        self.state == PressState::Pressed
    }

    /// Returns true unless the control was disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the control. Disabling drops an in-progress press.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.context.release(self.id);
            self.state = PressState::Idle;
        }
    }

    /// Feed one pointer phase. `bounds` is the control's bounding box at the time of the event.
    pub fn handle(&mut self, phase: PointerPhase, bounds: Rect, position: Point) -> PressOutcome {
        if !self.enabled {
            return PressOutcome::Continue;
        }
        let inside = strictly_contains(bounds, position);
        match phase {
            PointerPhase::Down => {
                self.context.claim(self.id);
                self.state = PressState::Pressed;
                PressOutcome::Continue
            }
            PointerPhase::Move => {
                self.state = if !self.context.is_active(self.id) {
                    PressState::Idle
                } else if inside {
                    PressState::Pressed
                } else {
                    PressState::TrackingOutside
                };
                PressOutcome::Continue
            }
            PointerPhase::Up => {
                let clicked = self.context.is_active(self.id) && inside;
                // Any release ends whatever press is in progress.
                self.context.clear();
                self.state = PressState::Idle;
                if clicked {
                    PressOutcome::Click
                } else {
                    PressOutcome::Continue
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 100.0, 40.0);
    const INSIDE: Point = Point::new(50.0, 20.0);
    const OUTSIDE: Point = Point::new(150.0, 20.0);

    #[test]
    fn press_and_release_inside_clicks() {
        let cx = PointerContext::new();
        let mut t = PressTracker::new(&cx);
        assert_eq!(t.handle(PointerPhase::Down, BOUNDS, INSIDE), PressOutcome::Continue);
        assert!(t.shows_pressed());
        assert!(cx.is_active(t.id()));
        assert_eq!(t.handle(PointerPhase::Up, BOUNDS, INSIDE), PressOutcome::Click);
        assert_eq!(cx.active(), None);
    }

    #[test]
    fn leaving_the_bounds_suppresses_the_click() {
        let cx = PointerContext::new();
        let mut t = PressTracker::new(&cx);
        t.handle(PointerPhase::Down, BOUNDS, INSIDE);
        t.handle(PointerPhase::Move, BOUNDS, OUTSIDE);
        assert_eq!(t.state(), PressState::TrackingOutside);
        assert!(!t.shows_pressed());
        assert_eq!(t.handle(PointerPhase::Up, BOUNDS, OUTSIDE), PressOutcome::Continue);
        assert_eq!(t.state(), PressState::Idle);
    }

    #[test]
    fn returning_inside_before_release_still_clicks() {
        let cx = PointerContext::new();
        let mut t = PressTracker::new(&cx);
        t.handle(PointerPhase::Down, BOUNDS, INSIDE);
        t.handle(PointerPhase::Move, BOUNDS, OUTSIDE);
        t.handle(PointerPhase::Move, BOUNDS, INSIDE);
        assert_eq!(t.state(), PressState::Pressed);
        assert_eq!(t.handle(PointerPhase::Up, BOUNDS, INSIDE), PressOutcome::Click);
    }

    #[test]
    fn release_on_another_control_does_not_click_either() {
        let cx = PointerContext::new();
        let mut a = PressTracker::new(&cx);
        let mut b = PressTracker::new(&cx);
        a.handle(PointerPhase::Down, BOUNDS, INSIDE);
        // Pointer-up delivered to `b`, which never saw the down.
        assert_eq!(b.handle(PointerPhase::Up, BOUNDS, INSIDE), PressOutcome::Continue);
        // The release cleared the slot, so `a` cannot click late.
        assert_eq!(a.handle(PointerPhase::Up, BOUNDS, INSIDE), PressOutcome::Continue);
    }

    #[test]
    fn only_one_control_is_pressed_at_a_time() {
        let cx = PointerContext::new();
        let mut a = PressTracker::new(&cx);
        let mut b = PressTracker::new(&cx);
        a.handle(PointerPhase::Down, BOUNDS, INSIDE);
        b.handle(PointerPhase::Down, BOUNDS, INSIDE);
        a.handle(PointerPhase::Move, BOUNDS, INSIDE);
        assert_eq!(a.state(), PressState::Idle);
        assert_eq!(b.state(), PressState::Pressed);
    }

    #[test]
    fn stray_document_release_cancels_the_press() {
        let cx = PointerContext::new();
        let mut t = PressTracker::new(&cx);
        t.handle(PointerPhase::Down, BOUNDS, INSIDE);
        cx.document_pointer_up();
        assert_eq!(t.handle(PointerPhase::Up, BOUNDS, INSIDE), PressOutcome::Continue);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let cx = PointerContext::new();
        let mut t = PressTracker::new(&cx);
        t.handle(PointerPhase::Down, BOUNDS, INSIDE);
        t.set_enabled(false);
        assert_eq!(cx.active(), None);
        assert_eq!(t.handle(PointerPhase::Down, BOUNDS, INSIDE), PressOutcome::Continue);
        assert_eq!(t.state(), PressState::Idle);
        t.set_enabled(true);
        t.handle(PointerPhase::Down, BOUNDS, INSIDE);
        assert_eq!(t.handle(PointerPhase::Up, BOUNDS, INSIDE), PressOutcome::Click);
    }

    #[test]
    fn edges_count_as_outside() {
        let cx = PointerContext::new();
        let mut t = PressTracker::new(&cx);
        t.handle(PointerPhase::Down, BOUNDS, INSIDE);
        assert_eq!(
            t.handle(PointerPhase::Up, BOUNDS, Point::new(0.0, 20.0)),
            PressOutcome::Continue
        );
    }

    #[test]
    fn moving_onto_an_edge_tracks_outside() {
        let cx = PointerContext::new();
        let mut t = PressTracker::new(&cx);
        t.handle(PointerPhase::Down, BOUNDS, INSIDE);
        for edge in [Point::new(100.0, 20.0), Point::new(50.0, 0.0), Point::new(50.0, 40.0)] {
            t.handle(PointerPhase::Move, BOUNDS, edge);
            assert_eq!(t.state(), PressState::TrackingOutside);
            t.handle(PointerPhase::Move, BOUNDS, INSIDE);
            assert_eq!(t.state(), PressState::Pressed);
        }
    }
}
