// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw pointer events and the input model that interprets them.

use kurbo::Point;

/// Raw pointer event kinds as delivered by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RawPointerKind {
    /// `touchstart`
    TouchStart,
    /// `touchend`
    TouchEnd,
    /// `touchmove`
    TouchMove,
    /// `mousedown`
    MouseDown,
    /// `mouseup`
    MouseUp,
    /// `mousemove`
    MouseMove,
    /// `mouseover`
    MouseOver,
    /// `mouseout`
    MouseOut,
}

impl RawPointerKind {
    /// Host event name.
    pub fn name(self) -> &'static str {
        match self {
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
            Self::TouchMove => "touchmove",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
        }
    }

    /// Parse a host event name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "touchstart" => Self::TouchStart,
            "touchend" => Self::TouchEnd,
            "touchmove" => Self::TouchMove,
            "mousedown" => Self::MouseDown,
            "mouseup" => Self::MouseUp,
            "mousemove" => Self::MouseMove,
            "mouseover" => Self::MouseOver,
            "mouseout" => Self::MouseOut,
            _ => return None,
        })
    }
}

/// Normalized phase of a pointer interaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerPhase {
    /// Pointer pressed.
    Down,
    /// Pointer released.
    Up,
    /// Pointer moved (including enter/leave notifications).
    Move,
}

/// A raw pointer event with its position in world space.
///
/// For touch events the position is that of the first changed touch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Raw event kind.
    pub kind: RawPointerKind,
    /// Pointer position in world space.
    pub position: Point,
}

impl PointerInput {
    /// Create an input.
    pub fn new(kind: RawPointerKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// Which event set a control listens to. Chosen once, at construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputModel {
    /// Touch events drive presses; mouse enter/leave still update tracking.
    Touch,
    /// Mouse events drive presses.
    Mouse,
}

impl InputModel {
    /// Pick the model from the host's touch capability.
    pub fn detect(touch_capable: bool) -> Self {
        if touch_capable { Self::Touch } else { Self::Mouse }
    }

    /// Map a raw event to a phase, or `None` if this model ignores it.
    pub fn translate(self, kind: RawPointerKind) -> Option<PointerPhase> {
        use RawPointerKind::*;
        match (self, kind) {
            (Self::Touch, TouchStart) | (Self::Mouse, MouseDown) => Some(PointerPhase::Down),
            (Self::Touch, TouchEnd) | (Self::Mouse, MouseUp) => Some(PointerPhase::Up),
            (Self::Touch, TouchMove) | (Self::Mouse, MouseMove) => Some(PointerPhase::Move),
            (_, MouseOver | MouseOut) => Some(PointerPhase::Move),
            _ => None,
        }
    }

    /// The raw event that ends a press anywhere in the document.
    pub fn release_kind(self) -> RawPointerKind {
        match self {
            Self::Touch => RawPointerKind::TouchEnd,
            Self::Mouse => RawPointerKind::MouseUp,
        }
    }
}
