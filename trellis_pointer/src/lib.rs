// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Pointer: deterministic, `no_std` press tracking for touch and mouse controls.
//!
//! ## Overview
//!
//! This crate holds the small state machines behind button-like controls. It does not render
//! anything and does not know about elements; controls feed it normalized phases together with
//! their current bounding box and read back whether a click happened.
//!
//! ## Pieces
//!
//! - [`PointerContext`](crate::context::PointerContext): the shared "active pointer target".
//!   At most one control in a context is pressed at any time; the most recent pointer-down owns
//!   the slot and any pointer-up (on a control or stray in the document) clears it.
//! - [`InputModel`](crate::input::InputModel): picks the touch or mouse event set once, at
//!   construction, and maps raw events to [`PointerPhase`](crate::input::PointerPhase)s.
//! - [`PressTracker`](crate::press::PressTracker): per-control
//!   `idle -> pressed -> idle` machine with a `tracking-outside` sub-state while the pointer is
//!   held outside the control.
//!
//! ## Click rule
//!
//! A click fires only if pointer-up reaches the control that received pointer-down, while that
//! control still owns the context and the pointer is strictly inside its bounds.
//!
//! ## Workflow
//!
//! 1) Create one [`PointerContext`](crate::context::PointerContext) per UI and hand a clone to
//!    every control.
//! 2) Each control owns a [`PressTracker`](crate::press::PressTracker) and an
//!    [`InputModel`](crate::input::InputModel).
//! 3) On each raw event, translate it with the input model and feed the phase to the tracker;
//!    emit a click on [`PressOutcome::Click`](crate::press::PressOutcome::Click).
//! 4) Route document-level releases to
//!    [`PointerContext::document_pointer_up`](crate::context::PointerContext::document_pointer_up).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod context;
pub mod input;
pub mod press;
