// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Controls: pointer-driven controls built on Trellis views.
//!
//! - [`ButtonControl`](crate::button::ButtonControl): icon plus label, raises `click`.
//! - [`NavBar`](crate::navbar::NavBar): title, back and close buttons, status area; raises
//!   `Back:<outlet>` and `Close:<outlet>`.
//! - [`control`]: base class composition shared by controls.
//!
//! Controls never read host events themselves. The host hit-tests or routes raw pointer events
//! and feeds them to the control through
//! [`ViewHandle::dispatch`](trellis_view::ViewHandle::dispatch), which raises the resulting
//! event after the control is released. Press state is shared through a
//! [`PointerContext`](trellis_pointer::context::PointerContext), so one press can never click
//! two controls.
//!
//! ## Minimal usage
//!
//! ```
//! use trellis_controls::button::ButtonControl;
//! use trellis_pointer::context::PointerContext;
//! use trellis_pointer::input::{InputModel, PointerInput, RawPointerKind};
//! use trellis_tree::{Point, Rect, Tree};
//! use trellis_view::{View, ViewHandle, ViewOptions};
//!
//! let mut tree = Tree::new();
//! let cx = PointerContext::new();
//! let ok = ViewHandle::new(ButtonControl::new(
//!     &cx,
//!     InputModel::Mouse,
//!     ViewOptions::new().with_label_text("OK"),
//! ));
//! ok.borrow_mut().render(&mut tree)?;
//! let el = ok.element().expect("rendered");
//! let doc = tree.document();
//! tree.append_child(doc, el);
//! tree.set_bounds(el, Rect::new(0.0, 0.0, 80.0, 32.0));
//!
//! ok.borrow().core().emitter().on("click", |_, _| println!("clicked"));
//! for kind in [RawPointerKind::MouseDown, RawPointerKind::MouseUp] {
//!     let input = PointerInput::new(kind, Point::new(40.0, 16.0));
//!     ok.dispatch(&mut tree, |button, tree| button.handle_pointer(tree, input));
//! }
//! # Ok::<(), trellis_view::ViewError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod button;
pub mod control;
pub mod navbar;
