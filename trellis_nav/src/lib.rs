// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Nav: a stack navigation controller for Trellis views.
//!
//! [`NavController`] shows one view of a stack at a time under a shared
//! [`NavBar`](trellis_controls::navbar::NavBar). Pushing and popping slide views in from the
//! side; changing the root replaces the stack; a modal view can be presented above it.
//!
//! Deferred work runs on a [`FrameScheduler`](trellis_view::FrameScheduler) the host drives,
//! one frame at a time. Hosts that deliver transition-end notifications (see
//! [`Platform::transition_events`](trellis_view::Platform::transition_events)) forward them
//! to [`NavController::handle_transition_end`].
//!
//! ## Minimal usage
//!
//! ```
//! use trellis_nav::{NavController, NavOptions};
//! use trellis_pointer::context::PointerContext;
//! use trellis_tree::Tree;
//! use trellis_view::{FrameScheduler, ItemView, Platform, View, ViewHandle, ViewOptions};
//!
//! let mut tree = Tree::new();
//! let frames = FrameScheduler::new();
//! let nav = NavController::new(
//!     NavOptions::default(),
//!     Platform::default(),
//!     frames.clone(),
//!     &PointerContext::new(),
//! );
//! nav.borrow_mut().render(&mut tree)?;
//!
//! let inbox = ViewHandle::new(ItemView::new("inbox", ViewOptions::new().with_title("Inbox")));
//! let message = ViewHandle::new(ItemView::new("message", ViewOptions::new().with_title("Re: lunch")));
//! nav.borrow_mut().push_view(&mut tree, inbox.to_dyn(), false, None)?;
//! nav.borrow_mut().push_view(&mut tree, message.to_dyn(), false, None)?;
//! assert!(nav.borrow().is_transition_active());
//!
//! frames.run_until_idle(&mut tree, 8);
//! assert!(!nav.borrow().is_transition_active());
//! assert_eq!(nav.borrow().view_stack().len(), 2);
//! assert_eq!(nav.borrow().nav_bar().borrow().title(), "Re: lunch");
//! # Ok::<(), trellis_view::ViewError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod options;

pub use controller::{
    LOADING_CLASS, NAV_CONTROLLER_CLASS, NAVBAR_SHOWN_CLASS, NavController, WITH_NAVBAR_CLASS,
};
pub use options::{NavOptions, SlideDirection};
