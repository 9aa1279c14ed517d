// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis View: composite views over a Trellis element tree.
//!
//! Trellis View provides the view layer of Trellis: views that own an element, render a
//! template into it, and compose other views into named outlets.
//!
//! - [`view`]: the [`View`] contract, [`ViewCore`] shared state, [`ViewHandle`] shared handles,
//!   and a plain template-backed [`ItemView`].
//! - [`composite`]: [`CompositeView`], which rebuilds its declared sub-views on every render,
//!   stages them in a [`RenderBuffer`], and forwards their events.
//! - [`complex`]: [`ComplexView`], a composite with named regions whose views survive
//!   re-renders.
//! - [`events`]: named events and the per-view [`Emitter`].
//! - [`frame`]: a [`FrameScheduler`] standing in for animation frames.
//! - [`platform`]: host capabilities that change how transitions and input work.
//!
//! ## Ownership
//!
//! The caller owns the [`Tree`](trellis_tree::Tree) and passes it to every operation. Views
//! live behind [`ViewHandle`]s; a parent keeps its children alive and a child points back to
//! its parent weakly. Event listeners never receive views, only the tree and the [`Event`].
//!
//! ## Minimal usage
//!
//! ```
//! use trellis_tree::{Element, Tree};
//! use trellis_view::{
//!     CompositeView, ItemView, OUTLET_ATTR, SubViewSlot, View, ViewFactory, ViewHandle,
//!     ViewOptions,
//! };
//!
//! let mut tree = Tree::new();
//! let page = ViewHandle::new(
//!     CompositeView::new("page", ViewOptions::new())
//!         .with_template(|tree, parent, _| {
//!             tree.append(parent, Element::new("h1").with_text("Inbox"));
//!             tree.append(parent, Element::div().with_attr(OUTLET_ATTR, "list"));
//!         })
//!         .with_slot(SubViewSlot::new(
//!             "list",
//!             ViewFactory::of(|options| ItemView::new("messages", options)),
//!         )),
//! );
//!
//! page.borrow_mut().render(&mut tree)?;
//!
//! let list = page.borrow().sub_view("list").expect("declared slot");
//! let el = list.element().expect("rendered");
//! assert!(tree.has_class(el, "list"));
//! assert!(tree.has_class(el, "messages"));
//! assert_eq!(tree.parent(el), page.element());
//! # Ok::<(), trellis_view::ViewError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bindings;
pub mod buffer;
pub mod complex;
pub mod composite;
pub mod events;
pub mod factory;
pub mod frame;
pub mod platform;
pub mod registry;
pub mod view;

mod error;

pub use bindings::UiBindings;
pub use buffer::{InsertionMode, OUTLET_ATTR, RenderBuffer};
pub use complex::{ComplexView, REGION_ATTR, Region, RegionManager};
pub use composite::{CompositeView, DEFAULT_EVENT_PREFIX, EventHook};
pub use error::ViewError;
pub use events::{Emitter, Event, ListenerId};
pub use factory::{SlotOptions, SubViewSlot, ViewFactory};
pub use frame::{FrameCallback, FrameScheduler};
pub use platform::Platform;
pub use registry::SubViewRegistry;
pub use view::{
    ItemView, LifecycleFlags, NavPreferences, Template, View, ViewCore, ViewHandle, ViewId,
    ViewOptions, WeakViewHandle, template,
};
