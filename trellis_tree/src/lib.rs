// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Tree: a generational element tree for retained UIs.
//!
//! Trellis Tree is the element layer the rest of Trellis renders into. It plays the role a
//! document plays for a browser view toolkit, without parsing, styling or layout.
//!
//! - Represents elements with a tag, an ordered class list, attributes, optional text,
//!   world-space bounds and display/picking flags.
//! - Owns detached elements too: fragments used as render buffers, clones, and elements of
//!   views that are not mounted yet.
//! - Supports the structural operations view code needs: append, prepend, insert-after,
//!   replace, detach, free, deep clone, and moving a whole fragment in one step.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything. Upstream layout writes world-space bounds
//! with [`Tree::set_bounds`]; [`Tree::hit_test_point`] only consults those bounds.
//!
//! ## Liveness
//!
//! [`NodeId`] is generational. Freeing an element invalidates its id, and every operation on
//! a stale id is a no-op or returns `None`. Code holding ids for elements it does not own
//! (for example a view's cached UI bindings) can therefore never corrupt a reused slot.
//!
//! ## Mutation accounting
//!
//! [`Tree::live_mutations`] counts structural changes whose parent is connected to the
//! document root. Building content inside a fragment and attaching it with
//! [`Tree::append_fragment`] costs exactly one live mutation.
//!
//! ## API overview
//!
//! - [`Tree`]: container owning every element.
//! - [`Element`]: per-element data (tag, classes, attributes, text, bounds, flags).
//! - [`ElementFlags`]: display and picking controls.
//! - [`NodeId`]: generational handle of an element.
//! - [`Selector`]: minimal child/descendant class selectors for resolving named elements.
//!
//! ### Minimal usage
//!
//! ```
//! use trellis_tree::{Element, Tree};
//!
//! let mut tree = Tree::new();
//! let doc = tree.document();
//! let host = tree.append(doc, Element::div().with_class("host"));
//!
//! // Build content off-tree, then attach it in one step.
//! let fragment = tree.create_fragment();
//! let _title = tree.append(fragment, Element::new("h1").with_text("Inbox"));
//! let placeholder = tree.append(fragment, Element::div().with_attr("outlet", "list"));
//!
//! let before = tree.live_mutations();
//! tree.append_fragment(host, fragment);
//! assert_eq!(tree.live_mutations() - before, 1);
//! assert_eq!(tree.find_by_attr(host, "outlet", "list"), Some(placeholder));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod selector;
mod tree;
mod types;

pub use selector::{Combinator, Selector, Step};
pub use tree::{Tree, strictly_contains};
pub use types::{DOCUMENT_TAG, Element, ElementFlags, FRAGMENT_TAG, Hit, NodeId};

pub use kurbo::{Point, Rect};
