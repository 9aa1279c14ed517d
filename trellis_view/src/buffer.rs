// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Off-tree staging for a render pass.
//!
//! A composite view renders its template and every sub-view into a detached fragment, then
//! swaps the fragment's content into its element in one tree operation. Sub-views inserted
//! while buffering are not shown until the fragment is attached; [`RenderBuffer::finish`]
//! hands them back so the owner can show them.

use alloc::vec::Vec;

use trellis_tree::{NodeId, Tree};

use crate::view::ViewHandle;

/// Attribute naming the outlet a placeholder element stands in for.
pub const OUTLET_ATTR: &str = "outlet";

/// Where a sub-view's element is inserted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertionMode {
    /// Into the render buffer; showing is deferred until the buffer is attached.
    Buffered,
    /// Directly into the live element.
    Live,
}

/// Staging fragment plus the views whose `show` waits for it.
#[derive(Debug, Default)]
pub struct RenderBuffer {
    fragment: Option<NodeId>,
    deferred: Vec<ViewHandle>,
    buffering: bool,
}

impl RenderBuffer {
    /// An idle buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start buffering into a fresh fragment, dropping anything left from an earlier pass.
    pub fn begin(&mut self, tree: &mut Tree) {
        self.discard(tree);
        self.fragment = Some(tree.create_fragment());
        self.buffering = true;
    }

    /// Returns true between [`RenderBuffer::begin`] and [`RenderBuffer::finish`].
    pub fn is_buffering(&self) -> bool {
        self.buffering
    }

    /// The insertion mode currently in effect.
    pub fn mode(&self) -> InsertionMode {
        if self.buffering {
            InsertionMode::Buffered
        } else {
            InsertionMode::Live
        }
    }

    /// The staging fragment, while buffering.
    pub fn fragment(&self) -> Option<NodeId> {
        self.fragment
    }

    /// Views waiting to be shown.
    pub fn deferred(&self) -> &[ViewHandle] {
        &self.deferred
    }

    /// Replace the `outlet` placeholder inside the fragment with `element` and defer showing
    /// `view`. Returns false (and defers nothing) if the placeholder is absent.
    pub fn insert_buffered(
        &mut self,
        tree: &mut Tree,
        outlet: &str,
        element: NodeId,
        view: ViewHandle,
    ) -> bool {
        let Some(fragment) = self.fragment else {
            return false;
        };
        if !replace_placeholder(tree, fragment, outlet, element) {
            return false;
        }
        self.deferred.push(view);
        true
    }

    /// Replace the `outlet` placeholder below `root` with `element`.
    pub fn insert_live(&self, tree: &mut Tree, root: NodeId, outlet: &str, element: NodeId) -> bool {
        replace_placeholder(tree, root, outlet, element)
    }

    /// Stop buffering and swap the fragment's content into `target` as one mutation.
    ///
    /// The previous children of `target` are freed. Returns the deferred views.
    pub fn finish(&mut self, tree: &mut Tree, target: NodeId) -> Vec<ViewHandle> {
        self.buffering = false;
        if let Some(fragment) = self.fragment.take() {
            for old in tree.replace_children(target, fragment) {
                tree.free(old);
            }
            tree.free(fragment);
        }
        core::mem::take(&mut self.deferred)
    }

    /// Abandon the pass: free the fragment and forget deferred views.
    pub fn discard(&mut self, tree: &mut Tree) {
        if let Some(fragment) = self.fragment.take() {
            tree.free(fragment);
        }
        self.deferred.clear();
        self.buffering = false;
    }
}

fn replace_placeholder(tree: &mut Tree, scope: NodeId, outlet: &str, element: NodeId) -> bool {
    let Some(placeholder) = tree.find_by_attr(scope, OUTLET_ATTR, outlet) else {
        tracing::debug!(outlet, "no placeholder for outlet");
        return false;
    };
    if !tree.replace_child(placeholder, element) {
        return false;
    }
    tree.free(placeholder);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ItemView, ViewOptions};
    use trellis_tree::Element;

    #[test]
    fn buffered_insert_attaches_once() {
        let mut tree = Tree::new();
        let doc = tree.document();
        let host = tree.append(doc, Element::div());
        let stale = tree.append(host, Element::new("p"));

        let mut buffer = RenderBuffer::new();
        buffer.begin(&mut tree);
        let fragment = buffer.fragment().unwrap();
        let placeholder = tree.append(fragment, Element::div().with_attr(OUTLET_ATTR, "body"));
        let child = tree.create(Element::new("section"));
        let view = ViewHandle::new(ItemView::new("body", ViewOptions::new())).to_dyn();

        let before = tree.live_mutations();
        assert!(buffer.insert_buffered(&mut tree, "body", child, view.clone()));
        assert!(!buffer.insert_buffered(&mut tree, "nope", child, view.clone()));
        assert_eq!(tree.live_mutations(), before);
        assert!(!tree.is_alive(placeholder));
        assert_eq!(buffer.mode(), InsertionMode::Buffered);

        let deferred = buffer.finish(&mut tree, host);
        assert_eq!(tree.live_mutations() - before, 1);
        assert_eq!(deferred.len(), 1);
        assert_eq!(tree.children(host), &[child]);
        assert!(!tree.is_alive(stale));
        assert!(!tree.is_alive(fragment));
        assert!(!buffer.is_buffering());
    }

    #[test]
    fn live_insert_replaces_in_place() {
        let mut tree = Tree::new();
        let host = tree.create(Element::div());
        let before = tree.append(host, Element::new("h1"));
        tree.append(host, Element::div().with_attr(OUTLET_ATTR, "list"));
        let child = tree.create(Element::new("ul"));
        let buffer = RenderBuffer::new();
        assert_eq!(buffer.mode(), InsertionMode::Live);
        assert!(buffer.insert_live(&mut tree, host, "list", child));
        assert_eq!(tree.children(host), &[before, child]);
    }

    #[test]
    fn discard_frees_the_fragment() {
        let mut tree = Tree::new();
        let mut buffer = RenderBuffer::new();
        buffer.begin(&mut tree);
        let fragment = buffer.fragment().unwrap();
        buffer.discard(&mut tree);
        assert!(!tree.is_alive(fragment));
        assert!(buffer.deferred().is_empty());
        assert!(!buffer.is_buffering());
    }
}
