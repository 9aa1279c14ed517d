// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree implementation.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::selector::{Combinator, Selector};
use crate::types::{DOCUMENT_TAG, Element, ElementFlags, FRAGMENT_TAG, Hit, NodeId, set_attr};

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        }
    }
}

/// Top-level element tree.
///
/// Owns every element, including detached ones (fragments, clones, and elements of views that
/// have not been attached yet). Elements are released explicitly with [`Tree::free`].
pub struct Tree {
    nodes: Vec<Option<Node>>, // generational slots
    generations: Vec<u32>,    // last generation per slot, kept across frees
    free_list: Vec<usize>,
    document: NodeId,
    live_mutations: u64,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("live_mutations", &self.live_mutations)
            .finish_non_exhaustive()
    }
}

impl Tree {
    /// Create a new tree holding only the document root.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            document: NodeId::new(0, 0),
            live_mutations: 0,
        };
        tree.document = tree.create(Element::new(DOCUMENT_TAG));
        tree
    }

    /// The document root. Elements reachable from it are *connected*.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Number of live elements, including the document root.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if only the document root exists.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Number of structural mutations applied to connected parents so far.
    ///
    /// Moving a whole fragment with [`Tree::append_fragment`] counts once.
    pub fn live_mutations(&self) -> u64 {
        self.live_mutations
    }

    // --- creation and destruction ---

    /// Create a detached element.
    pub fn create(&mut self, element: Element) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create a detached fragment. Appending a fragment moves its children instead.
    pub fn create_fragment(&mut self) -> NodeId {
        self.create(Element::new(FRAGMENT_TAG))
    }

    /// Create an element and append it to `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.create(element);
        self.append_child(parent, id);
        id
    }

    /// Free an element and its whole subtree, detaching it first.
    ///
    /// The document root cannot be freed.
    pub fn free(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.document {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    /// Free every child subtree of `id`, keeping `id` itself.
    pub fn free_children(&mut self, id: NodeId) {
        for child in self.detach_children(id) {
            self.free_subtree(child);
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            if self.is_alive(child) {
                self.free_subtree(child);
            }
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    // --- structure ---

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Parent of an element, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of an element (empty for stale ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// First child of an element.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Last child of an element.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Returns true if the element has a parent.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.parent(id).is_some()
    }

    /// Returns true if the element is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut cur = id;
        loop {
            if cur == self.document {
                return true;
            }
            match self.node(cur).parent {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    /// Append `child` as the last child of `parent`, moving it from any previous parent.
    ///
    /// Appending a fragment moves the fragment's children instead (see [`Tree::append_fragment`]).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node_opt(child).is_some_and(|n| n.element.is_fragment()) {
            self.append_fragment(parent, child);
            return;
        }
        let len = self.children(parent).len();
        self.insert_at(parent, child, len);
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_at(parent, child, 0);
    }

    /// Insert `id` directly after `reference` in the reference's parent.
    ///
    /// No-op if `reference` is detached.
    pub fn insert_after(&mut self, id: NodeId, reference: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        if id == reference {
            return;
        }
        self.detach(id);
        let Some(pos) = self.children(parent).iter().position(|c| *c == reference) else {
            return;
        };
        self.insert_at(parent, id, pos + 1);
    }

    /// Replace `old` with `new` in `old`'s parent. Returns false if `old` is detached.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        if !self.is_alive(new) || old == new || self.is_ancestor_or_self(new, old) {
            return false;
        }
        let Some(parent) = self.parent(old) else {
            return false;
        };
        self.detach(new);
        let Some(pos) = self.children(parent).iter().position(|c| *c == old) else {
            return false;
        };
        self.note_mutation(parent);
        self.node_mut(parent).children[pos] = new;
        self.node_mut(old).parent = None;
        self.node_mut(new).parent = Some(parent);
        true
    }

    /// Move every child of `fragment` into `parent` as a single mutation.
    ///
    /// The fragment is left empty and still alive.
    pub fn append_fragment(&mut self, parent: NodeId, fragment: NodeId) {
        if !self.is_alive(parent) || !self.is_alive(fragment) || parent == fragment {
            return;
        }
        if self.is_ancestor_or_self(fragment, parent) {
            return;
        }
        let moved = core::mem::take(&mut self.node_mut(fragment).children);
        if moved.is_empty() {
            return;
        }
        for &child in &moved {
            self.node_mut(child).parent = Some(parent);
        }
        self.node_mut(parent).children.extend(moved);
        self.note_mutation(parent);
    }

    /// Swap the children of `parent` for the children of `fragment` as a single mutation.
    ///
    /// Returns the previous children, detached but alive. The fragment is left empty.
    pub fn replace_children(&mut self, parent: NodeId, fragment: NodeId) -> Vec<NodeId> {
        if !self.is_alive(parent) || !self.is_alive(fragment) || parent == fragment {
            return Vec::new();
        }
        if self.is_ancestor_or_self(fragment, parent) {
            return Vec::new();
        }
        let old = core::mem::take(&mut self.node_mut(parent).children);
        for &child in &old {
            self.node_mut(child).parent = None;
        }
        let moved = core::mem::take(&mut self.node_mut(fragment).children);
        for &child in &moved {
            self.node_mut(child).parent = Some(parent);
        }
        let changed = !old.is_empty() || !moved.is_empty();
        self.node_mut(parent).children = moved;
        if changed {
            self.note_mutation(parent);
        }
        old
    }

    /// Detach an element from its parent. The element stays alive.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.note_mutation(parent);
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Detach every child of `id`, returning them in order. The children stay alive.
    pub fn detach_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node_opt_mut(id) else {
            return Vec::new();
        };
        let children = core::mem::take(&mut node.children);
        if !children.is_empty() {
            self.note_mutation(id);
        }
        for &child in &children {
            self.node_mut(child).parent = None;
        }
        children
    }

    fn insert_at(&mut self, parent: NodeId, child: NodeId, pos: usize) {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.document {
            return;
        }
        // Refuse to create cycles.
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let pos = pos.min(children.len());
        children.insert(pos, child);
        self.node_mut(child).parent = Some(parent);
        self.note_mutation(parent);
    }

    fn note_mutation(&mut self, parent: NodeId) {
        if self.is_connected(parent) {
            self.live_mutations = self.live_mutations.wrapping_add(1);
        }
    }

    // --- element data ---

    /// Borrow the element data.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Text content of an element.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.element(id).and_then(|e| e.text.as_deref())
    }

    /// Set or clear the text content.
    pub fn set_text(&mut self, id: NodeId, text: Option<&str>) {
        if let Some(node) = self.node_opt_mut(id) {
            node.element.text = text.map(|t| t.to_string());
        }
    }

    /// Value of an attribute.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_opt_mut(id) {
            set_attr(&mut node.element.attributes, name, value);
        }
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.node_opt_mut(id) {
            node.element.attributes.retain(|(k, _)| k != name);
        }
    }

    /// Class list of an element.
    pub fn classes(&self, id: NodeId) -> &[String] {
        self.element(id).map(|e| e.classes.as_slice()).unwrap_or(&[])
    }

    /// Returns true if the element carries the class.
    pub fn has_class(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(name))
    }

    /// Add whitespace-separated classes.
    ///
    /// Classes already present are moved to the end, so the most recently added class is last.
    pub fn add_class(&mut self, id: NodeId, names: &str) {
        if let Some(node) = self.node_opt_mut(id) {
            let classes = &mut node.element.classes;
            for name in names.split_whitespace() {
                classes.retain(|c| c != name);
                classes.push(name.to_string());
            }
        }
    }

    /// Remove whitespace-separated classes.
    pub fn remove_class(&mut self, id: NodeId, names: &str) {
        if let Some(node) = self.node_opt_mut(id) {
            let remove: Vec<&str> = names.split_whitespace().collect();
            node.element.classes.retain(|c| !remove.contains(&c.as_str()));
        }
    }

    /// Remove one set of classes and add another in a single step.
    pub fn update_classes(&mut self, id: NodeId, remove: &[&str], add: &[&str]) {
        if let Some(node) = self.node_opt_mut(id) {
            let classes = &mut node.element.classes;
            classes.retain(|c| !remove.contains(&c.as_str()));
            for name in add {
                if !classes.iter().any(|c| c == name) {
                    classes.push((*name).to_string());
                }
            }
        }
    }

    /// Show or hide an element.
    pub fn set_displayed(&mut self, id: NodeId, displayed: bool) {
        if let Some(node) = self.node_opt_mut(id) {
            node.element.flags.set(ElementFlags::DISPLAYED, displayed);
        }
    }

    /// Returns true if the element itself is displayed (ancestors are not consulted).
    pub fn is_displayed(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|e| e.flags.contains(ElementFlags::DISPLAYED))
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: NodeId, flags: ElementFlags) {
        if let Some(node) = self.node_opt_mut(id) {
            node.element.flags = flags;
        }
    }

    /// Update world-space bounds.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.node_opt_mut(id) {
            node.element.bounds = bounds;
        }
    }

    /// World-space bounds.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.element(id).map(|e| e.bounds)
    }

    // --- queries ---

    /// First descendant of `root` (excluding `root`) whose attribute `name` equals `value`.
    pub fn find_by_attr(&self, root: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.find_descendant(root, &|e| e.attr(name) == Some(value))
    }

    /// First descendant of `root` (excluding `root`) carrying the class.
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.find_descendant(root, &|e| e.has_class(class))
    }

    fn find_descendant(&self, root: NodeId, pred: &dyn Fn(&Element) -> bool) -> Option<NodeId> {
        for &child in self.children(root) {
            if pred(&self.node(child).element) {
                return Some(child);
            }
            if let Some(found) = self.find_descendant(child, pred) {
                return Some(found);
            }
        }
        None
    }

    /// First element (in document order) matching the selector, starting below `root`.
    pub fn select(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.select_all(root, selector).into_iter().next()
    }

    /// Every element matching the selector, in document order, starting below `root`.
    pub fn select_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut current = alloc::vec![root];
        for step in selector.steps() {
            let mut next = Vec::new();
            for &scope in &current {
                match step.combinator {
                    Combinator::Child => {
                        for &c in self.children(scope) {
                            if step.matches(&self.node(c).element) && !next.contains(&c) {
                                next.push(c);
                            }
                        }
                    }
                    Combinator::Descendant => {
                        for d in self.descendants(scope) {
                            if step.matches(&self.node(d).element) && !next.contains(&d) {
                                next.push(d);
                            }
                        }
                    }
                }
            }
            current = next;
            if current.is_empty() {
                break;
            }
        }
        if selector.is_empty() {
            return Vec::new();
        }
        current
    }

    /// Every descendant of `root` (excluding `root`) in document order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(root, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Deep-clone an element and its subtree into a new detached subtree.
    pub fn clone_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let element = self.element(id)?.clone();
        let copy = self.create(element);
        let children = self.children(id).to_vec();
        for child in children {
            if let Some(child_copy) = self.clone_subtree(child) {
                self.node_mut(child_copy).parent = Some(copy);
                self.node_mut(copy).children.push(child_copy);
            }
        }
        Some(copy)
    }

    /// Hit test a world-space point against connected, displayed, pickable elements.
    ///
    /// Bounds containment is strict. Later siblings are on top of earlier ones, and children
    /// on top of their parents. Hidden elements hide their whole subtree.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let mut best = None;
        self.hit_recursive(self.document, pt, &mut best);
        best.map(|node| Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    fn hit_recursive(&self, id: NodeId, pt: Point, best: &mut Option<NodeId>) {
        for &child in self.children(id) {
            let element = &self.node(child).element;
            if !element.flags.contains(ElementFlags::DISPLAYED) {
                continue;
            }
            if element.flags.contains(ElementFlags::PICKABLE) && strictly_contains(element.bounds, pt)
            {
                *best = Some(child);
            }
            self.hit_recursive(child, pt, best);
        }
    }

    /// Path from the topmost ancestor to `id` (inclusive).
    pub fn path_to_root(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        loop {
            out.push(id);
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}

/// Strict point-in-rect test: points on the edges are outside.
pub fn strictly_contains(rect: Rect, pt: Point) -> bool {
    pt.x > rect.x0 && pt.x < rect.x1 && pt.y > rect.y0 && pt.y < rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn connected_div(tree: &mut Tree) -> NodeId {
        let doc = tree.document();
        tree.append(doc, Element::div())
    }

    #[test]
    fn liveness_create_free_reuse() {
        let mut tree = Tree::new();
        let a = tree.create(Element::div());
        assert!(tree.is_alive(a));
        tree.free(a);
        assert!(!tree.is_alive(a));
        let b = tree.create(Element::div());
        // Slot reused with a bumped generation.
        assert_eq!(a.0, b.0);
        assert_ne!(a, b);
        assert!(!tree.is_alive(a));
        // Stale ids are ignored.
        tree.add_class(a, "x");
        assert!(!tree.has_class(b, "x"));
    }

    #[test]
    fn reused_slot_never_revives_older_ids() {
        let mut tree = Tree::new();
        let a = tree.create(Element::div());
        tree.free(a);
        let b = tree.create(Element::div());
        assert_eq!(a.0, b.0);
        assert_ne!(a, b);
        assert!(!tree.is_alive(a));
        assert!(tree.is_alive(b));

        tree.free(b);
        let c = tree.create(Element::div());
        assert_eq!(b.0, c.0);
        assert!(tree.is_alive(c));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn document_cannot_be_freed() {
        let mut tree = Tree::new();
        let doc = tree.document();
        tree.free(doc);
        assert!(tree.is_alive(doc));
    }

    #[test]
    fn free_releases_subtree() {
        let mut tree = Tree::new();
        let root = connected_div(&mut tree);
        let child = tree.append(root, Element::div());
        let grandchild = tree.append(child, Element::new("span"));
        tree.free(child);
        assert!(!tree.is_alive(child));
        assert!(!tree.is_alive(grandchild));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn append_prepend_insert_after() {
        let mut tree = Tree::new();
        let root = connected_div(&mut tree);
        let a = tree.append(root, Element::div().with_class("a"));
        let b = tree.create(Element::div().with_class("b"));
        let c = tree.create(Element::div().with_class("c"));
        tree.prepend_child(root, b);
        tree.insert_after(c, b);
        assert_eq!(tree.children(root), &[b, c, a]);
        // Moving keeps a single parent.
        tree.append_child(root, b);
        assert_eq!(tree.children(root), &[c, a, b]);
    }

    #[test]
    fn cycles_are_refused() {
        let mut tree = Tree::new();
        let a = tree.create(Element::div());
        let b = tree.append(a, Element::div());
        tree.append_child(b, a);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.parent(b), Some(a));
    }

    #[test]
    fn replace_child_swaps_in_place() {
        let mut tree = Tree::new();
        let root = connected_div(&mut tree);
        let first = tree.append(root, Element::div());
        let placeholder = tree.append(root, Element::div().with_attr("outlet", "x"));
        let last = tree.append(root, Element::div());
        let real = tree.create(Element::new("section"));
        assert!(tree.replace_child(placeholder, real));
        assert_eq!(tree.children(root), &[first, real, last]);
        assert!(!tree.is_attached(placeholder));
        // Detached `old` cannot be replaced.
        let other = tree.create(Element::div());
        assert!(!tree.replace_child(placeholder, other));
    }

    #[test]
    fn fragment_append_is_a_single_live_mutation() {
        let mut tree = Tree::new();
        let root = connected_div(&mut tree);
        let frag = tree.create_fragment();
        for _ in 0..5 {
            let _ = tree.append(frag, Element::div());
        }
        let before = tree.live_mutations();
        tree.append_child(root, frag);
        assert_eq!(tree.live_mutations() - before, 1);
        assert_eq!(tree.children(root).len(), 5);
        assert!(tree.children(frag).is_empty());
        assert!(tree.is_alive(frag));
    }

    #[test]
    fn detached_mutations_are_not_counted() {
        let mut tree = Tree::new();
        let detached = tree.create(Element::div());
        let before = tree.live_mutations();
        let _ = tree.append(detached, Element::div());
        assert_eq!(tree.live_mutations(), before);
    }

    #[test]
    fn class_operations() {
        let mut tree = Tree::new();
        let a = tree.create(Element::div().with_class("one two"));
        tree.add_class(a, "one three");
        assert_eq!(tree.classes(a), &["two", "one", "three"]);
        tree.remove_class(a, "two three");
        assert_eq!(tree.classes(a), &["one"]);
        tree.update_classes(a, &["slide-left", "slide-right"], &["slide-right"]);
        tree.update_classes(a, &["slide-left", "slide-right"], &["slide-left"]);
        assert_eq!(tree.classes(a), &["one", "slide-left"]);
    }

    #[test]
    fn find_and_select() {
        let mut tree = Tree::new();
        let root = tree.create(Element::div());
        let main = tree.append(root, Element::div().with_class("main-container"));
        let left = tree.append(main, Element::div().with_class("left-view"));
        let nested = tree.append(left, Element::div().with_class("left-view"));
        let outlet = tree.append(left, Element::div().with_attr("outlet", "header"));

        assert_eq!(tree.find_by_attr(root, "outlet", "header"), Some(outlet));
        assert_eq!(tree.find_by_attr(root, "outlet", "footer"), None);
        assert_eq!(
            tree.select(root, &Selector::parse(">.main-container >.left-view")),
            Some(left)
        );
        assert_eq!(
            tree.select_all(root, &Selector::parse(".left-view")),
            vec![left, nested]
        );
        assert_eq!(tree.select(root, &Selector::parse(">.left-view")), None);
    }

    #[test]
    fn clone_subtree_is_detached_and_deep() {
        let mut tree = Tree::new();
        let root = connected_div(&mut tree);
        let bar = tree.append(root, Element::div().with_class("NavBar"));
        let title = tree.append(bar, Element::new("span").with_text("Inbox"));
        let copy = tree.clone_subtree(bar).unwrap();
        assert!(!tree.is_attached(copy));
        assert_ne!(copy, bar);
        let copied_title = tree.first_child(copy).unwrap();
        assert_ne!(copied_title, title);
        assert_eq!(tree.text(copied_title), Some("Inbox"));
        // Editing the clone leaves the original alone.
        tree.set_text(copied_title, Some("Drafts"));
        assert_eq!(tree.text(title), Some("Inbox"));
    }

    #[test]
    fn hit_test_prefers_topmost_and_skips_hidden() {
        let mut tree = Tree::new();
        let root = connected_div(&mut tree);
        tree.set_bounds(root, Rect::new(0.0, 0.0, 100.0, 100.0));
        let a = tree.append(root, Element::div().with_bounds(Rect::new(10.0, 10.0, 50.0, 50.0)));
        let b = tree.append(root, Element::div().with_bounds(Rect::new(30.0, 30.0, 80.0, 80.0)));

        let hit = tree.hit_test_point(Point::new(40.0, 40.0)).unwrap();
        assert_eq!(hit.node, b);
        assert_eq!(hit.path, vec![tree.document(), root, b]);

        tree.set_displayed(b, false);
        assert_eq!(tree.hit_test_point(Point::new(40.0, 40.0)).unwrap().node, a);

        // Edges are outside.
        assert_eq!(tree.hit_test_point(Point::new(10.0, 20.0)).unwrap().node, root);
    }

    #[test]
    fn replace_children_is_one_mutation() {
        let mut tree = Tree::new();
        let root = connected_div(&mut tree);
        let old_a = tree.append(root, Element::div());
        let old_b = tree.append(root, Element::div());
        let fragment = tree.create_fragment();
        let new_a = tree.append(fragment, Element::div());
        let new_b = tree.append(fragment, Element::new("span"));

        let before = tree.live_mutations();
        let old = tree.replace_children(root, fragment);
        assert_eq!(tree.live_mutations() - before, 1);
        assert_eq!(old, vec![old_a, old_b]);
        assert_eq!(tree.children(root), &[new_a, new_b]);
        assert!(tree.children(fragment).is_empty());
        assert!(tree.is_alive(old_a));
        assert_eq!(tree.parent(old_a), None);
        assert_eq!(tree.parent(new_b), Some(root));
    }

    #[test]
    fn detach_children_keeps_them_alive() {
        let mut tree = Tree::new();
        let root = connected_div(&mut tree);
        let a = tree.append(root, Element::div());
        let b = tree.append(root, Element::div());
        assert_eq!(tree.detach_children(root), vec![a, b]);
        assert!(tree.is_alive(a) && tree.is_alive(b));
        assert!(!tree.is_attached(a));
        tree.append_child(root, a);
        tree.free_children(root);
        assert!(!tree.is_alive(a));
    }
}
