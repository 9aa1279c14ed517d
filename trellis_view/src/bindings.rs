// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named UI element bindings, re-resolved after every render.

use alloc::string::String;
use alloc::vec::Vec;

use trellis_tree::{NodeId, Selector, Tree};

#[derive(Clone, Debug)]
struct Binding {
    name: String,
    selector: Selector,
    node: Option<NodeId>,
}

/// Maps UI names to selectors and caches the first matching element of each.
///
/// Selectors are evaluated relative to the view's element, e.g. `> .header > .label > span`.
#[derive(Clone, Debug, Default)]
pub struct UiBindings {
    entries: Vec<Binding>,
}

impl UiBindings {
    /// No bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`UiBindings::insert`].
    pub fn with(mut self, name: &str, selector: &str) -> Self {
        self.insert(name, selector);
        self
    }

    /// Declare or redefine a binding. The cached element is dropped.
    pub fn insert(&mut self, name: &str, selector: &str) {
        let selector = Selector::parse(selector);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.selector = selector;
            entry.node = None;
        } else {
            self.entries.push(Binding {
                name: name.into(),
                selector,
                node: None,
            });
        }
    }

    /// Resolve every binding below `root`.
    pub fn bind(&mut self, tree: &Tree, root: NodeId) {
        for entry in &mut self.entries {
            entry.node = tree.select(root, &entry.selector);
            if entry.node.is_none() {
                tracing::debug!(ui = %entry.name, "ui binding matched nothing");
            }
        }
    }

    /// Forget every cached element.
    pub fn unbind(&mut self) {
        for entry in &mut self.entries {
            entry.node = None;
        }
    }

    /// The cached element for `name`.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.entries.iter().find(|e| e.name == name)?.node
    }

    /// The selector declared for `name`.
    pub fn selector(&self, name: &str) -> Option<&Selector> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.selector)
    }

    /// Returns true if any binding currently resolves.
    pub fn is_bound(&self) -> bool {
        self.entries.iter().any(|e| e.node.is_some())
    }

    /// Declared names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of declared bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_tree::Element;

    #[test]
    fn binds_first_match_relative_to_root() {
        let mut tree = Tree::new();
        let root = tree.create(Element::div());
        let header = tree.append(root, Element::div().with_class("header"));
        let back = tree.append(header, Element::div().with_class("backButton genericButton"));
        let close = tree.append(header, Element::div().with_class("closeButton genericButton"));

        let mut ui = UiBindings::new()
            .with("header", "> .header")
            .with("button", "> .header > .genericButton")
            .with("close", "> .header > .closeButton")
            .with("missing", "> .footer");
        ui.bind(&tree, root);
        assert_eq!(ui.get("header"), Some(header));
        assert_eq!(ui.get("button"), Some(back));
        assert_eq!(ui.get("close"), Some(close));
        assert_eq!(ui.get("missing"), None);
        assert!(ui.is_bound());

        ui.unbind();
        assert!(!ui.is_bound());
        assert_eq!(ui.len(), 4);
    }

    #[test]
    fn redefining_a_binding_replaces_its_selector() {
        let mut tree = Tree::new();
        let root = tree.create(Element::div());
        let panel = tree.append(root, Element::div().with_class("panel"));
        let main = tree.append(panel, Element::div().with_class("main-container"));

        let mut ui = UiBindings::new().with("main", "> .main-container");
        ui.bind(&tree, root);
        assert_eq!(ui.get("main"), None);
        ui.insert("main", "> .panel > .main-container");
        ui.bind(&tree, root);
        assert_eq!(ui.get("main"), Some(main));
        assert_eq!(ui.names().count(), 1);
    }
}
