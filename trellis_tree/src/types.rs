// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, flags, and element data.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;

/// Tag used for fragment nodes created by [`Tree::create_fragment`](crate::Tree::create_fragment).
pub const FRAGMENT_TAG: &str = "#fragment";

/// Tag of the document root created with every [`Tree`](crate::Tree).
pub const DOCUMENT_TAG: &str = "#document";

/// Identifier for an element in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is freed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On [`free`](crate::Tree::free), the slot is released; any existing `NodeId` that pointed to
///   that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a
/// live element. Stale `NodeId`s never alias a different live element because the generation
/// must match, and every tree operation treats a stale id as a no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling display and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is displayed (the equivalent of a non-`none` display style).
        const DISPLAYED = 0b0000_0001;
        /// Element participates in hit testing.
        const PICKABLE  = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::DISPLAYED | Self::PICKABLE
    }
}

/// Data carried by a single element.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Tag name, e.g. `div` or `span`.
    pub tag: String,
    /// Ordered, duplicate-free class list.
    pub classes: Vec<String>,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Optional text content.
    pub text: Option<String>,
    /// World-space bounds as computed by upstream layout.
    pub bounds: Rect,
    /// Display and picking flags.
    pub flags: ElementFlags,
}

impl Element {
    /// Create an element with the given tag and no classes or attributes.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            bounds: Rect::ZERO,
            flags: ElementFlags::default(),
        }
    }

    /// Shorthand for a `div` element.
    pub fn div() -> Self {
        Self::new("div")
    }

    /// Add whitespace-separated classes, skipping ones already present.
    pub fn with_class(mut self, names: &str) -> Self {
        for name in names.split_whitespace() {
            if !self.classes.iter().any(|c| c == name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        set_attr(&mut self.attributes, name, value);
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Set the world-space bounds.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Returns the value of an attribute, if set.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the class list contains `name`.
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    /// Returns true if this element is a fragment.
    pub fn is_fragment(&self) -> bool {
        self.tag == FRAGMENT_TAG
    }
}

pub(crate) fn set_attr(attributes: &mut Vec<(String, String)>, name: &str, value: &str) {
    if let Some(slot) = attributes.iter_mut().find(|(k, _)| k == name) {
        slot.1 = value.to_string();
    } else {
        attributes.push((name.to_string(), value.to_string()));
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub node: NodeId,
    /// Path from the document root to the element (inclusive).
    pub path: Vec<NodeId>,
}
