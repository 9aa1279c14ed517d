// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny selector language for resolving named UI elements.
//!
//! Supported steps are tag names and `.class` chains, joined either by whitespace
//! (descendant) or by `>` (direct child). A leading `>` anchors the first step to the
//! children of the element the query starts from.
//!
//! ```
//! use trellis_tree::Selector;
//!
//! let s = Selector::parse(">.header >.label > span");
//! assert_eq!(s.len(), 3);
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::types::Element;

/// How a step relates to the element matched by the previous step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Combinator {
    /// Any descendant.
    Descendant,
    /// Direct child only.
    Child,
}

/// One compound step of a [`Selector`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// Relation to the previous step (or to the query root for the first step).
    pub combinator: Combinator,
    /// Required tag name, if any.
    pub tag: Option<String>,
    /// Classes that must all be present.
    pub classes: Vec<String>,
}

impl Step {
    pub(crate) fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && element.tag != *tag
        {
            return false;
        }
        self.classes.iter().all(|c| element.has_class(c))
    }
}

/// A parsed selector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    /// Parse a selector string. Unsupported syntax is ignored rather than rejected.
    pub fn parse(source: &str) -> Self {
        let mut steps = Vec::new();
        let mut pending_child = false;
        for token in source.split_whitespace() {
            let mut token = token;
            if let Some(rest) = token.strip_prefix('>') {
                pending_child = true;
                token = rest;
            }
            if token.is_empty() {
                continue;
            }
            let mut parts = token.split('.');
            let tag = parts
                .next()
                .filter(|t| !t.is_empty())
                .map(|t| t.to_string());
            let classes = parts
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string())
                .collect();
            steps.push(Step {
                combinator: if pending_child {
                    Combinator::Child
                } else {
                    Combinator::Descendant
                },
                tag,
                classes,
            });
            pending_child = false;
        }
        Self { steps }
    }

    /// The parsed steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the selector has no steps (and therefore matches nothing).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
