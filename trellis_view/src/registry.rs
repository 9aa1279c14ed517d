// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed storage for a composite view's sub-views.

use alloc::string::String;
use alloc::vec::Vec;

use crate::view::{ViewHandle, ViewId};

/// Ordered map from outlet name to sub-view. Outlet names are unique.
#[derive(Debug, Default)]
pub struct SubViewRegistry {
    entries: Vec<(String, ViewHandle)>,
}

impl SubViewRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `view` under `outlet`, returning any view previously registered there.
    pub fn add(&mut self, outlet: &str, view: ViewHandle) -> Option<ViewHandle> {
        if let Some(slot) = self.entries.iter_mut().find(|(o, _)| o == outlet) {
            return Some(core::mem::replace(&mut slot.1, view));
        }
        self.entries.push((outlet.into(), view));
        None
    }

    /// Unregister a view by id, returning its outlet and handle.
    pub fn remove(&mut self, id: ViewId) -> Option<(String, ViewHandle)> {
        let pos = self.entries.iter().position(|(_, v)| v.id() == id)?;
        Some(self.entries.remove(pos))
    }

    /// The view registered under `outlet`.
    pub fn find_by_outlet(&self, outlet: &str) -> Option<&ViewHandle> {
        self.entries
            .iter()
            .find(|(o, _)| o == outlet)
            .map(|(_, v)| v)
    }

    /// The view with `id`.
    pub fn find_by_id(&self, id: ViewId) -> Option<&ViewHandle> {
        self.entries.iter().find(|(_, v)| v.id() == id).map(|(_, v)| v)
    }

    /// Outlet of the view with `id`.
    pub fn outlet_of(&self, id: ViewId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| v.id() == id)
            .map(|(o, _)| o.as_str())
    }

    /// Returns true if a view with `id` is registered.
    pub fn contains(&self, id: ViewId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Iterate `(outlet, view)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ViewHandle)> + '_ {
        self.entries.iter().map(|(o, v)| (o.as_str(), v))
    }

    /// Snapshot of the registered views, for iteration while mutating.
    pub fn views(&self) -> Vec<ViewHandle> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
