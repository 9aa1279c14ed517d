// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared "active pointer target" slot.
//!
//! Only one control may be pressed at a time across everything that shares a
//! [`PointerContext`]. Contexts are cheap handles: clone one into every control that should
//! take part in the same exclusion domain, and create a fresh one for an isolated UI (or test).

use alloc::rc::Rc;
use core::cell::Cell;

/// Identifier of a control registered with a [`PointerContext`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    /// Raw value, for diagnostics.
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Slot {
    active: Cell<Option<ControlId>>,
    next_id: Cell<u64>,
}

/// Shared single-writer slot naming the control that currently owns the pointer.
#[derive(Clone, Debug, Default)]
pub struct PointerContext {
    slot: Rc<Slot>,
}

impl PointerContext {
    /// Create an isolated context with no active control.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an identifier for a new control.
    pub fn register(&self) -> ControlId {
        let id = self.slot.next_id.get() + 1;
        self.slot.next_id.set(id);
        ControlId(id)
    }

    /// The control that received the most recent pointer-down, if still held.
    pub fn active(&self) -> Option<ControlId> {
        self.slot.active.get()
    }

    /// Returns true if `id` owns the pointer.
    pub fn is_active(&self, id: ControlId) -> bool {
        self.slot.active.get() == Some(id)
    }

    /// Make `id` the active control. The most recent pointer-down always wins.
    pub fn claim(&self, id: ControlId) {
        self.slot.active.set(Some(id));
    }

    /// Clear the slot if `id` owns it. Returns whether it did.
    pub fn release(&self, id: ControlId) -> bool {
        if self.is_active(id) {
            self.slot.active.set(None);
            true
        } else {
            false
        }
    }

    /// Clear the slot regardless of owner.
    pub fn clear(&self) {
        self.slot.active.set(None);
    }

    /// Handler for a pointer-up anywhere in the document.
    pub fn document_pointer_up(&self) {
        if let Some(id) = self.slot.active.take() {
            tracing::debug!(control = id.get(), "stray pointer-up released active control");
        }
    }

    /// Returns true if both handles refer to the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}
