// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named events and the emitter every view owns.
//!
//! ## Dispatch
//!
//! - Listeners registered for a name run before catch-all listeners, each group in
//!   registration order.
//! - The listener set is snapshotted when [`Emitter::trigger`] starts. Listeners removed during
//!   dispatch are skipped; listeners added during dispatch run from the next trigger.
//! - A listener is never re-entered. An event that reaches a listener while it is running is
//!   queued for it and delivered, in order, once its current call returns. A listener that
//!   re-triggers its own event unconditionally therefore never settles.
//!
//! Listeners receive the element tree so they can react structurally, but they never receive
//! a view. Code that needs to reach a view from a listener holds a weak handle and checks that
//! it is not busy.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use trellis_tree::Tree;

use crate::view::ViewId;

/// A named notification raised by a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Event name, e.g. `render` or `subview:click:ok`.
    pub name: String,
    /// The view that raised the event.
    pub source: ViewId,
    /// A second view the event is about (the sub-view for `after:view:added`, the original
    /// sender for forwarded events).
    pub related: Option<ViewId>,
    /// Free-form payload, e.g. the region name for `add:region`.
    pub detail: Option<String>,
}

impl Event {
    /// Create an event with no related view.
    pub fn new(name: impl Into<String>, source: ViewId) -> Self {
        Self {
            name: name.into(),
            source,
            related: None,
            detail: None,
        }
    }

    /// Set the related view.
    pub fn with_related(mut self, related: ViewId) -> Self {
        self.related = Some(related);
        self
    }

    /// Attach a payload.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Identifier of a registered listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

type Callback = Rc<RefCell<dyn FnMut(&mut Tree, &Event)>>;

struct Entry {
    id: ListenerId,
    name: Option<String>,
    owner: Option<ViewId>,
    callback: Callback,
    deferred: Rc<RefCell<VecDeque<Event>>>, // events that arrived while the callback ran
}

#[derive(Default)]
struct Listeners {
    next: u64,
    entries: Vec<Entry>,
}

/// A set of event listeners. Clones share the set.
#[derive(Clone, Default)]
pub struct Emitter {
    inner: Rc<RefCell<Listeners>>,
}

impl core::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.len())
            .finish()
    }
}

impl Emitter {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to events named `name`.
    pub fn on(
        &self,
        name: &str,
        callback: impl FnMut(&mut Tree, &Event) + 'static,
    ) -> ListenerId {
        self.register(Some(name), None, Rc::new(RefCell::new(callback)))
    }

    /// Listen to every event.
    pub fn on_all(&self, callback: impl FnMut(&mut Tree, &Event) + 'static) -> ListenerId {
        self.register(None, None, Rc::new(RefCell::new(callback)))
    }

    /// Listen on behalf of `owner`, so the listener can be dropped with
    /// [`Emitter::stop_listening`]. `None` listens to every event.
    pub fn listen_from(
        &self,
        owner: ViewId,
        name: Option<&str>,
        callback: impl FnMut(&mut Tree, &Event) + 'static,
    ) -> ListenerId {
        self.register(name, Some(owner), Rc::new(RefCell::new(callback)))
    }

    fn register(&self, name: Option<&str>, owner: Option<ViewId>, callback: Callback) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next += 1;
        let id = ListenerId(inner.next);
        inner.entries.push(Entry {
            id,
            name: name.map(String::from),
            owner,
            callback,
            deferred: Rc::default(),
        });
        id
    }

    /// Remove one listener. Returns whether it was registered.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        inner.entries.len() != before
    }

    /// Remove every listener registered on behalf of `owner`.
    pub fn stop_listening(&self, owner: ViewId) {
        self.inner
            .borrow_mut()
            .entries
            .retain(|e| e.owner != Some(owner));
    }

    /// Remove every listener.
    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns true if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to matching listeners.
    ///
    /// A matching listener that is running further up the stack gets `event` after that call
    /// returns instead of being re-entered.
    pub fn trigger(&self, tree: &mut Tree, event: &Event) {
        let snapshot: Vec<(ListenerId, Callback, Rc<RefCell<VecDeque<Event>>>)> = {
            let inner = self.inner.borrow();
            let named = inner
                .entries
                .iter()
                .filter(|e| e.name.as_deref() == Some(event.name.as_str()));
            let all = inner.entries.iter().filter(|e| e.name.is_none());
            named
                .chain(all)
                .map(|e| (e.id, e.callback.clone(), e.deferred.clone()))
                .collect()
        };
        for (id, callback, deferred) in snapshot {
            if !self.contains(id) {
                continue;
            }
            let Ok(mut callback) = callback.try_borrow_mut() else {
                tracing::debug!(event = %event.name, "deferring event for a running listener");
                deferred.borrow_mut().push_back(event.clone());
                continue;
            };
            (&mut *callback)(tree, event);
            loop {
                let next = deferred.borrow_mut().pop_front();
                let Some(next) = next else {
                    break;
                };
                if !self.contains(id) {
                    deferred.borrow_mut().clear();
                    break;
                }
                (&mut *callback)(tree, &next);
            }
        }
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.inner.borrow().entries.iter().any(|e| e.id == id)
    }

    /// Returns true if both handles share a listener set.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
