// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sub-view declarations: what to build for each outlet, and with which options.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::OnceCell;

use crate::view::{View, ViewHandle, ViewOptions};

type Constructor = Rc<dyn Fn(ViewOptions) -> ViewHandle>;

struct Lazy {
    resolve: Box<dyn Fn() -> ViewFactory>,
    resolved: OnceCell<ViewFactory>,
}

#[derive(Clone)]
enum Kind {
    Constructor(Constructor),
    Lazy(Rc<Lazy>),
}

/// Builds sub-views from options.
///
/// A factory is either a constructor or a resolver that produces one on first use. Resolution
/// happens at most once per factory, however many times the factory is cloned or used.
#[derive(Clone)]
pub struct ViewFactory {
    kind: Kind,
}

impl core::fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kind = match &self.kind {
            Kind::Constructor(_) => "constructor",
            Kind::Lazy(lazy) if lazy.resolved.get().is_some() => "lazy (resolved)",
            Kind::Lazy(_) => "lazy",
        };
        f.debug_tuple("ViewFactory").field(&kind).finish()
    }
}

impl ViewFactory {
    /// A factory from a constructor returning an erased handle.
    pub fn new(constructor: impl Fn(ViewOptions) -> ViewHandle + 'static) -> Self {
        Self {
            kind: Kind::Constructor(Rc::new(constructor)),
        }
    }

    /// A factory for a concrete view type.
    pub fn of<V: View>(constructor: impl Fn(ViewOptions) -> V + 'static) -> Self {
        Self::new(move |options| ViewHandle::new(constructor(options)).to_dyn())
    }

    /// A factory whose constructor is looked up on first use.
    pub fn lazy(resolve: impl Fn() -> Self + 'static) -> Self {
        Self {
            kind: Kind::Lazy(Rc::new(Lazy {
                resolve: Box::new(resolve),
                resolved: OnceCell::new(),
            })),
        }
    }

    /// Returns false for a lazy factory that has not resolved yet.
    pub fn is_resolved(&self) -> bool {
        match &self.kind {
            Kind::Constructor(_) => true,
            Kind::Lazy(lazy) => lazy.resolved.get().is_some(),
        }
    }

    /// Build a view.
    pub fn build(&self, options: ViewOptions) -> ViewHandle {
        match &self.kind {
            Kind::Constructor(constructor) => constructor(options),
            Kind::Lazy(lazy) => lazy
                .resolved
                .get_or_init(|| (lazy.resolve)())
                .build(options),
        }
    }
}

/// Options for a sub-view: fixed, or computed from the outlet name.
#[derive(Clone)]
pub enum SlotOptions {
    /// The same options every render.
    Static(ViewOptions),
    /// Options computed from the outlet name every render.
    Computed(Rc<dyn Fn(&str) -> ViewOptions>),
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self::Static(ViewOptions::default())
    }
}

impl core::fmt::Debug for SlotOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Static(options) => f.debug_tuple("Static").field(options).finish(),
            Self::Computed(_) => f.write_str("Computed"),
        }
    }
}

impl SlotOptions {
    /// Options for `outlet`, with the outlet name filled in.
    pub fn resolve(&self, outlet: &str) -> ViewOptions {
        let mut options = match self {
            Self::Static(options) => options.clone(),
            Self::Computed(f) => f(outlet),
        };
        options.outlet_name = Some(outlet.into());
        options
    }
}

/// Declaration of one sub-view of a composite view.
#[derive(Clone, Debug)]
pub struct SubViewSlot {
    /// Outlet the sub-view replaces; unique within one composite view.
    pub outlet_name: String,
    /// What to build. Rendering fails if this is missing.
    pub view_type: Option<ViewFactory>,
    /// Construction options.
    pub options: SlotOptions,
}

impl SubViewSlot {
    /// A slot building `view_type` into `outlet`.
    pub fn new(outlet: &str, view_type: ViewFactory) -> Self {
        Self {
            outlet_name: outlet.into(),
            view_type: Some(view_type),
            options: SlotOptions::default(),
        }
    }

    /// A slot with no view type yet.
    pub fn untyped(outlet: &str) -> Self {
        Self {
            outlet_name: outlet.into(),
            view_type: None,
            options: SlotOptions::default(),
        }
    }

    /// Use fixed options.
    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = SlotOptions::Static(options);
        self
    }

    /// Compute options from the outlet name.
    pub fn with_options_fn(mut self, f: impl Fn(&str) -> ViewOptions + 'static) -> Self {
        self.options = SlotOptions::Computed(Rc::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ItemView;
    use core::cell::Cell;

    #[test]
    fn lazy_factories_resolve_once() {
        let resolutions = Rc::new(Cell::new(0));
        let r = resolutions.clone();
        let factory = ViewFactory::lazy(move || {
            r.set(r.get() + 1);
            ViewFactory::of(|o| ItemView::new("late", o))
        });
        let copy = factory.clone();
        assert!(!factory.is_resolved());
        let a = factory.build(ViewOptions::new());
        let b = copy.build(ViewOptions::new());
        assert_eq!(resolutions.get(), 1);
        assert!(copy.is_resolved());
        assert!(!a.ptr_eq(&b));
        assert_eq!(a.borrow().core().class_name(), "late");
    }

    #[test]
    fn computed_options_see_the_outlet() {
        let slot = SubViewSlot::new("title", ViewFactory::of(|o| ItemView::new("t", o)))
            .with_options_fn(|outlet| ViewOptions::new().with_class(&[outlet, "-x"].concat()));
        let options = slot.options.resolve(&slot.outlet_name);
        assert_eq!(options.class.as_deref(), Some("title-x"));
        assert_eq!(options.outlet_name.as_deref(), Some("title"));
    }
}
