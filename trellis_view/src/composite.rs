// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite views: a template plus declared sub-views, rebuilt on every render.
//!
//! ## Render pass
//!
//! 1. `before:render` is raised and buffering starts.
//! 2. Every existing sub-view is removed and destroyed.
//! 3. The template renders into the buffer.
//! 4. Each declared slot is built, rendered, and swapped in for its `outlet` placeholder in
//!    the buffer, in declaration order.
//! 5. The buffer replaces the element's content in one tree operation; buffered sub-views
//!    are shown if the composite already is.
//! 6. UI bindings are re-resolved and `render` is raised.
//!
//! ## Events
//!
//! Every event a sub-view raises is re-raised on the composite as
//! `<prefix>:<event>:<outlet>` (prefix `subview` unless configured), with the sub-view as
//! the related view. An interceptor registered for the bare event name runs first.
//!
//! The composite raises `before:view:added`, `after:view:added`, `view:removed`, and
//! `destroy:collection` around sub-view changes and teardown.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use trellis_tree::{Element, NodeId, Tree};

use crate::bindings::UiBindings;
use crate::buffer::{OUTLET_ATTR, RenderBuffer};
use crate::error::ViewError;
use crate::events::Event;
use crate::factory::SubViewSlot;
use crate::registry::SubViewRegistry;
use crate::view::{Template, View, ViewCore, ViewHandle, ViewOptions};

/// Default prefix for forwarded sub-view events.
pub const DEFAULT_EVENT_PREFIX: &str = "subview";

/// Hook run for a sub-view event before it is re-raised on the parent.
pub type EventHook = Rc<dyn Fn(&mut Tree, &Event)>;

type Hooks = Rc<RefCell<BTreeMap<String, EventHook>>>;

/// A view built from a template and a set of declared sub-views.
pub struct CompositeView {
    core: ViewCore,
    template: Option<Template>,
    slots: Vec<SubViewSlot>,
    registry: SubViewRegistry,
    buffer: RenderBuffer,
    ui: UiBindings,
    event_prefix: String,
    hooks: Hooks,
}

impl core::fmt::Debug for CompositeView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompositeView")
            .field("core", &self.core)
            .field("slots", &self.slots)
            .field("registry", &self.registry)
            .field("buffer", &self.buffer)
            .field("event_prefix", &self.event_prefix)
            .finish_non_exhaustive()
    }
}

impl CompositeView {
    /// Create a composite view with no template and no slots.
    pub fn new(class_name: &str, options: ViewOptions) -> Self {
        Self {
            core: ViewCore::new(class_name, options),
            template: None,
            slots: Vec::new(),
            registry: SubViewRegistry::new(),
            buffer: RenderBuffer::new(),
            ui: UiBindings::new(),
            event_prefix: DEFAULT_EVENT_PREFIX.into(),
            hooks: Rc::default(),
        }
    }

    /// Set the template. It should contain an `outlet` placeholder per slot.
    pub fn with_template(mut self, f: impl Fn(&mut Tree, NodeId, &ViewOptions) + 'static) -> Self {
        self.template = Some(Rc::new(f));
        self
    }

    /// Declare a sub-view, replacing any slot with the same outlet.
    pub fn with_slot(mut self, slot: SubViewSlot) -> Self {
        self.slots.retain(|s| s.outlet_name != slot.outlet_name);
        self.slots.push(slot);
        self
    }

    /// Declare sub-views computed from this view's options. Evaluated once, here.
    pub fn with_slots_from(mut self, f: impl FnOnce(&ViewOptions) -> Vec<SubViewSlot>) -> Self {
        for slot in f(self.core.options()) {
            self = self.with_slot(slot);
        }
        self
    }

    /// Declare a named UI element.
    pub fn with_ui(mut self, name: &str, selector: &str) -> Self {
        self.ui.insert(name, selector);
        self
    }

    /// Change the prefix of forwarded sub-view events.
    pub fn with_event_prefix(mut self, prefix: &str) -> Self {
        self.event_prefix = prefix.into();
        self
    }

    /// Run `hook` for every sub-view event named `event` before it is re-raised.
    pub fn with_interceptor(
        self,
        event: &str,
        hook: impl Fn(&mut Tree, &Event) + 'static,
    ) -> Self {
        self.hooks.borrow_mut().insert(event.into(), Rc::new(hook));
        self
    }

    /// Declared slots.
    pub fn slots(&self) -> &[SubViewSlot] {
        &self.slots
    }

    /// Resolved UI elements.
    pub fn ui(&self) -> &UiBindings {
        &self.ui
    }

    /// Registered sub-views.
    pub fn registry(&self) -> &SubViewRegistry {
        &self.registry
    }

    /// Returns true while a render pass is buffering.
    pub fn is_buffering(&self) -> bool {
        self.buffer.is_buffering()
    }

    /// The sub-view filling `outlet`.
    pub fn sub_view(&self, outlet: &str) -> Option<ViewHandle> {
        self.registry.find_by_outlet(outlet).cloned()
    }

    /// Call `f` for every sub-view with its outlet, in registration order.
    pub fn each_sub_view(&self, mut f: impl FnMut(&str, &ViewHandle)) {
        for (outlet, view) in self.registry.iter() {
            f(outlet, view);
        }
    }

    /// Number of registered sub-views.
    pub fn sub_view_count(&self) -> usize {
        self.registry.len()
    }

    /// Build, render and insert the sub-view declared by `slot`.
    ///
    /// While rendering, the sub-view goes into the render buffer and is shown after the buffer
    /// is attached. Otherwise it replaces its placeholder in the live element and is shown
    /// immediately if this view is shown. A view already filling the outlet is removed first.
    pub fn add_sub_view(
        &mut self,
        tree: &mut Tree,
        slot: &SubViewSlot,
    ) -> Result<ViewHandle, ViewError> {
        let outlet = slot.outlet_name.as_str();
        let options = slot.options.resolve(outlet);
        let Some(factory) = &slot.view_type else {
            return Err(ViewError::MissingViewType {
                outlet: outlet.into(),
            });
        };
        if let Some(previous) = self.sub_view(outlet) {
            self.remove_sub_view(tree, &previous);
        }

        let view = factory.build(options);
        view.borrow_mut().core_mut().set_parent(self.core.this());
        self.forward_events(&view, outlet);

        self.core
            .trigger_related(tree, "before:view:added", view.id());
        self.registry.add(outlet, view.clone());

        view.borrow_mut().render(tree)?;
        let element = view.borrow_mut().core_mut().ensure_element(tree);
        if self.buffer.is_buffering() {
            self.buffer
                .insert_buffered(tree, outlet, element, view.clone());
        } else {
            let root = self.core.ensure_element(tree);
            self.buffer.insert_live(tree, root, outlet, element);
            if self.core.is_shown() {
                view.borrow_mut().show(tree);
            }
        }

        self.core
            .trigger_related(tree, "after:view:added", view.id());
        Ok(view)
    }

    fn forward_events(&self, view: &ViewHandle, outlet: &str) {
        let parent = self.core.emitter().clone();
        let parent_id = self.core.id();
        let child_id = view.id();
        let prefix = self.event_prefix.clone();
        let outlet = String::from(outlet);
        let hooks = self.hooks.clone();
        view.borrow().core().emitter().listen_from(
            parent_id,
            None,
            move |tree, event| {
                let mut forwarded = Event::new(
                    format!("{prefix}:{}:{outlet}", event.name),
                    parent_id,
                )
                .with_related(child_id);
                forwarded.detail = event.detail.clone();
                let hook = hooks.borrow().get(&event.name).cloned();
                if let Some(hook) = hook {
                    hook(tree, &forwarded);
                }
                parent.trigger(tree, &forwarded);
            },
        );
    }

    /// Stop forwarding, destroy and unregister a sub-view, then raise `view:removed`.
    ///
    /// If the sub-view was mounted in this view's element, its outlet placeholder is restored
    /// so the outlet can be filled again.
    pub fn remove_sub_view(&mut self, tree: &mut Tree, view: &ViewHandle) {
        let restore = !self.buffer.is_buffering();
        self.detach_sub_view(tree, view, restore);
    }

    fn detach_sub_view(&mut self, tree: &mut Tree, view: &ViewHandle, restore: bool) {
        view.borrow().core().emitter().stop_listening(self.core.id());
        if let Some((outlet, _)) = self.registry.remove(view.id())
            && restore
        {
            self.restore_placeholder(tree, view, &outlet);
        }
        {
            let mut child = view.borrow_mut();
            child.destroy(tree);
            child.core_mut().set_parent(None);
        }
        self.core.trigger_related(tree, "view:removed", view.id());
    }

    fn restore_placeholder(&self, tree: &mut Tree, view: &ViewHandle, outlet: &str) {
        let (Some(root), Some(element)) = (self.core.element(), view.element()) else {
            return;
        };
        if element == root || !tree.is_ancestor_or_self(root, element) {
            return;
        }
        let placeholder = tree.create(Element::div().with_attr(OUTLET_ATTR, outlet));
        if !tree.replace_child(element, placeholder) {
            tree.free(placeholder);
        }
    }

    /// Remove and destroy every sub-view. Outlet placeholders are not restored.
    pub fn destroy_sub_views(&mut self, tree: &mut Tree) {
        for view in self.registry.views() {
            self.detach_sub_view(tree, &view, false);
        }
    }

    fn add_declared_sub_views(&mut self, tree: &mut Tree) -> Result<(), ViewError> {
        let slots = self.slots.clone();
        for slot in &slots {
            self.add_sub_view(tree, slot)?;
        }
        Ok(())
    }
}

impl View for CompositeView {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ViewCore {
        &mut self.core
    }

    fn render(&mut self, tree: &mut Tree) -> Result<(), ViewError> {
        self.core.revive();
        self.core.trigger(tree, "before:render");
        let root = self.core.ensure_element(tree);
        self.buffer.begin(tree);

        self.destroy_sub_views(tree);

        if let (Some(template), Some(fragment)) = (self.template.clone(), self.buffer.fragment()) {
            template(tree, fragment, self.core.options());
        }
        if let Err(err) = self.add_declared_sub_views(tree) {
            self.buffer.discard(tree);
            return Err(err);
        }

        let deferred = self.buffer.finish(tree, root);
        if self.core.is_shown() {
            for view in deferred {
                view.borrow_mut().show(tree);
            }
        }

        self.ui.bind(tree, root);
        self.core.mark_rendered();
        self.core.trigger(tree, "render");
        Ok(())
    }

    fn on_show(&mut self, tree: &mut Tree) {
        for view in self.registry.views() {
            view.borrow_mut().show(tree);
        }
    }

    fn on_destroy(&mut self, tree: &mut Tree) {
        self.buffer.discard(tree);
        self.destroy_sub_views(tree);
        self.core.trigger(tree, "destroy:collection");
    }
}
