// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view contract: lifecycle, element ownership, options, and shared handles.
//!
//! ## Lifecycle
//!
//! - `render` builds (or rebuilds) the view's element content and raises `before:render` and
//!   `render`.
//! - `show` is raised once the element is in place; [`View::on_show`] runs before the event.
//! - `destroy` is guarded: it raises `before:destroy`, runs [`View::on_destroy`], marks the
//!   view destroyed, raises `destroy`, and frees the element subtree. A destroyed view may be
//!   rendered again.
//!
//! ## Handles
//!
//! Views live behind [`ViewHandle`]s (`Rc<RefCell<_>>`) so parents, regions and controllers can
//! share them. A handle knows its [`ViewId`] without borrowing, which keeps identity checks
//! safe while the view is busy.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::{Ref, RefCell, RefMut};

use alloc::collections::BTreeMap;
use portable_atomic::{AtomicU64, Ordering};
use trellis_tree::{Element, NodeId, Tree};

use crate::bindings::UiBindings;
use crate::error::ViewError;
use crate::events::{Emitter, Event};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a view.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, for diagnostics.
    pub fn get(self) -> u64 {
        self.0
    }
}

bitflags::bitflags! {
    /// Lifecycle state of a view.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LifecycleFlags: u8 {
        /// `render` completed at least once since the last destroy.
        const RENDERED  = 0b0000_0001;
        /// `show` was raised since the last destroy.
        const SHOWN     = 0b0000_0010;
        /// `destroy` ran and no render followed.
        const DESTROYED = 0b0000_0100;
    }
}

/// Per-view navigation bar preferences, read by a navigation controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavPreferences {
    /// Title shown while the view is current.
    pub title: Option<String>,
    /// Hide the navigation bar while the view is current.
    pub hides_nav_bar: bool,
    /// Hide the back button while the view is current.
    pub hides_back_button: bool,
    /// Show the close button while the view is current.
    pub shows_close_button: bool,
    /// Keep the navigation bar static while this view slides in or out.
    pub disable_nav_bar_transition: bool,
}

/// Options every view is constructed with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Outlet the view fills in its parent; also added as a class.
    pub outlet_name: Option<String>,
    /// Extra whitespace-separated classes.
    pub class: Option<String>,
    /// Replacement for a control's base class.
    pub control_class: Option<String>,
    /// Attributes set on the view's element.
    pub attributes: Vec<(String, String)>,
    /// Label text for controls that show one.
    pub label_text: Option<String>,
    /// Values templates may read.
    pub data: BTreeMap<String, String>,
    /// Navigation bar preferences.
    pub nav: NavPreferences,
}

impl ViewOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outlet name.
    pub fn with_outlet(mut self, outlet: &str) -> Self {
        self.outlet_name = Some(outlet.into());
        self
    }

    /// Set extra classes.
    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Add an element attribute.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.retain(|(k, _)| k != name);
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set the label text.
    pub fn with_label_text(mut self, text: &str) -> Self {
        self.label_text = Some(text.into());
        self
    }

    /// Add a template value.
    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Set the navigation title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.nav.title = Some(title.into());
        self
    }

    /// Replace the navigation preferences.
    pub fn with_nav(mut self, nav: NavPreferences) -> Self {
        self.nav = nav;
        self
    }

    /// A template value.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// State shared by every view: identity, element, events, options and back-references.
pub struct ViewCore {
    id: ViewId,
    tag: String,
    class_name: String,
    options: ViewOptions,
    element: Option<NodeId>,
    emitter: Emitter,
    flags: LifecycleFlags,
    parent: Option<WeakViewHandle>,
    nav_controller: Option<WeakViewHandle>,
    this: Option<WeakViewHandle>,
}

impl core::fmt::Debug for ViewCore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewCore")
            .field("id", &self.id)
            .field("class_name", &self.class_name)
            .field("element", &self.element)
            .field("flags", &self.flags)
            .field("parent", &self.parent.as_ref().map(WeakViewHandle::id))
            .finish_non_exhaustive()
    }
}

impl ViewCore {
    /// Create the core of a `div` view whose element carries `class_name`.
    pub fn new(class_name: &str, options: ViewOptions) -> Self {
        Self {
            id: ViewId::next(),
            tag: String::from("div"),
            class_name: class_name.into(),
            options,
            element: None,
            emitter: Emitter::new(),
            flags: LifecycleFlags::empty(),
            parent: None,
            nav_controller: None,
            this: None,
        }
    }

    /// Use another element tag.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.into();
        self
    }

    /// This view's id.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Construction options.
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Mutable construction options.
    pub fn options_mut(&mut self) -> &mut ViewOptions {
        &mut self.options
    }

    /// Outlet this view fills, if any.
    pub fn outlet_name(&self) -> Option<&str> {
        self.options.outlet_name.as_deref()
    }

    /// Navigation preferences.
    pub fn nav_preferences(&self) -> &NavPreferences {
        &self.options.nav
    }

    /// Base class name of the view type.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Replace the base class name. Takes effect when the element is next created.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.class_name = class_name.into();
    }

    /// Classes of the element: outlet name, base class, then option classes, without repeats.
    pub fn class_list(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let names = self
            .options
            .outlet_name
            .iter()
            .flat_map(|o| o.split_whitespace())
            .chain(self.class_name.split_whitespace())
            .chain(self.options.class.iter().flat_map(|c| c.split_whitespace()));
        for name in names {
            if !out.iter().any(|c| c == name) {
                out.push(name.into());
            }
        }
        out
    }

    /// The element, if it was created and is still alive in the tree it was created in.
    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    /// The element, created (detached) on first use.
    pub fn ensure_element(&mut self, tree: &mut Tree) -> NodeId {
        if let Some(el) = self.element
            && tree.is_alive(el)
        {
            return el;
        }
        let mut element = Element::new(&self.tag);
        element.classes = self.class_list();
        for (name, value) in &self.options.attributes {
            element = element.with_attr(name, value);
        }
        let el = tree.create(element);
        self.element = Some(el);
        el
    }

    /// The emitter other code listens on.
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Raise `name` from this view.
    pub fn trigger(&self, tree: &mut Tree, name: &str) {
        self.emitter.trigger(tree, &Event::new(name, self.id));
    }

    /// Raise `name` from this view about `related`.
    pub fn trigger_related(&self, tree: &mut Tree, name: &str, related: ViewId) {
        self.emitter
            .trigger(tree, &Event::new(name, self.id).with_related(related));
    }

    /// Raise a prepared event.
    pub fn trigger_event(&self, tree: &mut Tree, event: &Event) {
        self.emitter.trigger(tree, event);
    }

    /// Lifecycle flags.
    pub fn flags(&self) -> LifecycleFlags {
        self.flags
    }

    /// Returns true once rendered (until destroyed).
    pub fn is_rendered(&self) -> bool {
        self.flags.contains(LifecycleFlags::RENDERED)
    }

    /// Returns true once shown (until destroyed).
    pub fn is_shown(&self) -> bool {
        self.flags.contains(LifecycleFlags::SHOWN)
    }

    /// Returns true after destroy, until the next render.
    pub fn is_destroyed(&self) -> bool {
        self.flags.contains(LifecycleFlags::DESTROYED)
    }

    /// Clear the destroyed flag at the start of a render.
    pub fn revive(&mut self) {
        self.flags.remove(LifecycleFlags::DESTROYED);
    }

    /// Record a completed render.
    pub fn mark_rendered(&mut self) {
        self.flags.insert(LifecycleFlags::RENDERED);
    }

    /// Record that `show` was raised.
    pub fn mark_shown(&mut self) {
        self.flags.insert(LifecycleFlags::SHOWN);
    }

    /// The composite view this view is a sub-view of.
    pub fn parent(&self) -> Option<ViewHandle> {
        self.parent.as_ref().and_then(WeakViewHandle::upgrade)
    }

    /// Id of the parent view, even if it is busy.
    pub fn parent_id(&self) -> Option<ViewId> {
        self.parent.as_ref().map(WeakViewHandle::id)
    }

    /// Set the parent back-reference.
    pub fn set_parent(&mut self, parent: Option<WeakViewHandle>) {
        self.parent = parent;
    }

    /// The navigation controller presenting this view.
    pub fn nav_controller(&self) -> Option<ViewHandle> {
        self.nav_controller.as_ref().and_then(WeakViewHandle::upgrade)
    }

    /// Set the navigation controller back-reference.
    pub fn set_nav_controller(&mut self, controller: Option<WeakViewHandle>) {
        self.nav_controller = controller;
    }

    /// A weak handle to this view, once it lives behind a [`ViewHandle`].
    pub fn this(&self) -> Option<WeakViewHandle> {
        self.this.clone()
    }

    /// Mark destroyed, raise `destroy`, and free the element subtree.
    pub fn teardown(&mut self, tree: &mut Tree) {
        self.flags.remove(LifecycleFlags::RENDERED | LifecycleFlags::SHOWN);
        self.flags.insert(LifecycleFlags::DESTROYED);
        self.trigger(tree, "destroy");
        if let Some(el) = self.element.take() {
            tree.free(el);
        }
    }
}

/// The contract every view honors.
pub trait View: Any + core::fmt::Debug {
    /// Shared state.
    fn core(&self) -> &ViewCore;

    /// Mutable shared state.
    fn core_mut(&mut self) -> &mut ViewCore;

    /// Build the element content.
    fn render(&mut self, tree: &mut Tree) -> Result<(), ViewError>;

    /// Called by [`View::show`] before `show` is raised.
    fn on_show(&mut self, _tree: &mut Tree) {}

    /// Called by [`View::destroy`] between `before:destroy` and `destroy`.
    fn on_destroy(&mut self, _tree: &mut Tree) {}

    /// Delegate for a navigation bar back tap. Return true to handle it yourself.
    fn on_nav_bar_back(&mut self, _tree: &mut Tree) -> bool {
        false
    }

    /// Delegate for a navigation bar close tap. Return true to handle it yourself.
    fn on_nav_bar_close(&mut self, _tree: &mut Tree) -> bool {
        false
    }

    /// Notify the view that its element is in place.
    fn show(&mut self, tree: &mut Tree) {
        self.core_mut().mark_shown();
        self.on_show(tree);
        self.core().trigger(tree, "show");
    }

    /// Tear the view down. Repeated calls are no-ops.
    fn destroy(&mut self, tree: &mut Tree) {
        if self.core().is_destroyed() {
            return;
        }
        self.core().trigger(tree, "before:destroy");
        self.on_destroy(tree);
        self.core_mut().teardown(tree);
    }
}

impl dyn View {
    /// Downcast to a concrete view type.
    pub fn downcast_ref<T: View>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }

    /// Downcast to a concrete view type.
    pub fn downcast_mut<T: View>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut()
    }
}

/// Shared handle to a view.
pub struct ViewHandle<V: ?Sized = dyn View> {
    id: ViewId,
    cell: Rc<RefCell<V>>,
}

impl<V: ?Sized> Clone for ViewHandle<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            cell: self.cell.clone(),
        }
    }
}

impl<V: ?Sized> core::fmt::Debug for ViewHandle<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ViewHandle").field(&self.id).finish()
    }
}

impl<V: View> ViewHandle<V> {
    /// Move `view` behind a handle and bind its weak self-reference.
    pub fn new(view: V) -> Self {
        let id = view.core().id();
        let cell = Rc::new(RefCell::new(view));
        let erased: Rc<RefCell<dyn View>> = cell.clone();
        cell.borrow_mut().core_mut().this = Some(WeakViewHandle {
            id,
            cell: Rc::downgrade(&erased),
        });
        Self { id, cell }
    }

    /// Erase the concrete type.
    pub fn to_dyn(&self) -> ViewHandle {
        let cell: Rc<RefCell<dyn View>> = self.cell.clone();
        ViewHandle { id: self.id, cell }
    }
}

impl<V: ?Sized + View> ViewHandle<V> {
    /// The view's id. Does not borrow.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Borrow the view.
    ///
    /// Panics if the view is mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, V> {
        self.cell.borrow()
    }

    /// Mutably borrow the view.
    ///
    /// Panics if the view is borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, V> {
        self.cell.borrow_mut()
    }

    /// Mutably borrow the view unless it is busy.
    pub fn try_borrow_mut(&self) -> Option<RefMut<'_, V>> {
        self.cell.try_borrow_mut().ok()
    }

    /// A weak handle.
    pub fn downgrade(&self) -> WeakViewHandle<V> {
        WeakViewHandle {
            id: self.id,
            cell: Rc::downgrade(&self.cell),
        }
    }

    /// Returns true if both handles refer to the same view.
    pub fn ptr_eq<U: ?Sized + View>(&self, other: &ViewHandle<U>) -> bool {
        self.id == other.id
    }

    /// The view's element, if created.
    pub fn element(&self) -> Option<NodeId> {
        self.cell.borrow().core().element()
    }

    /// Returns true if the view was destroyed and not rendered since.
    pub fn is_destroyed(&self) -> bool {
        self.cell.borrow().core().is_destroyed()
    }

    /// Run `f` on the view, then raise the event it returns once the borrow is released.
    ///
    /// Listeners reacting to the event may therefore borrow this view again.
    pub fn dispatch(&self, tree: &mut Tree, f: impl FnOnce(&mut V, &mut Tree) -> Option<Event>) {
        let (emitter, event) = {
            let mut view = self.cell.borrow_mut();
            let event = f(&mut *view, tree);
            (view.core().emitter().clone(), event)
        };
        if let Some(event) = event {
            emitter.trigger(tree, &event);
        }
    }
}

/// Weak counterpart of [`ViewHandle`].
pub struct WeakViewHandle<V: ?Sized = dyn View> {
    id: ViewId,
    cell: Weak<RefCell<V>>,
}

impl<V: ?Sized> Clone for WeakViewHandle<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            cell: self.cell.clone(),
        }
    }
}

impl<V: ?Sized> core::fmt::Debug for WeakViewHandle<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("WeakViewHandle").field(&self.id).finish()
    }
}

impl<V: ?Sized> WeakViewHandle<V> {
    /// Id of the referenced view.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Upgrade to a strong handle if the view is still alive.
    pub fn upgrade(&self) -> Option<ViewHandle<V>> {
        Some(ViewHandle {
            id: self.id,
            cell: self.cell.upgrade()?,
        })
    }
}

/// Renders content into a parent element (a view's element or a render buffer).
pub type Template = Rc<dyn Fn(&mut Tree, NodeId, &ViewOptions)>;

/// Wrap a closure as a [`Template`].
pub fn template(f: impl Fn(&mut Tree, NodeId, &ViewOptions) + 'static) -> Template {
    Rc::new(f)
}

/// A plain template-backed view.
pub struct ItemView {
    core: ViewCore,
    template: Option<Template>,
    ui: UiBindings,
}

impl core::fmt::Debug for ItemView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemView")
            .field("core", &self.core)
            .field("has_template", &self.template.is_some())
            .field("ui", &self.ui)
            .finish()
    }
}

impl ItemView {
    /// Create an item view without a template.
    pub fn new(class_name: &str, options: ViewOptions) -> Self {
        Self {
            core: ViewCore::new(class_name, options),
            template: None,
            ui: UiBindings::new(),
        }
    }

    /// Set the template.
    pub fn with_template(mut self, f: impl Fn(&mut Tree, NodeId, &ViewOptions) + 'static) -> Self {
        self.template = Some(Rc::new(f));
        self
    }

    /// Declare a named UI element, resolved after every render.
    pub fn with_ui(mut self, name: &str, selector: &str) -> Self {
        self.ui.insert(name, selector);
        self
    }

    /// Resolved UI elements.
    pub fn ui(&self) -> &UiBindings {
        &self.ui
    }
}

impl View for ItemView {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ViewCore {
        &mut self.core
    }

    fn render(&mut self, tree: &mut Tree) -> Result<(), ViewError> {
        self.core.revive();
        self.core.trigger(tree, "before:render");
        let el = self.core.ensure_element(tree);
        let fragment = tree.create_fragment();
        if let Some(template) = &self.template {
            template(tree, fragment, &self.core.options);
        }
        for old in tree.replace_children(el, fragment) {
            tree.free(old);
        }
        tree.free(fragment);
        self.ui.bind(tree, el);
        self.core.mark_rendered();
        self.core.trigger(tree, "render");
        Ok(())
    }
}
