// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack navigation controller.
//!
//! ## Layout
//!
//! ```text
//! NavController
//! ├── main-container        (inside `panel` when popup)
//! │   ├── left-view         staging area for backward transitions
//! │   ├── middle-view       the current view and the navigation bar
//! │   └── right-view        staging area for forward transitions
//! └── modal-container
//! ```
//!
//! ## Transitions
//!
//! A push stages the inbound view on one side, leaves a clone of the navigation bar with the
//! outbound view, and moves the live bar to the inbound side. The slide class is applied on a
//! later frame. Completion runs either from the host's transition-end notification
//! ([`NavController::handle_transition_end`]) or, on platforms without one, from a frame
//! callback. Completion hides everything but the current view, destroys popped views, and
//! moves the inbound content back into `middle-view`.
//!
//! At most one transition runs at a time. Pushes, pops and root changes that arrive while one
//! is active are dropped.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use trellis_controls::navbar::{NAV_BAR_OUTLET, NavBar, NavBarButton};
use trellis_pointer::context::PointerContext;
use trellis_pointer::input::InputModel;
use trellis_tree::{Element, NodeId, Tree};
use trellis_view::{
    FrameScheduler, NavPreferences, Platform, UiBindings, View, ViewCore, ViewError, ViewHandle,
    ViewOptions, WeakViewHandle,
};

use crate::options::{NavOptions, SlideDirection};

/// Class of the controller element.
pub const NAV_CONTROLLER_CLASS: &str = "NavController";

/// Class of the placeholder shown while an inbound view is still loading.
pub const LOADING_CLASS: &str = "navControllerLoading";

/// Set on a container while the navigation bar is visible in it.
pub const WITH_NAVBAR_CLASS: &str = "with-navbar";

/// Set on a view element while the navigation bar is visible above it.
pub const NAVBAR_SHOWN_CLASS: &str = "navBarIsShown";

#[derive(Debug)]
struct PendingRoot {
    view: ViewHandle,
    reverse: bool,
    loading: Option<String>,
}

#[derive(Debug, Default)]
struct ModalSlot {
    view: Option<ViewHandle>,
    // Modal container of the latest render.
    container: Option<NodeId>,
}

/// Presents a stack of views one at a time, sliding between them under a shared
/// navigation bar.
///
/// Create it with [`NavController::new`], which returns the handle the controller's frame
/// callbacks and navigation bar listeners hold weakly. All operations take the tree the
/// controller renders into.
pub struct NavController {
    core: ViewCore,
    options: NavOptions,
    platform: Platform,
    frames: FrameScheduler,
    pointer: PointerContext,
    ui: UiBindings,
    nav_bar: ViewHandle<NavBar>,
    nav_bar_clone: Option<NodeId>,
    loading: Option<NodeId>,
    view_stack: Vec<ViewHandle>,
    pop_stack: Vec<ViewHandle>,
    current: Option<ViewHandle>,
    has_root: bool,
    transition_active: bool,
    new_root: bool,
    newly_rendered: bool,
    listening_for_transition_end: bool,
    pending_root: Option<PendingRoot>,
    modal: Rc<RefCell<ModalSlot>>,
    // Bumped on destroy; frame callbacks from an earlier epoch do nothing.
    epoch: u64,
    this: Option<WeakViewHandle<Self>>,
}

impl core::fmt::Debug for NavController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavController")
            .field("core", &self.core)
            .field("platform", &self.platform)
            .field("view_stack", &self.view_stack)
            .field("current", &self.current.as_ref().map(ViewHandle::id))
            .field("has_root", &self.has_root)
            .field("transition_active", &self.transition_active)
            .finish_non_exhaustive()
    }
}

fn container_bindings(popup: bool) -> UiBindings {
    let main = if popup {
        "> .panel > .main-container"
    } else {
        "> .main-container"
    };
    UiBindings::new()
        .with("mainContainer", main)
        .with("leftView", &format!("{main} > .left-view"))
        .with("middleView", &format!("{main} > .middle-view"))
        .with("rightView", &format!("{main} > .right-view"))
        .with("modalContainer", "> .modal-container")
}

fn new_nav_bar(pointer: &PointerContext, platform: Platform, options: &NavOptions) -> ViewHandle<NavBar> {
    let nav = NavPreferences {
        title: options.title.clone(),
        hides_back_button: options.hides_back_button,
        shows_close_button: options.shows_close_button,
        ..NavPreferences::default()
    };
    ViewHandle::new(NavBar::new(
        pointer,
        InputModel::detect(platform.touch_input),
        ViewOptions::new().with_outlet(NAV_BAR_OUTLET).with_nav(nav),
    ))
}

fn preferences(view: &ViewHandle) -> NavPreferences {
    view.borrow().core().nav_preferences().clone()
}

fn set_class(tree: &mut Tree, el: NodeId, class: &str, on: bool) {
    if on {
        tree.add_class(el, class);
    } else {
        tree.remove_class(el, class);
    }
}

impl NavController {
    /// Create a controller. Nothing is rendered until [`View::render`].
    ///
    /// `frames` drives deferred work; `pointer` is shared with the navigation bar buttons.
    pub fn new(
        options: NavOptions,
        platform: Platform,
        frames: FrameScheduler,
        pointer: &PointerContext,
    ) -> ViewHandle<Self> {
        let nav_bar = new_nav_bar(pointer, platform, &options);
        let handle = ViewHandle::new(Self {
            core: ViewCore::new(NAV_CONTROLLER_CLASS, ViewOptions::new()),
            ui: container_bindings(options.popup),
            options,
            platform,
            frames,
            pointer: pointer.clone(),
            nav_bar,
            nav_bar_clone: None,
            loading: None,
            view_stack: Vec::new(),
            pop_stack: Vec::new(),
            current: None,
            has_root: false,
            transition_active: false,
            new_root: false,
            newly_rendered: false,
            listening_for_transition_end: false,
            pending_root: None,
            modal: Rc::new(RefCell::new(ModalSlot::default())),
            epoch: 0,
            this: None,
        });
        {
            let mut controller = handle.borrow_mut();
            controller.this = Some(handle.downgrade());
            controller.wire_nav_bar();
        }
        handle
    }

    fn wire_nav_bar(&self) {
        let Some(this) = self.this.clone() else {
            return;
        };
        let emitter = self.nav_bar.borrow().core().emitter().clone();
        for button in [NavBarButton::Back, NavBarButton::Close] {
            let name = format!("{}:{NAV_BAR_OUTLET}", button.event_prefix());
            let this = this.clone();
            emitter.listen_from(self.core.id(), Some(&name), move |tree, _| {
                let Some(handle) = this.upgrade() else {
                    return;
                };
                let Some(mut controller) = handle.try_borrow_mut() else {
                    tracing::warn!(?button, "navigation bar tap while the controller is busy");
                    return;
                };
                match button {
                    NavBarButton::Back => controller.handle_nav_bar_back(tree),
                    NavBarButton::Close => controller.handle_nav_bar_close(tree),
                }
            });
        }
    }

    /// Run `f` on the next frame, unless the controller was destroyed in between.
    fn defer(&self, f: impl FnOnce(&mut Self, &mut Tree) + 'static) {
        let Some(this) = self.this.clone() else {
            tracing::debug!("controller has no handle; deferred work dropped");
            return;
        };
        let epoch = self.epoch;
        self.frames.request(move |tree| {
            let Some(handle) = this.upgrade() else {
                return;
            };
            let Some(mut controller) = handle.try_borrow_mut() else {
                tracing::error!("navigation controller busy during a frame callback");
                return;
            };
            if controller.core.is_destroyed() || controller.epoch != epoch {
                return;
            }
            f(&mut *controller, tree);
        });
    }

    /// Controller-wide defaults.
    pub fn options(&self) -> &NavOptions {
        &self.options
    }

    /// Host capabilities chosen at construction.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The scheduler deferred work runs on.
    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    /// The shared navigation bar.
    pub fn nav_bar(&self) -> &ViewHandle<NavBar> {
        &self.nav_bar
    }

    /// The static copy of the bar left with outbound views, once a transition completed.
    pub fn nav_bar_clone(&self) -> Option<NodeId> {
        self.nav_bar_clone
    }

    /// The loading placeholder, while one is shown.
    pub fn loading_element(&self) -> Option<NodeId> {
        self.loading
    }

    /// Returns true once rendered and until destroyed.
    pub fn is_rendered(&self) -> bool {
        self.core.is_rendered()
    }

    /// Views in navigation order; the last one is current once transitions settle.
    pub fn view_stack(&self) -> &[ViewHandle] {
        &self.view_stack
    }

    /// Views waiting to be destroyed when the running transition completes.
    pub fn pop_stack(&self) -> &[ViewHandle] {
        &self.pop_stack
    }

    /// The current view.
    pub fn current_view(&self) -> Option<&ViewHandle> {
        self.current.as_ref()
    }

    /// Returns true once a root view is mounted.
    pub fn has_root_view(&self) -> bool {
        self.has_root
    }

    /// Returns true from the start of a push until its completion.
    pub fn is_transition_active(&self) -> bool {
        self.transition_active
    }

    /// The presented modal view.
    pub fn modal_view(&self) -> Option<ViewHandle> {
        self.modal.borrow().view.clone()
    }

    /// The sliding container.
    pub fn main_container(&self) -> Option<NodeId> {
        self.ui.get("mainContainer")
    }

    /// Staging area for backward transitions.
    pub fn left_container(&self) -> Option<NodeId> {
        self.ui.get("leftView")
    }

    /// Holds the current view.
    pub fn middle_container(&self) -> Option<NodeId> {
        self.ui.get("middleView")
    }

    /// Staging area for forward transitions.
    pub fn right_container(&self) -> Option<NodeId> {
        self.ui.get("rightView")
    }

    /// Holds the modal view.
    pub fn modal_container(&self) -> Option<NodeId> {
        self.ui.get("modalContainer")
    }

    /// Replace the stack with `view`, now if rendered, otherwise on the next render.
    pub fn set_root_view(
        &mut self,
        tree: &mut Tree,
        view: ViewHandle,
        reverse: bool,
        loading: Option<&str>,
    ) -> Result<(), ViewError> {
        if self.is_rendered() {
            return self.change_root(tree, view, reverse, loading);
        }
        self.pending_root = Some(PendingRoot {
            view,
            reverse,
            loading: loading.map(Into::into),
        });
        Ok(())
    }

    /// Replace the stack with `view`.
    ///
    /// The first root is mounted without a transition. Later roots slide in, and every other
    /// view is destroyed when the transition completes. Any modal view is dismissed first.
    pub fn change_root(
        &mut self,
        tree: &mut Tree,
        view: ViewHandle,
        reverse: bool,
        loading: Option<&str>,
    ) -> Result<(), ViewError> {
        if self.core.is_destroyed() {
            return Ok(());
        }
        if !self.has_root {
            return self.render_initial_view(tree, view);
        }
        if self.transition_active {
            tracing::debug!(view = view.id().get(), "root change dropped: transition in progress");
            return Ok(());
        }
        self.dismiss_modal_view(tree);
        self.new_root = true;
        self.push_view(tree, view, reverse, loading)
    }

    /// Slide `view` in, from the right unless `reverse`.
    ///
    /// With `loading`, a placeholder holding that text slides in first and the view replaces
    /// it two frames later.
    pub fn push_view(
        &mut self,
        tree: &mut Tree,
        view: ViewHandle,
        reverse: bool,
        loading: Option<&str>,
    ) -> Result<(), ViewError> {
        if self.core.is_destroyed() {
            return Ok(());
        }
        if self.transition_active {
            tracing::debug!(view = view.id().get(), "push dropped: transition in progress");
            return Ok(());
        }
        let Some(current) = self.current.clone().filter(|_| self.has_root) else {
            return self.render_initial_view(tree, view);
        };
        let (Some(left), Some(middle), Some(right)) = (
            self.left_container(),
            self.middle_container(),
            self.right_container(),
        ) else {
            tracing::warn!("push on a controller that is not rendered");
            return Ok(());
        };

        self.transition_active = true;
        let direction = SlideDirection::from_reverse(reverse);
        let inbound = match direction {
            SlideDirection::Left => right,
            SlideDirection::Right => left,
        };
        let outbound = middle;

        let outbound_prefs = preferences(&current);
        let inbound_prefs = preferences(&view);
        if !self.options.disables_nav_bar_transition(&outbound_prefs) {
            self.leave_nav_bar_copy(tree, outbound);
        }
        let hides_outbound = self.options.hides_nav_bar(&outbound_prefs);
        set_class(tree, outbound, WITH_NAVBAR_CLASS, !hides_outbound);
        self.init_nav_bar(tree, &view, &inbound_prefs, inbound);
        tree.set_displayed(outbound, true);
        tree.set_displayed(inbound, true);

        if let Some(markup) = loading {
            let placeholder = self.show_loading(tree, markup);
            tree.append_child(inbound, placeholder);
            self.start_slide(direction);
            let view = view.clone();
            self.defer(move |controller, _| {
                controller.defer(move |controller, tree| {
                    controller.finish_loading(tree, &view, inbound);
                });
            });
        } else {
            self.remove_loading(tree);
            if let Err(err) = self.mount_inbound(tree, &view, inbound) {
                self.transition_active = false;
                self.new_root = false;
                return Err(err);
            }
            if self.platform.transition_events {
                self.defer(move |controller, _| controller.start_slide(direction));
            } else {
                self.defer(|controller, tree| controller.complete_transition(tree));
            }
        }

        self.view_stack.retain(|v| !v.ptr_eq(&view));
        self.view_stack.push(view.clone());
        self.current = Some(view);
        Ok(())
    }

    /// Go back `distance` views (at least one).
    ///
    /// With fewer than two views this closes the controller. Distances past the root are
    /// ignored with a warning.
    pub fn pop_view(&mut self, tree: &mut Tree, distance: usize) -> Result<(), ViewError> {
        if self.core.is_destroyed() {
            return Ok(());
        }
        let distance = distance.max(1);
        let len = self.view_stack.len();
        if len < 2 || self.current.is_none() {
            self.pop_to_close(tree);
            return Ok(());
        }
        if self.transition_active {
            tracing::debug!(distance, "pop dropped: transition in progress");
            return Ok(());
        }
        if distance >= len {
            tracing::warn!(distance, len, "pop distance reaches past the root view");
            return Ok(());
        }
        let next = self.view_stack[len - 1 - distance].clone();
        self.pop_stack
            .extend(self.view_stack[len - distance..].iter().cloned());
        self.push_view(tree, next, true, None)
    }

    /// Close the controller by destroying it.
    pub fn pop_to_close(&mut self, tree: &mut Tree) {
        if self.core.is_destroyed() {
            return;
        }
        self.destroy(tree);
    }

    /// Show `view` above the stack, replacing any presented modal view.
    ///
    /// The modal container hides again when the view is dismissed or destroys itself.
    pub fn present_modal_view(&mut self, tree: &mut Tree, view: ViewHandle) -> Result<(), ViewError> {
        if self.core.is_destroyed() {
            return Ok(());
        }
        let Some(container) = self.modal_container() else {
            tracing::warn!("modal presented on a controller that is not rendered");
            return Ok(());
        };
        self.dismiss_modal_view(tree);
        self.mount(tree, &view, container)?;
        tree.set_displayed(container, true);
        view.borrow_mut().show(tree);

        let slot = self.modal.clone();
        let id = view.id();
        view.borrow()
            .core()
            .emitter()
            .listen_from(self.core.id(), Some("destroy"), move |tree, _| {
                let mut slot = slot.borrow_mut();
                if slot.view.as_ref().is_some_and(|v| v.id() == id) {
                    slot.view = None;
                    if let Some(container) = slot.container {
                        tree.set_displayed(container, false);
                    }
                }
            });
        let mut slot = self.modal.borrow_mut();
        slot.view = Some(view);
        slot.container = Some(container);
        Ok(())
    }

    /// Destroy the modal view, if any, and hide its container.
    pub fn dismiss_modal_view(&mut self, tree: &mut Tree) {
        let view = self.modal.borrow_mut().view.take();
        if let Some(view) = view {
            view.borrow().core().emitter().stop_listening(self.core.id());
            let mut modal = view.borrow_mut();
            modal.core_mut().set_nav_controller(None);
            modal.destroy(tree);
        }
        if let Some(container) = self.modal_container() {
            tree.free_children(container);
            tree.set_displayed(container, false);
        }
    }

    /// Set the navigation bar title.
    pub fn set_nav_title(&mut self, tree: &mut Tree, title: &str) {
        self.nav_bar.borrow_mut().set_title(tree, title);
    }

    /// Set the navigation bar style; `None` restores the default look.
    pub fn set_nav_style(&mut self, tree: &mut Tree, style: Option<&str>) {
        self.nav_bar.borrow_mut().set_style(tree, style);
    }

    /// A back tap: the current view may handle it, otherwise pop one view.
    pub fn handle_nav_bar_back(&mut self, tree: &mut Tree) {
        let handled = match &self.current {
            Some(view) => view
                .try_borrow_mut()
                .is_some_and(|mut view| view.on_nav_bar_back(tree)),
            None => false,
        };
        if handled {
            return;
        }
        if let Err(err) = self.pop_view(tree, 1) {
            tracing::error!(%err, "back navigation failed");
        }
    }

    /// A close tap: the current view may handle it, otherwise close the controller.
    pub fn handle_nav_bar_close(&mut self, tree: &mut Tree) {
        let handled = match &self.current {
            Some(view) => view
                .try_borrow_mut()
                .is_some_and(|mut view| view.on_nav_bar_close(tree)),
            None => false,
        };
        if !handled {
            self.pop_to_close(tree);
        }
    }

    /// Feed a host transition-end notification for `target`.
    ///
    /// Only the main container's notification completes a transition, and only while one
    /// was started with transition events.
    pub fn handle_transition_end(&mut self, tree: &mut Tree, target: NodeId) {
        if !self.listening_for_transition_end || self.main_container() != Some(target) {
            return;
        }
        self.complete_transition(tree);
    }

    fn render_initial_view(&mut self, tree: &mut Tree, view: ViewHandle) -> Result<(), ViewError> {
        let Some(middle) = self.middle_container() else {
            tracing::warn!("root view set on a controller that is not rendered");
            return Ok(());
        };
        self.purge_view_stack(tree, None);
        self.mount(tree, &view, middle)?;
        let prefs = preferences(&view);
        self.init_nav_bar(tree, &view, &prefs, middle);
        self.nav_bar.borrow_mut().reset_state_changed();
        self.has_root = true;
        self.current = Some(view.clone());
        self.view_stack.push(view.clone());
        self.defer(move |_, tree| {
            if !view.is_destroyed() {
                view.borrow_mut().show(tree);
            }
        });
        Ok(())
    }

    /// Point `view` at this controller and put its element first in `parent`, rendering it
    /// if it is not in the tree. Returns whether it was rendered.
    fn mount(&self, tree: &mut Tree, view: &ViewHandle, parent: NodeId) -> Result<bool, ViewError> {
        view.borrow_mut()
            .core_mut()
            .set_nav_controller(self.core.this());
        let attached = view.element().is_some_and(|el| tree.is_attached(el));
        if !attached {
            view.borrow_mut().render(tree)?;
        }
        let el = view.borrow_mut().core_mut().ensure_element(tree);
        tree.prepend_child(parent, el);
        tree.set_displayed(el, true);
        Ok(!attached)
    }

    fn mount_inbound(&mut self, tree: &mut Tree, view: &ViewHandle, parent: NodeId) -> Result<(), ViewError> {
        if self.mount(tree, view, parent)? {
            self.newly_rendered = true;
        }
        Ok(())
    }

    fn show_loading(&mut self, tree: &mut Tree, markup: &str) -> NodeId {
        if let Some(el) = self.loading
            && tree.is_alive(el)
        {
            tree.set_text(el, Some(markup));
            return el;
        }
        let el = tree.create(Element::div().with_class(LOADING_CLASS).with_text(markup));
        self.loading = Some(el);
        el
    }

    fn remove_loading(&mut self, tree: &mut Tree) {
        if let Some(el) = self.loading.take() {
            tree.free(el);
        }
    }

    fn finish_loading(&mut self, tree: &mut Tree, view: &ViewHandle, inbound: NodeId) {
        self.remove_loading(tree);
        if !self.transition_active {
            // The slide already completed around the placeholder.
            let Some(middle) = self.middle_container() else {
                return;
            };
            match self.mount(tree, view, middle) {
                Ok(_) => view.borrow_mut().show(tree),
                Err(err) => tracing::error!(%err, view = view.id().get(), "inbound view failed to render"),
            }
            return;
        }
        if let Err(err) = self.mount_inbound(tree, view, inbound) {
            tracing::error!(%err, view = view.id().get(), "inbound view failed to render");
        }
        if !self.platform.transition_events {
            self.defer(|controller, tree| controller.complete_transition(tree));
        }
    }

    fn start_slide(&mut self, direction: SlideDirection) {
        if self.platform.transition_events {
            self.listening_for_transition_end = true;
        }
        self.defer(move |controller, tree| {
            if let Some(main) = controller.main_container() {
                tree.update_classes(main, &SlideDirection::CLASSES, &[direction.class()]);
            }
        });
    }

    /// Leave a static copy of the bar in the outbound container.
    fn leave_nav_bar_copy(&mut self, tree: &mut Tree, outbound: NodeId) {
        let stale = self.nav_bar.borrow().state_changed();
        if stale || self.nav_bar_clone.is_none_or(|el| !tree.is_alive(el)) {
            self.refresh_nav_bar_clone(tree);
        }
        if let Some(copy) = self.nav_bar_clone {
            tree.append_child(outbound, copy);
        }
    }

    fn refresh_nav_bar_clone(&mut self, tree: &mut Tree) {
        if let Some(old) = self.nav_bar_clone.take() {
            tree.free(old);
        }
        let mut bar = self.nav_bar.borrow_mut();
        self.nav_bar_clone = bar.core().element().and_then(|el| tree.clone_subtree(el));
        bar.reset_state_changed();
    }

    /// Move the live bar next to `view` in `inbound` and configure it for the view.
    fn init_nav_bar(&mut self, tree: &mut Tree, view: &ViewHandle, prefs: &NavPreferences, inbound: NodeId) {
        let bar_el = self.nav_bar.borrow_mut().core_mut().ensure_element(tree);
        if self.options.disables_nav_bar_transition(prefs) {
            if let Some(main) = self.main_container() {
                tree.insert_after(bar_el, main);
            }
        } else {
            tree.append_child(inbound, bar_el);
        }
        {
            let mut bar = self.nav_bar.borrow_mut();
            bar.set_title(tree, &self.options.title_for(prefs));
            bar.set_hides_back_button(tree, self.options.hides_back_button(prefs));
            bar.set_shows_close_button(tree, self.options.shows_close_button(prefs));
        }
        let hides = self.options.hides_nav_bar(prefs);
        tree.set_displayed(bar_el, !hides);
        set_class(tree, inbound, WITH_NAVBAR_CLASS, !hides);
        let view_el = view.borrow_mut().core_mut().ensure_element(tree);
        set_class(tree, view_el, NAVBAR_SHOWN_CLASS, !hides);
    }

    fn complete_transition(&mut self, tree: &mut Tree) {
        if !self.transition_active {
            return;
        }
        if self.new_root {
            let keep = self.current.clone();
            self.purge_view_stack(tree, keep);
            self.new_root = false;
        }
        self.hide_inactive_views(tree);
        self.purge_pop_stack(tree);
        self.refresh_nav_bar_clone(tree);

        if let (Some(left), Some(middle), Some(right)) = (
            self.left_container(),
            self.middle_container(),
            self.right_container(),
        ) {
            tree.set_displayed(left, false);
            tree.set_displayed(right, false);
            for staging in [left, right] {
                for child in tree.detach_children(staging) {
                    tree.append_child(middle, child);
                }
            }
            let prefs = self.current.as_ref().map(preferences).unwrap_or_default();
            set_class(tree, middle, WITH_NAVBAR_CLASS, !self.options.hides_nav_bar(&prefs));
        }
        if let Some(main) = self.main_container() {
            tree.update_classes(main, &SlideDirection::CLASSES, &[]);
        }

        if self.newly_rendered
            && let Some(current) = self.current.clone()
        {
            current.borrow_mut().show(tree);
        }
        self.newly_rendered = false;
        self.listening_for_transition_end = false;
        self.transition_active = false;
        self.core.trigger(tree, "transition:end");
    }

    fn hide_inactive_views(&self, tree: &mut Tree) {
        for view in &self.view_stack {
            if self.current.as_ref().is_some_and(|c| c.ptr_eq(view)) {
                continue;
            }
            if let Some(el) = view.element() {
                tree.set_displayed(el, false);
            }
        }
    }

    fn purge_pop_stack(&mut self, tree: &mut Tree) {
        for view in core::mem::take(&mut self.pop_stack).into_iter().rev() {
            self.view_stack.retain(|v| !v.ptr_eq(&view));
            view.borrow_mut().destroy(tree);
        }
    }

    /// Destroy every stacked view except `keep`, which becomes the sole root.
    fn purge_view_stack(&mut self, tree: &mut Tree, keep: Option<ViewHandle>) {
        for view in core::mem::take(&mut self.view_stack).into_iter().rev() {
            if keep.as_ref().is_some_and(|k| k.ptr_eq(&view)) {
                continue;
            }
            view.borrow_mut().destroy(tree);
        }
        let keep_el = keep.as_ref().and_then(ViewHandle::element);
        let bar_el = self.nav_bar.element();
        for container in [self.left_container(), self.right_container()]
            .into_iter()
            .flatten()
        {
            for child in tree.detach_children(container) {
                if Some(child) != keep_el && Some(child) != bar_el && Some(child) != self.loading {
                    tree.free(child);
                }
            }
        }
        self.has_root = false;
        self.current = None;

        if let Some(keep) = keep {
            if let (Some(left), Some(el)) = (self.left_container(), keep_el) {
                tree.append_child(left, el);
                let prefs = preferences(&keep);
                self.init_nav_bar(tree, &keep, &prefs, left);
            }
            self.view_stack.push(keep.clone());
            self.current = Some(keep);
            self.has_root = true;
        }
    }

    fn build_skeleton(&self, tree: &mut Tree, el: NodeId) {
        let fragment = tree.create_fragment();
        let host = if self.options.popup {
            tree.append(fragment, Element::div().with_class("panel"))
        } else {
            fragment
        };
        let main = tree.append(host, Element::div().with_class("main-container"));
        for class in ["left-view", "middle-view", "right-view"] {
            tree.append(main, Element::div().with_class(class));
        }
        tree.append(fragment, Element::div().with_class("modal-container"));
        for old in tree.replace_children(el, fragment) {
            tree.free(old);
        }
        tree.free(fragment);
    }
}

impl View for NavController {
    fn core(&self) -> &ViewCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ViewCore {
        &mut self.core
    }

    fn render(&mut self, tree: &mut Tree) -> Result<(), ViewError> {
        // Re-rendering settles a running transition and keeps the stack.
        if self.transition_active {
            self.complete_transition(tree);
        }
        self.core.revive();
        self.core.trigger(tree, "before:render");
        let el = self.core.ensure_element(tree);

        if let Some(bar_el) = self.nav_bar.element() {
            tree.detach(bar_el);
        }
        for view in &self.view_stack {
            if let Some(view_el) = view.element() {
                tree.detach(view_el);
            }
        }
        let modal = self.modal.borrow().view.clone();
        if let Some(modal_el) = modal.as_ref().and_then(|m| m.element()) {
            tree.detach(modal_el);
        }
        if let Some(copy) = self.nav_bar_clone.take() {
            tree.free(copy);
        }
        self.build_skeleton(tree, el);
        self.ui.bind(tree, el);
        for hidden in [self.left_container(), self.right_container(), self.modal_container()]
            .into_iter()
            .flatten()
        {
            tree.set_displayed(hidden, false);
        }
        let container = self.modal_container();
        self.modal.borrow_mut().container = container;
        if let (Some(modal_el), Some(container)) =
            (modal.as_ref().and_then(|m| m.element()), container)
        {
            tree.prepend_child(container, modal_el);
            tree.set_displayed(container, true);
        }

        if self.nav_bar.is_destroyed() {
            self.nav_bar = new_nav_bar(&self.pointer, self.platform, &self.options);
            self.wire_nav_bar();
        }
        self.nav_bar.borrow_mut().render(tree)?;

        if let (Some(current), Some(middle)) = (self.current.clone(), self.middle_container()) {
            if let Some(view_el) = current.element() {
                tree.prepend_child(middle, view_el);
            }
            let prefs = preferences(&current);
            self.init_nav_bar(tree, &current, &prefs, middle);
        }

        self.core.mark_rendered();
        self.core.trigger(tree, "render");

        if let Some(pending) = self.pending_root.take() {
            self.change_root(tree, pending.view, pending.reverse, pending.loading.as_deref())?;
        }
        Ok(())
    }

    fn on_destroy(&mut self, tree: &mut Tree) {
        self.remove_loading(tree);
        if let Some(copy) = self.nav_bar_clone.take() {
            tree.free(copy);
        }
        self.nav_bar.borrow_mut().destroy(tree);
        self.dismiss_modal_view(tree);
        self.purge_pop_stack(tree);
        self.purge_view_stack(tree, None);
        self.pending_root = None;
        self.transition_active = false;
        self.new_root = false;
        self.newly_rendered = false;
        self.listening_for_transition_end = false;
        self.epoch += 1;
    }
}
