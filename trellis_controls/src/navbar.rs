// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation bar shown by a navigation controller.
//!
//! ## Structure
//!
//! ```text
//! .NavBar
//!   .header
//!     .backButton.genericButton.back.small > .icon, .label > span
//!     .label > span            (title)
//!     .status
//!     .closeButton.genericButton > .icon
//! ```
//!
//! ## Events
//!
//! A completed press on the back button raises `Back:<outlet>`; on the close button,
//! `Close:<outlet>`. The outlet defaults to [`NAV_BAR_OUTLET`].
//!
//! ## State changes
//!
//! Every setter that changes what the bar looks like raises [`NavBar::state_changed`]. A
//! navigation controller uses it to decide whether a snapshot of the bar is stale, and lowers
//! it with [`NavBar::reset_state_changed`] after taking a new one.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use trellis_pointer::context::PointerContext;
use trellis_pointer::input::{InputModel, PointerInput, PointerPhase};
use trellis_pointer::press::{PressOutcome, PressTracker};
use trellis_tree::{Element, NodeId, Point, Rect, Tree};
use trellis_view::{Event, UiBindings, View, ViewCore, ViewError, ViewOptions};

use crate::control::{PRESSED_CLASS, set_class, set_hidden};

/// Base class of navigation bars.
pub const NAV_BAR_CLASS: &str = "NavBar";

/// Outlet a navigation bar fills unless told otherwise.
pub const NAV_BAR_OUTLET: &str = "navBar";

/// Named styles and the class each adds.
pub const NAV_STYLES: &[(&str, &str)] = &[("white", "navBarWhite")];

/// The buttons of a navigation bar.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NavBarButton {
    /// The back button.
    Back,
    /// The close button.
    Close,
}

impl NavBarButton {
    /// Prefix of the event raised when the button is clicked.
    pub fn event_prefix(self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Close => "Close",
        }
    }

    fn ui_name(self) -> &'static str {
        match self {
            Self::Back => "backButton",
            Self::Close => "closeButton",
        }
    }
}

/// What a navigation bar shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavBarState {
    /// Title text.
    pub title: String,
    /// Hide the back button.
    pub hides_back_button: bool,
    /// Show the close button.
    pub shows_close_button: bool,
    /// Show the status area.
    pub shows_status: bool,
    /// Named style, see [`NAV_STYLES`].
    pub style: Option<String>,
    /// Back button label; `Back` when unset.
    pub back_button_label: Option<String>,
}

/// Navigation bar with a title, back and close buttons, and a status area.
#[derive(Debug)]
pub struct NavBar {
    core: ViewCore,
    ui: UiBindings,
    state: NavBarState,
    state_changed: bool,
    input: InputModel,
    back: PressTracker,
    close: PressTracker,
    pressed: Option<NavBarButton>,
}

impl NavBar {
    /// Create a bar whose buttons press through `context`.
    ///
    /// Title and button visibility start from [`ViewOptions::nav`].
    pub fn new(context: &PointerContext, input: InputModel, mut options: ViewOptions) -> Self {
        if options.outlet_name.is_none() {
            options.outlet_name = Some(NAV_BAR_OUTLET.into());
        }
        let state = NavBarState {
            title: options.nav.title.clone().unwrap_or_default(),
            hides_back_button: options.nav.hides_back_button,
            shows_close_button: options.nav.shows_close_button,
            ..NavBarState::default()
        };
        Self {
            core: ViewCore::new(NAV_BAR_CLASS, options),
            ui: UiBindings::new()
                .with("genericButton", "> .header > .genericButton")
                .with("backButton", "> .header > .backButton")
                .with("backButtonLabel", "> .header > .backButton > .label > span")
                .with("closeButton", "> .header > .closeButton")
                .with("title", "> .header > .label > span")
                .with("status", "> .header > .status"),
            state,
            state_changed: false,
            input,
            back: PressTracker::new(context),
            close: PressTracker::new(context),
            pressed: None,
        }
    }

    /// Start with the status area shown.
    pub fn with_status(mut self, shows: bool) -> Self {
        self.state.shows_status = shows;
        self
    }

    /// Current state.
    pub fn state(&self) -> &NavBarState {
        &self.state
    }

    /// Title text.
    pub fn title(&self) -> &str {
        &self.state.title
    }

    /// Resolved UI elements.
    pub fn ui(&self) -> &UiBindings {
        &self.ui
    }

    /// Returns true if the bar changed since the last [`NavBar::reset_state_changed`].
    pub fn state_changed(&self) -> bool {
        self.state_changed
    }

    /// Lower the state-changed flag.
    pub fn reset_state_changed(&mut self) {
        self.state_changed = false;
    }

    /// Set the title.
    pub fn set_title(&mut self, tree: &mut Tree, title: &str) {
        self.state.title = title.into();
        if let Some(el) = self.ui.get("title") {
            tree.set_text(el, Some(title));
        }
        self.state_changed = true;
    }

    /// Hide or show the back button.
    pub fn set_hides_back_button(&mut self, tree: &mut Tree, hides: bool) {
        self.state.hides_back_button = hides;
        self.back.set_enabled(!hides);
        if let Some(el) = self.ui.get("backButton") {
            set_hidden(tree, el, hides);
        }
        self.state_changed = true;
    }

    /// Show or hide the close button.
    pub fn set_shows_close_button(&mut self, tree: &mut Tree, shows: bool) {
        self.state.shows_close_button = shows;
        self.close.set_enabled(shows);
        if let Some(el) = self.ui.get("closeButton") {
            set_hidden(tree, el, !shows);
        }
        self.state_changed = true;
    }

    /// Show or hide the status area.
    pub fn set_shows_status(&mut self, tree: &mut Tree, shows: bool) {
        self.state.shows_status = shows;
        if let Some(el) = self.ui.get("status") {
            set_hidden(tree, el, !shows);
        }
        self.state_changed = true;
    }

    /// Apply a named style, or remove every style with `None`.
    pub fn set_style(&mut self, tree: &mut Tree, style: Option<&str>) {
        match style {
            Some(name) => match NAV_STYLES.iter().find(|(n, _)| *n == name) {
                Some((_, class)) => {
                    if let Some(el) = self.core.element() {
                        set_class(tree, el, class, true);
                    }
                    self.state.style = Some(name.into());
                }
                None => tracing::debug!(style = name, "unknown navigation bar style"),
            },
            None => {
                if let Some(el) = self.core.element() {
                    let classes: Vec<&str> = NAV_STYLES.iter().map(|(_, class)| *class).collect();
                    tree.update_classes(el, &classes, &[]);
                }
                self.state.style = None;
            }
        }
        self.state_changed = true;
    }

    /// Set the back button label. `None` leaves it empty.
    pub fn set_back_button_label(&mut self, tree: &mut Tree, label: Option<&str>) {
        self.state.back_button_label = Some(String::from(label.unwrap_or_default()));
        if let Some(el) = self.ui.get("backButtonLabel") {
            tree.set_text(el, label.or(Some("")));
        }
        self.state_changed = true;
    }

    /// The status area, once rendered.
    pub fn status_element(&self) -> Option<NodeId> {
        self.ui.get("status")
    }

    /// The back button, once rendered.
    pub fn back_button_element(&self) -> Option<NodeId> {
        self.ui.get("backButton")
    }

    /// The close button, once rendered.
    pub fn close_button_element(&self) -> Option<NodeId> {
        self.ui.get("closeButton")
    }

    /// The button under `point`, if it is displayed and hit.
    pub fn button_at(&self, tree: &Tree, point: Point) -> Option<NavBarButton> {
        let hit = tree.hit_test_point(point)?;
        let back = self.back_button_element();
        let close = self.close_button_element();
        hit.path.iter().rev().find_map(|n| {
            if Some(*n) == back {
                Some(NavBarButton::Back)
            } else if Some(*n) == close {
                Some(NavBarButton::Close)
            } else {
                None
            }
        })
    }

    /// Feed a raw pointer event, routing it to the pressed button or the button under it.
    pub fn handle_pointer(&mut self, tree: &mut Tree, input: PointerInput) -> Option<Event> {
        let phase = self.input.translate(input.kind)?;
        let target = match phase {
            PointerPhase::Down => self.button_at(tree, input.position),
            PointerPhase::Up | PointerPhase::Move => self
                .pressed
                .or_else(|| self.button_at(tree, input.position)),
        }?;
        self.handle_button_pointer(tree, target, input)
    }

    /// Feed a raw pointer event delivered to `button`. Returns `Back:<outlet>` or
    /// `Close:<outlet>` when a press completes on it.
    pub fn handle_button_pointer(
        &mut self,
        tree: &mut Tree,
        button: NavBarButton,
        input: PointerInput,
    ) -> Option<Event> {
        let phase = self.input.translate(input.kind)?;
        let el = self.ui.get(button.ui_name())?;
        let bounds = tree.bounds(el).unwrap_or(Rect::ZERO);
        let tracker = match button {
            NavBarButton::Back => &mut self.back,
            NavBarButton::Close => &mut self.close,
        };
        let outcome = tracker.handle(phase, bounds, input.position);
        let pressed = tracker.shows_pressed();
        set_class(tree, el, PRESSED_CLASS, pressed);
        self.pressed = match phase {
            PointerPhase::Down if tracker.is_enabled() => Some(button),
            PointerPhase::Up => None,
            _ => self.pressed,
        };
        if outcome != PressOutcome::Click {
            return None;
        }
        let outlet = self.core.outlet_name().unwrap_or(NAV_BAR_OUTLET);
        let name = format!("{}:{outlet}", button.event_prefix());
        Some(Event::new(name, self.core.id()))
    }

    fn apply_state(&mut self, tree: &mut Tree) {
        let state = self.state.clone();
        self.set_hides_back_button(tree, state.hides_back_button);
        self.set_shows_close_button(tree, state.shows_close_button);
        self.set_shows_status(tree, state.shows_status);
        if let Some(style) = state.style.as_deref() {
            self.set_style(tree, Some(style));
        }
        if state.back_button_label.is_some() {
            self.set_back_button_label(tree, state.back_button_label.as_deref());
        }
    }
}

impl View for NavBar {
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
        let header = tree.append(fragment, Element::div().with_class("header"));
        let back = tree.append(
            header,
            Element::div().with_class("backButton genericButton back small"),
        );
        tree.append(back, Element::div().with_class("icon"));
        let back_label = tree.append(back, Element::div().with_class("label"));
        tree.append(back_label, Element::new("span").with_text("Back"));
        let title = tree.append(header, Element::div().with_class("label"));
        tree.append(title, Element::new("span").with_text(&self.state.title));
        tree.append(header, Element::div().with_class("status"));
        let close = tree.append(header, Element::div().with_class("closeButton genericButton"));
        tree.append(close, Element::div().with_class("icon"));
        for old in tree.replace_children(el, fragment) {
            tree.free(old);
        }
        tree.free(fragment);

        self.ui.bind(tree, el);
        self.apply_state(tree);
        self.core.mark_rendered();
        self.core.trigger(tree, "render");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use trellis_pointer::input::RawPointerKind;
    use trellis_view::{NavPreferences, ViewHandle};

    const BACK_AT: Point = Point::new(30.0, 20.0);
    const CLOSE_AT: Point = Point::new(290.0, 20.0);

    fn mounted(options: ViewOptions) -> (Tree, PointerContext, ViewHandle<NavBar>) {
        let mut tree = Tree::new();
        let cx = PointerContext::new();
        let bar = ViewHandle::new(NavBar::new(&cx, InputModel::Touch, options));
        bar.borrow_mut().render(&mut tree).unwrap();
        let el = bar.element().unwrap();
        let doc = tree.document();
        tree.append_child(doc, el);
        tree.set_bounds(el, Rect::new(0.0, 0.0, 320.0, 44.0));
        {
            let b = bar.borrow();
            let header = b.ui().get("genericButton").and_then(|n| tree.parent(n)).unwrap();
            tree.set_bounds(header, Rect::new(0.0, 0.0, 320.0, 44.0));
            tree.set_bounds(b.back_button_element().unwrap(), Rect::new(0.0, 0.0, 80.0, 44.0));
            tree.set_bounds(b.close_button_element().unwrap(), Rect::new(260.0, 0.0, 320.0, 44.0));
        }
        (tree, cx, bar)
    }

    fn events(bar: &ViewHandle<NavBar>) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        bar.borrow()
            .core()
            .emitter()
            .on_all(move |_, e| l.borrow_mut().push(e.name.clone()));
        log
    }

    fn tap(tree: &mut Tree, bar: &ViewHandle<NavBar>, at: Point) {
        for kind in [RawPointerKind::TouchStart, RawPointerKind::TouchEnd] {
            bar.dispatch(tree, |b, tree| b.handle_pointer(tree, PointerInput::new(kind, at)));
        }
    }

    fn with_nav(nav: NavPreferences) -> ViewOptions {
        ViewOptions::new().with_nav(nav)
    }

    #[test]
    fn renders_the_header_from_options() {
        let (tree, _, bar) = mounted(with_nav(NavPreferences {
            title: Some("Inbox".into()),
            hides_back_button: true,
            ..NavPreferences::default()
        }));
        let bar = bar.borrow();
        let el = bar.core().element().unwrap();
        assert!(tree.has_class(el, "NavBar"));
        assert!(tree.has_class(el, "navBar"));
        assert_eq!(tree.text(bar.ui().get("title").unwrap()), Some("Inbox"));
        assert_eq!(tree.text(bar.ui().get("backButtonLabel").unwrap()), Some("Back"));
        assert!(tree.has_class(bar.back_button_element().unwrap(), "hidden"));
        assert!(tree.has_class(bar.close_button_element().unwrap(), "hidden"));
        assert!(tree.has_class(bar.status_element().unwrap(), "hidden"));
        // Rendering applies the state, which counts as a change.
        assert!(bar.state_changed());
    }

    #[test]
    fn setters_update_the_tree_and_raise_state_changed() {
        let (mut tree, _, bar) = mounted(ViewOptions::new());
        let mut bar = bar.borrow_mut();
        bar.reset_state_changed();

        bar.set_title(&mut tree, "Settings");
        assert!(bar.state_changed());
        assert_eq!(tree.text(bar.ui().get("title").unwrap()), Some("Settings"));
        assert_eq!(bar.title(), "Settings");

        bar.reset_state_changed();
        bar.set_shows_close_button(&mut tree, true);
        bar.set_shows_status(&mut tree, true);
        assert!(bar.state_changed());
        assert!(!tree.has_class(bar.close_button_element().unwrap(), "hidden"));
        assert!(!tree.has_class(bar.status_element().unwrap(), "hidden"));

        bar.reset_state_changed();
        bar.set_back_button_label(&mut tree, Some("Inbox"));
        assert!(bar.state_changed());
        assert_eq!(tree.text(bar.ui().get("backButtonLabel").unwrap()), Some("Inbox"));
        bar.reset_state_changed();
        bar.set_back_button_label(&mut tree, None);
        assert!(bar.state_changed());
        assert_eq!(tree.text(bar.ui().get("backButtonLabel").unwrap()), Some(""));
    }

    #[test]
    fn styles_map_to_classes() {
        let (mut tree, _, bar) = mounted(ViewOptions::new());
        let mut bar = bar.borrow_mut();
        let el = bar.core().element().unwrap();
        bar.set_style(&mut tree, Some("white"));
        assert!(tree.has_class(el, "navBarWhite"));
        assert_eq!(bar.state().style.as_deref(), Some("white"));

        bar.set_style(&mut tree, Some("purple"));
        assert_eq!(bar.state().style.as_deref(), Some("white"));

        bar.set_style(&mut tree, None);
        assert!(!tree.has_class(el, "navBarWhite"));
        assert_eq!(bar.state().style, None);
    }

    #[test]
    fn state_survives_a_re_render() {
        let (mut tree, _, bar) = mounted(ViewOptions::new());
        {
            let mut b = bar.borrow_mut();
            b.set_title(&mut tree, "Drafts");
            b.set_style(&mut tree, Some("white"));
            b.set_shows_close_button(&mut tree, true);
        }
        bar.borrow_mut().render(&mut tree).unwrap();
        let b = bar.borrow();
        let el = b.core().element().unwrap();
        assert_eq!(tree.text(b.ui().get("title").unwrap()), Some("Drafts"));
        assert!(tree.has_class(el, "navBarWhite"));
        assert!(!tree.has_class(b.close_button_element().unwrap(), "hidden"));
    }

    #[test]
    fn tapping_buttons_raises_back_and_close() {
        let (mut tree, _, bar) = mounted(with_nav(NavPreferences {
            shows_close_button: true,
            ..NavPreferences::default()
        }));
        let log = events(&bar);
        assert_eq!(bar.borrow().button_at(&tree, BACK_AT), Some(NavBarButton::Back));

        tap(&mut tree, &bar, BACK_AT);
        tap(&mut tree, &bar, CLOSE_AT);
        assert_eq!(*log.borrow(), ["Back:navBar", "Close:navBar"]);
    }

    #[test]
    fn hidden_buttons_cannot_be_tapped() {
        let (mut tree, _, bar) = mounted(with_nav(NavPreferences {
            hides_back_button: true,
            ..NavPreferences::default()
        }));
        let log = events(&bar);
        assert_eq!(bar.borrow().button_at(&tree, BACK_AT), None);
        tap(&mut tree, &bar, BACK_AT);
        tap(&mut tree, &bar, CLOSE_AT);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn sliding_off_a_button_cancels_the_tap() {
        let (mut tree, _, bar) = mounted(ViewOptions::new().with_outlet("bar"));
        let log = events(&bar);
        let back = bar.borrow().back_button_element().unwrap();
        let moves = [
            (RawPointerKind::TouchStart, BACK_AT),
            (RawPointerKind::TouchMove, Point::new(150.0, 20.0)),
        ];
        for (kind, at) in moves {
            bar.dispatch(&mut tree, |b, tree| {
                b.handle_pointer(tree, PointerInput::new(kind, at))
            });
        }
        assert!(!tree.has_class(back, "pressed"));
        bar.dispatch(&mut tree, |b, tree| {
            b.handle_pointer(
                tree,
                PointerInput::new(RawPointerKind::TouchEnd, Point::new(150.0, 20.0)),
            )
        });
        assert!(log.borrow().is_empty());

        // The outlet names the event.
        tap(&mut tree, &bar, BACK_AT);
        assert_eq!(*log.borrow(), ["Back:bar"]);
    }
}
