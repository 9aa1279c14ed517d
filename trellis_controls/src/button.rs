// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A pressable button with an icon and a label.

use trellis_pointer::context::PointerContext;
use trellis_pointer::input::{InputModel, PointerInput};
use trellis_pointer::press::{PressOutcome, PressTracker};
use trellis_tree::{Element, NodeId, Rect, Selector, Tree};
use trellis_view::{Event, View, ViewCore, ViewError, ViewOptions};

use crate::control::{DISABLED_CLASS, PRESSED_CLASS, control_core, set_class};

/// Base class of buttons.
pub const BUTTON_CLASS: &str = "genericButton";

/// Renders `icon` and `label > span` and raises `click` when a press completes on it.
///
/// Feed raw pointer events to [`ButtonControl::handle_pointer`] through
/// [`ViewHandle::dispatch`](trellis_view::ViewHandle::dispatch) so the click is raised after
/// the button is released.
#[derive(Debug)]
pub struct ButtonControl {
    core: ViewCore,
    tracker: PressTracker,
    input: InputModel,
}

impl ButtonControl {
    /// Create a button pressed through `context`, listening to the `input` event set.
    pub fn new(context: &PointerContext, input: InputModel, options: ViewOptions) -> Self {
        Self {
            core: control_core(BUTTON_CLASS, options),
            tracker: PressTracker::new(context),
            input,
        }
    }

    /// The press tracker.
    pub fn tracker(&self) -> &PressTracker {
        &self.tracker
    }

    /// The input model chosen at construction.
    pub fn input_model(&self) -> InputModel {
        self.input
    }

    /// Returns true unless the button was disabled.
    pub fn is_enabled(&self) -> bool {
        self.tracker.is_enabled()
    }

    /// Enable or disable the button.
    pub fn set_enabled(&mut self, tree: &mut Tree, enabled: bool) {
        self.tracker.set_enabled(enabled);
        if let Some(el) = self.core.element() {
            set_class(tree, el, DISABLED_CLASS, !enabled);
        }
        self.sync_pressed(tree);
    }

    /// Replace the label text.
    pub fn set_label_text(&mut self, tree: &mut Tree, text: &str) {
        self.core.options_mut().label_text = Some(text.into());
        if let Some(span) = self.label_span(tree) {
            tree.set_text(span, Some(text));
        }
    }

    fn label_span(&self, tree: &Tree) -> Option<NodeId> {
        let root = self.core.element()?;
        tree.select(root, &Selector::parse("> .label > span"))
    }

    /// Feed one raw pointer event. Returns `click` if the press completed on this button.
    pub fn handle_pointer(&mut self, tree: &mut Tree, input: PointerInput) -> Option<Event> {
        let phase = self.input.translate(input.kind)?;
        let el = self.core.element()?;
        let bounds = tree.bounds(el).unwrap_or(Rect::ZERO);
        let outcome = self.tracker.handle(phase, bounds, input.position);
        self.sync_pressed(tree);
        (outcome == PressOutcome::Click).then(|| Event::new("click", self.core.id()))
    }

    fn sync_pressed(&self, tree: &mut Tree) {
        if let Some(el) = self.core.element() {
            set_class(tree, el, PRESSED_CLASS, self.tracker.shows_pressed());
        }
    }
}

impl View for ButtonControl {
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
        tree.append(fragment, Element::div().with_class("icon"));
        let label = tree.append(fragment, Element::div().with_class("label"));
        let text = self.core.options().label_text.clone().unwrap_or_default();
        tree.append(label, Element::new("span").with_text(&text));
        for old in tree.replace_children(el, fragment) {
            tree.free(old);
        }
        tree.free(fragment);

        // A `disabled` class in the options starts the button disabled.
        if tree.has_class(el, DISABLED_CLASS) {
            self.set_enabled(tree, false);
        }
        self.core.mark_rendered();
        self.core.trigger(tree, "render");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use trellis_pointer::input::RawPointerKind;
    use trellis_tree::Point;
    use trellis_view::ViewHandle;

    const INSIDE: Point = Point::new(20.0, 10.0);
    const OUTSIDE: Point = Point::new(200.0, 10.0);

    fn button(
        tree: &mut Tree,
        cx: &PointerContext,
        x0: f64,
        options: ViewOptions,
    ) -> ViewHandle<ButtonControl> {
        let handle = ViewHandle::new(ButtonControl::new(cx, InputModel::Mouse, options));
        handle.borrow_mut().render(tree).unwrap();
        let el = handle.element().unwrap();
        let doc = tree.document();
        tree.append_child(doc, el);
        tree.set_bounds(el, Rect::new(x0, 0.0, x0 + 100.0, 40.0));
        handle
    }

    fn clicks(handle: &ViewHandle<ButtonControl>) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        handle
            .borrow()
            .core()
            .emitter()
            .on("click", move |_, _| c.set(c.get() + 1));
        count
    }

    fn send(tree: &mut Tree, handle: &ViewHandle<ButtonControl>, kind: RawPointerKind, at: Point) {
        handle.dispatch(tree, |b, tree| {
            b.handle_pointer(tree, PointerInput::new(kind, at))
        });
    }

    #[test]
    fn renders_icon_and_label() {
        let mut tree = Tree::new();
        let cx = PointerContext::new();
        let ok = button(
            &mut tree,
            &cx,
            0.0,
            ViewOptions::new().with_outlet("ok").with_label_text("OK"),
        );
        let el = ok.element().unwrap();
        assert!(tree.has_class(el, "genericButton"));
        assert!(tree.has_class(el, "ok"));
        let span = tree.select(el, &Selector::parse("> .label > span")).unwrap();
        assert_eq!(tree.text(span), Some("OK"));
        assert!(tree.select(el, &Selector::parse("> .icon")).is_some());

        ok.borrow_mut().set_label_text(&mut tree, "Done");
        assert_eq!(tree.text(span), Some("Done"));
        // The new label survives a re-render.
        ok.borrow_mut().render(&mut tree).unwrap();
        let span = tree.select(el, &Selector::parse("> .label > span")).unwrap();
        assert_eq!(tree.text(span), Some("Done"));
    }

    #[test]
    fn press_and_release_inside_clicks() {
        let mut tree = Tree::new();
        let cx = PointerContext::new();
        let ok = button(&mut tree, &cx, 0.0, ViewOptions::new());
        let count = clicks(&ok);
        let el = ok.element().unwrap();

        send(&mut tree, &ok, RawPointerKind::MouseDown, INSIDE);
        assert!(tree.has_class(el, "pressed"));
        send(&mut tree, &ok, RawPointerKind::MouseUp, INSIDE);
        assert!(!tree.has_class(el, "pressed"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn leaving_the_bounds_cancels_the_click() {
        let mut tree = Tree::new();
        let cx = PointerContext::new();
        let ok = button(&mut tree, &cx, 0.0, ViewOptions::new());
        let count = clicks(&ok);
        let el = ok.element().unwrap();

        send(&mut tree, &ok, RawPointerKind::MouseDown, INSIDE);
        send(&mut tree, &ok, RawPointerKind::MouseMove, OUTSIDE);
        assert!(!tree.has_class(el, "pressed"));
        send(&mut tree, &ok, RawPointerKind::MouseUp, OUTSIDE);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn a_press_on_one_button_does_not_click_another() {
        let mut tree = Tree::new();
        let cx = PointerContext::new();
        let a = button(&mut tree, &cx, 0.0, ViewOptions::new());
        let b = button(&mut tree, &cx, 200.0, ViewOptions::new());
        let (a_clicks, b_clicks) = (clicks(&a), clicks(&b));

        send(&mut tree, &a, RawPointerKind::MouseDown, INSIDE);
        send(&mut tree, &b, RawPointerKind::MouseUp, Point::new(220.0, 10.0));
        send(&mut tree, &a, RawPointerKind::MouseUp, INSIDE);
        assert_eq!(a_clicks.get(), 0);
        assert_eq!(b_clicks.get(), 0);
    }

    #[test]
    fn disabled_buttons_ignore_input() {
        let mut tree = Tree::new();
        let cx = PointerContext::new();
        let ok = button(&mut tree, &cx, 0.0, ViewOptions::new().with_class("disabled"));
        let count = clicks(&ok);
        assert!(!ok.borrow().is_enabled());

        send(&mut tree, &ok, RawPointerKind::MouseDown, INSIDE);
        send(&mut tree, &ok, RawPointerKind::MouseUp, INSIDE);
        assert_eq!(count.get(), 0);

        ok.borrow_mut().set_enabled(&mut tree, true);
        assert!(!tree.has_class(ok.element().unwrap(), "disabled"));
        send(&mut tree, &ok, RawPointerKind::MouseDown, INSIDE);
        send(&mut tree, &ok, RawPointerKind::MouseUp, INSIDE);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn events_outside_the_input_model_are_ignored() {
        let mut tree = Tree::new();
        let cx = PointerContext::new();
        let ok = button(&mut tree, &cx, 0.0, ViewOptions::new());
        let count = clicks(&ok);
        send(&mut tree, &ok, RawPointerKind::TouchStart, INSIDE);
        send(&mut tree, &ok, RawPointerKind::TouchEnd, INSIDE);
        assert_eq!(count.get(), 0);
        assert_eq!(cx.active(), None);
    }

    #[test]
    fn click_listeners_may_borrow_the_button() {
        let mut tree = Tree::new();
        let cx = PointerContext::new();
        let ok = button(&mut tree, &cx, 0.0, ViewOptions::new());
        let weak = ok.downgrade();
        ok.borrow().core().emitter().on("click", move |tree, _| {
            if let Some(ok) = weak.upgrade() {
                ok.borrow_mut().set_enabled(tree, false);
            }
        });
        send(&mut tree, &ok, RawPointerKind::MouseDown, INSIDE);
        send(&mut tree, &ok, RawPointerKind::MouseUp, INSIDE);
        assert!(!ok.borrow().is_enabled());
    }
}
