// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button presses.
//!
//! Two buttons share one pointer context. Raw mouse events are hit-tested against the tree and
//! fed to the button under the pointer. A press that leaves the button is cancelled, and a
//! release over the other button does not click it.
//!
//! Run:
//! - `cargo run -p trellis_demos --example button_press`

use trellis_controls::button::ButtonControl;
use trellis_pointer::context::PointerContext;
use trellis_pointer::input::{InputModel, PointerInput, RawPointerKind};
use trellis_tree::{Point, Rect, Tree};
use trellis_view::{View, ViewError, ViewHandle, ViewOptions};
use tracing_subscriber::EnvFilter;

fn button(
    tree: &mut Tree,
    cx: &PointerContext,
    label: &str,
    bounds: Rect,
) -> Result<ViewHandle<ButtonControl>, ViewError> {
    let handle = ViewHandle::new(ButtonControl::new(
        cx,
        InputModel::detect(false),
        ViewOptions::new().with_outlet(label).with_label_text(label),
    ));
    handle.borrow_mut().render(tree)?;
    if let Some(el) = handle.element() {
        let doc = tree.document();
        tree.append_child(doc, el);
        tree.set_bounds(el, bounds);
    }
    let name = String::from(label);
    handle
        .borrow()
        .core()
        .emitter()
        .on("click", move |_, _| println!("  -> {name} clicked"));
    Ok(handle)
}

fn main() -> Result<(), ViewError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Tree::new();
    let cx = PointerContext::new();
    let ok = button(&mut tree, &cx, "ok", Rect::new(0.0, 0.0, 80.0, 32.0))?;
    let cancel = button(&mut tree, &cx, "cancel", Rect::new(100.0, 0.0, 180.0, 32.0))?;
    let buttons = [ok, cancel];

    let script = [
        ("press and release on ok", RawPointerKind::MouseDown, 40.0),
        ("", RawPointerKind::MouseUp, 40.0),
        ("press on ok, drag off, release", RawPointerKind::MouseDown, 40.0),
        ("", RawPointerKind::MouseMove, 300.0),
        ("", RawPointerKind::MouseUp, 300.0),
        ("press on ok, release on cancel", RawPointerKind::MouseDown, 40.0),
        ("", RawPointerKind::MouseUp, 140.0),
    ];

    let mut pressed: Option<usize> = None;
    for (title, kind, x) in script {
        if !title.is_empty() {
            println!("== {title} ==");
        }
        let position = Point::new(x, 16.0);
        let hit = tree.hit_test_point(position).map(|h| h.node);
        let under = buttons.iter().position(|b| b.element() == hit);
        // The pressed button keeps receiving events until release.
        let target = match kind {
            RawPointerKind::MouseDown => under,
            _ => pressed.or(under),
        };
        if kind == RawPointerKind::MouseDown {
            pressed = under;
        } else if kind == RawPointerKind::MouseUp {
            pressed = None;
        }
        let Some(index) = target else {
            continue;
        };
        let input = PointerInput::new(kind, position);
        buttons[index].dispatch(&mut tree, |b, tree| b.handle_pointer(tree, input));
        let b = buttons[index].borrow();
        println!("  {kind:?} at x={x}: pressed={}", b.tracker().shows_pressed());
    }
    cx.document_pointer_up();
    tracing::info!(active = ?cx.active(), "pointer context cleared");
    Ok(())
}
