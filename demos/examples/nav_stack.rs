// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack navigation.
//!
//! Pushes two views, pops back with the navigation bar's back button, replaces the root and
//! presents a modal view. Frames are driven by hand; pass `--webkit` to deliver transition-end
//! notifications instead of completing transitions from a frame callback.
//!
//! Run:
//! - `RUST_LOG=trellis_nav=debug cargo run -p trellis_demos --example nav_stack`
//! - `cargo run -p trellis_demos --example nav_stack -- --webkit`

use trellis_controls::navbar::NavBarButton;
use trellis_nav::{NavController, NavOptions};
use trellis_pointer::context::PointerContext;
use trellis_pointer::input::{PointerInput, RawPointerKind};
use trellis_tree::{Element, Point, Rect, Tree};
use trellis_view::{
    FrameScheduler, ItemView, Platform, View, ViewError, ViewHandle, ViewOptions,
};
use tracing_subscriber::EnvFilter;

fn page(title: &str) -> ViewHandle {
    let view = ItemView::new("page", ViewOptions::new().with_title(title).with_data("body", title))
        .with_template(|tree, parent, options| {
            let body = options.data("body").unwrap_or_default();
            tree.append(parent, Element::new("p").with_text(body));
        });
    ViewHandle::new(view).to_dyn()
}

fn settle(tree: &mut Tree, frames: &FrameScheduler, nav: &ViewHandle<NavController>) {
    let ran = frames.run_until_idle(tree, 16);
    let main = nav.borrow().main_container();
    if let Some(main) = main {
        nav.borrow_mut().handle_transition_end(tree, main);
    }
    frames.run_until_idle(tree, 16);
    report(nav, ran);
}

fn report(nav: &ViewHandle<NavController>, frames: usize) {
    let nav = nav.borrow();
    let titles: Vec<String> = nav
        .view_stack()
        .iter()
        .map(|v| {
            v.borrow()
                .core()
                .nav_preferences()
                .title
                .clone()
                .unwrap_or_default()
        })
        .collect();
    println!(
        "  stack={titles:?} bar=\"{}\" frames={frames}",
        nav.nav_bar().borrow().title()
    );
}

fn tap_back(tree: &mut Tree, nav: &ViewHandle<NavController>) {
    let bar = nav.borrow().nav_bar().clone();
    let Some(back) = bar.borrow().back_button_element() else {
        return;
    };
    tree.set_bounds(back, Rect::new(0.0, 0.0, 60.0, 44.0));
    for kind in [RawPointerKind::MouseDown, RawPointerKind::MouseUp] {
        let input = PointerInput::new(kind, Point::new(20.0, 20.0));
        bar.dispatch(tree, |b, tree| {
            b.handle_button_pointer(tree, NavBarButton::Back, input)
        });
    }
}

fn main() -> Result<(), ViewError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let webkit = std::env::args().any(|a| a == "--webkit");
    let platform = Platform::default().with_transition_events(webkit);
    tracing::info!(webkit, "starting navigation demo");
    let mut tree = Tree::new();
    let frames = FrameScheduler::new();
    let nav = NavController::new(
        NavOptions {
            title: Some("Mail".into()),
            ..NavOptions::default()
        },
        platform,
        frames.clone(),
        &PointerContext::new(),
    );
    nav.borrow()
        .core()
        .emitter()
        .on("transition:end", |_, _| println!("  transition ended"));
    nav.borrow_mut().render(&mut tree)?;
    if let Some(el) = nav.element() {
        let doc = tree.document();
        tree.append_child(doc, el);
    }

    println!("== Root ==");
    nav.borrow_mut()
        .push_view(&mut tree, page("Inbox"), false, None)?;
    settle(&mut tree, &frames, &nav);

    println!("== Push two views ==");
    for title in ["Lunch on Friday?", "Attachments"] {
        nav.borrow_mut()
            .push_view(&mut tree, page(title), false, None)?;
        settle(&mut tree, &frames, &nav);
    }

    println!("== Back button ==");
    tap_back(&mut tree, &nav);
    settle(&mut tree, &frames, &nav);

    println!("== Change root, with a loading placeholder ==");
    nav.borrow_mut()
        .change_root(&mut tree, page("Archive"), false, Some("Loading…"))?;
    settle(&mut tree, &frames, &nav);

    println!("== Modal ==");
    let compose = page("Compose");
    nav.borrow_mut().present_modal_view(&mut tree, compose.clone())?;
    println!("  modal shown: {}", nav.borrow().modal_view().is_some());
    nav.borrow_mut().dismiss_modal_view(&mut tree);
    println!("  compose destroyed: {}", compose.is_destroyed());

    println!("== Close ==");
    nav.borrow_mut().pop_to_close(&mut tree);
    println!("  controller destroyed: {}", nav.is_destroyed());
    Ok(())
}
