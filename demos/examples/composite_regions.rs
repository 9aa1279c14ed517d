// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite and complex views.
//!
//! Renders a mail layout whose header and list are declared sub-views and whose preview pane
//! is a region. Re-rendering rebuilds the sub-views but keeps the view shown in the region.
//! Events from sub-views are forwarded with the `subview` prefix.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example composite_regions`

use trellis_tree::{Element, NodeId, Tree};
use trellis_view::{
    ComplexView, CompositeView, ItemView, OUTLET_ATTR, REGION_ATTR, SubViewSlot, View,
    ViewError, ViewFactory, ViewHandle, ViewOptions,
};
use tracing_subscriber::EnvFilter;

fn outline(tree: &Tree, id: NodeId, depth: usize) {
    let tag = tree.tag(id).unwrap_or("?");
    let classes = tree.classes(id).join(".");
    let text = tree.text(id).map(|t| format!(" \"{t}\"")).unwrap_or_default();
    println!("{:indent$}{tag}.{classes}{text}", "", indent = depth * 2);
    for child in tree.children(id) {
        outline(tree, *child, depth + 1);
    }
}

fn label(class: &str, options: ViewOptions) -> ItemView {
    ItemView::new(class, options).with_template(|tree, parent, options| {
        let text = options.data("text").unwrap_or_default();
        tree.append(parent, Element::new("span").with_text(text));
    })
}

fn main() -> Result<(), ViewError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("rendering mail layout");
    let mut tree = Tree::new();
    let layout = CompositeView::new("mail", ViewOptions::new())
        .with_template(|tree, parent, _| {
            tree.append(parent, Element::div().with_attr(OUTLET_ATTR, "header"));
            tree.append(parent, Element::div().with_attr(OUTLET_ATTR, "list"));
            tree.append(parent, Element::div().with_attr(REGION_ATTR, "preview"));
        })
        .with_slot(
            SubViewSlot::new("header", ViewFactory::of(|o| label("title", o)))
                .with_options(ViewOptions::new().with_data("text", "Inbox")),
        )
        .with_slot(
            SubViewSlot::new("list", ViewFactory::of(|o| label("messages", o)))
                .with_options(ViewOptions::new().with_data("text", "3 unread")),
        );
    let page = ViewHandle::new(ComplexView::new(layout).with_region("preview", "preview"));
    page.borrow()
        .core()
        .emitter()
        .on_all(|_, event| println!("event: {}", event.name));

    page.borrow_mut().render(&mut tree)?;
    let doc = tree.document();
    if let Some(el) = page.element() {
        tree.append_child(doc, el);
    }
    page.borrow_mut().show(&mut tree);

    let preview = ViewHandle::new(label(
        "preview",
        ViewOptions::new().with_data("text", "Lunch on Friday?"),
    ));
    page.borrow_mut()
        .show_in_region(&mut tree, "preview", preview.to_dyn())?;

    println!("== First render ==");
    outline(&tree, doc, 0);

    let header = page.borrow().composite().sub_view("header");
    if let Some(header) = header {
        header.borrow().core().trigger(&mut tree, "refresh");
    }

    let before = tree.live_mutations();
    page.borrow_mut().render(&mut tree)?;
    println!(
        "== Re-render ({} live mutations) ==",
        tree.live_mutations() - before
    );
    outline(&tree, doc, 0);
    println!(
        "preview kept: {}",
        page.borrow()
            .region("preview")
            .and_then(|r| r.current())
            .is_some_and(|v| v.ptr_eq(&preview))
    );

    page.borrow_mut().destroy(&mut tree);
    println!("destroyed; tree now holds {} nodes", tree.len());
    Ok(())
}
