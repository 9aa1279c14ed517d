// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use trellis_nav::{NavController, NavOptions};
use trellis_pointer::context::PointerContext;
use trellis_tree::Tree;
use trellis_view::{FrameScheduler, ItemView, Platform, View, ViewHandle, ViewOptions};

struct Fixture {
    tree: Tree,
    frames: FrameScheduler,
    nav: ViewHandle<NavController>,
}

fn fixture() -> Fixture {
    let mut tree = Tree::new();
    let frames = FrameScheduler::new();
    let nav = NavController::new(
        NavOptions::default(),
        Platform::default(),
        frames.clone(),
        &PointerContext::new(),
    );
    nav.borrow_mut().render(&mut tree).unwrap();
    let el = nav.element().unwrap();
    let doc = tree.document();
    tree.append_child(doc, el);
    let root = ViewHandle::new(ItemView::new("page", ViewOptions::new().with_title("Root")));
    nav.borrow_mut()
        .push_view(&mut tree, root.to_dyn(), false, None)
        .unwrap();
    frames.run_until_idle(&mut tree, 8);
    Fixture { tree, frames, nav }
}

fn page(depth: usize) -> ViewHandle {
    let title = format!("Page {depth}");
    ViewHandle::new(ItemView::new("page", ViewOptions::new().with_title(&title))).to_dyn()
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("nav");
    group.bench_function("push_then_pop", |b| {
        let mut f = fixture();
        b.iter(|| {
            f.nav
                .borrow_mut()
                .push_view(&mut f.tree, page(1), false, None)
                .unwrap();
            f.frames.run_until_idle(&mut f.tree, 8);
            f.nav.borrow_mut().pop_view(&mut f.tree, 1).unwrap();
            f.frames.run_until_idle(&mut f.tree, 8);
            black_box(f.nav.borrow().view_stack().len());
        });
    });
    for &depth in &[4usize, 16] {
        group.bench_function(format!("push_{depth}_then_change_root"), |b| {
            b.iter_batched(
                fixture,
                |mut f| {
                    for d in 0..depth {
                        f.nav
                            .borrow_mut()
                            .push_view(&mut f.tree, page(d), false, None)
                            .unwrap();
                        f.frames.run_until_idle(&mut f.tree, 8);
                    }
                    f.nav
                        .borrow_mut()
                        .change_root(&mut f.tree, page(0), false, None)
                        .unwrap();
                    f.frames.run_until_idle(&mut f.tree, 8);
                    black_box(f.tree.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push_pop);
criterion_main!(benches);
