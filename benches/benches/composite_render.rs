// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_tree::{Element, Point, Rect, Selector, Tree};
use trellis_view::{
    CompositeView, ItemView, OUTLET_ATTR, SubViewSlot, View, ViewFactory, ViewHandle, ViewOptions,
};

fn outlet(i: usize) -> String {
    format!("row{i}")
}

fn list_page(rows: usize) -> CompositeView {
    CompositeView::new("list", ViewOptions::new())
        .with_template(move |tree, parent, _| {
            for i in 0..rows {
                tree.append(parent, Element::div().with_attr(OUTLET_ATTR, &outlet(i)));
            }
        })
        .with_slots_from(move |_| {
            (0..rows)
                .map(|i| {
                    SubViewSlot::new(
                        &outlet(i),
                        ViewFactory::of(|options| {
                            ItemView::new("row", options).with_template(|tree, parent, options| {
                                let text = options.data("text").unwrap_or_default();
                                tree.append(parent, Element::new("span").with_text(text));
                            })
                        }),
                    )
                    .with_options(ViewOptions::new().with_data("text", "message"))
                })
                .collect()
        })
}

fn mounted(tree: &mut Tree, rows: usize) -> ViewHandle<CompositeView> {
    let page = ViewHandle::new(list_page(rows));
    page.borrow_mut().render(tree).unwrap();
    let el = page.element().unwrap();
    let doc = tree.document();
    tree.append_child(doc, el);
    page
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    for &rows in &[16usize, 64, 256] {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_function(format!("first_render_n{rows}"), |b| {
            b.iter_batched(
                || (Tree::new(), ViewHandle::new(list_page(rows))),
                |(mut tree, page)| {
                    page.borrow_mut().render(&mut tree).unwrap();
                    black_box(page.borrow().sub_view_count());
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("rerender_live_n{rows}"), |b| {
            let mut tree = Tree::new();
            let page = mounted(&mut tree, rows);
            b.iter(|| {
                page.borrow_mut().render(&mut tree).unwrap();
                black_box(tree.live_mutations());
            });
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");
    let mut tree = Tree::new();
    let page = mounted(&mut tree, 256);
    let root = page.element().unwrap();
    for (i, row) in tree.children(root).to_vec().into_iter().enumerate() {
        let y = i as f64 * 20.0;
        tree.set_bounds(row, Rect::new(0.0, y, 320.0, y + 20.0));
    }
    let spans = Selector::parse("> .row > span");
    group.bench_function("select_all_rows_n256", |b| {
        b.iter(|| black_box(tree.select_all(root, &spans).len()));
    });
    group.bench_function("hit_test_n256", |b| {
        b.iter(|| black_box(tree.hit_test_point(Point::new(100.0, 2_550.0))));
    });
    group.finish();
}

criterion_group!(benches, bench_render, bench_queries);
criterion_main!(benches);
