// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Complex views: a composite view with named regions.
//!
//! A region is a single-slot mount point: an element carrying a `region` attribute, into which
//! one view at a time is shown. Regions survive re-renders. Their views are detached before the
//! composite rebuilds its content and re-attached to the fresh anchors afterwards, keeping
//! their identity and state.

use alloc::string::String;
use alloc::vec::Vec;

use trellis_tree::{NodeId, Tree};

use crate::composite::CompositeView;
use crate::error::ViewError;
use crate::events::Event;
use crate::view::{View, ViewCore, ViewHandle};

/// Attribute marking a region anchor in a template.
pub const REGION_ATTR: &str = "region";

/// A named mount point showing at most one view.
#[derive(Debug)]
pub struct Region {
    name: String,
    anchor_value: String,
    anchor: Option<NodeId>,
    current: Option<ViewHandle>,
}

impl Region {
    /// A region anchored at the element whose `region` attribute equals `anchor_value`.
    pub fn new(name: &str, anchor_value: &str) -> Self {
        Self {
            name: name.into(),
            anchor_value: anchor_value.into(),
            anchor: None,
            current: None,
        }
    }

    /// Region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved anchor element.
    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    /// The view currently shown.
    pub fn current(&self) -> Option<&ViewHandle> {
        self.current.as_ref()
    }

    /// Look the anchor up below `root` and mount the current view into it.
    pub fn resolve(&mut self, tree: &mut Tree, root: NodeId) {
        self.anchor = tree.find_by_attr(root, REGION_ATTR, &self.anchor_value);
        if self.anchor.is_none() {
            tracing::debug!(region = %self.name, "region anchor not found");
        }
        self.reattach(tree);
    }

    /// Show `view` in this region, destroying the view shown before.
    ///
    /// Showing the current view again does nothing. Before the anchor is resolved the view is
    /// rendered and kept until it can be mounted.
    pub fn show(&mut self, tree: &mut Tree, view: ViewHandle) -> Result<(), ViewError> {
        if self.current.as_ref().is_some_and(|c| c.ptr_eq(&view)) {
            return Ok(());
        }
        self.empty(tree);
        view.borrow_mut().render(tree)?;
        self.current = Some(view);
        self.reattach(tree);
        Ok(())
    }

    /// Destroy the current view.
    pub fn empty(&mut self, tree: &mut Tree) {
        if let Some(view) = self.current.take() {
            view.borrow_mut().destroy(tree);
        }
    }

    /// Take the current view's element out of the tree, keeping the view.
    pub fn detach_view(&mut self, tree: &mut Tree) {
        if let Some(el) = self.current.as_ref().and_then(ViewHandle::element) {
            tree.detach(el);
        }
        self.anchor = None;
    }

    /// Mount the current view into the anchor, showing it the first time.
    pub fn reattach(&mut self, tree: &mut Tree) {
        let (Some(anchor), Some(view)) = (self.anchor, &self.current) else {
            return;
        };
        if !tree.is_alive(anchor) {
            self.anchor = None;
            return;
        }
        let mut view = view.borrow_mut();
        let el = view.core_mut().ensure_element(tree);
        if tree.parent(el) != Some(anchor) {
            tree.free_children(anchor);
            tree.append_child(anchor, el);
        }
        if !view.core().is_shown() {
            view.show(tree);
        }
    }
}

/// The regions of one complex view, in insertion order.
#[derive(Debug, Default)]
pub struct RegionManager {
    regions: Vec<Region>,
}

impl RegionManager {
    /// No regions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region, returning a region it replaced by name.
    pub fn add(&mut self, region: Region) -> Option<Region> {
        if let Some(slot) = self.regions.iter_mut().find(|r| r.name == region.name) {
            return Some(core::mem::replace(slot, region));
        }
        self.regions.push(region);
        None
    }

    /// Empty and remove a region.
    pub fn remove(&mut self, tree: &mut Tree, name: &str) -> Option<Region> {
        let pos = self.regions.iter().position(|r| r.name == name)?;
        let mut region = self.regions.remove(pos);
        region.empty(tree);
        Some(region)
    }

    /// Look a region up by name.
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Look a region up by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.name == name)
    }

    /// Region names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions.iter().map(|r| r.name.as_str())
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Resolve every anchor below `root`.
    pub fn resolve_all(&mut self, tree: &mut Tree, root: NodeId) {
        for region in &mut self.regions {
            region.resolve(tree, root);
        }
    }

    /// Empty every region.
    pub fn destroy_regions(&mut self, tree: &mut Tree) {
        for region in &mut self.regions {
            region.empty(tree);
        }
    }

    /// Detach every region's view ahead of a re-render.
    pub fn detach_all(&mut self, tree: &mut Tree) {
        for region in &mut self.regions {
            region.detach_view(tree);
        }
    }
}

/// A composite view with named regions.
#[derive(Debug)]
pub struct ComplexView {
    composite: CompositeView,
    definitions: Vec<(String, String)>,
    regions: RegionManager,
}

impl ComplexView {
    /// Wrap a composite view.
    pub fn new(composite: CompositeView) -> Self {
        Self {
            composite,
            definitions: Vec::new(),
            regions: RegionManager::new(),
        }
    }

    /// Declare a region anchored at `region="<anchor>"`.
    pub fn with_region(mut self, name: &str, anchor: &str) -> Self {
        self.define(name, anchor);
        self.regions.add(Region::new(name, anchor));
        self
    }

    fn define(&mut self, name: &str, anchor: &str) {
        self.definitions.retain(|(n, _)| n != name);
        self.definitions.push((name.into(), anchor.into()));
    }

    fn rebuild_regions(&mut self) {
        self.regions = RegionManager::new();
        for (name, anchor) in &self.definitions {
            self.regions.add(Region::new(name, anchor));
        }
    }

    /// The wrapped composite view.
    pub fn composite(&self) -> &CompositeView {
        &self.composite
    }

    /// The wrapped composite view.
    pub fn composite_mut(&mut self) -> &mut CompositeView {
        &mut self.composite
    }

    /// All regions.
    pub fn regions(&self) -> &RegionManager {
        &self.regions
    }

    /// Look a region up by name.
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// Add one region at runtime. It is not re-created after a destroy.
    pub fn add_region(&mut self, tree: &mut Tree, name: &str, anchor: &str) {
        let mut region = Region::new(name, anchor);
        if self.composite.core().is_rendered()
            && let Some(root) = self.composite.core().element()
        {
            region.resolve(tree, root);
        }
        if let Some(mut previous) = self.regions.add(region) {
            previous.empty(tree);
        }
        let event = Event::new("add:region", self.composite.core().id()).with_detail(name);
        self.composite.core().trigger_event(tree, &event);
    }

    /// Add several regions and keep them as definitions.
    pub fn add_regions(&mut self, tree: &mut Tree, regions: &[(&str, &str)]) {
        for (name, anchor) in regions {
            self.define(name, anchor);
            self.add_region(tree, name, anchor);
        }
    }

    /// Empty and remove a region. Returns false if there was none.
    pub fn remove_region(&mut self, tree: &mut Tree, name: &str) -> bool {
        self.definitions.retain(|(n, _)| n != name);
        if self.regions.remove(tree, name).is_none() {
            return false;
        }
        let event = Event::new("remove:region", self.composite.core().id()).with_detail(name);
        self.composite.core().trigger_event(tree, &event);
        true
    }

    /// Show `view` in the region `name`.
    pub fn show_in_region(
        &mut self,
        tree: &mut Tree,
        name: &str,
        view: ViewHandle,
    ) -> Result<(), ViewError> {
        let region = self
            .regions
            .get_mut(name)
            .ok_or_else(|| ViewError::UnknownRegion { name: name.into() })?;
        region.show(tree, view)
    }
}

impl View for ComplexView {
    fn core(&self) -> &ViewCore {
        self.composite.core()
    }

    fn core_mut(&mut self) -> &mut ViewCore {
        self.composite.core_mut()
    }

    fn render(&mut self, tree: &mut Tree) -> Result<(), ViewError> {
        let (destroyed, rendered) = {
            let core = self.composite.core();
            (core.is_destroyed(), core.is_rendered())
        };
        if destroyed {
            self.rebuild_regions();
        } else if rendered {
            self.regions.detach_all(tree);
        }
        self.composite.render(tree)?;
        if let Some(root) = self.composite.core().element() {
            self.regions.resolve_all(tree, root);
        }
        Ok(())
    }

    fn on_show(&mut self, tree: &mut Tree) {
        self.composite.on_show(tree);
    }

    fn on_destroy(&mut self, tree: &mut Tree) {
        self.regions.destroy_regions(tree);
        self.composite.on_destroy(tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ItemView, ViewOptions};
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use trellis_tree::Element;

    fn layout() -> ViewHandle<ComplexView> {
        let composite = CompositeView::new("layout", ViewOptions::new()).with_template(
            |tree, parent, _| {
                tree.append(parent, Element::div().with_attr(REGION_ATTR, "main"));
                tree.append(parent, Element::div().with_attr(REGION_ATTR, "side"));
            },
        );
        ViewHandle::new(
            ComplexView::new(composite)
                .with_region("main", "main")
                .with_region("aside", "side"),
        )
    }

    fn item(class: &str) -> ViewHandle {
        ViewHandle::new(ItemView::new(class, ViewOptions::new())).to_dyn()
    }

    #[test]
    fn show_in_region_mounts_into_the_anchor() {
        let mut tree = Tree::new();
        let view = layout();
        view.borrow_mut().render(&mut tree).unwrap();
        let content = item("content");
        view.borrow_mut()
            .show_in_region(&mut tree, "main", content.clone())
            .unwrap();

        let anchor = view.borrow().region("main").unwrap().anchor().unwrap();
        assert_eq!(tree.attr(anchor, REGION_ATTR), Some("main"));
        assert_eq!(tree.children(anchor), [content.element().unwrap()]);
        assert!(content.borrow().core().is_shown());
    }

    #[test]
    fn rerender_keeps_region_views() {
        let mut tree = Tree::new();
        let view = layout();
        view.borrow_mut().render(&mut tree).unwrap();
        let content = item("content");
        view.borrow_mut()
            .show_in_region(&mut tree, "aside", content.clone())
            .unwrap();
        let old_anchor = view.borrow().region("aside").unwrap().anchor().unwrap();

        view.borrow_mut().render(&mut tree).unwrap();
        let region_anchor = view.borrow().region("aside").unwrap().anchor().unwrap();
        assert!(!tree.is_alive(old_anchor));
        assert!(!content.is_destroyed());
        assert_eq!(tree.parent(content.element().unwrap()), Some(region_anchor));
        assert!(
            view.borrow()
                .region("aside")
                .unwrap()
                .current()
                .unwrap()
                .ptr_eq(&content)
        );
    }

    #[test]
    fn views_shown_before_render_mount_on_render() {
        let mut tree = Tree::new();
        let view = layout();
        let content = item("early");
        view.borrow_mut()
            .show_in_region(&mut tree, "main", content.clone())
            .unwrap();
        assert!(!content.borrow().core().is_shown());

        view.borrow_mut().render(&mut tree).unwrap();
        let anchor = view.borrow().region("main").unwrap().anchor().unwrap();
        assert_eq!(tree.parent(content.element().unwrap()), Some(anchor));
        assert!(content.borrow().core().is_shown());
    }

    #[test]
    fn replacing_a_region_view_destroys_the_old_one() {
        let mut tree = Tree::new();
        let view = layout();
        view.borrow_mut().render(&mut tree).unwrap();
        let first = item("first");
        let second = item("second");
        let mut layout = view.borrow_mut();
        layout.show_in_region(&mut tree, "main", first.clone()).unwrap();
        // Same view again: nothing happens.
        layout.show_in_region(&mut tree, "main", first.clone()).unwrap();
        assert!(!first.is_destroyed());

        layout.show_in_region(&mut tree, "main", second.clone()).unwrap();
        assert!(first.is_destroyed());
        let anchor = layout.region("main").unwrap().anchor().unwrap();
        assert_eq!(tree.children(anchor), [second.element().unwrap()]);
    }

    #[test]
    fn unknown_region_is_an_error() {
        let mut tree = Tree::new();
        let view = layout();
        let err = view
            .borrow_mut()
            .show_in_region(&mut tree, "footer", item("x"))
            .unwrap_err();
        assert_eq!(
            err,
            ViewError::UnknownRegion {
                name: "footer".into()
            }
        );
    }

    #[test]
    fn adding_and_removing_regions_emits_events() {
        let mut tree = Tree::new();
        let view = layout();
        view.borrow_mut().render(&mut tree).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        view.borrow().core().emitter().on_all(move |_, e| {
            s.borrow_mut()
                .push((e.name.clone(), e.detail.clone().unwrap_or_default()));
        });

        let mut layout = view.borrow_mut();
        layout.add_regions(&mut tree, &[("extra", "side")]);
        assert!(layout.region("extra").unwrap().anchor().is_some());
        let content = item("content");
        layout
            .show_in_region(&mut tree, "extra", content.clone())
            .unwrap();
        assert!(layout.remove_region(&mut tree, "extra"));
        assert!(!layout.remove_region(&mut tree, "extra"));
        assert!(content.is_destroyed());
        assert_eq!(
            *seen.borrow(),
            [
                (String::from("add:region"), String::from("extra")),
                (String::from("remove:region"), String::from("extra")),
            ]
        );
    }

    #[test]
    fn render_after_destroy_reinitializes_regions() {
        let mut tree = Tree::new();
        let view = layout();
        view.borrow_mut().render(&mut tree).unwrap();
        let content = item("content");
        view.borrow_mut()
            .show_in_region(&mut tree, "main", content.clone())
            .unwrap();
        view.borrow_mut().add_region(&mut tree, "temporary", "side");

        view.borrow_mut().destroy(&mut tree);
        assert!(content.is_destroyed());

        view.borrow_mut().render(&mut tree).unwrap();
        let layout = view.borrow();
        let names: Vec<_> = layout.regions().names().collect();
        assert_eq!(names, ["main", "aside"]);
        let main = layout.region("main").unwrap();
        assert!(main.current().is_none());
        assert!(main.anchor().is_some());
    }
}
