// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class composition shared by every control.
//!
//! A control has a base class (`genericButton` for buttons) that a slot may replace through
//! [`ViewOptions::control_class`]. Extra classes from [`ViewOptions::class`] follow the base
//! class, without repeats.

use alloc::string::String;

use trellis_tree::{NodeId, Tree};
use trellis_view::{ViewCore, ViewOptions};

/// Class added to a control that ignores input.
pub const DISABLED_CLASS: &str = "disabled";

/// Class added while a control renders as pressed.
pub const PRESSED_CLASS: &str = "pressed";

/// Class added to hidden parts of a control.
pub const HIDDEN_CLASS: &str = "hidden";

/// The base class of a control: the override from `options`, or `default`.
pub fn control_class_name<'a>(default: &'a str, options: &'a ViewOptions) -> &'a str {
    options
        .control_class
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(default)
}

/// A view core whose element carries the composed control classes.
pub fn control_core(default: &str, options: ViewOptions) -> ViewCore {
    let class_name = String::from(control_class_name(default, &options));
    ViewCore::new(&class_name, options)
}

pub(crate) fn set_class(tree: &mut Tree, el: NodeId, class: &str, on: bool) {
    if on {
        tree.update_classes(el, &[], &[class]);
    } else {
        tree.remove_class(el, class);
    }
}

// Hidden parts carry the class and are skipped by hit testing.
pub(crate) fn set_hidden(tree: &mut Tree, el: NodeId, hidden: bool) {
    set_class(tree, el, HIDDEN_CLASS, hidden);
    tree.set_displayed(el, !hidden);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_classes_follow_the_control_class() {
        let options = ViewOptions::new().with_class("back small genericButton");
        let core = control_core("genericButton", options);
        assert_eq!(core.class_list(), ["genericButton", "back", "small"]);
    }

    #[test]
    fn slots_can_replace_the_control_class() {
        let mut options = ViewOptions::new().with_outlet("ok").with_class("wide");
        options.control_class = Some(String::from("flatButton"));
        assert_eq!(control_class_name("genericButton", &options), "flatButton");
        let core = control_core("genericButton", options);
        assert_eq!(core.class_list(), ["ok", "flatButton", "wide"]);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut options = ViewOptions::new();
        options.control_class = Some(String::from("  "));
        assert_eq!(control_class_name("genericButton", &options), "genericButton");
    }
}
