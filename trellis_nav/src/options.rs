// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller-wide defaults and transition directions.

use alloc::string::String;

use trellis_view::NavPreferences;

/// Defaults for every view a [`NavController`](crate::NavController) presents.
///
/// Each flag is combined with the view's own [`NavPreferences`]: a feature is on if either
/// side turns it on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavOptions {
    /// Hide the navigation bar.
    pub hides_nav_bar: bool,
    /// Hide the back button.
    pub hides_back_button: bool,
    /// Show the close button.
    pub shows_close_button: bool,
    /// Keep the navigation bar static during transitions.
    pub disable_nav_bar_transition: bool,
    /// Wrap the main container in a `panel`, for controllers that do not fill the screen.
    pub popup: bool,
    /// Title used when a view has none.
    pub title: Option<String>,
}

impl NavOptions {
    /// Whether the bar is hidden while `view` is current.
    pub fn hides_nav_bar(&self, view: &NavPreferences) -> bool {
        view.hides_nav_bar || self.hides_nav_bar
    }

    /// Whether the back button is hidden while `view` is current.
    pub fn hides_back_button(&self, view: &NavPreferences) -> bool {
        view.hides_back_button || self.hides_back_button
    }

    /// Whether the close button is shown while `view` is current.
    pub fn shows_close_button(&self, view: &NavPreferences) -> bool {
        view.shows_close_button || self.shows_close_button
    }

    /// Whether the bar stays static while `view` slides in or out.
    pub fn disables_nav_bar_transition(&self, view: &NavPreferences) -> bool {
        view.disable_nav_bar_transition || self.disable_nav_bar_transition
    }

    /// Title shown while `view` is current.
    pub fn title_for(&self, view: &NavPreferences) -> String {
        view.title
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_default()
    }
}

/// Direction content slides during a transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SlideDirection {
    /// Forward navigation: the inbound view is staged on the right and slides left.
    Left,
    /// Backward navigation: the inbound view is staged on the left and slides right.
    Right,
}

impl SlideDirection {
    /// Every transition class, removed before one is applied.
    pub const CLASSES: [&'static str; 2] = ["slide-left", "slide-right"];

    /// `Right` when `reverse`, `Left` otherwise.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse { Self::Right } else { Self::Left }
    }

    /// Class applied to the main container.
    pub fn class(self) -> &'static str {
        match self {
            Self::Left => "slide-left",
            Self::Right => "slide-right",
        }
    }
}
