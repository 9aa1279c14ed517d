// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities that change how views behave.

/// Host capabilities, fixed for the lifetime of the views that read them.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Platform {
    /// The host delivers transition-end notifications for sliding containers.
    ///
    /// Without them, transition completion is driven from a frame callback.
    pub transition_events: bool,
    /// The host delivers touch events rather than mouse events.
    pub touch_input: bool,
}

impl Platform {
    /// Detect capabilities from a user-agent string and the host's touch support.
    ///
    /// Transition events are assumed for WebKit-based agents only.
    pub fn from_user_agent(user_agent: &str, touch_input: bool) -> Self {
        let transition_events = user_agent
            .as_bytes()
            .windows(6)
            .any(|w| w.eq_ignore_ascii_case(b"webkit"));
        Self {
            transition_events,
            touch_input,
        }
    }

    /// Set `transition_events`.
    pub fn with_transition_events(mut self, enabled: bool) -> Self {
        self.transition_events = enabled;
        self
    }

    /// Set `touch_input`.
    pub fn with_touch_input(mut self, enabled: bool) -> Self {
        self.touch_input = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webkit_agents_get_transition_events() {
        let safari = Platform::from_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15",
            true,
        );
        assert!(safari.transition_events);
        assert!(safari.touch_input);

        let gecko = Platform::from_user_agent("Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101", false);
        assert!(!gecko.transition_events);
        assert_eq!(Platform::default(), gecko);
    }
}
