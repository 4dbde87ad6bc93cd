//! Visibility of the past-events section.

use crate::config::{Buttons, EventsConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PastVisibility {
    Hidden,
    Shown,
}

/// Side effect the board performs after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEffect {
    ScrollIntoView,
    None,
}

/// Two-state toggle for the past section. Only built when past events are
/// enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastToggle {
    visibility: PastVisibility,
}

impl PastToggle {
    pub fn new(show_by_default: bool) -> Self {
        let visibility = if show_by_default {
            PastVisibility::Shown
        } else {
            PastVisibility::Hidden
        };
        Self { visibility }
    }

    /// `None` when the config disables the past section entirely.
    pub fn for_config(config: &EventsConfig) -> Option<Self> {
        config
            .enable_past_events
            .then(|| Self::new(config.show_past_by_default))
    }

    pub fn visibility(&self) -> PastVisibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == PastVisibility::Shown
    }

    /// Flips the state. Revealing the section asks for it to be scrolled
    /// into view; hiding it does not.
    pub fn toggle(self) -> (Self, ToggleEffect) {
        match self.visibility {
            PastVisibility::Hidden => (
                Self {
                    visibility: PastVisibility::Shown,
                },
                ToggleEffect::ScrollIntoView,
            ),
            PastVisibility::Shown => (
                Self {
                    visibility: PastVisibility::Hidden,
                },
                ToggleEffect::None,
            ),
        }
    }

    /// Button text: offers to hide when shown, to show when hidden.
    pub fn label<'a>(&self, buttons: &'a Buttons) -> &'a str {
        match self.visibility {
            PastVisibility::Shown => &buttons.hide_past,
            PastVisibility::Hidden => &buttons.show_past,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_follows_config() {
        assert_eq!(PastToggle::new(false).visibility(), PastVisibility::Hidden);
        assert_eq!(PastToggle::new(true).visibility(), PastVisibility::Shown);
    }

    #[test]
    fn test_click_sequence_and_labels() {
        let buttons = Buttons {
            show_past: "More".to_string(),
            hide_past: "Less".to_string(),
            ..Default::default()
        };

        let toggle = PastToggle::new(false);
        assert_eq!(toggle.label(&buttons), "More");

        let (toggle, effect) = toggle.toggle();
        assert!(toggle.is_shown());
        assert_eq!(effect, ToggleEffect::ScrollIntoView);
        assert_eq!(toggle.label(&buttons), "Less");

        let (toggle, effect) = toggle.toggle();
        assert_eq!(toggle.visibility(), PastVisibility::Hidden);
        assert_eq!(effect, ToggleEffect::None);
        assert_eq!(toggle.label(&buttons), "More");
    }

    #[test]
    fn test_no_toggle_when_past_disabled() {
        let config = EventsConfig {
            enable_past_events: false,
            show_past_by_default: true,
            ..Default::default()
        };
        assert!(PastToggle::for_config(&config).is_none());

        let shown = EventsConfig {
            show_past_by_default: true,
            ..Default::default()
        };
        assert!(PastToggle::for_config(&shown).unwrap().is_shown());
    }
}
