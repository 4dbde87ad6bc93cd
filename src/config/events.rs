//! Event board configuration and the defaults → override merge.
//!
//! A render cycle never sees a partially merged value: callers hand a
//! [`ConfigOverride`] to [`resolve`] and get back a complete, owned
//! [`EventsConfig`]. The defaults passed in are borrowed and never touched.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str =
    "https://api-staging.flite.city/api/geteventsbyhost/sway-hospitality";
pub const DEFAULT_DETAIL_URL_PATTERN: &str = "https://flite.city/e/{slug}";
pub const DEFAULT_CONTAINER_ID: &str = "events-section";

/// Placeholder substituted with the event slug in the detail URL pattern.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

/// Fully resolved configuration for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    pub api_endpoint: String,
    pub event_detail_url_pattern: String,
    pub container_id: String,
    pub show_past_by_default: bool,
    pub enable_past_events: bool,
    pub cards_per_row: CardsPerRow,
    pub headings: Headings,
    pub buttons: Buttons,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            event_detail_url_pattern: DEFAULT_DETAIL_URL_PATTERN.to_string(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            show_past_by_default: false,
            enable_past_events: true,
            cards_per_row: CardsPerRow::default(),
            headings: Headings::default(),
            buttons: Buttons::default(),
        }
    }
}

impl EventsConfig {
    /// Builds the detail link for an event. Only the first placeholder is
    /// replaced and the slug is inserted verbatim.
    pub fn detail_url(&self, slug: &str) -> String {
        self.event_detail_url_pattern.replacen(SLUG_PLACEHOLDER, slug, 1)
    }
}

/// Column counts per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardsPerRow {
    pub desktop: u16,
    pub tablet: u16,
    pub mobile: u16,
}

impl Default for CardsPerRow {
    fn default() -> Self {
        Self {
            desktop: 3,
            tablet: 2,
            mobile: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub upcoming: String,
    pub past: String,
    pub no_upcoming: String,
    pub no_past: String,
    pub no_events: String,
    pub error: String,
}

impl Default for Headings {
    fn default() -> Self {
        Self {
            upcoming: "Upcoming Events".to_string(),
            past: "Past Events".to_string(),
            no_upcoming: "No upcoming events found.".to_string(),
            no_past: "No past events found.".to_string(),
            no_events: "No events found.".to_string(),
            error: "Unable to load events at this time. Please try again later.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buttons {
    pub show_past: String,
    pub hide_past: String,
    pub view_details: String,
    pub view_history: String,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            show_past: "Show Past Events".to_string(),
            hide_past: "Hide Past Events".to_string(),
            view_details: "View Details".to_string(),
            view_history: "View Event".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overrides
// ─────────────────────────────────────────────────────────────────────────────

/// Caller-supplied configuration. Every field is optional, including the
/// fields of the nested tables; unknown keys are ignored on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_detail_url_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_past_by_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_past_events: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards_per_row: Option<CardsPerRowOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<HeadingsOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<ButtonsOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardsPerRowOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_upcoming: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_past: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_events: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_past: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_past: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_history: Option<String>,
}

impl ConfigOverride {
    /// Stacks `upper` on top of `self`. Fields set in `upper` win, nested
    /// tables are combined field by field.
    pub fn layer(self, upper: ConfigOverride) -> ConfigOverride {
        ConfigOverride {
            api_endpoint: upper.api_endpoint.or(self.api_endpoint),
            event_detail_url_pattern: upper
                .event_detail_url_pattern
                .or(self.event_detail_url_pattern),
            cards_per_row: layer_nested(self.cards_per_row, upper.cards_per_row, |lo, hi| {
                CardsPerRowOverride {
                    desktop: hi.desktop.or(lo.desktop),
                    tablet: hi.tablet.or(lo.tablet),
                    mobile: hi.mobile.or(lo.mobile),
                }
            }),
            headings: layer_nested(self.headings, upper.headings, |lo, hi| HeadingsOverride {
                upcoming: hi.upcoming.or(lo.upcoming),
                past: hi.past.or(lo.past),
                no_upcoming: hi.no_upcoming.or(lo.no_upcoming),
                no_past: hi.no_past.or(lo.no_past),
                no_events: hi.no_events.or(lo.no_events),
                error: hi.error.or(lo.error),
            }),
            buttons: layer_nested(self.buttons, upper.buttons, |lo, hi| ButtonsOverride {
                show_past: hi.show_past.or(lo.show_past),
                hide_past: hi.hide_past.or(lo.hide_past),
                view_details: hi.view_details.or(lo.view_details),
                view_history: hi.view_history.or(lo.view_history),
            }),
            container_id: upper.container_id.or(self.container_id),
            show_past_by_default: upper.show_past_by_default.or(self.show_past_by_default),
            enable_past_events: upper.enable_past_events.or(self.enable_past_events),
        }
    }
}

fn layer_nested<T>(
    lower: Option<T>,
    upper: Option<T>,
    combine: impl FnOnce(T, T) -> T,
) -> Option<T> {
    match (lower, upper) {
        (Some(lo), Some(hi)) => Some(combine(lo, hi)),
        (lo, hi) => hi.or(lo),
    }
}

/// Merges caller overrides into a copy of `defaults`.
///
/// Top-level fields present in `overrides` replace the default. The nested
/// tables (`cards_per_row`, `headings`, `buttons`) are merged per field, so an
/// override carrying only `cards_per_row.mobile` keeps the default desktop and
/// tablet counts.
pub fn resolve(defaults: &EventsConfig, overrides: &ConfigOverride) -> EventsConfig {
    let mut config = defaults.clone();

    if let Some(endpoint) = &overrides.api_endpoint {
        config.api_endpoint = endpoint.clone();
    }
    if let Some(pattern) = &overrides.event_detail_url_pattern {
        config.event_detail_url_pattern = pattern.clone();
    }
    if let Some(id) = &overrides.container_id {
        config.container_id = id.clone();
    }
    if let Some(show) = overrides.show_past_by_default {
        config.show_past_by_default = show;
    }
    if let Some(enable) = overrides.enable_past_events {
        config.enable_past_events = enable;
    }

    if let Some(cards) = &overrides.cards_per_row {
        let base = &defaults.cards_per_row;
        config.cards_per_row = CardsPerRow {
            desktop: cards.desktop.unwrap_or(base.desktop),
            tablet: cards.tablet.unwrap_or(base.tablet),
            mobile: cards.mobile.unwrap_or(base.mobile),
        };
    }

    if let Some(headings) = &overrides.headings {
        let base = &defaults.headings;
        config.headings = Headings {
            upcoming: pick(&headings.upcoming, &base.upcoming),
            past: pick(&headings.past, &base.past),
            no_upcoming: pick(&headings.no_upcoming, &base.no_upcoming),
            no_past: pick(&headings.no_past, &base.no_past),
            no_events: pick(&headings.no_events, &base.no_events),
            error: pick(&headings.error, &base.error),
        };
    }

    if let Some(buttons) = &overrides.buttons {
        let base = &defaults.buttons;
        config.buttons = Buttons {
            show_past: pick(&buttons.show_past, &base.show_past),
            hide_past: pick(&buttons.hide_past, &base.hide_past),
            view_details: pick(&buttons.view_details, &base.view_details),
            view_history: pick(&buttons.view_history, &base.view_history),
        };
    }

    config
}

fn pick(value: &Option<String>, fallback: &str) -> String {
    value.clone().unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_override_yields_defaults() {
        let defaults = EventsConfig::default();
        assert_eq!(resolve(&defaults, &ConfigOverride::default()), defaults);
    }

    #[test]
    fn test_nested_cards_override_keeps_other_fields() {
        let overrides = ConfigOverride {
            cards_per_row: Some(CardsPerRowOverride {
                mobile: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = resolve(&EventsConfig::default(), &overrides);
        assert_eq!(
            config.cards_per_row,
            CardsPerRow {
                desktop: 3,
                tablet: 2,
                mobile: 2,
            }
        );
    }

    #[test]
    fn test_nested_headings_and_buttons_override() {
        let overrides = ConfigOverride {
            headings: Some(HeadingsOverride {
                error: Some("Feed is down".to_string()),
                ..Default::default()
            }),
            buttons: Some(ButtonsOverride {
                hide_past: Some("Collapse".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = resolve(&EventsConfig::default(), &overrides);
        assert_eq!(config.headings.error, "Feed is down");
        assert_eq!(config.headings.upcoming, "Upcoming Events");
        assert_eq!(config.headings.no_past, "No past events found.");
        assert_eq!(config.buttons.hide_past, "Collapse");
        assert_eq!(config.buttons.show_past, "Show Past Events");
    }

    #[test]
    fn test_top_level_override_replaces_default() {
        let overrides = ConfigOverride {
            api_endpoint: Some("https://example.test/feed".to_string()),
            show_past_by_default: Some(true),
            enable_past_events: Some(false),
            ..Default::default()
        };

        let config = resolve(&EventsConfig::default(), &overrides);
        assert_eq!(config.api_endpoint, "https://example.test/feed");
        assert!(config.show_past_by_default);
        assert!(!config.enable_past_events);
        assert_eq!(config.container_id, DEFAULT_CONTAINER_ID);
    }

    #[test]
    fn test_resolve_does_not_touch_defaults() {
        let defaults = EventsConfig::default();
        let overrides = ConfigOverride {
            container_id: Some("other".to_string()),
            ..Default::default()
        };
        let _ = resolve(&defaults, &overrides);
        assert_eq!(defaults, EventsConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored_in_toml() {
        let overrides: ConfigOverride = toml::from_str(
            r#"
            container_id = "board"
            mystery = 42

            [cards_per_row]
            tablet = 4
            "#,
        )
        .unwrap();

        let config = resolve(&EventsConfig::default(), &overrides);
        assert_eq!(config.container_id, "board");
        assert_eq!(config.cards_per_row.tablet, 4);
        assert_eq!(config.cards_per_row.desktop, 3);
    }

    #[test]
    fn test_layer_combines_nested_fields() {
        let file = ConfigOverride {
            api_endpoint: Some("https://file.test".to_string()),
            cards_per_row: Some(CardsPerRowOverride {
                desktop: Some(4),
                mobile: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        };
        let cli = ConfigOverride {
            cards_per_row: Some(CardsPerRowOverride {
                mobile: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };

        let layered = file.layer(cli);
        assert_eq!(layered.api_endpoint.as_deref(), Some("https://file.test"));
        assert_eq!(
            layered.cards_per_row,
            Some(CardsPerRowOverride {
                desktop: Some(4),
                tablet: None,
                mobile: Some(1),
            })
        );
    }

    #[test]
    fn test_detail_url_replaces_first_placeholder() {
        let config = EventsConfig {
            event_detail_url_pattern: "https://x.test/{slug}?ref={slug}".to_string(),
            ..Default::default()
        };
        assert_eq!(config.detail_url("jazz-night"), "https://x.test/jazz-night?ref={slug}");
        assert_eq!(
            EventsConfig::default().detail_url("a b"),
            "https://flite.city/e/a b"
        );
    }
}
