use std::path::PathBuf;

use clap::Parser;

use crate::config::{ButtonsOverride, CardsPerRowOverride, ConfigOverride, HeadingsOverride};

/// flite-events: upcoming and past events from a Flite host feed, in the terminal
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "flite-events")]
#[command(version)]
#[command(about = "Browse a Flite host's upcoming and past events", long_about = None)]
pub struct Cli {
    /// Events feed endpoint
    #[arg(long, value_name = "URL")]
    pub api: Option<String>,

    /// Detail link pattern; the first `{slug}` is replaced by the event slug
    #[arg(long, value_name = "PATTERN")]
    pub detail_url: Option<String>,

    /// Board identifier shown in the title bar
    #[arg(long, value_name = "ID")]
    pub container_id: Option<String>,

    /// Cards per row at widths of 1024px and up
    #[arg(long, value_name = "N")]
    pub cards_desktop: Option<u16>,

    /// Cards per row between 768px and 1023px
    #[arg(long, value_name = "N")]
    pub cards_tablet: Option<u16>,

    /// Cards per row below 768px
    #[arg(long, value_name = "N")]
    pub cards_mobile: Option<u16>,

    /// Reveal past events on load. Only the literal value `true` enables it.
    #[arg(long, value_name = "BOOL")]
    pub show_past: Option<String>,

    /// Show the past events section at all. Only the literal value `false`
    /// disables it.
    #[arg(long, value_name = "BOOL")]
    pub past_events: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub upcoming_heading: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub past_heading: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub no_upcoming_text: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub no_past_text: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub no_events_text: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub error_text: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub show_past_text: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub hide_past_text: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub view_details_text: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub view_history_text: Option<String>,

    /// Read config.toml and events.toml from this directory
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Defaults to config.toml.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Fetch once, print the board to stdout and exit
    #[arg(long, default_value_t = false)]
    pub print: bool,

    /// Write default config files and exit
    #[arg(long, default_value_t = false)]
    pub init_config: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Board overrides given on the command line. Each flag maps onto one
    /// field; nested tables are only present when one of their flags is.
    pub fn to_override(&self) -> ConfigOverride {
        let cards = CardsPerRowOverride {
            desktop: self.cards_desktop,
            tablet: self.cards_tablet,
            mobile: self.cards_mobile,
        };
        let headings = HeadingsOverride {
            upcoming: self.upcoming_heading.clone(),
            past: self.past_heading.clone(),
            no_upcoming: self.no_upcoming_text.clone(),
            no_past: self.no_past_text.clone(),
            no_events: self.no_events_text.clone(),
            error: self.error_text.clone(),
        };
        let buttons = ButtonsOverride {
            show_past: self.show_past_text.clone(),
            hide_past: self.hide_past_text.clone(),
            view_details: self.view_details_text.clone(),
            view_history: self.view_history_text.clone(),
        };

        ConfigOverride {
            api_endpoint: self.api.clone(),
            event_detail_url_pattern: self.detail_url.clone(),
            container_id: self.container_id.clone(),
            show_past_by_default: self.show_past.as_deref().map(|v| v == "true"),
            enable_past_events: self.past_events.as_deref().map(|v| v != "false"),
            cards_per_row: non_empty(cards),
            headings: non_empty(headings),
            buttons: non_empty(buttons),
        }
    }
}

fn non_empty<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["flite-events"]);
        assert!(!cli.print);
        assert!(!cli.init_config);
        assert!(cli.config_dir.is_none());
        assert!(cli.log_level.is_none());
        assert_eq!(cli.to_override(), ConfigOverride::default());
    }

    #[test]
    fn test_single_nested_flag() {
        let cli = Cli::parse_from(["flite-events", "--cards-mobile", "2"]);
        let overrides = cli.to_override();
        assert_eq!(
            overrides.cards_per_row,
            Some(CardsPerRowOverride {
                mobile: Some(2),
                ..Default::default()
            })
        );
        assert!(overrides.headings.is_none());
        assert!(overrides.buttons.is_none());
    }

    #[test]
    fn test_show_past_only_true_enables() {
        let on = Cli::parse_from(["flite-events", "--show-past", "true"]);
        assert_eq!(on.to_override().show_past_by_default, Some(true));

        let other = Cli::parse_from(["flite-events", "--show-past", "yes"]);
        assert_eq!(other.to_override().show_past_by_default, Some(false));
    }

    #[test]
    fn test_past_events_only_false_disables() {
        let off = Cli::parse_from(["flite-events", "--past-events", "false"]);
        assert_eq!(off.to_override().enable_past_events, Some(false));

        let other = Cli::parse_from(["flite-events", "--past-events", "no"]);
        assert_eq!(other.to_override().enable_past_events, Some(true));
    }

    #[test]
    fn test_text_flags() {
        let cli = Cli::parse_from([
            "flite-events",
            "--api",
            "https://example.test/feed",
            "--error-text",
            "Feed is down",
            "--hide-past-text",
            "Collapse",
        ]);
        let overrides = cli.to_override();
        assert_eq!(overrides.api_endpoint.as_deref(), Some("https://example.test/feed"));
        assert_eq!(overrides.headings.unwrap().error.as_deref(), Some("Feed is down"));
        assert_eq!(overrides.buttons.unwrap().hide_past.as_deref(), Some("Collapse"));
    }

    #[test]
    fn test_mode_flags() {
        let cli = Cli::parse_from(["flite-events", "--print", "--config-dir", "/tmp/flite"]);
        assert!(cli.print);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/flite")));
    }
}
