//! Breakpoint-driven column counts for the event grids.

use crate::config::CardsPerRow;

/// Narrowest viewport, in pixels, that uses the tablet column count.
pub const TABLET_MIN_WIDTH: u32 = 768;
/// Narrowest viewport, in pixels, that uses the desktop column count.
pub const DESKTOP_MIN_WIDTH: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub fn for_width(width: u32) -> Self {
        if width < TABLET_MIN_WIDTH {
            Breakpoint::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
        }
    }
}

/// Configured column count for a viewport width in pixels.
pub fn columns_for(width: u32, cards: &CardsPerRow) -> u16 {
    match Breakpoint::for_width(width) {
        Breakpoint::Mobile => cards.mobile,
        Breakpoint::Tablet => cards.tablet,
        Breakpoint::Desktop => cards.desktop,
    }
}

/// Terminal width expressed in approximate pixels.
pub fn viewport_width(terminal_cols: u16, cell_width_px: u16) -> u32 {
    u32::from(terminal_cols) * u32::from(cell_width_px.max(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grid {
    Upcoming,
    Past,
}

/// Last-applied column count per grid. The past grid only exists when past
/// events are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    upcoming: u16,
    past: Option<u16>,
    breakpoint: Breakpoint,
}

impl GridLayout {
    /// Layout before the first `apply`, sized for the desktop default.
    pub fn new(cards: &CardsPerRow, past_enabled: bool) -> Self {
        Self {
            upcoming: cards.desktop,
            past: past_enabled.then_some(cards.desktop),
            breakpoint: Breakpoint::Desktop,
        }
    }

    /// Recomputes the column count for `width` and writes it to every active
    /// grid. Returns whether anything changed; applying the same width twice
    /// is a no-op.
    pub fn apply(&mut self, width: u32, cards: &CardsPerRow) -> bool {
        let columns = columns_for(width, cards);
        let breakpoint = Breakpoint::for_width(width);
        let changed = self.upcoming != columns
            || self.past.is_some_and(|past| past != columns)
            || self.breakpoint != breakpoint;

        self.upcoming = columns;
        if let Some(past) = self.past.as_mut() {
            *past = columns;
        }
        self.breakpoint = breakpoint;

        if changed {
            tracing::debug!(
                width,
                columns,
                breakpoint = breakpoint.as_str(),
                "Grid layout changed"
            );
        }
        changed
    }

    /// Columns to lay out for `grid`, never less than one. `None` when the
    /// grid does not exist.
    pub fn columns(&self, grid: Grid) -> Option<u16> {
        match grid {
            Grid::Upcoming => Some(self.upcoming.max(1)),
            Grid::Past => self.past.map(|c| c.max(1)),
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cards() -> CardsPerRow {
        CardsPerRow {
            desktop: 4,
            tablet: 3,
            mobile: 1,
        }
    }

    #[rstest]
    #[case(0, 1)]
    #[case(767, 1)]
    #[case(768, 3)]
    #[case(1023, 3)]
    #[case(1024, 4)]
    #[case(2560, 4)]
    fn test_columns_for_breakpoints(#[case] width: u32, #[case] expected: u16) {
        assert_eq!(columns_for(width, &cards()), expected);
    }

    #[test]
    fn test_viewport_width_from_terminal() {
        assert_eq!(viewport_width(96, 8), 768);
        assert_eq!(viewport_width(95, 8), 760);
        assert_eq!(viewport_width(80, 0), 80);
    }

    #[test]
    fn test_apply_updates_both_grids() {
        let mut layout = GridLayout::new(&cards(), true);
        assert!(layout.apply(800, &cards()));
        assert_eq!(layout.columns(Grid::Upcoming), Some(3));
        assert_eq!(layout.columns(Grid::Past), Some(3));
        assert_eq!(layout.breakpoint(), Breakpoint::Tablet);

        assert!(layout.apply(500, &cards()));
        assert_eq!(layout.columns(Grid::Upcoming), Some(1));
        assert_eq!(layout.columns(Grid::Past), Some(1));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut layout = GridLayout::new(&cards(), true);
        layout.apply(1100, &cards());
        let snapshot = layout.clone();
        assert!(!layout.apply(1100, &cards()));
        assert_eq!(layout, snapshot);
    }

    #[test]
    fn test_past_grid_absent_when_disabled() {
        let mut layout = GridLayout::new(&cards(), false);
        layout.apply(300, &cards());
        assert_eq!(layout.columns(Grid::Upcoming), Some(1));
        assert_eq!(layout.columns(Grid::Past), None);
    }

    #[test]
    fn test_zero_columns_lay_out_as_one() {
        let zero = CardsPerRow {
            desktop: 0,
            tablet: 0,
            mobile: 0,
        };
        let mut layout = GridLayout::new(&zero, true);
        layout.apply(1200, &zero);
        assert_eq!(layout.columns(Grid::Upcoming), Some(1));
    }
}
