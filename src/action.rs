use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,

    /// Start a new render cycle with freshly resolved configuration.
    Reload,
    ConfigChanged(PathBuf),

    Resize { cols: u16, rows: u16 },

    TogglePast,

    SelectNext,
    SelectPrev,
    SelectUp,
    SelectDown,

    ScrollUp(u16),
    ScrollDown(u16),
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,

    CopyDetailUrl,
}
