use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FliteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal initialization failed: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error(transparent)]
    Feed(#[from] crate::feed::FeedError),

    #[error("Event channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, FliteError>;
