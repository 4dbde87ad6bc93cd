// Feed retrieval and classification

pub mod classify;
pub mod client;
pub mod dispatch;
pub mod types;

pub use classify::{classify, Classification, FeedOutcome};
pub use client::{FeedClient, FeedError};
pub use dispatch::{FeedDispatcher, FeedEvent};
pub use types::EventRecord;
