use tokio::sync::mpsc;

use super::classify::FeedOutcome;
use super::client::{FeedClient, FeedError};
use crate::config::EventsConfig;

/// Completion of a render cycle's fetch.
#[derive(Debug, Clone)]
pub struct FeedEvent {
    pub generation: u64,
    pub result: Result<FeedOutcome, FeedError>,
}

/// Starts fetches on the tokio runtime and hands results back to the UI
/// loop over a channel. Every start bumps the generation, so the loop can
/// tell the latest cycle apart from ones that were superseded while in
/// flight.
pub struct FeedDispatcher {
    client: FeedClient,
    generation: u64,
    event_tx: mpsc::UnboundedSender<FeedEvent>,
    event_rx: Option<mpsc::UnboundedReceiver<FeedEvent>>,
}

impl FeedDispatcher {
    pub fn new(client: FeedClient) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            client,
            generation: 0,
            event_tx,
            event_rx: Some(event_rx),
        }
    }

    pub fn take_event_rx(&mut self) -> Option<mpsc::UnboundedReceiver<FeedEvent>> {
        self.event_rx.take()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, event: &FeedEvent) -> bool {
        event.generation == self.generation
    }

    /// Spawns the fetch for a new render cycle and returns its generation.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, config: EventsConfig) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();

        tracing::info!(
            generation,
            container = %config.container_id,
            endpoint = %config.api_endpoint,
            "Starting render cycle"
        );

        tokio::spawn(async move {
            let result = client.fetch(&config).await;
            if let Err(e) = &result {
                tracing::error!(generation, "Error fetching events: {}", e);
            }
            let _ = event_tx.send(FeedEvent { generation, result });
        });

        generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::client::tests::{fixed_now, FakeTransport, MIXED_FEED};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_start_delivers_tagged_result() {
        let client = FeedClient::new(Arc::new(FakeTransport::ok(MIXED_FEED))).with_clock(fixed_now);
        let mut dispatcher = FeedDispatcher::new(client);
        let mut rx = dispatcher.take_event_rx().unwrap();
        assert!(dispatcher.take_event_rx().is_none());

        let generation = dispatcher.start(EventsConfig::default());
        let event = rx.recv().await.unwrap();

        assert_eq!(event.generation, generation);
        assert!(dispatcher.is_current(&event));
        assert!(matches!(event.result, Ok(FeedOutcome::Events(_))));
    }

    #[tokio::test]
    async fn test_superseded_cycle_is_not_current() {
        let client = FeedClient::new(Arc::new(FakeTransport::ok(MIXED_FEED))).with_clock(fixed_now);
        let mut dispatcher = FeedDispatcher::new(client);
        let mut rx = dispatcher.take_event_rx().unwrap();

        let first = dispatcher.start(EventsConfig::default());
        let second = dispatcher.start(EventsConfig::default());
        assert_eq!(dispatcher.current_generation(), second);

        let mut seen = vec![rx.recv().await.unwrap(), rx.recv().await.unwrap()];
        seen.sort_by_key(|e| e.generation);
        assert_eq!(seen[0].generation, first);
        assert!(!dispatcher.is_current(&seen[0]));
        assert!(dispatcher.is_current(&seen[1]));
    }
}
