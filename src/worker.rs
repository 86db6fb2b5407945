//! Background feed loading for the TUI.
//!
//! A single tokio task receives load requests from the UI, performs them one
//! at a time and reports results back over a channel.  Between requests it
//! re-loads the most recently requested feed every refresh interval.
//!
//! Because only this task calls [`FeedReader::load_feed`] while the TUI is
//! running, loads never overlap.  Requests that pile up while a load is in
//! flight collapse into the newest one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::loader::FeedReader;

/// Messages sent from the worker to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMsg {
    /// Feed `index` is now on the page with `entries` entries.
    Loaded { index: usize, entries: usize },
    /// Loading feed `index` failed with this error description.
    Failed { index: usize, error: String },
}

/// The UI's end of the worker channels.
pub struct LoadHandle {
    requests: mpsc::UnboundedSender<usize>,
    results: mpsc::UnboundedReceiver<LoadMsg>,
}

impl LoadHandle {
    /// Ask the worker to load feed `index`.
    ///
    /// Returns `false` if the worker has stopped.
    pub fn request(&self, index: usize) -> bool {
        self.requests.send(index).is_ok()
    }

    /// Next finished load, if any, without waiting.
    pub fn try_next(&mut self) -> Option<LoadMsg> {
        self.results.try_recv().ok()
    }
}

/// Spawn the load worker on the current tokio runtime.
///
/// The task ends when the [`LoadHandle`] is dropped.
pub fn spawn(reader: Arc<FeedReader>, refresh: Duration) -> LoadHandle {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel();
    let (result_tx, result_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + refresh, refresh);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut current: Option<usize> = None;

        loop {
            let index = tokio::select! {
                request = request_rx.recv() => match request {
                    Some(mut index) => {
                        while let Ok(newer) = request_rx.try_recv() {
                            index = newer;
                        }
                        index
                    }
                    // The UI is gone; stop loading.
                    None => return,
                },
                _ = ticker.tick() => match current {
                    Some(index) => {
                        debug!(index, "refreshing current feed");
                        index
                    }
                    None => continue,
                },
            };
            current = Some(index);

            let msg = match reader.load_feed(index).await {
                Ok(entries) => LoadMsg::Loaded { index, entries },
                Err(err) => LoadMsg::Failed {
                    index,
                    error: err.to_string(),
                },
            };
            if result_tx.send(msg).is_err() {
                return;
            }
        }
    });

    LoadHandle {
        requests: request_tx,
        results: result_rx,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::registry::{FeedDescriptor, FeedRegistry};
    use crate::source::{FeedItem, FeedSource, FetchError};

    struct OneItem;

    #[async_trait]
    impl FeedSource for OneItem {
        async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<FeedItem>, FetchError> {
            Ok(vec![FeedItem {
                id: feed.url.clone(),
                title: feed.name.clone(),
                description: None,
                link: None,
                published: None,
                source_name: feed.name.clone(),
            }])
        }
    }

    /// Takes 50 ms per fetch and counts how often it was asked.
    #[derive(Default)]
    struct SlowSource {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl FeedSource for SlowSource {
        async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<FeedItem>, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            OneItem.fetch(feed).await
        }
    }

    async fn next(handle: &mut LoadHandle) -> LoadMsg {
        tokio::time::timeout(Duration::from_secs(5), handle.results.recv())
            .await
            .expect("worker answered in time")
            .expect("worker still running")
    }

    #[tokio::test]
    async fn requests_are_answered_in_order() {
        let registry = FeedRegistry::from(vec![FeedDescriptor::new("A", "http://a.com/rss")]);
        let reader = Arc::new(FeedReader::new(registry, Arc::new(OneItem)));
        let mut handle = spawn(Arc::clone(&reader), Duration::from_secs(3600));

        assert!(handle.request(0));
        assert_eq!(next(&mut handle).await, LoadMsg::Loaded { index: 0, entries: 1 });
        assert!(handle.request(3));
        assert!(matches!(next(&mut handle).await, LoadMsg::Failed { index: 3, .. }));
        assert_eq!(reader.page().title, "A");
    }

    #[tokio::test]
    async fn requests_queued_during_a_load_collapse_to_the_newest() {
        let registry = FeedRegistry::from(vec![
            FeedDescriptor::new("A", "http://a.com/rss"),
            FeedDescriptor::new("B", "http://b.com/rss"),
        ]);
        let source = Arc::new(SlowSource::default());
        let reader = Arc::new(FeedReader::new(registry, source.clone()));
        let mut handle = spawn(Arc::clone(&reader), Duration::from_secs(3600));

        assert!(handle.request(0));
        // Let the worker start fetching feed 0.
        tokio::time::sleep(Duration::from_millis(10)).await;
        for index in [0, 0, 1, 0, 1] {
            assert!(handle.request(index));
        }

        assert_eq!(next(&mut handle).await, LoadMsg::Loaded { index: 0, entries: 1 });
        assert_eq!(next(&mut handle).await, LoadMsg::Loaded { index: 1, entries: 1 });
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
        assert!(
            tokio::time::timeout(Duration::from_millis(150), handle.results.recv())
                .await
                .is_err(),
            "stale requests must not be loaded"
        );
        assert_eq!(reader.page().title, "B");
    }

    #[tokio::test]
    async fn refresh_reloads_current_feed() {
        let registry = FeedRegistry::from(vec![FeedDescriptor::new("A", "http://a.com/rss")]);
        let reader = Arc::new(FeedReader::new(registry, Arc::new(OneItem)));
        let mut handle = spawn(reader, Duration::from_millis(20));

        assert!(handle.request(0));
        assert_eq!(next(&mut handle).await, LoadMsg::Loaded { index: 0, entries: 1 });
        // No further request: the next result comes from the refresh timer.
        assert_eq!(next(&mut handle).await, LoadMsg::Loaded { index: 0, entries: 1 });
    }
}
