// tests/poll_loop.rs
//! The loop keeps polling on its cadence and leaves cleanly on shutdown.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use edgar_watch::inspect::{DocumentFetcher, DocumentInspector, SignalMatcher};
use edgar_watch::store::DisclosureStore;
use edgar_watch::ticker::TickerResolver;
use edgar_watch::{
    scheduler, FeedSource, Filing, MonitorError, Notification, NotificationSink, Processor,
};

struct CountingFeed {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl FeedSource for CountingFeed {
    async fn fetch_filings(&self) -> Result<Vec<Filing>, MonitorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(MonitorError::parse("edgar rss feed", "synthetic outage"))
        } else {
            Ok(Vec::new())
        }
    }
}

struct NoFetch;

#[async_trait]
impl DocumentFetcher for NoFetch {
    async fn fetch_text(&self, _url: &str) -> Result<String, MonitorError> {
        Err(MonitorError::parse("document", "not served"))
    }
}

struct NoResolver;

#[async_trait]
impl TickerResolver for NoResolver {
    async fn resolve(&self, _cik: &str) -> Option<String> {
        None
    }
}

struct NoSink;

#[async_trait]
impl NotificationSink for NoSink {
    async fn send(&self, _n: &Notification) -> Result<(), MonitorError> {
        Ok(())
    }
}

fn processor(dir: &tempfile::TempDir, calls: Arc<AtomicUsize>, fail: bool) -> Processor {
    Processor::new(
        Box::new(CountingFeed { calls, fail }),
        DocumentInspector::new(
            Box::new(NoFetch),
            SignalMatcher::new(&["Item 1.05"]).unwrap(),
        ),
        Box::new(NoResolver),
        Box::new(NoSink),
        DisclosureStore::new(dir.path().join("disclosures.json")),
        vec!["8-K".to_string()],
    )
}

#[tokio::test]
async fn loop_polls_repeatedly_and_stops_on_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let p = processor(&dir, calls.clone(), false);

    scheduler::run(&p, Duration::from_millis(10), async {
        tokio::time::sleep(Duration::from_millis(55)).await;
    })
    .await;

    // First cycle runs immediately, then one per tick until shutdown fires.
    assert!(calls.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn cycle_failures_do_not_end_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let p = processor(&dir, calls.clone(), true);

    scheduler::run(&p, Duration::from_millis(10), async {
        tokio::time::sleep(Duration::from_millis(55)).await;
    })
    .await;

    // The feed errored every single cycle, yet the loop kept retrying.
    assert!(calls.load(Ordering::SeqCst) >= 2);
}
