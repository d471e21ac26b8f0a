// src/pipeline.rs
//! The orchestration core: one feed pass from fetch to notification.

use chrono::Utc;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::error::MonitorError;
use crate::feed::FeedSource;
use crate::inspect::DocumentInspector;
use crate::notify::{Notification, NotificationSink};
use crate::store::DisclosureStore;
use crate::ticker::TickerResolver;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_filings_total", "Filings parsed from the feed.");
        describe_counter!(
            "documents_inspected_total",
            "Filing documents fetched and scanned for signal phrases."
        );
        describe_counter!(
            "document_fetch_errors_total",
            "Document fetches that failed and degraded to no-signal."
        );
        describe_counter!(
            "dedup_skips_total",
            "Qualifying filings skipped because the CIK was already notified."
        );
        describe_counter!(
            "notifications_sent_total",
            "Webhook notifications attempted."
        );
    });
}

/// Counts from one `run_once` pass, for the cycle summary log and for tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleStats {
    pub filings: usize,
    pub matched_form: usize,
    pub inspected: usize,
    pub deduped: usize,
    pub notified: usize,
}

pub struct Processor {
    feed: Box<dyn FeedSource>,
    inspector: DocumentInspector,
    resolver: Box<dyn TickerResolver>,
    sink: Box<dyn NotificationSink>,
    store: DisclosureStore,
    form_types: Vec<String>,
}

impl Processor {
    pub fn new(
        feed: Box<dyn FeedSource>,
        inspector: DocumentInspector,
        resolver: Box<dyn TickerResolver>,
        sink: Box<dyn NotificationSink>,
        store: DisclosureStore,
        form_types: Vec<String>,
    ) -> Self {
        Self {
            feed,
            inspector,
            resolver,
            sink,
            store,
            form_types,
        }
    }

    /// One full pass: load dedup state, fetch and parse the feed, inspect
    /// qualifying filings, notify at most once per CIK, persist after every
    /// new record.
    ///
    /// Errors returned here abort only this cycle; the scheduler logs them
    /// and retries next interval. A corrupt or unreadable dedup store aborts
    /// the cycle rather than risking mass re-notification from an empty view.
    pub async fn run_once(&self) -> Result<CycleStats, MonitorError> {
        ensure_metrics_described();

        let mut seen = self.store.load()?;
        let filings = self.feed.fetch_filings().await?;

        let mut stats = CycleStats {
            filings: filings.len(),
            ..CycleStats::default()
        };
        counter!("feed_filings_total").increment(filings.len() as u64);

        for filing in &filings {
            if !self.form_types.iter().any(|t| t == &filing.form_type) {
                continue;
            }
            stats.matched_form += 1;

            for url in filing.html_documents() {
                stats.inspected += 1;
                counter!("documents_inspected_total").increment(1);
                if !self.inspector.inspect(url).await {
                    continue;
                }

                // Signal found. Dedup granularity is the registrant, not the
                // document, so a hit on any document settles the filing.
                if seen.contains(&filing.cik) {
                    tracing::debug!(
                        cik = %filing.cik,
                        company = %filing.company_name,
                        "already notified for this registrant, skipping"
                    );
                    stats.deduped += 1;
                    counter!("dedup_skips_total").increment(1);
                } else {
                    let ticker = self.resolver.resolve(&filing.cik).await;
                    tracing::info!(
                        company = %filing.company_name,
                        ticker = ticker.as_deref().unwrap_or("n/a"),
                        cik = %filing.cik,
                        url,
                        pub_date = %filing.pub_date,
                        "cybersecurity incident disclosure found"
                    );

                    let notification = Notification {
                        company_name: filing.company_name.clone(),
                        ticker,
                        document_url: url.to_string(),
                        pub_date: filing.pub_date.clone(),
                    };
                    if let Err(e) = self.sink.send(&notification).await {
                        tracing::error!(error = %e, cik = %filing.cik, "notification delivery failed");
                    }
                    stats.notified += 1;
                    counter!("notifications_sent_total").increment(1);

                    // Persist immediately, not batched: the file on disk is
                    // the durable record of "already notified".
                    seen.record(&filing.cik, &Utc::now().to_rfc3339());
                    if let Err(e) = self.store.save(&seen) {
                        tracing::error!(
                            error = %e,
                            "failed to persist dedup state; duplicate notifications possible after restart"
                        );
                    }
                }
                break;
            }
        }

        Ok(stats)
    }
}
