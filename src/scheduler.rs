// src/scheduler.rs
//! The outer poll loop: run one feed pass, sleep, repeat until shutdown.

use std::future::Future;
use std::time::Duration;

use metrics::counter;

use crate::pipeline::Processor;

/// Drive the processor on a fixed cadence until `shutdown` resolves.
///
/// Every cycle's failure is contained here; nothing a cycle does can end the
/// loop. Shutdown is observed between cycles, so a pass that is already
/// running finishes before the loop exits.
pub async fn run<F>(processor: &Processor, period: Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tracing::info!("Checking EDGAR feed for new filings");
        counter!("poll_cycles_total").increment(1);
        match processor.run_once().await {
            Ok(stats) => tracing::info!(
                filings = stats.filings,
                matched_form = stats.matched_form,
                inspected = stats.inspected,
                deduped = stats.deduped,
                notified = stats.notified,
                "poll cycle complete"
            ),
            Err(e) => tracing::error!(error = %e, "poll cycle failed, retrying next interval"),
        }

        tracing::info!(secs = period.as_secs(), "Sleeping until next poll");
        tokio::select! {
            _ = tokio::time::sleep(period) => {}
            _ = &mut shutdown => {
                tracing::info!("shutdown signal received, leaving poll loop");
                break;
            }
        }
    }
}
