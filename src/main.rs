//! EDGAR disclosure monitor, binary entrypoint.
//! Loads config, wires the dual-sink tracing registry, builds the pipeline,
//! and runs the poll loop until ctrl-c.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use edgar_watch::config::Config;
use edgar_watch::feed::EdgarFeed;
use edgar_watch::inspect::{DocumentInspector, HttpDocumentFetcher, SignalMatcher};
use edgar_watch::notify::TeamsNotifier;
use edgar_watch::pipeline::Processor;
use edgar_watch::store::DisclosureStore;
use edgar_watch::ticker::EdgarTickerResolver;
use edgar_watch::{scheduler, HttpClient};

/// Dual-sink logging: human-readable console at info (env-overridable) and a
/// full debug-level append log in the data directory.
fn init_tracing(data_dir: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(data_dir, "debug.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer().with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in deployments that inject real env vars.
    let _ = dotenvy::dotenv();

    // Config problems are the one fatal condition; fail before the loop starts.
    let cfg = Config::from_env().context("loading configuration")?;
    std::fs::create_dir_all(&cfg.data_dir)
        .with_context(|| format!("creating data dir {}", cfg.data_dir.display()))?;
    let _log_guard = init_tracing(&cfg.data_dir)?;

    tracing::info!(
        feed = %cfg.feed_url,
        interval_secs = cfg.poll_interval.as_secs(),
        forms = ?cfg.form_types,
        "starting EDGAR disclosure monitor"
    );

    let http = HttpClient::new(&cfg.user_agent, cfg.request_delay)?;
    let matcher = SignalMatcher::new(&cfg.signal_phrases)?;
    let processor = Processor::new(
        Box::new(EdgarFeed::new(cfg.feed_url.clone(), http.clone())),
        DocumentInspector::new(Box::new(HttpDocumentFetcher::new(http.clone())), matcher),
        Box::new(EdgarTickerResolver::new(
            cfg.submissions_base.clone(),
            http.clone(),
        )),
        Box::new(TeamsNotifier::new(cfg.webhook_url.clone(), http)),
        DisclosureStore::new(cfg.store_path()),
        cfg.form_types.clone(),
    );

    scheduler::run(&processor, cfg.poll_interval, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await;

    tracing::info!("monitor stopped");
    Ok(())
}
