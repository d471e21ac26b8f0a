// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod inspect;
pub mod notify;
pub mod pipeline;
pub mod scheduler;
pub mod store;
pub mod ticker;

// ---- Re-exports for stable public API ----
pub use crate::config::Config;
pub use crate::error::MonitorError;
pub use crate::feed::{FeedSource, Filing};
pub use crate::http::HttpClient;
pub use crate::inspect::{DocumentFetcher, DocumentInspector, SignalMatcher};
pub use crate::notify::{Notification, NotificationSink, TeamsNotifier};
pub use crate::pipeline::{CycleStats, Processor};
pub use crate::store::{Disclosures, DisclosureStore};
pub use crate::ticker::TickerResolver;
