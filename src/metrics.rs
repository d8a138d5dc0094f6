//! Vendor-agnostic metrics collection via a pluggable sink.
//!
//! Implement [`MetricsSink`] and install it once with [`set_sink`] to receive
//! one event per `resolve` and per `validate` call:
//!
//! ```ignore
//! use minion_target_core::metrics::{MetricsSink, ResolveStats, ValidateStats};
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! struct Degrades(AtomicU64);
//!
//! impl MetricsSink for Degrades {
//!     fn on_resolve(&self, stats: &ResolveStats) {
//!         if stats.degraded {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn on_validate(&self, _stats: &ValidateStats) {}
//! }
//!
//! minion_target_core::metrics::set_sink(Arc::new(Degrades(AtomicU64::new(0))));
//! ```
//!
//! Without a sink, events are dropped.

use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::warn;

use crate::types::MatchForm;

/// One `resolve` call.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveStats {
    pub form: MatchForm,
    /// Wall-clock time, including directory listing and cache reads.
    pub duration: Duration,
    /// Number of nodes matched; zero when degraded.
    pub matched: usize,
    /// Whether the expression came back unresolved.
    pub degraded: bool,
}

/// One `validate` call.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateStats {
    pub grant_form: MatchForm,
    pub actual_form: MatchForm,
    pub duration: Duration,
    pub allowed: bool,
}

/// Receives resolution and validation events.
///
/// Called synchronously on the caller's thread, possibly from many threads
/// at once; implementations must be cheap and thread-safe.
pub trait MetricsSink: Send + Sync {
    fn on_resolve(&self, stats: &ResolveStats);

    fn on_validate(&self, stats: &ValidateStats);
}

struct NoOpSink;

impl MetricsSink for NoOpSink {
    fn on_resolve(&self, _stats: &ResolveStats) {}
    fn on_validate(&self, _stats: &ValidateStats) {}
}

static SINK: OnceLock<Arc<dyn MetricsSink>> = OnceLock::new();

fn sink() -> &'static Arc<dyn MetricsSink> {
    SINK.get_or_init(|| Arc::new(NoOpSink))
}

/// Set the global metrics sink. Only the first call takes effect, and only
/// if it happens before the first resolution.
pub fn set_sink(sink: Arc<dyn MetricsSink>) {
    if SINK.set(sink).is_err() {
        warn!("Metrics sink was already initialized. Ignoring subsequent set_sink call.");
    }
}

pub(crate) fn record_resolve(form: MatchForm, duration: Duration, matched: usize, degraded: bool) {
    sink().on_resolve(&ResolveStats {
        form,
        duration,
        matched,
        degraded,
    });
}

pub(crate) fn record_validate(
    grant_form: MatchForm,
    actual_form: MatchForm,
    duration: Duration,
    allowed: bool,
) {
    sink().on_validate(&ValidateStats {
        grant_form,
        actual_form,
        duration,
        allowed,
    });
}
