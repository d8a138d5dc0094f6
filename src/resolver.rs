use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::TargetError;
use crate::matchers::{MatchContext, matcher_for};
use crate::metrics;
use crate::store::{IdentityStore, JsonCodec};
use crate::timers::timed;
use crate::traits::CacheCodec;
use crate::types::{MatchForm, NodeId, Resolution, TargetExpression};

/// Resolves target expressions into node sets. Cloneable and thread-safe;
/// holds no mutable state.
#[derive(Clone)]
pub struct TargetResolver {
    settings: Arc<Settings>,
    codec: Arc<dyn CacheCodec>,
}

impl TargetResolver {
    pub fn new(settings: Settings) -> Self {
        Self::with_codec(settings, Arc::new(JsonCodec))
    }

    pub fn with_codec(settings: Settings, codec: Arc<dyn CacheCodec>) -> Self {
        TargetResolver {
            settings: Arc::new(settings),
            codec,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Every node in the identity store.
    pub fn all_nodes(&self) -> Result<BTreeSet<NodeId>, TargetError> {
        IdentityStore::from_settings(&self.settings).universe()
    }

    /// Resolve `expression` in `form`, returning the error if it can't be.
    pub fn try_resolve(
        &self,
        expression: &str,
        form: MatchForm,
    ) -> Result<BTreeSet<NodeId>, TargetError> {
        let matcher =
            matcher_for(form).ok_or_else(|| TargetError::UnsupportedForm(form.to_string()))?;
        let ctx = MatchContext::new(&self.settings, self.codec.as_ref());
        matcher.matches(&ctx, expression)
    }

    /// Resolve `expression` in `form`.
    ///
    /// Never fails: a bad pattern, an unreadable identity store or a form
    /// with no local matcher all give `Resolution::Degraded(expression)`.
    pub fn resolve(&self, expression: &str, form: MatchForm) -> Resolution {
        debug!(event = "Resolve", phase = "Request", form = %form, expression);

        let (result, duration) = timed(|| self.try_resolve(expression, form));
        let resolution = match result {
            Ok(nodes) => {
                debug!(
                    event = "Resolve",
                    phase = "Result",
                    form = %form,
                    matched = nodes.len(),
                    nodes = %nodes.iter().join(",")
                );
                Resolution::Resolved(nodes)
            }
            Err(err) => {
                warn!(
                    event = "Resolve",
                    phase = "Degraded",
                    form = %form,
                    expression,
                    error = %err
                );
                Resolution::Degraded(expression.to_string())
            }
        };

        metrics::record_resolve(
            form,
            duration,
            resolution.nodes().map_or(0, BTreeSet::len),
            resolution.is_degraded(),
        );
        resolution
    }

    /// Resolve with a string form tag; an unknown tag degrades.
    pub fn resolve_tag(&self, expression: &str, form: &str) -> Resolution {
        match MatchForm::from_str(form) {
            Ok(form) => self.resolve(expression, form),
            Err(_) => {
                warn!(event = "Resolve", phase = "Degraded", form, expression, "unknown form");
                Resolution::Degraded(expression.to_string())
            }
        }
    }

    pub fn resolve_target(&self, target: &TargetExpression) -> Resolution {
        self.resolve(target.expression(), target.form())
    }
}
