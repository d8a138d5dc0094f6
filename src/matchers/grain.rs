//! Grain (cached attribute) matchers.
//!
//! Expressions look like `<key>:<pattern>` and are split at the first colon.
//! Filtering is permissive: a node is only dropped when its cached record
//! positively disproves the match. Nodes without a cache file stay in, and
//! when the cache is disabled or missing nothing is filtered at all.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use super::{MatchContext, glob, pcre};
use crate::error::TargetError;
use crate::traits::Matcher;
use crate::types::NodeId;

/// Matches a grain value against a glob, case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrainMatcher;

/// Matches a grain value against a start-anchored regex, case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrainPcreMatcher;

impl Matcher for GrainMatcher {
    fn name(&self) -> &'static str {
        "grain"
    }

    fn matches(
        &self,
        ctx: &MatchContext<'_>,
        expr: &str,
    ) -> Result<BTreeSet<NodeId>, TargetError> {
        filter_by_grain(ctx, expr, glob::compile)
    }
}

impl Matcher for GrainPcreMatcher {
    fn name(&self) -> &'static str {
        "grain_pcre"
    }

    fn matches(
        &self,
        ctx: &MatchContext<'_>,
        expr: &str,
    ) -> Result<BTreeSet<NodeId>, TargetError> {
        filter_by_grain(ctx, expr, pcre::compile_prefix)
    }
}

fn filter_by_grain<F>(
    ctx: &MatchContext<'_>,
    expr: &str,
    compile: F,
) -> Result<BTreeSet<NodeId>, TargetError>
where
    F: Fn(&str) -> Result<Regex, TargetError>,
{
    let universe = ctx.identity().universe()?;
    let cache = ctx.cache();
    if !cache.is_enabled() || !cache.exists() {
        return Ok(universe);
    }
    let Some((key, pattern)) = expr.split_once(':') else {
        debug!(event = "Match", phase = "Grain", expr, "no key:value separator, not filtering");
        return Ok(universe);
    };
    // Compiled on the first cached record: with nothing to test against, a
    // bad pattern filters nothing rather than failing.
    let mut re: Option<Regex> = None;

    let mut matched = BTreeSet::new();
    for id in universe {
        let Some(record) = cache.load(&id)? else {
            matched.insert(id);
            continue;
        };
        if re.is_none() {
            re = Some(compile(&pattern.to_lowercase())?);
        }
        let hit = record.get(key).is_some_and(|value| {
            re.as_ref()
                .is_some_and(|re| value.any(|s| re.is_match(&s.to_lowercase())))
        });
        if hit {
            matched.insert(id);
        }
    }
    Ok(matched)
}
