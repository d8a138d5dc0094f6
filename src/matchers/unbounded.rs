use std::collections::BTreeSet;

use super::MatchContext;
use crate::error::TargetError;
use crate::traits::Matcher;
use crate::types::NodeId;

/// Returns every known node without looking at the expression.
///
/// Used for forms that need evaluation context this crate does not have
/// (exsel, pillar, compound).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnboundedMatcher;

impl Matcher for UnboundedMatcher {
    fn name(&self) -> &'static str {
        "unbounded"
    }

    fn matches(
        &self,
        ctx: &MatchContext<'_>,
        _expr: &str,
    ) -> Result<BTreeSet<NodeId>, TargetError> {
        ctx.identity().universe()
    }
}
