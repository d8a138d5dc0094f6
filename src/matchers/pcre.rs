use std::collections::BTreeSet;

use regex::Regex;

use super::MatchContext;
use crate::error::TargetError;
use crate::traits::Matcher;
use crate::types::NodeId;

/// Compile `pattern` so that it only matches at the start of the input.
/// The end is left open: `db` matches `db1`.
pub fn compile_prefix(pattern: &str) -> Result<Regex, TargetError> {
    // Reject the raw pattern first so something like `a)|(b` can't slip
    // through once wrapped in a group.
    Regex::new(pattern).map_err(|e| TargetError::pattern(pattern, e))?;
    Regex::new(&format!("^(?:{pattern})")).map_err(|e| TargetError::pattern(pattern, e))
}

/// Matches node ids against a regular expression anchored at the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcreMatcher;

impl Matcher for PcreMatcher {
    fn name(&self) -> &'static str {
        "pcre"
    }

    fn matches(
        &self,
        ctx: &MatchContext<'_>,
        expr: &str,
    ) -> Result<BTreeSet<NodeId>, TargetError> {
        let re = compile_prefix(expr)?;
        Ok(ctx
            .identity()
            .list()?
            .into_iter()
            .filter(|id| re.is_match(id.as_str()))
            .collect())
    }
}
