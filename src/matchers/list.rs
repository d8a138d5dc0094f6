use std::collections::BTreeSet;

use super::MatchContext;
use crate::error::TargetError;
use crate::traits::Matcher;
use crate::types::NodeId;

/// Matches every node whose id appears in the expression text.
///
/// Containment is a substring test against the raw expression, not
/// membership in a split list: with `web10,db1` the node `web1` matches too.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListMatcher;

impl Matcher for ListMatcher {
    fn name(&self) -> &'static str {
        "list"
    }

    fn matches(
        &self,
        ctx: &MatchContext<'_>,
        expr: &str,
    ) -> Result<BTreeSet<NodeId>, TargetError> {
        Ok(ctx
            .identity()
            .list()?
            .into_iter()
            .filter(|id| expr.contains(id.as_str()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fleet, ids};
    use yare::parameterized;

    #[parameterized(
        comma_list = { "web1,db1", &["web1", "db1"] },
        single = { "web2", &["web2"] },
        substring_of_longer_id = { "web10", &["web1", "web10"] },
        separator_agnostic = { "db1 web2", &["web2", "db1"] },
        no_match = { "mail1", &[] },
        empty = { "", &[] },
    )]
    fn test_list_containment(expr: &str, expected: &[&str]) {
        let fleet = Fleet::new(&["web1", "web2", "web10", "db1"]);
        assert_eq!(
            ListMatcher.matches(&fleet.context(), expr).unwrap(),
            ids(expected)
        );
    }
}
