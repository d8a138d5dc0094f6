//! Scope validation: does a target stay inside what a grant allows?
//!
//! Grants in a form that can't be enumerated locally (grain, pillar, node,
//! ...) only allow the identical target. Enumerable grants (glob, pcre,
//! list) are compared by resolving both sides against the identity store.

use std::collections::BTreeSet;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::metrics;
use crate::resolver::TargetResolver;
use crate::timers::timed;
use crate::types::{GrantExpression, MatchForm, NodeId};

/// The set comparison applied to enumerable grants.
///
/// `true` when both sets are equal. Otherwise the result is whether
/// `actual` reaches a node outside `granted`. A strict subset of the grant is
/// therefore denied, and a target with nodes outside the grant is allowed.
pub fn scope_allows(granted: &BTreeSet<NodeId>, actual: &BTreeSet<NodeId>) -> bool {
    let extra = actual.difference(granted).next().is_some();
    if granted.len() == actual.len() && !extra {
        return true;
    }
    extra
}

impl TargetResolver {
    /// Whether `actual_expression` in `actual_form` falls within `grant`.
    ///
    /// Fails closed: if either side of an enumerable comparison comes back
    /// degraded (bad pattern, unreadable identity store, a form with no local
    /// matcher) the target is denied.
    pub fn validate(&self, grant: &str, actual_expression: &str, actual_form: MatchForm) -> bool {
        let grant = GrantExpression::parse(grant);
        let (allowed, duration) =
            timed(|| self.validate_grant(&grant, actual_expression, actual_form));

        info!(
            event = "Validate",
            phase = "Result",
            grant = %grant,
            actual_form = %actual_form,
            actual = actual_expression,
            allowed
        );
        metrics::record_validate(grant.form, actual_form, duration, allowed);
        allowed
    }

    /// Like [`validate`](Self::validate) with a string form tag. Unknown
    /// tags are denied.
    pub fn validate_tag(&self, grant: &str, actual_expression: &str, actual_form: &str) -> bool {
        match MatchForm::from_str(actual_form) {
            Ok(form) => self.validate(grant, actual_expression, form),
            Err(_) => {
                warn!(
                    event = "Validate",
                    phase = "Request",
                    grant,
                    actual_form,
                    "unknown target form, denying"
                );
                false
            }
        }
    }

    fn validate_grant(
        &self,
        grant: &GrantExpression,
        actual_expression: &str,
        actual_form: MatchForm,
    ) -> bool {
        if !grant.form.is_enumerable() {
            debug!(
                event = "Validate",
                phase = "Exact",
                grant_form = %grant.form,
                "grant form is not enumerable, requiring identical target"
            );
            return grant.form == actual_form && grant.expression == actual_expression;
        }

        let granted = self.resolve(&grant.expression, grant.form);
        let actual = self.resolve(actual_expression, actual_form);
        match (granted.nodes(), actual.nodes()) {
            (Some(granted), Some(actual)) => scope_allows(granted, actual),
            _ => {
                warn!(
                    event = "Validate",
                    phase = "Compare",
                    granted = %granted,
                    actual = %actual,
                    "unresolved target, denying"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fleet, ids};
    use serde_json::json;
    use yare::parameterized;

    #[parameterized(
        equal = { &["web1", "web2"], &["web1", "web2"], true },
        both_empty = { &[], &[], true },
        strict_subset = { &["web1", "web2"], &["web1"], false },
        empty_actual = { &["web1"], &[], false },
        superset = { &["web1"], &["web1", "web2"], true },
        disjoint_same_size = { &["web1"], &["db1"], true },
        disjoint = { &["web1", "web2"], &["db1"], true },
    )]
    fn test_scope_table(granted: &[&str], actual: &[&str], expected: bool) {
        assert_eq!(scope_allows(&ids(granted), &ids(actual)), expected);
    }

    fn fleet() -> Fleet {
        Fleet::new(&["web1", "web2", "db1"])
    }

    #[parameterized(
        same_glob = { "web*", "web*", MatchForm::Glob, true },
        same_set_other_form = { "web*", "web", MatchForm::Pcre, true },
        same_set_as_list = { "web*", "web1,web2", MatchForm::List, true },
        strict_subset_denied = { "web*", "web1", MatchForm::Glob, false },
        escapes_grant = { "web*", "*", MatchForm::Glob, true },
        pcre_grant = { "E@db", "db1", MatchForm::List, true },
        list_grant = { "L@web1,db1", "web1", MatchForm::Glob, false },
        grant_matches_nothing = { "mail*", "mail*", MatchForm::Glob, true },
        unbounded_actual = { "*", "role:web", MatchForm::Pillar, true },
    )]
    fn test_validate_enumerable(grant: &str, expr: &str, form: MatchForm, expected: bool) {
        assert_eq!(fleet().resolver().validate(grant, expr, form), expected);
    }

    #[parameterized(
        same_grain = { "G@os:Ubuntu*", "os:Ubuntu*", MatchForm::Grain, true },
        other_grain_value = { "G@os:Ubuntu*", "os:CentOS*", MatchForm::Grain, false },
        grain_form_mismatch = { "G@os:Ubuntu*", "os:Ubuntu*", MatchForm::GrainPcre, false },
        no_prefix_matching = { "G@os:Ubuntu*", "os:Ubuntu", MatchForm::Grain, false },
        same_grain_pcre = { "P@os:ubu.*", "os:ubu.*", MatchForm::GrainPcre, true },
        grain_value_with_at = { "G@mail:root@example.com", "mail:root@example.com", MatchForm::Grain, true },
        grain_value_truncated_at = { "G@mail:root@example.com", "mail:root", MatchForm::Grain, false },
        same_exsel = { "X@test.ping", "test.ping", MatchForm::Exsel, true },
        same_pillar = { "I@role:web", "role:web", MatchForm::Pillar, true },
        same_ipcidr = { "S@10.0.0.0/8", "10.0.0.0/8", MatchForm::Ipcidr, true },
        same_node = { "N@webservers", "webservers", MatchForm::Node, true },
        node_vs_glob = { "N@webservers", "web*", MatchForm::Glob, false },
    )]
    fn test_validate_unbounded(grant: &str, expr: &str, form: MatchForm, expected: bool) {
        assert_eq!(fleet().resolver().validate(grant, expr, form), expected);
    }

    #[test]
    fn test_validate_unbounded_ignores_cache_contents() {
        let fleet = fleet().with_cache();
        fleet.write_grains("web1", json!({"os": "Ubuntu"}));
        let resolver = fleet.resolver();
        // Both sides would resolve to the same nodes, but grain grants only
        // allow the verbatim expression.
        assert!(!resolver.validate("G@os:Ubuntu", "os:ubuntu", MatchForm::Grain));
        assert!(resolver.validate("G@os:Ubuntu", "os:Ubuntu", MatchForm::Grain));
    }

    #[test]
    fn test_validate_denies_degraded_resolution() {
        let fleet = fleet();
        let resolver = fleet.resolver();
        assert!(!resolver.validate("web*", "web(", MatchForm::Pcre));
        assert!(!resolver.validate("E@web(", "web*", MatchForm::Glob));
        assert!(!resolver.validate("web*", "10.0.0.0/8", MatchForm::Ipcidr));
    }

    #[test]
    fn test_validate_without_identity_store_denies() {
        let resolver = Fleet::without_identity_store().resolver();
        assert!(!resolver.validate("web*", "web*", MatchForm::Glob));
    }

    #[test]
    fn test_validate_tag() {
        let fleet = fleet();
        let resolver = fleet.resolver();
        assert!(resolver.validate_tag("web*", "web*", "glob"));
        assert!(resolver.validate_tag("G@os:Linux", "os:Linux", "grain"));
        assert!(!resolver.validate_tag("web*", "web*", "range"));
    }
}
