//! Target and grant expressions.
//!
//! Canonical string forms:
//! - Target: the raw expression text, paired with a [`MatchForm`] tag.
//! - Grant: `<code>@<expression>` (e.g. `G@os:Linux*`), or a bare
//!   expression which is read as a glob.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::match_form::MatchForm;
use crate::error::TargetError;

/// An expression together with the form it is interpreted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct TargetExpression {
    pub expression: String,
    #[serde(default)]
    pub form: MatchForm,
}

impl TargetExpression {
    pub fn new<S: Into<String>>(expression: S, form: MatchForm) -> Self {
        TargetExpression {
            expression: expression.into(),
            form,
        }
    }

    pub fn glob<S: Into<String>>(expression: S) -> Self {
        Self::new(expression, MatchForm::Glob)
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn form(&self) -> MatchForm {
        self.form
    }
}

impl Display for TargetExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.form, self.expression)
    }
}

/// The maximal target scope a caller has been granted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct GrantExpression {
    pub form: MatchForm,
    pub expression: String,
}

impl GrantExpression {
    /// Parse a grant string. Never fails: anything without a recognized
    /// `<code>@` prefix is taken whole as a glob.
    ///
    /// Only the first `@` separates the selector; everything after it is the
    /// expression, later `@`s included. A grain grant such as
    /// `G@mail:root@example.com` is compared as a whole and allows exactly
    /// `mail:root@example.com`, not a truncated `mail:root`.
    pub fn parse(grant: &str) -> Self {
        if let Some((code, rest)) = grant.split_once('@')
            && code.chars().count() == 1
            && let Some(c) = code.chars().next()
            && let Some(form) = MatchForm::from_selector(c)
        {
            return GrantExpression {
                form,
                expression: rest.to_string(),
            };
        }
        GrantExpression {
            form: MatchForm::Glob,
            expression: grant.to_string(),
        }
    }

    pub fn as_target(&self) -> TargetExpression {
        TargetExpression::new(self.expression.clone(), self.form)
    }
}

impl FromStr for GrantExpression {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GrantExpression::parse(s))
    }
}

impl Display for GrantExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.form.selector() {
            Some(code) => write!(f, "{code}@{}", self.expression),
            None => write!(f, "{}", self.expression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        bare_glob = { "web*", MatchForm::Glob, "web*" },
        grain = { "G@os:Linux*", MatchForm::Grain, "os:Linux*" },
        grain_pcre = { "P@os:(Cent|Ubu).*", MatchForm::GrainPcre, "os:(Cent|Ubu).*" },
        exsel = { "X@test.ping", MatchForm::Exsel, "test.ping" },
        pillar = { "I@role:web", MatchForm::Pillar, "role:web" },
        list = { "L@web1,web2", MatchForm::List, "web1,web2" },
        ipcidr = { "S@10.0.0.0/8", MatchForm::Ipcidr, "10.0.0.0/8" },
        pcre = { "E@web\\d+", MatchForm::Pcre, "web\\d+" },
        node = { "N@webservers", MatchForm::Node, "webservers" },
        empty_sub_expression = { "G@", MatchForm::Grain, "" },
        keeps_later_at_signs = { "G@mail:root@example.com", MatchForm::Grain, "mail:root@example.com" },
        unknown_code_is_glob = { "Z@web*", MatchForm::Glob, "Z@web*" },
        lowercase_code_is_glob = { "g@os:Linux", MatchForm::Glob, "g@os:Linux" },
        long_prefix_is_glob = { "GG@os:Linux", MatchForm::Glob, "GG@os:Linux" },
        at_not_second_is_glob = { "web@1", MatchForm::Glob, "web@1" },
        lone_at_is_glob = { "@", MatchForm::Glob, "@" },
    )]
    fn test_parse_grant(grant: &str, form: MatchForm, expression: &str) {
        let parsed: GrantExpression = grant.parse().unwrap();
        assert_eq!(parsed.form, form);
        assert_eq!(parsed.expression, expression);
    }

    #[test]
    fn test_grant_display_roundtrip() {
        for grant in ["web*", "G@os:Linux*", "E@db.*", "N@group"] {
            assert_eq!(GrantExpression::parse(grant).to_string(), grant);
        }
    }

    #[test]
    fn test_grant_as_target() {
        let target = GrantExpression::parse("L@web1,web2").as_target();
        assert_eq!(target.form(), MatchForm::List);
        assert_eq!(target.expression(), "web1,web2");
        assert_eq!(target.to_string(), "list:web1,web2");
    }

    #[test]
    fn test_target_form_defaults_to_glob() {
        let target: TargetExpression = serde_json::from_str(r#"{"expression": "web*"}"#).unwrap();
        assert_eq!(target, TargetExpression::glob("web*"));
    }
}
