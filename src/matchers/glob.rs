//! Shell-style glob patterns, translated to anchored regular expressions.
//!
//! Supported syntax: `*`, `?`, `[seq]` and `[!seq]`, with `a-z` ranges inside
//! a set; any other `-` in a set is literal. A `]` directly after
//! the opening bracket (or `[!`) is part of the set, and a `[` with no
//! closing bracket matches itself. Path separators are not special.

use std::collections::BTreeSet;

use regex::Regex;

use super::MatchContext;
use crate::error::TargetError;
use crate::traits::Matcher;
use crate::types::NodeId;

/// Characters that need escaping inside a regex character class.
const CLASS_ESCAPES: [char; 7] = ['\\', '[', ']', '^', '&', '~', '-'];

fn push_class_char(out: &mut String, c: char) {
    if CLASS_ESCAPES.contains(&c) {
        out.push('\\');
    }
    out.push(c);
}

/// Translate a glob into regex source matching the whole input.
pub fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let n = chars.len();
    let mut out = String::from("(?s)^");
    let mut i = 0;

    while i < n {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while i < n && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => {
                let mut j = i;
                if j < n && chars[j] == '!' {
                    j += 1;
                }
                if j < n && chars[j] == ']' {
                    j += 1;
                }
                while j < n && chars[j] != ']' {
                    j += 1;
                }
                if j >= n {
                    out.push_str(r"\[");
                    continue;
                }

                let mut set = &chars[i..j];
                i = j + 1;
                out.push('[');
                if let Some(('!', rest)) = set.split_first() {
                    out.push('^');
                    set = rest;
                }
                // Ranges are emitted explicitly so a `-` endpoint or a `--`
                // in the set can't read as regex class syntax.
                let mut k = 0;
                while k < set.len() {
                    push_class_char(&mut out, set[k]);
                    if k + 2 < set.len() && set[k + 1] == '-' {
                        out.push('-');
                        push_class_char(&mut out, set[k + 2]);
                        k += 3;
                    } else {
                        k += 1;
                    }
                }
                out.push(']');
            }
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }

    out.push('$');
    out
}

/// Compile a glob into a regex matching the whole input.
pub fn compile(pattern: &str) -> Result<Regex, TargetError> {
    Regex::new(&translate(pattern)).map_err(|e| TargetError::pattern(pattern, e))
}

/// Matches node ids against a shell glob, case-sensitively.
///
/// As with shell globbing, ids starting with `.` only match patterns that
/// start with `.`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobMatcher;

impl Matcher for GlobMatcher {
    fn name(&self) -> &'static str {
        "glob"
    }

    fn matches(
        &self,
        ctx: &MatchContext<'_>,
        expr: &str,
    ) -> Result<BTreeSet<NodeId>, TargetError> {
        let re = compile(expr)?;
        let explicit_hidden = expr.starts_with('.');

        Ok(ctx
            .identity()
            .list()?
            .into_iter()
            .filter(|id| explicit_hidden || !id.as_str().starts_with('.'))
            .filter(|id| re.is_match(id.as_str()))
            .collect())
    }
}
