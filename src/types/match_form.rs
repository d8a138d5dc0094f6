//! Target expression forms and grant selector codes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// How a target expression is interpreted.
///
/// The string tags (`glob`, `grain_pcre`, ...) are the ones used on the wire
/// by the command dispatch layer. `Ipcidr` and `Node` only show up as grant
/// selectors; there is no local matcher for them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchForm {
    #[default]
    Glob,
    Pcre,
    List,
    Grain,
    GrainPcre,
    Exsel,
    Pillar,
    Compound,
    Ipcidr,
    Node,
}

impl MatchForm {
    /// Map a grant selector code (the `G` in `G@os:Linux`) to its form.
    pub fn from_selector(code: char) -> Option<Self> {
        match code {
            'G' => Some(MatchForm::Grain),
            'P' => Some(MatchForm::GrainPcre),
            'X' => Some(MatchForm::Exsel),
            'I' => Some(MatchForm::Pillar),
            'L' => Some(MatchForm::List),
            'S' => Some(MatchForm::Ipcidr),
            'E' => Some(MatchForm::Pcre),
            'N' => Some(MatchForm::Node),
            _ => None,
        }
    }

    /// The selector code for this form, if grants can name it.
    pub fn selector(&self) -> Option<char> {
        match self {
            MatchForm::Grain => Some('G'),
            MatchForm::GrainPcre => Some('P'),
            MatchForm::Exsel => Some('X'),
            MatchForm::Pillar => Some('I'),
            MatchForm::List => Some('L'),
            MatchForm::Ipcidr => Some('S'),
            MatchForm::Pcre => Some('E'),
            MatchForm::Node => Some('N'),
            MatchForm::Glob | MatchForm::Compound => None,
        }
    }

    /// Whether the node set for this form can be enumerated locally and
    /// compared as a set during scope validation.
    pub fn is_enumerable(&self) -> bool {
        matches!(self, MatchForm::Glob | MatchForm::Pcre | MatchForm::List)
    }
}
