//! The outcome of resolving a target expression.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::node_id::NodeId;

/// Either the concrete node set a target expression reaches, or the original
/// expression handed back unchanged because it could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Resolution {
    Resolved(BTreeSet<NodeId>),
    Degraded(String),
}

impl Resolution {
    pub fn nodes(&self) -> Option<&BTreeSet<NodeId>> {
        match self {
            Resolution::Resolved(nodes) => Some(nodes),
            Resolution::Degraded(_) => None,
        }
    }

    pub fn into_nodes(self) -> Option<BTreeSet<NodeId>> {
        match self {
            Resolution::Resolved(nodes) => Some(nodes),
            Resolution::Degraded(_) => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Resolution::Degraded(_))
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Resolution::Resolved(nodes) => write!(f, "[{}]", nodes.iter().join(", ")),
            Resolution::Degraded(expr) => write!(f, "Degraded({expr})"),
        }
    }
}
