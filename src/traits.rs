use std::collections::BTreeSet;

use crate::error::TargetError;
use crate::matchers::MatchContext;
use crate::types::{AttributeRecord, NodeId};

/// Decodes the bytes of a per-node cache file into its attribute record.
///
/// The cache is written by an external pipeline, so the serialization format
/// is pluggable. [`JsonCodec`](crate::store::JsonCodec) is the bundled one.
pub trait CacheCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<AttributeRecord, TargetError>;
}

/// A targeting strategy: turns one expression into the set of nodes it reaches.
pub trait Matcher: Send + Sync {
    /// Short name used in logs, e.g. "glob".
    fn name(&self) -> &'static str;

    /// Resolve `expr` against the node universe in `ctx`.
    fn matches(&self, ctx: &MatchContext<'_>, expr: &str)
    -> Result<BTreeSet<NodeId>, TargetError>;
}
