//! Data model types for target resolution and scope grants.

mod attr_value;
mod match_form;
mod node_id;
mod resolution;
mod target;

pub use attr_value::{AttributeRecord, AttributeValue};
pub use match_form::MatchForm;
pub use node_id::NodeId;
pub use resolution::Resolution;
pub use target::{GrantExpression, TargetExpression};
