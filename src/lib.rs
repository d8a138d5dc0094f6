//! Resolve minion target expressions into node sets, and check that a
//! target stays within a caller's granted scope.
//!
//! ```no_run
//! use minion_target_core::{MatchForm, Resolution, Settings, TargetResolver};
//!
//! let settings = Settings::new("/etc/master/pki", "/var/cache/master")
//!     .with_minion_data_cache(true);
//! let resolver = TargetResolver::new(settings);
//!
//! if let Resolution::Resolved(nodes) = resolver.resolve("web*", MatchForm::Glob) {
//!     println!("{} nodes", nodes.len());
//! }
//! assert!(resolver.validate("G@os:Ubuntu*", "os:Ubuntu*", MatchForm::Grain));
//! ```

pub use config::Settings;
pub use error::TargetError;
pub use matchers::{
    GlobMatcher, GrainMatcher, GrainPcreMatcher, ListMatcher, MatchContext, PcreMatcher,
    UnboundedMatcher, matcher_for,
};
pub use resolver::TargetResolver;
pub use store::{AttributeCache, IdentityStore, JsonCodec};
pub use traits::{CacheCodec, Matcher};
pub use types::{
    AttributeRecord, AttributeValue, GrantExpression, MatchForm, NodeId, Resolution,
    TargetExpression,
};
pub use validator::scope_allows;

mod config;
mod error;
pub mod matchers;
pub mod metrics;
mod resolver;
mod store;
mod timers;
mod traits;
mod types;
mod validator;

#[cfg(test)]
mod test_support;
