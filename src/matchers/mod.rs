//! Targeting strategies, one per [`MatchForm`].

pub mod glob;
mod grain;
mod list;
pub mod pcre;
mod unbounded;

pub use glob::GlobMatcher;
pub use grain::{GrainMatcher, GrainPcreMatcher};
pub use list::ListMatcher;
pub use pcre::PcreMatcher;
pub use unbounded::UnboundedMatcher;

use crate::config::Settings;
use crate::store::{AttributeCache, IdentityStore};
use crate::traits::{CacheCodec, Matcher};
use crate::types::MatchForm;

/// What a matcher gets to look at: the settings naming the on-disk stores,
/// and the codec for cache records.
#[derive(Clone, Copy)]
pub struct MatchContext<'a> {
    settings: &'a Settings,
    codec: &'a dyn CacheCodec,
}

impl<'a> MatchContext<'a> {
    pub fn new(settings: &'a Settings, codec: &'a dyn CacheCodec) -> Self {
        MatchContext { settings, codec }
    }

    pub fn identity(&self) -> IdentityStore {
        IdentityStore::from_settings(self.settings)
    }

    pub fn cache(&self) -> AttributeCache<'a> {
        AttributeCache::new(self.settings, self.codec)
    }
}

/// The strategy for `form`, or `None` if it can't be matched locally.
pub fn matcher_for(form: MatchForm) -> Option<&'static dyn Matcher> {
    match form {
        MatchForm::Glob => Some(&GlobMatcher),
        MatchForm::Pcre => Some(&PcreMatcher),
        MatchForm::List => Some(&ListMatcher),
        MatchForm::Grain => Some(&GrainMatcher),
        MatchForm::GrainPcre => Some(&GrainPcreMatcher),
        MatchForm::Exsel | MatchForm::Pillar | MatchForm::Compound => Some(&UnboundedMatcher),
        MatchForm::Ipcidr | MatchForm::Node => None,
    }
}
