//! Settings consumed from the surrounding process configuration.
//!
//! The settings object is shared with the rest of the system, so only the
//! fields this crate reads are modelled and everything else is ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TargetError;
use crate::types::NodeId;

const MINIONS_DIR: &str = "minions";
const CACHE_FILE: &str = "data.p";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Root of the key store; `minions/` holds one entry per accepted node.
    pub pki_dir: PathBuf,
    /// Root of the master cache; `minions/<id>/data.p` holds cached grains.
    pub cachedir: PathBuf,
    /// When false, grain matchers do not filter at all.
    #[serde(default)]
    pub minion_data_cache: bool,
}

impl Settings {
    pub fn new(pki_dir: impl Into<PathBuf>, cachedir: impl Into<PathBuf>) -> Self {
        Settings {
            pki_dir: pki_dir.into(),
            cachedir: cachedir.into(),
            minion_data_cache: false,
        }
    }

    pub fn with_minion_data_cache(mut self, enabled: bool) -> Self {
        self.minion_data_cache = enabled;
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, TargetError> {
        serde_json::from_str(text).map_err(|e| TargetError::InvalidFormat(e.to_string()))
    }

    pub fn from_value(value: Value) -> Result<Self, TargetError> {
        serde_json::from_value(value).map_err(|e| TargetError::InvalidFormat(e.to_string()))
    }

    pub fn identity_dir(&self) -> PathBuf {
        self.pki_dir.join(MINIONS_DIR)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cachedir.join(MINIONS_DIR)
    }

    pub fn cache_file(&self, id: &NodeId) -> PathBuf {
        self.cache_dir().join(Path::new(id.as_str())).join(CACHE_FILE)
    }
}
