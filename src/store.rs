//! Read-only access to the node identity store and the attribute cache.
//!
//! Both live on disk and are populated by other parts of the system; nothing
//! here writes to them. Paths are always passed explicitly, the process
//! working directory is never touched.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

use crate::config::Settings;
use crate::error::TargetError;
use crate::traits::CacheCodec;
use crate::types::{AttributeRecord, NodeId};

/// The directory of accepted node keys, one entry per node.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    dir: PathBuf,
}

impl IdentityStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        IdentityStore { dir: dir.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.identity_dir())
    }

    /// All node ids, in directory order.
    pub fn list(&self) -> Result<Vec<NodeId>, TargetError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| TargetError::io(&self.dir, e))?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TargetError::io(&self.dir, e))?;
            match entry.file_name().into_string() {
                Ok(name) => ids.push(NodeId::from(name)),
                Err(raw) => warn!(
                    event = "IdentityStore",
                    phase = "List",
                    entry = ?raw,
                    "skipping non UTF-8 identity entry"
                ),
            }
        }
        Ok(ids)
    }

    /// All node ids as a set.
    pub fn universe(&self) -> Result<BTreeSet<NodeId>, TargetError> {
        Ok(self.list()?.into_iter().collect())
    }
}

/// Per-node cached attribute records, `<dir>/<id>/data.p`.
pub struct AttributeCache<'a> {
    settings: &'a Settings,
    codec: &'a dyn CacheCodec,
}

impl<'a> AttributeCache<'a> {
    pub fn new(settings: &'a Settings, codec: &'a dyn CacheCodec) -> Self {
        AttributeCache { settings, codec }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.minion_data_cache
    }

    /// Whether the cache directory exists at all.
    pub fn exists(&self) -> bool {
        self.settings.cache_dir().is_dir()
    }

    /// Load the record for `id`. `Ok(None)` means there is no cache file for
    /// this node; a file that exists but fails to decode is an error.
    pub fn load(&self, id: &NodeId) -> Result<Option<AttributeRecord>, TargetError> {
        let path = self.settings.cache_file(id);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TargetError::io(path, e)),
        };
        self.codec.decode(&bytes).map(Some)
    }
}

/// Cache records stored as JSON objects with a `grains` (or `attributes`)
/// member.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl CacheCodec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<AttributeRecord, TargetError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
