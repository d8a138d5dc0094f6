//! Filesystem fixtures for tests: a throwaway key store and grain cache.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

use crate::config::Settings;
use crate::matchers::MatchContext;
use crate::resolver::TargetResolver;
use crate::store::JsonCodec;
use crate::types::NodeId;

pub(crate) fn ids(names: &[&str]) -> BTreeSet<NodeId> {
    names.iter().map(|n| NodeId::from(*n)).collect()
}

/// A temporary fleet: `pki/minions/<id>` for every node, and optionally a
/// `cache/minions/<id>/data.p` grain cache.
pub(crate) struct Fleet {
    _root: TempDir,
    settings: Settings,
}

impl Fleet {
    pub(crate) fn new(nodes: &[&str]) -> Self {
        let root = TempDir::new().unwrap();
        let settings = Settings::new(root.path().join("pki"), root.path().join("cache"));
        fs::create_dir_all(settings.identity_dir()).unwrap();
        for node in nodes {
            fs::write(settings.identity_dir().join(node), b"-----BEGIN PUBLIC KEY-----").unwrap();
        }
        Fleet {
            _root: root,
            settings,
        }
    }

    /// A fleet whose identity store does not exist.
    pub(crate) fn without_identity_store() -> Self {
        let fleet = Self::new(&[]);
        fs::remove_dir_all(fleet.settings.identity_dir()).unwrap();
        fleet
    }

    /// Enable the grain cache and create its directory.
    pub(crate) fn with_cache(self) -> Self {
        fs::create_dir_all(self.settings.cache_dir()).unwrap();
        self.with_cache_flag_only()
    }

    /// Enable the grain cache without creating its directory.
    pub(crate) fn with_cache_flag_only(mut self) -> Self {
        self.settings.minion_data_cache = true;
        self
    }

    pub(crate) fn add_node(&self, node: &str) {
        fs::write(self.settings.identity_dir().join(node), b"").unwrap();
    }

    pub(crate) fn write_grains(&self, node: &str, grains: Value) {
        let bytes = serde_json::to_vec(&json!({ "grains": grains })).unwrap();
        self.write_raw_cache(node, &bytes);
    }

    pub(crate) fn write_raw_cache(&self, node: &str, bytes: &[u8]) {
        let path: PathBuf = self.settings.cache_file(&NodeId::from(node));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn context(&self) -> MatchContext<'_> {
        MatchContext::new(&self.settings, &JsonCodec)
    }

    pub(crate) fn resolver(&self) -> TargetResolver {
        TargetResolver::new(self.settings.clone())
    }
}
