//! Durable key-value state scoped to the extension installation.
//!
//! This module provides the [`GlobalState`] trait the update flow reads and
//! writes, a file-backed [`FileStateStore`] used by the CLI host, and an
//! in-memory [`MemoryState`] for embedding and tests.

pub mod memory;
pub mod store;

pub use memory::MemoryState;
pub use store::FileStateStore;

use serde_json::Value;

use crate::error::Result;

/// Last pre-release version installed by the updater.
pub const LAST_ALPHA_VERSION_KEY: &str = "prerelease.lastAlphaVersionInstalled";

/// RFC 3339 timestamp of the last pre-release install.
pub const LAST_ALPHA_INSTALLED_AT_KEY: &str = "prerelease.lastAlphaInstalledAt";

/// SHA-256 digest of the last installed pre-release artifact.
pub const LAST_ALPHA_SHA256_KEY: &str = "prerelease.lastAlphaSha256";

/// Whether the "join the beta channel" notice has been shown.
pub const BETA_CHANNEL_MESSAGE_SHOWN_KEY: &str = "prerelease.betaChannelMessageShown";

/// Enterprise server URL copied from the legacy updater setting.
pub const SERVER_URL_KEY: &str = "enterprise.serverUrl";

/// Key-value store that survives restarts.
///
/// Writes are durable once `update` returns `Ok`.
pub trait GlobalState {
    /// Read a raw value.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value and persist it.
    fn update(&mut self, key: &str, value: Value) -> Result<()>;

    /// Remove a key and persist the removal.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// List stored keys in sorted order.
    fn keys(&self) -> Vec<String>;

    /// Read a string value, ignoring values of other types.
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Read a boolean value, ignoring values of other types.
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }
}
