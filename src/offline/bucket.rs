//! Versioned persistent cache buckets.
//!
//! A bucket is a directory of JSON entry files, one per cached request.
//! Keys are full request identity (method + URL), hashed with blake3 to a
//! stable filename; values are complete stored responses with status,
//! headers, and a base64-encoded body. Bucket directories carry a version
//! suffix (`static-v0.3.0`) so activation can delete every directory not
//! matching the active version.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Request identity: the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    /// HTTP method, uppercase.
    pub method: String,
    /// Absolute request URL.
    pub url: String,
}

impl RequestKey {
    /// Build a key for an arbitrary method.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into().to_uppercase(),
            url: url.into(),
        }
    }

    /// Build a GET key — the common case for everything this layer caches.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Canonical identity string, the hashed store key.
    fn identity(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// A complete stored response: enough to replay it to a caller without
/// touching the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers (string-valued only).
    pub headers: BTreeMap<String, String>,
    /// Raw body bytes.
    #[serde(with = "body_base64")]
    pub body: Vec<u8>,
    /// When this entry was stored.
    pub stored_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Build a response stamped with the current time.
    pub fn new(status: u16, headers: BTreeMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
            stored_at: Utc::now(),
        }
    }

    /// Build a 200 JSON response from a serializable value.
    pub fn json(value: &serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::new(200, headers, value.to_string().into_bytes())
    }

    /// The `content-type` header, if stored.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }
}

/// Base64 (de)serialization for response bodies, keeping entry files
/// valid JSON regardless of body content.
mod body_base64 {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// A named, versioned, persistent key→response store.
///
/// Reads and writes are atomic per key at the filesystem level (one file
/// per entry); concurrent writers to the same key are last-write-wins,
/// acceptable because entries are idempotent representations of one URL.
#[derive(Debug, Clone)]
pub struct CacheBucket {
    name: String,
    dir: PathBuf,
}

impl CacheBucket {
    /// Open (creating if needed) the bucket `name` at version `version`
    /// under `root`.
    pub fn open(root: &Path, name: &str, version: &str) -> Result<Self> {
        let dir = root.join(Self::dir_name(name, version));
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            name: name.to_string(),
            dir,
        })
    }

    /// Directory name for a bucket at a version, e.g. `img-v0.3.0`.
    pub fn dir_name(name: &str, version: &str) -> String {
        format!("{name}-{version}")
    }

    /// Bucket name without the version suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn entry_path(&self, key: &RequestKey) -> PathBuf {
        let digest = blake3::hash(key.identity().as_bytes());
        self.dir.join(format!("{}.json", digest.to_hex()))
    }

    /// Look up the stored response for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Cache`] if an entry exists but cannot be read
    /// or decoded.
    pub fn get(&self, key: &RequestKey) -> Result<Option<StoredResponse>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| AppError::Cache(format!("read {} failed: {e}", path.display())))?;
        let response = serde_json::from_str(&content)
            .map_err(|e| AppError::Cache(format!("decode {} failed: {e}", path.display())))?;
        Ok(Some(response))
    }

    /// Store `response` under `key`, replacing any previous entry.
    pub fn put(&self, key: &RequestKey, response: &StoredResponse) -> Result<()> {
        let path = self.entry_path(key);
        let content = serde_json::to_string(response)
            .map_err(|e| AppError::Cache(format!("encode entry failed: {e}")))?;
        std::fs::write(&path, content)
            .map_err(|e| AppError::Cache(format!("write {} failed: {e}", path.display())))?;
        Ok(())
    }
}

/// Delete every bucket directory under `root` whose name is not in
/// `keep`. Returns the deleted directory names.
pub fn purge_stale_versions(root: &Path, keep: &[String]) -> Result<Vec<String>> {
    let mut deleted = Vec::new();
    if !root.exists() {
        return Ok(deleted);
    }
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy().to_string();
        if keep.iter().any(|k| *k == dir_name) {
            continue;
        }
        std::fs::remove_dir_all(entry.path())?;
        tracing::info!(bucket = %dir_name, "purged stale cache bucket");
        deleted.push(dir_name);
    }
    Ok(deleted)
}
