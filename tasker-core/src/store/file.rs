//! File-backed snapshot store
//!
//! One pretty-printed JSON file per agent: `<dir>/<agent_id>.json`.

use std::path::{Path, PathBuf};

use super::traits::{AgentSnapshot, SnapshotStore};
use crate::error::StoreError;

const SNAPSHOT_EXTENSION: &str = "json";

/// Stores snapshots as JSON files in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// The directory is created lazily on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the snapshot file for an agent
    pub fn snapshot_path(&self, agent_id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", encode_agent_id(agent_id), SNAPSHOT_EXTENSION))
    }

    /// Ids of all agents with a snapshot in this directory, sorted
    pub fn list_agents(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(decode_file_stem)
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Encode an agent id as a file stem that stays inside the snapshot directory
///
/// ASCII alphanumerics, `-`, `_` and non-leading `.` pass through; every other
/// byte becomes `%XX`. Distinct ids always get distinct file names.
fn encode_agent_id(agent_id: &str) -> String {
    let mut encoded = String::with_capacity(agent_id.len());
    for (i, byte) in agent_id.bytes().enumerate() {
        let keep = byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'_')
            || (byte == b'.' && i > 0);
        if keep {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

/// Inverse of [`encode_agent_id`]; `None` for stems it never produces
fn decode_file_stem(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut rest = stem.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else {
            bytes.push(byte);
            rest = tail;
        }
    }
    String::from_utf8(bytes).ok()
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: &AgentSnapshot) -> Result<(), StoreError> {
        let path = self.snapshot_path(&snapshot.agent_id);

        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let content = serde_json::to_string_pretty(snapshot)?;

        // Write then rename so readers never see a truncated file
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Saved agent snapshot");
        Ok(())
    }

    fn load(&self, agent_id: &str) -> Result<Option<AgentSnapshot>, StoreError> {
        let path = self.snapshot_path(agent_id);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
