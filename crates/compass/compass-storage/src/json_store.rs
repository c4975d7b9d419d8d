//! File-backed [`IStateStore`]: one pretty-printed JSON file per document.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use compass_core::constants::DOCUMENT_VERSION;
use compass_core::errors::{CompassResult, StorageError};
use compass_core::models::{CacheDocument, GraphDocument, HistoryDocument};
use compass_core::traits::IStateStore;

use crate::recovery;

const GRAPH_FILE: &str = "graph.json";
const HISTORY_FILE: &str = "history.json";
const CACHE_FILE: &str = "cache.json";

/// Stores documents under one directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> CompassResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read<T: DeserializeOwned>(&self, file: &str, version_of: fn(&T) -> u32) -> CompassResult<Option<T>> {
        let path = self.path(file);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Io {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        };
        let doc: T = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                recovery::quarantine(&path);
                return Err(StorageError::Corrupt {
                    document: file.to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        };
        let found = version_of(&doc);
        if found > DOCUMENT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                document: file.to_string(),
                found,
                supported: DOCUMENT_VERSION,
            }
            .into());
        }
        tracing::debug!(document = file, "document loaded");
        Ok(Some(doc))
    }

    fn write<T: Serialize>(&self, file: &str, doc: &T) -> CompassResult<()> {
        let path = self.path(file);
        let body = serde_json::to_vec_pretty(doc).map_err(|e| StorageError::Serialization {
            document: file.to_string(),
            reason: e.to_string(),
        })?;
        let io_err = |e: std::io::Error| StorageError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(&body).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;
        tracing::debug!(document = file, bytes = body.len(), "document saved");
        Ok(())
    }
}

impl IStateStore for JsonFileStore {
    fn load_graph(&self) -> CompassResult<Option<GraphDocument>> {
        self.read(GRAPH_FILE, |d: &GraphDocument| d.metadata.version)
    }

    fn save_graph(&self, doc: &GraphDocument) -> CompassResult<()> {
        self.write(GRAPH_FILE, doc)
    }

    fn load_history(&self) -> CompassResult<Option<HistoryDocument>> {
        self.read(HISTORY_FILE, |d: &HistoryDocument| d.version)
    }

    fn save_history(&self, doc: &HistoryDocument) -> CompassResult<()> {
        self.write(HISTORY_FILE, doc)
    }

    fn load_cache(&self) -> CompassResult<Option<CacheDocument>> {
        self.read(CACHE_FILE, |d: &CacheDocument| d.version)
    }

    fn save_cache(&self, doc: &CacheDocument) -> CompassResult<()> {
        self.write(CACHE_FILE, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_documents_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.load_graph().unwrap().is_none());
        assert!(store.load_history().unwrap().is_none());
        assert!(store.load_cache().unwrap().is_none());
    }

    #[test]
    fn corrupt_document_is_reported_and_quarantined() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join(HISTORY_FILE), "{ not json").unwrap();

        let err = store.load_history().unwrap_err();
        assert!(err.to_string().contains("corrupt document"));
        assert!(!dir.path().join(HISTORY_FILE).exists());
        assert!(store.load_history().unwrap().is_none());
    }

    #[test]
    fn newer_document_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join(CACHE_FILE), r#"{"version": 99}"#).unwrap();
        let err = store.load_cache().unwrap_err();
        assert!(err.to_string().contains("unsupported document version 99"));
    }
}
