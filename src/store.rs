// src/store.rs
//! Revalidation cache: one `CachedPage` per subject, keyed by the origin URL.
//!
//! `MemoryStore` lives for the process; `FileStore` keeps one JSON file per key
//! under `.store/` so the CLI can revalidate across runs.
//! Concurrent writers for the same key are last-writer-wins.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    process,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use serde::{Deserialize, Serialize};

use crate::core::net::Validators;
use crate::core::sanitize::key_to_filename;
use crate::error::ChartError;

/// Serialized as `{ "html": .., "etag": .., "lastModified": .. }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPage {
    pub html: String,
    #[serde(flatten)]
    pub validators: Validators,
}

pub trait CacheStore {
    /// Missing or unreadable entries are `None`.
    fn get(&self, key: &str) -> Option<CachedPage>;
    fn put(&self, key: &str, page: &CachedPage) -> Result<(), ChartError>;
}

impl<T: CacheStore + ?Sized> CacheStore for &T {
    fn get(&self, key: &str) -> Option<CachedPage> {
        (**self).get(key)
    }
    fn put(&self, key: &str, page: &CachedPage) -> Result<(), ChartError> {
        (**self).put(key, page)
    }
}

impl<T: CacheStore + ?Sized> CacheStore for Box<T> {
    fn get(&self, key: &str) -> Option<CachedPage> {
        (**self).get(key)
    }
    fn put(&self, key: &str, page: &CachedPage) -> Result<(), ChartError> {
        (**self).put(key, page)
    }
}

/* ---------------- memory ---------------- */

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CachedPage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<CachedPage> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, page: &CachedPage) -> Result<(), ChartError> {
        // A poisoned map still holds usable entries.
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(s!(key), page.clone());
        Ok(())
    }
}

/* ---------------- file ---------------- */

pub struct FileStore {
    dir: PathBuf,
}

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key_to_filename(key))
    }

    fn read(&self, path: &Path) -> Result<CachedPage, ChartError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<CachedPage> {
        let path = self.path_for(key);
        match self.read(&path) {
            Ok(page) => Some(page),
            Err(ChartError::Io(e)) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                loge!("Cache read {}: {e}", path.display());
                None
            }
        }
    }

    fn put(&self, key: &str, page: &CachedPage) -> Result<(), ChartError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // write-then-rename so a reader never sees half a file;
        // each write gets its own temp name so overlapping writers can't swap halves
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("json.{}.{seq}.tmp", process::id()));
        fs::write(&tmp, serde_json::to_vec(page)?)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str, etag: Option<&str>) -> CachedPage {
        CachedPage {
            html: s!(html),
            validators: Validators { etag: etag.map(String::from), last_modified: None },
        }
    }

    #[test]
    fn json_shape_is_flat() {
        let v = serde_json::to_value(page("<p>", Some("\"e1\""))).unwrap();
        assert_eq!(v["html"], "<p>");
        assert_eq!(v["etag"], "\"e1\"");
        assert!(v["lastModified"].is_null());

        let back: CachedPage = serde_json::from_str(r#"{"html":"x","lastModified":"Tue"}"#).unwrap();
        assert_eq!(back.validators.etag, None);
        assert_eq!(back.validators.last_modified.as_deref(), Some("Tue"));
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new();
        assert!(store.get("k").is_none());
        store.put("k", &page("a", None)).unwrap();
        store.put("k", &page("b", Some("e"))).unwrap();
        assert_eq!(store.get("k"), Some(page("b", Some("e"))));
        assert_eq!(store.len(), 1);
    }
}
