use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SessionStore;
use crate::utils::Result;

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    values: BTreeMap<String, String>,
    updated_at: Option<DateTime<Utc>>,
}

/// JSON-file store. Every write is flushed to disk immediately.
pub struct FileStore {
    data: Mutex<SessionFile>,
    path: PathBuf,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = Self::load_data(&path);
        Self {
            data: Mutex::new(data),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.lock().updated_at
    }

    fn load_data(path: &Path) -> SessionFile {
        if path.exists()
            && let Ok(content) = fs::read_to_string(path)
        {
            match serde_json::from_str(&content) {
                Ok(data) => return data,
                Err(e) => log::warn!("Ignoring corrupt session file {}: {e}", path.display()),
            }
        }
        SessionFile::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionFile> {
        self.data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn save_data(&self, data: &SessionFile) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut data = self.lock();
        apply(&mut data.values);
        data.updated_at = Some(Utc::now());
        self.save_data(&data)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("evac-portal-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token"), None);
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("abc"));
        store.remove("token").unwrap();
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let path = temp_path();
        {
            let store = FileStore::open(&path);
            store.set("resident_token", "r-1").unwrap();
            store.set("token", "a-1").unwrap();
            store.remove("token").unwrap();
            assert!(store.updated_at().is_some());
        }

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("resident_token").as_deref(), Some("r-1"));
        assert_eq!(reopened.get("token"), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("token"), None);
        store.set("token", "fresh").unwrap();
        assert_eq!(FileStore::open(&path).get("token").as_deref(), Some("fresh"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
