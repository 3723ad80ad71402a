use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::warn;

/// Storage slot holding the bearer token.
pub const TOKEN_KEY: &str = "synergy-token";
/// Storage slot holding the JSON-encoded user record.
pub const USER_KEY: &str = "synergy-user";

/// String key/value persistence for session state, mirroring the browser
/// local-storage surface the session was originally written against.
///
/// The interface is deliberately infallible: logout must always succeed, so
/// implementations absorb I/O errors (logging them) rather than surfacing
/// them. A read that fails is indistinguishable from an absent value.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// On-disk storage: one JSON object in the platform data directory.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the default session file, loading whatever it already holds.
    pub fn open() -> std::io::Result<Self> {
        let dirs = ProjectDirs::from("com", "synergysphere", "synergy")
            .ok_or_else(|| std::io::Error::other("no home directory"))?;
        let dir = dirs.data_dir().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self::at(dir.join("session.json")))
    }

    pub fn at(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("session file {} is corrupt, starting empty: {e}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        match serde_json::to_string_pretty(entries) {
            Ok(raw) => {
                if let Err(e) = fs::write(&self.path, raw) {
                    warn!("failed to write session file {}: {e}", self.path.display());
                }
            }
            Err(e) => warn!("failed to encode session file: {e}"),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        let mut entries = self.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}
