use log::{trace, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

pub const PROGRESS_KEY: &str = "cc-progress";
pub const SETTINGS_KEY: &str = "cc-settings";

/// Synchronous string key-value storage for JSON blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> std::io::Result<()>;
    fn remove(&mut self, key: &str) -> std::io::Result<()>;
}

pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

pub fn shared<S: KeyValueStore + 'static>(store: S) -> SharedStore {
    Rc::new(RefCell::new(store))
}

/// Reads and parses `key`; absent or unparseable blobs are `None`.
pub fn load_json<T: DeserializeOwned>(store: &SharedStore, key: &str) -> Option<T> {
    let contents = store.borrow().get(key)?;
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(target: "storage", "Ignoring unreadable {}: {}", key, err);
            None
        }
    }
}

pub fn save_json<T: Serialize>(store: &SharedStore, key: &str, value: &T) -> std::io::Result<()> {
    let contents = serde_json::to_string(value)?;
    trace!(target: "storage", "Writing {}: {}", key, contents);
    store.borrow_mut().set(key, contents)
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> std::io::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> std::io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside `data_dir`.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `$COORDINATE_CAVE_DATA_DIR`, falling back to `./.coordinate-cave`.
    pub fn data_dir_from_env() -> PathBuf {
        std::env::var("COORDINATE_CAVE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".coordinate-cave"))
    }

    fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: String) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.path(key), value)
    }

    fn remove(&mut self, key: &str) -> std::io::Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}
