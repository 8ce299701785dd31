//! Key-value storage abstraction and the persisted best-level record
//!
//! The embedder injects a [`Storage`] (browser LocalStorage, a JSON file, an
//! in-memory map for tests). The only record the game keeps is the best
//! level ever reached, under a fixed versioned key. Storage failures are
//! never fatal: reads fall back to the baseline, writes are logged and
//! dropped.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Injected key-value persistence capability.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Volatile storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

/// File-backed storage: a flat JSON object, written through on every set.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Open (or create) the store at `path`. A missing or corrupt file is
    /// treated as empty rather than failing the session.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let map = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(map) => map,
                Err(err) => {
                    log::warn!("corrupt store {}: {err}", path.display());
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                log::warn!("cannot read store {}: {err}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, map }
    }

    fn flush(&self) {
        let text = match serde_json::to_string_pretty(&self.map) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("cannot serialize store: {err}");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, text) {
            log::warn!("cannot write store {}: {err}", self.path.display());
        }
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

/// The persisted best-level record.
///
/// Monotone: `record` only ever raises the value, and every update is a
/// synchronous write-through under the versioned key.
#[derive(Debug, Clone, Copy)]
pub struct BestLevel {
    value: u32,
}

impl BestLevel {
    /// Versioned storage key
    pub const KEY: &'static str = "mirror_maze_best_level_v1";

    /// Baseline when nothing (or garbage) is stored
    pub const BASELINE: u32 = 1;

    /// Read the record; a missing or unparseable value yields the baseline.
    pub fn load(storage: &dyn Storage) -> Self {
        let value = storage
            .get(Self::KEY)
            .and_then(|raw| match raw.trim().parse::<u32>() {
                Ok(v) => Some(v),
                Err(err) => {
                    log::warn!("corrupt best-level value {raw:?}: {err}");
                    None
                }
            })
            .unwrap_or(Self::BASELINE)
            .max(Self::BASELINE);
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Fold in a newly observed level and write the record through.
    pub fn record(&mut self, level: u32, storage: &mut dyn Storage) {
        self.value = self.value.max(level);
        storage.set(Self::KEY, &self.value.to_string());
    }
}
