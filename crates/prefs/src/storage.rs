// Persistent key-value storage for preferences
// File-backed store lives at ~/.config/penmark/preferences.json

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Flat key→string persistence medium. Every write replaces the full key
/// set; there is no per-key update and no transactional guarantee.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the stored key set with `entries`.
    fn put_all(&mut self, entries: &[(&str, String)]) -> Result<(), String>;
}

/// JSON file storage: a single flat object of string keys and values.
pub struct FileStorage {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

impl FileStorage {
    /// Default preferences file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("penmark")
            .join("preferences.json")
    }

    /// Open the default preferences file, reading whatever is there.
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    /// Open a preferences file at `path`. A missing, unreadable, or
    /// malformed file yields an empty map; nothing here is fatal.
    pub fn open(path: PathBuf) -> Self {
        let map = match fs::read_to_string(&path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str::<BTreeMap<String, String>>(&cleaned) {
                    Ok(map) => map,
                    Err(e) => {
                        log::warn!("malformed preferences file {:?}: {}", path, e);
                        BTreeMap::new()
                    }
                }
            }
            Err(_) => BTreeMap::new(),
        };
        Self { path, map }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn put_all(&mut self, entries: &[(&str, String)]) -> Result<(), String> {
        self.map = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(&self.map).map_err(|e| e.to_string())?;
        fs::write(&self.path, json).map_err(|e| e.to_string())
    }
}

/// In-process storage for tests and headless hosts (no durable medium:
/// the store runs on defaults for the process lifetime).
#[derive(Default)]
pub struct MemoryStorage {
    map: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with persisted-looking values, for tests.
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            map: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn put_all(&mut self, entries: &[(&str, String)]) -> Result<(), String> {
        self.map = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Ok(())
    }
}
