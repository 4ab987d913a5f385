use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

// ── Known keys ────────────────────────────────────────────────────────────────

pub const SOUND_ENABLED: &str = "settings.soundEnabled";
pub const HIGH_SCORE: &str = "snake.highScore";
pub const LAST_ACTIVE_APP: &str = "emulator.lastActiveApp";

// ── Store ─────────────────────────────────────────────────────────────────────

/// Persisted key/value state: one JSON object file, loaded at startup and
/// written through on every mutation. If the file ever fails to read or
/// write, the store degrades to memory-only for the rest of the session and
/// callers never see the failure.
pub struct Store {
    values: BTreeMap<String, Value>,
    path: Option<PathBuf>,
}

impl Store {
    pub fn open_default() -> Self {
        Self::open(default_store_file())
    }

    pub fn open(path: PathBuf) -> Self {
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, Value>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    log::warn!("store file {} is corrupt, starting empty: {err}", path.display());
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                log::warn!(
                    "cannot read store file {}, using in-memory store: {err}",
                    path.display()
                );
                return Self {
                    values: BTreeMap::new(),
                    path: None,
                };
            }
        };
        Self {
            values,
            path: Some(path),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            values: BTreeMap::new(),
            path: None,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) -> bool {
        self.values.insert(key.to_string(), value);
        self.flush();
        true
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.flush();
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.flush();
    }

    fn flush(&mut self) {
        let Some(path) = &self.path else { return };
        let result = serde_json::to_string_pretty(&self.values)
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(path, json).map_err(anyhow::Error::from));
        if let Err(err) = result {
            log::warn!(
                "store write to {} failed, degrading to in-memory: {err}",
                path.display()
            );
            self.path = None;
        }
    }

    // ── Typed accessors ───────────────────────────────────────────────────────
    // Unknown keys and corrupt values both fall back to the caller's default.

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> bool {
        self.set(key, Value::Bool(value))
    }

    pub fn get_u32(&self, key: &str, default: u32) -> u32 {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(default)
    }

    pub fn set_u32(&mut self, key: &str, value: u32) -> bool {
        self.set(key, Value::from(value))
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    pub fn set_string(&mut self, key: &str, value: &str) -> bool {
        self.set(key, Value::String(value.to_string()))
    }
}

fn default_store_file() -> PathBuf {
    let base = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("brickphone");
    let _ = std::fs::create_dir_all(&base);
    base.join("store.json")
}
