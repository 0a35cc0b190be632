//! Key-value persistence of setting values.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Value;

/// Flat key-value storage of setting values.
pub trait SettingsStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing the previous value.
    fn set(&mut self, key: &str, value: Value);

    /// Removes the value stored under `key`, if any.
    fn remove(&mut self, key: &str);

    /// Returns `true` if some value is stored under `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access the settings file")]
    Io(#[from] io::Error),
    #[error("could not parse the settings file")]
    Parse(#[from] serde_json::Error),
    #[error("{key} expects {expected}, got {value:?}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
        value: Value,
    },
}

/// Settings store kept in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the stored keys and values, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Settings store backed by a JSON file holding a flat object.
///
/// The file is read once in [`JsonFileStore::open()`]; changes stay in memory until
/// [`JsonFileStore::save()`].
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: MemoryStore,
    dirty: bool,
}

impl JsonFileStore {
    /// Opens the settings file at `path`.
    ///
    /// A missing file is treated as an empty one; it's created on the first save.
    #[instrument(name = "JsonFileStore::open", skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();

        let values = match fs::read_to_string(&path) {
            Ok(contents) => MemoryStore {
                values: serde_json::from_str(&contents)?,
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("settings file does not exist yet");
                MemoryStore::new()
            }
            Err(err) => return Err(err.into()),
        };

        debug!("loaded {} values", values.len());

        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    /// Writes the values to the settings file if anything has changed since the last save.
    #[instrument(name = "JsonFileStore::save", skip_all, fields(path = %self.path.display()))]
    pub fn save(&mut self) -> Result<(), SettingsError> {
        if !self.dirty {
            return Ok(());
        }

        let contents = serde_json::to_string_pretty(&self.values.values)?;

        // Write next to the file and rename, so a crash mid-write doesn't lose the settings.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;

        self.dirty = false;
        debug!("saved {} values", self.values.len());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if there are changes not yet written to the file.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        if self.values.get(key).as_ref() != Some(&value) {
            self.values.set(key, value);
            self.dirty = true;
        }
    }

    fn remove(&mut self, key: &str) {
        if self.values.contains(key) {
            self.values.remove(key);
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "speed-fov-{}-{name}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.get("a").is_none());

        store.set("a", Value::Number(1.));
        store.set("b", Value::Bool(true));
        store.set("a", Value::Number(2.));
        assert_eq!(store.get("a"), Some(Value::Number(2.)));
        assert_eq!(
            store.iter().collect::<Vec<_>>(),
            [("a", &Value::Number(2.)), ("b", &Value::Bool(true))]
        );

        store.remove("a");
        assert!(!store.contains("a"));
        assert!(store.contains("b"));
    }

    #[test]
    fn missing_file_is_empty() {
        let path = temp_path("missing");

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert!(store.get("anything").is_none());
        assert!(!store.is_dirty());
        assert!(!path.exists());
    }

    #[test]
    fn save_and_reopen() {
        let path = temp_path("save");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("first_person.min_fov", Value::Number(56.5));
        store.set("first_person.enabled", Value::Bool(false));
        store.set(
            "first_person.g_force_profile",
            Value::Text("directional".to_owned()),
        );
        assert!(store.is_dirty());
        store.save().unwrap();
        assert!(!store.is_dirty());

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.get("first_person.min_fov"),
            Some(Value::Number(56.5))
        );
        assert_eq!(store.get("first_person.enabled"), Some(Value::Bool(false)));
        assert_eq!(
            store.get("first_person.g_force_profile"),
            Some(Value::Text("directional".to_owned()))
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn setting_same_value_is_not_a_change() {
        let path = temp_path("same");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("a", Value::Number(1.));
        store.save().unwrap();

        store.set("a", Value::Number(1.));
        store.remove("b");
        assert!(!store.is_dirty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn invalid_file() {
        let path = temp_path("invalid");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(SettingsError::Parse(_))
        ));

        fs::remove_file(&path).unwrap();
    }
}
