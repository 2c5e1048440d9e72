//! The persisted key-value store
//!
//! A `ConfigStore` loads and saves configuration data as a single JSON
//! document. Keys are registered explicitly with [`ConfigStore::set`]; on
//! save, every key not starting with `_` is written out along with the
//! comment line, and the whole document is reloaded on next startup. If no
//! config file is found, the store starts empty and the first save creates
//! the file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::codec;
use crate::error::ConfigError;
use crate::value::Value;

/// The comment rides under this key and is persisted despite the underscore.
pub const COMMENT_KEY: &str = "_comment";

const DEFAULT_COMMENT: &str = "DO NOT HAND EDIT!";

/// In-memory key-value bag backed by one JSON config file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    comment: String,
    entries: BTreeMap<String, Value>,
}

impl ConfigStore {
    /// Open the store backed by `<config_dir>/<folder>/<file_name>.conf`,
    /// creating the folder if needed and loading the file if present.
    pub fn open(folder: &str, file_name: &str) -> Result<Self, ConfigError> {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(folder);
        fs::create_dir_all(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        path.push(format!("{file_name}.conf"));
        Self::open_at(path)
    }

    /// Open the store against an explicit file path. Same lifecycle as
    /// [`ConfigStore::open`], without the config-directory convention.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut store = ConfigStore {
            path: path.into(),
            comment: DEFAULT_COMMENT.to_string(),
            entries: BTreeMap::new(),
        };
        store.reload()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the backing file, replacing the in-memory contents.
    ///
    /// The document is decoded in full before the live store is touched, so
    /// a corrupt file never partially populates it. An absent file resets
    /// the store to empty.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Config file not found, starting empty");
                self.comment = DEFAULT_COMMENT.to_string();
                self.entries.clear();
                return Ok(());
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let document: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                path: self.path.clone(),
                source: e,
            })?;
        let Some(object) = document.as_object() else {
            return Err(ConfigError::CorruptConfig(
                "config document must be a JSON object".to_string(),
            ));
        };

        let mut comment = DEFAULT_COMMENT.to_string();
        let mut entries = BTreeMap::new();
        for (key, node) in object {
            if key == COMMENT_KEY {
                let Some(text) = node.as_str() else {
                    return Err(ConfigError::CorruptConfig(format!(
                        "'{COMMENT_KEY}' must be a string"
                    )));
                };
                comment = text.to_string();
            } else if key.starts_with('_') {
                warn!(key = %key, "Ignoring reserved key found in config file");
            } else {
                entries.insert(key.clone(), codec::decode(node)?);
            }
        }

        self.comment = comment;
        self.entries = entries;
        info!(path = %self.path.display(), keys = self.entries.len(), "Loaded config");
        Ok(())
    }

    /// Write the whole store back to disk, creating the file if needed.
    /// Keys starting with `_` are not persisted; the comment always is.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let document = self.to_document()?;
        let contents = serde_json::to_string_pretty(&document).map_err(|e| ConfigError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, contents).map_err(|e| ConfigError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        info!(path = %self.path.display(), keys = self.entries.len(), "Saved config");
        Ok(())
    }

    /// Encode the persistable view of the store: `_comment` first, then
    /// every non-underscore key in sorted order.
    pub fn to_document(&self) -> Result<serde_json::Value, ConfigError> {
        let mut document = serde_json::Map::with_capacity(self.entries.len() + 1);
        document.insert(
            COMMENT_KEY.to_string(),
            serde_json::Value::String(self.comment.clone()),
        );
        for (key, value) in &self.entries {
            if key.starts_with('_') {
                warn!(key = %key, "Not persisting reserved key");
                continue;
            }
            document.insert(key.clone(), codec::encode(value)?);
        }
        Ok(serde_json::Value::Object(document))
    }

    /// Look up a key. Pure read: an unset key is simply absent, the store
    /// is never mutated by a lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Return the value under `key`, inserting `default` first if the key
    /// is unset.
    pub fn get_or_insert(&mut self, key: impl Into<String>, default: impl Into<Value>) -> &Value {
        self.entries.entry(key.into()).or_insert_with(|| default.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }
}
