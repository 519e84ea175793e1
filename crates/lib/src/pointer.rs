//! Session pointer: the persisted record naming the most recently opened chat.
//!
//! The file is a JSON object with at least `LastChat`. Other keys belong to whoever else
//! writes the file and are carried through every update untouched.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::store;

/// Key holding the last chat path.
pub const LAST_CHAT_KEY: &str = "LastChat";

/// Handle to the session pointer file.
#[derive(Debug, Clone)]
pub struct SessionPointer {
    path: PathBuf,
}

impl SessionPointer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the last opened chat; `None` when the pointer is empty.
    ///
    /// A missing or malformed pointer file is an error; no default is substituted here.
    pub fn last_chat(&self) -> Result<Option<PathBuf>, StoreError> {
        let record = self.read_object()?;
        let last = match record.get(LAST_CHAT_KEY) {
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(StoreError::InvalidRecord {
                    path: self.path.clone(),
                    detail: format!("{} must be a string, found {}", LAST_CHAT_KEY, other),
                })
            }
            None => {
                return Err(StoreError::MissingKeys {
                    path: self.path.clone(),
                    missing: vec![LAST_CHAT_KEY.to_string()],
                })
            }
        };
        if last.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(last)))
        }
    }

    /// Point `LastChat` at `chat`, preserving every other key of the record.
    ///
    /// The target is not checked for existence. When the pointer file does not exist yet it
    /// is created; a corrupt pointer file is reported and left as it is. Paths that are not
    /// valid UTF-8 cannot be stored in JSON and are rejected.
    pub fn set_last_chat(&self, chat: &Path) -> Result<(), StoreError> {
        let chat = chat.to_str().ok_or_else(|| StoreError::InvalidRecord {
            path: self.path.clone(),
            detail: format!("{} is not valid UTF-8: {}", LAST_CHAT_KEY, chat.display()),
        })?;
        let mut record = match self.read_object() {
            Ok(record) => record,
            Err(StoreError::NotFound { .. }) => {
                log::info!("creating session pointer at {}", self.path.display());
                Map::new()
            }
            Err(e) => return Err(e),
        };
        record.insert(LAST_CHAT_KEY.to_string(), Value::String(chat.to_string()));
        store::write_json(&self.path, &Value::Object(record))
    }

    fn read_object(&self) -> Result<Map<String, Value>, StoreError> {
        match store::read_json(&self.path)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::InvalidRecord {
                path: self.path.clone(),
                detail: "session pointer must be a JSON object".to_string(),
            }),
        }
    }
}
