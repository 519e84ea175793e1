//! Error types for the JSON store and the record loaders.

use std::path::{Path, PathBuf};

/// Coarse failure class, for callers that branch on the outcome rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file does not exist.
    NotFound,
    /// The file is not valid JSON.
    Parse,
    /// Any other read/write failure (permissions, invalid UTF-8, ...).
    Io,
    /// Valid JSON, but not the shape the record requires.
    Schema,
}

/// Failure reading or writing a single JSON file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is missing required keys: {}", path.display(), missing.join(", "))]
    MissingKeys { path: PathBuf, missing: Vec<String> },

    #[error("invalid record in {}: {detail}", path.display())]
    InvalidRecord { path: PathBuf, detail: String },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Parse { .. } => ErrorKind::Parse,
            StoreError::Io { .. } => ErrorKind::Io,
            StoreError::MissingKeys { .. } | StoreError::InvalidRecord { .. } => ErrorKind::Schema,
        }
    }

    /// Path of the file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            StoreError::NotFound { path }
            | StoreError::Parse { path, .. }
            | StoreError::Io { path, .. }
            | StoreError::MissingKeys { path, .. }
            | StoreError::InvalidRecord { path, .. } => path,
        }
    }

    /// Map an i/o error to `NotFound` or `Io`.
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Failure opening a chat: which stage failed, and the underlying store error.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("loading chat: {0}")]
    Chat(#[source] StoreError),

    #[error("loading bot for chat {}: {source}", chat.display())]
    Bot {
        chat: PathBuf,
        #[source]
        source: StoreError,
    },
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        self.store_error().kind()
    }

    pub fn store_error(&self) -> &StoreError {
        match self {
            LoadError::Chat(e) => e,
            LoadError::Bot { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let e = StoreError::from_io(
            Path::new("/x.json"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(e.kind(), ErrorKind::NotFound);
        assert_eq!(e.path(), Path::new("/x.json"));
    }

    #[test]
    fn missing_keys_message_lists_every_key() {
        let e = StoreError::MissingKeys {
            path: PathBuf::from("chat.json"),
            missing: vec!["Name".into(), "Payload".into()],
        };
        assert_eq!(e.kind(), ErrorKind::Schema);
        assert!(e.to_string().contains("Name, Payload"));
    }

    #[test]
    fn bot_error_forwards_kind() {
        let e = LoadError::Bot {
            chat: PathBuf::from("a.json"),
            source: StoreError::NotFound {
                path: PathBuf::from("bot/Bot Description.json"),
            },
        };
        assert_eq!(e.kind(), ErrorKind::NotFound);
    }
}
