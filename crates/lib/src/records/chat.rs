//! Chat record and loader.
//!
//! Opening a chat reads the chat file, moves the session pointer to it and loads the bot the
//! chat runs against. When no chat path is known the first complete chat file in the chat
//! directory is used.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::bot::{load_bot, BotRecord};
use crate::error::{LoadError, StoreError};
use crate::pointer::SessionPointer;
use crate::scan::{self, ScanOptions};
use crate::store;

/// Keys every chat record must carry.
pub const CHAT_KEYS: &[&str] = &["Name", "Chat", "Bot Path", "Payload", "Temperature"];

/// One persisted chat session. Identified by its file path; extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    #[serde(rename = "Name")]
    pub name: String,
    /// Transcript as displayed.
    #[serde(rename = "Chat")]
    pub chat: String,
    /// Directory holding the bot record.
    #[serde(rename = "Bot Path")]
    pub bot_path: PathBuf,
    /// Full request payload, opaque here; passed through to the chat client.
    #[serde(rename = "Payload")]
    pub payload: serde_json::Value,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

/// A chat opened together with its bot.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedChat {
    /// File the chat was read from (the value written to the session pointer).
    pub path: PathBuf,
    pub chat: ChatRecord,
    /// Bot directory after resolving a relative `Bot Path`.
    pub bot_dir: PathBuf,
    pub bot: BotRecord,
}

/// Loads chats from a chat directory and keeps the session pointer in step.
#[derive(Debug, Clone)]
pub struct ChatLoader {
    chat_dir: PathBuf,
    pointer: SessionPointer,
    base_dir: Option<PathBuf>,
    scan: ScanOptions,
}

impl ChatLoader {
    pub fn new(chat_dir: impl Into<PathBuf>, pointer: SessionPointer) -> Self {
        Self {
            chat_dir: chat_dir.into(),
            pointer,
            base_dir: None,
            scan: ScanOptions::default(),
        }
    }

    /// Resolve relative bot paths against `dir` instead of the working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_scan_options(mut self, scan: ScanOptions) -> Self {
        self.scan = scan;
        self
    }

    pub fn chat_dir(&self) -> &Path {
        &self.chat_dir
    }

    pub fn pointer(&self) -> &SessionPointer {
        &self.pointer
    }

    /// Read and validate a chat file without side effects.
    pub fn read(&self, path: &Path) -> Result<ChatRecord, StoreError> {
        store::read_record(path, CHAT_KEYS)
    }

    /// First complete chat file in the chat directory, if any.
    pub fn default_chat(&self) -> Option<PathBuf> {
        scan::find_first_matching(&self.chat_dir, CHAT_KEYS, &self.scan)
    }

    /// Bot directory for `chat`, resolving a relative path against the base directory.
    pub fn bot_dir(&self, chat: &ChatRecord) -> PathBuf {
        match &self.base_dir {
            Some(base) if chat.bot_path.is_relative() => base.join(&chat.bot_path),
            _ => chat.bot_path.clone(),
        }
    }

    /// Open a chat.
    ///
    /// With no path (or an empty one) the first complete chat in the chat directory is
    /// opened; `Ok(None)` means there is none. On a successful read the session pointer is
    /// moved to the chat before the bot is loaded, so a broken bot still leaves the chat as
    /// the last opened one. Failing to update the pointer is logged and does not fail the
    /// load.
    pub fn load(&self, path: Option<&Path>) -> Result<Option<LoadedChat>, LoadError> {
        let path = match path.filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => p.to_path_buf(),
            None => match self.default_chat() {
                Some(p) => p,
                None => {
                    log::info!("no chats in {}", self.chat_dir.display());
                    return Ok(None);
                }
            },
        };

        let chat = self.read(&path).map_err(LoadError::Chat)?;
        if let Err(e) = self.pointer.set_last_chat(&path) {
            log::warn!("session pointer not updated: {}", e);
        }

        let bot_dir = self.bot_dir(&chat);
        let bot = load_bot(&bot_dir).map_err(|source| LoadError::Bot {
            chat: path.clone(),
            source,
        })?;
        log::info!("opened chat {} ({})", chat.name, path.display());

        Ok(Some(LoadedChat {
            path,
            chat,
            bot_dir,
            bot,
        }))
    }
}
