//! Application state: the resolved layout, the session pointer and the chat loader, held in
//! one place and passed by reference to whatever front end needs them.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{self, Config, Layout};
use crate::error::{LoadError, StoreError};
use crate::pointer::SessionPointer;
use crate::records::{ChatLoader, LoadedChat};
use crate::scan::{self, ScanOptions, PROBE_KEYS};

/// What the front end should show first.
#[derive(Debug)]
pub enum Startup {
    /// No chat exists yet (the "create your first chat" state).
    Empty,
    /// A chat was opened.
    Ready(LoadedChat),
    /// Chats exist, but the one to open failed to load.
    Failed(LoadError),
}

pub struct Library {
    config: Config,
    layout: Layout,
    loader: ChatLoader,
}

impl Library {
    /// Load the config under `root` (or the default root) and resolve the layout.
    pub fn open(root: Option<PathBuf>) -> Result<Self> {
        let (config, root) = config::load_config(root)?;
        Ok(Self::with_config(config, &root))
    }

    pub fn with_config(config: Config, root: &Path) -> Self {
        let layout = config.layout(root);
        let loader = ChatLoader::new(&layout.chat_dir, SessionPointer::new(&layout.session_file))
            .with_base_dir(&layout.root)
            .with_scan_options(ScanOptions::default().recursive(config.recursive_scan));
        Self {
            config,
            layout,
            loader,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn loader(&self) -> &ChatLoader {
        &self.loader
    }

    pub fn pointer(&self) -> &SessionPointer {
        self.loader.pointer()
    }

    fn scan_options(&self) -> ScanOptions {
        ScanOptions::default().recursive(self.config.recursive_scan)
    }

    /// Whether any chat exists in the chat directory.
    pub fn has_chats(&self) -> bool {
        scan::find_first_matching(&self.layout.chat_dir, PROBE_KEYS, &self.scan_options())
            .is_some()
    }

    /// Last opened chat per the session pointer.
    pub fn last_chat(&self) -> Result<Option<PathBuf>, StoreError> {
        self.pointer().last_chat()
    }

    pub fn set_last_chat(&self, chat: &Path) -> Result<(), StoreError> {
        self.pointer().set_last_chat(chat)
    }

    /// Open `chat`, or the first chat in the chat directory when `None`.
    pub fn open_chat(&self, chat: Option<&Path>) -> Result<Option<LoadedChat>, LoadError> {
        self.loader.load(chat)
    }

    /// Open the chat named by the session pointer. A missing or corrupt pointer is logged
    /// and treated as empty, which falls back to the first chat in the chat directory.
    pub fn open_last(&self) -> Result<Option<LoadedChat>, LoadError> {
        let last = match self.last_chat() {
            Ok(last) => last,
            Err(e) => {
                log::warn!("ignoring session pointer: {}", e);
                None
            }
        };
        self.open_chat(last.as_deref())
    }

    /// Decide the first screen: empty state when the probe finds no chat, otherwise the
    /// last chat (or the fallback).
    pub fn startup(&self) -> Startup {
        if !self.has_chats() {
            log::info!("no chats found in {}", self.layout.chat_dir.display());
            return Startup::Empty;
        }
        match self.open_last() {
            Ok(Some(chat)) => Startup::Ready(chat),
            Ok(None) => Startup::Empty,
            Err(e) => {
                log::error!("failed to open last chat: {}", e);
                Startup::Failed(e)
            }
        }
    }

    /// Bot directory of the last opened chat.
    pub fn current_bot_dir(&self) -> Result<Option<PathBuf>, StoreError> {
        let Some(chat_path) = self.last_chat()? else {
            return Ok(None);
        };
        let chat = self.loader.read(&chat_path)?;
        Ok(Some(self.loader.bot_dir(&chat)))
    }
}
