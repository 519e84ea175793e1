//! Persisted chat and bot records.
//!
//! A chat file names the bot directory it runs against; the bot directory holds a
//! `Bot Description.json`. Both are schema-checked on load: every required key must be
//! present, missing keys are reported together.

mod bot;
mod chat;

pub use bot::{load_bot, BotRecord, BOT_FILE_NAME, BOT_KEYS};
pub use chat::{ChatLoader, ChatRecord, LoadedChat, CHAT_KEYS};
