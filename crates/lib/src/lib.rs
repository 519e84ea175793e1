//! Tavern core library: the JSON-backed chat store (session pointer, chat and bot records,
//! directory scanner) and the non-rendering chat window logic shared by the front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod init;
pub mod library;
pub mod panels;
pub mod pointer;
pub mod records;
pub mod scan;
pub mod session;
pub mod store;
pub mod transcript;

pub use error::{ErrorKind, LoadError, StoreError};
