//! Configuration types and loading.
//!
//! Config is loaded from `config.json` in the application root (e.g. `~/.tavern/config.json`).
//! Every key is optional; a missing file means the default layout:
//! `<root>/Save/.temp.json` for the session pointer and `<root>/Save/Chat` for chats.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file inside the application root.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Top-level application config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Save directory (default "Save"). Relative paths are resolved against the root.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,

    /// Chat directory (default "Chat"). Relative paths are resolved against the save directory.
    #[serde(default = "default_chat_dir")]
    pub chat_dir: PathBuf,

    /// Session pointer file (default ".temp.json"). Relative paths are resolved against the save directory.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// When true, the chat directory is scanned recursively for chats.
    #[serde(default)]
    pub recursive_scan: bool,
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("Save")
}

fn default_chat_dir() -> PathBuf {
    PathBuf::from("Chat")
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".temp.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            chat_dir: default_chat_dir(),
            session_file: default_session_file(),
            recursive_scan: false,
        }
    }
}

/// Resolved absolute-or-root-relative locations of every persisted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub save_dir: PathBuf,
    pub chat_dir: PathBuf,
    pub session_file: PathBuf,
}

impl Config {
    /// Resolve the configured paths against `root`.
    pub fn layout(&self, root: &Path) -> Layout {
        let save_dir = resolve_against(root, &self.save_dir);
        let chat_dir = resolve_against(&save_dir, &self.chat_dir);
        let session_file = resolve_against(&save_dir, &self.session_file);
        Layout {
            root: root.to_path_buf(),
            save_dir,
            chat_dir,
            session_file,
        }
    }
}

/// Join `path` onto `base` unless it is absolute or empty.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || path.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Resolve the application root from env or default: TAVERN_HOME, else ~/.tavern, else ".".
pub fn default_root() -> PathBuf {
    std::env::var("TAVERN_HOME")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".tavern"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
}

/// Load config from `<root>/config.json`. Missing file => default config.
/// Returns the config and the root that was used.
pub fn load_config(root: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let root = root.unwrap_or_else(default_root);
    let path = root.join(CONFIG_FILE_NAME);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_save_directory_convention() {
        let layout = Config::default().layout(Path::new("/app"));
        assert_eq!(layout.save_dir, PathBuf::from("/app/Save"));
        assert_eq!(layout.chat_dir, PathBuf::from("/app/Save/Chat"));
        assert_eq!(layout.session_file, PathBuf::from("/app/Save/.temp.json"));
    }

    #[test]
    fn absolute_overrides_are_kept() {
        let config = Config {
            chat_dir: PathBuf::from("/data/chats"),
            ..Config::default()
        };
        let layout = config.layout(Path::new("/app"));
        assert_eq!(layout.chat_dir, PathBuf::from("/data/chats"));
        assert_eq!(layout.session_file, PathBuf::from("/app/Save/.temp.json"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let json = r#"{ "recursiveScan": true, "saveDir": "State" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.recursive_scan);
        let layout = config.layout(Path::new("/app"));
        assert_eq!(layout.chat_dir, PathBuf::from("/app/State/Chat"));
    }

    #[test]
    fn resolve_against_joins_only_relative_paths() {
        let cwd = Path::new("/home/user/work");
        assert_eq!(
            resolve_against(cwd, Path::new("Save/Chat/a.json")),
            PathBuf::from("/home/user/work/Save/Chat/a.json")
        );
        assert_eq!(
            resolve_against(cwd, Path::new("/data/a.json")),
            PathBuf::from("/data/a.json")
        );
        assert_eq!(resolve_against(cwd, Path::new("")), PathBuf::new());
    }

    #[test]
    fn load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, root) = load_config(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(root, dir.path());
        assert_eq!(config.session_file, PathBuf::from(".temp.json"));
    }

    #[test]
    fn load_config_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ nope").unwrap();
        let err = load_config(Some(dir.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }
}
