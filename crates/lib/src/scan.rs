//! Directory scanner: find the first JSON file in a directory whose object carries a set of keys.
//!
//! Used as the "are there any chats" probe at startup and to pick a default chat when no
//! chat path is known. Enumeration follows the filesystem's order, which is unspecified
//! and differs between platforms.

use std::path::{Path, PathBuf};

use crate::store;

/// Keys the startup probe requires of a chat file.
pub const PROBE_KEYS: &[&str] = &["Name", "Bot Path", "Temperature", "Model", "Chat"];

/// Extension and recursion for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// File name suffix to consider, including the dot.
    pub extension: String,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: ".json".to_string(),
            recursive: false,
        }
    }
}

impl ScanOptions {
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

/// First file under `dir` whose parsed JSON is an object containing all `required_keys`.
///
/// Returns `None` when `dir` is missing, is not a directory, or holds no match. Files that
/// cannot be read or parsed are skipped.
pub fn find_first_matching(
    dir: &Path,
    required_keys: &[&str],
    options: &ScanOptions,
) -> Option<PathBuf> {
    if !dir.exists() {
        log::debug!("scan: no such directory: {}", dir.display());
        return None;
    }
    if !dir.is_dir() {
        log::debug!("scan: not a directory: {}", dir.display());
        return None;
    }

    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let read_dir = match std::fs::read_dir(&current) {
            Ok(d) => d,
            Err(e) => {
                log::debug!("scan: cannot list {}: {}", current.display(), e);
                continue;
            }
        };
        for entry in read_dir.flatten() {
            let path = entry.path();
            // Symlinked directories are not followed.
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                if options.recursive {
                    pending.push(path);
                }
                continue;
            }
            if !path.is_file() || !has_extension(&path, &options.extension) {
                continue;
            }
            match store::read_json(&path) {
                Ok(value) if store::has_keys(&value, required_keys) => return Some(path),
                Ok(_) => {}
                Err(e) => log::debug!("scan: skipping {}", e),
            }
        }
    }
    None
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.len() > extension.len() && n.ends_with(extension))
        .unwrap_or(false)
}
