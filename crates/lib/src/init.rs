//! Initialize the application root: create the save and chat directories and an empty session pointer.
//!
//! Existing files are never touched, so running init on a populated root is a no-op.

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

use crate::config::{self, Layout};
use crate::pointer::LAST_CHAT_KEY;
use crate::store;

/// Ensure the application root has been initialized (session pointer exists).
pub fn require_initialized(layout: &Layout) -> Result<()> {
    if !layout.session_file.exists() {
        anyhow::bail!(
            "application root not initialized; run `tavern init` first (session file not found: {})",
            layout.session_file.display()
        );
    }
    Ok(())
}

/// Create the root layout if it does not exist.
/// - Creates the save and chat directories.
/// - Writes the session pointer with an empty `LastChat` if missing.
///
/// Returns the resolved layout.
pub fn init_root(root: &Path) -> Result<Layout> {
    let (config, root) = config::load_config(Some(root.to_path_buf()))?;
    let layout = config.layout(&root);

    for dir in [&layout.save_dir, &layout.chat_dir] {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
            log::info!("created directory {}", dir.display());
        }
    }

    if !layout.session_file.exists() {
        let session_file = &layout.session_file;
        store::write_json(session_file, &json!({ LAST_CHAT_KEY: "" }))
            .with_context(|| format!("writing session pointer to {}", session_file.display()))?;
        log::info!("created session pointer at {}", layout.session_file.display());
    } else {
        log::debug!(
            "session pointer already exists at {}, skipping",
            layout.session_file.display()
        );
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::SessionPointer;

    #[test]
    fn init_creates_layout_and_empty_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let layout = init_root(dir.path()).unwrap();
        assert!(layout.chat_dir.is_dir());
        require_initialized(&layout).unwrap();
        let pointer = SessionPointer::new(&layout.session_file);
        assert_eq!(pointer.last_chat().unwrap(), None);
    }

    #[test]
    fn init_keeps_existing_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let layout = init_root(dir.path()).unwrap();
        let pointer = SessionPointer::new(&layout.session_file);
        pointer.set_last_chat(Path::new("keep.json")).unwrap();
        init_root(dir.path()).unwrap();
        assert_eq!(pointer.last_chat().unwrap().as_deref(), Some(Path::new("keep.json")));
    }

    #[test]
    fn uninitialized_root_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let layout = config::Config::default().layout(dir.path());
        assert!(require_initialized(&layout).is_err());
    }
}
