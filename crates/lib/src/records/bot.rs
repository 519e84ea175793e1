//! Bot record: model name, persona text and image-generation workflow.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::StoreError;
use crate::store;

/// File name of the bot record inside a bot directory.
pub const BOT_FILE_NAME: &str = "Bot Description.json";

/// Keys every bot record must carry.
pub const BOT_KEYS: &[&str] = &["Model", "Description", "Workflow", "WorkflowPath"];

/// Bot persona and model configuration. Read-only from this crate's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotRecord {
    /// Model name handed to the chat client.
    #[serde(rename = "Model")]
    pub model: String,
    /// Persona / system instructions.
    #[serde(rename = "Description")]
    pub description: String,
    /// Workflow reference for image generation.
    #[serde(rename = "Workflow")]
    pub workflow: String,
    /// Empty when no image-generation workflow is configured.
    #[serde(rename = "WorkflowPath")]
    pub workflow_path: String,
}

impl BotRecord {
    /// Whether image-generation UI should be offered for this bot.
    pub fn image_generation_enabled(&self) -> bool {
        !self.workflow_path.is_empty()
    }
}

/// Load `<bot_dir>/Bot Description.json`.
pub fn load_bot(bot_dir: &Path) -> Result<BotRecord, StoreError> {
    let path = bot_dir.join(BOT_FILE_NAME);
    let bot: BotRecord = store::read_record(&path, BOT_KEYS)?;
    log::debug!("loaded bot {} (model {})", bot_dir.display(), bot.model);
    Ok(bot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn loads_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(BOT_FILE_NAME),
            r#"{ "Model": "llama3", "Description": "A pirate.", "Workflow": "wf", "WorkflowPath": "" }"#,
        )
        .unwrap();
        let bot = load_bot(dir.path()).unwrap();
        assert_eq!(bot.model, "llama3");
        assert_eq!(bot.description, "A pirate.");
        assert_eq!(bot.workflow, "wf");
        assert!(!bot.image_generation_enabled());
    }

    #[test]
    fn workflow_path_enables_image_generation() {
        let bot = BotRecord {
            model: "m".into(),
            description: String::new(),
            workflow: "wf".into(),
            workflow_path: "workflows/portrait.json".into(),
        };
        assert!(bot.image_generation_enabled());
    }

    #[test]
    fn missing_file_and_malformed_file_are_distinguishable() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_bot(dir.path()).unwrap_err().kind(), ErrorKind::NotFound);

        std::fs::write(dir.path().join(BOT_FILE_NAME), "{ \"Model\": ").unwrap();
        assert_eq!(load_bot(dir.path()).unwrap_err().kind(), ErrorKind::Parse);

        std::fs::write(dir.path().join(BOT_FILE_NAME), r#"{ "Model": "m" }"#).unwrap();
        match load_bot(dir.path()).unwrap_err() {
            StoreError::MissingKeys { missing, .. } => {
                assert_eq!(missing, vec!["Description", "Workflow", "WorkflowPath"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
