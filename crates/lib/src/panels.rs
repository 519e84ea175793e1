//! Visibility state of the chat window's side panels.
//!
//! Two panels share one side of the window: the image panel and the chat list. The image
//! panel has a user preference (its toggle) and a lock that applies while the current bot
//! has no image-generation workflow. While the chat list is open the image panel is hidden
//! and its toggle disabled; closing the list brings it back if preferred and unlocked.

use crate::records::BotRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    image_preferred: bool,
    image_locked: bool,
    chat_list_visible: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            image_preferred: true,
            image_locked: false,
            chat_list_visible: false,
        }
    }
}

impl Panels {
    pub fn image_visible(&self) -> bool {
        self.image_preferred && !self.image_locked && !self.chat_list_visible
    }

    pub fn image_locked(&self) -> bool {
        self.image_locked
    }

    pub fn chat_list_visible(&self) -> bool {
        self.chat_list_visible
    }

    /// Whether the image panel toggle accepts input.
    pub fn image_toggle_enabled(&self) -> bool {
        !self.image_locked && !self.chat_list_visible
    }

    /// Hide the image panel, or show it again unless locked.
    pub fn toggle_image(&mut self) {
        if self.image_preferred {
            self.image_preferred = false;
        } else if !self.image_locked {
            self.image_preferred = true;
        }
    }

    pub fn toggle_chat_list(&mut self) {
        self.chat_list_visible = !self.chat_list_visible;
    }

    /// Lock or unlock the image panel for `bot`. A bot with a workflow also shows the panel.
    pub fn apply_bot(&mut self, bot: &BotRecord) {
        if bot.image_generation_enabled() {
            self.image_locked = false;
            self.image_preferred = true;
        } else {
            self.image_locked = true;
        }
    }

    pub fn image_toggle_label(&self) -> &'static str {
        if self.image_visible() {
            ">>"
        } else {
            "<<"
        }
    }

    pub fn chat_list_toggle_label(&self) -> &'static str {
        if self.chat_list_visible {
            "<<"
        } else {
            ">>"
        }
    }
}
