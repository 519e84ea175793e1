//! Visible chat transcript: user turns, streamed reply tokens, turn separators.

/// Transcript text as shown in the chat view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Record a user turn. Input is trimmed; blank input is ignored and returns `None`.
    /// Otherwise appends the user block plus the reply header and returns the trimmed text.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        self.text.push_str(&format!("\nYou:\n{}\n\nModel:\n", text));
        Some(text.to_string())
    }

    /// Append a chunk of the streamed reply.
    pub fn push_token(&mut self, token: &str) {
        self.text.push_str(token);
    }

    /// Close the current reply.
    pub fn finish(&mut self) {
        self.text.push_str("\n\n");
    }
}
