//! Seam to the external chat-generation client.
//!
//! The client's networking and generation live outside this crate. A front end hands the
//! chat session an implementation of [`ChatClient`] and feeds the client's output back as
//! [`ClientEvent`]s.

/// Operations the chat session drives on the generation client.
pub trait ChatClient {
    /// Visible transcript of the opened chat.
    fn set_history(&mut self, transcript: &str);

    /// Full request payload of the opened chat, passed through unchanged.
    fn set_payload(&mut self, payload: &serde_json::Value);

    fn set_temperature(&mut self, temperature: f64);

    fn set_model(&mut self, model: &str);

    /// Persona / system instructions of the bot.
    fn set_persona(&mut self, description: &str);

    fn set_workflow(&mut self, workflow: &str);

    fn add_user_message(&mut self, text: &str);

    /// Start generating a reply. Output arrives later as [`ClientEvent`]s.
    fn generate(&mut self);
}

/// Incremental output from the generation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A chunk of the reply.
    Token(String),
    /// Generation finished; carries the full reply.
    Done(String),
}
