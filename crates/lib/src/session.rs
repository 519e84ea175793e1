//! Chat session controller: binds an opened chat to the generation client, the visible
//! transcript and the panel state.
//!
//! This is the non-rendering half of the chat window. A front end draws `transcript()` and
//! `panels()`, and forwards user input and client events here.

use crate::client::{ChatClient, ClientEvent};
use crate::panels::Panels;
use crate::records::LoadedChat;
use crate::transcript::Transcript;

pub struct ChatSession<C: ChatClient> {
    client: C,
    transcript: Transcript,
    panels: Panels,
    current: Option<LoadedChat>,
    generating: bool,
}

impl<C: ChatClient> ChatSession<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            transcript: Transcript::default(),
            panels: Panels::default(),
            current: None,
            generating: false,
        }
    }

    /// Show `chat` and seed the client with its history, payload, parameters and bot.
    pub fn load(&mut self, chat: LoadedChat) {
        self.transcript = Transcript::new(chat.chat.chat.clone());
        self.client.set_history(&chat.chat.chat);
        self.client.set_payload(&chat.chat.payload);
        self.client.set_temperature(chat.chat.temperature);
        self.client.set_model(&chat.bot.model);
        self.client.set_persona(&chat.bot.description);
        self.client.set_workflow(&chat.bot.workflow);
        self.panels.apply_bot(&chat.bot);
        self.generating = false;
        self.current = Some(chat);
    }

    /// Submit user input. Blank input is ignored. Returns whether generation was started.
    pub fn send(&mut self, input: &str) -> bool {
        let Some(text) = self.transcript.submit(input) else {
            return false;
        };
        self.client.add_user_message(&text);
        self.client.generate();
        self.generating = true;
        true
    }

    /// Apply client output to the transcript.
    pub fn handle(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Token(token) => self.transcript.push_token(&token),
            ClientEvent::Done(full) => {
                self.transcript.finish();
                self.generating = false;
                log::debug!("reply finished ({} chars)", full.len());
            }
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut Panels {
        &mut self.panels
    }

    pub fn current(&self) -> Option<&LoadedChat> {
        self.current.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}
