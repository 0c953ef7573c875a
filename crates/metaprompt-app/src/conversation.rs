//! Transcript state of the conversation view.

use chrono::Local;
use metaprompt_common::{Message, Role};

use crate::attachment::Attachment;
use crate::strings::Strings;

/// Ordered messages and the pending attachment.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    attachment: Option<Attachment>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) -> &Message {
        let index = self.messages.len();
        self.messages.push(message);
        &self.messages[index]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drop every message and the pending attachment.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.attachment = None;
    }

    /// Replaces any attachment staged earlier.
    pub fn attach(&mut self, attachment: Attachment) -> &Attachment {
        self.attachment.insert(attachment)
    }

    /// Returns whether something was attached.
    pub fn detach(&mut self) -> bool {
        self.attachment.take().is_some()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn take_attachment(&mut self) -> Option<Attachment> {
        self.attachment.take()
    }
}

/// `[HH:MM] label:` header followed by the content.
pub fn render(message: &Message, strings: &Strings) -> String {
    let label = match message.role() {
        Role::User => strings.user_label,
        Role::Model => strings.model_label,
    };
    let time = message.timestamp().with_timezone(&Local).format("%H:%M");
    format!("[{time}] {label}:\n{}\n", message.content())
}
