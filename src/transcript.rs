//! Conversation history sent with every completion request.
//!
//! The transcript always starts with exactly one system message. User and
//! assistant turns are appended after it in the order they happen, and a
//! reset drops everything except that first message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message. Fields are private so a message can't be
/// edited once it is part of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Transcript {
            messages: vec![Message::new(Role::System, system_prompt)],
        }
    }

    /// Adds a message to the end of the conversation.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    /// Drops every turn, keeping only the initial system message.
    pub fn reset(&mut self) {
        self.messages.truncate(1);
    }

    /// Copy of the current history, used to build a request.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn system_prompt(&self) -> &str {
        self.messages[0].content()
    }

    pub fn last(&self) -> &Message {
        // never empty, the system message is always present
        &self.messages[self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    // always false, see `last`
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
