//! Conversation history shared by chat calls

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::provider::{Content, Role};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Cloneable handle to one transcript.
///
/// Each append or clear holds the lock only for that mutation, so two
/// concurrent exchanges on the same handle may interleave.
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        // A panicked writer leaves a valid Vec behind.
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn append(&self, message: ChatMessage) {
        self.lock().push(message);
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    /// Empty the transcript, returning how many messages were dropped.
    pub fn clear(&self) -> usize {
        let mut messages = self.lock();
        let count = messages.len();
        messages.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prior turns in provider form, oldest first.
    pub fn contents(&self) -> Vec<Content> {
        self.lock()
            .iter()
            .map(|m| match m.role {
                Role::User => Content::user_text(m.content.clone()),
                Role::Model => Content::model_text(m.content.clone()),
            })
            .collect()
    }
}
