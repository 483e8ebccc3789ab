//! Bounded per-table chat history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use crate::auth::Identity;

pub const MAX_CHAT_HISTORY: usize = 100;
pub const MAX_CHAT_MESSAGE_LENGTH: usize = 500;

#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ChatError {
    #[error("message is empty")]
    Empty,
    #[error("message is longer than {} characters", MAX_CHAT_MESSAGE_LENGTH)]
    TooLong,
}

/// A chat line. System messages (joins and leaves) have no author.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub user: Option<Identity>,
    pub timestamp: DateTime<Utc>,
}

/// Keeps the most recent messages, dropping the oldest past capacity.
#[derive(Debug)]
pub struct ChatLog {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new(MAX_CHAT_HISTORY)
    }
}

impl ChatLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push_system(&mut self, text: impl Into<String>) {
        self.push(ChatMessage {
            text: text.into(),
            user: None,
            timestamp: Utc::now(),
        });
    }

    pub fn push_user(&mut self, author: &Identity, text: &str) -> Result<(), ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::Empty);
        }
        if text.chars().count() > MAX_CHAT_MESSAGE_LENGTH {
            return Err(ChatError::TooLong);
        }
        self.push(ChatMessage {
            text: text.to_string(),
            user: Some(author.clone()),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    fn push(&mut self, message: ChatMessage) {
        if self.capacity == 0 {
            return;
        }
        while self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
