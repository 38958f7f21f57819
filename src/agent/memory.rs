//! Per-request conversation memory.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::llm::ChatMessage;

/// One completed prompt/answer pair.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub prompt: String,
    pub answer: String,
    pub recorded_at: DateTime<Utc>,
}

/// Ordered record of prior exchanges, replayed to the agent as chat history.
///
/// Owned by a single request and dropped with it. Only the most recent
/// `window` exchanges are kept; a window of zero disables memory.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    exchanges: VecDeque<Exchange>,
    window: usize,
}

impl ConversationMemory {
    pub fn new(window: usize) -> Self {
        Self {
            exchanges: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Append an exchange, evicting the oldest once the window is full.
    pub fn record(&mut self, prompt: impl Into<String>, answer: impl Into<String>) {
        if self.window == 0 {
            return;
        }
        while self.exchanges.len() >= self.window {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(Exchange {
            prompt: prompt.into(),
            answer: answer.into(),
            recorded_at: Utc::now(),
        });
    }

    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// History as alternating user/assistant messages, oldest first.
    pub fn as_messages(&self) -> Vec<ChatMessage> {
        self.exchanges
            .iter()
            .flat_map(|e| {
                [
                    ChatMessage::user(e.prompt.clone()),
                    ChatMessage::assistant(e.answer.clone()),
                ]
            })
            .collect()
    }
}
