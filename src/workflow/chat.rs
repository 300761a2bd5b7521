// src/workflow/chat.rs
use chrono::{DateTime, Local};
use uuid::Uuid;

use super::{Backend, Task};
use crate::api::ChatReply;

pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const SUGGESTION_LABEL_CHARS: usize = 20;

pub const INITIAL_SUGGESTIONS: [&str; 4] = [
    "What are my best-selling products?",
    "Show me revenue trends",
    "Analyze customer segments",
    "What are seasonal patterns?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAuthor {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub author: ChatAuthor,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    fn new(author: ChatAuthor, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEntry {
    Message(ChatMessage),
    Typing { id: Uuid },
}

impl ChatEntry {
    pub fn id(&self) -> Uuid {
        match self {
            ChatEntry::Message(message) => message.id,
            ChatEntry::Typing { id } => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionButton {
    pub label: String,
    pub question: String,
}

impl SuggestionButton {
    pub fn new(question: &str) -> Self {
        Self {
            label: suggestion_label(question),
            question: question.to_string(),
        }
    }
}

/// Shortens a suggestion for its button. Counts characters, not bytes.
pub fn suggestion_label(question: &str) -> String {
    if question.chars().count() > SUGGESTION_LABEL_CHARS {
        let head: String = question.chars().take(SUGGESTION_LABEL_CHARS).collect();
        format!("{}...", head)
    } else {
        question.to_string()
    }
}

pub struct ChatController {
    log: Vec<ChatEntry>,
    suggestions: Vec<String>,
    in_flight: Option<(Uuid, Task<ChatReply>)>,
}

impl Default for ChatController {
    fn default() -> Self {
        Self {
            log: Vec::new(),
            suggestions: INITIAL_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            in_flight: None,
        }
    }
}

impl ChatController {
    pub fn log(&self) -> &[ChatEntry] {
        &self.log
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestion_buttons(&self) -> Vec<SuggestionButton> {
        self.suggestions.iter().map(|q| SuggestionButton::new(q)).collect()
    }

    pub fn state(&self) -> ExchangeState {
        if self.in_flight.is_some() {
            ExchangeState::AwaitingReply
        } else {
            ExchangeState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether an exchange was started. Blank questions and questions
    /// asked while a reply is pending are ignored.
    pub fn submit(&mut self, question: &str, backend: &Backend) -> bool {
        let question = question.trim();
        if question.is_empty() || self.is_busy() {
            return false;
        }

        tracing::info!("Asking: {}", question);
        self.log
            .push(ChatEntry::Message(ChatMessage::new(ChatAuthor::User, question)));

        let typing = Uuid::new_v4();
        self.log.push(ChatEntry::Typing { id: typing });

        let question = question.to_string();
        let task = backend.request(move |api| async move { api.explore(&question).await });
        self.in_flight = Some((typing, task));
        true
    }

    pub fn poll(&mut self) {
        let Some((typing, task)) = self.in_flight.as_mut() else {
            return;
        };
        let Some(result) = task.poll() else {
            return;
        };
        let typing = *typing;
        self.in_flight = None;
        self.log.retain(|entry| entry.id() != typing);

        let text = match result {
            Ok(reply) => {
                if let Some(suggestions) = reply.suggestions {
                    self.suggestions = suggestions;
                }
                reply.response
            }
            Err(e) => {
                tracing::warn!("Chat exchange failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };
        self.log
            .push(ChatEntry::Message(ChatMessage::new(ChatAuthor::Assistant, text)));
    }
}
