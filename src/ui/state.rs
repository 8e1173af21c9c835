use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Author::Error, text)
    }
}

/// Client-side state. Nothing here outlives the process.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub session_id: Option<String>,
    pub chat_open: bool,
    pub chat_log: Vec<ChatMessage>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_session(&self) -> bool {
        self.session_id.is_some()
    }

    pub fn clear_session(&mut self) {
        self.session_id = None;
    }
}
