use super::state::{ChatMessage, UiState};
use super::view::View;
use crate::backend::Backend;
use std::sync::Arc;
use std::time::Duration;

pub const RESULTS_SCROLL_DELAY: Duration = Duration::from_millis(300);
pub const ASSISTANT_SCROLL_DELAY: Duration = Duration::from_millis(300);
pub const SECTION_SCROLL_DELAY: Duration = Duration::from_millis(100);

pub const MISSING_PREDICTION_MESSAGE: &str = "Please get a prediction first!";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error: the prediction service could not be reached. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A numeric field was negative; nothing was sent.
    Blocked { field: String },
    Warning,
    Predicted { rating: u8 },
    Failed,
    TransportFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    MissingSession,
    /// Empty chat input; nothing was sent.
    Ignored,
    Rendered,
    Failed,
    TransportFailed,
}

/// Owns the page state and turns UI events into backend calls and render
/// calls. Handlers take `&mut self`, so at most one runs at a time.
pub struct Controller {
    pub(super) backend: Arc<dyn Backend>,
    pub(super) state: UiState,
}

impl Controller {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: UiState::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn session_id(&self) -> Option<&str> {
        self.state.session_id.as_deref()
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub(super) fn push_chat(&mut self, message: ChatMessage, view: &mut dyn View) {
        view.append_chat_message(&message);
        self.state.chat_log.push(message);
    }
}
