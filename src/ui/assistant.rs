use super::controller::{
    ASSISTANT_SCROLL_DELAY, Controller, MISSING_PREDICTION_MESSAGE, PanelOutcome,
    SECTION_SCROLL_DELAY,
};
use super::html;
use super::state::ChatMessage;
use super::view::{AlertKind, Control, ScrollTarget, View};
use crate::backend::{Reply, SectionKind};
use crate::markdown;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const ASSESSMENT_TITLE: &str = "Why This Rating?";
const ASSESSMENT_FAILED: &str = "Unable to generate assessment. Please try again later.";
const ASSESSMENT_UNREACHABLE: &str =
    "Failed to get assessment: the prediction service could not be reached.";
const SECTION_FAILED: &str = "Failed to get section details. Please try again.";
const SECTION_UNREACHABLE: &str =
    "Error getting section details: the prediction service could not be reached.";
const CHAT_FAILED: &str = "Sorry, I couldn't process your question.";
const CHAT_UNREACHABLE: &str = "Network error: GreenyBot could not be reached. Please try again.";

impl Controller {
    fn require_session(&self, view: &mut dyn View) -> Option<String> {
        if !self.state.has_session() {
            warn!("Assistant request without a prediction session");
            view.show_alert(AlertKind::Warning, MISSING_PREDICTION_MESSAGE);
            return None;
        }
        self.state.session_id.clone()
    }

    /// "Why this rating?" block. Replaces the whole assessment area.
    pub async fn request_assessment(&mut self, view: &mut dyn View) -> PanelOutcome {
        let Some(session_id) = self.require_session(view) else {
            return PanelOutcome::MissingSession;
        };

        view.set_control_enabled(Control::Assessment, false);
        view.set_assistant_visible(true);
        view.scroll_into_view(ScrollTarget::AssistantPanel, ASSISTANT_SCROLL_DELAY);

        let (block, outcome) = match self.backend.initial_assessment(&session_id).await {
            Ok(Reply::Ok(text)) => {
                info!("Rendering initial assessment ({} chars)", text.len());
                (
                    html::assessment_block(
                        None,
                        "fas fa-lightbulb",
                        ASSESSMENT_TITLE,
                        &markdown::render(&text),
                    ),
                    PanelOutcome::Rendered,
                )
            }
            Ok(Reply::Failed { error }) => {
                warn!("Initial assessment failed: {:?}", error);
                (
                    html::assessment_block(
                        None,
                        "fas fa-exclamation-triangle",
                        "Assessment Error",
                        &format!("<p>{}</p>", ASSESSMENT_FAILED),
                    ),
                    PanelOutcome::Failed,
                )
            }
            Err(e) => {
                error!("Initial assessment request failed: {}", e);
                (
                    html::assessment_block(
                        None,
                        "fas fa-times-circle",
                        "Network Error",
                        &format!("<p>{}</p>", ASSESSMENT_UNREACHABLE),
                    ),
                    PanelOutcome::TransportFailed,
                )
            }
        };
        view.set_assessment(&block);

        view.set_control_enabled(Control::Assessment, true);
        outcome
    }

    /// Renders one section block, replacing an earlier block of the same kind.
    pub async fn fetch_section(&mut self, kind: SectionKind, view: &mut dyn View) -> PanelOutcome {
        let Some(session_id) = self.require_session(view) else {
            return PanelOutcome::MissingSession;
        };

        view.set_control_enabled(Control::Sections, false);

        let outcome = match self.backend.section(&session_id, kind).await {
            Ok(Reply::Ok(content)) => {
                info!("Rendering section {}", kind);
                let block = html::assessment_block(
                    Some(&html::section_id(kind)),
                    kind.icon(),
                    kind.title(),
                    &markdown::render(&content),
                );
                view.upsert_section(kind, &block);
                view.scroll_into_view(ScrollTarget::Section(kind), SECTION_SCROLL_DELAY);
                PanelOutcome::Rendered
            }
            Ok(Reply::Failed { error }) => {
                warn!("Section {} failed: {:?}", kind, error);
                view.show_alert(AlertKind::Error, SECTION_FAILED);
                PanelOutcome::Failed
            }
            Err(e) => {
                error!("Section {} request failed: {}", kind, e);
                view.show_alert(AlertKind::Error, SECTION_UNREACHABLE);
                PanelOutcome::TransportFailed
            }
        };

        view.set_control_enabled(Control::Sections, true);
        outcome
    }

    pub async fn send_chat(&mut self, input: &str, view: &mut dyn View) -> PanelOutcome {
        let Some(session_id) = self.require_session(view) else {
            return PanelOutcome::MissingSession;
        };

        let question = input.trim();
        if question.is_empty() {
            debug!("Ignoring empty chat input");
            return PanelOutcome::Ignored;
        }

        view.set_control_enabled(Control::ChatSend, false);
        self.push_chat(ChatMessage::user(question), view);

        let typing_id = format!("typing-indicator-{}", Uuid::new_v4());
        view.show_typing_indicator(&typing_id);

        let response = self.backend.chat(&session_id, question).await;
        view.remove_typing_indicator(&typing_id);

        let outcome = match response {
            Ok(Reply::Ok(reply)) => {
                info!(
                    "Chat answered ({} chars, {} suggestions)",
                    reply.response.len(),
                    reply.suggestions.len()
                );
                self.push_chat(ChatMessage::bot(reply.response), view);
                view.show_suggestions(&reply.suggestions);
                PanelOutcome::Rendered
            }
            Ok(Reply::Failed { error }) => {
                warn!("Chat failed: {:?}", error);
                let text = error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| CHAT_FAILED.to_string());
                self.push_chat(ChatMessage::error(text), view);
                view.show_suggestions(&[]);
                PanelOutcome::Failed
            }
            Err(e) => {
                error!("Chat request failed: {}", e);
                self.push_chat(ChatMessage::error(CHAT_UNREACHABLE), view);
                view.show_suggestions(&[]);
                PanelOutcome::TransportFailed
            }
        };

        view.set_control_enabled(Control::ChatSend, true);
        outcome
    }

    /// Returns whether the chat widget is now open.
    pub fn toggle_chat(&mut self, view: &mut dyn View) -> bool {
        self.state.chat_open = !self.state.chat_open;
        view.set_chat_open(self.state.chat_open);
        self.state.chat_open
    }

    /// Escape key: only acts when the widget is open.
    pub fn close_chat(&mut self, view: &mut dyn View) {
        if self.state.chat_open {
            self.toggle_chat(view);
        }
    }
}
