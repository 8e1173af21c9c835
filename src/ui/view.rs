use super::display::ResultDisplay;
use super::state::ChatMessage;
use crate::backend::SectionKind;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Warning,
    Error,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AlertKind::Warning => "fas fa-exclamation-triangle",
            AlertKind::Error => "fas fa-times-circle",
        }
    }
}

/// Controls that are disabled while their call is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Predict,
    Assessment,
    /// The whole group of section buttons.
    Sections,
    ChatSend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Results,
    AssistantPanel,
    Section(SectionKind),
}

/// Render side of the page. The controller decides, the view applies.
pub trait View {
    fn clear_alerts(&mut self);

    /// Replaces the current alert. `message` is plain text.
    fn show_alert(&mut self, kind: AlertKind, message: &str);

    fn focus_field(&mut self, name: &str);

    /// Flags a numeric field whose input was clamped to zero.
    fn flag_field(&mut self, name: &str, value: &str);

    fn set_control_enabled(&mut self, control: Control, enabled: bool);

    /// Reveals the results card and hides the placeholder.
    fn show_results(&mut self, display: &ResultDisplay);

    /// Hides the results card and shows the placeholder.
    fn hide_results(&mut self);

    fn set_assistant_visible(&mut self, visible: bool);

    /// Replaces the whole assessment area with one block of safe HTML.
    fn set_assessment(&mut self, block_html: &str);

    /// Replaces the block for `kind`, or appends it if there is none.
    fn upsert_section(&mut self, kind: SectionKind, block_html: &str);

    fn append_chat_message(&mut self, message: &ChatMessage);

    fn show_typing_indicator(&mut self, id: &str);

    fn remove_typing_indicator(&mut self, id: &str);

    fn show_suggestions(&mut self, suggestions: &[String]);

    fn set_chat_open(&mut self, open: bool);

    fn scroll_into_view(&mut self, target: ScrollTarget, delay: Duration);
}
