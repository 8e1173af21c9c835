use super::display::ResultDisplay;
use super::html;
use super::state::ChatMessage;
use super::view::{AlertKind, Control, ScrollTarget, View};
use crate::backend::SectionKind;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    id: Option<String>,
    html: String,
}

/// In-memory model of the prediction page.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    alert: Option<(AlertKind, String)>,
    focused_field: Option<String>,
    flagged_field: Option<String>,
    disabled: HashSet<Control>,
    results: Option<ResultDisplay>,
    results_visible: bool,
    assistant_visible: bool,
    assessment: Vec<Fragment>,
    chat: Vec<Fragment>,
    suggestions: Vec<String>,
    chat_open: bool,
    last_scroll: Option<(ScrollTarget, Duration)>,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self {
            alert: None,
            focused_field: None,
            flagged_field: None,
            disabled: HashSet::new(),
            results: None,
            results_visible: false,
            assistant_visible: false,
            assessment: Vec::new(),
            chat: Vec::new(),
            suggestions: Vec::new(),
            chat_open: false,
            last_scroll: None,
        }
    }

    pub fn alert(&self) -> Option<(AlertKind, &str)> {
        self.alert
            .as_ref()
            .map(|(kind, message)| (*kind, message.as_str()))
    }

    pub fn focused_field(&self) -> Option<&str> {
        self.focused_field.as_deref()
    }

    pub fn flagged_field(&self) -> Option<&str> {
        self.flagged_field.as_deref()
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        !self.disabled.contains(&control)
    }

    pub fn results(&self) -> Option<&ResultDisplay> {
        self.results.as_ref()
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    /// The placeholder is shown exactly when the results card is not.
    pub fn placeholder_visible(&self) -> bool {
        !self.results_visible
    }

    pub fn assistant_visible(&self) -> bool {
        self.assistant_visible
    }

    pub fn assessment_html(&self) -> String {
        self.assessment.iter().map(|f| f.html.as_str()).collect()
    }

    pub fn assessment_block_count(&self) -> usize {
        self.assessment.len()
    }

    pub fn section_count(&self, kind: SectionKind) -> usize {
        let id = html::section_id(kind);
        self.assessment
            .iter()
            .filter(|f| f.id.as_deref() == Some(id.as_str()))
            .count()
    }

    pub fn section_html(&self, kind: SectionKind) -> Option<&str> {
        let id = html::section_id(kind);
        self.assessment
            .iter()
            .find(|f| f.id.as_deref() == Some(id.as_str()))
            .map(|f| f.html.as_str())
    }

    pub fn chat_len(&self) -> usize {
        self.chat.len()
    }

    pub fn chat_html(&self) -> String {
        self.chat.iter().map(|f| f.html.as_str()).collect()
    }

    pub fn has_typing_indicator(&self) -> bool {
        self.chat
            .iter()
            .any(|f| f.id.as_deref().is_some_and(|id| id.starts_with("typing-indicator-")))
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn last_scroll(&self) -> Option<(ScrollTarget, Duration)> {
        self.last_scroll
    }

    pub fn to_html(&self) -> String {
        let alert = self
            .alert
            .as_ref()
            .map(|(kind, message)| html::alert(*kind, message))
            .unwrap_or_default();
        let results = match (&self.results, self.results_visible) {
            (Some(display), true) => html::results(display),
            _ => r#"<div id="results" class="hidden"></div>"#.to_string(),
        };
        let placeholder_display = if self.placeholder_visible() { "block" } else { "none" };
        let assistant_class = if self.assistant_visible { "" } else { " hidden" };
        let chat_display = if self.chat_open { "flex" } else { "none" };

        format!(
            concat!(
                "<!DOCTYPE html>\n",
                r#"<html lang="en"><head><meta charset="utf-8"><title>GRIHA Green Rating Predictor</title></head><body>"#,
                "\n",
                r#"<div id="alerts">{}</div>"#,
                "\n",
                r#"<div id="placeholder" style="display: {}"></div>"#,
                "\n{}\n",
                r#"<section id="greenybotSection" class="greenybot{}"><div id="assessmentContent">{}</div></section>"#,
                "\n",
                r#"<div id="chatbotWidget" style="display: {}"><div id="chatbotMessages">{}</div>{}</div>"#,
                "\n</body></html>\n"
            ),
            alert,
            placeholder_display,
            results,
            assistant_class,
            self.assessment_html(),
            chat_display,
            self.chat_html(),
            html::suggestions(&self.suggestions)
        )
    }
}

impl View for HtmlDocument {
    fn clear_alerts(&mut self) {
        self.alert = None;
    }

    fn show_alert(&mut self, kind: AlertKind, message: &str) {
        self.alert = Some((kind, message.to_string()));
    }

    fn focus_field(&mut self, name: &str) {
        self.focused_field = Some(name.to_string());
    }

    fn flag_field(&mut self, name: &str, _value: &str) {
        self.flagged_field = Some(name.to_string());
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        if enabled {
            self.disabled.remove(&control);
        } else {
            self.disabled.insert(control);
        }
    }

    fn show_results(&mut self, display: &ResultDisplay) {
        self.results = Some(display.clone());
        self.results_visible = true;
    }

    fn hide_results(&mut self) {
        self.results_visible = false;
    }

    fn set_assistant_visible(&mut self, visible: bool) {
        self.assistant_visible = visible;
    }

    fn set_assessment(&mut self, block_html: &str) {
        self.assessment = vec![Fragment {
            id: None,
            html: block_html.to_string(),
        }];
    }

    fn upsert_section(&mut self, kind: SectionKind, block_html: &str) {
        let id = html::section_id(kind);
        let fragment = Fragment {
            id: Some(id.clone()),
            html: block_html.to_string(),
        };
        match self
            .assessment
            .iter_mut()
            .find(|f| f.id.as_deref() == Some(id.as_str()))
        {
            Some(existing) => *existing = fragment,
            None => self.assessment.push(fragment),
        }
    }

    fn append_chat_message(&mut self, message: &ChatMessage) {
        self.chat.push(Fragment {
            id: None,
            html: html::chat_message(message),
        });
    }

    fn show_typing_indicator(&mut self, id: &str) {
        self.chat.push(Fragment {
            id: Some(id.to_string()),
            html: html::typing_indicator(id),
        });
    }

    fn remove_typing_indicator(&mut self, id: &str) {
        self.chat.retain(|f| f.id.as_deref() != Some(id));
    }

    fn show_suggestions(&mut self, suggestions: &[String]) {
        self.suggestions = suggestions.to_vec();
    }

    fn set_chat_open(&mut self, open: bool) {
        self.chat_open = open;
    }

    fn scroll_into_view(&mut self, target: ScrollTarget, delay: Duration) {
        self.last_scroll = Some((target, delay));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_section_replaces_in_place() {
        let mut doc = HtmlDocument::new();
        doc.set_assessment("<div>why</div>");
        doc.upsert_section(SectionKind::Strengths, "<div>one</div>");
        doc.upsert_section(SectionKind::Benefits, "<div>benefits</div>");
        doc.upsert_section(SectionKind::Strengths, "<div>two</div>");

        assert_eq!(doc.assessment_block_count(), 3);
        assert_eq!(doc.section_count(SectionKind::Strengths), 1);
        assert_eq!(doc.section_html(SectionKind::Strengths), Some("<div>two</div>"));
        assert_eq!(
            doc.assessment_html(),
            "<div>why</div><div>two</div><div>benefits</div>"
        );
    }

    #[test]
    fn test_set_assessment_drops_sections() {
        let mut doc = HtmlDocument::new();
        doc.upsert_section(SectionKind::NextSteps, "<div>steps</div>");
        doc.set_assessment("<div>why</div>");
        assert_eq!(doc.section_count(SectionKind::NextSteps), 0);
        assert_eq!(doc.assessment_block_count(), 1);
    }

    #[test]
    fn test_typing_indicator_lifecycle() {
        let mut doc = HtmlDocument::new();
        doc.show_typing_indicator("typing-indicator-1");
        assert!(doc.has_typing_indicator());
        doc.remove_typing_indicator("typing-indicator-1");
        assert!(!doc.has_typing_indicator());
        assert_eq!(doc.chat_len(), 0);
    }

    #[test]
    fn test_controls_start_enabled() {
        let mut doc = HtmlDocument::new();
        assert!(doc.is_enabled(Control::Predict));
        doc.set_control_enabled(Control::Predict, false);
        assert!(!doc.is_enabled(Control::Predict));
        assert!(doc.is_enabled(Control::ChatSend));
    }

    #[test]
    fn test_page_escapes_alert() {
        let mut doc = HtmlDocument::new();
        doc.show_alert(AlertKind::Error, "<script>x</script>");
        let page = doc.to_html();
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains(r#"<div id="placeholder" style="display: block">"#));
    }
}
