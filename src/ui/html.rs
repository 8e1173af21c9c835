//! HTML fragments for the prediction page.
//!
//! Every piece of text that does not come out of [`crate::markdown::render`]
//! goes through [`escape`] before it is interpolated.

use super::display::ResultDisplay;
use super::state::{Author, ChatMessage};
use super::view::AlertKind;
use crate::markdown;

pub const BOT_NAME: &str = "GreenyBot";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `energy_efficiency` -> `Energy Efficiency`.
pub fn field_display_name(name: &str) -> String {
    name.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn alert(kind: AlertKind, message: &str) -> String {
    format!(
        r#"<div class="alert alert-{} fade-in"><i class="{}"></i> <span>{}</span></div>"#,
        kind.as_str(),
        kind.icon(),
        escape(message)
    )
}

pub fn probability_item(bar: &super::display::ProbabilityBar) -> String {
    format!(
        concat!(
            r#"<div class="probability-item">"#,
            r#"<span>{} {} Stars</span>"#,
            r#"<div class="probability-bar"><div class="probability-fill" style="width: {}%"></div></div>"#,
            r#"<span><strong>{}%</strong></span>"#,
            r#"</div>"#
        ),
        bar.stars, bar.label, bar.percent, bar.percent
    )
}

pub fn results(display: &ResultDisplay) -> String {
    let items: String = display.bars.iter().map(probability_item).collect();
    format!(
        concat!(
            r#"<div id="results" class="fade-in">"#,
            r#"<div id="predictionText">{}</div>"#,
            r#"<div id="starsDisplay">{}</div>"#,
            r#"<circle id="progressCircle" style="stroke-dashoffset: {:.4}"></circle>"#,
            r#"<div id="confidenceBar" style="width: {}%"></div>"#,
            r#"<div id="confidenceText">{}%</div>"#,
            r#"<div id="probabilityList">{}</div>"#,
            r#"</div>"#
        ),
        display.rating,
        display.stars,
        display.ring_offset,
        display.confidence_percent,
        display.confidence_percent,
        items
    )
}

/// A titled assessment card. `content_html` must already be safe.
pub fn assessment_block(id: Option<&str>, icon: &str, title: &str, content_html: &str) -> String {
    let id_attr = id
        .map(|id| format!(r#" id="{}""#, escape(id)))
        .unwrap_or_default();
    format!(
        r#"<div class="assessment-item fade-in"{}><h3><i class="{}"></i> {}</h3><div class="content">{}</div></div>"#,
        id_attr,
        escape(icon),
        escape(title),
        content_html
    )
}

pub fn section_id(kind: crate::backend::SectionKind) -> String {
    format!("section-{}", kind.as_str())
}

/// The chat log keeps the raw bot text; it is rendered to HTML here.
pub fn chat_message(message: &ChatMessage) -> String {
    let time = message.timestamp.format("%H:%M");
    match message.author {
        Author::User => format!(
            r#"<div class="message user"><div class="message-content">{}</div><div class="message-time">{}</div></div>"#,
            escape(&message.text),
            time
        ),
        Author::Bot => bot_message(BOT_NAME, &markdown::render(&message.text), &time.to_string()),
        Author::Error => bot_message(
            "Error",
            &format!("<p>{}</p>", escape(&message.text)),
            &time.to_string(),
        ),
    }
}

fn bot_message(title: &str, content_html: &str, time: &str) -> String {
    format!(
        concat!(
            r#"<div class="message bot">"#,
            r#"<div class="message-avatar"><i class="fas fa-robot"></i></div>"#,
            r#"<div class="message-content"><strong>{}</strong>{}</div>"#,
            r#"<div class="message-time">{}</div>"#,
            r#"</div>"#
        ),
        escape(title),
        content_html,
        time
    )
}

pub fn typing_indicator(id: &str) -> String {
    format!(
        concat!(
            r#"<div class="message bot" id="{}">"#,
            r#"<div class="message-avatar"><i class="fas fa-robot"></i></div>"#,
            r#"<div class="message-content"><span class="spinner"></span> {} is typing...</div>"#,
            r#"</div>"#
        ),
        escape(id),
        BOT_NAME
    )
}

pub fn suggestions(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let buttons: String = items
        .iter()
        .map(|s| format!(r#"<button class="suggestion">{}</button>"#, escape(s)))
        .collect();
    format!(r#"<div class="suggestions">{}</div>"#, buttons)
}
