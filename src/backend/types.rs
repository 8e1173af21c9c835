use crate::{
    Error, Result,
    config::{FieldKind, FormConfig},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

pub const PREDICT_ENDPOINT: &str = "/predict";
pub const ASSESSMENT_ENDPOINT: &str = "/get_initial_assessment";
pub const SECTION_ENDPOINT: &str = "/get_section";
pub const CHAT_ENDPOINT: &str = "/chat";
pub const HEALTH_ENDPOINT: &str = "/health";

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
}

/// Ordered set of form fields, sent form-encoded to `/predict`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSubmission {
    pub fields: Vec<FormField>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FormConfig) -> Self {
        Self {
            fields: config
                .fields
                .iter()
                .map(|f| FormField {
                    name: f.name.clone(),
                    value: f.default.clone(),
                    kind: f.kind,
                })
                .collect(),
        }
    }

    pub fn number(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name.into(), value.into(), FieldKind::Number);
        self
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name.into(), value.into(), FieldKind::Text);
        self
    }

    /// Overwrites the value of an existing field, or appends a numeric one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.push(name.to_string(), value, FieldKind::Number),
        }
    }

    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect()
    }

    fn push(&mut self, name: String, value: String, kind: FieldKind) {
        self.fields.push(FormField { name, value, kind });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Strengths,
    Improvements,
    Benefits,
    NextSteps,
}

#[derive(Debug)]
pub struct SectionMeta {
    pub kind: SectionKind,
    pub title: &'static str,
    pub icon: &'static str,
}

static SECTIONS: [SectionMeta; 4] = [
    SectionMeta {
        kind: SectionKind::Strengths,
        title: "Key Strengths",
        icon: "fas fa-trophy",
    },
    SectionMeta {
        kind: SectionKind::Improvements,
        title: "Areas for Improvement",
        icon: "fas fa-tools",
    },
    SectionMeta {
        kind: SectionKind::Benefits,
        title: "Benefits of Improvement",
        icon: "fas fa-gem",
    },
    SectionMeta {
        kind: SectionKind::NextSteps,
        title: "Next Steps",
        icon: "fas fa-route",
    },
];

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Strengths,
        SectionKind::Improvements,
        SectionKind::Benefits,
        SectionKind::NextSteps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Strengths => "strengths",
            SectionKind::Improvements => "improvements",
            SectionKind::Benefits => "benefits",
            SectionKind::NextSteps => "next_steps",
        }
    }

    pub fn meta(self) -> &'static SectionMeta {
        // The table is indexed in declaration order.
        &SECTIONS[self as usize]
    }

    pub fn title(self) -> &'static str {
        self.meta().title
    }

    pub fn icon(self) -> &'static str {
        self.meta().icon
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                Error::config(format!(
                    "Unknown section '{}'. Valid sections: strengths, improvements, benefits, next_steps",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityEntry {
    pub label: i64,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub session_id: String,
    pub rating: u8,
    pub confidence: f64,
    pub probabilities: Vec<ProbabilityEntry>,
}

/// `/predict` outcome, classified by response shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictResponse {
    Warning { message: String },
    Success(Prediction),
    Error { error: String },
}

#[derive(Debug, Default, Deserialize)]
struct RawPredictResponse {
    #[serde(default)]
    warning: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    success: Option<Value>,
    #[serde(default)]
    session_id: Option<Value>,
    #[serde(default)]
    prediction: Option<i64>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    probabilities: Vec<ProbabilityEntry>,
    #[serde(default)]
    error: Option<String>,
}

fn is_truthy(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}

impl PredictResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        let raw: RawPredictResponse = serde_json::from_str(body)?;
        Self::classify(raw)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawPredictResponse = serde_json::from_value(value)?;
        Self::classify(raw)
    }

    fn classify(raw: RawPredictResponse) -> Result<Self> {
        if is_truthy(&raw.warning) {
            return Ok(Self::Warning {
                message: raw.message.unwrap_or_default(),
            });
        }

        if is_truthy(&raw.success) {
            let session_id = match raw.session_id {
                Some(Value::String(s)) if !s.is_empty() => s,
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(Error::unexpected_response(
                        PREDICT_ENDPOINT,
                        "success without session_id",
                    ));
                }
            };
            let rating = raw
                .prediction
                .and_then(|p| u8::try_from(p).ok())
                .filter(|p| (1..=5).contains(p))
                .ok_or_else(|| {
                    Error::unexpected_response(PREDICT_ENDPOINT, "prediction must be 1-5")
                })?;
            let confidence = raw
                .confidence
                .filter(|c| (0.0..=1.0).contains(c))
                .ok_or_else(|| {
                    Error::unexpected_response(PREDICT_ENDPOINT, "confidence must be in [0, 1]")
                })?;
            if let Some(bad) = raw
                .probabilities
                .iter()
                .find(|p| !(0.0..=1.0).contains(&p.probability))
            {
                return Err(Error::unexpected_response(
                    PREDICT_ENDPOINT,
                    format!("probability {} for label {} out of range", bad.probability, bad.label),
                ));
            }

            return Ok(Self::Success(Prediction {
                session_id,
                rating,
                confidence,
                probabilities: raw.probabilities,
            }));
        }

        if let Some(error) = raw.error {
            return Ok(Self::Error { error });
        }

        Err(Error::unexpected_response(
            PREDICT_ENDPOINT,
            "response carries none of warning, success or error",
        ))
    }
}

/// A well-formed assistant reply: either the payload or a domain failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Ok(T),
    Failed { error: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAssessmentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub assessment: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<RawAssessmentResponse> for Reply<String> {
    fn from(raw: RawAssessmentResponse) -> Self {
        if raw.success {
            Reply::Ok(raw.assessment.unwrap_or_default())
        } else {
            Reply::Failed { error: raw.error }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSectionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<RawSectionResponse> for Reply<String> {
    fn from(raw: RawSectionResponse) -> Self {
        if raw.success {
            Reply::Ok(raw.content.unwrap_or_default())
        } else {
            Reply::Failed { error: raw.error }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawChatResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<RawChatResponse> for Reply<ChatReply> {
    fn from(raw: RawChatResponse) -> Self {
        if raw.success {
            Reply::Ok(ChatReply {
                response: raw.response.unwrap_or_default(),
                suggestions: raw.suggestions.into_iter().take(3).collect(),
            })
        } else {
            Reply::Failed { error: raw.error }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssessmentRequest<'a> {
    pub session_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SectionRequest<'a> {
    pub session_id: &'a str,
    pub section_type: SectionKind,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default, rename = "gemini_available")]
    pub assistant_available: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_classify_warning() {
        let response = PredictResponse::from_value(json!({
            "warning": true,
            "message": "This building is not certified."
        }))
        .unwrap();
        assert_eq!(
            response,
            PredictResponse::Warning {
                message: "This building is not certified.".to_string()
            }
        );
    }

    #[test]
    fn test_classify_success() {
        let response = PredictResponse::from_value(json!({
            "success": true,
            "session_id": "-4417",
            "prediction": 4,
            "confidence": 0.847,
            "probabilities": [
                {"label": 1, "probability": 0.1},
                {"label": 5, "probability": 0.9}
            ]
        }))
        .unwrap();

        let PredictResponse::Success(prediction) = response else {
            panic!("expected success");
        };
        assert_eq!(prediction.session_id, "-4417");
        assert_eq!(prediction.rating, 4);
        assert_eq!(prediction.probabilities.len(), 2);
        assert_eq!(prediction.probabilities[1].label, 5);
    }

    #[test]
    fn test_classify_error() {
        let response =
            PredictResponse::from_json(r#"{"error": "Model not available"}"#).unwrap();
        assert_eq!(
            response,
            PredictResponse::Error {
                error: "Model not available".to_string()
            }
        );
    }

    #[test]
    fn test_warning_wins_over_error() {
        let response = PredictResponse::from_value(json!({
            "warning": true,
            "message": "w",
            "error": "e"
        }))
        .unwrap();
        assert!(matches!(response, PredictResponse::Warning { .. }));
    }

    #[test]
    fn test_success_without_session_is_malformed() {
        let err = PredictResponse::from_value(json!({
            "success": true,
            "prediction": 3,
            "confidence": 0.5
        }))
        .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("session_id"));
    }

    #[test]
    fn test_rating_out_of_range_is_malformed() {
        let err = PredictResponse::from_value(json!({
            "success": true,
            "session_id": "s",
            "prediction": 7,
            "confidence": 0.5
        }))
        .unwrap_err();
        assert!(err.to_string().contains("1-5"));
    }

    #[test]
    fn test_empty_object_is_malformed() {
        assert!(PredictResponse::from_json("{}").is_err());
        assert!(PredictResponse::from_json("not json").is_err());
    }

    #[test]
    fn test_section_table() {
        assert_eq!(SectionKind::Strengths.title(), "Key Strengths");
        assert_eq!(SectionKind::Improvements.icon(), "fas fa-tools");
        assert_eq!(SectionKind::Benefits.title(), "Benefits of Improvement");
        assert_eq!(SectionKind::NextSteps.icon(), "fas fa-route");
        for kind in SectionKind::ALL {
            assert_eq!(kind.meta().kind, kind);
            assert_eq!(kind.as_str().parse::<SectionKind>().unwrap(), kind);
        }
        assert!("summary".parse::<SectionKind>().is_err());
    }

    #[test]
    fn test_section_request_serialization() {
        let body = serde_json::to_value(SectionRequest {
            session_id: "abc",
            section_type: SectionKind::NextSteps,
        })
        .unwrap();
        assert_eq!(body, json!({"session_id": "abc", "section_type": "next_steps"}));
    }

    #[test]
    fn test_chat_reply_keeps_three_suggestions() {
        let raw: RawChatResponse = serde_json::from_value(json!({
            "success": true,
            "response": "Use LED lighting.",
            "suggestions": ["a", "b", "c", "d"]
        }))
        .unwrap();
        let Reply::Ok(reply) = Reply::from(raw) else {
            panic!("expected ok reply");
        };
        assert_eq!(reply.suggestions, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failed_reply_keeps_error() {
        let raw: RawChatResponse =
            serde_json::from_value(json!({"success": false, "error": "Session not found"}))
                .unwrap();
        assert_eq!(
            Reply::from(raw),
            Reply::Failed {
                error: Some("Session not found".to_string())
            }
        );
    }

    #[test]
    fn test_form_submission_set_and_pairs() {
        let mut form = FormSubmission::new()
            .number("Energy_Efficiency", "3")
            .text("Climate_Zone", "Composite");
        form.set("Energy_Efficiency", "4");
        form.set("Water_Use", "1");

        assert_eq!(
            form.pairs(),
            vec![
                ("Energy_Efficiency", "4"),
                ("Climate_Zone", "Composite"),
                ("Water_Use", "1")
            ]
        );
        assert_eq!(form.fields[2].kind, FieldKind::Number);
    }
}
