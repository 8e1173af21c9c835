use super::types::*;
use crate::{Error, Result, config::BackendConfig};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// The prediction backend. `Err` means the HTTP exchange itself failed;
/// domain failures come back inside `Ok`.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn predict(&self, form: &FormSubmission) -> Result<PredictResponse>;

    async fn initial_assessment(&self, session_id: &str) -> Result<Reply<String>>;

    async fn section(&self, session_id: &str, kind: SectionKind) -> Result<Reply<String>>;

    async fn chat(&self, session_id: &str, question: &str) -> Result<Reply<ChatReply>>;

    async fn health(&self) -> Result<HealthStatus>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!("POST {}", endpoint);

        let response = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .inspect_err(|e| warn!("Request to {} failed: {}", endpoint, e))?;

        let status = response.status();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(
                "Could not parse {} response (status {}): {}",
                endpoint, status, e
            );
            Error::unexpected_response(endpoint, format!("status {}: {}", status, e))
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn predict(&self, form: &FormSubmission) -> Result<PredictResponse> {
        debug!("POST {} with {} fields", PREDICT_ENDPOINT, form.fields.len());

        let response = self
            .client
            .post(self.url(PREDICT_ENDPOINT))
            .form(&form.pairs())
            .send()
            .await
            .inspect_err(|e| warn!("Request to {} failed: {}", PREDICT_ENDPOINT, e))?;

        let status = response.status();
        let body = response.text().await?;
        PredictResponse::from_json(&body).inspect_err(|e| {
            warn!(
                "Unusable {} response (status {}): {}",
                PREDICT_ENDPOINT, status, e
            )
        })
    }

    async fn initial_assessment(&self, session_id: &str) -> Result<Reply<String>> {
        let raw: RawAssessmentResponse = self
            .post_json(ASSESSMENT_ENDPOINT, &AssessmentRequest { session_id })
            .await?;
        Ok(raw.into())
    }

    async fn section(&self, session_id: &str, kind: SectionKind) -> Result<Reply<String>> {
        let raw: RawSectionResponse = self
            .post_json(
                SECTION_ENDPOINT,
                &SectionRequest {
                    session_id,
                    section_type: kind,
                },
            )
            .await?;
        Ok(raw.into())
    }

    async fn chat(&self, session_id: &str, question: &str) -> Result<Reply<ChatReply>> {
        let raw: RawChatResponse = self
            .post_json(
                CHAT_ENDPOINT,
                &ChatRequest {
                    session_id,
                    question,
                },
            )
            .await?;
        Ok(raw.into())
    }

    async fn health(&self) -> Result<HealthStatus> {
        debug!("GET {}", HEALTH_ENDPOINT);

        let status = self
            .client
            .get(self.url(HEALTH_ENDPOINT))
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;
        Ok(status)
    }
}
