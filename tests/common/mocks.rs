use async_trait::async_trait;
use greenverify::{
    Error, Result,
    backend::{
        Backend, ChatReply, FormSubmission, HealthStatus, PredictResponse, Prediction,
        ProbabilityEntry, Reply, SectionKind,
    },
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One recorded call to the mock backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Predict(FormSubmission),
    InitialAssessment { session_id: String },
    Section { session_id: String, kind: SectionKind },
    Chat { session_id: String, question: String },
    Health,
}

/// `Err(String)` stands for a transport failure.
type Scripted<T> = std::result::Result<T, String>;

/// Mock backend for testing
#[derive(Debug, Default)]
pub struct MockBackend {
    pub predictions: Arc<Mutex<VecDeque<Scripted<PredictResponse>>>>,
    pub assessments: Arc<Mutex<VecDeque<Scripted<Reply<String>>>>>,
    pub sections: Arc<Mutex<VecDeque<Scripted<Reply<String>>>>>,
    pub chats: Arc<Mutex<VecDeque<Scripted<Reply<ChatReply>>>>>,
    pub calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prediction(self, response: PredictResponse) -> Self {
        self.predictions.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_prediction_error(self, error: &str) -> Self {
        self.predictions
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
        self
    }

    pub fn with_assessment(self, reply: Reply<String>) -> Self {
        self.assessments.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn with_assessment_error(self, error: &str) -> Self {
        self.assessments
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
        self
    }

    pub fn with_section(self, reply: Reply<String>) -> Self {
        self.sections.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn with_section_error(self, error: &str) -> Self {
        self.sections
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
        self
    }

    pub fn with_chat(self, reply: Reply<ChatReply>) -> Self {
        self.chats.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn with_chat_error(self, error: &str) -> Self {
        self.chats.lock().unwrap().push_back(Err(error.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Result<T> {
        match queue.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(Error::unexpected_response("mock", message)),
            None => Err(Error::internal("No more mock responses available")),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn predict(&self, form: &FormSubmission) -> Result<PredictResponse> {
        self.record(BackendCall::Predict(form.clone()));
        Self::next(&self.predictions)
    }

    async fn initial_assessment(&self, session_id: &str) -> Result<Reply<String>> {
        self.record(BackendCall::InitialAssessment {
            session_id: session_id.to_string(),
        });
        Self::next(&self.assessments)
    }

    async fn section(&self, session_id: &str, kind: SectionKind) -> Result<Reply<String>> {
        self.record(BackendCall::Section {
            session_id: session_id.to_string(),
            kind,
        });
        Self::next(&self.sections)
    }

    async fn chat(&self, session_id: &str, question: &str) -> Result<Reply<ChatReply>> {
        self.record(BackendCall::Chat {
            session_id: session_id.to_string(),
            question: question.to_string(),
        });
        Self::next(&self.chats)
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.record(BackendCall::Health);
        Ok(HealthStatus {
            status: "healthy".to_string(),
            model_loaded: true,
            assistant_available: false,
            timestamp: None,
        })
    }
}

// Helper functions for creating test data

pub fn create_prediction(session_id: &str, rating: u8, confidence: f64) -> PredictResponse {
    PredictResponse::Success(Prediction {
        session_id: session_id.to_string(),
        rating,
        confidence,
        probabilities: vec![
            ProbabilityEntry {
                label: 1,
                probability: 0.1,
            },
            ProbabilityEntry {
                label: 5,
                probability: 0.9,
            },
        ],
    })
}

pub fn create_chat_reply(response: &str, suggestions: &[&str]) -> Reply<ChatReply> {
    Reply::Ok(ChatReply {
        response: response.to_string(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    })
}
