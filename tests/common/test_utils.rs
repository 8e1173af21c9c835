use greenverify::{
    Result,
    backend::{Backend, FormSubmission},
    config::{BackendConfig, Config, FieldConfig, FieldKind, FormConfig, LogsConfig, OutputConfig},
    ui::{Controller, HtmlDocument},
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

use super::mocks::{MockBackend, create_prediction};

/// Create a test configuration with sensible defaults
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        backend: BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: Some(5),
        },
        form: FormConfig {
            fields: vec![
                FieldConfig {
                    name: "Energy_Efficiency".to_string(),
                    kind: FieldKind::Number,
                    default: "3".to_string(),
                },
                FieldConfig {
                    name: "Water_Conservation".to_string(),
                    kind: FieldKind::Number,
                    default: "2".to_string(),
                },
                FieldConfig {
                    name: "Climate_Zone".to_string(),
                    kind: FieldKind::Text,
                    default: "Composite".to_string(),
                },
            ],
        },
        output: OutputConfig { path: None },
        logs: LogsConfig {
            level: "debug".to_string(),
        },
    }
}

/// The form described by [`create_test_config`].
pub fn create_test_form() -> FormSubmission {
    FormSubmission::from_config(&create_test_config("http://127.0.0.1:5000").form)
}

/// Controller over a shared mock, so the test can inspect recorded calls.
pub fn create_controller(mock: MockBackend) -> (Controller, Arc<MockBackend>, HtmlDocument) {
    let mock = Arc::new(mock);
    let backend: Arc<dyn Backend> = mock.clone();
    (Controller::new(backend), mock, HtmlDocument::new())
}

/// Controller that already holds session `session-1` from a 4-star prediction.
/// The prediction call is recorded on the mock.
pub async fn create_predicted_controller(
    mock: MockBackend,
) -> (Controller, Arc<MockBackend>, HtmlDocument) {
    mock.predictions
        .lock()
        .unwrap()
        .push_front(Ok(create_prediction("session-1", 4, 0.847)));
    let (mut controller, mock, mut document) = create_controller(mock);
    controller
        .submit_prediction(&create_test_form(), &mut document)
        .await;
    assert_eq!(controller.session_id(), Some("session-1"));
    (controller, mock, document)
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
backend:
  base_url: "http://127.0.0.1:5000"
  timeout_secs: 30

form:
  fields:
    - name: "Energy_Efficiency"
      kind: "number"
      default: "3"
    - name: "Waste_Management"
    - name: "Climate_Zone"
      kind: "text"
      default: "Composite"

output:
  path: "page.html"

logs:
  level: "debug"
"#;

/// Only the required section
pub const MINIMAL_CONFIG_YAML: &str = r#"
backend:
  base_url: "https://greenverify.example.com/"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
backend:
  timeout_secs: "soon"

form:
  fields:
    - kind: "slider"
"#;

/// Configuration that parses but names no usable backend
pub const NON_HTTP_CONFIG_YAML: &str = r#"
backend:
  base_url: "ftp://127.0.0.1"
"#;
