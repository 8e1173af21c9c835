use super::controller::{Controller, NETWORK_ERROR_MESSAGE, RESULTS_SCROLL_DELAY, SubmitOutcome};
use super::display::ResultDisplay;
use super::html::field_display_name;
use super::view::{AlertKind, Control, ScrollTarget, View};
use crate::{
    Result,
    backend::{FormField, FormSubmission, PredictResponse},
    config::FieldKind,
};
use tracing::{debug, error, info, warn};

fn is_negative(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|number| number < 0.0)
}

/// First numeric field holding a negative number, in form order.
pub fn first_negative_field(form: &FormSubmission) -> Option<&FormField> {
    form.fields
        .iter()
        .find(|field| field.kind == FieldKind::Number && is_negative(&field.value))
}

impl Controller {
    pub async fn submit_prediction(
        &mut self,
        form: &FormSubmission,
        view: &mut dyn View,
    ) -> SubmitOutcome {
        if let Some(field) = first_negative_field(form) {
            warn!("Blocked submission: field {} is negative", field.name);
            view.show_alert(
                AlertKind::Warning,
                &format!(
                    "{} cannot be negative. Please enter a positive value.",
                    field_display_name(&field.name)
                ),
            );
            view.focus_field(&field.name);
            return SubmitOutcome::Blocked {
                field: field.name.clone(),
            };
        }

        view.set_control_enabled(Control::Predict, false);
        view.clear_alerts();
        view.set_assistant_visible(false);

        info!("Submitting prediction with {} fields", form.fields.len());
        let response = self.backend.predict(form).await;
        let outcome = self.apply_prediction(response, view);

        view.set_control_enabled(Control::Predict, true);
        outcome
    }

    fn apply_prediction(
        &mut self,
        response: Result<PredictResponse>,
        view: &mut dyn View,
    ) -> SubmitOutcome {
        match response {
            Ok(PredictResponse::Warning { message }) => {
                info!("Prediction returned a warning: {}", message);
                view.show_alert(AlertKind::Warning, &message);
                view.hide_results();
                self.state.clear_session();
                SubmitOutcome::Warning
            }
            Ok(PredictResponse::Success(prediction)) => {
                info!(
                    "Prediction succeeded: {} stars, confidence {:.3}",
                    prediction.rating, prediction.confidence
                );
                let display = ResultDisplay::from_prediction(&prediction);
                self.state.session_id = Some(prediction.session_id);
                view.show_results(&display);
                view.scroll_into_view(ScrollTarget::Results, RESULTS_SCROLL_DELAY);
                SubmitOutcome::Predicted {
                    rating: prediction.rating,
                }
            }
            Ok(PredictResponse::Error { error }) => {
                warn!("Prediction failed: {}", error);
                view.show_alert(AlertKind::Error, &error);
                view.hide_results();
                self.state.clear_session();
                SubmitOutcome::Failed
            }
            Err(e) => {
                error!("Prediction request failed: {}", e);
                view.show_alert(AlertKind::Error, NETWORK_ERROR_MESSAGE);
                view.hide_results();
                self.state.clear_session();
                SubmitOutcome::TransportFailed
            }
        }
    }

    /// Input-time guard for numeric fields: negative values become `0`.
    /// Returns the value the field should hold.
    pub fn on_field_input(&self, name: &str, value: &str, view: &mut dyn View) -> String {
        if is_negative(value) {
            debug!("Clamping negative input {} for field {}", value, name);
            view.flag_field(name, value);
            "0".to_string()
        } else {
            value.to_string()
        }
    }
}
