mod assistant;
mod controller;
pub mod display;
mod document;
mod form;
pub mod html;
mod state;
mod view;

pub use controller::{
    ASSISTANT_SCROLL_DELAY, Controller, MISSING_PREDICTION_MESSAGE, NETWORK_ERROR_MESSAGE,
    PanelOutcome, RESULTS_SCROLL_DELAY, SECTION_SCROLL_DELAY, SubmitOutcome,
};
pub use display::ResultDisplay;
pub use document::HtmlDocument;
pub use form::first_negative_field;
pub use state::{Author, ChatMessage, UiState};
pub use view::{AlertKind, Control, ScrollTarget, View};
