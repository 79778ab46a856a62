//! Controller module - executes user intents against the model
//!
//! The renderer forwards intents here and reads the model back. Every
//! operation returns the status it produced and also stores it in the
//! workflow state. It is organized into submodules by responsibility:
//!
//! - `navigation`: library refresh and playlist selection
//! - `curation`: suggestions, generation and export
//! - `now_playing`: background now-playing fetch and result delivery

mod curation;
mod navigation;
mod now_playing;

pub use now_playing::BackgroundEvent;

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::config::Config;
use crate::error::{CurationError, Result};
use crate::model::{AppModel, Status};
use crate::provider::TrackProvider;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: AppModel,
    pub(crate) provider: Arc<dyn TrackProvider>,
    pub(crate) config: Arc<Config>,
    events_tx: mpsc::UnboundedSender<BackgroundEvent>,
    events_rx: Arc<Mutex<mpsc::UnboundedReceiver<BackgroundEvent>>>,
}

impl AppController {
    pub fn new(model: AppModel, provider: Arc<dyn TrackProvider>, config: Config) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            model,
            provider,
            config: Arc::new(config),
            events_tx,
            events_rx: Arc::new(Mutex::new(events_rx)),
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    /// Record `error` as the visible status and hand it back
    pub(crate) async fn fail<T>(&self, error: CurationError) -> Result<T> {
        tracing::warn!(error = %error, "Intent failed");
        self.model.set_status(Status::failure(Self::format_error(&error))).await;
        Err(error)
    }

    pub(crate) fn format_error(error: &CurationError) -> String {
        match error {
            CurationError::NotFound(_) => "Invalid playlist selection".to_string(),
            CurationError::PreconditionFailed(message) | CurationError::ProviderEmpty(message) => {
                message.clone()
            }
            CurationError::Sink(e) => format!("Export failed: {}", e),
        }
    }
}
