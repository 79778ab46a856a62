//! Suggestion, generation and export intents

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CurationError, Result};
use crate::export;
use crate::model::{Status, TrackCollection};

use super::AppController;

impl AppController {
    /// Ask the provider for tracks compatible with the loaded playlist.
    /// Finding nothing is reported as information, not as a failure.
    pub async fn request_suggestions(&self) -> Result<Status> {
        let state = self.model.get_workflow_state().await;
        let loaded = match state.require_loaded() {
            Ok(loaded) => loaded.clone(),
            Err(e) => return self.fail(e).await,
        };

        tracing::debug!(playlist = %loaded.playlist_name, "Getting track suggestions");
        let result = self.provider.suggest(&loaded.tracks);

        let applied = self
            .model
            .commit_with(|state| {
                let current = state.loaded.as_ref()?;
                (current.id == loaded.id).then(|| state.with_suggestions(result))
            })
            .await;
        if !applied {
            tracing::debug!("Dropping suggestions for a playlist that is no longer loaded");
        }

        let status = self.model.get_status().await;
        tracing::info!(status = %status, "Suggestions updated");
        Ok(status)
    }

    /// Ask the provider to build a playlist from the loaded one. A missing
    /// result clears the generated list and is reported as a failure.
    pub async fn request_generate(&self) -> Result<Status> {
        let state = self.model.get_workflow_state().await;
        let loaded = match state.require_loaded() {
            Ok(loaded) => loaded.clone(),
            Err(e) => return self.fail(e).await,
        };

        tracing::debug!(playlist = %loaded.playlist_name, "Generating playlist");
        let result = self.provider.generate(&loaded.tracks);

        let mut failure = None;
        self.model
            .commit_with(|state| {
                let current = state.loaded.as_ref()?;
                if current.id != loaded.id {
                    return None;
                }
                let (next, error) = state.with_generated(result);
                failure = error;
                Some(next)
            })
            .await;

        match failure {
            Some(error) => {
                tracing::error!(playlist = %loaded.playlist_name, "Provider generated no playlist");
                Err(error)
            }
            None => {
                let status = self.model.get_status().await;
                tracing::info!(status = %status, "Generated playlist updated");
                Ok(status)
            }
        }
    }

    /// Encode the generated playlist into `sink`
    pub async fn export_generated<W>(&self, sink: &mut W) -> Result<Status>
    where
        W: Write + ?Sized,
    {
        let generated = match self.model.get_workflow_state().await.require_exportable() {
            Ok(generated) => generated,
            Err(e) => return self.fail(e).await,
        };

        match export::write_m3u(generated.slots().iter().map(Option::as_ref), sink) {
            Ok(written) => self.finish_export(&generated, written, None).await,
            Err(e) => self.fail(CurationError::Sink(e)).await,
        }
    }

    /// Export to a file, replacing it only once the whole playlist is written
    pub async fn export_generated_to_path(&self, path: &Path) -> Result<Status> {
        let generated = match self.model.get_workflow_state().await.require_exportable() {
            Ok(generated) => generated,
            Err(e) => return self.fail(e).await,
        };

        match export::write_m3u_file(generated.slots().iter().map(Option::as_ref), path) {
            Ok(written) => self.finish_export(&generated, written, Some(path)).await,
            Err(e) => self.fail(CurationError::Sink(e)).await,
        }
    }

    /// Where an export into `directory` lands by default
    pub fn default_export_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.config.export.default_file_name)
    }

    async fn finish_export(
        &self,
        exported: &Arc<TrackCollection>,
        written: usize,
        path: Option<&Path>,
    ) -> Result<Status> {
        // Only flag the export if `generated` was not replaced meanwhile
        self.model
            .commit_with(|state| Arc::ptr_eq(&state.generated, exported).then(|| state.mark_exported()))
            .await;

        match path {
            Some(path) => tracing::info!(tracks = written, path = %path.display(), "Playlist exported"),
            None => tracing::info!(tracks = written, "Playlist exported"),
        }
        Ok(Status::info("Playlist exported successfully"))
    }
}
