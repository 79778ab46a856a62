//! Background now-playing fetch
//!
//! The provider call runs on tokio's blocking pool. Its result comes back as
//! a [`BackgroundEvent`] on the controller's channel and is applied by the
//! interactive loop, never by the worker itself.

use crate::error::Result;
use crate::model::{NowPlayingTicket, Status, Track};

use super::AppController;

/// Result of work finished off the interactive context
#[derive(Clone, Debug)]
pub enum BackgroundEvent {
    NowPlaying {
        ticket: NowPlayingTicket,
        track: Option<Track>,
    },
}

impl AppController {
    /// Start fetching the now-playing track for the loaded playlist.
    /// Returns as soon as the fetch is scheduled.
    pub async fn request_now_playing(&self) -> Result<Status> {
        let ticket = match self.model.try_commit(|state| state.begin_now_playing()).await {
            Ok(ticket) => ticket,
            Err(e) => return self.fail(e).await,
        };

        let provider = self.provider.clone();
        let events_tx = self.events_tx.clone();
        tracing::debug!(collection = ?ticket.collection_id, request = ticket.request, "Fetching now playing in background");

        tokio::task::spawn_blocking(move || {
            let track = provider.get_now_playing(&ticket.tracks);
            if events_tx.send(BackgroundEvent::NowPlaying { ticket, track }).is_err() {
                tracing::debug!("Controller gone, dropping now-playing result");
            }
        });

        Ok(self.model.get_status().await)
    }

    /// Wait for the next background result
    pub async fn next_background_event(&self) -> Option<BackgroundEvent> {
        self.events_rx.lock().await.recv().await
    }

    /// Apply a background result if it is still relevant. Returns the new
    /// status, or `None` when the result was stale and dropped.
    pub async fn apply_background_event(&self, event: BackgroundEvent) -> Option<Status> {
        match event {
            BackgroundEvent::NowPlaying { ticket, track } => {
                let title = track.as_ref().map(|t| t.title.clone());
                let applied = self
                    .model
                    .commit_with(|state| state.finish_now_playing(&ticket, track))
                    .await;

                if !applied {
                    tracing::debug!(
                        collection = ?ticket.collection_id,
                        request = ticket.request,
                        "Dropping stale now-playing result"
                    );
                    return None;
                }

                match title {
                    Some(title) => tracing::info!(track = %title, "Now playing updated"),
                    None => tracing::info!("No track playing"),
                }
                Some(self.model.get_status().await)
            }
        }
    }

    /// Apply every result already delivered without waiting. Meant to be
    /// called once per renderer frame. Returns how many were applied.
    pub async fn process_background_events(&self) -> usize {
        let mut pending = Vec::new();
        {
            let mut rx = self.events_rx.lock().await;
            while let Ok(event) = rx.try_recv() {
                pending.push(event);
            }
        }

        let mut applied = 0;
        for event in pending {
            if self.apply_background_event(event).await.is_some() {
                applied += 1;
            }
        }
        applied
    }
}
