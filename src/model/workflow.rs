//! Workflow state machine
//!
//! [`WorkflowState`] is a plain value. Every transition borrows the current
//! state and returns a complete successor, so whoever holds the live state
//! swaps it in one assignment and observers never see a half-applied update.

use std::sync::Arc;

use crate::error::{CurationError, Result};

use super::track::{Track, TrackCollection};
use super::types::{CollectionId, Phase, SelectedPlaylist, Status};

const SELECT_PLAYLIST_FIRST: &str = "Please select a playlist first";
const GENERATE_FIRST: &str = "Please generate a playlist first";

/// Tracks of the selected playlist as returned by the provider
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedCollection {
    pub id: CollectionId,
    pub playlist_id: String,
    pub playlist_name: String,
    pub tracks: Arc<TrackCollection>,
}

impl LoadedCollection {
    pub fn summary(&self) -> String {
        format!("Playlist: {}\nTracks: {}", self.playlist_name, self.tracks.len())
    }
}

/// Captured when a load starts; the result only applies while it still matches
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub playlist_id: String,
    pub playlist_name: String,
}

/// Captured when a now-playing fetch starts
#[derive(Clone, Debug, PartialEq)]
pub struct NowPlayingTicket {
    pub collection_id: CollectionId,
    /// Issue order among now-playing requests; only the latest one applies
    pub request: u64,
    pub tracks: Arc<TrackCollection>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkflowState {
    pub phase: Phase,
    pub selected_playlist: Option<SelectedPlaylist>,
    pub loaded: Option<LoadedCollection>,
    pub suggested: Arc<TrackCollection>,
    pub generated: Arc<TrackCollection>,
    /// Overlay bit: a now-playing fetch is in flight for `loaded`
    pub now_playing_pending: bool,
    pub now_playing: Option<Track>,
    /// A now-playing result has been applied for `loaded`
    pub now_playing_fetched: bool,
    /// Set by a successful export, cleared when `generated` changes
    pub exported: bool,
    pub status: Status,
    collection_seq: u64,
    now_playing_seq: u64,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_suggest(&self) -> bool {
        self.phase == Phase::Loaded
    }

    pub fn can_generate(&self) -> bool {
        self.phase == Phase::Loaded
    }

    pub fn can_export(&self) -> bool {
        !self.generated.is_empty()
    }

    pub fn can_request_now_playing(&self) -> bool {
        self.loaded.is_some()
    }

    /// Information panel text for the now-playing area
    pub fn now_playing_text(&self) -> String {
        match (&self.now_playing, self.now_playing_pending) {
            (_, true) => "Loading now playing...".to_string(),
            (Some(track), false) => track.now_playing_summary(),
            (None, false) if self.now_playing_fetched => "No track is currently playing".to_string(),
            (None, false) => "Press 'Now Playing' to update".to_string(),
        }
    }

    /// Whether all cross-field invariants hold
    pub fn is_consistent(&self) -> bool {
        let loaded_has_selection = match (&self.loaded, &self.selected_playlist) {
            (Some(loaded), Some(selected)) => loaded.playlist_id == selected.id,
            (Some(_), None) => false,
            (None, _) => true,
        };
        let loaded_matches_phase = self.loaded.is_some() == (self.phase == Phase::Loaded);
        let pending_needs_loaded = !self.now_playing_pending || self.loaded.is_some();
        let exported_needs_generated = !self.exported || !self.generated.is_empty();

        loaded_has_selection && loaded_matches_phase && pending_needs_loaded && exported_needs_generated
    }

    pub fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Back to `Idle` with nothing selected. Collection ids and request
    /// numbers stay monotonic so a fetch issued before the reset can never
    /// match later state.
    pub fn reset(&self, status: Status) -> Self {
        Self {
            status,
            collection_seq: self.collection_seq,
            now_playing_seq: self.now_playing_seq,
            ..Self::default()
        }
    }

    /// Record a leaf selection (`PlaylistChosen`). Everything derived from the
    /// previous selection is dropped; the status line is left to `begin_load`.
    pub fn choose_playlist(&self, id: &str, name: &str) -> Self {
        Self {
            phase: Phase::PlaylistChosen,
            selected_playlist: Some(SelectedPlaylist {
                id: id.to_string(),
                name: name.to_string(),
            }),
            loaded: None,
            suggested: Arc::default(),
            generated: Arc::default(),
            now_playing_pending: false,
            now_playing: None,
            now_playing_fetched: false,
            exported: false,
            ..self.clone()
        }
    }

    /// Move the chosen playlist into `Loading`
    pub fn begin_load(&self) -> Result<(Self, LoadTicket)> {
        let selected = match (&self.selected_playlist, self.phase) {
            (Some(selected), Phase::PlaylistChosen) => selected.clone(),
            _ => return Err(CurationError::precondition(SELECT_PLAYLIST_FIRST)),
        };

        let next = Self {
            phase: Phase::Loading,
            status: Status::info(format!("Loading playlist: {}...", selected.name)),
            ..self.clone()
        };
        let ticket = LoadTicket {
            playlist_id: selected.id,
            playlist_name: selected.name,
        };
        Ok((next, ticket))
    }

    /// Whether a load issued with `ticket` still targets the live selection
    pub fn is_current_load(&self, ticket: &LoadTicket) -> bool {
        self.phase == Phase::Loading
            && self
                .selected_playlist
                .as_ref()
                .is_some_and(|selected| selected.id == ticket.playlist_id)
    }

    /// Apply a finished load. `None` when the ticket is stale.
    pub fn finish_load(&self, ticket: &LoadTicket, result: Option<TrackCollection>) -> Option<Self> {
        if !self.is_current_load(ticket) {
            return None;
        }

        let next = match result {
            Some(tracks) => {
                let seq = self.collection_seq + 1;
                let count = tracks.len();
                Self {
                    phase: Phase::Loaded,
                    loaded: Some(LoadedCollection {
                        id: CollectionId(seq),
                        playlist_id: ticket.playlist_id.clone(),
                        playlist_name: ticket.playlist_name.clone(),
                        tracks: Arc::new(tracks),
                    }),
                    status: Status::info(format!(
                        "Loaded {} tracks from {}",
                        count, ticket.playlist_name
                    )),
                    collection_seq: seq,
                    ..self.clone()
                }
            }
            None => Self {
                phase: Phase::LoadFailed,
                loaded: None,
                status: Status::failure(format!("Failed to load playlist: {}", ticket.playlist_name)),
                ..self.clone()
            },
        };
        Some(next)
    }

    pub fn require_loaded(&self) -> Result<&LoadedCollection> {
        match (&self.loaded, self.phase) {
            (Some(loaded), Phase::Loaded) => Ok(loaded),
            _ => Err(CurationError::precondition(SELECT_PLAYLIST_FIRST)),
        }
    }

    /// Install suggestions; an empty or missing result is not a failure
    pub fn with_suggestions(&self, result: Option<TrackCollection>) -> Self {
        let suggested = result.unwrap_or_default();
        let status = if suggested.is_empty() {
            Status::info("No suggestions found")
        } else {
            Status::info(format!("Found {} suggested tracks", suggested.len()))
        };
        Self {
            suggested: Arc::new(suggested),
            status,
            ..self.clone()
        }
    }

    /// Install a generated playlist. A missing result clears `generated` and
    /// is returned as the error alongside the successor state.
    pub fn with_generated(&self, result: Option<TrackCollection>) -> (Self, Option<CurationError>) {
        match result {
            Some(generated) => {
                let status = Status::info(format!("Generated playlist with {} tracks", generated.len()));
                let next = Self {
                    generated: Arc::new(generated),
                    exported: false,
                    status,
                    ..self.clone()
                };
                (next, None)
            }
            None => {
                let error = CurationError::provider_empty("Failed to generate playlist");
                let next = Self {
                    generated: Arc::default(),
                    exported: false,
                    status: Status::failure(error.to_string()),
                    ..self.clone()
                };
                (next, Some(error))
            }
        }
    }

    pub fn require_exportable(&self) -> Result<Arc<TrackCollection>> {
        if self.can_export() {
            Ok(self.generated.clone())
        } else {
            Err(CurationError::precondition(GENERATE_FIRST))
        }
    }

    pub fn mark_exported(&self) -> Self {
        Self {
            exported: true,
            status: Status::info("Playlist exported successfully"),
            ..self.clone()
        }
    }

    /// Raise the pending overlay for the loaded collection. A new request
    /// supersedes any still in flight.
    pub fn begin_now_playing(&self) -> Result<(Self, NowPlayingTicket)> {
        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| CurationError::precondition(SELECT_PLAYLIST_FIRST))?;

        let request = self.now_playing_seq + 1;
        let ticket = NowPlayingTicket {
            collection_id: loaded.id,
            request,
            tracks: loaded.tracks.clone(),
        };
        let next = Self {
            now_playing_pending: true,
            status: Status::info("Getting current track..."),
            now_playing_seq: request,
            ..self.clone()
        };
        Ok((next, ticket))
    }

    /// Whether a fetch issued with `ticket` is the latest one for the live
    /// collection and has not been applied yet
    pub fn is_current_now_playing(&self, ticket: &NowPlayingTicket) -> bool {
        self.now_playing_pending
            && ticket.request == self.now_playing_seq
            && self
                .loaded
                .as_ref()
                .is_some_and(|loaded| loaded.id == ticket.collection_id)
    }

    /// Apply a now-playing result. `None` when the loaded collection changed
    /// or a newer request was issued since the ticket.
    pub fn finish_now_playing(&self, ticket: &NowPlayingTicket, track: Option<Track>) -> Option<Self> {
        if !self.is_current_now_playing(ticket) {
            return None;
        }

        let status = match &track {
            Some(track) => Status::info(format!("Now Playing: {}", track.title)),
            None => Status::info("No track playing"),
        };
        Some(Self {
            now_playing_pending: false,
            now_playing: track,
            now_playing_fetched: true,
            status,
            ..self.clone()
        })
    }
}
