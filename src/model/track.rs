//! Track values supplied by the provider and ordered collections of them

use serde::{Deserialize, Serialize};

/// A single track as reported by the track provider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub bpm: f64,
    /// Musical key in pitch notation, e.g. `"Am"` or `"F#"`
    pub key: String,
    /// File location, written to exported playlists byte for byte
    pub path: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        bpm: f64,
        key: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            bpm,
            key: key.into(),
            path: path.into(),
        }
    }

    /// Camelot wheel code for this track's key, if the key is recognised
    pub fn camelot(&self) -> Option<&'static str> {
        super::camelot::to_camelot(&self.key)
    }

    /// Key column text: Camelot code with the pitch name, or the raw key
    pub fn key_label(&self) -> String {
        match self.camelot() {
            Some(code) => format!("{} ({})", code, self.key),
            None => self.key.clone(),
        }
    }

    /// Title, Artist, BPM, Key
    pub fn table_row(&self) -> [String; 4] {
        [
            self.title.clone(),
            self.artist.clone(),
            format!("{:.1}", self.bpm),
            self.key_label(),
        ]
    }

    /// Information panel text for the now-playing track
    pub fn now_playing_summary(&self) -> String {
        format!(
            "Title: {}\nArtist: {}\nBPM: {:.1}\nKey: {}",
            self.title,
            self.artist,
            self.bpm,
            self.key_label()
        )
    }
}

pub const TRACK_TABLE_HEADER: [&str; 4] = ["Title", "Artist", "BPM", "Key"];

/// Ordered sequence of track slots.
///
/// Providers may hand back items without an identity; those slots are kept so
/// the count matches what the provider reported, but they are skipped by
/// [`TrackCollection::tracks`] and by the playlist encoder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackCollection {
    slots: Vec<Option<Track>>,
}

impl TrackCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: Vec<Option<Track>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<Track>] {
        &self.slots
    }

    /// Present tracks in order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.slots.iter().flatten()
    }

    pub fn table_rows(&self) -> Vec<[String; 4]> {
        self.tracks().map(Track::table_row).collect()
    }
}

impl From<Vec<Track>> for TrackCollection {
    fn from(tracks: Vec<Track>) -> Self {
        Self {
            slots: tracks.into_iter().map(Some).collect(),
        }
    }
}

impl FromIterator<Track> for TrackCollection {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}
