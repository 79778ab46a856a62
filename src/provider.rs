//! Contract for the external track provider
//!
//! The provider owns the music library and the compatibility rules (key and
//! tempo matching). The controller only relies on the calls below. Calls are
//! blocking; the controller moves the now-playing call onto tokio's blocking
//! pool, so implementations must be shareable across threads.

use crate::model::{PlaylistNode, Track, TrackCollection};

pub trait TrackProvider: Send + Sync {
    /// Full playlist forest; may be empty
    fn get_playlists(&self) -> Vec<PlaylistNode>;

    /// Tracks of the playlist called `name`, `None` when it cannot be loaded
    fn load_playlist(&self, name: &str) -> Option<TrackCollection>;

    /// Tracks compatible with `collection`
    fn suggest(&self, collection: &TrackCollection) -> Option<TrackCollection>;

    /// A mixable playlist built from `collection`
    fn generate(&self, collection: &TrackCollection) -> Option<TrackCollection>;

    /// The track currently playing in the DJ software, if any
    fn get_now_playing(&self, collection: &TrackCollection) -> Option<Track>;
}
