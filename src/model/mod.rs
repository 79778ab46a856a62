//! Model module - Application state and data types
//!
//! - `tree`: playlist forest and id index
//! - `track`: tracks and track collections
//! - `camelot`: key notation lookup
//! - `types`: phase, status and identity types
//! - `workflow`: the workflow state machine
//! - `app_model`: shared holder the controller commits into

mod app_model;
mod camelot;
mod track;
mod tree;
mod types;
mod workflow;

pub use app_model::AppModel;
pub use camelot::to_camelot;
pub use track::{Track, TrackCollection, TRACK_TABLE_HEADER};
pub use tree::{LibraryOrigin, PlaylistNode, PlaylistTree, TreeNode, ROOT_ID};
pub use types::{CollectionId, Phase, SelectedPlaylist, Status, StatusKind};
pub use workflow::{LoadTicket, LoadedCollection, NowPlayingTicket, WorkflowState};
