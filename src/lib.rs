//! Core of a playlist curation assistant for DJs.
//!
//! The crate keeps a hierarchical playlist library, drives the
//! select → load → suggest/generate → export workflow against an external
//! [`TrackProvider`], and encodes generated playlists as extended M3U.
//! Rendering is left to the caller, which forwards user intents to
//! [`AppController`] and reads snapshots back from [`AppModel`].

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod provider;

pub use config::Config;
pub use controller::{AppController, BackgroundEvent};
pub use error::{CurationError, Result};
pub use model::{
    AppModel, Phase, PlaylistNode, PlaylistTree, Status, Track, TrackCollection, WorkflowState,
};
pub use provider::TrackProvider;
