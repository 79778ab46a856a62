//! Core type definitions for the workflow

use std::fmt;

/// Discrete workflow phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    PlaylistChosen,
    Loading,
    Loaded,
    LoadFailed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::PlaylistChosen => "playlist chosen",
            Phase::Loading => "loading",
            Phase::Loaded => "loaded",
            Phase::LoadFailed => "load failed",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Failure,
}

/// Status bar content produced by every controller operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Failure,
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == StatusKind::Failure
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::info("Select a playlist to begin")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StatusKind::Info => f.write_str(&self.message),
            StatusKind::Failure => write!(f, "Error: {}", self.message),
        }
    }
}

/// Identity of one installed loaded collection; never reused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CollectionId(pub(crate) u64);

/// A leaf playlist the user picked, by id into the tree index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedPlaylist {
    pub id: String,
    pub name: String,
}
