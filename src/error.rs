//! Error types for library loading and lookups

use std::fmt;
use thiserror::Error;

/// Which collection a failed lookup was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Track,
    Playlist,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Track => f.write_str("Track"),
            EntityKind::Playlist => f.write_str("Playlist"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LibraryError {
    /// Lookup by ID found nothing
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// A playlist has children but is not flagged as a folder
    #[error(
        "Database inconsistency! Playlist '{parent_name}' ({parent_id}) contains playlists but is not a folder!"
    )]
    Consistency {
        parent_name: String,
        parent_id: String,
    },

    #[error("Invalid track ID {0:?}: not an integer")]
    InvalidTrackId(String),

    #[error("Malformed {section} entry {key:?}: {source}")]
    MalformedEntry {
        section: &'static str,
        key: String,
        #[source]
        source: plist::Error,
    },

    #[error("Failed to read library document: {0}")]
    Document(#[from] plist::Error),
}

impl LibraryError {
    pub fn track_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::Track,
            id: id.to_string(),
        }
    }

    pub fn playlist_not_found(persistent_id: &str) -> Self {
        Self::NotFound {
            kind: EntityKind::Playlist,
            id: persistent_id.to_string(),
        }
    }

    /// True for lookups that found nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
