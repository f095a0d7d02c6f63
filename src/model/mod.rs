//! In-memory model of an iTunes library
//!
//! Tracks and playlists live in separate collections with separate key
//! spaces: tracks by integer ID, playlists by persistent ID.

mod library;
mod playlist;
mod track;

pub use library::{Library, LibraryInfo};
pub use playlist::{Playlist, PlaylistCollection};
pub use track::{Track, TrackCollection};
