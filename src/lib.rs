//! iTunes library reader
//!
//! Loads an iTunes / Music.app "iTunes Music Library.xml" into a queryable
//! model: library metadata, tracks indexed by ID, and the playlist folder
//! tree with lazily resolved track lists.

pub mod error;
pub mod itunes;
pub mod model;
pub mod report;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use error::{LibraryError, Result};
pub use model::{Library, Playlist, PlaylistCollection, Track, TrackCollection};
pub use report::{Report, ReportConfig};
