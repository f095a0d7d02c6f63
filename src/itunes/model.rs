//! Typed records for the sections of an iTunes library plist
//!
//! The plist crate does the actual parsing; these structs are the
//! boundary between its generic values and the library model.

use serde::Deserialize;
use std::path::PathBuf;

/// Top level of an iTunes Music Library.xml document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(rename = "Major Version")]
    pub major_version: Option<i64>,

    #[serde(rename = "Minor Version")]
    pub minor_version: Option<i64>,

    #[serde(rename = "Date")]
    pub date: Option<plist::Date>,

    #[serde(rename = "Application Version")]
    pub application_version: Option<String>,

    #[serde(rename = "Features")]
    pub features: Option<i64>,

    #[serde(rename = "Show Content Ratings")]
    pub show_content_ratings: Option<bool>,

    /// file:// URL of the media folder
    #[serde(rename = "Music Folder")]
    pub music_folder: Option<String>,

    #[serde(rename = "Library Persistent ID")]
    pub library_persistent_id: Option<String>,

    /// Track ID (as a string key) -> track field map, in document order
    #[serde(rename = "Tracks", default)]
    pub tracks: plist::Dictionary,

    #[serde(rename = "Playlists", default)]
    pub playlists: Vec<PlaylistInfo>,
}

/// Field map of one entry in the `Tracks` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackInfo {
    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "Artist")]
    pub artist: Option<String>,

    #[serde(rename = "Album")]
    pub album: Option<String>,

    /// e.g. "MPEG audio file", "Purchased AAC audio file", "MPEG-4 video file"
    #[serde(rename = "Kind")]
    pub kind: Option<String>,

    #[serde(rename = "Genre")]
    pub genre: Option<String>,

    #[serde(rename = "Persistent ID")]
    pub persistent_id: Option<String>,

    /// file:// URL
    #[serde(rename = "Location")]
    pub location: Option<String>,

    /// Milliseconds
    #[serde(rename = "Total Time")]
    pub total_time: Option<u64>,

    #[serde(rename = "Track Number")]
    pub track_number: Option<u32>,

    #[serde(rename = "Year")]
    pub year: Option<u32>,

    /// Bytes
    #[serde(rename = "Size")]
    pub size: Option<u64>,
}

/// Field map of one entry in the `Playlists` array
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaylistInfo {
    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "Folder", default)]
    pub folder: bool,

    /// Persistent ID of the containing folder (absent for top-level playlists)
    #[serde(rename = "Parent Persistent ID")]
    pub parent_persistent_id: Option<String>,

    #[serde(rename = "Playlist Persistent ID")]
    pub persistent_id: String,

    #[serde(rename = "Playlist Items", default)]
    pub items: Vec<PlaylistItem>,

    #[serde(rename = "Playlist ID")]
    pub playlist_id: Option<i64>,

    #[serde(rename = "Master", default)]
    pub master: bool,

    #[serde(rename = "Visible")]
    pub visible: Option<bool>,

    #[serde(rename = "Distinguished Kind")]
    pub distinguished_kind: Option<i64>,
}

/// Entry in a playlist, referencing a track by its integer ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PlaylistItem {
    #[serde(rename = "Track ID")]
    pub track_id: i64,
}

/// Convert an iTunes file:// location to a PathBuf
///
/// iTunes writes `file://localhost/Users/...`, newer Music.app exports
/// drop the host.
pub fn location_to_path(location: &str) -> Option<PathBuf> {
    let path = location
        .strip_prefix("file://localhost")
        .or_else(|| location.strip_prefix("file://"))?;
    let decoded = urlencoding::decode(path).ok()?;
    Some(PathBuf::from(decoded.into_owned()))
}
