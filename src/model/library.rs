use super::{Playlist, PlaylistCollection, Track, TrackCollection};
use crate::error::Result;
use crate::itunes::model::{location_to_path, Document, PlaylistInfo};
use chrono::{DateTime, Utc};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

/// Top-level metadata of the library document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryInfo {
    pub major_version: Option<i64>,
    pub minor_version: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub application_version: Option<String>,
    pub features: Option<i64>,
    pub show_content_ratings: Option<bool>,
    /// file:// URL, see [`LibraryInfo::music_folder_path`]
    pub music_folder: Option<String>,
    pub library_persistent_id: Option<String>,
}

impl LibraryInfo {
    pub fn music_folder_path(&self) -> Option<PathBuf> {
        self.music_folder.as_deref().and_then(location_to_path)
    }

    /// All recognized keys with their values, in a fixed order
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("Major Version", self.major_version.map(|v| v.to_string())),
            ("Minor Version", self.minor_version.map(|v| v.to_string())),
            ("Date", self.date.map(|d| d.to_rfc3339())),
            ("Application Version", self.application_version.clone()),
            ("Features", self.features.map(|v| v.to_string())),
            (
                "Show Content Ratings",
                self.show_content_ratings.map(|v| v.to_string()),
            ),
            ("Music Folder", self.music_folder.clone()),
            ("Library Persistent ID", self.library_persistent_id.clone()),
        ]
    }
}

/// A parsed iTunes library
///
/// Tracks and playlists are built from the document the first time they
/// are asked for. A failed build is returned to the caller and attempted
/// again on the next call.
#[derive(Debug)]
pub struct Library {
    info: LibraryInfo,
    track_section: plist::Dictionary,
    playlist_section: Vec<PlaylistInfo>,
    tracks: OnceCell<Rc<TrackCollection>>,
    playlists: OnceCell<PlaylistCollection>,
}

impl Library {
    /// Read and parse a library file (XML or binary plist)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::itunes::parse_library(path.as_ref())
    }

    pub fn from_document(document: Document) -> Self {
        let info = LibraryInfo {
            major_version: document.major_version,
            minor_version: document.minor_version,
            date: document
                .date
                .map(|date| DateTime::<Utc>::from(SystemTime::from(date))),
            application_version: document.application_version,
            features: document.features,
            show_content_ratings: document.show_content_ratings,
            music_folder: document.music_folder,
            library_persistent_id: document.library_persistent_id,
        };

        Self {
            info,
            track_section: document.tracks,
            playlist_section: document.playlists,
            tracks: OnceCell::new(),
            playlists: OnceCell::new(),
        }
    }

    pub fn info(&self) -> &LibraryInfo {
        &self.info
    }

    pub fn tracks(&self) -> Result<&TrackCollection> {
        self.track_store().map(Rc::as_ref)
    }

    fn track_store(&self) -> Result<&Rc<TrackCollection>> {
        if let Some(tracks) = self.tracks.get() {
            return Ok(tracks);
        }
        let tracks = TrackCollection::build(&self.track_section)?;
        Ok(self.tracks.get_or_init(|| Rc::new(tracks)))
    }

    /// Get a track by ID
    pub fn track(&self, id: i64) -> Result<&Track> {
        self.tracks()?.get(id)
    }

    pub fn playlists(&self) -> Result<&PlaylistCollection> {
        if let Some(playlists) = self.playlists.get() {
            return Ok(playlists);
        }
        let track_store = Rc::clone(self.track_store()?);
        let playlists = PlaylistCollection::build(&self.playlist_section, track_store)?;
        Ok(self.playlists.get_or_init(|| playlists))
    }

    /// Get a playlist by persistent ID
    pub fn playlist(&self, persistent_id: &str) -> Result<&Playlist> {
        self.playlists()?.get(persistent_id)
    }
}
