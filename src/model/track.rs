use crate::error::{LibraryError, Result};
use crate::itunes::model::{location_to_path, TrackInfo};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";
const AUDIO_FILE_SUFFIX: &str = " audio file";

/// A single media item from the library
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    id: i64,
    info: TrackInfo,
}

impl Track {
    pub fn new(id: i64, info: TrackInfo) -> Self {
        Self { id, info }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.info.name.as_deref()
    }

    pub fn artist(&self) -> &str {
        self.info.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
    }

    pub fn album(&self) -> &str {
        self.info.album.as_deref().unwrap_or(UNKNOWN_ALBUM)
    }

    pub fn kind(&self) -> Option<&str> {
        self.info.kind.as_deref()
    }

    pub fn genre(&self) -> Option<&str> {
        self.info.genre.as_deref()
    }

    pub fn persistent_id(&self) -> Option<&str> {
        self.info.persistent_id.as_deref()
    }

    /// Decoded filesystem path of the media file, if it has a file:// location
    pub fn file_path(&self) -> Option<PathBuf> {
        self.info.location.as_deref().and_then(location_to_path)
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.info.total_time
    }

    pub fn track_number(&self) -> Option<u32> {
        self.info.track_number
    }

    pub fn year(&self) -> Option<u32> {
        self.info.year
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.info.size
    }

    /// True when the kind is one of the "... audio file" kinds
    pub fn is_audio_file(&self) -> bool {
        self.kind()
            .is_some_and(|kind| kind.ends_with(AUDIO_FILE_SUFFIX))
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name().unwrap_or_default(), self.artist())
    }
}

/// All tracks of a library, indexed by integer track ID
///
/// Iteration follows document order.
#[derive(Debug, Default)]
pub struct TrackCollection {
    tracks: Vec<Rc<Track>>,
    index: HashMap<i64, usize>,
}

impl TrackCollection {
    /// Build the collection from the `Tracks` section of a document
    pub fn build(section: &plist::Dictionary) -> Result<Self> {
        let mut collection = Self::default();

        for (key, value) in section {
            let id = parse_track_id(key)?;
            let info: TrackInfo =
                plist::from_value(value).map_err(|source| LibraryError::MalformedEntry {
                    section: "Tracks",
                    key: key.clone(),
                    source,
                })?;
            collection.insert(Track::new(id, info));
        }

        log::debug!("Built track collection: {} tracks", collection.len());
        Ok(collection)
    }

    /// Insert a track; a track with the same ID is replaced in place
    fn insert(&mut self, track: Track) {
        let id = track.id();
        match self.index.get(&id) {
            Some(&position) => {
                log::warn!("Duplicate track ID {}, later entry wins", id);
                self.tracks[position] = Rc::new(track);
            }
            None => {
                self.index.insert(id, self.tracks.len());
                self.tracks.push(Rc::new(track));
            }
        }
    }

    /// Get a track by ID
    pub fn get(&self, id: i64) -> Result<&Track> {
        self.get_shared(id).map(Rc::as_ref)
    }

    pub(crate) fn get_shared(&self, id: i64) -> Result<&Rc<Track>> {
        self.index
            .get(&id)
            .map(|&position| &self.tracks[position])
            .ok_or_else(|| LibraryError::track_not_found(id))
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    /// All tracks in document order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().map(Rc::as_ref)
    }

    /// Tracks whose kind marks them as audio files
    pub fn audio_files(&self) -> impl Iterator<Item = &Track> {
        self.iter().filter(|track| track.is_audio_file())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl fmt::Display for TrackCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackCollection ({} tracks)", self.len())
    }
}

/// Track section keys are decimal strings ("1234")
fn parse_track_id(key: &str) -> Result<i64> {
    key.trim()
        .parse()
        .map_err(|_| LibraryError::InvalidTrackId(key.to_string()))
}
