use super::track::{Track, TrackCollection};
use crate::error::{LibraryError, Result};
use crate::itunes::model::PlaylistInfo;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A playlist or playlist folder
///
/// Parent and children are indices into the owning [`PlaylistCollection`];
/// use [`PlaylistCollection::parent_of`] and [`PlaylistCollection::children_of`]
/// to follow them.
#[derive(Debug)]
pub struct Playlist {
    info: PlaylistInfo,

    /// Resolved parent (set once during nesting resolution)
    parent: Option<usize>,

    /// Child playlists in document order
    children: Vec<usize>,

    track_store: Rc<TrackCollection>,

    /// Resolved on first call to `tracks()`
    tracks: OnceCell<Vec<Rc<Track>>>,
}

impl Playlist {
    fn new(info: PlaylistInfo, track_store: Rc<TrackCollection>) -> Self {
        Self {
            info,
            parent: None,
            children: Vec::new(),
            track_store,
            tracks: OnceCell::new(),
        }
    }

    pub fn persistent_id(&self) -> &str {
        &self.info.persistent_id
    }

    pub fn name(&self) -> Option<&str> {
        self.info.name.as_deref()
    }

    pub fn is_folder(&self) -> bool {
        self.info.folder
    }

    pub fn parent_persistent_id(&self) -> Option<&str> {
        self.info.parent_persistent_id.as_deref()
    }

    /// Top-level playlists have no parent
    pub fn is_top_level(&self) -> bool {
        self.info.parent_persistent_id.is_none()
    }

    pub fn playlist_id(&self) -> Option<i64> {
        self.info.playlist_id
    }

    /// The hidden "Library" playlist holding every track
    pub fn is_master(&self) -> bool {
        self.info.master
    }

    pub fn is_visible(&self) -> bool {
        self.info.visible.unwrap_or(true)
    }

    /// Built-in playlist kind (Music, Movies, Podcasts, ...), if any
    pub fn distinguished_kind(&self) -> Option<i64> {
        self.info.distinguished_kind
    }

    /// Raw track IDs, unresolved
    pub fn track_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.info.items.iter().map(|item| item.track_id)
    }

    /// Tracks of this playlist, in playlist order
    ///
    /// Resolved against the track collection on first call and cached.
    /// A reference to a track that does not exist is an error; nothing is
    /// cached in that case.
    pub fn tracks(&self) -> Result<&[Rc<Track>]> {
        if let Some(tracks) = self.tracks.get() {
            return Ok(tracks.as_slice());
        }

        let resolved = self
            .track_ids()
            .map(|id| self.track_store.get_shared(id).cloned())
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Resolved {} tracks for playlist {}",
            resolved.len(),
            self.persistent_id()
        );
        Ok(self.tracks.get_or_init(|| resolved).as_slice())
    }

    /// Number of resolved tracks
    pub fn len(&self) -> Result<usize> {
        self.tracks().map(<[_]>::len)
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// "Name (Folder, 3 tracks)" / "Name (3 tracks)"
    pub fn label(&self) -> Result<String> {
        let mut attributes = Vec::new();
        if self.is_folder() {
            attributes.push("Folder".to_string());
        }
        attributes.push(format!("{} tracks", self.len()?));

        Ok(format!(
            "{} ({})",
            self.name().unwrap_or_default(),
            attributes.join(", ")
        ))
    }
}

/// All playlists of a library, indexed by persistent ID
///
/// Playlists nest by persistent ID while tracks are referenced by integer
/// ID, so the two collections use separate key spaces.
#[derive(Debug)]
pub struct PlaylistCollection {
    playlists: Vec<Playlist>,
    index: HashMap<String, usize>,
}

impl PlaylistCollection {
    /// Build the collection and resolve folder nesting
    ///
    /// Fails if a playlist names a parent that does not exist, or a parent
    /// that is not a folder.
    pub fn build(section: &[PlaylistInfo], track_store: Rc<TrackCollection>) -> Result<Self> {
        let mut collection = Self {
            playlists: Vec::with_capacity(section.len()),
            index: HashMap::with_capacity(section.len()),
        };

        // Every node must exist before linking: parents may appear later
        // in the document than their children.
        for info in section {
            collection.insert(Playlist::new(info.clone(), Rc::clone(&track_store)));
        }

        collection.resolve_nesting()?;

        log::debug!("Built playlist collection: {} playlists", collection.len());
        Ok(collection)
    }

    fn insert(&mut self, playlist: Playlist) {
        match self.index.get(playlist.persistent_id()) {
            Some(&position) => {
                log::warn!(
                    "Duplicate playlist persistent ID {}, later entry wins",
                    playlist.persistent_id()
                );
                self.playlists[position] = playlist;
            }
            None => {
                self.index
                    .insert(playlist.persistent_id().to_string(), self.playlists.len());
                self.playlists.push(playlist);
            }
        }
    }

    /// Link every playlist to its parent folder, in collection order
    ///
    /// No cycle detection: playlists on a parent cycle are never top-level
    /// and so never reachable from the roots.
    fn resolve_nesting(&mut self) -> Result<()> {
        for position in 0..self.playlists.len() {
            let Some(parent_id) = self.playlists[position].parent_persistent_id() else {
                continue;
            };
            let parent_position = self.position_of(parent_id)?;

            let parent = &self.playlists[parent_position];
            if !parent.is_folder() {
                return Err(LibraryError::Consistency {
                    parent_name: parent.name().unwrap_or_default().to_string(),
                    parent_id: parent.persistent_id().to_string(),
                });
            }

            self.playlists[parent_position].children.push(position);
            self.playlists[position].parent = Some(parent_position);
        }
        Ok(())
    }

    fn position_of(&self, persistent_id: &str) -> Result<usize> {
        self.index
            .get(persistent_id)
            .copied()
            .ok_or_else(|| LibraryError::playlist_not_found(persistent_id))
    }

    /// Get a playlist by persistent ID
    pub fn get(&self, persistent_id: &str) -> Result<&Playlist> {
        self.position_of(persistent_id)
            .map(|position| &self.playlists[position])
    }

    /// First playlist (in document order) with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&Playlist> {
        self.iter().find(|playlist| playlist.name() == Some(name))
    }

    /// All playlists in document order
    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    /// Playlists without a parent
    pub fn roots(&self) -> impl Iterator<Item = &Playlist> {
        self.iter().filter(|playlist| playlist.is_top_level())
    }

    pub fn parent_of(&self, playlist: &Playlist) -> Option<&Playlist> {
        playlist.parent.map(|position| &self.playlists[position])
    }

    pub fn children_of<'a>(&'a self, playlist: &'a Playlist) -> impl Iterator<Item = &'a Playlist> {
        playlist
            .children
            .iter()
            .map(move |&position| &self.playlists[position])
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Indented tree of all top-level playlists and their descendants
    ///
    /// Folders are marked `+`, playlists `-`, two spaces per level.
    pub fn render_forest(&self) -> Result<String> {
        let mut out = String::new();
        for root in self.roots() {
            self.render_node(root, 0, &mut out)?;
        }
        Ok(out)
    }

    fn render_node(&self, playlist: &Playlist, depth: usize, out: &mut String) -> Result<()> {
        let marker = if playlist.is_folder() { '+' } else { '-' };
        out.push_str(&" ".repeat(depth * 2));
        out.push(marker);
        out.push(' ');
        out.push_str(&playlist.label()?);
        out.push('\n');

        for child in self.children_of(playlist) {
            self.render_node(child, depth + 1, out)?;
        }
        Ok(())
    }
}
