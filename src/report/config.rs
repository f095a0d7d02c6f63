//! Report configuration

use std::path::PathBuf;

/// What a [`Report`](super::Report) prints
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Library file the report is about (printed in the header)
    pub library_path: PathBuf,

    /// Print the top-level metadata keys
    pub show_info: bool,

    /// Print the nested playlist tree
    pub show_tree: bool,

    /// Print a count of audio files vs. other media
    pub show_audio_summary: bool,

    /// Playlist names whose tracks are listed (None = none)
    pub playlist_filter: Option<Vec<String>>,
}

impl ReportConfig {
    /// Create a configuration printing the info and tree sections
    pub fn new(library_path: PathBuf) -> Self {
        Self {
            library_path,
            show_info: true,
            show_tree: true,
            show_audio_summary: false,
            playlist_filter: None,
        }
    }

    /// List the tracks of these playlists
    pub fn with_playlists(mut self, playlists: Vec<String>) -> Self {
        self.playlist_filter = Some(playlists);
        self
    }

    pub fn with_info(mut self, show: bool) -> Self {
        self.show_info = show;
        self
    }

    pub fn with_tree(mut self, show: bool) -> Self {
        self.show_tree = show;
        self
    }

    pub fn with_audio_summary(mut self, show: bool) -> Self {
        self.show_audio_summary = show;
        self
    }
}
