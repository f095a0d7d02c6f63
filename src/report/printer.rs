//! Plain-text library report

use super::config::ReportConfig;
use crate::model::Library;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes the sections selected in a [`ReportConfig`]
pub struct Report {
    config: ReportConfig,
}

impl Report {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Write the report for `library` to `out`
    pub fn render<W: Write>(&self, library: &Library, out: &mut W) -> Result<()> {
        writeln!(out, "Library: {}", self.config.library_path.display())?;

        if self.config.show_info {
            self.write_info(library, out)?;
        }
        if self.config.show_audio_summary {
            self.write_audio_summary(library, out)?;
        }
        if self.config.show_tree {
            self.write_tree(library, out)?;
        }
        if let Some(ref names) = self.config.playlist_filter {
            self.write_playlists(library, names, out)?;
        }

        Ok(())
    }

    fn write_info<W: Write>(&self, library: &Library, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "== Info ==")?;
        for (key, value) in library.info().entries() {
            writeln!(out, "{}: {}", key, value.as_deref().unwrap_or("-"))?;
        }
        Ok(())
    }

    fn write_audio_summary<W: Write>(&self, library: &Library, out: &mut W) -> Result<()> {
        let tracks = library.tracks().context("Failed to build track collection")?;
        let audio = tracks.audio_files().count();

        writeln!(out)?;
        writeln!(out, "== Tracks ==")?;
        writeln!(out, "{} tracks, {} audio files, {} other", tracks.len(), audio, tracks.len() - audio)?;
        Ok(())
    }

    fn write_tree<W: Write>(&self, library: &Library, out: &mut W) -> Result<()> {
        let playlists = library
            .playlists()
            .context("Failed to build playlist collection")?;
        let tree = playlists
            .render_forest()
            .context("Failed to resolve playlist tracks")?;

        writeln!(out)?;
        writeln!(out, "== Playlists ==")?;
        write!(out, "{}", tree)?;
        Ok(())
    }

    fn write_playlists<W: Write>(&self, library: &Library, names: &[String], out: &mut W) -> Result<()> {
        let playlists = library
            .playlists()
            .context("Failed to build playlist collection")?;

        for name in names {
            let Some(playlist) = playlists.find_by_name(name) else {
                log::warn!("No playlist named '{}'", name);
                continue;
            };

            let tracks = playlist
                .tracks()
                .with_context(|| format!("Failed to resolve tracks of playlist '{}'", name))?;
            log::debug!("Listing playlist {} ({} tracks)", playlist.persistent_id(), tracks.len());

            writeln!(out)?;
            writeln!(out, "== {} ==", playlist.label()?)?;
            for (i, track) in tracks.iter().enumerate() {
                writeln!(out, "{:>4}. {} [{}]", i + 1, track, track.album())?;
            }
        }
        Ok(())
    }
}
