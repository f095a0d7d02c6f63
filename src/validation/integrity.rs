//! Referential integrity check over a whole library

use crate::error::Result;
use crate::model::{Library, PlaylistCollection};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Problem found in one playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub persistent_id: String,
    pub playlist_name: Option<String>,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({}): {}",
            self.playlist_name.as_deref().unwrap_or_default(),
            self.persistent_id,
            self.message
        )
    }
}

/// Outcome of [`validate_library`]
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub track_count: usize,
    pub playlist_count: usize,
    pub folder_count: usize,
    pub root_count: usize,
    /// Track references resolved across all playlists
    pub resolved_references: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Build every collection and resolve every playlist's tracks
///
/// Failures that abort collection construction (bad track IDs, missing
/// or non-folder parents) are returned as errors. Dangling track
/// references are collected per playlist instead, so one broken playlist
/// doesn't hide the others.
pub fn validate_library(library: &Library) -> Result<ValidationReport> {
    log::info!("Validating library...");

    let tracks = library.tracks()?;
    let playlists = library.playlists()?;

    let mut report = ValidationReport {
        track_count: tracks.len(),
        playlist_count: playlists.len(),
        ..Default::default()
    };

    for playlist in playlists.iter() {
        if playlist.is_folder() {
            report.folder_count += 1;
        }
        if playlist.is_top_level() {
            report.root_count += 1;
        }

        match playlist.tracks() {
            Ok(resolved) => report.resolved_references += resolved.len(),
            Err(e) => {
                log::warn!(
                    "Playlist '{}' ({}): {}",
                    playlist.name().unwrap_or_default(),
                    playlist.persistent_id(),
                    e
                );
                report.issues.push(Issue {
                    persistent_id: playlist.persistent_id().to_string(),
                    playlist_name: playlist.name().map(str::to_string),
                    message: e.to_string(),
                });
            }
        }
    }

    report.issues.extend(check_forest(playlists));
    report.issues.extend(check_reachable(playlists));

    log::info!(
        "Validated {} tracks, {} playlists ({} folders, {} top-level), {} track references, {} issue(s)",
        report.track_count,
        report.playlist_count,
        report.folder_count,
        report.root_count,
        report.resolved_references,
        report.issues.len()
    );
    Ok(report)
}

/// Every nested playlist must be listed by exactly one parent, and
/// top-level playlists by none
fn check_forest(playlists: &PlaylistCollection) -> Vec<Issue> {
    let mut listed: HashMap<&str, usize> = HashMap::new();
    for playlist in playlists.iter() {
        for child in playlists.children_of(playlist) {
            *listed.entry(child.persistent_id()).or_default() += 1;
        }
    }

    playlists
        .iter()
        .filter_map(|playlist| {
            let count = listed.get(playlist.persistent_id()).copied().unwrap_or(0);
            let expected = usize::from(!playlist.is_top_level());
            (count != expected).then(|| Issue {
                persistent_id: playlist.persistent_id().to_string(),
                playlist_name: playlist.name().map(str::to_string),
                message: format!(
                    "listed as a child {} time(s), expected {}",
                    count, expected
                ),
            })
        })
        .collect()
}

/// Playlists on a parent cycle have parents but no top-level ancestor
fn check_reachable(playlists: &PlaylistCollection) -> Vec<Issue> {
    let mut reached: HashSet<&str> = HashSet::new();
    let mut pending: Vec<_> = playlists.roots().collect();
    while let Some(playlist) = pending.pop() {
        if reached.insert(playlist.persistent_id()) {
            pending.extend(playlists.children_of(playlist));
        }
    }

    playlists
        .iter()
        .filter(|playlist| !reached.contains(playlist.persistent_id()))
        .map(|playlist| Issue {
            persistent_id: playlist.persistent_id().to_string(),
            playlist_name: playlist.name().map(str::to_string),
            message: "not reachable from any top-level playlist".to_string(),
        })
        .collect()
}
