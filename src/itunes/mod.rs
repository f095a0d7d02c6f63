//! iTunes library file loading
//!
//! Reads "iTunes Music Library.xml" (or a binary plist export) and hands
//! the typed document to the library model.

pub mod model;

pub use model::Document;

use crate::error::Result;
use crate::model::Library;
use std::io::{Read, Seek};
use std::path::Path;
use std::time::Instant;

/// Default library location on macOS, before `~` expansion
pub const DEFAULT_LIBRARY_PATH: &str = "~/Music/iTunes/iTunes Music Library.xml";

/// Read a library document from disk
pub fn load_document(path: &Path) -> Result<Document> {
    Ok(plist::from_file(path)?)
}

/// Read a library document from an in-memory or already open source
pub fn load_document_from_reader<R: Read + Seek>(reader: R) -> Result<Document> {
    Ok(plist::from_reader(reader)?)
}

/// Parse a complete library file
pub fn parse_library(path: &Path) -> Result<Library> {
    log::info!("Parsing iTunes library from {:?}", path);

    let started = Instant::now();
    let document = load_document(path)?;
    log::info!(
        "Library {} parsed in {:.2}s.",
        path.display(),
        started.elapsed().as_secs_f64()
    );

    log::debug!(
        "Document has {} track entries, {} playlist entries",
        document.tracks.len(),
        document.playlists.len()
    );

    Ok(Library::from_document(document))
}
