use itunes_library::itunes::{load_document_from_reader, parse_library};
use itunes_library::validation::validate_library;
use itunes_library::{Library, LibraryError, Report, ReportConfig, Track};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>"#;

const FOOTER: &str = "</dict>\n</plist>\n";

/// A small library: two audio tracks, one video, a folder holding one
/// playlist (declared before its folder), and a top-level playlist
fn library_xml() -> String {
    format!(
        r#"{HEADER}
    <key>Major Version</key><integer>1</integer>
    <key>Minor Version</key><integer>1</integer>
    <key>Date</key><date>2019-03-04T10:00:00Z</date>
    <key>Application Version</key><string>12.9.5.5</string>
    <key>Features</key><integer>5</integer>
    <key>Show Content Ratings</key><true/>
    <key>Music Folder</key><string>file://localhost/Users/me/Music/iTunes/iTunes%20Media/</string>
    <key>Library Persistent ID</key><string>0123456789ABCDEF</string>
    <key>Tracks</key>
    <dict>
        <key>101</key>
        <dict>
            <key>Track ID</key><integer>101</integer>
            <key>Name</key><string>Intro</string>
            <key>Artist</key><string>The Band</string>
            <key>Album</key><string>First</string>
            <key>Kind</key><string>MPEG audio file</string>
            <key>Total Time</key><integer>61000</integer>
            <key>Track Number</key><integer>1</integer>
            <key>Location</key><string>file://localhost/Users/me/Music/The%20Band/Intro.mp3</string>
        </dict>
        <key>102</key>
        <dict>
            <key>Track ID</key><integer>102</integer>
            <key>Name</key><string>Outro</string>
            <key>Kind</key><string>Purchased AAC audio file</string>
        </dict>
        <key>103</key>
        <dict>
            <key>Track ID</key><integer>103</integer>
            <key>Name</key><string>Live</string>
            <key>Kind</key><string>MPEG-4 video file</string>
        </dict>
    </dict>
    <key>Playlists</key>
    <array>
        <dict>
            <key>Name</key><string>Library</string>
            <key>Master</key><true/>
            <key>Visible</key><false/>
            <key>Playlist ID</key><integer>1</integer>
            <key>Playlist Persistent ID</key><string>AAAA</string>
            <key>Playlist Items</key>
            <array>
                <dict><key>Track ID</key><integer>101</integer></dict>
                <dict><key>Track ID</key><integer>102</integer></dict>
                <dict><key>Track ID</key><integer>103</integer></dict>
            </array>
        </dict>
        <dict>
            <key>Name</key><string>Road Trip</string>
            <key>Parent Persistent ID</key><string>FFFF</string>
            <key>Playlist Persistent ID</key><string>BBBB</string>
            <key>Playlist Items</key>
            <array>
                <dict><key>Track ID</key><integer>102</integer></dict>
                <dict><key>Track ID</key><integer>101</integer></dict>
            </array>
        </dict>
        <dict>
            <key>Name</key><string>Mixes</string>
            <key>Folder</key><true/>
            <key>Playlist Persistent ID</key><string>FFFF</string>
        </dict>
    </array>
{FOOTER}"#
    )
}

fn write_library(dir: &TempDir, xml: &str) -> PathBuf {
    let path = dir.path().join("iTunes Music Library.xml");
    fs::write(&path, xml).expect("Failed to write library file");
    path
}

#[test]
fn test_open_library_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_library(&temp_dir, &library_xml());

    let library = Library::open(&path).unwrap();

    let info = library.info();
    assert_eq!(info.application_version.as_deref(), Some("12.9.5.5"));
    assert_eq!(info.features, Some(5));
    assert_eq!(
        info.date.map(|d| d.to_rfc3339()).as_deref(),
        Some("2019-03-04T10:00:00+00:00")
    );
    assert_eq!(
        info.music_folder_path(),
        Some(PathBuf::from("/Users/me/Music/iTunes/iTunes Media/"))
    );

    let tracks = library.tracks().unwrap();
    assert_eq!(tracks.len(), 3);
    let audio: Vec<i64> = tracks.audio_files().map(Track::id).collect();
    assert_eq!(audio, vec![101, 102]);

    let intro = library.track(101).unwrap();
    assert_eq!(intro.to_string(), "Intro - The Band");
    assert_eq!(intro.duration_ms(), Some(61000));
    assert_eq!(
        intro.file_path(),
        Some(PathBuf::from("/Users/me/Music/The Band/Intro.mp3"))
    );
    assert_eq!(library.track(102).unwrap().album(), "Unknown Album");
}

#[test]
fn test_playlist_tree() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_library(&temp_dir, &library_xml());
    let library = parse_library(&path).unwrap();

    let playlists = library.playlists().unwrap();
    assert_eq!(playlists.len(), 3);

    let master = library.playlist("AAAA").unwrap();
    assert!(master.is_master());
    assert!(!master.is_visible());
    assert_eq!(master.playlist_id(), Some(1));

    let road_trip = playlists.find_by_name("Road Trip").unwrap();
    let names: Vec<Option<&str>> = road_trip.tracks().unwrap().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec![Some("Outro"), Some("Intro")]);
    assert_eq!(
        playlists.parent_of(road_trip).and_then(|p| p.name()),
        Some("Mixes")
    );

    let expected = "\
- Library (3 tracks)
+ Mixes (Folder, 0 tracks)
  - Road Trip (2 tracks)
";
    assert_eq!(playlists.render_forest().unwrap(), expected);

    let report = validate_library(&library).unwrap();
    assert!(report.is_clean(), "{:?}", report.issues);
    assert_eq!(report.resolved_references, 5);
}

#[test]
fn test_non_folder_parent_fails() {
    let xml = format!(
        r#"{HEADER}
    <key>Tracks</key><dict></dict>
    <key>Playlists</key>
    <array>
        <dict>
            <key>Name</key><string>Child</string>
            <key>Parent Persistent ID</key><string>F1</string>
            <key>Playlist Persistent ID</key><string>P1</string>
        </dict>
        <dict>
            <key>Name</key><string>Plain</string>
            <key>Folder</key><false/>
            <key>Playlist Persistent ID</key><string>F1</string>
        </dict>
    </array>
{FOOTER}"#
    );
    let library = Library::from_document(load_document_from_reader(Cursor::new(xml)).unwrap());

    let err = library.playlists().unwrap_err();
    assert!(matches!(
        err,
        LibraryError::Consistency { ref parent_name, ref parent_id }
            if parent_name == "Plain" && parent_id == "F1"
    ));
    assert_eq!(
        err.to_string(),
        "Database inconsistency! Playlist 'Plain' (F1) contains playlists but is not a folder!"
    );
}

#[test]
fn test_dangling_track_reference() {
    let xml = format!(
        r#"{HEADER}
    <key>Tracks</key>
    <dict>
        <key>1</key>
        <dict><key>Name</key><string>Only</string></dict>
    </dict>
    <key>Playlists</key>
    <array>
        <dict>
            <key>Name</key><string>Broken</string>
            <key>Playlist Persistent ID</key><string>P1</string>
            <key>Playlist Items</key>
            <array>
                <dict><key>Track ID</key><integer>99</integer></dict>
            </array>
        </dict>
    </array>
{FOOTER}"#
    );
    let library = Library::from_document(load_document_from_reader(Cursor::new(xml)).unwrap());

    let broken = library.playlist("P1").unwrap();
    let err = broken.tracks().unwrap_err();
    assert!(err.is_not_found());
    assert!(broken.tracks().is_err());

    let report = validate_library(&library).unwrap();
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].to_string(), "'Broken' (P1): Track not found: 99");
}

#[test]
fn test_report_for_library_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_library(&temp_dir, &library_xml());
    let library = Library::open(&path).unwrap();

    let config = ReportConfig::new(path.clone())
        .with_info(false)
        .with_audio_summary(true)
        .with_playlists(vec!["Road Trip".to_string()]);
    let mut out = Vec::new();
    Report::new(config).render(&library, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("3 tracks, 2 audio files, 1 other\n"));
    assert!(text.contains("+ Mixes (Folder, 0 tracks)\n"));
    assert!(text.contains("== Road Trip (2 tracks) ==\n"));
    assert!(text.contains("   2. Intro - The Band [First]\n"));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = Library::open(temp_dir.path().join("missing.xml")).unwrap_err();

    assert!(matches!(err, LibraryError::Document(_)));
}
