use anyhow::{Context, Result};
use clap::Parser;
use itunes_library::itunes::DEFAULT_LIBRARY_PATH;
use itunes_library::validation::validate_library;
use itunes_library::{Library, Report, ReportConfig};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "itunes-library")]
#[command(about = "Inspect an iTunes Music Library.xml", long_about = None)]
struct Args {
    /// Path to the iTunes library file
    #[arg(short = 'l', long, default_value = DEFAULT_LIBRARY_PATH)]
    library: String,

    /// Print library metadata
    #[arg(long)]
    info: bool,

    /// Print the nested playlist tree
    #[arg(long)]
    tree: bool,

    /// Print audio file counts
    #[arg(long)]
    audio_files: bool,

    /// List the tracks of a playlist by name (can be specified multiple times)
    #[arg(long = "playlist")]
    playlists_filter: Vec<String>,

    /// Check that every playlist resolves instead of printing a report
    #[arg(long)]
    validate: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let library_path = PathBuf::from(shellexpand::tilde(&args.library).as_ref());

    let library = Library::open(&library_path)
        .with_context(|| format!("Failed to load library {:?}", library_path))?;

    if args.validate {
        let report = validate_library(&library).context("Library failed validation")?;
        for issue in &report.issues {
            log::error!("{}", issue);
        }
        if !report.is_clean() {
            anyhow::bail!("{} playlist issue(s) found", report.issues.len());
        }
        log::info!("✅ Validation passed!");
        return Ok(());
    }

    // Without any selection flags, print the default report (info + tree)
    let mut config = ReportConfig::new(library_path);
    if args.info || args.tree || args.audio_files || !args.playlists_filter.is_empty() {
        config = config
            .with_info(args.info)
            .with_tree(args.tree)
            .with_audio_summary(args.audio_files);
    }
    if !args.playlists_filter.is_empty() {
        log::info!(
            "Listing {} playlist(s): {:?}",
            args.playlists_filter.len(),
            args.playlists_filter
        );
        config = config.with_playlists(args.playlists_filter);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Report::new(config).render(&library, &mut out)?;
    out.flush()?;

    Ok(())
}
