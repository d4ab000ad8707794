//! Record loader: turns song and log files into warehouse rows.
//!
//! Each file is loaded inside its own warehouse session and committed
//! before the next file is read. Files are processed one at a time, in
//! discovery order, and records within a file in line order.

use crate::file_walker::{self, JSON_EXTENSION};
use crate::records::{decode_utf8, parse_log_file, parse_song_file, RecordError};
use crate::warehouse::{WarehouseStore, WarehouseWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while loading data files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {path:?}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    #[error("File discovery failed under {root:?}: {message}")]
    Discovery { root: PathBuf, message: String },

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Which transformation a data file goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// One song object per file.
    Song,
    /// Newline-delimited event log.
    Log,
}

impl FileKind {
    fn label(&self) -> &'static str {
        match self {
            FileKind::Song => "song",
            FileKind::Log => "log",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    /// Roll back and skip a file whose records cannot be parsed, instead of
    /// aborting the run.
    pub skip_malformed_files: bool,
}

/// Row-level outcome of loading one or more files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileStats {
    pub songs_inserted: usize,
    pub artists_inserted: usize,
    pub events_discarded: usize,
    pub time_rows: usize,
    pub users_upserted: usize,
    pub songplays: usize,
    pub songplays_unresolved: usize,
}

impl FileStats {
    fn absorb(&mut self, other: FileStats) {
        self.songs_inserted += other.songs_inserted;
        self.artists_inserted += other.artists_inserted;
        self.events_discarded += other.events_discarded;
        self.time_rows += other.time_rows;
        self.users_upserted += other.users_upserted;
        self.songplays += other.songplays;
        self.songplays_unresolved += other.songplays_unresolved;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub files_found: usize,
    pub files_processed: usize,
    pub files_skipped: Vec<PathBuf>,
    pub rows: FileStats,
}

impl LoadSummary {
    fn absorb(&mut self, other: LoadSummary) {
        self.files_found += other.files_found;
        self.files_processed += other.files_processed;
        self.files_skipped.extend(other.files_skipped);
        self.rows.absorb(other.rows);
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn record_error(path: &Path) -> impl FnOnce(RecordError) -> LoadError + '_ {
    move |source| LoadError::Record {
        path: path.to_path_buf(),
        source,
    }
}

/// Load one song file into the songs and artists tables.
///
/// The file is parsed completely before anything is written, so a
/// malformed file inserts nothing.
pub fn process_song_file(
    writer: &dyn WarehouseWriter,
    path: &Path,
) -> Result<FileStats, LoadError> {
    let bytes = read_file(path)?;
    let record = decode_utf8(&bytes)
        .and_then(parse_song_file)
        .map_err(record_error(path))?;

    let mut stats = FileStats::default();
    if writer.insert_ignore_song(&record.song())? {
        stats.songs_inserted += 1;
    }
    if writer.insert_ignore_artist(&record.artist())? {
        stats.artists_inserted += 1;
    }
    Ok(stats)
}

/// Load one event log into the time, users and songplays tables.
///
/// Only NextSong events are loaded. For each of them, in file order, a time
/// row is inserted, the user is upserted, and a songplay is inserted with
/// whatever song and artist ids match the event exactly.
pub fn process_log_file(
    writer: &dyn WarehouseWriter,
    path: &Path,
) -> Result<FileStats, LoadError> {
    let bytes = read_file(path)?;
    let parsed = decode_utf8(&bytes)
        .and_then(parse_log_file)
        .map_err(record_error(path))?;

    let mut stats = FileStats {
        events_discarded: parsed.discarded,
        ..FileStats::default()
    };
    for event in &parsed.events {
        writer.insert_time(&event.time_row())?;
        stats.time_rows += 1;

        writer.upsert_user_level(&event.user())?;
        stats.users_upserted += 1;

        let matched = writer.resolve_song_artist(&event.song, &event.artist, event.length)?;
        if matched.is_none() {
            debug!(
                "No song matches '{}' by '{}' ({}s)",
                event.song, event.artist, event.length
            );
            stats.songplays_unresolved += 1;
        }
        writer.insert_songplay(&event.songplay(matched))?;
        stats.songplays += 1;
    }
    Ok(stats)
}

/// Drives discovery and per-file loading against one warehouse store.
pub struct RecordLoader<'a> {
    store: &'a mut WarehouseStore,
    options: LoadOptions,
}

impl<'a> RecordLoader<'a> {
    pub fn new(store: &'a mut WarehouseStore, options: LoadOptions) -> Self {
        Self { store, options }
    }

    /// Load all song data, then all log data.
    ///
    /// Songs go first so that songplays can be matched against them.
    pub fn run(&mut self, song_root: &Path, log_root: &Path) -> Result<LoadSummary, LoadError> {
        let mut summary = self.process_data(song_root, FileKind::Song)?;
        summary.absorb(self.process_data(log_root, FileKind::Log)?);

        info!(
            "Load finished: {}/{} files processed, {} skipped",
            summary.files_processed,
            summary.files_found,
            summary.files_skipped.len()
        );
        info!(
            "Rows: {} songs, {} artists, {} time, {} user upserts, {} songplays ({} without song match), {} non-NextSong events discarded",
            summary.rows.songs_inserted,
            summary.rows.artists_inserted,
            summary.rows.time_rows,
            summary.rows.users_upserted,
            summary.rows.songplays,
            summary.rows.songplays_unresolved,
            summary.rows.events_discarded
        );
        Ok(summary)
    }

    /// Load every JSON file under `root` as `kind`, committing after each
    /// file.
    pub fn process_data(&mut self, root: &Path, kind: FileKind) -> Result<LoadSummary, LoadError> {
        let files = file_walker::discover(root, JSON_EXTENSION).map_err(|e| {
            LoadError::Discovery {
                root: root.to_path_buf(),
                message: format!("{:#}", e),
            }
        })?;
        let num_files = files.len();
        info!("{} files found in {}", num_files, root.display());

        let mut summary = LoadSummary {
            files_found: num_files,
            ..LoadSummary::default()
        };

        for (index, path) in files.iter().enumerate() {
            let session = self.store.begin_file()?;
            let result = match kind {
                FileKind::Song => process_song_file(&session, path),
                FileKind::Log => process_log_file(&session, path),
            };

            match result {
                Ok(stats) => {
                    session.commit()?;
                    summary.files_processed += 1;
                    summary.rows.absorb(stats);
                }
                Err(err @ LoadError::Record { .. }) if self.options.skip_malformed_files => {
                    // Dropping the session rolls back anything the file wrote
                    drop(session);
                    warn!("Skipping {} file: {}", kind.label(), err);
                    summary.files_skipped.push(path.clone());
                }
                Err(err) => return Err(err),
            }
            info!("{}/{} files processed.", index + 1, num_files);
        }
        Ok(summary)
    }
}
