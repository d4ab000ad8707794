//! Test fixture creation for data trees and warehouse databases

use super::constants::*;
use anyhow::Result;
use serde_json::json;
use sparkify_etl::warehouse::SchemaManager;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace with a song tree, a log tree and a reset warehouse.
pub struct TestWarehouse {
    // Keeps the directory alive for the test's duration
    _dir: TempDir,
    pub db_path: PathBuf,
    pub song_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl TestWarehouse {
    /// Creates empty data directories and a freshly reset database.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let song_dir = dir.path().join("data/song_data");
        let log_dir = dir.path().join("data/log_data");
        fs::create_dir_all(&song_dir)?;
        fs::create_dir_all(&log_dir)?;

        let db_path = dir.path().join("sparkify.db");
        SchemaManager::new(&db_path).reset()?;

        Ok(Self {
            _dir: dir,
            db_path,
            song_dir,
            log_dir,
        })
    }

    pub fn write_song_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        write_file(&self.song_dir, relative_path, content)
    }

    pub fn write_log_file(&self, relative_path: &str, events: &[String]) -> Result<PathBuf> {
        write_file(&self.log_dir, relative_path, &events.join("\n"))
    }

    /// Writes the two fixture songs, nested the way the song dataset is.
    pub fn write_default_songs(&self) -> Result<()> {
        self.write_song_file(
            "A/A/A/TRAAAAA128F93.json",
            &song_json(SONG_1_ID, SONG_1_TITLE, SONG_1_DURATION),
        )?;
        self.write_song_file(
            "A/B/C/TRABCBB128F93.json",
            &song_json(SONG_2_ID, SONG_2_TITLE, SONG_2_DURATION),
        )?;
        Ok(())
    }

    /// Writes one log file with 3 NextSong events and 2 other events.
    pub fn write_default_log(&self) -> Result<()> {
        self.write_log_file(
            "2018/11/2018-11-02-events.json",
            &[
                event_json("Home", USER_1_ID, "free", None, TS_NOV_2 - 5000),
                event_json(
                    "NextSong",
                    USER_1_ID,
                    "free",
                    Some((SONG_1_TITLE, SONG_1_DURATION)),
                    TS_NOV_2,
                ),
                event_json(
                    "NextSong",
                    USER_2_ID,
                    "free",
                    Some(("Unknown Song", 99.0)),
                    TS_NOV_2 + 1000,
                ),
                event_json("Settings", USER_2_ID, "free", None, TS_NOV_2 + 2000),
                event_json(
                    "NextSong",
                    USER_1_ID,
                    "free",
                    Some((SONG_2_TITLE, SONG_2_DURATION)),
                    TS_NOV_2 + 3000,
                ),
            ],
        )?;
        Ok(())
    }
}

fn write_file(root: &Path, relative_path: &str, content: &str) -> Result<PathBuf> {
    let path = root.join(relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}

/// A song file by the fixture artist.
pub fn song_json(song_id: &str, title: &str, duration: f64) -> String {
    json!({
        "num_songs": 1,
        "artist_id": ARTIST_1_ID,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": ARTIST_1_NAME,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 2004
    })
    .to_string()
}

/// One event log line. `played` is the song title and length for events
/// that carry a song.
pub fn event_json(
    page: &str,
    user_id: &str,
    level: &str,
    played: Option<(&str, f64)>,
    ts: i64,
) -> String {
    let (song, artist, length) = match played {
        Some((title, length)) => (json!(title), json!(ARTIST_1_NAME), json!(length)),
        None => (json!(null), json!(null), json!(null)),
    };
    let first_name = if user_id == USER_1_ID {
        USER_1_FIRST_NAME
    } else {
        "Kaylee"
    };
    let last_name = if user_id == USER_1_ID {
        USER_1_LAST_NAME
    } else {
        "Summers"
    };
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": first_name,
        "gender": "M",
        "itemInSession": 0,
        "lastName": last_name,
        "length": length,
        "level": level,
        "location": "San Jose-Sunnyvale-Santa Clara, CA",
        "method": "PUT",
        "page": page,
        "registration": 1540193061796.0,
        "sessionId": 583,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0 (X11; Linux x86_64)",
        "userId": user_id
    })
    .to_string()
}
