//! SQLite-backed warehouse store.
//!
//! `WarehouseStore` owns the one connection of a load run. Writes go
//! through a `WarehouseSession`, a transaction scoped to a single input
//! file: committing it makes the file's rows visible, dropping it rolls
//! them back.

use super::models::*;
use super::schema::WAREHOUSE_SCHEMA;
use super::trait_def::WarehouseWriter;
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use tracing::{debug, info};

pub struct WarehouseStore {
    conn: Connection,
}

impl WarehouseStore {
    /// Open an existing warehouse database created by `SchemaManager::reset`.
    ///
    /// Fails if the file is missing or its schema does not match the
    /// warehouse tables.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        if !db_path.exists() {
            bail!(
                "Warehouse database {:?} does not exist, run create-tables first",
                db_path
            );
        }

        let conn = Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open warehouse database {:?}", db_path))?;

        let store = Self::with_connection(conn)?;
        let counts = store.counts()?;
        info!(
            "Opened warehouse {:?}: {} songs, {} artists, {} users, {} time rows, {} songplays",
            db_path, counts.songs, counts.artists, counts.users, counts.time, counts.songplays
        );
        Ok(store)
    }

    /// Wrap an already open connection whose schema has been created.
    pub fn with_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        WAREHOUSE_SCHEMA
            .validate(&conn)
            .context("Warehouse schema validation failed")?;
        Ok(WarehouseStore { conn })
    }

    /// Start the transaction for one input file.
    pub fn begin_file(&mut self) -> Result<WarehouseSession<'_>> {
        let tx = self
            .conn
            .transaction()
            .context("Failed to begin file transaction")?;
        Ok(WarehouseSession { tx })
    }

    pub fn counts(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?;
            Ok(n as usize)
        };
        Ok(TableCounts {
            songs: count("songs")?,
            artists: count("artists")?,
            users: count("users")?,
            time: count("time")?,
            songplays: count("songplays")?,
        })
    }

    pub fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT user_id, first_name, last_name, gender, level FROM users WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(User {
                        user_id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        gender: row.get(3)?,
                        level: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// All songplays in insertion order.
    pub fn get_songplays(&self) -> Result<Vec<Songplay>> {
        let mut stmt = self.conn.prepare(
            "SELECT start_time, user_id, level, song_id, artist_id, session_id, location, user_agent
             FROM songplays
             ORDER BY songplay_id ASC",
        )?;
        let songplays = stmt
            .query_map([], |row| {
                Ok(Songplay {
                    start_time: row.get(0)?,
                    user_id: row.get(1)?,
                    level: row.get(2)?,
                    song_id: row.get(3)?,
                    artist_id: row.get(4)?,
                    session_id: row.get(5)?,
                    location: row.get(6)?,
                    user_agent: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(songplays)
    }
}

/// Writes of a single input file, committed together.
pub struct WarehouseSession<'a> {
    tx: Transaction<'a>,
}

impl WarehouseSession<'_> {
    pub fn commit(self) -> Result<()> {
        self.tx.commit().context("Failed to commit file transaction")
    }
}

impl WarehouseWriter for WarehouseSession<'_> {
    fn insert_ignore_song(&self, song: &Song) -> Result<bool> {
        let inserted = self.tx.prepare_cached(
            "INSERT INTO songs (song_id, title, artist_id, year, duration)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(song_id) DO NOTHING",
        )?
        .execute(params![
            song.song_id,
            song.title,
            song.artist_id,
            song.year,
            song.duration
        ])?;
        if inserted == 0 {
            debug!("Song {} already present, keeping first-seen row", song.song_id);
        }
        Ok(inserted > 0)
    }

    fn insert_ignore_artist(&self, artist: &Artist) -> Result<bool> {
        let inserted = self.tx.prepare_cached(
            "INSERT INTO artists (artist_id, name, location, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(artist_id) DO NOTHING",
        )?
        .execute(params![
            artist.artist_id,
            artist.name,
            artist.location,
            artist.latitude,
            artist.longitude
        ])?;
        if inserted == 0 {
            debug!(
                "Artist {} already present, keeping first-seen row",
                artist.artist_id
            );
        }
        Ok(inserted > 0)
    }

    fn upsert_user_level(&self, user: &User) -> Result<()> {
        self.tx
            .prepare_cached(
                "INSERT INTO users (user_id, first_name, last_name, gender, level)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET level = excluded.level",
            )?
            .execute(params![
                user.user_id,
                user.first_name,
                user.last_name,
                user.gender,
                user.level
            ])?;
        Ok(())
    }

    fn insert_time(&self, time: &TimeRow) -> Result<()> {
        self.tx
            .prepare_cached(
                "INSERT INTO time (start_time, hour, day, week, month, year, weekday)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?
            .execute(params![
                time.start_time,
                time.parts.hour,
                time.parts.day,
                time.parts.week,
                time.parts.month,
                time.parts.year,
                time.parts.weekday
            ])?;
        Ok(())
    }

    fn resolve_song_artist(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongArtistMatch>> {
        let matched = self
            .tx
            .prepare_cached(
                "SELECT s.song_id, s.artist_id
                 FROM songs s
                 JOIN artists a ON s.artist_id = a.artist_id
                 WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3
                 ORDER BY s.song_id
                 LIMIT 1",
            )?
            .query_row(params![title, artist_name, duration], |row| {
                Ok(SongArtistMatch {
                    song_id: row.get(0)?,
                    artist_id: row.get(1)?,
                })
            })
            .optional()?;
        Ok(matched)
    }

    fn insert_songplay(&self, songplay: &Songplay) -> Result<i64> {
        self.tx
            .prepare_cached(
                "INSERT INTO songplays
                 (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?
            .execute(params![
                songplay.start_time,
                songplay.user_id,
                songplay.level,
                songplay.song_id,
                songplay.artist_id,
                songplay.session_id,
                songplay.location,
                songplay.user_agent
            ])?;
        Ok(self.tx.last_insert_rowid())
    }
}
