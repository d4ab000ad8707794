//! Write-side contract of the warehouse.

use super::models::{Artist, Song, SongArtistMatch, Songplay, TimeRow, User};
use anyhow::Result;

/// Operations the record loader issues against the warehouse.
///
/// Each insert carries its own conflict policy; none of them treats a
/// duplicate key as an error.
pub trait WarehouseWriter {
    /// Insert a song. A row with the same `song_id` already present is kept
    /// as is. Returns whether a row was inserted.
    fn insert_ignore_song(&self, song: &Song) -> Result<bool>;

    /// Insert an artist. A row with the same `artist_id` already present is
    /// kept as is. Returns whether a row was inserted.
    fn insert_ignore_artist(&self, artist: &Artist) -> Result<bool>;

    /// Insert a user, or overwrite only `level` when the `user_id` exists.
    fn upsert_user_level(&self, user: &User) -> Result<()>;

    /// Insert a time row. Never deduplicated.
    fn insert_time(&self, time: &TimeRow) -> Result<()>;

    /// Find the song and artist ids whose title, artist name and duration
    /// all match exactly. `None` when nothing matches.
    fn resolve_song_artist(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongArtistMatch>>;

    /// Insert a songplay with a fresh surrogate id. Never deduplicated.
    fn insert_songplay(&self, songplay: &Songplay) -> Result<i64>;
}
