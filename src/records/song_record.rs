use super::error::{non_blank, required, RecordError};
use crate::warehouse::{Artist, Song};
use serde::Deserialize;

/// Song file contents as found on disk, before required fields are checked.
#[derive(Debug, Deserialize)]
struct RawSongRecord {
    song_id: Option<String>,
    title: Option<String>,
    artist_id: Option<String>,
    year: Option<i32>,
    duration: Option<f64>,
    artist_name: Option<String>,
    artist_location: Option<String>,
    artist_latitude: Option<f64>,
    artist_longitude: Option<f64>,
}

/// One song file: a song and the artist that recorded it.
#[derive(Clone, Debug, PartialEq)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: Option<i32>,
    pub duration: f64,
    pub artist_name: String,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
}

impl SongRecord {
    pub fn song(&self) -> Song {
        Song {
            song_id: self.song_id.clone(),
            title: self.title.clone(),
            artist_id: self.artist_id.clone(),
            year: self.year,
            duration: self.duration,
        }
    }

    pub fn artist(&self) -> Artist {
        Artist {
            artist_id: self.artist_id.clone(),
            name: self.artist_name.clone(),
            location: self.artist_location.clone(),
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        }
    }
}

impl TryFrom<RawSongRecord> for SongRecord {
    type Error = RecordError;

    fn try_from(raw: RawSongRecord) -> Result<Self, Self::Error> {
        const LINE: usize = 1;
        Ok(SongRecord {
            song_id: required(non_blank(raw.song_id), LINE, "song_id")?,
            title: required(raw.title, LINE, "title")?,
            artist_id: required(non_blank(raw.artist_id), LINE, "artist_id")?,
            // The song dataset uses 0 for an unknown year
            year: raw.year.filter(|y| *y != 0),
            duration: required(raw.duration, LINE, "duration")?,
            artist_name: required(raw.artist_name, LINE, "artist_name")?,
            artist_location: non_blank(raw.artist_location),
            artist_latitude: raw.artist_latitude,
            artist_longitude: raw.artist_longitude,
        })
    }
}

/// Parse the single JSON object of a song file.
pub fn parse_song_file(text: &str) -> Result<SongRecord, RecordError> {
    let raw: RawSongRecord =
        serde_json::from_str(text).map_err(|source| RecordError::Json { line: 1, source })?;
    SongRecord::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SONG_FILE: &str = r#"{"num_songs": 1, "artist_id": "ARD7TVE1187B99BFB1", "artist_latitude": null, "artist_longitude": null, "artist_location": "California - LA", "artist_name": "Casual", "song_id": "SOMZWCG12A8C13C480", "title": "I Didn't Mean To", "duration": 218.93179, "year": 0}"#;

    #[test]
    fn test_parses_song_file() {
        let record = parse_song_file(SONG_FILE).unwrap();
        assert_eq!(record.song_id, "SOMZWCG12A8C13C480");
        assert_eq!(record.title, "I Didn't Mean To");
        assert_eq!(record.artist_id, "ARD7TVE1187B99BFB1");
        assert_eq!(record.duration, 218.93179);
        assert_eq!(record.artist_name, "Casual");
        assert_eq!(record.artist_location.as_deref(), Some("California - LA"));
        assert_eq!(record.artist_latitude, None);
    }

    #[test]
    fn test_year_zero_is_unknown() {
        let record = parse_song_file(SONG_FILE).unwrap();
        assert_eq!(record.year, None);
        assert_eq!(record.song().year, None);
    }

    #[test]
    fn test_splits_into_song_and_artist() {
        let record = parse_song_file(
            r#"{"song_id": "SOAAA", "title": "Test Song", "artist_id": "ARAAA", "year": 1999, "duration": 210.5,
                "artist_name": "Test Artist", "artist_location": "", "artist_latitude": 35.14968, "artist_longitude": -90.04892}"#,
        )
        .unwrap();

        assert_eq!(
            record.song(),
            Song {
                song_id: "SOAAA".to_string(),
                title: "Test Song".to_string(),
                artist_id: "ARAAA".to_string(),
                year: Some(1999),
                duration: 210.5,
            }
        );
        assert_eq!(
            record.artist(),
            Artist {
                artist_id: "ARAAA".to_string(),
                name: "Test Artist".to_string(),
                location: None,
                latitude: Some(35.14968),
                longitude: Some(-90.04892),
            }
        );
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse_song_file(
            r#"{"song_id": "SOAAA", "artist_id": "ARAAA", "duration": 1.0, "artist_name": "X"}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RecordError::MissingField {
                field: "title",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_song_file("{\"song_id\": ").unwrap_err();
        assert!(matches!(err, RecordError::Json { line: 1, .. }));
    }
}
