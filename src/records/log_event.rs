use super::error::{non_blank, required, RecordError};
use crate::calendar::TimeParts;
use crate::warehouse::{SongArtistMatch, Songplay, TimeRow, User};
use serde::Deserialize;

/// Page value of an event that is an actual song playback.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// `userId` is a string in the event logs (empty for logged-out users), but
/// numeric ids are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserIdValue {
    Text(String),
    Number(i64),
}

impl UserIdValue {
    fn into_id(self) -> Option<String> {
        match self {
            UserIdValue::Text(s) => non_blank(Some(s)).map(|s| s.trim().to_string()),
            UserIdValue::Number(n) => Some(n.to_string()),
        }
    }
}

/// One line of an event log, before filtering.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLogEvent {
    page: Option<String>,
    ts: Option<i64>,
    user_id: Option<UserIdValue>,
    first_name: Option<String>,
    last_name: Option<String>,
    gender: Option<String>,
    level: Option<String>,
    song: Option<String>,
    artist: Option<String>,
    length: Option<f64>,
    session_id: Option<i64>,
    location: Option<String>,
    user_agent: Option<String>,
}

impl RawLogEvent {
    fn is_song_play(&self) -> bool {
        self.page.as_deref() == Some(NEXT_SONG_PAGE)
    }
}

/// A NextSong event with every field the loader needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SongPlayEvent {
    pub ts: i64,
    pub time: TimeParts,
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
    pub song: String,
    pub artist: String,
    pub length: f64,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl SongPlayEvent {
    fn from_raw(raw: RawLogEvent, line: usize) -> Result<Self, RecordError> {
        let ts = required(raw.ts, line, "ts")?;
        let time = TimeParts::from_millis(ts).ok_or_else(|| RecordError::InvalidField {
            line,
            field: "ts",
            reason: format!("{} is not a representable millisecond timestamp", ts),
        })?;

        Ok(SongPlayEvent {
            ts,
            time,
            user_id: required(raw.user_id.and_then(UserIdValue::into_id), line, "userId")?,
            first_name: non_blank(raw.first_name),
            last_name: non_blank(raw.last_name),
            gender: non_blank(raw.gender),
            level: required(non_blank(raw.level), line, "level")?,
            song: required(raw.song, line, "song")?,
            artist: required(raw.artist, line, "artist")?,
            length: required(raw.length, line, "length")?,
            session_id: required(raw.session_id, line, "sessionId")?,
            location: non_blank(raw.location),
            user_agent: non_blank(raw.user_agent),
        })
    }

    pub fn time_row(&self) -> TimeRow {
        TimeRow {
            start_time: self.ts,
            parts: self.time,
        }
    }

    pub fn user(&self) -> User {
        User {
            user_id: self.user_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            level: self.level.clone(),
        }
    }

    /// Build the fact row, with the song and artist ids when a match was found.
    pub fn songplay(&self, matched: Option<SongArtistMatch>) -> Songplay {
        let (song_id, artist_id) = match matched {
            Some(m) => (Some(m.song_id), Some(m.artist_id)),
            None => (None, None),
        };
        Songplay {
            start_time: self.ts,
            user_id: self.user_id.clone(),
            level: self.level.clone(),
            song_id,
            artist_id,
            session_id: self.session_id,
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// NextSong events of a log file, in file order.
#[derive(Debug, Default)]
pub struct ParsedLog {
    pub events: Vec<SongPlayEvent>,
    /// Events dropped because their page was not NextSong.
    pub discarded: usize,
}

/// Parse a newline-delimited event log, keeping only NextSong events.
///
/// Every non-blank line must be a JSON object. Fields are checked only on
/// the events that survive the filter.
pub fn parse_log_file(text: &str) -> Result<ParsedLog, RecordError> {
    let mut parsed = ParsedLog::default();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let raw: RawLogEvent = serde_json::from_str(line).map_err(|source| RecordError::Json {
            line: line_number,
            source,
        })?;

        if !raw.is_song_play() {
            parsed.discarded += 1;
            continue;
        }
        parsed.events.push(SongPlayEvent::from_raw(raw, line_number)?);
    }
    Ok(parsed)
}
