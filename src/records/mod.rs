//! Typed records read from the song and log JSON files.

mod error;
mod log_event;
mod song_record;

pub use error::{decode_utf8, RecordError};
pub use log_event::{parse_log_file, ParsedLog, SongPlayEvent, NEXT_SONG_PAGE};
pub use song_record::{parse_song_file, SongRecord};
