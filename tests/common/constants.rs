//! Shared constants for end-to-end tests
//!
//! When fixture data changes, update only this file.

// ============================================================================
// Song Data
// ============================================================================

/// Song ID of "Test Song"
pub const SONG_1_ID: &str = "SOAAA";

/// Title of song 1
pub const SONG_1_TITLE: &str = "Test Song";

/// Duration of song 1, in seconds
pub const SONG_1_DURATION: f64 = 210.5;

/// Song ID of a second song by the same artist
pub const SONG_2_ID: &str = "SOBBB";

/// Title of song 2
pub const SONG_2_TITLE: &str = "Second Song";

/// Duration of song 2, in seconds
pub const SONG_2_DURATION: f64 = 187.2;

/// Artist ID of "Test Artist"
pub const ARTIST_1_ID: &str = "ARAAA";

/// Name of artist 1
pub const ARTIST_1_NAME: &str = "Test Artist";

// ============================================================================
// Event Data
// ============================================================================

/// A user who upgrades from free to paid
pub const USER_1_ID: &str = "26";
pub const USER_1_FIRST_NAME: &str = "Ryan";
pub const USER_1_LAST_NAME: &str = "Smith";

/// A user who stays on the free tier
pub const USER_2_ID: &str = "8";

/// 2018-11-02T01:25:34.796Z
pub const TS_NOV_2: i64 = 1541121934796;

/// 2018-12-31T23:59:59Z
pub const TS_NEW_YEARS_EVE: i64 = 1546300799000;

/// 2019-01-01T00:00:00Z
pub const TS_NEW_YEAR: i64 = 1546300800000;
