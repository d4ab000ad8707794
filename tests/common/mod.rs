//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::TestWarehouse;
//!
//! #[test]
//! fn test_load() {
//!     let warehouse = TestWarehouse::new().unwrap();
//!     warehouse.write_default_songs().unwrap();
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
pub use fixtures::{event_json, song_json, TestWarehouse};
