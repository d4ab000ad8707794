//! Sparkify ETL Library
//!
//! Loads song metadata and listening event logs from JSON files into a
//! SQLite star schema.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod file_walker;
pub mod loader;
pub mod records;
pub mod sqlite_persistence;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use loader::{FileKind, LoadError, LoadOptions, LoadSummary, RecordLoader};
pub use warehouse::{SchemaManager, WarehouseStore};
