//! Drop-and-recreate of the warehouse database.

use super::schema::WAREHOUSE_SCHEMA;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files SQLite may keep next to the main database file.
const SIDECAR_SUFFIXES: &[&str] = &["-wal", "-shm", "-journal"];

pub struct SchemaManager {
    db_path: PathBuf,
}

impl SchemaManager {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Destroy the warehouse database and recreate it with empty tables.
    ///
    /// All data loaded so far is lost. Calling it again always yields the
    /// same empty schema.
    pub fn reset(&self) -> Result<()> {
        self.drop_database()?;
        let conn = self.create_database()?;

        WAREHOUSE_SCHEMA
            .drop_all(&conn)
            .context("Failed to drop warehouse tables")?;
        WAREHOUSE_SCHEMA
            .create(&conn)
            .context("Failed to create warehouse tables")?;

        info!(
            "Created {} warehouse tables in {:?}",
            WAREHOUSE_SCHEMA.tables.len(),
            self.db_path
        );
        Ok(())
    }

    /// Check that the database holds exactly the warehouse tables.
    pub fn validate(&self) -> Result<()> {
        let conn = Connection::open_with_flags(
            &self.db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )
        .with_context(|| format!("Failed to open warehouse database {:?}", self.db_path))?;
        WAREHOUSE_SCHEMA.validate(&conn)
    }

    fn drop_database(&self) -> Result<()> {
        let mut files = vec![self.db_path.clone()];
        for suffix in SIDECAR_SUFFIXES {
            let mut name = self.db_path.clone().into_os_string();
            name.push(suffix);
            files.push(PathBuf::from(name));
        }

        for file in files.iter().filter(|f| f.exists()) {
            std::fs::remove_file(file)
                .with_context(|| format!("Failed to remove database file {:?}", file))?;
            info!("Dropped {:?}", file);
        }
        Ok(())
    }

    fn create_database(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }

        let conn = Connection::open_with_flags(
            &self.db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to create warehouse database {:?}", self.db_path))?;

        // Only takes effect before the first table is written
        conn.pragma_update(None, "encoding", "UTF-8")?;
        Ok(conn)
    }
}
