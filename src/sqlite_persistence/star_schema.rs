use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            // Only mutated when optional fields (e.g. `non_null = true`) are passed
            #[allow(unused_mut)]
            let mut column = $crate::sqlite_persistence::Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
                foreign_key: None,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SqlType {
    Text,
    Integer,
    Real,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
        }
    }

    fn from_sql(declared: &str) -> Option<SqlType> {
        match declared {
            "TEXT" => Some(SqlType::Text),
            "INTEGER" => Some(SqlType::Integer),
            "REAL" => Some(SqlType::Real),
            _ => None,
        }
    }
}

#[allow(unused)]
#[derive(Debug, Clone, Copy)]
pub enum ForeignKeyOnChange {
    NoAction,
    SetNull,
    Cascade,
}

impl ForeignKeyOnChange {
    fn as_sql(&self) -> &'static str {
        match self {
            ForeignKeyOnChange::NoAction => "NO ACTION",
            ForeignKeyOnChange::SetNull => "SET NULL",
            ForeignKeyOnChange::Cascade => "CASCADE",
        }
    }
}

pub struct ForeignKey {
    pub foreign_table: &'static str,
    pub foreign_column: &'static str,
    pub on_delete: ForeignKeyOnChange,
}

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
    pub foreign_key: Option<&'static ForeignKey>,
}

pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indices: &'static [(&'static str, &'static str)],
}

impl Table {
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let mut sql = format!("{} {}", column.name, column.sql_type.as_sql());
                if column.is_primary_key {
                    sql.push_str(" PRIMARY KEY");
                }
                if column.non_null {
                    sql.push_str(" NOT NULL");
                }
                if let Some(foreign_key) = column.foreign_key {
                    sql.push_str(&format!(
                        " REFERENCES {}({}) ON DELETE {}",
                        foreign_key.foreign_table,
                        foreign_key.foreign_column,
                        foreign_key.on_delete.as_sql()
                    ));
                }
                sql
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({});", self.name, columns)
    }

    pub fn create(&self, conn: &Connection) -> Result<()> {
        conn.execute(&self.create_sql(), params![])
            .with_context(|| format!("Failed to create table {}", self.name))?;

        for (index_name, column_name) in self.indices {
            conn.execute(
                &format!(
                    "CREATE INDEX {} ON {}({});",
                    index_name, self.name, column_name
                ),
                params![],
            )
            .with_context(|| format!("Failed to create index {}", index_name))?;
        }
        Ok(())
    }

    pub fn drop_if_exists(&self, conn: &Connection) -> Result<()> {
        conn.execute(&format!("DROP TABLE IF EXISTS {};", self.name), params![])
            .with_context(|| format!("Failed to drop table {}", self.name))?;
        Ok(())
    }
}

/// A column as reported by `PRAGMA table_info`.
struct LiveColumn {
    name: String,
    declared_type: String,
    non_null: bool,
    is_primary_key: bool,
}

/// A foreign key as reported by `PRAGMA foreign_key_list`.
struct LiveForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
    on_delete: String,
}

/// The full set of warehouse tables, in dependency order.
///
/// Tables referenced by a foreign key must appear before the tables that
/// reference them: `create` walks the list forwards and `drop_all` walks it
/// backwards.
pub struct StarSchema {
    pub version: usize,
    pub tables: &'static [Table],
}

impl StarSchema {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        conn.execute("PRAGMA foreign_keys = ON;", params![])?;
        for table in self.tables {
            table.create(conn)?;
        }
        conn.pragma_update(None, "user_version", self.version as i64)?;
        Ok(())
    }

    pub fn drop_all(&self, conn: &Connection) -> Result<()> {
        for table in self.tables.iter().rev() {
            table.drop_if_exists(conn)?;
        }
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<()> {
        let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        if db_version != self.version as i64 {
            bail!(
                "Database schema version is {}, expected {}. Run create-tables first.",
                db_version,
                self.version
            );
        }

        for table in self.tables {
            validate_columns(conn, table)?;
            validate_indices(conn, table)?;
            validate_foreign_keys(conn, table)?;
        }
        Ok(())
    }
}

fn validate_columns(conn: &Connection, table: &Table) -> Result<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", table.name))?;
    let actual_columns = stmt
        .query_map(params![], |row| {
            Ok(LiveColumn {
                name: row.get(1)?,
                declared_type: row.get(2)?,
                non_null: row.get::<_, i32>(3)? == 1,
                is_primary_key: row.get::<_, i32>(5)? == 1,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if actual_columns.is_empty() {
        bail!("Table {} does not exist", table.name);
    }

    if actual_columns.len() != table.columns.len() {
        bail!(
            "Table {} has {} columns, expected {}. Found column names: {}, expected: {}",
            table.name,
            actual_columns.len(),
            table.columns.len(),
            actual_columns
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            table
                .columns
                .iter()
                .map(|c| c.name)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    for (actual, expected) in actual_columns.iter().zip(table.columns.iter()) {
        if actual.name != expected.name {
            bail!(
                "Table {} Column name mismatch: expected {}, got {}",
                table.name,
                expected.name,
                actual.name
            );
        }
        if SqlType::from_sql(&actual.declared_type).as_ref() != Some(expected.sql_type) {
            bail!(
                "Table {} Column {} type mismatch: expected {:?}, got {}",
                table.name,
                expected.name,
                expected.sql_type,
                actual.declared_type
            );
        }
        if actual.non_null != expected.non_null {
            bail!(
                "Table {} Column {} non-null mismatch: expected {}, got {}",
                table.name,
                expected.name,
                expected.non_null,
                actual.non_null
            );
        }
        if actual.is_primary_key != expected.is_primary_key {
            bail!(
                "Table {} Column {} primary key mismatch: expected {}, got {}",
                table.name,
                expected.name,
                expected.is_primary_key,
                actual.is_primary_key
            );
        }
    }
    Ok(())
}

fn validate_indices(conn: &Connection, table: &Table) -> Result<()> {
    for (index_name, _column) in table.indices {
        let index_exists = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1 AND tbl_name=?2",
                params![index_name, table.name],
                |_| Ok(true),
            )
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(false),
                e => Err(e),
            })?;

        if !index_exists {
            bail!("Table {} is missing index '{}'", table.name, index_name);
        }
    }
    Ok(())
}

fn validate_foreign_keys(conn: &Connection, table: &Table) -> Result<()> {
    // PRAGMA foreign_key_list returns: id, seq, table, from, to, on_update, on_delete, match
    let mut stmt = conn.prepare(&format!("PRAGMA foreign_key_list({})", table.name))?;
    let actual_fks = stmt
        .query_map([], |row| {
            Ok(LiveForeignKey {
                from_column: row.get(3)?,
                to_table: row.get(2)?,
                to_column: row.get(4)?,
                on_delete: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for column in table.columns {
        let Some(expected) = column.foreign_key else {
            continue;
        };
        let expected_on_delete = expected.on_delete.as_sql();

        let found = actual_fks.iter().any(|actual| {
            actual.from_column == column.name
                && actual.to_table == expected.foreign_table
                && actual.to_column == expected.foreign_column
                && actual.on_delete == expected_on_delete
        });
        if found {
            continue;
        }

        match actual_fks.iter().find(|a| a.from_column == column.name) {
            Some(actual) => bail!(
                "Table {} column {} has foreign key mismatch: expected REFERENCES {}({}) ON DELETE {}, got REFERENCES {}({}) ON DELETE {}",
                table.name,
                column.name,
                expected.foreign_table,
                expected.foreign_column,
                expected_on_delete,
                actual.to_table,
                actual.to_column,
                actual.on_delete
            ),
            None => bail!(
                "Table {} column {} is missing foreign key: expected REFERENCES {}({}) ON DELETE {}",
                table.name,
                column.name,
                expected.foreign_table,
                expected.foreign_column,
                expected_on_delete
            ),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT_TABLE: Table = Table {
        name: "parent",
        columns: &[
            sqlite_column!("id", &SqlType::Text, is_primary_key = true, non_null = true),
            sqlite_column!("name", &SqlType::Text, non_null = true),
        ],
        indices: &[("idx_parent_name", "name")],
    };

    const PARENT_FK: ForeignKey = ForeignKey {
        foreign_table: "parent",
        foreign_column: "id",
        on_delete: ForeignKeyOnChange::SetNull,
    };

    const CHILD_TABLE: Table = Table {
        name: "child",
        columns: &[
            sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
            sqlite_column!("parent_id", &SqlType::Text, foreign_key = Some(&PARENT_FK)),
            sqlite_column!("weight", &SqlType::Real),
        ],
        indices: &[],
    };

    const TEST_SCHEMA: StarSchema = StarSchema {
        version: 3,
        tables: &[PARENT_TABLE, CHILD_TABLE],
    };

    #[test]
    fn test_create_sql_renders_constraints() {
        assert_eq!(
            CHILD_TABLE.create_sql(),
            "CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id TEXT REFERENCES parent(id) ON DELETE SET NULL, weight REAL);"
        );
        assert_eq!(
            PARENT_TABLE.create_sql(),
            "CREATE TABLE parent (id TEXT PRIMARY KEY NOT NULL, name TEXT NOT NULL);"
        );
    }

    #[test]
    fn test_create_then_validate_passes() {
        let conn = Connection::open_in_memory().unwrap();
        TEST_SCHEMA.create(&conn).unwrap();
        TEST_SCHEMA.validate(&conn).unwrap();
    }

    #[test]
    fn test_drop_all_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        TEST_SCHEMA.drop_all(&conn).unwrap();
        TEST_SCHEMA.create(&conn).unwrap();
        TEST_SCHEMA.drop_all(&conn).unwrap();
        TEST_SCHEMA.drop_all(&conn).unwrap();

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 0);
    }

    #[test]
    fn test_validate_detects_wrong_version() {
        let conn = Connection::open_in_memory().unwrap();
        TEST_SCHEMA.create(&conn).unwrap();
        conn.pragma_update(None, "user_version", 1).unwrap();

        let err_msg = TEST_SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err_msg.contains("schema version is 1"));
    }

    #[test]
    fn test_validate_detects_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        PARENT_TABLE.create(&conn).unwrap();
        conn.pragma_update(None, "user_version", 3).unwrap();

        let err_msg = TEST_SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err_msg.contains("child does not exist"));
    }

    #[test]
    fn test_validate_detects_missing_index() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE parent (id TEXT PRIMARY KEY NOT NULL, name TEXT NOT NULL)",
            [],
        )
        .unwrap();
        CHILD_TABLE.create(&conn).unwrap();
        conn.pragma_update(None, "user_version", 3).unwrap();

        let err_msg = TEST_SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err_msg.contains("missing index"));
        assert!(err_msg.contains("idx_parent_name"));
    }

    #[test]
    fn test_validate_detects_type_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        PARENT_TABLE.create(&conn).unwrap();
        conn.execute(
            "CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id TEXT REFERENCES parent(id) ON DELETE SET NULL, weight TEXT)",
            [],
        )
        .unwrap();
        conn.pragma_update(None, "user_version", 3).unwrap();

        let err_msg = TEST_SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err_msg.contains("weight type mismatch"));
    }

    #[test]
    fn test_validate_detects_missing_foreign_key() {
        let conn = Connection::open_in_memory().unwrap();
        PARENT_TABLE.create(&conn).unwrap();
        conn.execute(
            "CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id TEXT, weight REAL)",
            [],
        )
        .unwrap();
        conn.pragma_update(None, "user_version", 3).unwrap();

        let err_msg = TEST_SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err_msg.contains("missing foreign key"));
        assert!(err_msg.contains("parent_id"));
    }

    #[test]
    fn test_validate_detects_wrong_on_delete_action() {
        let conn = Connection::open_in_memory().unwrap();
        PARENT_TABLE.create(&conn).unwrap();
        conn.execute(
            "CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id TEXT REFERENCES parent(id) ON DELETE CASCADE, weight REAL)",
            [],
        )
        .unwrap();
        conn.pragma_update(None, "user_version", 3).unwrap();

        let err_msg = TEST_SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err_msg.contains("foreign key mismatch"));
        assert!(err_msg.contains("SET NULL"));
        assert!(err_msg.contains("CASCADE"));
    }
}
