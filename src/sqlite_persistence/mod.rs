mod star_schema;

pub use star_schema::{Column, ForeignKey, ForeignKeyOnChange, SqlType, StarSchema, Table};
