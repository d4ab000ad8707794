//! The Sparkify star-schema warehouse.
//!
//! Schema declaration, drop-and-recreate management, and the store the
//! record loader writes through.

pub mod models;
pub mod schema;
pub mod schema_manager;
pub mod store;
pub mod trait_def;

pub use models::*;
pub use schema::WAREHOUSE_SCHEMA;
pub use schema_manager::SchemaManager;
pub use store::{WarehouseSession, WarehouseStore};
pub use trait_def::WarehouseWriter;
