//! Database module: row models, schema and the SQLite-backed record store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus validated write records
//! - `schema.rs`: SQL DDL for initializing the database
//! - `sqlite.rs`: pool setup and shared helpers
//! - `students.rs`, `routes.rs`, `drivers.rs`: per-table operations

pub mod drivers;
pub mod models;
pub mod routes;
pub mod schema;
pub mod sqlite;
pub mod students;

pub use models::{Driver, DriverRecord, Route, RouteRecord, Student, StudentRecord};
pub use schema::SQLITE_INIT;
pub use sqlite::{RosterStorage, SqlitePool};
