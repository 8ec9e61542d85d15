//! SQL DDL for the roster database.
//! Statements are applied one at a time, so comments must not contain semicolons.

/// SQLite schema with:
/// - `drivers`, `routes`, `students`, each keyed by INTEGER PRIMARY KEY AUTOINCREMENT
/// - dates stored as `YYYY-MM-DD` TEXT, booleans as INTEGER 0/1
/// - foreign keys declared `ON DELETE RESTRICT`, so a parent row cannot be
///   removed while children still point at it
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS drivers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    dob TEXT NOT NULL,
    conditions TEXT NULL,
    contact_info TEXT NULL
);

CREATE TABLE IF NOT EXISTS routes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    route INTEGER NOT NULL,
    driver_id INTEGER NULL REFERENCES drivers(id) ON DELETE RESTRICT
);

CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    on_bus INTEGER NOT NULL DEFAULT 0,
    dob TEXT NOT NULL,
    conditions TEXT NULL,
    contact_info TEXT NULL,
    route_id INTEGER NULL REFERENCES routes(id) ON DELETE RESTRICT
);

CREATE INDEX IF NOT EXISTS idx_students_route_id ON students(route_id);
CREATE INDEX IF NOT EXISTS idx_routes_driver_id ON routes(driver_id);
"#;
