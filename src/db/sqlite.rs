use crate::db::schema::SQLITE_INIT;
use crate::error::RosterError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqliteConnection, Transaction};
use std::str::FromStr;
use std::time::Duration;

pub type SqlitePool = Pool<Sqlite>;

pub(crate) const STUDENT_COLUMNS: &str =
    "id, first_name, last_name, on_bus, dob, conditions, contact_info, route_id";
pub(crate) const ROUTE_COLUMNS: &str = "id, route, driver_id";
pub(crate) const DRIVER_COLUMNS: &str =
    "id, first_name, last_name, dob, conditions, contact_info";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed store for students, routes and drivers.
///
/// Every operation that touches more than one row, or checks a reference
/// before writing, runs inside a single transaction.
#[derive(Clone)]
pub struct RosterStorage {
    pool: SqlitePool,
}

impl RosterStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RosterError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a write transaction holding the database write lock from the start.
    ///
    /// A deferred transaction that reads before writing cannot wait for the lock
    /// upgrade, so competing writers would fail with `SQLITE_BUSY`. With
    /// `BEGIN IMMEDIATE` they queue on the busy timeout instead.
    pub(crate) async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, RosterError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), RosterError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }
}

pub(crate) async fn route_exists(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, RosterError> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM routes WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

pub(crate) async fn driver_exists(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, RosterError> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM drivers WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::db::{DriverRecord, RouteRecord, StudentRecord};
    use chrono::NaiveDate;

    /// Fresh in-memory database. A single connection keeps every query on the same database.
    pub async fn memory_storage() -> RosterStorage {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid sqlite url")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await
            .expect("in-memory pool");
        let storage = RosterStorage::new(pool);
        storage.init_schema().await.expect("schema");
        storage
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
    }

    pub fn student(first: &str, route_id: Option<i64>) -> StudentRecord {
        StudentRecord {
            first_name: first.to_string(),
            last_name: "Ng".to_string(),
            dob: date("2012-05-01"),
            conditions: None,
            contact_info: None,
            route_id,
        }
    }

    pub fn driver(first: &str) -> DriverRecord {
        DriverRecord {
            first_name: first.to_string(),
            last_name: "Lee".to_string(),
            dob: date("1980-01-01"),
            conditions: None,
            contact_info: None,
        }
    }

    pub fn route(number: i64, driver_id: Option<i64>) -> RouteRecord {
        RouteRecord {
            route: number,
            driver_id,
        }
    }
}
