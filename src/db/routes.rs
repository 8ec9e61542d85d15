use crate::db::models::{Route, RouteRecord};
use crate::db::sqlite::{ROUTE_COLUMNS, RosterStorage, driver_exists, route_exists};
use crate::error::RosterError;
use sqlx::SqliteConnection;

impl RosterStorage {
    /// All routes, ordered by route number (id breaks ties).
    pub async fn list_routes(&self) -> Result<Vec<Route>, RosterError> {
        let sql = format!("SELECT {ROUTE_COLUMNS} FROM routes ORDER BY route, id");
        Ok(sqlx::query_as::<_, Route>(&sql)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn get_route(&self, id: i64) -> Result<Option<Route>, RosterError> {
        let sql = format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE id = ?");
        Ok(sqlx::query_as::<_, Route>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    pub async fn insert_route(&self, rec: &RouteRecord) -> Result<Route, RosterError> {
        let mut tx = self.begin_write().await?;
        ensure_driver(&mut tx, rec.driver_id).await?;

        let sql = format!(
            "INSERT INTO routes (route, driver_id) VALUES (?, ?) RETURNING {ROUTE_COLUMNS}"
        );
        let route = sqlx::query_as::<_, Route>(&sql)
            .bind(rec.route)
            .bind(rec.driver_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(route)
    }

    pub async fn update_route(&self, id: i64, rec: &RouteRecord) -> Result<Route, RosterError> {
        let mut tx = self.begin_write().await?;
        if !route_exists(&mut tx, id).await? {
            return Err(RosterError::not_found("Route", id));
        }
        ensure_driver(&mut tx, rec.driver_id).await?;

        let sql = format!(
            "UPDATE routes SET route = ?, driver_id = ? WHERE id = ? RETURNING {ROUTE_COLUMNS}"
        );
        let route = sqlx::query_as::<_, Route>(&sql)
            .bind(rec.route)
            .bind(rec.driver_id)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(route)
    }

    /// Delete a route that no student is assigned to.
    pub async fn delete_route(&self, id: i64) -> Result<(), RosterError> {
        let mut tx = self.begin_write().await?;
        if !route_exists(&mut tx, id).await? {
            return Err(RosterError::not_found("Route", id));
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students WHERE route_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            return Err(RosterError::HasDependents {
                entity: "Route",
                id,
                dependents: "students",
                count,
            });
        }

        sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

async fn ensure_driver(
    conn: &mut SqliteConnection,
    driver_id: Option<i64>,
) -> Result<(), RosterError> {
    if let Some(id) = driver_id
        && !driver_exists(conn, id).await?
    {
        return Err(RosterError::MissingReference { entity: "Driver", id });
    }
    Ok(())
}
