use crate::db::models::{Driver, DriverRecord};
use crate::db::sqlite::{DRIVER_COLUMNS, RosterStorage, driver_exists};
use crate::error::RosterError;

impl RosterStorage {
    /// All drivers, ordered by first name (id breaks ties).
    pub async fn list_drivers(&self) -> Result<Vec<Driver>, RosterError> {
        let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY first_name, id");
        Ok(sqlx::query_as::<_, Driver>(&sql)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn get_driver(&self, id: i64) -> Result<Option<Driver>, RosterError> {
        let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = ?");
        Ok(sqlx::query_as::<_, Driver>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    pub async fn insert_driver(&self, rec: &DriverRecord) -> Result<Driver, RosterError> {
        let sql = format!(
            "INSERT INTO drivers (first_name, last_name, dob, conditions, contact_info)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {DRIVER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Driver>(&sql)
            .bind(&rec.first_name)
            .bind(&rec.last_name)
            .bind(rec.dob)
            .bind(&rec.conditions)
            .bind(&rec.contact_info)
            .fetch_one(self.pool())
            .await?)
    }

    pub async fn update_driver(
        &self,
        id: i64,
        rec: &DriverRecord,
    ) -> Result<Driver, RosterError> {
        let sql = format!(
            "UPDATE drivers SET
                first_name = ?,
                last_name = ?,
                dob = ?,
                conditions = ?,
                contact_info = ?
             WHERE id = ?
             RETURNING {DRIVER_COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&sql)
            .bind(&rec.first_name)
            .bind(&rec.last_name)
            .bind(rec.dob)
            .bind(&rec.conditions)
            .bind(&rec.contact_info)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| RosterError::not_found("Driver", id))
    }

    /// Delete a driver that no route points at.
    pub async fn delete_driver(&self, id: i64) -> Result<(), RosterError> {
        let mut tx = self.begin_write().await?;
        if !driver_exists(&mut tx, id).await? {
            return Err(RosterError::not_found("Driver", id));
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM routes WHERE driver_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            return Err(RosterError::HasDependents {
                entity: "Driver",
                id,
                dependents: "routes",
                count,
            });
        }

        sqlx::query("DELETE FROM drivers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
