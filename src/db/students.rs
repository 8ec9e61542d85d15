use crate::db::models::{Student, StudentRecord};
use crate::db::sqlite::{RosterStorage, STUDENT_COLUMNS, route_exists};
use crate::error::RosterError;
use sqlx::SqliteConnection;

impl RosterStorage {
    /// All students, ordered by first name (id breaks ties).
    pub async fn list_students(&self) -> Result<Vec<Student>, RosterError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY first_name, id");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn list_students_on_route(
        &self,
        route_id: i64,
    ) -> Result<Vec<Student>, RosterError> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE route_id = ? ORDER BY first_name, id"
        );
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(route_id)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn get_student(&self, id: i64) -> Result<Option<Student>, RosterError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    /// Insert a new student. `on_bus` always starts false.
    pub async fn insert_student(&self, rec: &StudentRecord) -> Result<Student, RosterError> {
        let mut tx = self.begin_write().await?;
        ensure_route(&mut tx, rec.route_id).await?;

        let sql = format!(
            "INSERT INTO students
                (first_name, last_name, on_bus, dob, conditions, contact_info, route_id)
             VALUES (?, ?, 0, ?, ?, ?, ?)
             RETURNING {STUDENT_COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&rec.first_name)
            .bind(&rec.last_name)
            .bind(rec.dob)
            .bind(&rec.conditions)
            .bind(&rec.contact_info)
            .bind(rec.route_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(student)
    }

    /// Overwrite every field of a student. Editing always clears `on_bus`.
    pub async fn update_student(
        &self,
        id: i64,
        rec: &StudentRecord,
    ) -> Result<Student, RosterError> {
        let mut tx = self.begin_write().await?;
        if !student_exists(&mut tx, id).await? {
            return Err(RosterError::not_found("Student", id));
        }
        ensure_route(&mut tx, rec.route_id).await?;

        let sql = format!(
            "UPDATE students SET
                first_name = ?,
                last_name = ?,
                on_bus = 0,
                dob = ?,
                conditions = ?,
                contact_info = ?,
                route_id = ?
             WHERE id = ?
             RETURNING {STUDENT_COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&rec.first_name)
            .bind(&rec.last_name)
            .bind(rec.dob)
            .bind(&rec.conditions)
            .bind(&rec.contact_info)
            .bind(rec.route_id)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(student)
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), RosterError> {
        let deleted: Option<(i64,)> =
            sqlx::query_as("DELETE FROM students WHERE id = ? RETURNING id")
                .bind(id)
                .fetch_optional(self.pool())
                .await?;
        deleted
            .map(|_| ())
            .ok_or_else(|| RosterError::not_found("Student", id))
    }

    /// Flip `on_bus`: true becomes false, anything else becomes true.
    pub async fn toggle_boarding(&self, id: i64) -> Result<Student, RosterError> {
        let sql = format!(
            "UPDATE students
             SET on_bus = CASE WHEN on_bus = 1 THEN 0 ELSE 1 END
             WHERE id = ?
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| RosterError::not_found("Student", id))
    }

    /// Mark every student on `route_id` as off the bus.
    ///
    /// Runs as one transaction: if any row fails, nobody is offloaded.
    /// Returns the number of students on the route.
    pub async fn offload_route(&self, route_id: i64) -> Result<u64, RosterError> {
        let mut tx = self.begin_write().await?;
        if !route_exists(&mut tx, route_id).await? {
            return Err(RosterError::not_found("Route", route_id));
        }

        let ids: Vec<(i64,)> =
            sqlx::query_as("SELECT id FROM students WHERE route_id = ? ORDER BY first_name, id")
                .bind(route_id)
                .fetch_all(&mut *tx)
                .await?;

        for (id,) in &ids {
            sqlx::query("UPDATE students SET on_bus = 0 WHERE id = ?")
                .bind(*id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(ids.len() as u64)
    }

    /// Move a student onto `route_id`.
    pub async fn reassign_student(
        &self,
        student_id: i64,
        route_id: i64,
    ) -> Result<Student, RosterError> {
        let mut tx = self.begin_write().await?;
        if !route_exists(&mut tx, route_id).await? {
            return Err(RosterError::not_found("Route", route_id));
        }

        let sql = format!(
            "UPDATE students SET route_id = ? WHERE id = ? RETURNING {STUDENT_COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(route_id)
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RosterError::not_found("Student", student_id))?;

        tx.commit().await?;
        Ok(student)
    }
}

async fn student_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, RosterError> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM students WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

async fn ensure_route(
    conn: &mut SqliteConnection,
    route_id: Option<i64>,
) -> Result<(), RosterError> {
    if let Some(id) = route_id
        && !route_exists(conn, id).await?
    {
        return Err(RosterError::MissingReference { entity: "Route", id });
    }
    Ok(())
}
