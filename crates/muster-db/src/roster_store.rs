//! Roster persistence: the current state of every student.
//!
//! The `students` table holds exactly one row per student with their
//! current status. Historical states live in the `records` table (see
//! [`crate::record_store`]); this store never touches them.
//!
//! Reads run on the pool directly. Writes take a [`PgConnection`] so the
//! caller can pair a roster write with a record append inside one
//! transaction. A student must never be visible without a matching
//! founding record, which is only enforceable when both inserts share a
//! transaction.

use chrono::{DateTime, Utc};
use muster_types::{AttendanceStatus, Student, StudentId};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `students` table.
pub struct RosterStore<'a> {
    pool: &'a PgPool,
}

impl<'a> RosterStore<'a> {
    /// Create a new roster store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a single student by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    /// Returns [`DbError::Decode`] if the stored status token is unknown.
    pub async fn get(&self, id: StudentId) -> Result<Option<Student>, DbError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r"SELECT id, name, category, status::TEXT AS status, last_updated
              FROM students
              WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(StudentRow::into_student).transpose()
    }

    /// Fetch every student, newest registration first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    /// Returns [`DbError::Decode`] if any stored status token is unknown.
    pub async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        let rows = sqlx::query_as::<_, StudentRow>(
            r"SELECT id, name, category, status::TEXT AS status, last_updated
              FROM students
              ORDER BY seq DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(StudentRow::into_student).collect()
    }

    /// Fetch every student id, newest registration first.
    ///
    /// Bulk operations snapshot the roster with this before iterating, so
    /// students registered mid-bulk are not half-processed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_ids(&self) -> Result<Vec<StudentId>, DbError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r"SELECT id
              FROM students
              ORDER BY seq DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| StudentId::from(id)).collect())
    }

    /// Delete a student. Their records cascade away with them.
    ///
    /// Returns `false` if no such student existed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn remove(&self, id: StudentId) -> Result<bool, DbError> {
        let result = sqlx::query(r"DELETE FROM students WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(student_id = %id, "Removed student from roster");
        }
        Ok(removed)
    }

    /// Insert a new student row inside the caller's transaction.
    ///
    /// The registration sequence (`students.seq`) is assigned by the
    /// database; the caller never supplies it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails. Check
    /// [`DbError::is_unique_violation`] to detect an id collision.
    pub async fn insert(conn: &mut PgConnection, student: &Student) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO students (id, name, category, status, last_updated)
              VALUES ($1, $2, $3, $4::attendance_status, $5)",
        )
        .bind(student.id.as_uuid())
        .bind(&student.name)
        .bind(&student.category)
        .bind(student.status.as_str())
        .bind(student.last_updated)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Update a student's status inside the caller's transaction.
    ///
    /// Returns `false` if no such student exists. The UPDATE takes the
    /// row lock, so two concurrent transitions for the same student
    /// serialize here and their record appends happen in lock order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: StudentId,
        status: AttendanceStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r"UPDATE students
              SET status = $2::attendance_status, last_updated = $3
              WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(at)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// A row from the `students` table.
///
/// Uses runtime types rather than compile-time checked types to avoid
/// requiring a live database during builds. The status comes back as
/// TEXT and is parsed into the domain enum on the way out.
#[derive(Debug, Clone, sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    name: String,
    category: String,
    status: String,
    last_updated: Option<DateTime<Utc>>,
}

impl StudentRow {
    fn into_student(self) -> Result<Student, DbError> {
        let status = self
            .status
            .parse::<AttendanceStatus>()
            .map_err(|e| DbError::Decode(format!("students.status: {e}")))?;

        Ok(Student {
            id: StudentId::from(self.id),
            name: self.name,
            category: self.category,
            status,
            last_updated: self.last_updated,
        })
    }
}
