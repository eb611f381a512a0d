//! Attendance history persistence.
//!
//! The `records` table is append-only. Rows are never updated and only
//! disappear when the student they belong to is deleted (FK cascade).
//! The database assigns `records.seq` at insert time, which gives every
//! record a global position in the order changes were committed.
//!
//! As with [`crate::roster_store`], reads run on the pool and the append
//! takes a [`PgConnection`] so it can share a transaction with the roster
//! write it belongs to.

use chrono::{DateTime, Utc};
use muster_types::{AttendanceRecord, AttendanceStatus, StudentId};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `records` table.
pub struct RecordStore<'a> {
    pool: &'a PgPool,
}

impl<'a> RecordStore<'a> {
    /// Create a new record store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the full history for one student, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    /// Returns [`DbError::Decode`] if any stored status token is unknown.
    pub async fn list_for(&self, student_id: StudentId) -> Result<Vec<AttendanceRecord>, DbError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r"SELECT seq, student_id, status::TEXT AS status, note, recorded_at
              FROM records
              WHERE student_id = $1
              ORDER BY seq DESC",
        )
        .bind(student_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(RecordRow::into_record).collect()
    }

    /// Fetch every record in the table, newest first.
    ///
    /// Used by the view composer to build all student histories with a
    /// single query instead of one query per student.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    /// Returns [`DbError::Decode`] if any stored status token is unknown.
    pub async fn list_all(&self) -> Result<Vec<AttendanceRecord>, DbError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r"SELECT seq, student_id, status::TEXT AS status, note, recorded_at
              FROM records
              ORDER BY seq DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(RecordRow::into_record).collect()
    }

    /// Count the records belonging to one student.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn count_for(&self, student_id: StudentId) -> Result<i64, DbError> {
        let row: (i64,) = sqlx::query_as(
            r"SELECT COUNT(*)
              FROM records
              WHERE student_id = $1",
        )
        .bind(student_id.as_uuid())
        .fetch_one(self.pool)
        .await?;

        Ok(row.0)
    }

    /// Append one record inside the caller's transaction.
    ///
    /// Returns the stored record including its database-assigned
    /// sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails, including when
    /// no student with `student_id` exists (FK violation).
    pub async fn append(
        conn: &mut PgConnection,
        student_id: StudentId,
        status: AttendanceStatus,
        note: &str,
        at: DateTime<Utc>,
    ) -> Result<AttendanceRecord, DbError> {
        let row: (i64,) = sqlx::query_as(
            r"INSERT INTO records (student_id, status, note, recorded_at)
              VALUES ($1, $2::attendance_status, $3, $4)
              RETURNING seq",
        )
        .bind(student_id.as_uuid())
        .bind(status.as_str())
        .bind(note)
        .bind(at)
        .fetch_one(conn)
        .await?;

        Ok(AttendanceRecord {
            sequence: row.0,
            student_id,
            status,
            note: note.to_owned(),
            timestamp: at,
        })
    }
}

/// A row from the `records` table, with the status cast to TEXT.
#[derive(Debug, Clone, sqlx::FromRow)]
struct RecordRow {
    seq: i64,
    student_id: Uuid,
    status: String,
    note: String,
    recorded_at: DateTime<Utc>,
}

impl RecordRow {
    fn into_record(self) -> Result<AttendanceRecord, DbError> {
        let status = self
            .status
            .parse::<AttendanceStatus>()
            .map_err(|e| DbError::Decode(format!("records.status: {e}")))?;

        Ok(AttendanceRecord {
            sequence: self.seq,
            student_id: StudentId::from(self.student_id),
            status,
            note: self.note,
            timestamp: self.recorded_at,
        })
    }
}
