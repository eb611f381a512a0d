//! Read-side view composition.
//!
//! A composed view joins one student's current row with their full
//! attendance history, newest record first. Composition is a pure read;
//! nothing here takes a transaction or writes.

use std::collections::HashMap;

use muster_db::{DbError, RecordStore, RosterStore};
use muster_types::{AttendanceRecord, StudentId, StudentView};
use sqlx::PgPool;

/// Joins students with their attendance histories.
pub struct ViewComposer<'a> {
    pool: &'a PgPool,
}

impl<'a> ViewComposer<'a> {
    /// Create a new composer bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Compose the view for one student, or `None` if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if either read fails.
    pub async fn compose(&self, id: StudentId) -> Result<Option<StudentView>, DbError> {
        let Some(student) = RosterStore::new(self.pool).get(id).await? else {
            return Ok(None);
        };
        let records = RecordStore::new(self.pool).list_for(id).await?;
        Ok(Some(StudentView { student, records }))
    }

    /// Compose the view for every student, newest registration first.
    ///
    /// Runs one query per table and groups records in memory, rather
    /// than one history query per student. Records arrive ordered by
    /// sequence descending, so each per-student group stays newest
    /// first after grouping.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if either read fails.
    pub async fn compose_all(&self) -> Result<Vec<StudentView>, DbError> {
        let students = RosterStore::new(self.pool).list_all().await?;
        let records = RecordStore::new(self.pool).list_all().await?;

        let mut by_student: HashMap<StudentId, Vec<AttendanceRecord>> =
            HashMap::with_capacity(students.len());
        for record in records {
            by_student.entry(record.student_id).or_default().push(record);
        }

        Ok(students
            .into_iter()
            .map(|student| {
                let records = by_student.remove(&student.id).unwrap_or_default();
                StudentView { student, records }
            })
            .collect())
    }
}
