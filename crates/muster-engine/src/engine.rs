//! The status engine: the only writer of the roster and its history.
//!
//! Every mutation follows the same shape. Validate first, then open one
//! transaction, write the student row, append the matching record, and
//! commit. The roster row and its newest record can therefore never
//! disagree: a reader either sees both effects of an operation or
//! neither.
//!
//! Concurrent transitions for the same student serialize on the row
//! lock taken by the status UPDATE, and record sequence numbers are
//! assigned while that lock is held. Whichever transition commits last
//! determines both the current status and the highest-sequence record,
//! so the two stay matched under any interleaving.

use chrono::{DateTime, Utc};
use muster_db::{DbError, RecordStore, RosterStore};
use muster_types::{AttendanceStatus, Student, StudentId, StudentView};
use sqlx::PgPool;

use crate::error::EngineError;
use crate::view::ViewComposer;

/// Note attached to the record created at registration.
pub const FOUNDING_NOTE: &str = "Added to roster";

/// Applies attendance operations against the database.
///
/// Cheap to clone; the wrapped pool is reference-counted.
#[derive(Clone)]
pub struct AttendanceEngine {
    pool: PgPool,
}

impl AttendanceEngine {
    /// Create an engine on top of a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return a reference to the underlying pool.
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Register a new student.
    ///
    /// The student starts as [`AttendanceStatus::Present`] with one
    /// founding record ([`FOUNDING_NOTE`]). Row insert and record append
    /// commit together. Name and category are stored trimmed.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidInput`] if `name` or `category` is empty
    ///   after trimming; nothing is written.
    /// - [`EngineError::DuplicateKey`] if `id` is already registered.
    /// - [`EngineError::Storage`] if the database fails.
    pub async fn register(
        &self,
        id: StudentId,
        name: &str,
        category: &str,
    ) -> Result<StudentView, EngineError> {
        let name = name.trim();
        let category = category.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(String::from(
                "name must not be empty",
            )));
        }
        if category.is_empty() {
            return Err(EngineError::InvalidInput(String::from(
                "category must not be empty",
            )));
        }

        let now = Utc::now();
        let student = Student {
            id,
            name: name.to_owned(),
            category: category.to_owned(),
            status: AttendanceStatus::Present,
            last_updated: Some(now),
        };

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        match RosterStore::insert(&mut tx, &student).await {
            Ok(()) => {}
            Err(e) if e.is_unique_violation() => return Err(EngineError::DuplicateKey(id)),
            Err(e) => return Err(e.into()),
        }
        RecordStore::append(&mut tx, id, AttendanceStatus::Present, FOUNDING_NOTE, now).await?;
        tx.commit().await.map_err(DbError::from)?;

        tracing::info!(student_id = %id, name, "Registered student");

        self.view(id).await
    }

    /// Move one student to a new status, recording `note` in the history.
    ///
    /// The status update and the record append commit together. The note
    /// is stored trimmed.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidInput`] if `note` is empty after trimming;
    ///   nothing is written.
    /// - [`EngineError::NotFound`] if no such student exists; no record
    ///   is appended.
    /// - [`EngineError::Storage`] if the database fails.
    pub async fn transition(
        &self,
        id: StudentId,
        status: AttendanceStatus,
        note: &str,
    ) -> Result<StudentView, EngineError> {
        let note = note.trim();
        if note.is_empty() {
            return Err(EngineError::InvalidInput(String::from(
                "note must not be empty",
            )));
        }

        self.apply(id, status, note, Utc::now()).await?;
        self.view(id).await
    }

    /// Move every student to `status` in one sweep.
    ///
    /// Takes a snapshot of the roster ids, then applies one transition
    /// per student with a generated note and a single shared timestamp.
    /// Each transition is its own transaction; the sweep as a whole is
    /// not one. Students registered while the sweep runs may or may not
    /// be included. Returns the composed view of the whole roster.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Bulk`] if any per-student transition
    /// fails. Transitions already committed stay committed; the failing
    /// student and everyone after it in the snapshot are untouched.
    pub async fn bulk_transition(
        &self,
        status: AttendanceStatus,
    ) -> Result<Vec<StudentView>, EngineError> {
        let now = Utc::now();
        let note = format!("Bulk update: marked {status}");

        let ids = RosterStore::new(&self.pool).list_ids().await?;
        let total = ids.len();

        for (completed, id) in ids.into_iter().enumerate() {
            if let Err(source) = self.apply(id, status, &note, now).await {
                return Err(EngineError::Bulk {
                    completed,
                    total,
                    source: Box::new(source),
                });
            }
        }

        tracing::info!(students = total, status = %status, "Applied bulk transition");

        self.roster().await
    }

    /// Compose the view for one student.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no such student exists, or
    /// [`EngineError::Storage`] if the read fails.
    pub async fn view(&self, id: StudentId) -> Result<StudentView, EngineError> {
        ViewComposer::new(&self.pool)
            .compose(id)
            .await?
            .ok_or(EngineError::NotFound(id))
    }

    /// Compose the view for every student, newest registration first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the read fails.
    pub async fn roster(&self) -> Result<Vec<StudentView>, EngineError> {
        Ok(ViewComposer::new(&self.pool).compose_all().await?)
    }

    /// One atomic transition: status update plus record append.
    async fn apply(
        &self,
        id: StudentId,
        status: AttendanceStatus,
        note: &str,
        at: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let found = RosterStore::set_status(&mut tx, id, status, at).await?;
        if !found {
            return Err(EngineError::NotFound(id));
        }
        RecordStore::append(&mut tx, id, status, note, at).await?;
        tx.commit().await.map_err(DbError::from)?;

        tracing::debug!(student_id = %id, status = %status, "Applied status transition");
        Ok(())
    }
}
