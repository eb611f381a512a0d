//! Error types for the status engine.

use muster_db::DbError;
use muster_types::StudentId;

/// Errors that can occur while applying engine operations.
///
/// Every variant leaves the roster and its history consistent: a failed
/// operation either changed nothing, or (for [`EngineError::Bulk`]) fully
/// applied a prefix of per-student transitions that each changed both
/// tables together.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A required field was missing or empty.
    #[error("{0}")]
    InvalidInput(String),

    /// A student with this id is already registered.
    #[error("student {0} is already registered")]
    DuplicateKey(StudentId),

    /// No student with this id exists.
    #[error("student {0} not found")]
    NotFound(StudentId),

    /// The data layer failed.
    #[error("storage error: {0}")]
    Storage(#[from] DbError),

    /// A bulk transition stopped partway through the roster.
    ///
    /// The first `completed` students were fully transitioned and remain
    /// so; the failing student and everyone after it were not touched.
    #[error("bulk transition failed after {completed} of {total} students: {source}")]
    Bulk {
        /// Students fully transitioned before the failure.
        completed: usize,
        /// Students in the snapshot the bulk operation iterated.
        total: usize,
        /// The error that stopped the iteration.
        source: Box<EngineError>,
    },
}
