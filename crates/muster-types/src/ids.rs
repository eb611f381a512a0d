//! Strongly typed identifiers.
//!
//! Wrapping the raw [`Uuid`] in a newtype keeps the compiler between a
//! student id and any other UUID that may show up later. Identifiers are
//! generated as UUID version 7 so freshly registered students sort roughly
//! by creation time even before the database assigns an ordering sequence.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a student on the roster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct StudentId(
    /// The underlying UUID value.
    pub Uuid,
);

impl StudentId {
    /// Generates a new time-ordered identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for StudentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<StudentId> for Uuid {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = StudentId::new();
        let b = StudentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = StudentId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
    }

    #[test]
    fn serializes_as_plain_uuid_string() {
        let id = StudentId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{id}\""));
    }
}
