//! Core data structures shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::StudentId;
use crate::status::AttendanceStatus;

/// A student on the roster together with their current attendance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier assigned at registration.
    pub id: StudentId,
    /// Display name. Never empty once registered.
    pub name: String,
    /// Free-form grouping label, e.g. a class or cohort name.
    pub category: String,
    /// Current attendance state.
    pub status: AttendanceStatus,
    /// When the status last changed. `None` only for rows that predate
    /// timestamp tracking; every write sets it.
    pub last_updated: Option<DateTime<Utc>>,
}

/// One immutable entry in a student's attendance history.
///
/// Records are append-only. The `sequence` is assigned by the database in
/// insertion order and is never reused, so sorting by it reconstructs the
/// exact order in which changes were applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Global insertion-order sequence number.
    pub sequence: i64,
    /// The student this record belongs to.
    pub student_id: StudentId,
    /// Status the student was moved to.
    pub status: AttendanceStatus,
    /// Context supplied with the change, e.g. "Added to roster".
    pub note: String,
    /// When the change was recorded.
    pub timestamp: DateTime<Utc>,
}

/// A student joined with their complete attendance history.
///
/// This is the read-side shape the API serves: the student's own fields
/// are flattened to the top level and the history rides along under
/// `records`, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    /// The student's current state.
    #[serde(flatten)]
    pub student: Student,
    /// Full attendance history, newest first.
    pub records: Vec<AttendanceRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        Student {
            id: StudentId::new(),
            name: "Ada Lovelace".to_owned(),
            category: "Analytical Engines".to_owned(),
            status: AttendanceStatus::Present,
            last_updated: Some(Utc::now()),
        }
    }

    #[test]
    fn student_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample_student()).unwrap_or_default();
        assert!(value.get("lastUpdated").is_some());
        assert!(value.get("last_updated").is_none());
        assert_eq!(
            value.get("status").and_then(serde_json::Value::as_str),
            Some("present")
        );
    }

    #[test]
    fn view_flattens_student_fields_to_the_top_level() {
        let student = sample_student();
        let view = StudentView {
            student: student.clone(),
            records: vec![AttendanceRecord {
                sequence: 1,
                student_id: student.id,
                status: AttendanceStatus::Present,
                note: "Added to roster".to_owned(),
                timestamp: Utc::now(),
            }],
        };
        let value = serde_json::to_value(&view).unwrap_or_default();
        assert_eq!(
            value.get("name").and_then(serde_json::Value::as_str),
            Some("Ada Lovelace")
        );
        assert!(value.get("student").is_none());
        assert_eq!(
            value
                .get("records")
                .and_then(serde_json::Value::as_array)
                .map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn missing_last_updated_round_trips_as_null() {
        let mut student = sample_student();
        student.last_updated = None;
        let value = serde_json::to_value(&student).unwrap_or_default();
        assert!(value.get("lastUpdated").is_some_and(serde_json::Value::is_null));
        let back: Result<Student, _> = serde_json::from_value(value);
        assert_eq!(back.ok().map(|s| s.last_updated), Some(None));
    }
}
