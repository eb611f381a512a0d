//! The closed set of attendance states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error returned when a string does not name a known attendance status.
///
/// The offending token is carried in the message so callers can surface
/// it verbatim to the client that sent it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status: {0}")]
pub struct ParseStatusError(String);

impl ParseStatusError {
    /// Returns the token that failed to parse.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// Attendance state of a student.
///
/// The set is closed -- there is no free-form status. Every value has a
/// canonical lowercase token used both on the wire and in the database,
/// so a round trip through either never changes the value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Checked in and accounted for.
    Present,
    /// Arrived after roll call.
    Late,
    /// Absent without notice.
    Unexcused,
    /// Absent with a recognized excuse.
    Excused,
}

impl AttendanceStatus {
    /// Every status, in the order the roster UI presents them.
    pub const ALL: [Self; 4] = [Self::Present, Self::Late, Self::Unexcused, Self::Excused];

    /// Canonical lowercase token for wire and database encoding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Late => "late",
            Self::Unexcused => "unexcused",
            Self::Excused => "excused",
        }
    }

    /// Capitalized label for human-facing display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Late => "Late",
            Self::Unexcused => "Unexcused",
            Self::Excused => "Excused",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "late" => Ok(Self::Late),
            "unexcused" => Ok(Self::Unexcused),
            "excused" => Ok(Self::Excused),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_through_from_str() {
        for status in AttendanceStatus::ALL {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
    }

    #[test]
    fn serde_uses_lowercase_tokens() {
        let json = serde_json::to_string(&AttendanceStatus::Unexcused).unwrap_or_default();
        assert_eq!(json, "\"unexcused\"");
        let back: Result<AttendanceStatus, _> = serde_json::from_str("\"late\"");
        assert_eq!(back.ok(), Some(AttendanceStatus::Late));
    }

    #[test]
    fn unknown_token_is_rejected_with_the_token_in_the_message() {
        let err = "tardy".parse::<AttendanceStatus>();
        assert_eq!(
            err.err().map(|e| e.to_string()),
            Some("invalid status: tardy".to_owned())
        );
    }

    #[test]
    fn case_sensitive_parsing() {
        assert!("Present".parse::<AttendanceStatus>().is_err());
        assert!("PRESENT".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn labels_are_capitalized_tokens() {
        for status in AttendanceStatus::ALL {
            let label = status.label();
            assert!(label.eq_ignore_ascii_case(status.as_str()));
            assert!(label.starts_with(char::is_uppercase));
        }
    }
}
