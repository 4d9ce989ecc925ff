//! Attendance outcomes.

use std::fmt;
use std::str::FromStr;

use crate::error::RollcallError;

/// Outcome recorded for one member at one event.
///
/// The label doubles as the Notion property name, both on event pages
/// (people properties) and on attendance sheets (number properties).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttendanceStatus {
    Attended,
    Late,
    ApprovedAbsence,
    ExcusedAbsence,
    UnexcusedAbsence,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 5] = [
        AttendanceStatus::Attended,
        AttendanceStatus::Late,
        AttendanceStatus::ApprovedAbsence,
        AttendanceStatus::ExcusedAbsence,
        AttendanceStatus::UnexcusedAbsence,
    ];

    /// Outcomes marked explicitly on event pages. Unexcused absence is
    /// whatever is left over.
    pub const TRACKED: [AttendanceStatus; 4] = [
        AttendanceStatus::Attended,
        AttendanceStatus::Late,
        AttendanceStatus::ApprovedAbsence,
        AttendanceStatus::ExcusedAbsence,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Attended => "Attended",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::ApprovedAbsence => "Approved Absence",
            AttendanceStatus::ExcusedAbsence => "Excused Absence",
            AttendanceStatus::UnexcusedAbsence => "Unexcused Absence",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AttendanceStatus {
    type Err = RollcallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttendanceStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| RollcallError::UnknownStatus(s.to_string()))
    }
}
