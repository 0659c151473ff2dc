//! Due-date status relative to the start of the current day.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::models::Note;
use crate::util::parse_timestamp;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// How close a note's due date is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DueStatus {
    /// Due at least a full day before today's midnight
    Overdue,
    /// Due today
    Today,
    /// Due in `days` days
    Upcoming { days: i64 },
}

impl DueStatus {
    /// Due within the next three days.
    pub const fn is_soon(self) -> bool {
        matches!(self, Self::Upcoming { days } if days <= 3)
    }

    pub fn label(self) -> String {
        match self {
            Self::Overdue => "overdue".to_string(),
            Self::Today => "due today".to_string(),
            Self::Upcoming { days: 1 } => "due in 1 day".to_string(),
            Self::Upcoming { days } => format!("due in {days} days"),
        }
    }
}

/// Status of the note's due date as of the local clock.
pub fn due_status(note: &Note) -> Option<DueStatus> {
    due_status_at(note.due_date.as_deref()?, &Local::now())
}

/// Status of `due_date` relative to midnight of the day containing `now`.
///
/// The day count is the ceiling of the distance in days, so a due time later
/// today is one day away and a due time late yesterday still counts as today.
/// Returns `None` for unparseable dates.
pub fn due_status_at<Tz: TimeZone>(due_date: &str, now: &DateTime<Tz>) -> Option<DueStatus> {
    let due = parse_timestamp(due_date)?;
    let midnight = now
        .timezone()
        .from_local_datetime(&now.date_naive().and_hms_opt(0, 0, 0)?)
        .earliest()?;

    let diff_ms = due.timestamp_millis() - midnight.timestamp_millis();
    let days = ceil_div(diff_ms, DAY_MS);

    Some(match days {
        d if d < 0 => DueStatus::Overdue,
        0 => DueStatus::Today,
        days => DueStatus::Upcoming { days },
    })
}

const fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}
