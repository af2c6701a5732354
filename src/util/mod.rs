//! Small utility helpers for subprocess execution and time formatting.

pub mod command;

/// What: Format the current local time for log lines.
///
/// Output:
/// - Returns `YYYY-MM-DDTHH:MM:SS` in the local timezone.
///
/// Details:
/// - Second precision only; the log is read by humans, not parsed.
#[must_use]
pub fn log_timestamp() -> String {
    format_timestamp(&chrono::Local::now())
}

/// Format any `chrono` date-time the way [`log_timestamp`] does.
#[must_use]
pub fn format_timestamp<Tz: chrono::TimeZone>(when: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    when.format("%Y-%m-%dT%H:%M:%S").to_string()
}
