//! Parsing of human-readable time-to-live strings such as `"1h"` or `"30m"`.

use chrono::Duration;

use crate::error::AppError;

/// Parses a TTL string into a duration.
///
/// Accepts a non-negative integer followed by an optional unit:
/// `s` (seconds), `m` (minutes), `h` (hours), `d` (days). A bare number is
/// read as hours.
pub fn parse_ttl(input: &str) -> Result<Duration, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("TTL must not be empty"));
    }

    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);

    let amount: i64 = digits
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid TTL amount in '{input}'")))?;

    let duration = match unit.trim() {
        "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "" | "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        other => {
            return Err(AppError::validation(format!(
                "Invalid TTL unit '{other}' in '{input}'. Expected one of: s, m, h, d"
            )));
        }
    };

    duration.ok_or_else(|| AppError::validation(format!("TTL '{input}' is out of range")))
}
