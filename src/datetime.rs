//! Date/time utilities for groupdrive.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp for API responses (e.g. "2024-01-15T10:30:00.000Z").
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Milliseconds since the Unix epoch, used as the disk-name prefix.
pub fn epoch_millis(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_rfc3339() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(to_rfc3339(&dt), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_epoch_millis() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(epoch_millis(&dt), 1_705_314_600_000);
    }
}
