use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// `m:ss` under an hour, `h:mm:ss` beyond.
#[must_use]
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let remainder = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{remainder:02}")
    } else {
        format!("{minutes}:{remainder:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::time::fixed_now;

    #[test]
    fn elapsed_formats_minutes_and_hours() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(3_725), "1:02:05");
        assert_eq!(format_elapsed(-4), "0:00");
    }

    #[test]
    fn datetime_is_minute_precision() {
        assert_eq!(format_datetime(fixed_now()), "2023-11-14 22:13 UTC");
    }
}
