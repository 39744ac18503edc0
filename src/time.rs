//! Formatting of durations and times for display.
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Format `duration` compactly, like `1.2s`, `42s`, `03:12` or `01:00:05`.
///
/// Tenths of seconds are only shown for durations below 10 seconds and if `show_decimals` is true.
pub fn format_duration(duration: Duration, show_decimals: bool) -> String {
    if duration < Duration::from_secs(10) && show_decimals {
        return format!("{:.1}s", duration.as_millis() as f64 / 1000.0);
    }
    let total = duration.as_secs();
    let seconds = total % SECONDS_PER_MINUTE;
    if total < SECONDS_PER_MINUTE {
        return format!("{}s", seconds);
    }
    let minutes = (total / SECONDS_PER_MINUTE) % 60;
    if total < SECONDS_PER_HOUR {
        return format!("{:02}:{:02}", minutes, seconds);
    }
    format!("{:02}:{:02}:{:02}", total / SECONDS_PER_HOUR, minutes, seconds)
}

#[cfg(feature = "render-simple")]
mod utc {
    use std::time::SystemTime;

    const DATE_TIME_HMS: usize = "00:51:45".len();
    const DATE_TIME_YMD: usize = "2020-02-13T".len();

    /// Format the time of day of `time` in UTC, like `00:51:45`.
    pub fn format_time_for_messages(time: SystemTime) -> String {
        String::from_utf8_lossy(
            &humantime::format_rfc3339_seconds(time).to_string().as_bytes()
                [DATE_TIME_YMD..DATE_TIME_YMD + DATE_TIME_HMS],
        )
        .into_owned()
    }
}

#[cfg(feature = "render-simple")]
pub use utc::format_time_for_messages;
