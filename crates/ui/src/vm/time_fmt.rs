use chrono::Duration;

#[must_use]
pub fn format_seconds_left(seconds: u32) -> String {
    if seconds == 1 {
        "1 second left".to_string()
    } else {
        format!("{seconds} seconds left")
    }
}

/// `2m 05s`, or just `42s` under a minute.
#[must_use]
pub fn format_duration(value: Duration) -> String {
    let total = value.num_seconds().max(0);
    let minutes = total / 60;
    let seconds = total % 60;
    if minutes == 0 {
        format!("{seconds}s")
    } else {
        format!("{minutes}m {seconds:02}s")
    }
}
