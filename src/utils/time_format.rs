use chrono::Timelike;

/// Renders a time of day as a log-line prefix of the form `[HH:MM:SS.mmm]: `.
///
/// Milliseconds are truncated from the sub-second part. During a leap second
/// chrono reports nanoseconds past 1e9; those are folded back into 0..=999.
pub fn format_console_date<T: Timelike>(time: &T) -> String {
    let millis = (time.nanosecond() % 1_000_000_000) / 1_000_000;

    format!(
        "[{:02}:{:02}:{:02}.{:03}]: ",
        time.hour(),
        time.minute(),
        time.second(),
        millis
    )
}
