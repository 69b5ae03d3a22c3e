//! Human readable durations

use std::time::Duration;

/// Format a duration as `3h 35m 12s`, dropping zero parts
///
/// Sub-second durations are shown in milliseconds.
pub fn humanize(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        let millis = duration.subsec_millis();
        return if millis > 0 { format!("{}ms", millis) } else { "0s".to_string() };
    }

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let parts: Vec<String> = [(hours, "h"), (minutes, "m"), (seconds, "s")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();
    parts.join(" ")
}
