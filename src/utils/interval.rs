//! Human-readable rendering of time intervals.

const UNITS: [(u64, &str, &str); 7] = [
    (31_536_000, "year", "years"),
    (2_592_000, "month", "months"),
    (604_800, "week", "weeks"),
    (86_400, "day", "days"),
    (3_600, "hour", "hours"),
    (60, "min", "min"),
    (1, "sec", "sec"),
];

/// Formats a number of seconds as e.g. `"1 day"` or `"2 hours 30 min"`.
///
/// At most `granularity` adjacent units are emitted; once the first unit
/// has been printed, every following unit consumes granularity whether or
/// not it is printed, so `90061` seconds renders as `"1 day 1 hour"`.
pub fn format_interval(seconds: u64, granularity: usize) -> String {
    let mut remaining = seconds;
    let mut granularity = granularity;
    let mut parts: Vec<String> = Vec::new();

    for (size, singular, plural) in UNITS {
        if granularity == 0 {
            break;
        }

        if remaining >= size {
            let count = remaining / size;
            let unit = if count == 1 { singular } else { plural };
            parts.push(format!("{count} {unit}"));
            remaining %= size;
            granularity -= 1;
        } else if !parts.is_empty() {
            granularity -= 1;
        }
    }

    if parts.is_empty() {
        "0 sec".to_string()
    } else {
        parts.join(" ")
    }
}
