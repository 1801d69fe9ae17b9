//! Human-readable renderings shared by every formatter.

/// Placeholder for a value the upstream did not report.
pub const NOT_AVAILABLE: &str = "N/A";

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const STEP: f64 = 1024.0;

/// Renders a byte count to two decimals in the largest 1024-based unit whose
/// printed value stays below 1024. Zero is `"0 B"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", BYTE_UNITS[0]);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    // Compare the value as printed so 1023.999 KB becomes 1.00 MB.
    while rounded_to_cents(value) >= STEP && unit < BYTE_UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }
    format!("{:.2} {}", value, BYTE_UNITS[unit])
}

fn rounded_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `"<used> / <total>"`, each side formatted independently.
pub fn format_byte_pair(used: u64, total: u64) -> String {
    format!("{} / {}", format_bytes(used), format_bytes(total))
}

/// Renders seconds as days, hours and minutes, skipping zero units.
/// Seconds are dropped; anything under a minute is `"0m"`.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
        .into_iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, suffix)| format!("{}{}", amount, suffix))
        .collect();

    if parts.is_empty() {
        "0m".to_string()
    } else {
        parts.join(" ")
    }
}

/// Renders a usage fraction as a percentage with one decimal. The fraction
/// is clamped to [0, 1] first; absent values render as [`NOT_AVAILABLE`].
pub fn format_fraction(fraction: Option<f64>) -> String {
    match fraction.filter(|f| f.is_finite()) {
        Some(f) => format!("{:.1}%", f.clamp(0.0, 1.0) * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `used / total * 100` rounded to one decimal, or `None` when the total is zero.
pub fn usage_percent(used: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let percent = used as f64 / total as f64 * 100.0;
    Some((percent * 10.0).round() / 10.0)
}
