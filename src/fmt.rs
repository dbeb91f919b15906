//! Shared formatting helpers for table cells and info panels.
//!
//! All pure formatting functions (no ratatui styles, no UI layout) live here.

use chrono::{DateTime, Local};

// ---------------------------------------------------------------------------
// Sizes and rates
// ---------------------------------------------------------------------------

const SIZE_SUFFIXES: [&str; 5] = ["B", "K", "M", "G", "T"];

/// Format byte count with decimal (1000-based) units.
///
/// `"512B"`, `"1.50K"`, `"12.35M"`, `"3.00G"`
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit + 1 < SIZE_SUFFIXES.len() {
        value /= 1000.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{}B", bytes)
    } else {
        format!("{:.2}{}", value, SIZE_SUFFIXES[unit])
    }
}

/// Format a bytes-per-second rate.
///
/// Negative rates (counter regression) keep their sign.
pub fn format_bytes_rate(rate: f64) -> String {
    if !rate.is_finite() {
        return "0B/s".to_string();
    }
    let sign = if rate < 0.0 { "-" } else { "" };
    let abs = rate.abs();
    if abs < 1.0 {
        return "0B/s".to_string();
    }
    format!("{}{}/s", sign, format_bytes(abs.round() as u64))
}

/// Format a percentage with one decimal.
pub fn format_percent(pct: f64) -> String {
    if !pct.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", pct)
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Format seconds as `HH:MM:SS`, prefixed by `Nd:` once a day has passed.
///
/// `"00:00:00"`, `"01:02:03"`, `"2d:03:04:05"`
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    if days > 0 {
        format!("{}d:{:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Format a local wall-clock time for the overview panel.
pub fn format_clock(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a clock frequency given in MHz.
pub fn format_mhz(mhz: f64) -> String {
    if mhz >= 1000.0 {
        format!("{:.2} GHz", mhz / 1000.0)
    } else {
        format!("{:.0} MHz", mhz)
    }
}

/// Truncates a string to `max` characters, marking the cut with `~`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('~');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(999), "999B");
        assert_eq!(format_bytes(1_500), "1.50K");
        assert_eq!(format_bytes(12_345_678), "12.35M");
        assert_eq!(format_bytes(3_000_000_000), "3.00G");
        assert_eq!(format_bytes(2_000_000_000_000), "2.00T");
        // stays in T beyond the last suffix
        assert_eq!(format_bytes(5_000_000_000_000_000), "5000.00T");
    }

    #[test]
    fn test_format_bytes_rate() {
        assert_eq!(format_bytes_rate(0.0), "0B/s");
        assert_eq!(format_bytes_rate(0.4), "0B/s");
        assert_eq!(format_bytes_rate(2_048.0), "2.05K/s");
        assert_eq!(format_bytes_rate(-2_048.0), "-2.05K/s");
        assert_eq!(format_bytes_rate(f64::NAN), "0B/s");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(99.95), "100.0%");
        assert_eq!(format_percent(-12.34), "-12.3%");
        assert_eq!(format_percent(f64::INFINITY), "0.0%");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "00:00:00");
        assert_eq!(format_uptime(3_723), "01:02:03");
        assert_eq!(format_uptime(86_399), "23:59:59");
        assert_eq!(format_uptime(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5), "2d:03:04:05");
    }

    #[test]
    fn test_format_clock() {
        let t = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).single().unwrap();
        assert_eq!(format_clock(t), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_format_mhz() {
        assert_eq!(format_mhz(800.0), "800 MHz");
        assert_eq!(format_mhz(3_600.0), "3.60 GHz");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("firefox", 10), "firefox");
        assert_eq!(truncate("firefox-bin", 8), "firefox~");
        assert_eq!(truncate("abc", 0), "");
    }
}
