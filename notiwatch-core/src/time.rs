//! Clock readout and relative timestamps
//!
//! All times are Unix seconds interpreted as UTC.

use core::fmt::Write;

use heapless::String;

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 3_600;
const SECS_PER_DAY: u32 = 86_400;

/// Shown when the clock has not been set
pub const UNSET_CLOCK: &str = "--:--";

/// Longest output of [`format_relative`] ("yesterday", "23h ago", ...)
pub const RELATIVE_LEN: usize = 16;

/// Format `timestamp` as "HH:MM", or "--:--" when there is no time
pub fn format_hhmm(timestamp: Option<u32>) -> String<8> {
    let mut out = String::new();
    match timestamp {
        Some(ts) => {
            let secs_of_day = ts % SECS_PER_DAY;
            let _ = write!(
                out,
                "{:02}:{:02}",
                secs_of_day / SECS_PER_HOUR,
                (secs_of_day % SECS_PER_HOUR) / SECS_PER_MINUTE
            );
        }
        None => {
            let _ = out.push_str(UNSET_CLOCK);
        }
    }
    out
}

/// Describe how long ago `timestamp` was relative to `now`
///
/// Returns "unknown" when the clock is unset or the timestamp is zero.
/// Timestamps in the future read as "now".
pub fn format_relative(now: Option<u32>, timestamp: u32) -> String<RELATIVE_LEN> {
    let mut out = String::new();

    let Some(now) = now.filter(|_| timestamp != 0) else {
        let _ = out.push_str("unknown");
        return out;
    };

    let diff = now.saturating_sub(timestamp);
    let _ = if diff < 10 {
        out.push_str("now").map_err(|_| core::fmt::Error)
    } else if diff < SECS_PER_MINUTE {
        write!(out, "{}s ago", diff)
    } else if diff < SECS_PER_HOUR {
        write!(out, "{}m ago", diff / SECS_PER_MINUTE)
    } else if diff < SECS_PER_DAY {
        write!(out, "{}h ago", diff / SECS_PER_HOUR)
    } else if diff / SECS_PER_DAY == 1 {
        out.push_str("yesterday").map_err(|_| core::fmt::Error)
    } else if diff < 7 * SECS_PER_DAY {
        write!(out, "{}d ago", diff / SECS_PER_DAY)
    } else {
        let (_, month, day) = civil_from_days(timestamp / SECS_PER_DAY);
        write!(out, "{:02}/{:02}", day, month)
    };
    out
}

/// Convert days since 1970-01-01 into (year, month, day)
pub fn civil_from_days(days: u32) -> (u32, u32, u32) {
    // Shift the epoch to 0000-03-01 so leap days fall at the end of a year
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u32::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-15 14:07:00 UTC
    const NOW: u32 = 1_710_511_620;

    #[test]
    fn test_hhmm() {
        assert_eq!(format_hhmm(Some(NOW)).as_str(), "14:07");
        assert_eq!(format_hhmm(Some(0)).as_str(), "00:00");
        assert_eq!(format_hhmm(None).as_str(), "--:--");
    }

    #[test]
    fn test_relative_buckets() {
        let rel = |ago: u32| format_relative(Some(NOW), NOW - ago);
        assert_eq!(rel(0).as_str(), "now");
        assert_eq!(rel(9).as_str(), "now");
        assert_eq!(rel(10).as_str(), "10s ago");
        assert_eq!(rel(59).as_str(), "59s ago");
        assert_eq!(rel(60).as_str(), "1m ago");
        assert_eq!(rel(3_599).as_str(), "59m ago");
        assert_eq!(rel(3_600).as_str(), "1h ago");
        assert_eq!(rel(86_399).as_str(), "23h ago");
        assert_eq!(rel(86_400).as_str(), "yesterday");
        assert_eq!(rel(2 * 86_400 - 1).as_str(), "yesterday");
        assert_eq!(rel(2 * 86_400).as_str(), "2d ago");
        assert_eq!(rel(6 * 86_400).as_str(), "6d ago");
    }

    #[test]
    fn test_relative_old_shows_date() {
        // Eight days before NOW is 2024-03-07
        let ts = NOW - 8 * 86_400;
        assert_eq!(format_relative(Some(NOW), ts).as_str(), "07/03");
    }

    #[test]
    fn test_relative_future_is_now() {
        assert_eq!(format_relative(Some(NOW), NOW + 500).as_str(), "now");
    }

    #[test]
    fn test_relative_unknown() {
        assert_eq!(format_relative(None, NOW).as_str(), "unknown");
        assert_eq!(format_relative(Some(NOW), 0).as_str(), "unknown");
    }

    #[test]
    fn test_civil_dates() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        // 2000-02-29
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(NOW / 86_400), (2024, 3, 15));
    }
}
