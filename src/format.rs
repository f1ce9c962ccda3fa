/// Format a position for the time label.
///
/// Hours are omitted when zero and only the seconds are zero-padded:
/// `65.0` -> `"1:05"`, `3661.0` -> `"1:1:01"`.
pub fn format_time(seconds: f64) -> String {
    let total_seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_and_padded_seconds() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(599.0), "9:59");
    }

    #[test]
    fn hours_branch() {
        assert_eq!(format_time(3661.0), "1:1:01");
        assert_eq!(format_time(7325.0), "2:2:05");
        assert_eq!(format_time(3600.0), "1:0:00");
    }

    #[test]
    fn rounds_to_nearest_second() {
        assert_eq!(format_time(64.6), "1:05");
        assert_eq!(format_time(64.4), "1:04");
    }

    #[test]
    fn unknown_values_show_zero() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }
}
