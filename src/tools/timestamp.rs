/// Seconds offset of a frame at the given framerate.
#[must_use]
pub fn frame_to_seconds(frame: i64, framerate: u32) -> f64 {
    frame as f64 / f64::from(framerate)
}

/// Format a frame offset as `M:SS.mmm` for the concat script, e.g. frame
/// 2715 at 30fps is `1:30.500`. Minutes are not padded, seconds are.
#[must_use]
pub fn format_timestamp(frame: i64, framerate: u32) -> String {
    let t = frame_to_seconds(frame, framerate);
    let minutes = (t / 60.0).floor();
    let seconds = t - minutes * 60.0;
    format!("{minutes:.0}:{seconds:06.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_timestamp(ts: &str) -> f64 {
        let (minutes, seconds) = ts.split_once(':').unwrap();
        minutes.parse::<f64>().unwrap() * 60.0 + seconds.parse::<f64>().unwrap()
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_timestamp(0, 30), "0:00.000");
    }

    #[test]
    fn test_format_whole_seconds() {
        assert_eq!(format_timestamp(30, 30), "0:01.000");
        assert_eq!(format_timestamp(1800, 30), "1:00.000");
    }

    #[test]
    fn test_format_fractional() {
        assert_eq!(format_timestamp(2715, 30), "1:30.500");
        assert_eq!(format_timestamp(1, 30), "0:00.033");
    }

    #[test]
    fn test_round_trip_within_one_millisecond() {
        for framerate in [24u32, 25, 30, 60] {
            for frame in [0i64, 1, 7, 29, 30, 59, 1799, 1800, 1801, 123_456] {
                let formatted = format_timestamp(frame, framerate);
                let parsed = parse_timestamp(&formatted);
                let expected = frame_to_seconds(frame, framerate);
                assert!(
                    (parsed - expected).abs() <= 0.001,
                    "{formatted} parses to {parsed}, expected {expected}"
                );
            }
        }
    }
}
