//! Human-readable formatting for elapsed wall-clock time.

/// Formats a non-negative millisecond duration for humans.
///
/// Seconds are always shown to millisecond precision (3 decimals, zero
/// padded). The shape grows with magnitude:
///
/// - at least one hour: `H:MM:SS.sss` (hours unpadded)
/// - at least one minute: `M:SS.sss` (minutes unpadded)
/// - below one minute: `S.sss` (no padding)
///
/// # Examples
///
/// ```
/// use raffaello_core::format_elapsed;
///
/// assert_eq!(format_elapsed(0.0), "0.000");
/// assert_eq!(format_elapsed(61_000.0), "1:01.000");
/// assert_eq!(format_elapsed(3_661_000.0), "1:01:01.000");
/// ```
pub fn format_elapsed(ms: f64) -> String {
    let total_secs = ms / 1000.0;

    if total_secs >= 3600.0 {
        let hours = (total_secs / 3600.0).floor() as u64;
        let minutes = ((total_secs % 3600.0) / 60.0).floor() as u64;
        let seconds = total_secs % 60.0;
        format!("{}:{:02}:{:06.3}", hours, minutes, seconds)
    } else if total_secs >= 60.0 {
        let minutes = (total_secs / 60.0).floor() as u64;
        let seconds = total_secs % 60.0;
        format!("{}:{:06.3}", minutes, seconds)
    } else {
        format!("{:.3}", total_secs)
    }
}
