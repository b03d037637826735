//! Station-id parsing and range arithmetic.
//!
//! Station ids are stored as short text columns because historical data
//! contains non-numeric ids. Range checks only apply when both ends parse
//! as integers; anything else passes through unchecked.

/// Maximum length of a station id.
pub const MAX_STATION_ID_LENGTH: usize = 5;

/// Parse a station id into its numeric form, if it has one.
pub fn parse_station_number(id: &str) -> Option<i32> {
    id.trim().parse::<i32>().ok()
}

/// Validate a station id for storage: non-empty and within length limits.
pub fn validate_station_id(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("Station id cannot be empty".to_string());
    }
    if id.len() > MAX_STATION_ID_LENGTH {
        return Err(format!(
            "Station id exceeds maximum length of {MAX_STATION_ID_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Whether `number` falls within the inclusive `[start, end]` station range.
///
/// Returns `false` if either bound is non-numeric.
pub fn range_contains(start: &str, end: &str, number: i32) -> bool {
    match (parse_station_number(start), parse_station_number(end)) {
        (Some(lo), Some(hi)) => lo <= number && number <= hi,
        _ => false,
    }
}

/// Check that an outing's station sub-range lies within its line's range.
///
/// The check only applies when all four ids parse numerically; historical
/// non-numeric ids are accepted as-is. Returns a human-readable reason on
/// violation.
pub fn sub_range_within(
    line_start: &str,
    line_end: &str,
    sub_start: Option<&str>,
    sub_end: Option<&str>,
) -> Result<(), String> {
    let (line_lo, line_hi) = match (
        parse_station_number(line_start),
        parse_station_number(line_end),
    ) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Ok(()),
    };

    for station in [sub_start, sub_end].into_iter().flatten() {
        if let Some(n) = parse_station_number(station) {
            if n < line_lo || n > line_hi {
                return Err(format!(
                    "Station {n} is outside the line's range {line_lo}-{line_hi}"
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_station_number("12"), Some(12));
        assert_eq!(parse_station_number(" 7 "), Some(7));
        assert_eq!(parse_station_number("A3"), None);
        assert_eq!(parse_station_number(""), None);
    }

    #[test]
    fn validates_length() {
        assert!(validate_station_id("12345").is_ok());
        assert!(validate_station_id("123456").is_err());
        assert!(validate_station_id("").is_err());
    }

    #[test]
    fn range_containment() {
        assert!(range_contains("1", "20", 12));
        assert!(range_contains("1", "20", 1));
        assert!(range_contains("1", "20", 20));
        assert!(!range_contains("1", "20", 21));
        assert!(!range_contains("A", "20", 5));
    }

    #[test]
    fn sub_range_inside_accepted() {
        assert!(sub_range_within("1", "30", Some("5"), Some("10")).is_ok());
    }

    #[test]
    fn sub_range_outside_rejected() {
        let err = sub_range_within("1", "30", Some("5"), Some("31")).unwrap_err();
        assert!(err.contains("31"));
    }

    #[test]
    fn non_numeric_line_range_skips_check() {
        assert!(sub_range_within("A1", "B9", Some("99"), None).is_ok());
    }

    #[test]
    fn non_numeric_sub_station_skips_check() {
        assert!(sub_range_within("1", "30", Some("X"), None).is_ok());
    }

    #[test]
    fn missing_sub_range_accepted() {
        assert!(sub_range_within("1", "30", None, None).is_ok());
    }
}
