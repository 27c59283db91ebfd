//! RFC 3339 formatting and parsing for DMAP timestamps.
//!
//! DMAP times are whole seconds since the Unix epoch in UTC. Formatting
//! always emits `Z`; parsing accepts any offset and fractional seconds
//! (fractions are truncated).

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Error type for RFC 3339 parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    pub message: String,
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateTimeParseError {}

fn invalid(what: &str, input: &str) -> DateTimeParseError {
    DateTimeParseError {
        message: format!("Invalid {} in datetime: {}", what, input),
    }
}

/// Parses a timezone offset string (Z, +HH:MM, -HH:MM) and returns offset in minutes.
fn parse_timezone_offset(offset: &str, input: &str) -> Result<i64, DateTimeParseError> {
    if offset == "Z" || offset == "z" {
        return Ok(0);
    }
    let sign = match offset.as_bytes().first() {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => return Err(invalid("timezone offset", input)),
    };
    let rest = &offset[1..];
    if rest.len() != 5 || rest.as_bytes()[2] != b':' {
        return Err(invalid("timezone offset", input));
    }
    let hours: i64 = rest[..2].parse().map_err(|_| invalid("timezone offset", input))?;
    let minutes: i64 = rest[3..].parse().map_err(|_| invalid("timezone offset", input))?;
    if hours > 23 || minutes > 59 {
        return Err(invalid("timezone offset", input));
    }
    Ok(sign * (hours * 60 + minutes))
}

/// Returns true if the given year is a leap year.
fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Calculates days since Unix epoch for a given date (Howard Hinnant's algorithm).
fn date_to_days(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let m = if month <= 2 { month + 9 } else { month - 3 };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32; // year of era
    let doy = (153 * m + 2) / 5 + day - 1; // day of year
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era

    era * 146097 + doe as i64 - 719468
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: i64) -> (i64, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32; // day of era
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // year of era
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year
    let mp = (5 * doy + 2) / 153; // month index
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };

    let year = if m <= 2 { y + 1 } else { y };
    (year, m, d)
}

/// Formats seconds since the Unix epoch as an RFC 3339 UTC datetime.
pub fn format_timestamp_rfc3339(epoch_secs: i64) -> String {
    let days = epoch_secs.div_euclid(SECONDS_PER_DAY);
    let secs_of_day = epoch_secs.rem_euclid(SECONDS_PER_DAY);
    let (year, month, day) = days_to_date(days);

    let hours = secs_of_day / SECONDS_PER_HOUR;
    let minutes = (secs_of_day % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = secs_of_day % SECONDS_PER_MINUTE;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year, month, day, hours, minutes, seconds
    )
}

/// Parses an RFC 3339 datetime and returns seconds since the Unix epoch (UTC).
pub fn parse_timestamp_rfc3339(input: &str) -> Result<i64, DateTimeParseError> {
    // Minimum length is 20 (YYYY-MM-DDTHH:MM:SSZ)
    if input.len() < 20 || !input.is_ascii() {
        return Err(DateTimeParseError {
            message: format!("Invalid RFC 3339 datetime: {}", input),
        });
    }
    let bytes = input.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' || bytes[13] != b':' || bytes[16] != b':' {
        return Err(DateTimeParseError {
            message: format!("Invalid RFC 3339 datetime: {}", input),
        });
    }
    if !matches!(bytes[10], b'T' | b't' | b' ') {
        return Err(invalid("separator", input));
    }

    let year: i64 = input[..4].parse().map_err(|_| invalid("year", input))?;
    let month: u32 = input[5..7].parse().map_err(|_| invalid("month", input))?;
    let day: u32 = input[8..10].parse().map_err(|_| invalid("day", input))?;
    let hours: i64 = input[11..13].parse().map_err(|_| invalid("hours", input))?;
    let minutes: i64 = input[14..16].parse().map_err(|_| invalid("minutes", input))?;
    let seconds: i64 = input[17..19].parse().map_err(|_| invalid("seconds", input))?;

    if !(1..=12).contains(&month) {
        return Err(invalid("month", input));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(invalid("day", input));
    }
    if hours > 23 {
        return Err(invalid("hours", input));
    }
    if minutes > 59 {
        return Err(invalid("minutes", input));
    }
    if seconds > 59 {
        return Err(invalid("seconds", input));
    }

    // Skip fractional seconds, then read the offset
    let mut rest = &input[19..];
    if let Some(frac) = rest.strip_prefix('.') {
        let digits = frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
        if digits == 0 {
            return Err(invalid("fractional seconds", input));
        }
        rest = &frac[digits..];
    }
    let offset_min = parse_timezone_offset(rest, input)?;

    let local = date_to_days(year, month, day) * SECONDS_PER_DAY
        + hours * SECONDS_PER_HOUR
        + minutes * SECONDS_PER_MINUTE
        + seconds;

    // local time = UTC + offset
    Ok(local - offset_min * SECONDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_timestamp_rfc3339(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_timestamp_rfc3339(1_234_567_890), "2009-02-13T23:31:30Z");
        assert_eq!(format_timestamp_rfc3339(u32::MAX as i64), "2106-02-07T06:28:15Z");
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse_timestamp_rfc3339("1970-01-01T00:00:00Z").unwrap(), 0);
        assert_eq!(
            parse_timestamp_rfc3339("2009-02-13T23:31:30Z").unwrap(),
            1_234_567_890
        );
        assert_eq!(
            parse_timestamp_rfc3339("2009-02-13T23:31:30.999Z").unwrap(),
            1_234_567_890
        );
    }

    #[test]
    fn test_parse_with_offset() {
        // 05:30 ahead of UTC
        assert_eq!(
            parse_timestamp_rfc3339("2009-02-14T05:01:30+05:30").unwrap(),
            1_234_567_890
        );
        assert_eq!(
            parse_timestamp_rfc3339("2009-02-13T18:31:30-05:00").unwrap(),
            1_234_567_890
        );
    }

    #[test]
    fn test_parse_leap_day() {
        assert!(parse_timestamp_rfc3339("2000-02-29T00:00:00Z").is_ok());
        assert!(parse_timestamp_rfc3339("2001-02-29T00:00:00Z").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in [
            "",
            "2009-02-13",
            "2009-02-13X23:31:30Z",
            "2009-13-01T00:00:00Z",
            "2009-02-13T24:00:00Z",
            "2009-02-13T23:31:30",
            "2009-02-13T23:31:30+5:30",
            "2009-02-13T23:31:30.Z",
        ] {
            assert!(parse_timestamp_rfc3339(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_roundtrip() {
        for secs in [0i64, 86_399, 86_400, 951_782_400, 1_700_000_000] {
            let formatted = format_timestamp_rfc3339(secs);
            assert_eq!(parse_timestamp_rfc3339(&formatted).unwrap(), secs, "{}", formatted);
        }
    }
}
