//! Resolves the configured canonical timezone name to today's local date.

use time::{Date, OffsetDateTime};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get today's date in the timezone `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// known canonical timezone name.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let now = OffsetDateTime::now_utc();

    let offset = time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&now).to_utc())
        .ok_or_else(|| {
            tracing::error!("Invalid timezone {}", canonical_timezone);
            Error::InvalidTimezoneError(canonical_timezone.to_owned())
        })?;

    Ok(now.to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::{Error, timezone::local_today};

    #[test]
    fn utc_today_matches_system_date() {
        let today = local_today("Etc/UTC").unwrap();

        assert_eq!(today, OffsetDateTime::now_utc().date());
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        let result = local_today("Middle/Earth");

        assert_eq!(
            result,
            Err(Error::InvalidTimezoneError("Middle/Earth".to_owned()))
        );
    }
}
