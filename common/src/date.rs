use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// The format accepted for date bounds, e.g. `2019-11-04`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },
}

/// Parse a `YYYY-MM-DD` date into the first instant of that day, in UTC.
///
/// Only the exact shape is accepted: four digit year, two digit month and day. No sign,
/// padding, or surrounding whitespace.
pub fn parse_day(value: &str) -> Result<DateTime<Utc>, Error> {
    let invalid = |source| Error::InvalidDate {
        value: value.to_string(),
        source,
    };

    if !is_day_shaped(value) {
        return Err(invalid(None));
    }

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|err| invalid(Some(err)))?;

    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

fn is_day_shaped(value: &str) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}
