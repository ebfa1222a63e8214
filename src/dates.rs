use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

pub const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn parse_iso_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), ISO_DATE)
}

/// Optional `?date_filter=YYYY-MM-DD`; empty counts as absent.
pub fn parse_date_filter(raw: Option<&str>) -> Result<Option<Date>, time::error::Parse> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_iso_date(s).map(Some),
    }
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod iso_date {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        let text = date.format(super::ISO_DATE).map_err(S::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_iso_date(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso_date("2024-03-09").unwrap(), date!(2024 - 03 - 09));
        assert!(parse_iso_date("09/03/2024").is_err());
    }

    #[test]
    fn date_filter_treats_empty_as_absent() {
        assert_eq!(parse_date_filter(None).unwrap(), None);
        assert_eq!(parse_date_filter(Some("")).unwrap(), None);
        assert_eq!(
            parse_date_filter(Some("2024-01-31")).unwrap(),
            Some(date!(2024 - 01 - 31))
        );
        assert!(parse_date_filter(Some("yesterday")).is_err());
    }
}
