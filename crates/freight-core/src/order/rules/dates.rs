//! Tolerant date parsing for loading and delivery times.

use chrono::{Datelike, NaiveDate, SecondsFormat};

/// Date layouts tried in order; the first one that parses the whole candidate wins.
pub const DATE_LAYOUTS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Date parser over a fixed, ordered list of layouts.
pub struct DateParser {
    layouts: &'static [&'static str],
}

impl DateParser {
    pub fn new() -> Self {
        Self {
            layouts: DATE_LAYOUTS,
        }
    }

    /// Parse a date candidate into a calendar date.
    pub fn parse_date(&self, candidate: &str) -> Option<NaiveDate> {
        let candidate = candidate.trim();
        self.layouts.iter().find_map(|layout| {
            NaiveDate::parse_from_str(candidate, layout)
                .ok()
                .map(|date| expand_two_digit_year(date, candidate))
        })
    }

    /// Parse a date candidate into an ISO-8601 timestamp at midnight UTC.
    pub fn parse(&self, candidate: &str) -> Option<String> {
        self.parse_date(candidate).map(to_iso_string)
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a date candidate with the default layouts.
pub fn parse_datetime(candidate: &str) -> Option<String> {
    DateParser::new().parse(candidate)
}

fn to_iso_string(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Micros, true)
}

// `%Y` accepts "24" as the year 24; a two-digit trailing year means 2024 or 1999.
fn expand_two_digit_year(date: NaiveDate, candidate: &str) -> NaiveDate {
    let year_digits = candidate
        .rsplit(['.', '/', '-'])
        .next()
        .map(str::len)
        .unwrap_or(0);

    if date.year() >= 100 || year_digits > 2 {
        return date;
    }

    let year = if date.year() <= 50 {
        2000 + date.year()
    } else {
        1900 + date.year()
    };
    date.with_year(year).unwrap_or(date)
}
