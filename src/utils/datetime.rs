use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};

use crate::error::{VtError, VtResult};

pub fn date_from_str(s: &str) -> VtResult<NaiveDate> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y%m%d",
        "%Y-%m-%d %H:%M:%S", // Intraday keys
    ];

    let mut last_err = None;
    for format in FORMATS {
        match NaiveDate::parse_from_str(s, format) {
            Ok(date) => return Ok(date),
            Err(err) => last_err = Some(err),
        }
    }

    match last_err {
        Some(err) => Err(err.into()),
        None => Err(VtError::Invalid {
            code: "INVALID_DATE",
            message: format!("Unable to parse date '{s}'"),
        }),
    }
}

pub fn date_to_str(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Full English month name of a date, e.g. "December"
pub fn date_to_month_name(date: &NaiveDate) -> &'static str {
    Month::try_from(date.month() as u8)
        .map(|m| m.name())
        .unwrap_or_default()
}

/// Accepts full names ("March") and the short forms chrono understands ("Mar")
pub fn month_from_name(name: &str) -> Option<u32> {
    Month::from_str(name.trim()).ok().map(|m| m.number_from_month())
}

pub fn year_from_str(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}
