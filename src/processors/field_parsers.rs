//! Per-cell parsers for the derived columns and the price coercion.
//!
//! Every parser maps unusable input to `None`; none of them return errors.

use crate::models::CellValue;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

static HOURS_RE: OnceLock<Regex> = OnceLock::new();
static MINUTES_RE: OnceLock<Regex> = OnceLock::new();
static STOPS_RE: OnceLock<Regex> = OnceLock::new();

fn hours_re() -> &'static Regex {
    HOURS_RE.get_or_init(|| Regex::new(r"([0-9]+)\s*h").expect("hours pattern is valid"))
}

fn minutes_re() -> &'static Regex {
    MINUTES_RE.get_or_init(|| Regex::new(r"([0-9]+)\s*m").expect("minutes pattern is valid"))
}

fn stops_re() -> &'static Regex {
    STOPS_RE.get_or_init(|| Regex::new(r"([0-9]+)\s*stop").expect("stops pattern is valid"))
}

/// Day-first date layouts with a four digit year.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%d %B %Y",
    "%d-%b-%Y",
];

/// Day-first date layouts with a two digit year.
const SHORT_YEAR_FORMATS: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Total minutes from text such as `"2h 50m"`, `"5h"` or `"45m"`.
///
/// The first `<digits>h` and first `<digits>m` tokens are summed. A string with
/// neither token, or whose tokens sum to zero, yields `None`.
pub fn parse_duration_minutes(cell: &CellValue) -> Option<u32> {
    let text = cell.as_text()?;

    let hours = match hours_re().captures(text) {
        Some(caps) => caps[1].parse::<u32>().ok()?,
        None => 0,
    };
    let minutes = match minutes_re().captures(text) {
        Some(caps) => caps[1].parse::<u32>().ok()?,
        None => 0,
    };

    if hours == 0 && minutes == 0 {
        return None;
    }
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Layover count: `"non-stop"` is 0, otherwise the number before `stop`.
pub fn parse_stops(cell: &CellValue) -> Option<u32> {
    let text = cell.as_text()?.trim().to_lowercase();
    if text == "non-stop" {
        return Some(0);
    }

    stops_re()
        .captures(&text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

/// Journey date, read day-first. Excel date cells pass through.
pub fn parse_journey_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Text(text) => parse_date_text(text.trim()),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    let short_year = text
        .rsplit(|c: char| c == '/' || c == '-' || c == '.')
        .next()
        .map(|year| year.len() == 2 && year.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);

    let short_year_date = if short_year {
        SHORT_YEAR_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    } else {
        None
    };

    short_year_date
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Numeric price, or `None` when the cell cannot be read as a number.
pub fn coerce_price(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    value.is_finite().then_some(value)
}
