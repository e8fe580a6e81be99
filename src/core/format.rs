//! Display formatting helpers shared by the tables and charts

use crate::core::order::parse_timestamp;
use chrono::{DateTime, Datelike, Days, FixedOffset};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

/// Round a number to the given number of decimal places
pub fn round_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `$300.56`
pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

/// Axis and tooltip label for values expressed in millions (`18M`)
pub fn format_millions(value: f64) -> String {
    format!("{}M", trim_float(value))
}

/// Label for values expressed in thousands (`72K`)
pub fn format_thousands(value: f64) -> String {
    format!("{}K", trim_float(value))
}

/// Render a float without a trailing `.0` for whole numbers
pub(crate) fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

thread_local! {
    static COLLATOR: Option<Collator> =
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!(error = %e, "root collator unavailable, sorting by code point");
                None
            }
        };
}

/// Locale-aware string ordering
///
/// Uses the Unicode root collation, so accented letters sort with their base
/// letter (`"Émile"` before `"Zoe"`) and lowercase comes before uppercase on
/// otherwise equal text. Strings the collator considers equal are ordered by
/// code point so the ordering stays total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let collated = COLLATOR.with(|collator| collator.as_ref().map(|c| c.compare(a, b)));
    match collated {
        Some(Ordering::Equal) => a.cmp(b),
        Some(ordering) => ordering,
        None => caseless_compare(a, b),
    }
}

fn caseless_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
    }

    a.cmp(b)
}

/// Human friendly age of an order date relative to `now`
///
/// Calendar comparisons (today, yesterday, year) happen in the UTC offset
/// of `now`.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use dashboard::core::format::format_relative_date;
///
/// let now = DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z").unwrap();
/// assert_eq!(format_relative_date("2024-03-10T11:59:45Z", now), "Just now");
/// assert_eq!(format_relative_date("2024-03-10T11:15:00Z", now), "45 minutes ago");
/// assert_eq!(format_relative_date("2024-03-09T20:00:00Z", now), "Yesterday");
/// assert_eq!(format_relative_date("2023-02-02T10:00:00Z", now), "Feb 2, 2023");
/// ```
pub fn format_relative_date(date_iso: &str, now: DateTime<FixedOffset>) -> String {
    let Some(date) = parse_timestamp(date_iso) else {
        return "Invalid Date".to_string();
    };
    let date = date.with_timezone(now.offset());

    let diff_sec = (now - date).num_milliseconds().div_euclid(1000);
    let diff_min = diff_sec.div_euclid(60);
    let diff_hour = diff_min.div_euclid(60);

    if diff_sec < 30 {
        return "Just now".to_string();
    }

    if diff_min < 60 {
        return if diff_min == 1 {
            "1 minute ago".to_string()
        } else {
            format!("{} minutes ago", diff_min)
        };
    }

    if diff_hour < 24 && now.day() == date.day() {
        return if diff_hour == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", diff_hour)
        };
    }

    let today = now.date_naive();
    let day = date.date_naive();

    if today.checked_sub_days(Days::new(1)) == Some(day) {
        return "Yesterday".to_string();
    }

    if day == today {
        return "Today".to_string();
    }

    if day.year() != today.year() {
        date.format("%b %-d, %Y").to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}
