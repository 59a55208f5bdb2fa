//! Locale-aware date labels for the page header and note list.
//!
//! Only Hindi (`hi-IN`) long and short forms are produced.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};

const HINDI_MONTHS: [&str; 12] = [
    "जनवरी",
    "फ़रवरी",
    "मार्च",
    "अप्रैल",
    "मई",
    "जून",
    "जुलाई",
    "अगस्त",
    "सितंबर",
    "अक्तूबर",
    "नवंबर",
    "दिसंबर",
];

/// Long form, e.g. `18 अक्तूबर 2026`.
pub fn hindi_long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        HINDI_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Short form, e.g. `18/10/2026`.
pub fn hindi_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Short date plus 12-hour time, e.g. `18/10/2026, 6:05:09 pm`.
///
/// Formats the wall-clock time of `at`'s own zone; convert to `Local` first
/// for on-screen labels.
pub fn hindi_date_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let (is_pm, hour) = at.hour12();
    format!(
        "{}, {}:{:02}:{:02} {}",
        hindi_short_date(at.date_naive()),
        hour,
        at.minute(),
        at.second(),
        if is_pm { "pm" } else { "am" }
    )
}

/// Short form of a stored `YYYY-MM-DD` note date; other text is returned as is.
pub fn note_date_label(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(hindi_short_date)
        .unwrap_or_else(|_| raw.to_string())
}
