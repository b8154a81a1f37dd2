use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use super::{ISO_DATE_REGEX, MDY_SLASH_REGEX, YMD_SLASH_REGEX};

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

const NAMED_MONTH_FORMATS: &[&str] = &["%B %d, %Y", "%B %d %Y", "%d %B %Y"];

/// Parse the date formats that show up in spreadsheet exports.
///
/// Returns `None` when nothing matches; callers treat that as an invalid date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(cap) = ISO_DATE_REGEX.captures(raw).or_else(|| YMD_SLASH_REGEX.captures(raw)) {
        let year = cap[1].parse().ok()?;
        let month = cap[2].parse().ok()?;
        let day = cap[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(cap) = MDY_SLASH_REGEX.captures(raw) {
        let month = cap[1].parse().ok()?;
        let day = cap[2].parse().ok()?;
        let year = expand_year(&cap[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    // `%Y` also accepts one or two digit years.
    for format in NAMED_MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            if date.year() >= 1000 {
                return Some(date);
            }
        }
    }

    parse_date_parts(raw)
}

/// Years of one or two digits map to 2000-2049 below 50 and 1950-1999 otherwise.
fn expand_year(digits: &str) -> Option<i32> {
    let year = i32::try_from(digits.parse::<u32>().ok()?).ok()?;
    if digits.len() > 2 {
        Some(year)
    } else if year < 50 {
        Some(2000 + year)
    } else {
        Some(1900 + year)
    }
}

// Last resort: three integers separated by `-` or `/`.
fn parse_date_parts(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split(['-', '/']).map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }

    let numbers: Vec<u32> = parts
        .iter()
        .map(|p| p.parse::<u32>().ok())
        .collect::<Option<_>>()?;

    if parts[0].len() == 4 {
        NaiveDate::from_ymd_opt(i32::try_from(numbers[0]).ok()?, numbers[1], numbers[2])
    } else {
        NaiveDate::from_ymd_opt(expand_year(parts[2])?, numbers[0], numbers[1])
    }
}

/// Render a feed date as `January 5, 2024`, or the raw text if it does not parse.
pub fn format_display_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[derive(Debug, Clone)]
struct SortKey {
    raw: String,
    date: Option<NaiveDate>,
}

impl SortKey {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            date: parse_date(raw),
        }
    }

    /// `Less` means `self` is shown before `other`.
    fn cmp_newest_first(&self, other: &Self) -> Ordering {
        match (self.date, other.date) {
            (Some(a), Some(b)) => b.cmp(&a),
            _ => other.raw.cmp(&self.raw),
        }
    }
}

/// Compare two raw dates, newest first.
///
/// When either side is not a valid date the raw strings are compared
/// lexically, descending. That fallback does not agree with chronological
/// order for unpadded or non-ISO text.
pub fn compare_newest_first(a: &str, b: &str) -> Ordering {
    SortKey::new(a).cmp_newest_first(&SortKey::new(b))
}

/// Stable sort of `items` by their date, newest first.
///
/// The mixed date/lexical comparator is not transitive, so this uses an
/// insertion sort rather than `slice::sort_by`, which may panic on a
/// comparator that is not a total order.
pub fn sort_newest_first<T>(items: Vec<T>, date_of: impl Fn(&T) -> &str) -> Vec<T> {
    let mut keyed: Vec<(SortKey, T)> = items
        .into_iter()
        .map(|item| (SortKey::new(date_of(&item)), item))
        .collect();

    for i in 1..keyed.len() {
        let mut j = i;
        while j > 0 && keyed[j - 1].0.cmp_newest_first(&keyed[j].0) == Ordering::Greater {
            keyed.swap(j - 1, j);
            j -= 1;
        }
    }

    keyed.into_iter().map(|(_, item)| item).collect()
}
