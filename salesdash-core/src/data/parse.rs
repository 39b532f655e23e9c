//! Field-level coercion: missing tokens, decimals, sales amounts, order dates.
//!
//! Every function returns `None` for a value that cannot be used; the cleaner
//! drops the whole row in that case.

use chrono::NaiveDate;

/// Cell contents read as "missing" in any column.
const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Formats with a month name, four-digit year. `%b` is the abbreviation,
/// `%B` the full name.
const NAMED_MONTH_FORMATS: [&str; 10] = [
    "%d %b %Y",
    "%d-%b-%Y",
    "%d/%b/%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%d/%B/%Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Same shapes with a two-digit year.
const NAMED_MONTH_SHORT_YEAR_FORMATS: [&str; 10] = [
    "%d %b %y",
    "%d-%b-%y",
    "%d/%b/%y",
    "%b %d, %y",
    "%b %d %y",
    "%d %B %y",
    "%d-%B-%y",
    "%d/%B/%y",
    "%B %d, %y",
    "%B %d %y",
];

pub fn is_missing(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw)
}

/// Category label: kept verbatim unless it is a missing token.
pub fn parse_label(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Plain decimal. Surrounding whitespace is ignored; NaN and infinities are
/// treated as missing.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if is_missing(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Sales amount: thousands separators are stripped before conversion.
pub fn parse_sales(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if is_missing(s) {
        return None;
    }
    parse_decimal(&s.replace(',', ""))
}

/// Order date, day-first when the text is ambiguous.
///
/// ISO `YYYY-MM-DD` is read year-month-day. Other all-numeric forms read
/// day-first and fall back to month-first only when the day-first reading is
/// not a valid date. A trailing time of day is ignored.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if is_missing(s) {
        return None;
    }
    let s = strip_time(s);

    if let Some(date) = parse_numeric_date(s) {
        return Some(date);
    }

    parse_named_month_date(s)
}

/// Month-name dates. The width of the trailing year token picks the format
/// family, since `%Y` would also accept `23` as year 0023.
fn parse_named_month_date(s: &str) -> Option<NaiveDate> {
    let year_digits = s.bytes().rev().take_while(u8::is_ascii_digit).count();
    let formats: &[&str] = match year_digits {
        4 => &NAMED_MONTH_FORMATS,
        2 => &NAMED_MONTH_SHORT_YEAR_FORMATS,
        _ => return None,
    };
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Drop `THH:MM[:SS]` or ` HH:MM[:SS]` suffixes.
fn strip_time(s: &str) -> &str {
    if let Some(idx) = s.find('T') {
        if idx == 10 && s[idx + 1..].contains(':') {
            return &s[..idx];
        }
    }
    match s.rfind(' ') {
        Some(idx) if s[idx + 1..].contains(':') => s[..idx].trim_end(),
        _ => s,
    }
}

fn parse_numeric_date(s: &str) -> Option<NaiveDate> {
    let sep = ['-', '/', '.'].into_iter().find(|c| s.contains(*c))?;
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    if parts[0].len() == 4 {
        let year: i32 = parts[0].parse().ok()?;
        let month: u32 = parts[1].parse().ok()?;
        let day: u32 = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    let year = expand_year(parts[2])?;

    NaiveDate::from_ymd_opt(year, second, first)
        .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

/// Two-digit years follow the `%y` convention: 00-69 → 2000s, 70-99 → 1900s.
fn expand_year(text: &str) -> Option<i32> {
    let value: i32 = text.parse().ok()?;
    match text.len() {
        4 => Some(value),
        2 if value < 70 => Some(2000 + value),
        2 => Some(1900 + value),
        _ => None,
    }
}
