//! Lenient request parameter coercion
//!
//! Malformed parameters never fail a request: pagination falls back to its
//! defaults and unrecognised report filters are dropped.

use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Raw `page`/`limit` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Coerced pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
        }
    }

    /// Zero-based row skip count: `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<&PageQuery> for Pagination {
    fn from(query: &PageQuery) -> Self {
        Self::from_params(query.page.as_deref(), query.limit.as_deref())
    }
}

fn positive_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(parse_leading_int)
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

/// Parse the leading integer of a string, ignoring trailing garbage
///
/// `"12"` → 12, `" 3abc"` → 3, `"-4"` → -4, `"abc"` → None.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}

/// Month/year window shared by the sales query and the stock expense query
///
/// Each bound is an independent filter; `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportWindow {
    /// Calendar month, 1-12
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl ReportWindow {
    pub fn all_time() -> Self {
        Self::default()
    }

    pub fn for_year(year: i32) -> Self {
        Self {
            month: None,
            year: Some(year),
        }
    }

    pub fn contains(&self, date: chrono::NaiveDate) -> bool {
        use chrono::Datelike;
        let month_matches = match self.month {
            Some(m) => date.month() == m,
            None => true,
        };
        let year_matches = match self.year {
            Some(y) => date.year() == y,
            None => true,
        };
        month_matches && year_matches
    }
}

/// Raw `month`/`year` query parameters of the monthly report
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyReportQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl From<&MonthlyReportQuery> for ReportWindow {
    fn from(query: &MonthlyReportQuery) -> Self {
        let month = query.month.as_deref().and_then(|raw| {
            let parsed = parse_month(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                tracing::warn!(month = %raw, "Ignoring unrecognised month filter");
            }
            parsed
        });
        let year = query.year.as_deref().and_then(|raw| {
            let parsed = parse_year(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                tracing::warn!(year = %raw, "Ignoring unrecognised year filter");
            }
            parsed
        });
        Self { month, year }
    }
}

/// Parse a month given as `1`-`12` (optionally zero-padded), a full English
/// name, or a three-letter abbreviation. Case-insensitive.
pub fn parse_month(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.chars().all(|c| c.is_ascii_digit()) {
        return value.parse::<u32>().ok().filter(|m| (1..=12).contains(m));
    }

    let lower = value.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
        .map(|idx| idx as u32 + 1)
}

/// Parse a four-digit calendar year
pub fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
