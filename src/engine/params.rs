use crate::error::QueryError;

use std::fmt;
use std::str::FromStr;

/// Records per page of a sales listing.
pub const PAGE_SIZE: usize = 10;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar month, always within 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaleMonth(u8);

impl SaleMonth {
    pub fn new(month: u32) -> Result<Self, QueryError> {
        if !(1..=12).contains(&month) {
            return Err(QueryError::invalid_argument(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(SaleMonth(month as u8))
    }

    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    pub fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS[usize::from(self.0 - 1)]
    }
}

impl TryFrom<i64> for SaleMonth {
    type Error = QueryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let month = u32::try_from(value).map_err(|_| {
            QueryError::invalid_argument(format!(
                "month must be between 1 and 12, got {}",
                value
            ))
        })?;
        SaleMonth::new(month)
    }
}

impl FromStr for SaleMonth {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SaleMonth::try_from(parse_integer("month", s)?)
    }
}

impl fmt::Display for SaleMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based page number of a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(usize);

impl Page {
    pub fn new(page: usize) -> Result<Self, QueryError> {
        if page < 1 {
            return Err(QueryError::invalid_argument(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        Ok(Page(page))
    }

    pub fn number(self) -> usize {
        self.0
    }

    /// Half-open index range `[start, end)` covered by this page.
    pub fn bounds(self) -> (usize, usize) {
        let start = (self.0 - 1).saturating_mul(PAGE_SIZE);
        (start, start.saturating_add(PAGE_SIZE))
    }
}

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

impl TryFrom<i64> for Page {
    type Error = QueryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let page = usize::try_from(value).map_err(|_| {
            QueryError::invalid_argument(format!("page must be at least 1, got {}", value))
        })?;
        Page::new(page)
    }
}

impl FromStr for Page {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::try_from(parse_integer("page", s)?)
    }
}

fn parse_integer(name: &str, raw: &str) -> Result<i64, QueryError> {
    raw.trim().parse::<i64>().map_err(|_| {
        QueryError::invalid_argument(format!("{} must be an integer, got '{}'", name, raw))
    })
}
