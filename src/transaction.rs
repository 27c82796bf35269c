use crate::error::QueryError;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A validated sale transaction. Immutable once built; serializes back to
/// the feed's own field values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub id: u64,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sold: bool,
    #[serde(rename = "dateOfSale")]
    pub date_of_sale: String,
    #[serde(skip)]
    pub sold_at: DateTime<Utc>,
}

/// Wire shape shared by the JSON feed and CSV exports.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSaleRecord {
    pub id: u64,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    pub sold: bool,
    #[serde(rename = "dateOfSale")]
    pub date_of_sale: String,
}

impl TryFrom<RawSaleRecord> for SaleRecord {
    type Error = QueryError;

    fn try_from(raw: RawSaleRecord) -> Result<Self, Self::Error> {
        if raw.price < Decimal::ZERO {
            return Err(QueryError::InvalidRecord {
                message: format!("Negative price {} for record {}", raw.price, raw.id),
            });
        }

        let sold_at = parse_date_of_sale(&raw.date_of_sale).map_err(|message| {
            QueryError::InvalidRecord {
                message: format!("{} for record {}", message, raw.id),
            }
        })?;

        Ok(SaleRecord {
            id: raw.id,
            title: raw.title,
            price: raw.price,
            description: raw.description,
            category: raw.category,
            image: raw.image,
            sold: raw.sold,
            date_of_sale: raw.date_of_sale,
            sold_at,
        })
    }
}

impl SaleRecord {
    /// Calendar month of the sale, 1-12, taken in UTC.
    pub fn month(&self) -> u32 {
        self.sold_at.month()
    }

    /// Price rendered the way it is matched by free-text search.
    pub fn price_text(&self) -> String {
        self.price.normalize().to_string()
    }
}

/// Accepts RFC 3339 timestamps, naive timestamps (read as UTC) and plain dates.
pub fn parse_date_of_sale(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = value.parse::<NaiveDateTime>() {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(format!("Unparseable dateOfSale '{}'", value))
}
