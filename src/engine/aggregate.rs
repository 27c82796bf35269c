use crate::engine::engine::filter_by_month;
use crate::engine::params::SaleMonth;
use crate::transaction::SaleRecord;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Revenue of sold records plus sold and unsold counts for one month.
/// `total_sales` saturates at `Decimal::MAX`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    #[serde(rename = "sales", with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    #[serde(rename = "soldItems")]
    pub sold_count: usize,
    #[serde(rename = "unSoldItems")]
    pub unsold_count: usize,
}

const BUCKET_COUNT: usize = 10;

/// Upper bound (inclusive) and label of each histogram bucket. The last
/// bucket is open-ended.
static PRICE_BUCKETS: [(Option<u32>, &str); BUCKET_COUNT] = [
    (Some(100), "0-100"),
    (Some(200), "101-200"),
    (Some(300), "201-300"),
    (Some(400), "301-400"),
    (Some(500), "401-500"),
    (Some(600), "501-600"),
    (Some(700), "601-700"),
    (Some(800), "701-800"),
    (Some(900), "801-900"),
    (None, "901-above"),
];

/// Record counts per fixed price bucket; every bucket is always present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistogram {
    counts: [usize; BUCKET_COUNT],
}

impl PriceHistogram {
    pub fn add(&mut self, price: Decimal) {
        let index = PRICE_BUCKETS
            .iter()
            .position(|(upper, _)| match upper {
                Some(upper) => price <= Decimal::from(*upper),
                None => true,
            })
            .unwrap_or(BUCKET_COUNT - 1);
        self.counts[index] += 1;
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        PRICE_BUCKETS
            .iter()
            .position(|(_, bucket)| *bucket == label)
            .map(|index| self.counts[index])
    }

    /// Buckets in ascending price order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        PRICE_BUCKETS
            .iter()
            .zip(self.counts.iter())
            .map(|((_, label), count)| (*label, *count))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Serialize for PriceHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(BUCKET_COUNT))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// Per-category counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts(IndexMap<String, usize>);

impl CategoryCounts {
    pub fn add(&mut self, category: &str) {
        match self.0.get_mut(category) {
            Some(count) => *count += 1,
            None => {
                self.0.insert(category.to_string(), 1);
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.0.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedSummary {
    #[serde(rename = "monthName")]
    pub month_name: &'static str,
    pub statistics: SalesSummary,
    #[serde(rename = "itemPriceRange")]
    pub item_price_range: PriceHistogram,
    pub categories: CategoryCounts,
}

pub fn sales_summary(records: &[SaleRecord], month: SaleMonth) -> SalesSummary {
    summarize(&filter_by_month(records, month))
}

pub fn price_histogram(records: &[SaleRecord], month: SaleMonth) -> PriceHistogram {
    histogram(&filter_by_month(records, month))
}

pub fn category_counts(records: &[SaleRecord], month: SaleMonth) -> CategoryCounts {
    categories(&filter_by_month(records, month))
}

/// All three month views computed over a single filtering pass.
pub fn combined_summary(records: &[SaleRecord], month: SaleMonth) -> CombinedSummary {
    let filtered = filter_by_month(records, month);

    CombinedSummary {
        month_name: month.abbreviation(),
        statistics: summarize(&filtered),
        item_price_range: histogram(&filtered),
        categories: categories(&filtered),
    }
}

fn summarize(filtered: &[&SaleRecord]) -> SalesSummary {
    let (total_sales, sold_count) = filtered
        .iter()
        .filter(|record| record.sold)
        .fold((Decimal::ZERO, 0), |(total, count), record| {
            (total.saturating_add(record.price), count + 1)
        });

    SalesSummary {
        total_sales,
        sold_count,
        unsold_count: filtered.len() - sold_count,
    }
}

fn histogram(filtered: &[&SaleRecord]) -> PriceHistogram {
    let mut histogram = PriceHistogram::default();
    for record in filtered {
        histogram.add(record.price);
    }
    histogram
}

fn categories(filtered: &[&SaleRecord]) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for record in filtered {
        counts.add(&record.category);
    }
    counts
}
