pub mod aggregate;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod params;

#[cfg(test)]
mod unit_tests;

pub use aggregate::{
    category_counts, combined_summary, price_histogram, sales_summary, CategoryCounts,
    CombinedSummary, PriceHistogram, SalesSummary,
};
pub use engine::{filter_by_month, list_sales, matches_search};
pub use params::{Page, SaleMonth, PAGE_SIZE};
