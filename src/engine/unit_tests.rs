use crate::engine::aggregate::{category_counts, combined_summary, price_histogram, sales_summary};
use crate::engine::engine::{filter_by_month, list_sales};
use crate::engine::params::{Page, SaleMonth};
use crate::transaction::{RawSaleRecord, SaleRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

pub(crate) fn record(id: u64, title: &str, price: &str, date: &str, sold: bool) -> SaleRecord {
    categorized(id, title, price, date, sold, "electronics")
}

pub(crate) fn categorized(
    id: u64,
    title: &str,
    price: &str,
    date: &str,
    sold: bool,
    category: &str,
) -> SaleRecord {
    SaleRecord::try_from(RawSaleRecord {
        id,
        title: title.to_string(),
        price: Decimal::from_str(price).unwrap(),
        description: format!("description of {}", id),
        category: category.to_string(),
        image: None,
        sold,
        date_of_sale: date.to_string(),
    })
    .unwrap()
}

fn scenario() -> Vec<SaleRecord> {
    vec![
        record(1, "Shirt", "50", "2022-03-05", true),
        record(2, "Jacket", "150", "2022-03-10", false),
        record(3, "Boots", "250", "2022-04-01", true),
    ]
}

fn march() -> SaleMonth {
    SaleMonth::new(3).unwrap()
}

#[cfg(test)]
mod sales_summary_tests {
    use super::*;

    #[test]
    fn test_summary_for_scenario() {
        let summary = sales_summary(&scenario(), march());

        assert_eq!(summary.total_sales, Decimal::from(50));
        assert_eq!(summary.sold_count, 1);
        assert_eq!(summary.unsold_count, 1);
    }

    #[test]
    fn test_summary_with_no_matches_is_zero() {
        let summary = sales_summary(&scenario(), SaleMonth::new(7).unwrap());

        assert_eq!(summary.total_sales, Decimal::ZERO);
        assert_eq!(summary.sold_count, 0);
        assert_eq!(summary.unsold_count, 0);
    }

    #[test]
    fn test_summary_keeps_decimal_precision() {
        let records = vec![
            record(1, "A", "0.1", "2022-03-05", true),
            record(2, "B", "0.2", "2022-03-06", true),
            record(3, "C", "99.99", "2022-03-07", true),
        ];

        let summary = sales_summary(&records, march());

        assert_eq!(summary.total_sales, Decimal::from_str("100.29").unwrap());
        assert_eq!(summary.sold_count, 3);
        assert_eq!(summary.unsold_count, 0);
    }

    #[test]
    fn test_summary_saturates_instead_of_overflowing() {
        let records = vec![
            record(1, "A", "70000000000000000000000000000", "2022-03-05", true),
            record(2, "B", "70000000000000000000000000000", "2022-03-06", true),
            record(3, "C", "5", "2022-03-07", false),
        ];

        let summary = sales_summary(&records, march());

        assert_eq!(summary.total_sales, Decimal::MAX);
        assert_eq!(summary.sold_count, 2);
        assert_eq!(summary.unsold_count, 1);
    }

    #[test]
    fn test_summary_serializes_with_wire_keys() {
        let summary = sales_summary(&scenario(), march());

        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "sales": 50.0, "soldItems": 1, "unSoldItems": 1 })
        );
    }
}

#[cfg(test)]
mod price_histogram_tests {
    use super::*;

    #[test]
    fn test_histogram_for_scenario() {
        let histogram = price_histogram(&scenario(), march());

        assert_eq!(histogram.count("0-100"), Some(1));
        assert_eq!(histogram.count("101-200"), Some(1));
        for (label, count) in histogram.iter().skip(2) {
            assert_eq!(count, 0, "bucket {} should be empty", label);
        }
    }

    #[test]
    fn test_upper_bounds_are_inclusive() {
        let records = vec![
            record(1, "A", "100.00", "2022-03-05", true),
            record(2, "B", "100.01", "2022-03-05", true),
            record(3, "C", "900", "2022-03-05", true),
            record(4, "D", "900.01", "2022-03-05", true),
            record(5, "E", "0", "2022-03-05", true),
        ];

        let histogram = price_histogram(&records, march());

        assert_eq!(histogram.count("0-100"), Some(2));
        assert_eq!(histogram.count("101-200"), Some(1));
        assert_eq!(histogram.count("801-900"), Some(1));
        assert_eq!(histogram.count("901-above"), Some(1));
    }

    #[test]
    fn test_all_buckets_present_in_order_when_empty() {
        let histogram = price_histogram(&[], march());

        let labels: Vec<&str> = histogram.iter().map(|(label, _)| label).collect();
        assert_eq!(
            labels,
            vec![
                "0-100",
                "101-200",
                "201-300",
                "301-400",
                "401-500",
                "501-600",
                "601-700",
                "701-800",
                "801-900",
                "901-above"
            ]
        );
        assert_eq!(histogram.total(), 0);
        assert_eq!(histogram.count("1000-2000"), None);
    }

    #[test]
    fn test_bucket_counts_sum_to_filtered_count() {
        let records: Vec<SaleRecord> = (0..60u64)
            .map(|i| {
                let month = i % 3 + 2;
                record(
                    i,
                    "Item",
                    &(i * 37).to_string(),
                    &format!("2022-{:02}-15", month),
                    i % 2 == 0,
                )
            })
            .collect();

        let histogram = price_histogram(&records, march());

        assert_eq!(histogram.total(), filter_by_month(&records, march()).len());
    }

    #[test]
    fn test_histogram_serializes_in_ascending_order() {
        let histogram = price_histogram(&scenario(), march());

        let json = serde_json::to_string(&histogram).unwrap();

        assert!(json.starts_with(r#"{"0-100":1,"101-200":1,"201-300":0"#));
        assert!(json.ends_with(r#""901-above":0}"#));
    }
}

#[cfg(test)]
mod category_counts_tests {
    use super::*;

    fn mixed() -> Vec<SaleRecord> {
        vec![
            categorized(1, "A", "10", "2022-03-01", true, "jewelery"),
            categorized(2, "B", "10", "2022-03-02", true, "electronics"),
            categorized(3, "C", "10", "2022-03-03", false, "jewelery"),
            categorized(4, "D", "10", "2022-04-03", false, "women's clothing"),
            categorized(5, "E", "10", "2022-03-04", false, "Jewelery"),
        ]
    }

    #[test]
    fn test_counts_by_literal_category() {
        let counts = category_counts(&mixed(), march());

        assert_eq!(counts.get("jewelery"), Some(2));
        assert_eq!(counts.get("electronics"), Some(1));
        assert_eq!(counts.get("Jewelery"), Some(1));
        assert_eq!(counts.get("women's clothing"), None);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_counts_keep_first_seen_order() {
        let counts = category_counts(&mixed(), march());

        let order: Vec<&str> = counts.iter().map(|(category, _)| category).collect();
        assert_eq!(order, vec!["jewelery", "electronics", "Jewelery"]);

        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"jewelery":2,"electronics":1,"Jewelery":1}"#);
    }

    #[test]
    fn test_counts_sum_to_filtered_count() {
        let records = mixed();
        let counts = category_counts(&records, march());

        assert_eq!(counts.total(), filter_by_month(&records, march()).len());
    }

    #[test]
    fn test_no_matches_gives_empty_counts() {
        let counts = category_counts(&mixed(), SaleMonth::new(12).unwrap());

        assert!(counts.is_empty());
        assert_eq!(serde_json::to_string(&counts).unwrap(), "{}");
    }
}

#[cfg(test)]
mod combined_summary_tests {
    use super::*;

    #[test]
    fn test_combined_matches_individual_views() {
        let records = scenario();

        let combined = combined_summary(&records, march());

        assert_eq!(combined.month_name, "Mar");
        assert_eq!(combined.statistics, sales_summary(&records, march()));
        assert_eq!(combined.item_price_range, price_histogram(&records, march()));
        assert_eq!(combined.categories, category_counts(&records, march()));
    }

    #[test]
    fn test_combined_serializes_with_wire_keys() {
        let combined = combined_summary(&scenario(), SaleMonth::new(4).unwrap());

        let json = serde_json::to_value(&combined).unwrap();

        assert_eq!(json["monthName"], "Apr");
        assert_eq!(json["statistics"]["sales"], 250.0);
        assert_eq!(json["itemPriceRange"]["201-300"], 1);
        assert_eq!(json["categories"]["electronics"], 1);
    }
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_listing_pages_for_scenario() {
        let records = scenario();

        let first = list_sales(&records, march(), "", Page::default());
        let ids: Vec<u64> = first.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let second = list_sales(&records, march(), "", Page::new(2).unwrap());
        assert!(second.is_empty());
    }

    #[test]
    fn test_invalid_month_and_page_are_rejected() {
        assert!("13".parse::<SaleMonth>().is_err());
        assert!("0".parse::<Page>().is_err());
    }
}
