use crate::engine::params::{Page, SaleMonth};
use crate::transaction::SaleRecord;

/// Records dated in `month`, in their input order.
pub fn filter_by_month(records: &[SaleRecord], month: SaleMonth) -> Vec<&SaleRecord> {
    records
        .iter()
        .filter(|record| record.month() == month.number())
        .collect()
}

/// Case-sensitive substring match on title, price or description.
/// An empty term matches everything.
pub fn matches_search(record: &SaleRecord, term: &str) -> bool {
    term.is_empty()
        || record.title.contains(term)
        || record.price_text().contains(term)
        || record.description.contains(term)
}

/// One page of the month's records that match `term`.
pub fn list_sales<'a>(
    records: &'a [SaleRecord],
    month: SaleMonth,
    term: &str,
    page: Page,
) -> Vec<&'a SaleRecord> {
    let (start, end) = page.bounds();

    filter_by_month(records, month)
        .into_iter()
        .filter(|record| matches_search(record, term))
        .skip(start)
        .take(end - start)
        .collect()
}
