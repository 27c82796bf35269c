use crate::engine::{
    self, CategoryCounts, CombinedSummary, Page, PriceHistogram, SaleMonth, SalesSummary,
};
use crate::error::QueryError;
use crate::provider::DataProvider;
use crate::server::{ApiError, AppState};
use crate::transaction::SaleRecord;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_MONTH: u32 = 1;
const DEFAULT_SUMMARY_MONTH: u32 = 3;

// Raw strings so that bad numbers surface as our own 400 body.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub month: Option<String>,
    pub search_q: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// Malformed query strings (e.g. a repeated key) become `InvalidArgument`.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, QueryError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| QueryError::invalid_argument(rejection.body_text()))
}

fn month_or(raw: Option<&str>, default: u32) -> Result<SaleMonth, QueryError> {
    match raw {
        Some(raw) => raw.parse(),
        None => SaleMonth::new(default),
    }
}

fn required_month(raw: Option<&str>) -> Result<SaleMonth, QueryError> {
    raw.ok_or_else(|| QueryError::invalid_argument("month is required"))?
        .parse()
}

pub async fn sales<P: DataProvider>(
    State(state): State<AppState<P>>,
    query: Result<Query<SalesQuery>, QueryRejection>,
) -> Result<Json<Vec<SaleRecord>>, ApiError> {
    let query = query_params(query)?;
    let month = month_or(query.month.as_deref(), DEFAULT_MONTH)?;
    let page = match query.page.as_deref() {
        Some(raw) => raw.parse::<Page>()?,
        None => Page::default(),
    };
    let term = query.search_q.unwrap_or_default();
    debug!(%month, page = page.number(), term = %term, "listing sales");

    let records = state.provider.fetch_records().await?;
    let listed = engine::list_sales(&records, month, &term, page)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(listed))
}

pub async fn statistics<P: DataProvider>(
    State(state): State<AppState<P>>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<SalesSummary>, ApiError> {
    let query = query_params(query)?;
    let month = month_or(query.month.as_deref(), DEFAULT_MONTH)?;

    let records = state.provider.fetch_records().await?;
    Ok(Json(engine::sales_summary(&records, month)))
}

pub async fn items<P: DataProvider>(
    State(state): State<AppState<P>>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<PriceHistogram>, ApiError> {
    let query = query_params(query)?;
    let month = required_month(query.month.as_deref())?;

    let records = state.provider.fetch_records().await?;
    Ok(Json(engine::price_histogram(&records, month)))
}

pub async fn categories<P: DataProvider>(
    State(state): State<AppState<P>>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CategoryCounts>, ApiError> {
    let query = query_params(query)?;
    let month = month_or(query.month.as_deref(), DEFAULT_MONTH)?;

    let records = state.provider.fetch_records().await?;
    Ok(Json(engine::category_counts(&records, month)))
}

pub async fn all_statistics<P: DataProvider>(
    State(state): State<AppState<P>>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CombinedSummary>, ApiError> {
    let query = query_params(query)?;
    let month = month_or(query.month.as_deref(), DEFAULT_SUMMARY_MONTH)?;

    // One snapshot feeds all three views.
    let records = state.provider.fetch_records().await?;
    Ok(Json(engine::combined_summary(&records, month)))
}
