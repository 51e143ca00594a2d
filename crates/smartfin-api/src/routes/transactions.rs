//! Transaction listing endpoint

use crate::error::{ApiError, ApiResponse, ApiResult};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use smartfin_core::{TransactionFilter, TransactionPage};
use std::collections::HashMap;

/// Get transactions with optional category and date filters (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<TransactionPage>>> {
    let filter = parse_filter(&params)?;
    let dataset = state.dataset.read().await;
    Ok(ApiResponse::ok(dataset.filter(&filter)))
}

/// Build a filter from query parameters. Empty values count as absent.
pub fn parse_filter(params: &HashMap<String, String>) -> ApiResult<TransactionFilter> {
    let param = |name: &str| non_empty(params, name);
    let mut filter = TransactionFilter::default();

    if let Some(limit) = param("limit") {
        filter.limit = parse_number("limit", limit)?;
    }
    if let Some(offset) = param("offset") {
        filter.offset = parse_number("offset", offset)?;
    }
    filter.category = param("category").map(str::to_string);
    filter.start_date = param("startDate").map(|s| parse_date("startDate", s)).transpose()?;
    filter.end_date = param("endDate").map(|s| parse_date("endDate", s)).transpose()?;

    Ok(filter)
}

fn non_empty<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params.get(name).map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_number(name: &str, value: &str) -> ApiResult<usize> {
    value
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {}: '{}'", name, value)))
}

fn parse_date(name: &str, value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("Invalid {}: '{}', expected YYYY-MM-DD", name, value)))
}
