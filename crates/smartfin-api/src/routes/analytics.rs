//! Summary, insight and analysis endpoints

use crate::error::{ApiError, ApiResponse, ApiResult};
use crate::routes::timestamp;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use smartfin_core::{analytics, Analysis, Insight, Summary, Transaction};

const INVALID_TRANSACTIONS: &str = "Invalid transactions data";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    pub generated_at: String,
    pub period: String,
}

/// Spending summary over the most recent transactions
pub async fn api_summary(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Summary>>> {
    let limit = state.config.data.summary_limit;
    let dataset = state.dataset.read().await;
    let summary = analytics::summarize(dataset.recent(limit), limit)?;
    Ok(ApiResponse::ok(summary))
}

/// Insights over the most recent transactions
pub async fn api_insights(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<InsightsResponse>>> {
    let window = state.config.data.insight_window;
    let insights = {
        let dataset = state.dataset.read().await;
        analytics::derive_insights(dataset.recent(window), window)
    };

    Ok(ApiResponse::ok(InsightsResponse {
        insights,
        generated_at: timestamp(),
        period: format!("last {} transactions", window),
    }))
}

/// Analyze a caller-supplied `{"transactions": [...]}` body
pub async fn api_analyze(body: Bytes) -> ApiResult<Json<ApiResponse<Analysis>>> {
    let transactions = parse_transactions(&body)?;
    let analysis = analytics::analyze(&transactions)?;
    Ok(ApiResponse::ok(analysis))
}

/// Extract the `transactions` array from a JSON body
pub fn parse_transactions(body: &[u8]) -> ApiResult<Vec<Transaction>> {
    let mut value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ApiError::bad_request(INVALID_TRANSACTIONS))?;

    let list = match value.get_mut("transactions").map(serde_json::Value::take) {
        Some(list @ serde_json::Value::Array(_)) => list,
        _ => return Err(ApiError::bad_request(INVALID_TRANSACTIONS)),
    };

    serde_json::from_value(list)
        .map_err(|e| ApiError::bad_request(format!("{}: {}", INVALID_TRANSACTIONS, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transactions_minimal_fields() {
        let body = br#"{"transactions":[{"date":"2024-01-02","merchant":"Acme","category":"Shopping","amount":10.5}]}"#;
        let txs = parse_transactions(body).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].merchant, "Acme");
        assert_eq!(txs[0].user_id, "demo_user");
        assert!(!txs[0].is_recurring());
    }

    #[test]
    fn test_parse_transactions_rejects_bad_shapes() {
        assert!(parse_transactions(b"not json").is_err());
        assert!(parse_transactions(b"{}").is_err());
        assert!(parse_transactions(br#"{"transactions":"nope"}"#).is_err());
        assert!(parse_transactions(br#"{"transactions":[{"merchant":"Acme"}]}"#).is_err());
        assert!(parse_transactions(b"[]").is_err());
    }
}
