//! CSV statement upload

use crate::error::{ApiResponse, ApiResult};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use smartfin_core::{CoreError, ImportSummary};

/// Parse a raw CSV body and add its rows to the dataset.
/// Bodies that are not valid UTF-8 fail as import errors (400).
pub async fn api_upload_csv(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<ImportSummary>>> {
    let import = state.parser.parse(&body).map_err(CoreError::from)?;

    let summary = {
        let mut dataset = state.dataset.write().await;
        dataset.import(import)
    };

    log::info!(
        "CSV upload: {} added, {} rejected, dataset now {}",
        summary.transactions_added,
        summary.rows_rejected,
        summary.total_transactions
    );
    Ok(ApiResponse::ok(summary))
}
