//! Market data and economic indicator endpoints

use crate::error::{ApiResponse, ApiResult};
use crate::routes::timestamp;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use smartfin_core::{EconomicIndicators, MarketSnapshot};

#[derive(Debug, Serialize)]
pub struct MarketResponse {
    #[serde(flatten)]
    pub snapshot: MarketSnapshot,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorsResponse {
    #[serde(flatten)]
    pub indicators: EconomicIndicators,
    pub last_updated: String,
    pub source: String,
}

/// Market snapshot with fresh jitter on every read
pub async fn api_market(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<MarketResponse>>> {
    let snapshot = state.market.market_snapshot().await?;
    Ok(ApiResponse::ok(MarketResponse {
        snapshot,
        timestamp: timestamp(),
    }))
}

/// Economic indicators with source metadata
pub async fn api_economic_indicators(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<IndicatorsResponse>>> {
    let indicators = state.market.economic_indicators().await?;
    Ok(ApiResponse::ok(IndicatorsResponse {
        indicators,
        last_updated: timestamp(),
        source: state.market.source().to_string(),
    }))
}
