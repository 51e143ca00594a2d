//! Synthetic personal-finance data and spending analytics
//!
//! - generator: builds the mock transaction history
//! - market: simulated market quotes and economic indicators
//! - analytics: summaries, insights and pattern analysis
//! - dataset: the shared in-memory transaction store

pub mod analytics;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod market;
pub mod models;
pub mod reports;
pub mod types;

use smartfin_config::DataConfig;

pub use analytics::{analyze, derive_insights, summarize, INSIGHT_WINDOW, SUMMARY_LIMIT};
pub use dataset::{Dataset, TransactionFilter, DEFAULT_PAGE_SIZE};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use generator::{DatasetGenerator, CATEGORY_PROFILES, SUBSCRIPTIONS};
pub use market::{jitter, load_baseline, MarketDataProvider, MarketProviderRef, SimulatedMarketProvider};
pub use models::{
    CategoryProfile, Commodity, EconomicIndicators, MarketIndex, MarketSnapshot, SubscriptionDef,
    Transaction, DEFAULT_CATEGORY, DEMO_USER_ID,
};
pub use reports::{
    Analysis, CategoryTotal, ImportSummary, Insight, Patterns, Recommendation, Summary,
    TransactionPage,
};
pub use types::InsightType;

/// Build the startup dataset.
///
/// Fails if generation yields nothing, so the server never starts serving
/// an empty dataset.
pub fn load_dataset(config: &DataConfig) -> CoreResult<Dataset> {
    let generator = DatasetGenerator::from_config(config);
    match generator.seed() {
        Some(seed) => log::info!("Generating {} months of transactions (seed {})", config.months_back, seed),
        None => log::info!("Generating {} months of transactions (random seed)", config.months_back),
    }

    let transactions = generator.generate();
    if transactions.is_empty() {
        return Err(CoreError::InternalError {
            message: "dataset generator produced no transactions".to_string(),
        });
    }

    let dataset = Dataset::new(transactions);
    log::info!("Dataset loaded: {} transactions", dataset.len());
    Ok(dataset)
}

/// Build the market data provider, checking its baseline is usable
pub async fn load_market_provider() -> CoreResult<SimulatedMarketProvider> {
    let provider = SimulatedMarketProvider::new();
    let snapshot = provider.market_snapshot().await?;
    if snapshot.indices.is_empty() {
        return Err(CoreError::InternalError {
            message: "market baseline has no indices".to_string(),
        });
    }
    log::info!(
        "Market data loaded: {} indices, {} commodities",
        snapshot.indices.len(),
        snapshot.commodities.len()
    );
    Ok(provider)
}
