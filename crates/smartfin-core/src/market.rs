//! Simulated market and economic figures

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::models::{Commodity, EconomicIndicators, MarketIndex, MarketSnapshot};

/// Provider reference type
pub type MarketProviderRef = Arc<dyn MarketDataProvider>;

/// Source of market quotes and economic indicators
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current market snapshot
    async fn market_snapshot(&self) -> CoreResult<MarketSnapshot>;

    /// Current economic indicators
    async fn economic_indicators(&self) -> CoreResult<EconomicIndicators>;

    /// Human readable origin of the figures
    fn source(&self) -> &str;
}

fn index(symbol: &str, value: f64, change: f64, change_percent: f64) -> MarketIndex {
    MarketIndex {
        symbol: symbol.to_string(),
        value,
        change,
        change_percent,
    }
}

fn commodity(symbol: &str, value: f64, change: f64, unit: &str) -> Commodity {
    Commodity {
        symbol: symbol.to_string(),
        value,
        change,
        unit: unit.to_string(),
    }
}

/// Fixed reference figures the simulated provider starts from
pub fn load_baseline() -> (MarketSnapshot, EconomicIndicators) {
    let snapshot = MarketSnapshot {
        indices: vec![
            index("S&P 500", 4515.23, 0.78, 0.02),
            index("NASDAQ", 14125.48, -32.45, -0.23),
            index("DOW", 35123.36, 156.78, 0.45),
            index("Russell 2000", 1812.45, 12.34, 0.69),
        ],
        commodities: vec![
            commodity("Gold", 1978.30, 5.20, "oz"),
            commodity("Oil", 78.45, -1.23, "barrel"),
            commodity("Bitcoin", 43567.89, 1234.56, "BTC"),
        ],
    };

    let indicators = [
        ("inflationRate", 3.7),
        ("unemploymentRate", 3.9),
        ("federalFundsRate", 5.5),
        ("gdpGrowth", 2.1),
        ("consumerConfidence", 102.5),
        ("retailSales", 0.3),
        ("mortgageRate30Y", 7.23),
        ("savingsRate", 4.1),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect();

    (snapshot, indicators)
}

/// Nudge index values by up to ±0.1% and scale their change by 0.9–1.1.
/// Commodities pass through unchanged.
pub fn jitter<R: Rng + ?Sized>(snapshot: &MarketSnapshot, rng: &mut R) -> MarketSnapshot {
    MarketSnapshot {
        indices: snapshot
            .indices
            .iter()
            .map(|idx| MarketIndex {
                value: idx.value * (1.0 + rng.gen_range(-0.001..0.001)),
                change: idx.change * rng.gen_range(0.9..1.1),
                ..idx.clone()
            })
            .collect(),
        commodities: snapshot.commodities.clone(),
    }
}

/// Provider serving the baseline figures with per-read jitter
#[derive(Debug, Clone)]
pub struct SimulatedMarketProvider {
    baseline: MarketSnapshot,
    indicators: EconomicIndicators,
}

impl SimulatedMarketProvider {
    pub fn new() -> Self {
        let (baseline, indicators) = load_baseline();
        Self { baseline, indicators }
    }

    pub fn baseline(&self) -> &MarketSnapshot {
        &self.baseline
    }
}

impl Default for SimulatedMarketProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for SimulatedMarketProvider {
    async fn market_snapshot(&self) -> CoreResult<MarketSnapshot> {
        Ok(jitter(&self.baseline, &mut rand::thread_rng()))
    }

    async fn economic_indicators(&self) -> CoreResult<EconomicIndicators> {
        Ok(self.indicators.clone())
    }

    fn source(&self) -> &str {
        "Federal Reserve Economic Data (Simulated)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_baseline_contents() {
        let (snapshot, indicators) = load_baseline();
        assert_eq!(snapshot.indices.len(), 4);
        assert_eq!(snapshot.commodities.len(), 3);
        assert_eq!(indicators.len(), 8);
        assert_eq!(indicators["federalFundsRate"], 5.5);
        assert_eq!(snapshot.indices[0].symbol, "S&P 500");
    }

    #[test]
    fn test_jitter_bounds() {
        let (baseline, _) = load_baseline();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let jittered = jitter(&baseline, &mut rng);
            for (before, after) in baseline.indices.iter().zip(&jittered.indices) {
                assert_eq!(before.symbol, after.symbol);
                assert_eq!(before.change_percent, after.change_percent);
                assert!((after.value / before.value - 1.0).abs() <= 0.001 + 1e-12);
                let ratio = after.change / before.change;
                assert!((0.9..=1.1).contains(&ratio));
            }
            assert_eq!(jittered.commodities, baseline.commodities);
        }
    }

    #[tokio::test]
    async fn test_provider_does_not_drift() {
        let provider = SimulatedMarketProvider::new();
        for _ in 0..10 {
            provider.market_snapshot().await.unwrap();
        }
        let (baseline, indicators) = load_baseline();
        assert_eq!(provider.baseline(), &baseline);
        assert_eq!(provider.economic_indicators().await.unwrap(), indicators);
    }
}
