//! Basic types for the core module

use serde::{Deserialize, Serialize};

/// Kind of an insight or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    /// Spending worth cutting back on
    Warning,
    /// Neutral observation
    Info,
    /// Unusual activity
    Alert,
}
