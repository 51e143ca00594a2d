//! Report structures for API responses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::Transaction;
use super::types::InsightType;

/// Running total for a category or merchant
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub total: f64,
    pub count: usize,
}

impl CategoryTotal {
    pub fn add(&mut self, amount: f64) {
        self.total += amount;
        self.count += 1;
    }
}

/// Spending summary over the most recent transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_spent: f64,
    pub transaction_count: usize,
    pub average_transaction: f64,
    pub top_category: String,
    pub categories_breakdown: BTreeMap<String, CategoryTotal>,
}

/// A single observation about recent spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Projected yearly savings (coffee)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<f64>,
    /// Distinct recurring merchants (subscriptions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<Vec<String>>,
    /// Example transactions (outliers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
}

impl Insight {
    pub fn new(
        insight_type: InsightType,
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            category: category.into(),
            title: title.into(),
            description: description.into(),
            recommendation: None,
            potential_savings: None,
            subscriptions: None,
            transactions: None,
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// Average spend per period, derived from the number of distinct days
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patterns {
    pub daily_average: f64,
    pub weekly_average: f64,
    pub monthly_projection: f64,
}

/// Rule-based advice attached to an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub recommendation_type: InsightType,
    pub text: String,
}

/// Full breakdown of a caller-supplied transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub total_spent: f64,
    pub average_transaction: f64,
    pub categories: BTreeMap<String, CategoryTotal>,
    pub merchants: BTreeMap<String, CategoryTotal>,
    pub patterns: Patterns,
    pub recommendations: Vec<Recommendation>,
}

/// One page of filtered transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Outcome of a statement upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub transactions_added: usize,
    pub rows_rejected: usize,
    pub total_transactions: usize,
}
