//! Core data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use smartfin_parser::DEFAULT_CATEGORY;

/// Owner of every transaction in this single-user demo
pub const DEMO_USER_ID: &str = "demo_user";

fn default_user_id() -> String {
    DEMO_USER_ID.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Transaction information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    #[serde(default)]
    pub id: String,
    /// Transaction date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Merchant name
    pub merchant: String,
    /// Spending category
    #[serde(default = "default_category")]
    pub category: String,
    /// Amount in currency units, rounded to cents
    pub amount: f64,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Set on subscription charges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl Transaction {
    /// Create a one-off transaction for the demo user
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        merchant: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            merchant: merchant.into(),
            category: category.into(),
            amount,
            user_id: default_user_id(),
            is_recurring: None,
        }
    }

    /// Mark as a recurring charge
    pub fn recurring(mut self) -> Self {
        self.is_recurring = Some(true);
        self
    }

    /// Whether this is a recurring charge
    pub fn is_recurring(&self) -> bool {
        self.is_recurring.unwrap_or(false)
    }

    /// Case-insensitive merchant match against any of `needles`
    pub fn merchant_contains_any(&self, needles: &[&str]) -> bool {
        let merchant = self.merchant.to_lowercase();
        needles.iter().any(|n| merchant.contains(n))
    }
}

/// Spending profile used to generate one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub name: &'static str,
    /// Average monthly spend
    pub avg_monthly: f64,
    /// Fraction by which the monthly total may vary
    pub variance: f64,
    /// Expected transactions per month
    pub frequency: u32,
    pub merchants: &'static [&'static str],
}

/// Fixed monthly subscription charge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubscriptionDef {
    pub merchant: &'static str,
    pub amount: f64,
    pub category: &'static str,
}

/// Stock market index quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub symbol: String,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Commodity quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    pub symbol: String,
    pub value: f64,
    pub change: f64,
    pub unit: String,
}

/// Market figures returned by `/api/market`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub indices: Vec<MarketIndex>,
    pub commodities: Vec<Commodity>,
}

/// Indicator name to value
pub type EconomicIndicators = BTreeMap<String, f64>;
