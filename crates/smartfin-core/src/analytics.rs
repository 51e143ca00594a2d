//! Spending analytics over transaction lists
//!
//! All functions are pure and operate on the slice they are given, in order.

use std::collections::{BTreeMap, HashSet};

use smartfin_utils::{format_currency, percentage, round_cents};

use crate::error::{CoreError, CoreResult};
use crate::models::Transaction;
use crate::reports::{Analysis, CategoryTotal, Insight, Patterns, Recommendation, Summary};
use crate::types::InsightType;

/// Transactions covered by a summary
pub const SUMMARY_LIMIT: usize = 100;
/// Transactions covered by insight detection
pub const INSIGHT_WINDOW: usize = 30;

const COFFEE_KEYWORDS: [&str; 2] = ["starbucks", "coffee"];
/// Coffee insight needs strictly more purchases than this
const COFFEE_MIN_PURCHASES: usize = 3;
/// Share of coffee spend assumed saved by brewing at home
const COFFEE_SAVINGS_RATE: f64 = 0.7;
const OUTLIER_FACTOR: f64 = 3.0;
const OUTLIER_EXAMPLES: usize = 3;
const MONTHLY_WARNING_THRESHOLD: f64 = 5000.0;
const MERCHANT_SHARE_THRESHOLD: f64 = 0.2;

fn total_of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> f64 {
    transactions.into_iter().map(|t| t.amount).sum()
}

/// Entry with the highest total. Ties go to the first key in order.
fn top_entry(totals: &BTreeMap<String, CategoryTotal>) -> Option<(&String, &CategoryTotal)> {
    totals.iter().fold(None, |best, (name, entry)| match best {
        Some((_, b)) if b.total >= entry.total => best,
        _ => Some((name, entry)),
    })
}

fn group_by<F>(transactions: &[Transaction], key: F) -> BTreeMap<String, CategoryTotal>
where
    F: Fn(&Transaction) -> &str,
{
    let mut totals: BTreeMap<String, CategoryTotal> = BTreeMap::new();
    for tx in transactions {
        totals.entry(key(tx).to_string()).or_default().add(tx.amount);
    }
    totals
}

/// Summarize the first `limit` transactions
pub fn summarize(transactions: &[Transaction], limit: usize) -> CoreResult<Summary> {
    let recent = &transactions[..limit.min(transactions.len())];
    let categories = group_by(recent, |t| t.category.as_str());

    let Some((top_category, _)) = top_entry(&categories) else {
        return Err(CoreError::EmptyDataset {
            operation: "summary".to_string(),
        });
    };
    let top_category = top_category.clone();

    let total_spent = total_of(recent);
    Ok(Summary {
        total_spent: round_cents(total_spent),
        transaction_count: recent.len(),
        average_transaction: round_cents(total_spent / recent.len() as f64),
        top_category,
        categories_breakdown: categories,
    })
}

/// Derive insights from the first `window` transactions.
///
/// Insights come out in a fixed order: coffee, subscriptions, outliers,
/// top category. An empty window produces none.
pub fn derive_insights(transactions: &[Transaction], window: usize) -> Vec<Insight> {
    let recent = &transactions[..window.min(transactions.len())];
    if recent.is_empty() {
        return Vec::new();
    }

    let window_total = total_of(recent);

    [
        coffee_insight(recent),
        subscription_insight(recent),
        outlier_insight(recent, window_total),
        top_category_insight(recent, window_total),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn coffee_insight(recent: &[Transaction]) -> Option<Insight> {
    let coffee: Vec<_> = recent
        .iter()
        .filter(|t| t.merchant_contains_any(&COFFEE_KEYWORDS))
        .collect();
    if coffee.len() <= COFFEE_MIN_PURCHASES {
        return None;
    }

    let total = total_of(coffee.iter().copied());
    let monthly_savings = total * COFFEE_SAVINGS_RATE;
    let mut insight = Insight::new(
        InsightType::Warning,
        "Coffee Spending",
        "High Coffee Expenditure Detected",
        format!(
            "You've spent {} on coffee across {} of your {} most recent purchases.",
            format_currency(total),
            coffee.len(),
            recent.len()
        ),
    )
    .with_recommendation(format!(
        "Consider brewing at home to save approximately {} monthly.",
        format_currency(monthly_savings)
    ));
    insight.potential_savings = Some(round_cents(monthly_savings * 12.0));
    Some(insight)
}

fn subscription_insight(recent: &[Transaction]) -> Option<Insight> {
    let recurring: Vec<_> = recent.iter().filter(|t| t.is_recurring()).collect();
    if recurring.is_empty() {
        return None;
    }

    let mut seen = HashSet::new();
    let merchants: Vec<String> = recurring
        .iter()
        .filter(|t| seen.insert(t.merchant.as_str()))
        .map(|t| t.merchant.clone())
        .collect();

    let total = total_of(recurring.iter().copied());
    let mut insight = Insight::new(
        InsightType::Info,
        "Subscriptions",
        "Active Subscriptions Summary",
        format!(
            "You have {} active subscriptions totaling {} per month.",
            merchants.len(),
            format_currency(total)
        ),
    )
    .with_recommendation("Review these subscriptions to ensure you're using all services.");
    insight.subscriptions = Some(merchants);
    Some(insight)
}

fn outlier_insight(recent: &[Transaction], window_total: f64) -> Option<Insight> {
    let mean = window_total / recent.len() as f64;
    let flagged: Vec<_> = recent
        .iter()
        .filter(|t| t.amount > mean * OUTLIER_FACTOR)
        .collect();
    if flagged.is_empty() {
        return None;
    }

    let mut insight = Insight::new(
        InsightType::Alert,
        "Unusual Activity",
        "Large Transactions Detected",
        format!(
            "{} transactions exceeded 3x your average transaction of {}.",
            flagged.len(),
            format_currency(mean)
        ),
    );
    insight.transactions = Some(flagged.into_iter().take(OUTLIER_EXAMPLES).cloned().collect());
    Some(insight)
}

fn top_category_insight(recent: &[Transaction], window_total: f64) -> Option<Insight> {
    let categories = group_by(recent, |t| t.category.as_str());
    let (name, entry) = top_entry(&categories)?;

    Some(
        Insight::new(
            InsightType::Info,
            "Spending Patterns",
            "Top Spending Category",
            format!(
                "{} accounts for {} ({:.1}%) of your recent spending.",
                name,
                format_currency(entry.total),
                percentage(entry.total, window_total)
            ),
        )
        .with_recommendation(format!(
            "Focus on optimizing {} expenses for maximum savings impact.",
            name
        )),
    )
}

/// Analyze a caller-supplied list of transactions
pub fn analyze(transactions: &[Transaction]) -> CoreResult<Analysis> {
    if transactions.is_empty() {
        return Err(CoreError::InvalidInput {
            message: "transactions must not be empty".to_string(),
        });
    }

    let total_spent = total_of(transactions);
    let categories = group_by(transactions, |t| t.category.as_str());
    let merchants = group_by(transactions, |t| t.merchant.as_str());

    let days = transactions.iter().map(|t| t.date).collect::<HashSet<_>>().len() as f64;
    let patterns = Patterns {
        daily_average: total_spent / days,
        weekly_average: total_spent * 7.0 / days,
        monthly_projection: total_spent * 30.0 / days,
    };

    let mut recommendations = Vec::new();
    if patterns.monthly_projection > MONTHLY_WARNING_THRESHOLD {
        recommendations.push(Recommendation {
            recommendation_type: InsightType::Warning,
            text: format!(
                "Monthly spending exceeds {}. Consider setting category budgets.",
                format_currency(MONTHLY_WARNING_THRESHOLD)
            ),
        });
    }

    if let Some((name, entry)) = top_entry(&merchants) {
        if entry.total > total_spent * MERCHANT_SHARE_THRESHOLD {
            recommendations.push(Recommendation {
                recommendation_type: InsightType::Info,
                text: format!(
                    "{} accounts for over 20% of spending. Look for alternatives or discounts.",
                    name
                ),
            });
        }
    }

    Ok(Analysis {
        total_spent: round_cents(total_spent),
        average_transaction: round_cents(total_spent / transactions.len() as f64),
        categories,
        merchants,
        patterns: Patterns {
            daily_average: round_cents(patterns.daily_average),
            weekly_average: round_cents(patterns.weekly_average),
            monthly_projection: round_cents(patterns.monthly_projection),
        },
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(day: u32, merchant: &str, category: &str, amount: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        Transaction::new(format!("t{}-{}", day, merchant), date, merchant, category, amount)
    }

    fn titles(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.category.as_str()).collect()
    }

    #[test]
    fn test_summarize_totals_and_top_category() {
        let txs = vec![
            tx(5, "Whole Foods", "Food & Dining", 40.0),
            tx(4, "Shell Gas", "Transportation", 55.5),
            tx(3, "Chipotle", "Food & Dining", 12.25),
            tx(2, "Target", "Shopping", 80.0),
            tx(1, "Uber", "Transportation", 30.0),
        ];
        let summary = summarize(&txs, SUMMARY_LIMIT).unwrap();

        assert_eq!(summary.total_spent, 217.75);
        assert_eq!(summary.transaction_count, 5);
        assert_eq!(summary.average_transaction, 43.55);
        assert_eq!(summary.top_category, "Transportation");
        let food = summary.categories_breakdown["Food & Dining"];
        assert_eq!(food.count, 2);
        assert_eq!(food.total, 52.25);
    }

    #[test]
    fn test_summarize_respects_limit() {
        let txs = vec![
            tx(3, "A", "Small", 1.0),
            tx(2, "B", "Big", 100.0),
        ];
        let summary = summarize(&txs, 1).unwrap();
        assert_eq!(summary.transaction_count, 1);
        assert_eq!(summary.top_category, "Small");
    }

    #[test]
    fn test_summarize_empty_fails() {
        let err = summarize(&[], SUMMARY_LIMIT).unwrap_err();
        assert!(matches!(err, CoreError::EmptyDataset { .. }));
    }

    #[test]
    fn test_coffee_insight_threshold() {
        let mut txs: Vec<_> = (1..=3).map(|d| tx(d, "Starbucks", "Food & Dining", 6.0)).collect();
        assert!(!titles(&derive_insights(&txs, INSIGHT_WINDOW)).contains(&"Coffee Spending"));

        txs.push(tx(4, "Blue Bottle COFFEE", "Food & Dining", 6.0));
        let insights = derive_insights(&txs, INSIGHT_WINDOW);
        let coffee = insights.iter().find(|i| i.category == "Coffee Spending").unwrap();
        assert_eq!(coffee.insight_type, InsightType::Warning);
        assert_eq!(coffee.potential_savings, Some(round_cents(24.0 * 0.7 * 12.0)));
    }

    #[test]
    fn test_coffee_only_counts_window() {
        let txs: Vec<_> = (1..=5).map(|d| tx(d, "Starbucks", "Food & Dining", 6.0)).collect();
        assert!(!titles(&derive_insights(&txs, 3)).contains(&"Coffee Spending"));
    }

    #[test]
    fn test_subscription_merchants_listed_once() {
        let txs = vec![
            tx(1, "Netflix", "Entertainment", 15.99).recurring(),
            tx(1, "Spotify", "Entertainment", 9.99).recurring(),
            tx(2, "Netflix", "Entertainment", 15.99).recurring(),
            tx(3, "Target", "Shopping", 20.0),
        ];
        let insights = derive_insights(&txs, INSIGHT_WINDOW);
        let subs = insights.iter().find(|i| i.category == "Subscriptions").unwrap();
        assert_eq!(
            subs.subscriptions.as_deref(),
            Some(&["Netflix".to_string(), "Spotify".to_string()][..])
        );
    }

    #[test]
    fn test_no_subscription_insight_without_recurring() {
        let txs = vec![tx(1, "Target", "Shopping", 20.0)];
        assert!(!titles(&derive_insights(&txs, INSIGHT_WINDOW)).contains(&"Subscriptions"));
    }

    #[test]
    fn test_outliers_strictly_above_three_times_mean() {
        let txs = vec![
            tx(4, "A", "Misc", 10.0),
            tx(3, "B", "Misc", 10.0),
            tx(2, "C", "Misc", 10.0),
            tx(1, "D", "Misc", 100.0),
        ];
        let insights = derive_insights(&txs, INSIGHT_WINDOW);
        let outliers = insights.iter().find(|i| i.category == "Unusual Activity").unwrap();
        let flagged = outliers.transactions.as_ref().unwrap();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].amount, 100.0);
        assert_eq!(outliers.insight_type, InsightType::Alert);
    }

    #[test]
    fn test_no_outliers_for_uniform_amounts() {
        let txs: Vec<_> = (1..=5).map(|d| tx(d, "A", "Misc", 10.0)).collect();
        assert!(!titles(&derive_insights(&txs, INSIGHT_WINDOW)).contains(&"Unusual Activity"));
    }

    #[test]
    fn test_outlier_examples_capped() {
        let mut txs: Vec<_> = (1..=20).map(|d| tx(d, "A", "Misc", 1.0)).collect();
        txs.extend((21..=25).map(|d| tx(d, "B", "Misc", 50.0)));
        let insights = derive_insights(&txs, INSIGHT_WINDOW);
        let outliers = insights.iter().find(|i| i.category == "Unusual Activity").unwrap();
        assert_eq!(outliers.transactions.as_ref().unwrap().len(), 3);
        assert!(outliers.description.starts_with("5 transactions"));
    }

    #[test]
    fn test_insight_order_and_top_category_always_present() {
        let mut txs: Vec<_> = (1..=4).map(|d| tx(d, "Starbucks", "Food & Dining", 5.0)).collect();
        txs.push(tx(5, "Netflix", "Entertainment", 15.99).recurring());
        txs.push(tx(6, "Property Management", "Housing", 1800.0));

        let insights = derive_insights(&txs, INSIGHT_WINDOW);
        assert_eq!(
            titles(&insights),
            vec!["Coffee Spending", "Subscriptions", "Unusual Activity", "Spending Patterns"]
        );
        assert!(insights[3].description.starts_with("Housing"));

        let plain = vec![tx(1, "Target", "Shopping", 20.0)];
        assert_eq!(titles(&derive_insights(&plain, INSIGHT_WINDOW)), vec!["Spending Patterns"]);
        assert!(derive_insights(&[], INSIGHT_WINDOW).is_empty());
    }

    #[test]
    fn test_analyze_single_transaction() {
        let analysis = analyze(&[tx(1, "Acme", "Shopping", 42.5)]).unwrap();
        assert_eq!(analysis.total_spent, 42.5);
        assert_eq!(analysis.average_transaction, 42.5);
        assert_eq!(analysis.patterns.daily_average, 42.5);
        assert_eq!(analysis.patterns.weekly_average, 297.5);
        assert_eq!(analysis.patterns.monthly_projection, 1275.0);
        assert_eq!(analysis.categories["Shopping"].count, 1);
        // A single merchant is 100% of spend
        assert_eq!(analysis.recommendations.len(), 1);
        assert_eq!(analysis.recommendations[0].recommendation_type, InsightType::Info);
    }

    #[test]
    fn test_monthly_warning_requires_strictly_more_than_threshold() {
        let at_threshold = vec![
            tx(1, "A", "Misc", 200.0),
            tx(2, "B", "Misc", 200.0),
            tx(3, "C", "Misc", 100.0),
        ];
        let analysis = analyze(&at_threshold).unwrap();
        assert_eq!(analysis.patterns.monthly_projection, 5000.0);
        assert!(analysis
            .recommendations
            .iter()
            .all(|r| r.recommendation_type != InsightType::Warning));

        let above = vec![
            tx(1, "A", "Misc", 200.0),
            tx(2, "B", "Misc", 200.0),
            tx(3, "C", "Misc", 100.01),
        ];
        let analysis = analyze(&above).unwrap();
        assert_eq!(analysis.recommendations[0].recommendation_type, InsightType::Warning);
    }

    #[test]
    fn test_merchant_share_rule() {
        let spread: Vec<_> = (1..=5)
            .map(|d| tx(d, &format!("Shop {}", d), "Misc", 10.0))
            .collect();
        // Each merchant is exactly 20%, which does not trigger
        assert!(analyze(&spread).unwrap().recommendations.is_empty());

        let mut skewed = spread.clone();
        skewed.push(tx(6, "Shop 1", "Misc", 1.0));
        let analysis = analyze(&skewed).unwrap();
        assert_eq!(analysis.recommendations.len(), 1);
        assert!(analysis.recommendations[0].text.starts_with("Shop 1"));
        assert_eq!(analysis.merchants["Shop 1"].count, 2);
    }

    #[test]
    fn test_analyze_empty_is_invalid_input() {
        assert!(matches!(analyze(&[]), Err(CoreError::InvalidInput { .. })));
    }
}
