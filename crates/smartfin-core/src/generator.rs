//! Synthetic transaction dataset
//!
//! Household spending is modelled per category as a randomized monthly total
//! split over a randomized number of purchases, plus fixed subscription
//! charges on the first of each month.

use chrono::{Datelike, Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smartfin_config::DataConfig;
use smartfin_utils::{generate_id, round_cents};

use crate::models::{CategoryProfile, SubscriptionDef, Transaction};

/// Latest day of month a generated purchase may fall on
const MAX_PURCHASE_DAY: u32 = 28;

/// Monthly spending profiles, based on typical household expenditure
pub const CATEGORY_PROFILES: &[CategoryProfile] = &[
    CategoryProfile {
        name: "Food & Dining",
        avg_monthly: 750.0,
        variance: 0.2,
        frequency: 15,
        merchants: &["Whole Foods", "Starbucks", "Chipotle", "Subway", "Olive Garden", "McDonalds", "Trader Joes"],
    },
    CategoryProfile {
        name: "Transportation",
        avg_monthly: 820.0,
        variance: 0.3,
        frequency: 8,
        merchants: &["Shell Gas", "Chevron", "Uber", "Lyft", "Public Transit", "Auto Repair"],
    },
    CategoryProfile {
        name: "Housing",
        avg_monthly: 1800.0,
        variance: 0.1,
        frequency: 3,
        merchants: &["Property Management", "Home Depot", "Lowes", "Mortgage Payment"],
    },
    CategoryProfile {
        name: "Shopping",
        avg_monthly: 450.0,
        variance: 0.4,
        frequency: 10,
        merchants: &["Amazon", "Target", "Walmart", "Best Buy", "Costco", "Nike"],
    },
    CategoryProfile {
        name: "Entertainment",
        avg_monthly: 280.0,
        variance: 0.3,
        frequency: 6,
        merchants: &["Netflix", "Spotify", "AMC Theaters", "Steam Games", "Hulu", "Disney+"],
    },
    CategoryProfile {
        name: "Healthcare",
        avg_monthly: 380.0,
        variance: 0.5,
        frequency: 3,
        merchants: &["CVS Pharmacy", "Walgreens", "Kaiser", "Dental Care", "Vision Center"],
    },
    CategoryProfile {
        name: "Utilities",
        avg_monthly: 350.0,
        variance: 0.15,
        frequency: 4,
        merchants: &["PG&E Electric", "Water Company", "Comcast Internet", "Verizon"],
    },
    CategoryProfile {
        name: "Insurance",
        avg_monthly: 550.0,
        variance: 0.1,
        frequency: 2,
        merchants: &["State Farm", "Geico", "Blue Cross", "Life Insurance"],
    },
];

/// Subscriptions billed on the 1st of every month
pub const SUBSCRIPTIONS: &[SubscriptionDef] = &[
    SubscriptionDef { merchant: "Netflix", amount: 15.99, category: "Entertainment" },
    SubscriptionDef { merchant: "Spotify", amount: 9.99, category: "Entertainment" },
    SubscriptionDef { merchant: "Amazon Prime", amount: 14.99, category: "Shopping" },
    SubscriptionDef { merchant: "LA Fitness", amount: 34.99, category: "Healthcare" },
    SubscriptionDef { merchant: "Adobe Creative", amount: 52.99, category: "Software" },
    SubscriptionDef { merchant: "Hulu", amount: 12.99, category: "Entertainment" },
];

/// Generate `months_back` months of transactions ending at `today`.
///
/// Output is sorted by date, newest first. No generated date is later
/// than `today`.
pub fn generate<R: Rng + ?Sized>(
    profiles: &[CategoryProfile],
    subscriptions: &[SubscriptionDef],
    months_back: u32,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<Transaction> {
    let mut transactions = Vec::new();
    let current_month = today.with_day(1).unwrap_or(today);

    for month in 0..months_back {
        let Some(month_start) = current_month.checked_sub_months(Months::new(month)) else {
            break;
        };
        let last_day = if month == 0 { today.day().min(MAX_PURCHASE_DAY) } else { MAX_PURCHASE_DAY };

        for profile in profiles {
            if profile.merchants.is_empty() {
                continue;
            }

            let monthly_amount = profile.avg_monthly * (1.0 + rng.gen_range(-0.5..0.5) * profile.variance);
            let count = (profile.frequency as f64 * rng.gen_range(0.8..1.2)).round() as u32;
            if count == 0 {
                continue;
            }

            for _ in 0..count {
                let day = rng.gen_range(1..=last_day);
                let date = month_start.with_day(day).unwrap_or(month_start);
                let merchant = profile.merchants[rng.gen_range(0..profile.merchants.len())];
                let amount = monthly_amount / count as f64 * rng.gen_range(0.5..1.5);

                let id = generate_id("txn", &[&transactions.len()]);
                transactions.push(Transaction::new(id, date, merchant, profile.name, round_cents(amount)));
            }
        }
    }

    for month in 0..months_back {
        let Some(month_start) = current_month.checked_sub_months(Months::new(month)) else {
            break;
        };
        for sub in subscriptions {
            let id = generate_id("sub", &[&month, &sub.merchant]);
            transactions.push(
                Transaction::new(id, month_start, sub.merchant, sub.category, round_cents(sub.amount)).recurring(),
            );
        }
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}

/// Dataset generator bound to a seed and history length
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    months_back: u32,
    seed: Option<u64>,
}

impl DatasetGenerator {
    /// Generator that produces the same dataset for the same `seed` and day
    pub fn from_seed(months_back: u32, seed: u64) -> Self {
        Self { months_back, seed: Some(seed) }
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy(months_back: u32) -> Self {
        Self { months_back, seed: None }
    }

    /// Seeded generator when `data.seed` is set, entropy-seeded otherwise
    pub fn from_config(config: &DataConfig) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(config.months_back, seed),
            None => Self::from_entropy(config.months_back),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate the default dataset ending at `today`
    pub fn generate_until(&self, today: NaiveDate) -> Vec<Transaction> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generate(CATEGORY_PROFILES, SUBSCRIPTIONS, self.months_back, today, &mut rng)
    }

    /// Generate the default dataset ending today
    pub fn generate(&self) -> Vec<Transaction> {
        self.generate_until(Utc::now().date_naive())
    }
}
