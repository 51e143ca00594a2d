//! In-memory transaction store
//!
//! The dataset is kept sorted newest first. New rows are inserted ahead of
//! existing ones and the list is re-sorted stably, so among equal dates the
//! most recently added rows come first.

use chrono::NaiveDate;
use smartfin_parser::CsvImport;
use smartfin_utils::generate_id;

use crate::models::Transaction;
use crate::reports::{ImportSummary, TransactionPage};

/// Default page size for transaction listings
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Listing criteria for `Dataset::filter`
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Inclusive lower date bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end_date: Option<NaiveDate>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            category: None,
            start_date: None,
            end_date: None,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl TransactionFilter {
    /// Check whether a transaction satisfies the category and date criteria
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(ref category) = self.category {
            if &tx.category != category {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if tx.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if tx.date > end {
                return false;
            }
        }
        true
    }
}

/// Shared transaction collection
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    transactions: Vec<Transaction>,
    upload_batches: u64,
}

impl Dataset {
    /// Create a dataset, sorting the given transactions newest first
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        sort_newest_first(&mut transactions);
        Self {
            transactions,
            upload_batches: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All transactions, newest first
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The `n` most recent transactions
    pub fn recent(&self, n: usize) -> &[Transaction] {
        &self.transactions[..n.min(self.transactions.len())]
    }

    /// Insert a batch ahead of the existing rows and restore date order
    pub fn prepend(&mut self, batch: Vec<Transaction>) {
        if batch.is_empty() {
            return;
        }
        let mut merged = batch;
        merged.append(&mut self.transactions);
        sort_newest_first(&mut merged);
        self.transactions = merged;
    }

    /// Add parsed statement rows, assigning each an id unique to this upload
    pub fn import(&mut self, import: CsvImport) -> ImportSummary {
        self.upload_batches += 1;
        let batch = self.upload_batches;

        let transactions: Vec<Transaction> = import
            .rows
            .into_iter()
            .map(|row| {
                Transaction::new(
                    generate_id("upload", &[&batch, &row.line]),
                    row.date,
                    row.merchant,
                    row.category,
                    row.amount,
                )
            })
            .collect();

        let added = transactions.len();
        self.prepend(transactions);

        log::info!(
            "Imported batch {}: {} added, {} rejected, {} skipped",
            batch,
            added,
            import.rejected.len(),
            import.skipped
        );

        ImportSummary {
            transactions_added: added,
            rows_rejected: import.rejected.len(),
            total_transactions: self.len(),
        }
    }

    /// One page of transactions matching `filter`, with the total match count
    pub fn filter(&self, filter: &TransactionFilter) -> TransactionPage {
        let matching: Vec<&Transaction> = self.transactions.iter().filter(|t| filter.matches(t)).collect();
        let total = matching.len();
        let transactions = matching
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect();

        TransactionPage {
            transactions,
            total,
            limit: filter.limit,
            offset: filter.offset,
        }
    }
}

fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
