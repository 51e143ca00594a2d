//! `date,merchant,amount,category` statement parsing

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::ParseError;

/// Category assigned to rows without one
pub const DEFAULT_CATEGORY: &str = "Other";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row accepted for import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRow {
    /// 1-based line number in the uploaded text
    pub line: u64,
    pub date: NaiveDate,
    pub merchant: String,
    /// Cent-rounded, non-negative amount
    pub amount: f64,
    pub category: String,
}

/// A row that had all required fields but could not be imported
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

/// Result of parsing one upload
#[derive(Debug, Clone, Default)]
pub struct CsvImport {
    pub rows: Vec<ImportedRow>,
    pub rejected: Vec<RejectedRow>,
    /// Rows skipped because date, merchant or amount was missing
    pub skipped: usize,
}

/// CSV parser for uploaded statements
pub struct CsvStatementParser;

impl CsvStatementParser {
    /// Parse a statement body. The first line is always treated as a header.
    /// Text that is not valid UTF-8 fails with `ParseError::Csv`.
    pub fn parse<B: AsRef<[u8]> + ?Sized>(content: &B) -> Result<CsvImport, ParseError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_ref());

        let mut import = CsvImport::default();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let field = |idx: usize| record.get(idx).filter(|s| !s.is_empty());
            let (Some(date), Some(merchant), Some(amount)) = (field(0), field(1), field(2)) else {
                import.skipped += 1;
                continue;
            };
            let category = field(3).unwrap_or(DEFAULT_CATEGORY);

            match Self::parse_row(line, date, merchant, amount, category) {
                Ok(row) => import.rows.push(row),
                Err(reason) => {
                    log::debug!("Rejected CSV line {}: {}", line, reason);
                    import.rejected.push(RejectedRow { line, reason });
                }
            }
        }

        Ok(import)
    }

    fn parse_row(
        line: u64,
        date: &str,
        merchant: &str,
        amount: &str,
        category: &str,
    ) -> Result<ImportedRow, String> {
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", date))?;

        let amount = Self::parse_amount(amount)?;

        Ok(ImportedRow {
            line,
            date,
            merchant: merchant.to_string(),
            amount,
            category: category.to_string(),
        })
    }

    /// Parse a decimal amount, rounded to cents. Negative amounts are refused.
    pub fn parse_amount(raw: &str) -> Result<f64, String> {
        let value = Decimal::from_str(raw.trim_start_matches('$'))
            .map_err(|_| format!("invalid amount '{}'", raw))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(format!("negative amount '{}'", raw));
        }
        value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .ok_or_else(|| format!("amount '{}' out of range", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_row() {
        let import = CsvStatementParser::parse(
            "date,merchant,amount,category\n2024-01-01,Acme,12.50,Shopping",
        )
        .unwrap();
        assert_eq!(import.rows.len(), 1);
        let row = &import.rows[0];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(row.merchant, "Acme");
        assert_eq!(row.amount, 12.5);
        assert_eq!(row.category, "Shopping");
        assert_eq!(row.line, 2);
    }

    #[test]
    fn test_header_only_and_empty_input() {
        assert!(CsvStatementParser::parse("date,merchant,amount,category\n")
            .unwrap()
            .rows
            .is_empty());
        assert!(CsvStatementParser::parse("").unwrap().rows.is_empty());
    }

    #[test]
    fn test_missing_category_defaults_to_other() {
        let import = CsvStatementParser::parse(
            "date,merchant,amount,category\n2024-02-03,Corner Store,4.20\n2024-02-04,Bakery,3.00,",
        )
        .unwrap();
        assert_eq!(import.rows.len(), 2);
        assert!(import.rows.iter().all(|r| r.category == DEFAULT_CATEGORY));
    }

    #[test]
    fn test_rows_missing_required_fields_are_skipped() {
        let import = CsvStatementParser::parse(
            "date,merchant,amount,category\n2024-01-01,,5.00,Food\n,Acme,1.00,Food\n2024-01-02,Acme\n\n2024-01-03,Acme,2.00,Food",
        )
        .unwrap();
        assert_eq!(import.rows.len(), 1);
        assert_eq!(import.skipped, 3);
        assert!(import.rejected.is_empty());
    }

    #[test]
    fn test_malformed_amount_and_date_rejected() {
        let import = CsvStatementParser::parse(
            "date,merchant,amount,category\n2024-01-01,Acme,abc,Food\n01/02/2024,Acme,1.00,Food\n2024-01-03,Acme,NaN,Food\n2024-01-04,Acme,-3.00,Food",
        )
        .unwrap();
        assert!(import.rows.is_empty());
        assert_eq!(import.rejected.len(), 4);
        assert_eq!(import.rejected[0].line, 2);
        assert!(import.rejected[0].reason.contains("amount"));
        assert!(import.rejected[1].reason.contains("date"));
    }

    #[test]
    fn test_fields_are_trimmed_and_amount_rounded() {
        let import = CsvStatementParser::parse(
            "date, merchant, amount, category\n 2024-03-01 , Blue Bottle Coffee , 5.555 , Food & Dining ",
        )
        .unwrap();
        let row = &import.rows[0];
        assert_eq!(row.merchant, "Blue Bottle Coffee");
        assert_eq!(row.category, "Food & Dining");
        assert_eq!(row.amount, 5.56);
    }

    #[test]
    fn test_quoted_merchant_with_comma() {
        let import = CsvStatementParser::parse(
            "date,merchant,amount,category\n2024-03-01,\"Acme, Inc\",10,Shopping",
        )
        .unwrap();
        assert_eq!(import.rows[0].merchant, "Acme, Inc");
        assert_eq!(import.rows[0].amount, 10.0);
    }

    #[test]
    fn test_invalid_utf8_is_csv_error() {
        let body = b"date,merchant,amount,category\n2024-01-01,Ac\xff\xfeme,12.50,Shopping\n";
        let err = CsvStatementParser::parse(&body[..]).unwrap_err();
        let ParseError::Csv { location, .. } = err;
        assert!(location.starts_with("line"), "{}", location);
    }

    #[test]
    fn test_parse_amount_accepts_dollar_prefix() {
        assert_eq!(CsvStatementParser::parse_amount("$7.25").unwrap(), 7.25);
        assert_eq!(CsvStatementParser::parse_amount("0").unwrap(), 0.0);
    }
}
