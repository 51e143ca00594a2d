//! CSV statement import
//!
//! Turns the raw body of an upload into transaction rows. The parser
//! knows nothing about the dataset; ids and ownership are assigned by the
//! caller.

pub mod error;
pub mod statement;

use std::sync::Arc;

pub use error::ParseError;
pub use statement::{CsvImport, CsvStatementParser, ImportedRow, RejectedRow, DEFAULT_CATEGORY};

/// Parser reference type
pub type ParserRef = Arc<dyn StatementParser>;

/// Trait for statement parsers
pub trait StatementParser: Send + Sync {
    /// Parse a raw statement body into importable rows
    fn parse(&self, content: &[u8]) -> Result<CsvImport, ParseError>;
}

/// Default parser implementation
#[derive(Debug, Default)]
pub struct DefaultStatementParser;

impl StatementParser for DefaultStatementParser {
    fn parse(&self, content: &[u8]) -> Result<CsvImport, ParseError> {
        CsvStatementParser::parse(content)
    }
}
