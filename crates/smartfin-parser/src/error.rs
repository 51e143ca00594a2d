//! Error types for smartfin-parser

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("CSV error at {location}: {message}")]
    Csv {
        location: String,
        message: String,
    },
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        let location = err
            .position()
            .map(|p| format!("line {}", p.line()))
            .unwrap_or_else(|| "unknown".to_string());
        ParseError::Csv {
            location,
            message: err.to_string(),
        }
    }
}
