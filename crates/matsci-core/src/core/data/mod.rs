//! Embedded seed data: material records, the periodic table, the formula library and
//! the Quantum ESPRESSO template deck.
//!
//! Everything here is compiled into the binary and parsed at most once.

use thiserror::Error;

pub mod elements;
pub mod formulas;
pub mod materials;
pub mod templates;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV parsing error in embedded table '{table}': {source}")]
    Csv {
        table: &'static str,
        source: csv::Error,
    },
    #[error("TOML parsing error in embedded table '{table}': {source}")]
    Toml {
        table: &'static str,
        source: toml::de::Error,
    },
    #[error("Invalid record in embedded table '{table}' (row {row}): {message}")]
    InvalidRecord {
        table: &'static str,
        row: usize,
        message: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LookupError {
    #[error("No material with id '{0}'")]
    MaterialNotFound(String),
    #[error("No element matching '{0}'")]
    ElementNotFound(String),
    #[error("No formula with id '{0}'")]
    FormulaNotFound(String),
}
