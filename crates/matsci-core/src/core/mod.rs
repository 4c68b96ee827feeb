//! # Core Module
//!
//! Stateless building blocks shared by every screen.
//!
//! - **Models** ([`models`]) - materials, elements, formulas, chat messages and
//!   calculation rows
//! - **Seed Data** ([`data`]) - the embedded, immutable catalogues and template files
//! - **File I/O** ([`io`]) - input-file loading and Quantum ESPRESSO deck summaries
//! - **Utilities** ([`utils`]) - display formatting for optional and non-finite values

pub mod data;
pub mod io;
pub mod models;
pub mod utils;
