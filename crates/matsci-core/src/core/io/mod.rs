//! Input/output for the computation screens.
//!
//! [`files`] loads user-supplied input decks under an extension whitelist and keeps the
//! editor's file set; [`qe`] reads a Quantum ESPRESSO `pw.x` input into a summary;
//! [`export`] writes the mock calculation series as CSV.

pub mod export;
pub mod files;
pub mod qe;
