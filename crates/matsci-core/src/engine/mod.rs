//! # Engine Module
//!
//! Screen state and the logic that drives it. Every screen owns an explicit state
//! container updated by an `apply(event)` reducer; nothing here performs I/O or reads a
//! clock, so the whole module is testable without timers.
//!
//! ## Architecture
//!
//! - **Navigation** ([`router`]) - Path resolution with a silent fallback to the default screen
//! - **Materials** ([`materials`], [`comparison`], [`environment`]) - Catalogue filtering,
//!   pairwise comparison and the temperature-driven property response
//! - **Periodic Table** ([`periodic`]) - Grid layout, color palettes and element search
//! - **Calculator** ([`calculator`], [`plot`]) - The keypad state machine and expression sampling
//! - **Chat** ([`chat`]) - Ordered keyword rules with a fixed fallback
//! - **Computation** ([`calculation`], [`scheduler`], [`upload`]) - The tick-driven mock
//!   calculation and the upload status
//! - **Dashboard** ([`status`]) - Randomly walking system gauges
//! - **Configuration** ([`config`]) - Validated builders for workflow and simulation settings
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - The umbrella error type

pub mod calculation;
pub mod calculator;
pub mod chat;
pub mod comparison;
pub mod config;
pub mod environment;
pub mod error;
pub mod materials;
pub mod periodic;
pub mod plot;
pub mod progress;
pub mod router;
pub mod scheduler;
pub mod status;
pub mod upload;
