//! # Material Science Agent Core Library
//!
//! The view-state library behind the Material Science Agent front ends: a materials
//! database, a periodic table, a scientific calculator with function plotting, a
//! rule-based chat assistant and a mock quantum-computation workflow.
//!
//! ## Architecture
//!
//! The crate keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Material`, `Element`,
//!   `Formula`), the embedded seed data and the input-file readers for Quantum
//!   ESPRESSO decks.
//!
//! - **[`engine`]: The Logic Core.** One explicit state container per screen, each
//!   updated by an `apply(event)` reducer, together with the expression evaluator,
//!   the plot sampler, the chat rules and the cancellable tick scheduler that drives
//!   every timer-based view.
//!
//! - **[`workflows`]: The Public API.** Ties the engine pieces into whole procedures:
//!   the routed [`workflows::session::Session`] and the quantum calculation run.
//!
//! Nothing in this crate sleeps or spawns. Timers are modelled as tick counts so a
//! front end decides how ticks are produced (tokio intervals in the CLI, direct calls
//! in tests).

pub mod core;
pub mod engine;
pub mod workflows;
