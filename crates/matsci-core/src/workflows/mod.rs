//! # Workflows Module
//!
//! Top-level entry points that tie the engine's screen states together.
//!
//! - **Quantum Workflow** ([`quantum`]) - The computation screen: input files, simulation
//!   parameters, the tick-driven mock calculation, saving and upload status.
//! - **Session** ([`session`]) - Route ownership. A session holds exactly one live screen
//!   and rebuilds it on every navigation.

pub mod quantum;
pub mod session;
