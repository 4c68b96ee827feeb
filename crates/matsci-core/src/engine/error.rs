use thiserror::Error;

use super::calculator::EvalError;
use super::config::ConfigError;
use super::plot::PlotError;
use crate::core::data::{DataError, LookupError};
use crate::core::io::files::FileLoadError;
use crate::core::io::qe::QeParseError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Expression evaluation failed: {source}")]
    Eval {
        #[from]
        source: EvalError,
    },

    #[error("Plot sampling failed: {source}")]
    Plot {
        #[from]
        source: PlotError,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Embedded data could not be loaded: {0}")]
    Data(#[from] DataError),

    #[error(transparent)]
    File(#[from] FileLoadError),

    #[error("Quantum ESPRESSO input error: {0}")]
    QeParse(#[from] QeParseError),

    #[error("Workflow phase '{phase}' failed: {reason}")]
    PhaseFailed { phase: &'static str, reason: String },
}
