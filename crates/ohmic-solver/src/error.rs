//! Error types for ohmic-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("singular matrix (pivot magnitude below epsilon)")]
    SingularMatrix,

    #[error("invalid analysis request: {0}")]
    BadAnalysis(String),

    #[error("bad element value: {name} = {value}")]
    BadElementValue { name: String, value: f64 },

    #[error("newton iteration did not converge at t = {time:.6e} s")]
    NonConvergence { time: f64 },

    #[error(transparent)]
    Core(#[from] ohmic_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
