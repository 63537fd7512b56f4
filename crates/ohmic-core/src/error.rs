//! Error types for ohmic-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("degenerate complex division (|denominator|^2 below epsilon)")]
    ArithmeticDegenerate,
}

pub type Result<T> = std::result::Result<T, Error>;
