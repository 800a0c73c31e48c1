//! Error type shared by the library and both binaries

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    /// Slope not strictly positive, demand intercept not positive, or a non-finite coefficient
    #[error("invalid {curve} curve: {reason}")]
    InvalidCurve { curve: &'static str, reason: String },

    /// Negative or non-finite tax, subsidy or control price
    #[error("invalid intervention: {0}")]
    InvalidIntervention(String),

    /// Solved equilibrium lies outside the positive quadrant
    #[error(
        "no valid {stage} equilibrium: price {price:.4}, quantity {quantity:.4} (both must be non-negative)"
    )]
    DegenerateEquilibrium {
        stage: &'static str,
        price: f64,
        quantity: f64,
    },

    /// Non-numeric entry where a number was expected
    #[error("expected a number for {field}, got {input:?}")]
    InputFormat { field: String, input: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MarketError>;
