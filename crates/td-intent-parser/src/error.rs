//! Intent parsing error types.
//!
//! The `Display` text of each variant is the message shown to the operator,
//! so it is phrased as a complete sentence.

use thiserror::Error;

/// Example phrasings listed when no grammar matches.
pub const SUPPORTED_PHRASINGS: &str = concat!(
    "\"swap 100 WETH to POL\", ",
    "\"swap 100 WETH to POL when price reaches 3500\", ",
    "\"dca 100 WETH to POL every 5 minutes for 4 orders\", ",
    "\"convert 100 WETH, 500 POL to USDT\", or ",
    "\"convert 100 WETH to 50% POL and 50% USDT\"",
);

/// Reasons a line of intent text was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntentError {
    #[error("Intent text is required.")]
    Empty,

    /// A grammar matched syntactically but one of its values is unusable.
    #[error("{grammar} intent has invalid {field}.")]
    InvalidField {
        grammar: &'static str,
        field: &'static str,
    },

    #[error("Invalid split allocation: \"{0}\"")]
    InvalidAllocation(String),

    #[error("Split allocation has invalid percentage: \"{0}\"")]
    InvalidPercentage(String),

    #[error("Split intent requires at least 1 allocation.")]
    NoAllocations,

    #[error("Split allocations must sum to 100% (got {0}%).")]
    AllocationSum(f64),

    #[error("Invalid multi asset: \"{0}\"")]
    InvalidAsset(String),

    #[error("Multi asset has invalid amount: \"{0}\"")]
    InvalidAssetAmount(String),

    #[error("Multi intent requires at least 2 input assets.")]
    TooFewAssets,

    #[error("Could not understand intent. Try: {}.", SUPPORTED_PHRASINGS)]
    Unrecognized,
}

impl IntentError {
    pub(crate) fn invalid(grammar: &'static str, field: &'static str) -> Self {
        IntentError::InvalidField { grammar, field }
    }
}

/// Convenience alias for parser results.
pub type IntentResult<T> = Result<T, IntentError>;
