use thiserror::Error;

/// Why a candidate transaction was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("amount must not exceed 1,000,000,000,000")]
    AmountTooLarge,

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid type '{0}' (expected income or expense)")]
    InvalidKind(String),
}

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("Invalid transaction: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
