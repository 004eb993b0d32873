//! # Core Error Types
//!
//! Error taxonomy shared by the reference engines and the on-chain program.
//! Every failure aborts the whole operation; see `ledger::atomically`.

use thiserror::Error;

use crate::ledger::LedgerError;

/// Core protocol errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================
    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Step count must be greater than zero")]
    InvalidSteps,

    #[error("Operation would move zero units")]
    ZeroAmount,

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Invalid price")]
    InvalidPrice,

    #[error("Fee percentage {0} exceeds the maximum of {1}")]
    InvalidFeePercentage(u8, u8),

    #[error("Token decimals {0} exceed the supported maximum")]
    UnsupportedDecimals(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Escrow Errors
    // ========================================================================
    #[error("Escrow already funded")]
    AlreadyFunded,

    #[error("Escrow not funded")]
    NotFunded,

    #[error("this fund is empty")]
    FundEmpty,

    // ========================================================================
    // Pool Errors
    // ========================================================================
    #[error("Pool already initialized")]
    AlreadyInitialized,

    #[error("Pool not initialized")]
    PoolNotInitialized,

    #[error("Insufficient shares: requested {requested}, available {available}")]
    InsufficientShares { requested: u64, available: u64 },

    #[error("Not enough BNB left")]
    InsufficientBaseReserve,

    #[error("Not enough USDT left")]
    InsufficientQuoteReserve,

    // ========================================================================
    // Account and Authorization Errors
    // ========================================================================
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an insufficient shares error
    pub fn insufficient_shares(requested: u64, available: u64) -> Self {
        Self::InsufficientShares { requested, available }
    }

    /// Create an invalid configuration error with reason
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}
