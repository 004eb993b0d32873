use anchor_lang::prelude::*;
use vestswap_core::CoreError;

// Errors
#[error_code]
pub enum VestswapError {
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Math underflow")]
    MathUnderflow,
    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Step count must be greater than zero")]
    InvalidSteps,
    #[msg("Operation would move zero units")]
    ZeroAmount,
    #[msg("Invalid address")]
    InvalidAddress,
    #[msg("Invalid price")]
    InvalidPrice,
    #[msg("Fee percentage exceeds the maximum")]
    InvalidFeePercentage,
    #[msg("Token decimals exceed the supported maximum")]
    UnsupportedDecimals,
    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Escrow already funded")]
    AlreadyFunded,
    #[msg("Escrow not funded")]
    NotFunded,
    #[msg("this fund is empty")]
    FundEmpty,

    #[msg("Pool already initialized")]
    AlreadyInitialized,
    #[msg("Pool not initialized")]
    PoolNotInitialized,
    #[msg("Insufficient shares")]
    InsufficientShares,
    #[msg("Not enough BNB left")]
    InsufficientBaseReserve,
    #[msg("Not enough USDT left")]
    InsufficientQuoteReserve,

    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Token ledger failure")]
    LedgerFailure,
}

/// Program error code for a core failure
pub fn error_code(err: &CoreError) -> VestswapError {
    match err {
        CoreError::MathOverflow => VestswapError::MathOverflow,
        CoreError::MathUnderflow => VestswapError::MathUnderflow,
        CoreError::DivisionByZero => VestswapError::DivisionByZero,
        CoreError::InvalidAmount => VestswapError::InvalidAmount,
        CoreError::InvalidSteps => VestswapError::InvalidSteps,
        CoreError::ZeroAmount => VestswapError::ZeroAmount,
        CoreError::InvalidAddress => VestswapError::InvalidAddress,
        CoreError::InvalidPrice => VestswapError::InvalidPrice,
        CoreError::InvalidFeePercentage(..) => VestswapError::InvalidFeePercentage,
        CoreError::UnsupportedDecimals(_) => VestswapError::UnsupportedDecimals,
        CoreError::InvalidConfig(_) => VestswapError::InvalidConfig,
        CoreError::AlreadyFunded => VestswapError::AlreadyFunded,
        CoreError::NotFunded => VestswapError::NotFunded,
        CoreError::FundEmpty => VestswapError::FundEmpty,
        CoreError::AlreadyInitialized => VestswapError::AlreadyInitialized,
        CoreError::PoolNotInitialized => VestswapError::PoolNotInitialized,
        CoreError::InsufficientShares { .. } => VestswapError::InsufficientShares,
        CoreError::InsufficientBaseReserve => VestswapError::InsufficientBaseReserve,
        CoreError::InsufficientQuoteReserve => VestswapError::InsufficientQuoteReserve,
        CoreError::Unauthorized => VestswapError::Unauthorized,
        CoreError::Ledger(_) => VestswapError::LedgerFailure,
    }
}

/// Convert a core failure into a program error, logging the detailed message
pub fn map_core_error(err: CoreError) -> Error {
    msg!("{}", err);
    error_code(&err).into()
}
