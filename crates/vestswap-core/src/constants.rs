//! # Protocol Constants
//!
//! Time, percentage and precision constants shared by the escrow and pool
//! engines and by the on-chain program.

// ============================================================================
// Time Constants
// ============================================================================

/// Seconds in one day
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// One vesting step: a calendar week
pub const WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Default unlock step duration for new escrows
pub const DEFAULT_STEP_DURATION: i64 = WEEK;

// ============================================================================
// Fee Constants
// ============================================================================

/// Fee percentages are whole percents out of this denominator
pub const PERCENT_DENOMINATOR: u64 = 100;

/// Upper bound for any fee percentage (100%)
pub const MAX_FEE_PERCENTAGE: u8 = 100;

// ============================================================================
// Precision Constants
// ============================================================================

/// Largest decimals value whose power of ten still fits the price arithmetic
pub const MAX_DECIMALS: u8 = 18;

/// 10^decimals for a token with the given decimals
pub const fn pow10(decimals: u8) -> u128 {
    let mut result = 1u128;
    let mut i = 0;
    while i < decimals {
        result *= 10;
        i += 1;
    }
    result
}
