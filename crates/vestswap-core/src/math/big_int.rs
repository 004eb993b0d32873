//! Wide multiply-divide
//!
//! Products of two 128-bit values are formed in 256 bits before dividing, so
//! `a * b / d` is exact for every input whose result fits in 128 bits.

use ethnum::U256;

use crate::errors::{CoreError, CoreResult};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// Multiply two u128 values and divide by a third with specified rounding
/// result = (a * b) / denominator
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    if denominator == 0 {
        return Err(CoreError::DivisionByZero);
    }

    let product = U256::from(a) * U256::from(b);
    let denom = U256::from(denominator);
    let mut quotient = product / denom;

    if rounding == Rounding::Up && product % denom != U256::ZERO {
        quotient += U256::ONE;
    }

    if quotient > U256::from(u128::MAX) {
        return Err(CoreError::MathOverflow);
    }
    Ok(quotient.as_u128())
}

/// Multiply two u64 values and divide by a third with specified rounding
pub fn mul_div_u64(a: u64, b: u64, denominator: u64, rounding: Rounding) -> CoreResult<u64> {
    if denominator == 0 {
        return Err(CoreError::DivisionByZero);
    }

    let product = (a as u128) * (b as u128);
    let mut quotient = product / (denominator as u128);
    if rounding == Rounding::Up && product % (denominator as u128) != 0 {
        quotient += 1;
    }

    u64::try_from(quotient).map_err(|_| CoreError::MathOverflow)
}
