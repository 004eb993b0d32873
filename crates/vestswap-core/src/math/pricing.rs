//! # Price Math
//!
//! A price is the number of quote (asset B) base units paid for one whole
//! base (asset A) token. Quoting through whole tokens keeps the ratio exact
//! when the two assets use different decimals.

use crate::constants::{pow10, MAX_DECIMALS};
use crate::errors::{CoreError, CoreResult};
use crate::math::big_int::{mul_div_u128, Rounding};
use crate::math::safe_math::to_amount;

/// 10^decimals, rejecting decimals the price arithmetic cannot hold
pub fn decimal_scale(decimals: u8) -> CoreResult<u128> {
    if decimals > MAX_DECIMALS {
        return Err(CoreError::UnsupportedDecimals(decimals));
    }
    Ok(pow10(decimals))
}

/// Price implied by two reserves: reserve_b * 10^decimals_a / reserve_a
pub fn reserve_price(reserve_a: u64, reserve_b: u64, decimals_a: u8) -> CoreResult<u128> {
    if reserve_a == 0 {
        return Err(CoreError::PoolNotInitialized);
    }
    let scale = decimal_scale(decimals_a)?;
    mul_div_u128(reserve_b as u128, scale, reserve_a as u128, Rounding::Down)
}

/// Quote amount for `amount_a` base units at `price`
pub fn quote_for_base(
    amount_a: u64,
    price: u128,
    decimals_a: u8,
    rounding: Rounding,
) -> CoreResult<u64> {
    let scale = decimal_scale(decimals_a)?;
    to_amount(mul_div_u128(amount_a as u128, price, scale, rounding)?)
}
