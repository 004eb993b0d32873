//! # Safe Math Operations
//!
//! Overflow-checked arithmetic operations for both on-chain and off-chain use.

use crate::errors::{CoreError, CoreResult};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Checked arithmetic, mapping overflow/underflow to a core error
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };

    // Division operations with zero check
    (div, $fn_name:ident, $type:ty) => {
        /// Safe division with zero check
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            if b == 0 {
                return Err(CoreError::DivisionByZero);
            }
            Ok(a / b)
        }
    };
}

safe_arith!(add_u64, u64, checked_add, CoreError::MathOverflow);
safe_arith!(sub_u64, u64, checked_sub, CoreError::MathUnderflow);
safe_arith!(mul_u64, u64, checked_mul, CoreError::MathOverflow);
safe_arith!(div, div_u64, u64);

/// Narrow a u128 result back to a token amount
pub fn to_amount(value: u128) -> CoreResult<u64> {
    u64::try_from(value).map_err(|_| CoreError::MathOverflow)
}

/// Take a whole-percent cut of an amount, rounding down
pub fn percent_of(amount: u64, percentage: u8) -> CoreResult<u64> {
    use crate::constants::{MAX_FEE_PERCENTAGE, PERCENT_DENOMINATOR};
    use crate::math::big_int::{mul_div_u64, Rounding};

    if percentage > MAX_FEE_PERCENTAGE {
        return Err(CoreError::InvalidFeePercentage(percentage, MAX_FEE_PERCENTAGE));
    }
    mul_div_u64(amount, percentage as u64, PERCENT_DENOMINATOR, Rounding::Down)
}
