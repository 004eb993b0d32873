//! # Fixed-Price Swap
//!
//! One-directional conversion from quote (B) to base (A). The price is either
//! fixed at construction or captured from the reserve ratio on the first
//! successful swap, after which it never moves.

use super::PoolMints;
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{atomically, Address, TokenLedger};
use crate::math::{quote_for_base, Rounding};

/// Quote amount a caller pays for `amount_out` of base, rounded up
pub fn plan_swap(amount_out: u64, price: u128, decimals_a: u8) -> CoreResult<u64> {
    if amount_out == 0 {
        return Err(CoreError::InvalidAmount);
    }
    if price == 0 {
        return Err(CoreError::InvalidPrice);
    }
    quote_for_base(amount_out, price, decimals_a, Rounding::Up)
}

/// Swap desk holding base inventory in the `address` custody account
#[derive(Debug, Clone)]
pub struct FixedSwap {
    address: Address,
    mints: PoolMints,
    price: Option<u128>,
}

impl FixedSwap {
    /// `fixed_price` of `None` defers pricing to the reserve ratio at the first swap
    pub fn new(address: Address, mints: PoolMints, fixed_price: Option<u128>) -> CoreResult<Self> {
        if fixed_price == Some(0) {
            return Err(CoreError::InvalidPrice);
        }
        Ok(Self {
            address,
            mints,
            price: fixed_price,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn base_mint(&self) -> Address {
        self.mints.base
    }

    pub fn quote_mint(&self) -> Address {
        self.mints.quote
    }

    /// The swap price, once fixed or captured
    pub fn price(&self) -> Option<u128> {
        self.price
    }

    /// Buy exactly `amount_out` of base with quote. Returns the quote paid.
    pub fn swap<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        amount_out: u64,
    ) -> CoreResult<u64> {
        let (custody, mints) = (self.address, self.mints);
        let decimals_a = ledger.decimals(&mints.base)?;

        let (price, amount_in) = atomically(ledger, &mut self.price, |ledger, slot| {
            let price = match *slot {
                Some(price) => price,
                None => {
                    let price = mints.read_reserves(ledger, &custody)?.price(decimals_a)?;
                    tracing::debug!(swap = %custody, price, "swap price captured");
                    *slot = Some(price);
                    price
                }
            };

            let amount_in = plan_swap(amount_out, price, decimals_a)?;
            ledger.transfer_from(&mints.quote, &custody, caller, &custody, amount_in)?;
            ledger.transfer(&mints.base, &custody, caller, amount_out)?;
            Ok((price, amount_in))
        })?;

        tracing::info!(
            swap = %custody,
            buyer = %caller,
            price,
            amount_in,
            amount_out,
            "swap executed"
        );
        Ok(amount_in)
    }
}
