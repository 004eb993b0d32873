//! # Two-Asset Pools
//!
//! Three pool flavours share the same reserve model: asset A (base) and
//! asset B (quote) held in a custody account. Reserves are read through from
//! the ledger at the start of every call; the cached copy is only a
//! convenience for callers and is never trusted for arithmetic.

pub mod fee_market;
pub mod fixed_swap;
pub mod liquidity;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};
use crate::ledger::{Address, TokenLedger};
use crate::math::reserve_price;

pub use fee_market::{plan_buy, plan_sell, Buy, FeeMarket, Sell};
pub use fixed_swap::{plan_swap, FixedSwap};
pub use liquidity::{plan_deposit, plan_initial_deposit, plan_redemption, Deposit, LiquidityPool, Redemption};

/// Custody balances of the two assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reserves {
    pub reserve_a: u64,
    pub reserve_b: u64,
}

impl Reserves {
    pub fn new(reserve_a: u64, reserve_b: u64) -> Self {
        Self { reserve_a, reserve_b }
    }

    /// Quote units per whole base token at these reserves
    pub fn price(&self, decimals_a: u8) -> CoreResult<u128> {
        reserve_price(self.reserve_a, self.reserve_b, decimals_a)
    }
}

/// The asset pair a pool trades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolMints {
    /// Asset A, the priced asset
    pub base: Address,
    /// Asset B, the asset prices are denominated in
    pub quote: Address,
}

impl PoolMints {
    pub fn new(base: Address, quote: Address) -> CoreResult<Self> {
        if base == quote {
            return Err(CoreError::InvalidAddress);
        }
        Ok(Self { base, quote })
    }

    /// Current custody balances according to the ledger
    pub fn read_reserves<L: TokenLedger>(&self, ledger: &L, custody: &Address) -> CoreResult<Reserves> {
        Ok(Reserves {
            reserve_a: ledger.balance_of(&self.base, custody)?,
            reserve_b: ledger.balance_of(&self.quote, custody)?,
        })
    }
}

/// Authorization predicate for privileged pool operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    owner: Address,
}

impl Authority {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_authorized(&self, caller: &Address) -> bool {
        !self.owner.is_zero() && *caller == self.owner
    }

    pub fn ensure(&self, caller: &Address) -> CoreResult<()> {
        if self.is_authorized(caller) {
            Ok(())
        } else {
            Err(CoreError::Unauthorized)
        }
    }

    /// Hand the capability to `new_owner`
    pub fn transfer(&mut self, caller: &Address, new_owner: Address) -> CoreResult<()> {
        self.ensure(caller)?;
        if new_owner.is_zero() {
            return Err(CoreError::InvalidAddress);
        }
        self.owner = new_owner;
        Ok(())
    }
}
