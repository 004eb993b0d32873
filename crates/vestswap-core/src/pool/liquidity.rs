//! # Liquidity Pool
//!
//! Two-asset deposits against a proportional share unit.
//!
//! The first deposit sets the price and mints one share per base unit of A.
//! Every later deposit adds both assets in the current reserve ratio, so the
//! price reported by `base_price` does not move. Share redemption pays the
//! exact floor-rounded fraction of both reserves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PoolMints, Reserves};
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{atomically, Address, TokenLedger};
use crate::math::{add_u64, mul_div_u64, sub_u64, Rounding};

// ============================================================================
// Planners
// ============================================================================

/// Amounts pulled and shares minted by one deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares: u64,
}

/// Amounts paid out for burned shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    pub shares: u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// First deposit into an empty pool; one share per base unit of A
pub fn plan_initial_deposit(total_shares: u64, amount_a: u64, amount_b: u64) -> CoreResult<Deposit> {
    if total_shares != 0 {
        return Err(CoreError::AlreadyInitialized);
    }
    if amount_a == 0 || amount_b == 0 {
        return Err(CoreError::InvalidAmount);
    }
    Ok(Deposit {
        amount_a,
        amount_b,
        shares: amount_a,
    })
}

/// Proportional deposit of `amount_a` at the current reserve ratio.
///
/// The depositor pays B rounded up and receives shares rounded down.
pub fn plan_deposit(reserves: Reserves, total_shares: u64, amount_a: u64) -> CoreResult<Deposit> {
    if total_shares == 0 || reserves.reserve_a == 0 {
        return Err(CoreError::PoolNotInitialized);
    }
    if amount_a == 0 {
        return Err(CoreError::InvalidAmount);
    }

    let amount_b = mul_div_u64(amount_a, reserves.reserve_b, reserves.reserve_a, Rounding::Up)?;
    let shares = mul_div_u64(amount_a, total_shares, reserves.reserve_a, Rounding::Down)?;
    if shares == 0 {
        return Err(CoreError::ZeroAmount);
    }

    Ok(Deposit {
        amount_a,
        amount_b,
        shares,
    })
}

/// Redemption of `share_amount` out of `total_shares`, floor-rounded
pub fn plan_redemption(reserves: Reserves, total_shares: u64, share_amount: u64) -> CoreResult<Redemption> {
    if share_amount == 0 {
        return Err(CoreError::ZeroAmount);
    }
    if total_shares == 0 {
        return Err(CoreError::PoolNotInitialized);
    }
    if share_amount > total_shares {
        return Err(CoreError::insufficient_shares(share_amount, total_shares));
    }

    Ok(Redemption {
        shares: share_amount,
        amount_a: mul_div_u64(reserves.reserve_a, share_amount, total_shares, Rounding::Down)?,
        amount_b: mul_div_u64(reserves.reserve_b, share_amount, total_shares, Rounding::Down)?,
    })
}

// ============================================================================
// Share Book
// ============================================================================

/// Outstanding shares and their holders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareBook {
    total: u64,
    balances: BTreeMap<Address, u64>,
}

impl ShareBook {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn balance_of(&self, holder: &Address) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn mint(&mut self, holder: &Address, amount: u64) -> CoreResult<()> {
        self.total = add_u64(self.total, amount)?;
        let balance = add_u64(self.balance_of(holder), amount)?;
        self.balances.insert(*holder, balance);
        Ok(())
    }

    pub fn burn(&mut self, holder: &Address, amount: u64) -> CoreResult<()> {
        let available = self.balance_of(holder);
        if amount > available {
            return Err(CoreError::insufficient_shares(amount, available));
        }
        self.total = sub_u64(self.total, amount)?;
        self.set_balance(holder, available - amount);
        Ok(())
    }

    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u64) -> CoreResult<()> {
        let available = self.balance_of(from);
        if amount > available {
            return Err(CoreError::insufficient_shares(amount, available));
        }
        if from == to {
            return Ok(());
        }
        self.set_balance(from, available - amount);
        let balance = add_u64(self.balance_of(to), amount)?;
        self.set_balance(to, balance);
        Ok(())
    }

    fn set_balance(&mut self, holder: &Address, balance: u64) {
        if balance == 0 {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }
}

// ============================================================================
// Ledger-backed Engine
// ============================================================================

/// Liquidity pool whose reserves sit in the `address` custody account
#[derive(Debug, Clone)]
pub struct LiquidityPool {
    address: Address,
    mints: PoolMints,
    shares: ShareBook,
}

impl LiquidityPool {
    pub fn new(address: Address, mints: PoolMints) -> Self {
        Self {
            address,
            mints,
            shares: ShareBook::default(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn mints(&self) -> PoolMints {
        self.mints
    }

    pub fn total_shares(&self) -> u64 {
        self.shares.total()
    }

    pub fn shares_of(&self, holder: &Address) -> u64 {
        self.shares.balance_of(holder)
    }

    pub fn reserves<L: TokenLedger>(&self, ledger: &L) -> CoreResult<Reserves> {
        self.mints.read_reserves(ledger, &self.address)
    }

    /// Quote units per whole base token at current reserves
    pub fn base_price<L: TokenLedger>(&self, ledger: &L) -> CoreResult<u128> {
        let decimals_a = ledger.decimals(&self.mints.base)?;
        self.reserves(ledger)?.price(decimals_a)
    }

    /// Seed an empty pool. The caller receives `amount_a` shares.
    pub fn init_fund<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        amount_a: u64,
        amount_b: u64,
    ) -> CoreResult<Deposit> {
        let deposit = plan_initial_deposit(self.shares.total(), amount_a, amount_b)?;
        self.apply_deposit(ledger, caller, deposit)?;

        tracing::info!(
            pool = %self.address,
            provider = %caller,
            amount_a,
            amount_b,
            shares = deposit.shares,
            "pool initialized"
        );
        Ok(deposit)
    }

    /// Add `amount_a` of A plus the matching amount of B
    pub fn fund<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        amount_a: u64,
    ) -> CoreResult<Deposit> {
        let reserves = self.reserves(ledger)?;
        let deposit = plan_deposit(reserves, self.shares.total(), amount_a)?;
        tracing::debug!(
            pool = %self.address,
            reserve_a = reserves.reserve_a,
            reserve_b = reserves.reserve_b,
            total_shares = self.shares.total(),
            amount_b = deposit.amount_b,
            shares = deposit.shares,
            "deposit planned"
        );

        self.apply_deposit(ledger, caller, deposit)?;

        tracing::info!(
            pool = %self.address,
            provider = %caller,
            amount_a = deposit.amount_a,
            amount_b = deposit.amount_b,
            shares = deposit.shares,
            "liquidity added"
        );
        Ok(deposit)
    }

    /// Burn `share_amount` of the caller's shares for both assets
    pub fn withdraw<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        share_amount: u64,
    ) -> CoreResult<Redemption> {
        if share_amount == 0 {
            return Err(CoreError::ZeroAmount);
        }
        let held = self.shares.balance_of(caller);
        if share_amount > held {
            return Err(CoreError::insufficient_shares(share_amount, held));
        }

        let reserves = self.reserves(ledger)?;
        let redemption = plan_redemption(reserves, self.shares.total(), share_amount)?;
        let (custody, mints) = (self.address, self.mints);

        atomically(ledger, &mut self.shares, |ledger, shares| {
            shares.burn(caller, redemption.shares)?;
            if redemption.amount_a > 0 {
                ledger.transfer(&mints.base, &custody, caller, redemption.amount_a)?;
            }
            if redemption.amount_b > 0 {
                ledger.transfer(&mints.quote, &custody, caller, redemption.amount_b)?;
            }
            Ok(())
        })?;

        tracing::info!(
            pool = %custody,
            provider = %caller,
            shares = redemption.shares,
            amount_a = redemption.amount_a,
            amount_b = redemption.amount_b,
            "liquidity removed"
        );
        Ok(redemption)
    }

    /// Move shares between holders
    pub fn transfer_shares(&mut self, caller: &Address, to: &Address, amount: u64) -> CoreResult<()> {
        self.shares.transfer(caller, to, amount)?;
        tracing::debug!(pool = %self.address, from = %caller, to = %to, amount, "shares transferred");
        Ok(())
    }

    fn apply_deposit<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        deposit: Deposit,
    ) -> CoreResult<()> {
        let (custody, mints) = (self.address, self.mints);

        atomically(ledger, &mut self.shares, |ledger, shares| {
            shares.mint(caller, deposit.shares)?;
            ledger.transfer_from(&mints.base, &custody, caller, &custody, deposit.amount_a)?;
            ledger.transfer_from(&mints.quote, &custody, caller, &custody, deposit.amount_b)?;
            Ok(())
        })
    }
}
