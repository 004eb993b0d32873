//! # Fee Buy/Sell Market
//!
//! Trades base (A) against quote (B) at the reserve-ratio price. A whole
//! percent of every trade's output is routed to the market owner; the rest
//! goes to the trader. Reserves only ever change by full trade amounts, so
//! the fee cut never shows up as an unaccounted balance.

use super::{Authority, PoolMints, Reserves};
use crate::config::ProtocolConfig;
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{atomically, Address, TokenLedger};
use crate::math::{percent_of, quote_for_base, sub_u64, Rounding};

// ============================================================================
// Planners
// ============================================================================

/// Settlement of a buy: the trader pays B and receives A minus the fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buy {
    pub amount_a: u64,
    pub amount_b: u64,
    /// Base units routed to the owner
    pub fee: u64,
    pub to_buyer: u64,
}

/// Settlement of a sell: the trader pays A and receives B minus the fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sell {
    pub amount_a: u64,
    pub amount_b: u64,
    /// Quote units routed to the owner
    pub fee: u64,
    pub to_seller: u64,
}

pub fn plan_buy(reserves: Reserves, amount_a: u64, decimals_a: u8, fee_percentage: u8) -> CoreResult<Buy> {
    if amount_a == 0 {
        return Err(CoreError::InvalidAmount);
    }
    if reserves.reserve_a < amount_a {
        return Err(CoreError::InsufficientBaseReserve);
    }

    let price = reserves.price(decimals_a)?;
    if price == 0 {
        return Err(CoreError::InvalidPrice);
    }
    let amount_b = quote_for_base(amount_a, price, decimals_a, Rounding::Up)?;
    let fee = percent_of(amount_a, fee_percentage)?;

    Ok(Buy {
        amount_a,
        amount_b,
        fee,
        to_buyer: sub_u64(amount_a, fee)?,
    })
}

pub fn plan_sell(reserves: Reserves, amount_a: u64, decimals_a: u8, fee_percentage: u8) -> CoreResult<Sell> {
    if amount_a == 0 {
        return Err(CoreError::InvalidAmount);
    }

    // priced before the sold amount reaches the reserve
    let price = reserves.price(decimals_a)?;
    let amount_b = quote_for_base(amount_a, price, decimals_a, Rounding::Down)?;
    if amount_b == 0 {
        return Err(CoreError::ZeroAmount);
    }
    if reserves.reserve_b < amount_b {
        return Err(CoreError::InsufficientQuoteReserve);
    }
    let fee = percent_of(amount_b, fee_percentage)?;

    Ok(Sell {
        amount_a,
        amount_b,
        fee,
        to_seller: sub_u64(amount_b, fee)?,
    })
}

// ============================================================================
// Ledger-backed Engine
// ============================================================================

#[derive(Debug, Clone)]
pub struct FeeMarket {
    address: Address,
    mints: PoolMints,
    authority: Authority,
    fee_percentage: u8,
    max_fee_percentage: u8,
}

impl FeeMarket {
    pub fn new(
        address: Address,
        mints: PoolMints,
        owner: Address,
        config: &ProtocolConfig,
    ) -> CoreResult<Self> {
        config.validate()?;
        if owner.is_zero() {
            return Err(CoreError::InvalidAddress);
        }
        Ok(Self {
            address,
            mints,
            authority: Authority::new(owner),
            fee_percentage: config.default_fee_percentage,
            max_fee_percentage: config.max_fee_percentage,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn mints(&self) -> PoolMints {
        self.mints
    }

    /// Fee beneficiary and holder of the admin capability
    pub fn owner(&self) -> Address {
        self.authority.owner()
    }

    pub fn fee_percentage(&self) -> u8 {
        self.fee_percentage
    }

    pub fn reserves<L: TokenLedger>(&self, ledger: &L) -> CoreResult<Reserves> {
        self.mints.read_reserves(ledger, &self.address)
    }

    pub fn set_fee_percentage(&mut self, caller: &Address, fee_percentage: u8) -> CoreResult<()> {
        self.authority.ensure(caller)?;
        if fee_percentage > self.max_fee_percentage {
            return Err(CoreError::InvalidFeePercentage(fee_percentage, self.max_fee_percentage));
        }

        let previous = self.fee_percentage;
        self.fee_percentage = fee_percentage;
        tracing::info!(market = %self.address, previous, fee_percentage, "fee percentage updated");
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> CoreResult<()> {
        self.authority.transfer(caller, new_owner)?;
        tracing::info!(market = %self.address, previous = %caller, owner = %new_owner, "ownership transferred");
        Ok(())
    }

    /// Add inventory of either or both assets. No shares are issued.
    pub fn fund<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        amount_a: u64,
        amount_b: u64,
    ) -> CoreResult<()> {
        if amount_a == 0 && amount_b == 0 {
            return Err(CoreError::InvalidAmount);
        }
        let (custody, mints) = (self.address, self.mints);

        atomically(ledger, &mut (), |ledger, _| {
            if amount_a > 0 {
                ledger.transfer_from(&mints.base, &custody, caller, &custody, amount_a)?;
            }
            if amount_b > 0 {
                ledger.transfer_from(&mints.quote, &custody, caller, &custody, amount_b)?;
            }
            Ok(())
        })?;

        tracing::info!(market = %custody, funder = %caller, amount_a, amount_b, "market funded");
        Ok(())
    }

    /// Buy `amount_a` of base; the owner keeps the fee share of it
    pub fn buy<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        amount_a: u64,
    ) -> CoreResult<Buy> {
        let decimals_a = ledger.decimals(&self.mints.base)?;
        let reserves = self.reserves(ledger)?;
        let buy = plan_buy(reserves, amount_a, decimals_a, self.fee_percentage)?;
        tracing::debug!(
            market = %self.address,
            reserve_a = reserves.reserve_a,
            reserve_b = reserves.reserve_b,
            amount_b = buy.amount_b,
            fee = buy.fee,
            "buy planned"
        );

        let (custody, mints, owner) = (self.address, self.mints, self.owner());
        atomically(ledger, &mut (), |ledger, _| {
            ledger.transfer_from(&mints.quote, &custody, caller, &custody, buy.amount_b)?;
            if buy.fee > 0 {
                ledger.transfer(&mints.base, &custody, &owner, buy.fee)?;
            }
            if buy.to_buyer > 0 {
                ledger.transfer(&mints.base, &custody, caller, buy.to_buyer)?;
            }
            Ok(())
        })?;

        tracing::info!(
            market = %custody,
            buyer = %caller,
            amount_a,
            amount_b = buy.amount_b,
            fee = buy.fee,
            "base bought"
        );
        Ok(buy)
    }

    /// Sell `amount_a` of base; the owner keeps the fee share of the proceeds
    pub fn sell<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        amount_a: u64,
    ) -> CoreResult<Sell> {
        let decimals_a = ledger.decimals(&self.mints.base)?;
        let reserves = self.reserves(ledger)?;
        let sell = plan_sell(reserves, amount_a, decimals_a, self.fee_percentage)?;
        tracing::debug!(
            market = %self.address,
            reserve_a = reserves.reserve_a,
            reserve_b = reserves.reserve_b,
            amount_b = sell.amount_b,
            fee = sell.fee,
            "sell planned"
        );

        let (custody, mints, owner) = (self.address, self.mints, self.owner());
        atomically(ledger, &mut (), |ledger, _| {
            ledger.transfer_from(&mints.base, &custody, caller, &custody, amount_a)?;
            if sell.fee > 0 {
                ledger.transfer(&mints.quote, &custody, &owner, sell.fee)?;
            }
            if sell.to_seller > 0 {
                ledger.transfer(&mints.quote, &custody, caller, sell.to_seller)?;
            }
            Ok(())
        })?;

        tracing::info!(
            market = %custody,
            seller = %caller,
            amount_a,
            amount_b = sell.amount_b,
            fee = sell.fee,
            "base sold"
        );
        Ok(sell)
    }
}
