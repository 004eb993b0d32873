#![allow(deprecated)]
#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

#[cfg(test)]
mod tests;

declare_id!("VestSwap11111111111111111111111111111111111");

#[program]
pub mod vestswap {
    use super::*;

    // Vesting escrow
    pub fn escrow_fund(
        ctx: Context<EscrowFund>,
        seed: u64,
        total_amount: u64,
        total_steps: u64,
    ) -> Result<()> {
        instructions::escrow_fund(ctx, seed, total_amount, total_steps)
    }

    pub fn escrow_withdraw(ctx: Context<EscrowWithdraw>) -> Result<()> {
        instructions::escrow_withdraw(ctx)
    }

    // Liquidity pool
    pub fn pool_initialize(ctx: Context<PoolInitialize>) -> Result<()> {
        instructions::pool_initialize(ctx)
    }

    pub fn pool_init_fund(ctx: Context<PoolLiquidity>, amount_a: u64, amount_b: u64) -> Result<()> {
        instructions::pool_init_fund(ctx, amount_a, amount_b)
    }

    pub fn pool_fund(ctx: Context<PoolLiquidity>, amount_a: u64) -> Result<()> {
        instructions::pool_fund(ctx, amount_a)
    }

    pub fn pool_withdraw(ctx: Context<PoolLiquidity>, share_amount: u64) -> Result<()> {
        instructions::pool_withdraw(ctx, share_amount)
    }

    pub fn pool_price(ctx: Context<PoolPrice>) -> Result<u128> {
        instructions::pool_price(ctx)
    }

    // Fixed swap
    pub fn swap_initialize(ctx: Context<SwapInitialize>, fixed_price: Option<u128>) -> Result<()> {
        instructions::swap_initialize(ctx, fixed_price)
    }

    pub fn swap_quote_to_base(ctx: Context<SwapQuoteToBase>, amount_out: u64) -> Result<()> {
        instructions::swap_quote_to_base(ctx, amount_out)
    }

    // Fee market
    pub fn market_initialize(ctx: Context<MarketInitialize>) -> Result<()> {
        instructions::market_initialize(ctx)
    }

    pub fn market_fund(ctx: Context<MarketFund>, amount_a: u64, amount_b: u64) -> Result<()> {
        instructions::market_fund(ctx, amount_a, amount_b)
    }

    pub fn market_buy(ctx: Context<MarketTrade>, amount_a: u64) -> Result<()> {
        instructions::market_buy(ctx, amount_a)
    }

    pub fn market_sell(ctx: Context<MarketTrade>, amount_a: u64) -> Result<()> {
        instructions::market_sell(ctx, amount_a)
    }

    pub fn market_set_fee_percentage(ctx: Context<MarketAdmin>, fee_percentage: u8) -> Result<()> {
        instructions::market_set_fee_percentage(ctx, fee_percentage)
    }

    pub fn market_transfer_ownership(ctx: Context<MarketAdmin>, new_owner: Pubkey) -> Result<()> {
        instructions::market_transfer_ownership(ctx, new_owner)
    }
}
