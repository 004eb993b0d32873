//! Fee buy/sell market instructions

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use vestswap_core::math::decimal_scale;
use vestswap_core::pool::{plan_buy, plan_sell};
use vestswap_core::{CoreError, ProtocolConfig};

use crate::{
    constants::{MARKET_SEED, VAULT_A_SEED, VAULT_B_SEED},
    error::{map_core_error, VestswapError},
    state::{to_address, FeeMarket},
    utils::{transfer_from_user_to_vault, transfer_from_vault, vault_reserves},
};

#[derive(Accounts)]
pub struct MarketInitialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + FeeMarket::INIT_SPACE,
        seeds = [MARKET_SEED, mint_a.key().as_ref(), mint_b.key().as_ref()],
        bump
    )]
    pub market: Account<'info, FeeMarket>,

    pub mint_a: Account<'info, Mint>,
    pub mint_b: Account<'info, Mint>,

    #[account(
        init,
        payer = owner,
        token::mint = mint_a,
        token::authority = market,
        seeds = [VAULT_A_SEED, market.key().as_ref()],
        bump
    )]
    pub vault_a: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = owner,
        token::mint = mint_b,
        token::authority = market,
        seeds = [VAULT_B_SEED, market.key().as_ref()],
        bump
    )]
    pub vault_b: Account<'info, TokenAccount>,

    /// Initial owner and fee beneficiary
    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn market_initialize(ctx: Context<MarketInitialize>) -> Result<()> {
    require_keys_neq!(
        ctx.accounts.mint_a.key(),
        ctx.accounts.mint_b.key(),
        VestswapError::InvalidAddress
    );
    decimal_scale(ctx.accounts.mint_a.decimals).map_err(map_core_error)?;
    let config = ProtocolConfig::default();

    let market = &mut ctx.accounts.market;
    market.owner = ctx.accounts.owner.key();
    market.mint_a = ctx.accounts.mint_a.key();
    market.mint_b = ctx.accounts.mint_b.key();
    market.vault_a = ctx.accounts.vault_a.key();
    market.vault_b = ctx.accounts.vault_b.key();
    market.fee_percentage = config.default_fee_percentage;
    market.decimals_a = ctx.accounts.mint_a.decimals;
    market.bump = ctx.bumps.market;

    msg!("Fee market initialized, owner {}", market.owner);
    Ok(())
}

#[derive(Accounts)]
pub struct MarketFund<'info> {
    #[account(has_one = vault_a, has_one = vault_b)]
    pub market: Account<'info, FeeMarket>,

    #[account(mut)]
    pub vault_a: Account<'info, TokenAccount>,
    #[account(mut)]
    pub vault_b: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = funder_token_a.mint == market.mint_a @ VestswapError::InvalidAddress
    )]
    pub funder_token_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = funder_token_b.mint == market.mint_b @ VestswapError::InvalidAddress
    )]
    pub funder_token_b: Account<'info, TokenAccount>,

    pub funder: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn market_fund(ctx: Context<MarketFund>, amount_a: u64, amount_b: u64) -> Result<()> {
    require!(amount_a > 0 || amount_b > 0, VestswapError::InvalidAmount);

    transfer_from_user_to_vault(
        &ctx.accounts.funder_token_a,
        &ctx.accounts.vault_a,
        &ctx.accounts.funder,
        &ctx.accounts.token_program,
        amount_a,
    )?;
    transfer_from_user_to_vault(
        &ctx.accounts.funder_token_b,
        &ctx.accounts.vault_b,
        &ctx.accounts.funder,
        &ctx.accounts.token_program,
        amount_b,
    )?;

    msg!("Fee market funded: {} A, {} B", amount_a, amount_b);
    Ok(())
}

/// Accounts shared by buys and sells
#[derive(Accounts)]
pub struct MarketTrade<'info> {
    #[account(
        seeds = [MARKET_SEED, market.mint_a.as_ref(), market.mint_b.as_ref()],
        bump = market.bump,
        has_one = vault_a,
        has_one = vault_b
    )]
    pub market: Account<'info, FeeMarket>,

    #[account(mut)]
    pub vault_a: Account<'info, TokenAccount>,
    #[account(mut)]
    pub vault_b: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_token_a.mint == market.mint_a @ VestswapError::InvalidAddress,
        constraint = user_token_a.owner == user.key() @ VestswapError::Unauthorized
    )]
    pub user_token_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_token_b.mint == market.mint_b @ VestswapError::InvalidAddress,
        constraint = user_token_b.owner == user.key() @ VestswapError::Unauthorized
    )]
    pub user_token_b: Account<'info, TokenAccount>,

    /// Receives the fee on buys
    #[account(
        mut,
        constraint = owner_token_a.mint == market.mint_a @ VestswapError::InvalidAddress,
        constraint = owner_token_a.owner == market.owner @ VestswapError::Unauthorized
    )]
    pub owner_token_a: Account<'info, TokenAccount>,

    /// Receives the fee on sells
    #[account(
        mut,
        constraint = owner_token_b.mint == market.mint_b @ VestswapError::InvalidAddress,
        constraint = owner_token_b.owner == market.owner @ VestswapError::Unauthorized
    )]
    pub owner_token_b: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn market_buy(ctx: Context<MarketTrade>, amount_a: u64) -> Result<()> {
    let market = &ctx.accounts.market;
    let reserves = vault_reserves(&ctx.accounts.vault_a, &ctx.accounts.vault_b);
    let buy = plan_buy(reserves, amount_a, market.decimals_a, market.fee_percentage)
        .map_err(map_core_error)?;

    let bump = [market.bump];
    let signer_seeds: &[&[u8]] = &[
        MARKET_SEED,
        market.mint_a.as_ref(),
        market.mint_b.as_ref(),
        &bump,
    ];
    let authority = market.to_account_info();

    transfer_from_user_to_vault(
        &ctx.accounts.user_token_b,
        &ctx.accounts.vault_b,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        buy.amount_b,
    )?;
    transfer_from_vault(
        &ctx.accounts.vault_a,
        &ctx.accounts.owner_token_a,
        &authority,
        &ctx.accounts.token_program,
        &[signer_seeds],
        buy.fee,
    )?;
    transfer_from_vault(
        &ctx.accounts.vault_a,
        &ctx.accounts.user_token_a,
        &authority,
        &ctx.accounts.token_program,
        &[signer_seeds],
        buy.to_buyer,
    )?;

    msg!("Bought {} A for {} B, fee {}", amount_a, buy.amount_b, buy.fee);
    Ok(())
}

pub fn market_sell(ctx: Context<MarketTrade>, amount_a: u64) -> Result<()> {
    let market = &ctx.accounts.market;
    let reserves = vault_reserves(&ctx.accounts.vault_a, &ctx.accounts.vault_b);
    let sell = plan_sell(reserves, amount_a, market.decimals_a, market.fee_percentage)
        .map_err(map_core_error)?;

    let bump = [market.bump];
    let signer_seeds: &[&[u8]] = &[
        MARKET_SEED,
        market.mint_a.as_ref(),
        market.mint_b.as_ref(),
        &bump,
    ];
    let authority = market.to_account_info();

    transfer_from_user_to_vault(
        &ctx.accounts.user_token_a,
        &ctx.accounts.vault_a,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        amount_a,
    )?;
    transfer_from_vault(
        &ctx.accounts.vault_b,
        &ctx.accounts.owner_token_b,
        &authority,
        &ctx.accounts.token_program,
        &[signer_seeds],
        sell.fee,
    )?;
    transfer_from_vault(
        &ctx.accounts.vault_b,
        &ctx.accounts.user_token_b,
        &authority,
        &ctx.accounts.token_program,
        &[signer_seeds],
        sell.to_seller,
    )?;

    msg!("Sold {} A for {} B, fee {}", amount_a, sell.amount_b, sell.fee);
    Ok(())
}

#[derive(Accounts)]
pub struct MarketAdmin<'info> {
    #[account(mut)]
    pub market: Account<'info, FeeMarket>,
    pub caller: Signer<'info>,
}

pub fn market_set_fee_percentage(ctx: Context<MarketAdmin>, fee_percentage: u8) -> Result<()> {
    let config = ProtocolConfig::default();
    let market = &mut ctx.accounts.market;

    market
        .authority()
        .ensure(&to_address(&ctx.accounts.caller.key()))
        .map_err(map_core_error)?;
    if fee_percentage > config.max_fee_percentage {
        return Err(map_core_error(CoreError::InvalidFeePercentage(
            fee_percentage,
            config.max_fee_percentage,
        )));
    }

    market.fee_percentage = fee_percentage;
    msg!("Fee percentage set to {}", fee_percentage);
    Ok(())
}

pub fn market_transfer_ownership(ctx: Context<MarketAdmin>, new_owner: Pubkey) -> Result<()> {
    let market = &mut ctx.accounts.market;

    let mut authority = market.authority();
    authority
        .transfer(&to_address(&ctx.accounts.caller.key()), to_address(&new_owner))
        .map_err(map_core_error)?;
    market.set_authority(&authority);

    msg!("Market ownership transferred to {}", new_owner);
    Ok(())
}
