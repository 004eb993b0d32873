//! Liquidity pool instructions

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use vestswap_core::math::decimal_scale;
use vestswap_core::pool::{plan_deposit, plan_initial_deposit, plan_redemption, Deposit};
use vestswap_core::CoreError;

use crate::{
    constants::{POOL_SEED, SHARE_MINT_SEED, VAULT_A_SEED, VAULT_B_SEED},
    error::{map_core_error, VestswapError},
    state::LiquidityPool,
    utils::{
        burn_from_user, mint_to_with_authority, transfer_from_user_to_vault, transfer_from_vault,
        vault_reserves,
    },
};

#[derive(Accounts)]
pub struct PoolInitialize<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + LiquidityPool::INIT_SPACE,
        seeds = [POOL_SEED, mint_a.key().as_ref(), mint_b.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, LiquidityPool>,

    pub mint_a: Account<'info, Mint>,
    pub mint_b: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        token::mint = mint_a,
        token::authority = pool,
        seeds = [VAULT_A_SEED, pool.key().as_ref()],
        bump
    )]
    pub vault_a: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        token::mint = mint_b,
        token::authority = pool,
        seeds = [VAULT_B_SEED, pool.key().as_ref()],
        bump
    )]
    pub vault_b: Account<'info, TokenAccount>,

    /// One share per base unit of the first A deposit
    #[account(
        init,
        payer = payer,
        mint::decimals = mint_a.decimals,
        mint::authority = pool,
        seeds = [SHARE_MINT_SEED, pool.key().as_ref()],
        bump
    )]
    pub share_mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn pool_initialize(ctx: Context<PoolInitialize>) -> Result<()> {
    require_keys_neq!(
        ctx.accounts.mint_a.key(),
        ctx.accounts.mint_b.key(),
        VestswapError::InvalidAddress
    );
    decimal_scale(ctx.accounts.mint_a.decimals).map_err(map_core_error)?;

    let pool = &mut ctx.accounts.pool;
    pool.mint_a = ctx.accounts.mint_a.key();
    pool.mint_b = ctx.accounts.mint_b.key();
    pool.vault_a = ctx.accounts.vault_a.key();
    pool.vault_b = ctx.accounts.vault_b.key();
    pool.share_mint = ctx.accounts.share_mint.key();
    pool.decimals_a = ctx.accounts.mint_a.decimals;
    pool.bump = ctx.bumps.pool;

    msg!("Pool initialized: {} / {}", pool.mint_a, pool.mint_b);
    Ok(())
}

/// Accounts shared by deposits and withdrawals
#[derive(Accounts)]
pub struct PoolLiquidity<'info> {
    #[account(
        seeds = [POOL_SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref()],
        bump = pool.bump,
        has_one = vault_a,
        has_one = vault_b,
        has_one = share_mint
    )]
    pub pool: Account<'info, LiquidityPool>,

    #[account(mut)]
    pub vault_a: Account<'info, TokenAccount>,
    #[account(mut)]
    pub vault_b: Account<'info, TokenAccount>,
    #[account(mut)]
    pub share_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = user_token_a.mint == pool.mint_a @ VestswapError::InvalidAddress,
        constraint = user_token_a.owner == user.key() @ VestswapError::Unauthorized
    )]
    pub user_token_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_token_b.mint == pool.mint_b @ VestswapError::InvalidAddress,
        constraint = user_token_b.owner == user.key() @ VestswapError::Unauthorized
    )]
    pub user_token_b: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_shares.mint == pool.share_mint @ VestswapError::InvalidAddress,
        constraint = user_shares.owner == user.key() @ VestswapError::Unauthorized
    )]
    pub user_shares: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn pool_init_fund(ctx: Context<PoolLiquidity>, amount_a: u64, amount_b: u64) -> Result<()> {
    let deposit = plan_initial_deposit(ctx.accounts.share_mint.supply, amount_a, amount_b)
        .map_err(map_core_error)?;
    settle_deposit(&ctx, deposit)?;

    msg!("Pool seeded: {} A, {} B", amount_a, amount_b);
    Ok(())
}

pub fn pool_fund(ctx: Context<PoolLiquidity>, amount_a: u64) -> Result<()> {
    let reserves = vault_reserves(&ctx.accounts.vault_a, &ctx.accounts.vault_b);
    let deposit =
        plan_deposit(reserves, ctx.accounts.share_mint.supply, amount_a).map_err(map_core_error)?;
    settle_deposit(&ctx, deposit)?;

    msg!(
        "Liquidity added: {} A, {} B, {} shares",
        deposit.amount_a,
        deposit.amount_b,
        deposit.shares
    );
    Ok(())
}

pub fn pool_withdraw(ctx: Context<PoolLiquidity>, share_amount: u64) -> Result<()> {
    require!(share_amount > 0, VestswapError::ZeroAmount);
    let held = ctx.accounts.user_shares.amount;
    if share_amount > held {
        return Err(map_core_error(CoreError::insufficient_shares(share_amount, held)));
    }

    let reserves = vault_reserves(&ctx.accounts.vault_a, &ctx.accounts.vault_b);
    let redemption = plan_redemption(reserves, ctx.accounts.share_mint.supply, share_amount)
        .map_err(map_core_error)?;

    burn_from_user(
        &ctx.accounts.share_mint,
        &ctx.accounts.user_shares,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        redemption.shares,
    )?;

    let pool = &ctx.accounts.pool;
    let bump = [pool.bump];
    let signer_seeds: &[&[u8]] = &[POOL_SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref(), &bump];
    let authority = pool.to_account_info();

    transfer_from_vault(
        &ctx.accounts.vault_a,
        &ctx.accounts.user_token_a,
        &authority,
        &ctx.accounts.token_program,
        &[signer_seeds],
        redemption.amount_a,
    )?;
    transfer_from_vault(
        &ctx.accounts.vault_b,
        &ctx.accounts.user_token_b,
        &authority,
        &ctx.accounts.token_program,
        &[signer_seeds],
        redemption.amount_b,
    )?;

    msg!(
        "Liquidity removed: {} shares for {} A, {} B",
        redemption.shares,
        redemption.amount_a,
        redemption.amount_b
    );
    Ok(())
}

fn settle_deposit(ctx: &Context<PoolLiquidity>, deposit: Deposit) -> Result<()> {
    let accounts = &ctx.accounts;
    transfer_from_user_to_vault(
        &accounts.user_token_a,
        &accounts.vault_a,
        &accounts.user,
        &accounts.token_program,
        deposit.amount_a,
    )?;
    transfer_from_user_to_vault(
        &accounts.user_token_b,
        &accounts.vault_b,
        &accounts.user,
        &accounts.token_program,
        deposit.amount_b,
    )?;

    let pool = &accounts.pool;
    let bump = [pool.bump];
    let signer_seeds: &[&[u8]] = &[POOL_SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref(), &bump];

    mint_to_with_authority(
        &accounts.share_mint,
        &accounts.user_shares,
        &pool.to_account_info(),
        &accounts.token_program,
        &[signer_seeds],
        deposit.shares,
    )
}

#[derive(Accounts)]
pub struct PoolPrice<'info> {
    #[account(has_one = vault_a, has_one = vault_b)]
    pub pool: Account<'info, LiquidityPool>,
    pub vault_a: Account<'info, TokenAccount>,
    pub vault_b: Account<'info, TokenAccount>,
}

/// Quote base units per whole base token, returned as instruction return data
pub fn pool_price(ctx: Context<PoolPrice>) -> Result<u128> {
    let reserves = vault_reserves(&ctx.accounts.vault_a, &ctx.accounts.vault_b);
    reserves
        .price(ctx.accounts.pool.decimals_a)
        .map_err(map_core_error)
}
