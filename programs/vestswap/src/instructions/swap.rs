//! Fixed-price swap instructions

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use vestswap_core::math::decimal_scale;
use vestswap_core::pool::plan_swap;

use crate::{
    constants::{SWAP_SEED, VAULT_A_SEED, VAULT_B_SEED},
    error::{map_core_error, VestswapError},
    state::SwapDesk,
    utils::{transfer_from_user_to_vault, transfer_from_vault, vault_reserves},
};

#[derive(Accounts)]
pub struct SwapInitialize<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + SwapDesk::INIT_SPACE,
        seeds = [SWAP_SEED, mint_a.key().as_ref(), mint_b.key().as_ref()],
        bump
    )]
    pub desk: Account<'info, SwapDesk>,

    pub mint_a: Account<'info, Mint>,
    pub mint_b: Account<'info, Mint>,

    /// Base inventory; stocked with plain token transfers
    #[account(
        init,
        payer = payer,
        token::mint = mint_a,
        token::authority = desk,
        seeds = [VAULT_A_SEED, desk.key().as_ref()],
        bump
    )]
    pub vault_a: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        token::mint = mint_b,
        token::authority = desk,
        seeds = [VAULT_B_SEED, desk.key().as_ref()],
        bump
    )]
    pub vault_b: Account<'info, TokenAccount>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn swap_initialize(ctx: Context<SwapInitialize>, fixed_price: Option<u128>) -> Result<()> {
    require_keys_neq!(
        ctx.accounts.mint_a.key(),
        ctx.accounts.mint_b.key(),
        VestswapError::InvalidAddress
    );
    require!(fixed_price != Some(0), VestswapError::InvalidPrice);
    decimal_scale(ctx.accounts.mint_a.decimals).map_err(map_core_error)?;

    let desk = &mut ctx.accounts.desk;
    desk.mint_a = ctx.accounts.mint_a.key();
    desk.mint_b = ctx.accounts.mint_b.key();
    desk.vault_a = ctx.accounts.vault_a.key();
    desk.vault_b = ctx.accounts.vault_b.key();
    desk.price = fixed_price;
    desk.decimals_a = ctx.accounts.mint_a.decimals;
    desk.bump = ctx.bumps.desk;

    msg!("Swap desk initialized, fixed price {:?}", fixed_price);
    Ok(())
}

#[derive(Accounts)]
pub struct SwapQuoteToBase<'info> {
    #[account(
        mut,
        seeds = [SWAP_SEED, desk.mint_a.as_ref(), desk.mint_b.as_ref()],
        bump = desk.bump,
        has_one = vault_a,
        has_one = vault_b
    )]
    pub desk: Account<'info, SwapDesk>,

    #[account(mut)]
    pub vault_a: Account<'info, TokenAccount>,
    #[account(mut)]
    pub vault_b: Account<'info, TokenAccount>,

    /// Receives the base asset
    #[account(
        mut,
        constraint = user_token_a.mint == desk.mint_a @ VestswapError::InvalidAddress
    )]
    pub user_token_a: Account<'info, TokenAccount>,

    /// Pays the quote asset
    #[account(
        mut,
        constraint = user_token_b.mint == desk.mint_b @ VestswapError::InvalidAddress,
        constraint = user_token_b.owner == user.key() @ VestswapError::Unauthorized
    )]
    pub user_token_b: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn swap_quote_to_base(ctx: Context<SwapQuoteToBase>, amount_out: u64) -> Result<()> {
    let desk = &mut ctx.accounts.desk;
    let price = match desk.price {
        Some(price) => price,
        None => {
            let reserves = vault_reserves(&ctx.accounts.vault_a, &ctx.accounts.vault_b);
            let price = reserves.price(desk.decimals_a).map_err(map_core_error)?;
            desk.price = Some(price);
            msg!("Swap price captured: {}", price);
            price
        }
    };
    let amount_in = plan_swap(amount_out, price, desk.decimals_a).map_err(map_core_error)?;

    let (mint_a, mint_b) = (desk.mint_a, desk.mint_b);
    let bump = [desk.bump];
    let signer_seeds: &[&[u8]] = &[SWAP_SEED, mint_a.as_ref(), mint_b.as_ref(), &bump];

    transfer_from_user_to_vault(
        &ctx.accounts.user_token_b,
        &ctx.accounts.vault_b,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        amount_in,
    )?;
    // fails in the token program when inventory is short
    transfer_from_vault(
        &ctx.accounts.vault_a,
        &ctx.accounts.user_token_a,
        &ctx.accounts.desk.to_account_info(),
        &ctx.accounts.token_program,
        &[signer_seeds],
        amount_out,
    )?;

    msg!("Swapped {} B for {} A at {}", amount_in, amount_out, price);
    Ok(())
}
