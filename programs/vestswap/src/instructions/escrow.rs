//! Vesting escrow instructions

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use vestswap_core::{vesting::VestingRecord, ProtocolConfig};

use crate::{
    constants::{ESCROW_SEED, ESCROW_VAULT_SEED},
    error::{map_core_error, VestswapError},
    state::{to_address, VestingEscrow},
    utils::{transfer_from_user_to_vault, transfer_from_vault},
};

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct EscrowFund<'info> {
    #[account(
        init,
        payer = lender,
        space = 8 + VestingEscrow::INIT_SPACE,
        seeds = [
            ESCROW_SEED,
            lender.key().as_ref(),
            borrower.key().as_ref(),
            mint.key().as_ref(),
            &seed.to_le_bytes()
        ],
        bump
    )]
    pub escrow: Account<'info, VestingEscrow>,

    /// Custody of the locked tokens
    #[account(
        init,
        payer = lender,
        token::mint = mint,
        token::authority = escrow,
        seeds = [ESCROW_VAULT_SEED, escrow.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    /// CHECK: beneficiary identity only; never read or written
    pub borrower: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = lender_token.mint == mint.key() @ VestswapError::InvalidAddress,
        constraint = lender_token.owner == lender.key() @ VestswapError::Unauthorized
    )]
    pub lender_token: Account<'info, TokenAccount>,

    #[account(mut)]
    pub lender: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn escrow_fund(
    ctx: Context<EscrowFund>,
    seed: u64,
    total_amount: u64,
    total_steps: u64,
) -> Result<()> {
    let config = ProtocolConfig::default();
    let now = Clock::get()?.unix_timestamp;

    let record = VestingRecord::new(
        to_address(&ctx.accounts.lender.key()),
        to_address(&ctx.accounts.borrower.key()),
        to_address(&ctx.accounts.mint.key()),
        total_amount,
        total_steps,
        config.step_duration_secs,
        now,
    )
    .map_err(map_core_error)?;

    let escrow = &mut ctx.accounts.escrow;
    escrow.store(&record);
    escrow.vault = ctx.accounts.vault.key();
    escrow.seed = seed;
    escrow.bump = ctx.bumps.escrow;

    transfer_from_user_to_vault(
        &ctx.accounts.lender_token,
        &ctx.accounts.vault,
        &ctx.accounts.lender,
        &ctx.accounts.token_program,
        total_amount,
    )?;

    msg!(
        "Escrow funded: {} over {} steps for {}",
        total_amount,
        total_steps,
        ctx.accounts.borrower.key()
    );
    Ok(())
}

#[derive(Accounts)]
pub struct EscrowWithdraw<'info> {
    #[account(
        mut,
        seeds = [
            ESCROW_SEED,
            escrow.lender.as_ref(),
            escrow.borrower.as_ref(),
            escrow.mint.as_ref(),
            &escrow.seed.to_le_bytes()
        ],
        bump = escrow.bump,
        has_one = borrower @ VestswapError::Unauthorized,
        has_one = vault
    )]
    pub escrow: Account<'info, VestingEscrow>,

    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = borrower_token.mint == escrow.mint @ VestswapError::InvalidAddress
    )]
    pub borrower_token: Account<'info, TokenAccount>,

    pub borrower: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn escrow_withdraw(ctx: Context<EscrowWithdraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut record = ctx.accounts.escrow.record();

    let release = record.release_at(now).map_err(map_core_error)?;
    if release.is_empty() {
        msg!("No new step unlocked");
        return Ok(());
    }
    record.apply(release).map_err(map_core_error)?;

    let escrow = &mut ctx.accounts.escrow;
    escrow.store(&record);

    let (lender, borrower, mint) = (escrow.lender, escrow.borrower, escrow.mint);
    let seed = escrow.seed.to_le_bytes();
    let bump = [escrow.bump];
    let signer_seeds: &[&[u8]] = &[
        ESCROW_SEED,
        lender.as_ref(),
        borrower.as_ref(),
        mint.as_ref(),
        &seed,
        &bump,
    ];

    transfer_from_vault(
        &ctx.accounts.vault,
        &ctx.accounts.borrower_token,
        &ctx.accounts.escrow.to_account_info(),
        &ctx.accounts.token_program,
        &[signer_seeds],
        release.amount,
    )?;

    msg!(
        "Escrow released {} ({} of {} steps claimed)",
        release.amount,
        record.claimed_steps,
        record.total_steps
    );
    Ok(())
}
