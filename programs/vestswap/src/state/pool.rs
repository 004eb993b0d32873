use anchor_lang::prelude::*;

/// Liquidity pool. Shares are the supply of `share_mint`.
#[account]
#[derive(InitSpace)]
pub struct LiquidityPool {
    /// Asset A mint
    pub mint_a: Pubkey,
    /// Asset B mint
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    /// Share mint, decimals equal to asset A
    pub share_mint: Pubkey,

    pub decimals_a: u8,
    pub bump: u8,
}
