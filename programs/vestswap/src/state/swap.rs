use anchor_lang::prelude::*;

/// Fixed-price swap desk selling asset A for asset B
#[account]
#[derive(InitSpace)]
pub struct SwapDesk {
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,

    /// Quote base units per whole base token. `None` until the first swap
    /// captures the reserve ratio.
    pub price: Option<u128>,
    pub decimals_a: u8,
    pub bump: u8,
}
