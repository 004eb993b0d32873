use anchor_lang::prelude::*;
use vestswap_core::pool::Authority;

use super::{to_address, to_pubkey};

/// Fee buy/sell market
#[account]
#[derive(InitSpace)]
pub struct FeeMarket {
    /// Fee beneficiary and admin
    pub owner: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,

    /// Whole percent, 0..=100
    pub fee_percentage: u8,
    pub decimals_a: u8,
    pub bump: u8,
}

impl FeeMarket {
    pub fn authority(&self) -> Authority {
        Authority::new(to_address(&self.owner))
    }

    pub fn set_authority(&mut self, authority: &Authority) {
        self.owner = to_pubkey(&authority.owner());
    }
}
