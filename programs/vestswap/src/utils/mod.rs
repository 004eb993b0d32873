pub mod transfers;

pub use transfers::*;

use anchor_spl::token::TokenAccount;
use vestswap_core::pool::Reserves;

/// Reserves are the live vault balances
pub fn vault_reserves(vault_a: &TokenAccount, vault_b: &TokenAccount) -> Reserves {
    Reserves::new(vault_a.amount, vault_b.amount)
}
