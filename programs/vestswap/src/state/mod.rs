//! Program account state
//!
//! Each account mirrors one core component. Reserves are never stored; they
//! are the balances of the account's vaults.

pub mod escrow;
pub mod market;
pub mod pool;
pub mod swap;

pub use escrow::*;
pub use market::*;
pub use pool::*;
pub use swap::*;

use anchor_lang::prelude::*;
use vestswap_core::Address;

pub fn to_address(key: &Pubkey) -> Address {
    Address::new(key.to_bytes())
}

pub fn to_pubkey(address: &Address) -> Pubkey {
    Pubkey::new_from_array(address.to_bytes())
}
