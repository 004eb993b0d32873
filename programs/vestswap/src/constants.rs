//! PDA seeds for program accounts

pub const ESCROW_SEED: &[u8] = b"escrow";
pub const ESCROW_VAULT_SEED: &[u8] = b"escrow_vault";

pub const POOL_SEED: &[u8] = b"pool";
pub const SHARE_MINT_SEED: &[u8] = b"shares";

pub const SWAP_SEED: &[u8] = b"swap";
pub const MARKET_SEED: &[u8] = b"market";

// Reserve vaults, keyed by the owning pool, swap or market account
pub const VAULT_A_SEED: &[u8] = b"vault_a";
pub const VAULT_B_SEED: &[u8] = b"vault_b";
