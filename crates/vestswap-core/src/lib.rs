//! # Vestswap Core - Shared Protocol Logic
//!
//! Arithmetic and reference engines shared between the on-chain program and
//! off-chain clients. It provides:
//!
//! - A stepwise vesting escrow (`vesting`)
//! - Liquidity pool, fixed-price swap and fee buy/sell market (`pool`)
//! - The `TokenLedger` seam plus an in-memory ledger (`ledger`)
//! - Checked integer and price math (`math`)
//!
//! The free `plan_*` functions and `VestingRecord` are pure; the program calls
//! them directly. The engines wrap them with ledger transfers and roll back
//! every effect of a failed operation.
//!
//! ## Feature Flags
//!
//! - `client`: Enables TOML loading and saving of `ProtocolConfig`

pub mod config;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod vesting;

// Re-export commonly used items
pub use config::ProtocolConfig;
pub use constants::*;
pub use errors::{CoreError, CoreResult};
pub use ledger::{atomically, Address, LedgerError, TokenLedger};
#[cfg(not(target_os = "solana"))]
pub use ledger::InMemoryLedger;
pub use pool::{Authority, FeeMarket, FixedSwap, LiquidityPool, PoolMints, Reserves};
pub use vesting::{Release, VestingEscrow, VestingRecord};
