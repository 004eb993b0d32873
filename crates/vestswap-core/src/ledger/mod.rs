//! # Token Ledger
//!
//! The fungible-token ledger is an external collaborator: engines never hold
//! value themselves, they only instruct a ledger to move it. `TokenLedger` is
//! the seam; `InMemoryLedger` backs tests and off-chain simulation, and the
//! on-chain program talks to the SPL Token program instead.

#[cfg(not(target_os = "solana"))]
mod memory;

use std::fmt;
use std::str::FromStr;
#[cfg(not(target_os = "solana"))]
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{CoreError, CoreResult};

#[cfg(not(target_os = "solana"))]
pub use memory::{InMemoryLedger, LedgerSnapshot};

// ============================================================================
// Addresses
// ============================================================================

/// A 32-byte account identity (wallet, custody account or mint)
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; 32]);

#[cfg(not(target_os = "solana"))]
static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(1);

impl Address {
    /// Unset sentinel, e.g. the lender of an unfunded escrow
    pub const ZERO: Address = Address([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Distinct address for tests and simulation
    #[cfg(not(target_os = "solana"))]
    pub fn new_unique() -> Self {
        let n = UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| CoreError::InvalidAddress)?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| CoreError::InvalidAddress)?;
        Ok(Self(bytes))
    }
}

// ============================================================================
// Ledger Interface
// ============================================================================

/// Failures reported by the token ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unknown mint {0}")]
    UnknownMint(Address),

    #[error("Mint {0} already exists")]
    MintExists(Address),

    #[error("Insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Insufficient allowance: needed {needed}, available {available}")]
    InsufficientAllowance { needed: u64, available: u64 },

    #[error("Balance overflow")]
    BalanceOverflow,
}

/// Fungible-token ledger hosting any number of mints
pub trait TokenLedger {
    /// Opaque saved state used to undo a failed operation
    type Checkpoint;

    fn decimals(&self, mint: &Address) -> Result<u8, LedgerError>;

    fn balance_of(&self, mint: &Address, owner: &Address) -> Result<u64, LedgerError>;

    fn allowance(&self, mint: &Address, owner: &Address, spender: &Address) -> Result<u64, LedgerError>;

    /// Let `spender` move up to `amount` of `owner`'s tokens
    fn approve(
        &mut self,
        mint: &Address,
        owner: &Address,
        spender: &Address,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Move tokens out of `from`, authorized by `from` itself
    fn transfer(
        &mut self,
        mint: &Address,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Move tokens out of `from`, authorized by an allowance granted to `spender`
    fn transfer_from(
        &mut self,
        mint: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), LedgerError>;

    fn checkpoint(&self) -> Self::Checkpoint;

    fn rollback(&mut self, checkpoint: Self::Checkpoint);
}

/// Run `op` with all-or-nothing semantics.
///
/// On error both the ledger and `state` are restored to their values before
/// the call, including transfers `op` already issued.
pub fn atomically<L, S, T, F>(ledger: &mut L, state: &mut S, op: F) -> CoreResult<T>
where
    L: TokenLedger,
    S: Clone,
    F: FnOnce(&mut L, &mut S) -> CoreResult<T>,
{
    let checkpoint = ledger.checkpoint();
    let saved = state.clone();

    match op(ledger, state) {
        Ok(value) => Ok(value),
        Err(err) => {
            ledger.rollback(checkpoint);
            *state = saved;
            tracing::warn!(error = %err, "operation rolled back");
            Err(err)
        }
    }
}
