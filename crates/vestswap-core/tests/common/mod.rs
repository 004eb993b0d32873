//! Shared fixtures for the scenario tests
#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use vestswap_core::{Address, InMemoryLedger, PoolMints, TokenLedger};

/// One whole 9-decimal base token
pub const SOL: u64 = 1_000_000_000;
/// One whole 6-decimal quote token
pub const USDT: u64 = 1_000_000;
/// One whole 18-decimal token
pub const TOKEN: u64 = 1_000_000_000_000_000_000;

static INIT: Once = Once::new();

/// Route engine logs to the test writer, filtered by RUST_LOG
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Ledger with a 9-decimal base mint and a 6-decimal quote mint
pub struct TestMarket {
    pub ledger: InMemoryLedger,
    pub mints: PoolMints,
}

impl TestMarket {
    pub fn new() -> anyhow::Result<Self> {
        init_tracing();
        let mut ledger = InMemoryLedger::new();
        let base = ledger.create_mint(9);
        let quote = ledger.create_mint(6);
        Ok(Self {
            ledger,
            mints: PoolMints::new(base, quote)?,
        })
    }

    /// New account holding the given balances with unlimited approval for `spender`
    pub fn user(&mut self, spender: &Address, base: u64, quote: u64) -> anyhow::Result<Address> {
        let user = Address::new_unique();
        for (mint, amount) in [(self.mints.base, base), (self.mints.quote, quote)] {
            self.ledger.mint_to(&mint, &user, amount)?;
            self.ledger.approve(&mint, &user, spender, u64::MAX)?;
        }
        Ok(user)
    }

    pub fn base_balance(&self, owner: &Address) -> u64 {
        self.ledger.balance_of(&self.mints.base, owner).unwrap_or(0)
    }

    pub fn quote_balance(&self, owner: &Address) -> u64 {
        self.ledger.balance_of(&self.mints.quote, owner).unwrap_or(0)
    }
}
