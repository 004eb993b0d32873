//! In-memory token ledger with ERC-20 style allowances

use std::collections::HashMap;

use super::{Address, LedgerError, TokenLedger};

#[derive(Debug, Clone, Default)]
struct MintState {
    decimals: u8,
    supply: u64,
    balances: HashMap<Address, u64>,
    allowances: HashMap<(Address, Address), u64>,
}

impl MintState {
    fn balance(&self, owner: &Address) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn debit(&mut self, owner: &Address, amount: u64) -> Result<(), LedgerError> {
        let available = self.balance(owner);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds { needed: amount, available })?;
        self.balances.insert(*owner, remaining);
        Ok(())
    }

    fn credit(&mut self, owner: &Address, amount: u64) -> Result<(), LedgerError> {
        let updated = self
            .balance(owner)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.balances.insert(*owner, updated);
        Ok(())
    }
}

/// Saved ledger contents
#[derive(Debug, Clone)]
pub struct LedgerSnapshot(HashMap<Address, MintState>);

/// Ledger that keeps every mint in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    mints: HashMap<Address, MintState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mint at a fresh address
    pub fn create_mint(&mut self, decimals: u8) -> Address {
        let mint = Address::new_unique();
        self.mints.insert(
            mint,
            MintState {
                decimals,
                ..MintState::default()
            },
        );
        mint
    }

    /// Create a mint at a caller-chosen address
    pub fn create_mint_at(&mut self, mint: Address, decimals: u8) -> Result<(), LedgerError> {
        if self.mints.contains_key(&mint) {
            return Err(LedgerError::MintExists(mint));
        }
        self.mints.insert(
            mint,
            MintState {
                decimals,
                ..MintState::default()
            },
        );
        Ok(())
    }

    /// Issue new tokens to `to`
    pub fn mint_to(&mut self, mint: &Address, to: &Address, amount: u64) -> Result<(), LedgerError> {
        let state = self.mint_mut(mint)?;
        state.supply = state
            .supply
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        state.credit(to, amount)
    }

    pub fn supply(&self, mint: &Address) -> Result<u64, LedgerError> {
        Ok(self.mint(mint)?.supply)
    }

    fn mint(&self, mint: &Address) -> Result<&MintState, LedgerError> {
        self.mints.get(mint).ok_or(LedgerError::UnknownMint(*mint))
    }

    fn mint_mut(&mut self, mint: &Address) -> Result<&mut MintState, LedgerError> {
        self.mints.get_mut(mint).ok_or(LedgerError::UnknownMint(*mint))
    }
}

impl TokenLedger for InMemoryLedger {
    type Checkpoint = LedgerSnapshot;

    fn decimals(&self, mint: &Address) -> Result<u8, LedgerError> {
        Ok(self.mint(mint)?.decimals)
    }

    fn balance_of(&self, mint: &Address, owner: &Address) -> Result<u64, LedgerError> {
        Ok(self.mint(mint)?.balance(owner))
    }

    fn allowance(&self, mint: &Address, owner: &Address, spender: &Address) -> Result<u64, LedgerError> {
        Ok(self
            .mint(mint)?
            .allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0))
    }

    fn approve(
        &mut self,
        mint: &Address,
        owner: &Address,
        spender: &Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.mint_mut(mint)?
            .allowances
            .insert((*owner, *spender), amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        mint: &Address,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let state = self.mint_mut(mint)?;
        state.debit(from, amount)?;
        state.credit(to, amount)
    }

    fn transfer_from(
        &mut self,
        mint: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let state = self.mint_mut(mint)?;

        // u64::MAX approvals never decrease
        if spender != from {
            let key = (*from, *spender);
            let available = state.allowances.get(&key).copied().unwrap_or(0);
            if available < amount {
                return Err(LedgerError::InsufficientAllowance { needed: amount, available });
            }
            if available != u64::MAX {
                state.allowances.insert(key, available - amount);
            }
        }

        state.debit(from, amount)?;
        state.credit(to, amount)
    }

    fn checkpoint(&self) -> Self::Checkpoint {
        LedgerSnapshot(self.mints.clone())
    }

    fn rollback(&mut self, checkpoint: Self::Checkpoint) {
        self.mints = checkpoint.0;
    }
}
