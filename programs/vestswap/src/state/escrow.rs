//! Vesting escrow state

use anchor_lang::prelude::*;
use vestswap_core::vesting::VestingRecord;

use super::{to_address, to_pubkey};

/// Funding record of one escrow; the locked tokens sit in `vault`
#[account]
#[derive(InitSpace)]
pub struct VestingEscrow {
    pub lender: Pubkey,
    pub borrower: Pubkey,
    /// Vested token
    pub mint: Pubkey,
    pub vault: Pubkey,

    pub total_amount: u64,
    pub total_steps: u64,
    /// Seconds per unlock step
    pub step_duration: i64,
    pub locked_at: i64,
    pub claimed_steps: u64,
    pub claimed_amount: u64,

    /// Caller-chosen discriminator so one lender can fund several escrows
    pub seed: u64,
    pub bump: u8,
}

impl VestingEscrow {
    pub fn record(&self) -> VestingRecord {
        VestingRecord {
            lender: to_address(&self.lender),
            borrower: to_address(&self.borrower),
            mint: to_address(&self.mint),
            total_amount: self.total_amount,
            total_steps: self.total_steps,
            step_duration: self.step_duration,
            locked_at: self.locked_at,
            claimed_steps: self.claimed_steps,
            claimed_amount: self.claimed_amount,
        }
    }

    pub fn store(&mut self, record: &VestingRecord) {
        self.lender = to_pubkey(&record.lender);
        self.borrower = to_pubkey(&record.borrower);
        self.mint = to_pubkey(&record.mint);
        self.total_amount = record.total_amount;
        self.total_steps = record.total_steps;
        self.step_duration = record.step_duration;
        self.locked_at = record.locked_at;
        self.claimed_steps = record.claimed_steps;
        self.claimed_amount = record.claimed_amount;
    }
}
