//! # Stepwise Vesting Escrow
//!
//! A lender locks a fixed amount for a borrower. The amount unlocks in equal
//! steps of `step_duration` seconds counted from `locked_at`; each step pays
//! `floor(total_amount / total_steps)` and the final step pays whatever is
//! left, so the releases always sum to the funded total.
//!
//! `VestingRecord` holds the schedule arithmetic and is shared with the
//! on-chain program. `VestingEscrow` is the ledger-backed engine.

use serde::{Deserialize, Serialize};

use crate::config::ProtocolConfig;
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{atomically, Address, TokenLedger};
use crate::math::{add_u64, div_u64, mul_u64, sub_u64};

/// Funding record of one escrow instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingRecord {
    pub lender: Address,
    pub borrower: Address,
    /// Token being vested
    pub mint: Address,
    pub total_amount: u64,
    pub total_steps: u64,
    /// Seconds per step
    pub step_duration: i64,
    /// Funding timestamp; step boundaries are counted from here
    pub locked_at: i64,
    pub claimed_steps: u64,
    pub claimed_amount: u64,
}

/// Steps and amount unlocked by one claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Release {
    pub steps: u64,
    pub amount: u64,
}

impl Release {
    /// No step boundary was crossed since the last claim
    pub fn is_empty(&self) -> bool {
        self.steps == 0
    }
}

impl VestingRecord {
    pub fn new(
        lender: Address,
        borrower: Address,
        mint: Address,
        total_amount: u64,
        total_steps: u64,
        step_duration: i64,
        locked_at: i64,
    ) -> CoreResult<Self> {
        if total_amount == 0 {
            return Err(CoreError::InvalidAmount);
        }
        if total_steps == 0 {
            return Err(CoreError::InvalidSteps);
        }
        if borrower.is_zero() {
            return Err(CoreError::InvalidAddress);
        }
        if step_duration <= 0 {
            return Err(CoreError::invalid_config("step duration must be positive"));
        }

        Ok(Self {
            lender,
            borrower,
            mint,
            total_amount,
            total_steps,
            step_duration,
            locked_at,
            claimed_steps: 0,
            claimed_amount: 0,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.claimed_steps >= self.total_steps
    }

    /// Base amount unlocked per step
    pub fn step_amount(&self) -> CoreResult<u64> {
        div_u64(self.total_amount, self.total_steps)
    }

    /// Whole steps elapsed at `now`, clamped to the schedule length
    pub fn elapsed_steps(&self, now: i64) -> u64 {
        if now <= self.locked_at {
            return 0;
        }
        let elapsed = match now.checked_sub(self.locked_at) {
            Some(secs) => (secs / self.step_duration) as u64,
            // a gap wider than i64 outlasts any schedule
            None => return self.total_steps,
        };
        elapsed.min(self.total_steps)
    }

    /// Release a claim at `now` would pay.
    ///
    /// Fails with `FundEmpty` once every step has been claimed.
    pub fn release_at(&self, now: i64) -> CoreResult<Release> {
        if self.is_exhausted() {
            return Err(CoreError::FundEmpty);
        }

        let new_steps = self.elapsed_steps(now).saturating_sub(self.claimed_steps);
        if new_steps == 0 {
            return Ok(Release::default());
        }

        // The final claim absorbs the division remainder
        let amount = if add_u64(self.claimed_steps, new_steps)? == self.total_steps {
            sub_u64(self.total_amount, self.claimed_amount)?
        } else {
            mul_u64(new_steps, self.step_amount()?)?
        };

        Ok(Release {
            steps: new_steps,
            amount,
        })
    }

    /// Record a release computed by `release_at`
    pub fn apply(&mut self, release: Release) -> CoreResult<()> {
        let claimed_steps = add_u64(self.claimed_steps, release.steps)?;
        let claimed_amount = add_u64(self.claimed_amount, release.amount)?;
        if claimed_steps > self.total_steps || claimed_amount > self.total_amount {
            return Err(CoreError::MathOverflow);
        }

        self.claimed_steps = claimed_steps;
        self.claimed_amount = claimed_amount;
        Ok(())
    }
}

// ============================================================================
// Ledger-backed Engine
// ============================================================================

/// One escrow instance with its own custody account
#[derive(Debug, Clone)]
pub struct VestingEscrow {
    address: Address,
    step_duration: i64,
    record: Option<VestingRecord>,
}

impl VestingEscrow {
    pub fn new(address: Address, config: &ProtocolConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            address,
            step_duration: config.step_duration_secs,
            record: None,
        })
    }

    /// Custody account holding the locked tokens
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn record(&self) -> Option<&VestingRecord> {
        self.record.as_ref()
    }

    pub fn lender(&self) -> Address {
        self.record.as_ref().map_or(Address::ZERO, |r| r.lender)
    }

    pub fn borrower(&self) -> Address {
        self.record.as_ref().map_or(Address::ZERO, |r| r.borrower)
    }

    /// Funded total
    pub fn loan(&self) -> u64 {
        self.record.as_ref().map_or(0, |r| r.total_amount)
    }

    pub fn locked_at(&self) -> i64 {
        self.record.as_ref().map_or(0, |r| r.locked_at)
    }

    pub fn claimed_steps(&self) -> u64 {
        self.record.as_ref().map_or(0, |r| r.claimed_steps)
    }

    pub fn claimed_amount(&self) -> u64 {
        self.record.as_ref().map_or(0, |r| r.claimed_amount)
    }

    /// Preview of what `withdraw` would release at `now`
    pub fn claimable(&self, now: i64) -> CoreResult<Release> {
        self.record
            .as_ref()
            .ok_or(CoreError::NotFunded)?
            .release_at(now)
    }

    /// Lock `total_amount` of `token` for `borrower`, pulled from `caller`.
    ///
    /// The caller must have approved this escrow's address for the amount.
    #[allow(clippy::too_many_arguments)]
    pub fn fund<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        token: &Address,
        borrower: &Address,
        total_amount: u64,
        total_steps: u64,
        now: i64,
    ) -> CoreResult<()> {
        if self.record.is_some() {
            return Err(CoreError::AlreadyFunded);
        }

        let record = VestingRecord::new(
            *caller,
            *borrower,
            *token,
            total_amount,
            total_steps,
            self.step_duration,
            now,
        )?;
        let custody = self.address;

        atomically(ledger, &mut self.record, |ledger, slot| {
            *slot = Some(record);
            ledger.transfer_from(token, &custody, caller, &custody, total_amount)?;
            Ok(())
        })?;

        tracing::info!(
            escrow = %custody,
            lender = %caller,
            borrower = %borrower,
            total_amount,
            total_steps,
            locked_at = now,
            "escrow funded"
        );
        Ok(())
    }

    /// Pay the borrower every step unlocked since the last claim.
    ///
    /// Returns the released amount; zero when no new step has elapsed.
    pub fn withdraw<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        now: i64,
    ) -> CoreResult<u64> {
        let record = self.record.as_ref().ok_or(CoreError::NotFunded)?;
        if *caller != record.borrower {
            return Err(CoreError::Unauthorized);
        }

        let release = record.release_at(now)?;
        tracing::debug!(
            escrow = %self.address,
            elapsed_steps = record.elapsed_steps(now),
            claimed_steps = record.claimed_steps,
            new_steps = release.steps,
            amount = release.amount,
            "vesting release computed"
        );
        if release.is_empty() {
            return Ok(0);
        }

        let custody = self.address;
        let (mint, borrower) = (record.mint, record.borrower);

        let released = atomically(ledger, &mut self.record, |ledger, slot| {
            let record = slot.as_mut().ok_or(CoreError::NotFunded)?;
            record.apply(release)?;
            if release.amount > 0 {
                ledger.transfer(&mint, &custody, &borrower, release.amount)?;
            }
            Ok(release.amount)
        })?;

        tracing::info!(
            escrow = %custody,
            borrower = %borrower,
            released,
            claimed_steps = self.claimed_steps(),
            claimed_amount = self.claimed_amount(),
            "vesting claim paid"
        );
        Ok(released)
    }
}
