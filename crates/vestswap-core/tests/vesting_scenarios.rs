//! # Vesting Escrow Scenarios
//!
//! End-to-end claims against an in-memory ledger.

mod common;

use common::{init_tracing, TOKEN};
use vestswap_core::{
    Address, CoreError, InMemoryLedger, ProtocolConfig, TokenLedger, VestingEscrow, WEEK,
};

const START: i64 = 1_700_000_000;

struct Setup {
    ledger: InMemoryLedger,
    escrow: VestingEscrow,
    token: Address,
    lender: Address,
    borrower: Address,
}

fn setup(balance: u64) -> anyhow::Result<Setup> {
    init_tracing();
    let mut ledger = InMemoryLedger::new();
    let token = ledger.create_mint(18);
    let lender = Address::new_unique();
    let borrower = Address::new_unique();
    let escrow = VestingEscrow::new(Address::new_unique(), &ProtocolConfig::default())?;

    ledger.mint_to(&token, &lender, balance)?;
    ledger.approve(&token, &lender, &escrow.address(), balance)?;

    Ok(Setup {
        ledger,
        escrow,
        token,
        lender,
        borrower,
    })
}

#[test]
fn six_tokens_over_six_weeks() -> anyhow::Result<()> {
    let Setup {
        mut ledger,
        mut escrow,
        token,
        lender,
        borrower,
    } = setup(6 * TOKEN)?;

    escrow.fund(&mut ledger, &lender, &token, &borrower, 6 * TOKEN, 6, START)?;
    assert_eq!(escrow.loan(), 6 * TOKEN);
    assert_eq!(escrow.lender(), lender);
    assert_eq!(escrow.borrower(), borrower);
    assert_eq!(escrow.locked_at(), START);
    assert_eq!(ledger.balance_of(&token, &escrow.address())?, 6 * TOKEN);

    // Week 1
    assert_eq!(escrow.withdraw(&mut ledger, &borrower, START + WEEK)?, TOKEN);
    assert_eq!(ledger.balance_of(&token, &borrower)?, TOKEN);

    // Same week: nothing new
    assert_eq!(escrow.withdraw(&mut ledger, &borrower, START + WEEK + 3_600)?, 0);
    assert_eq!(escrow.claimed_steps(), 1);
    assert_eq!(ledger.balance_of(&token, &borrower)?, TOKEN);

    // Week 3
    escrow.withdraw(&mut ledger, &borrower, START + 3 * WEEK)?;
    assert_eq!(ledger.balance_of(&token, &borrower)?, 3 * TOKEN);

    // Well past the schedule
    escrow.withdraw(&mut ledger, &borrower, START + 9 * WEEK)?;
    assert_eq!(ledger.balance_of(&token, &borrower)?, 6 * TOKEN);
    assert_eq!(escrow.claimed_amount(), 6 * TOKEN);
    assert_eq!(ledger.balance_of(&token, &escrow.address())?, 0);

    let err = escrow.withdraw(&mut ledger, &borrower, START + 10 * WEEK).unwrap_err();
    assert_eq!(err, CoreError::FundEmpty);
    assert_eq!(err.to_string(), "this fund is empty");
    Ok(())
}

#[test]
fn seven_tokens_over_five_steps() -> anyhow::Result<()> {
    let Setup {
        mut ledger,
        mut escrow,
        token,
        lender,
        borrower,
    } = setup(7 * TOKEN)?;

    escrow.fund(&mut ledger, &lender, &token, &borrower, 7 * TOKEN, 5, START)?;

    let first = escrow.withdraw(&mut ledger, &borrower, START + 3 * WEEK)?;
    assert_eq!(first, 4_200_000_000_000_000_000);

    let second = escrow.withdraw(&mut ledger, &borrower, START + 10 * WEEK)?;
    assert_eq!(second, 2_800_000_000_000_000_000);

    assert_eq!(first + second, 7 * TOKEN);
    assert_eq!(ledger.balance_of(&token, &borrower)?, 7 * TOKEN);
    Ok(())
}

#[test]
fn claimable_previews_without_mutation() -> anyhow::Result<()> {
    let Setup {
        mut ledger,
        mut escrow,
        token,
        lender,
        borrower,
    } = setup(6 * TOKEN)?;

    assert_eq!(escrow.claimable(START), Err(CoreError::NotFunded));
    escrow.fund(&mut ledger, &lender, &token, &borrower, 6 * TOKEN, 6, START)?;

    let preview = escrow.claimable(START + 2 * WEEK)?;
    assert_eq!(preview.steps, 2);
    assert_eq!(preview.amount, 2 * TOKEN);
    assert_eq!(escrow.claimed_steps(), 0);

    assert_eq!(escrow.withdraw(&mut ledger, &borrower, START + 2 * WEEK)?, preview.amount);
    Ok(())
}

#[test]
fn only_the_borrower_may_withdraw() -> anyhow::Result<()> {
    let Setup {
        mut ledger,
        mut escrow,
        token,
        lender,
        borrower,
    } = setup(6 * TOKEN)?;

    escrow.fund(&mut ledger, &lender, &token, &borrower, 6 * TOKEN, 6, START)?;
    assert_eq!(
        escrow.withdraw(&mut ledger, &lender, START + WEEK),
        Err(CoreError::Unauthorized)
    );
    assert_eq!(escrow.claimed_steps(), 0);
    Ok(())
}

#[test]
fn funding_twice_fails() -> anyhow::Result<()> {
    let Setup {
        mut ledger,
        mut escrow,
        token,
        lender,
        borrower,
    } = setup(12 * TOKEN)?;

    escrow.fund(&mut ledger, &lender, &token, &borrower, 6 * TOKEN, 6, START)?;
    assert_eq!(
        escrow.fund(&mut ledger, &lender, &token, &borrower, 6 * TOKEN, 6, START),
        Err(CoreError::AlreadyFunded)
    );
    assert_eq!(ledger.balance_of(&token, &lender)?, 6 * TOKEN);
    Ok(())
}

#[test]
fn unapproved_funding_leaves_escrow_empty() -> anyhow::Result<()> {
    let Setup {
        mut ledger,
        mut escrow,
        token,
        lender,
        borrower,
    } = setup(6 * TOKEN)?;

    // approval covers 6 tokens only
    ledger.mint_to(&token, &lender, TOKEN)?;
    let err = escrow
        .fund(&mut ledger, &lender, &token, &borrower, 7 * TOKEN, 7, START)
        .unwrap_err();
    assert!(matches!(err, CoreError::Ledger(_)));

    assert!(escrow.record().is_none());
    assert_eq!(escrow.lender(), Address::ZERO);
    assert_eq!(ledger.balance_of(&token, &lender)?, 7 * TOKEN);
    Ok(())
}

#[test]
fn custom_step_duration() -> anyhow::Result<()> {
    init_tracing();
    let mut ledger = InMemoryLedger::new();
    let token = ledger.create_mint(6);
    let lender = Address::new_unique();
    let borrower = Address::new_unique();
    let config = ProtocolConfig::default().with_step_duration(60);
    let mut escrow = VestingEscrow::new(Address::new_unique(), &config)?;

    ledger.mint_to(&token, &lender, 100)?;
    ledger.approve(&token, &lender, &escrow.address(), 100)?;
    escrow.fund(&mut ledger, &lender, &token, &borrower, 100, 4, 0)?;

    assert_eq!(escrow.withdraw(&mut ledger, &borrower, 119)?, 25);
    assert_eq!(escrow.withdraw(&mut ledger, &borrower, 120)?, 25);
    Ok(())
}
