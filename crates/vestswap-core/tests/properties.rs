//! # Property Tests
//!
//! Conservation, proportionality and fee-split properties of the planners.

use proptest::prelude::*;
use vestswap_core::pool::{plan_buy, plan_deposit, plan_redemption, plan_sell};
use vestswap_core::{Address, Reserves, VestingRecord, WEEK};

fn record(total_amount: u64, total_steps: u64) -> VestingRecord {
    VestingRecord::new(
        Address::new_unique(),
        Address::new_unique(),
        Address::new_unique(),
        total_amount,
        total_steps,
        WEEK,
        0,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn vesting_releases_sum_to_total(
        total_amount in 1u64..=u64::MAX / 2,
        total_steps in 1u64..=520,
        claim_weeks in prop::collection::vec(0i64..600, 0..12),
    ) {
        let mut r = record(total_amount, total_steps);
        let mut claim_weeks = claim_weeks;
        claim_weeks.sort_unstable();

        let mut paid = 0u64;
        for week in claim_weeks {
            if r.is_exhausted() {
                break;
            }
            let release = r.release_at(week * WEEK).unwrap();
            r.apply(release).unwrap();
            paid += release.amount;
            prop_assert!(r.claimed_amount <= r.total_amount);
        }

        if !r.is_exhausted() {
            let release = r.release_at(total_steps as i64 * WEEK).unwrap();
            r.apply(release).unwrap();
            paid += release.amount;
        }

        prop_assert_eq!(paid, total_amount);
        prop_assert_eq!(r.claimed_steps, total_steps);
    }

    #[test]
    fn redemption_is_floor_proportional(
        reserve_a in 1u64..1_000_000_000_000_000,
        reserve_b in 0u64..1_000_000_000_000_000,
        total_shares in 1u64..1_000_000_000_000_000,
        fraction in 1u64..=10_000,
    ) {
        let share_amount = ((total_shares as u128 * fraction as u128) / 10_000).max(1) as u64;
        let r = plan_redemption(Reserves::new(reserve_a, reserve_b), total_shares, share_amount).unwrap();

        for (reserve, paid) in [(reserve_a, r.amount_a), (reserve_b, r.amount_b)] {
            let exact = reserve as u128 * share_amount as u128;
            prop_assert!(paid as u128 * total_shares as u128 <= exact);
            prop_assert!((paid as u128 + 1) * total_shares as u128 > exact);
        }
    }

    #[test]
    fn deposit_never_lowers_price(
        reserve_a in 1_000u64..1_000_000_000_000,
        reserve_b in 1_000u64..1_000_000_000_000,
        amount_a in 1_000u64..1_000_000_000_000,
    ) {
        let reserves = Reserves::new(reserve_a, reserve_b);
        let deposit = plan_deposit(reserves, reserve_a, amount_a).unwrap();

        let new_a = (reserve_a + deposit.amount_a) as u128;
        let new_b = (reserve_b + deposit.amount_b) as u128;
        // new_b / new_a >= reserve_b / reserve_a
        prop_assert!(new_b * reserve_a as u128 >= reserve_b as u128 * new_a);
        // and overshoots by less than one quote unit
        prop_assert!((new_b - 1) * (reserve_a as u128) < reserve_b as u128 * new_a);
        prop_assert_eq!(deposit.shares, amount_a);
    }

    #[test]
    fn fees_split_trade_output(
        amount_a in 1u64..1_000_000_000_000,
        fee_percentage in 0u8..=100,
    ) {
        let reserves = Reserves::new(1_000_000_000_000, 200_000_000_000);

        let buy = plan_buy(reserves, amount_a, 9, fee_percentage).unwrap();
        prop_assert_eq!(buy.fee + buy.to_buyer, amount_a);
        prop_assert_eq!(buy.fee as u128, amount_a as u128 * fee_percentage as u128 / 100);

        if let Ok(sell) = plan_sell(reserves, amount_a, 9, fee_percentage) {
            prop_assert_eq!(sell.fee + sell.to_seller, sell.amount_b);
            prop_assert_eq!(sell.fee as u128, sell.amount_b as u128 * fee_percentage as u128 / 100);
            prop_assert!(sell.amount_b <= buy.amount_b);
        }
    }
}
