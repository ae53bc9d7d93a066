//! Property tests for the constant-product curve.

use proptest::prelude::*;

use liquidity_pool::error::AmmError;
use liquidity_pool::math::curve::{
    quote_deposit, quote_swap, quote_withdraw, MINIMUM_LIQUIDITY,
};
use liquidity_pool::math::fixed_point::integer_sqrt;

proptest! {
    /// Swapping never decreases the reserve product, at any fee.
    #[test]
    fn swap_never_decreases_product(
        reserve_in in 1u64..=1_000_000_000_000,
        reserve_out in 1u64..=1_000_000_000_000,
        fee_bps in 0u16..10_000,
        amount_in in 1u64..=1_000_000_000_000,
    ) {
        if let Ok(outcome) = quote_swap(reserve_in, reserve_out, fee_bps, amount_in, 0) {
            let before = reserve_in as u128 * reserve_out as u128;
            let after = outcome.new_reserve_in as u128 * outcome.new_reserve_out as u128;
            prop_assert!(after >= before);
        }
    }

    /// No single trade drains the outgoing reserve.
    #[test]
    fn swap_never_drains_reserve(
        reserve_in in 1u64..=1_000_000_000_000,
        reserve_out in 1u64..=1_000_000_000_000,
        fee_bps in 0u16..10_000,
        amount_in in 1u64..=u64::MAX / 2,
    ) {
        if let Ok(outcome) = quote_swap(reserve_in, reserve_out, fee_bps, amount_in, 0) {
            prop_assert!(outcome.amount_out < reserve_out);
            prop_assert!(outcome.new_reserve_out >= 1);
        }
    }

    /// A successful swap always honors the caller's minimum.
    #[test]
    fn swap_honors_min_out(
        reserve_in in 1u64..=1_000_000_000_000,
        reserve_out in 1u64..=1_000_000_000_000,
        fee_bps in 0u16..10_000,
        amount_in in 1u64..=1_000_000_000_000,
        min_amount_out in 0u64..=1_000_000_000_000,
    ) {
        match quote_swap(reserve_in, reserve_out, fee_bps, amount_in, min_amount_out) {
            Ok(outcome) => prop_assert!(outcome.amount_out >= min_amount_out),
            Err(_) => {}
        }
    }

    /// Deposits keep the reserve ratio within one rounding unit.
    #[test]
    fn deposit_preserves_ratio(
        reserve_x in 1u64..=1_000_000_000_000,
        reserve_y in 1u64..=1_000_000_000_000,
        share_supply in 1u64..=1_000_000_000_000,
        desired_shares in 1u64..=1_000_000_000_000,
    ) {
        if let Ok(quote) =
            quote_deposit(reserve_x, reserve_y, share_supply, desired_shares, u64::MAX, u64::MAX)
        {
            // Cross-multiplied drift of the deposited amounts vs the reserves
            let lhs = quote.amount_x as u128 * reserve_y as u128;
            let rhs = quote.amount_y as u128 * reserve_x as u128;
            let drift = lhs.abs_diff(rhs);
            prop_assert!(drift < reserve_x.max(reserve_y) as u128);
        }
    }

    /// Depositing and then withdrawing the same shares never profits.
    #[test]
    fn round_trip_never_profits(
        reserve_x in 1u64..=1_000_000_000_000,
        reserve_y in 1u64..=1_000_000_000_000,
        share_supply in 1u64..=1_000_000_000_000,
        shares in 1u64..=1_000_000_000_000,
    ) {
        let deposit = match quote_deposit(
            reserve_x, reserve_y, share_supply, shares, u64::MAX, u64::MAX,
        ) {
            Ok(quote) => quote,
            Err(_) => return Ok(()),
        };
        let new_x = match reserve_x.checked_add(deposit.amount_x) {
            Some(v) => v,
            None => return Ok(()),
        };
        let new_y = match reserve_y.checked_add(deposit.amount_y) {
            Some(v) => v,
            None => return Ok(()),
        };
        let withdraw = quote_withdraw(
            new_x,
            new_y,
            share_supply + shares,
            shares,
            0,
            0,
        ).unwrap();
        prop_assert!(withdraw.amount_x <= deposit.amount_x);
        prop_assert!(withdraw.amount_y <= deposit.amount_y);
    }

    /// First deposits mint the geometric mean less the locked minimum, or
    /// fail outright for dust.
    #[test]
    fn first_deposit_mints_geometric_mean(
        max_x in 1u64..=1_000_000_000_000,
        max_y in 1u64..=1_000_000_000_000,
    ) {
        let product = max_x as u128 * max_y as u128;
        let root = integer_sqrt(product);
        // Independent check that `root` really is the floored square root
        prop_assert!((root as u128) * (root as u128) <= product);
        prop_assert!((root as u128 + 1) * (root as u128 + 1) > product);
        match quote_deposit(0, 0, 0, 1, max_x, max_y) {
            Ok(quote) => {
                prop_assert!(root > MINIMUM_LIQUIDITY);
                prop_assert_eq!(quote.shares_to_caller, root - MINIMUM_LIQUIDITY);
                prop_assert_eq!(quote.shares_to_reserve, MINIMUM_LIQUIDITY);
                prop_assert_eq!((quote.amount_x, quote.amount_y), (max_x, max_y));
            }
            Err(err) => {
                prop_assert_eq!(err, AmmError::ZeroLiquidity);
                prop_assert!(root <= MINIMUM_LIQUIDITY);
            }
        }
    }

    /// Withdrawals never pay out more than the pro-rata share of reserves.
    #[test]
    fn withdraw_is_pro_rata_floor(
        reserve_x in 1u64..=1_000_000_000_000,
        reserve_y in 1u64..=1_000_000_000_000,
        share_supply in 1u64..=1_000_000_000_000,
        shares in 1u64..=1_000_000_000_000,
    ) {
        prop_assume!(shares <= share_supply);
        let amounts = quote_withdraw(reserve_x, reserve_y, share_supply, shares, 0, 0).unwrap();
        let exact_x = shares as u128 * reserve_x as u128;
        prop_assert!(amounts.amount_x as u128 * share_supply as u128 <= exact_x);
        let exact_y = shares as u128 * reserve_y as u128;
        prop_assert!(amounts.amount_y as u128 * share_supply as u128 <= exact_y);
        // Withdrawing the whole supply empties the pool exactly
        if shares == share_supply {
            prop_assert_eq!(amounts.amount_x, reserve_x);
            prop_assert_eq!(amounts.amount_y, reserve_y);
        }
    }
}
