//! Constant-product curve quotes.
//!
//! Pure functions over book reserves and share supply. Each quote validates
//! its inputs, applies the rounding direction that favors the pool, and
//! returns the amounts for the processor to move and apply. No account or
//! ledger access happens here.

use crate::error::AmmError;
use crate::math::fixed_point::{checked_add, checked_sub, integer_sqrt, mul_div_ceil, mul_div_floor, mul_u64};

/// Basis-point denominator: 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Shares from the first deposit that stay locked in the pool forever.
/// Closes the empty-pool ratio-manipulation window.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Amounts resolved for a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositAmounts {
    pub amount_x: u64,
    pub amount_y: u64,
    /// Shares minted to the depositor.
    pub shares_to_caller: u64,
    /// Shares minted to the pool's locked reserve (first deposit only).
    pub shares_to_reserve: u64,
}

impl DepositAmounts {
    pub fn total_shares(&self) -> Result<u64, AmmError> {
        checked_add(self.shares_to_caller, self.shares_to_reserve)
    }
}

/// Amounts resolved for a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawAmounts {
    pub amount_x: u64,
    pub amount_y: u64,
}

/// Outcome of a swap quote, including the post-trade reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub amount_out: u64,
    pub new_reserve_in: u64,
    pub new_reserve_out: u64,
}

/// Resolve a deposit of `desired_shares` against the caller's input caps.
///
/// On an empty pool the caps are deposited in full and the geometric mean of
/// the deposit becomes the share supply; `MINIMUM_LIQUIDITY` of it is
/// diverted to the locked reserve and `desired_shares` acts as a floor on
/// the caller's portion. On a live pool the required inputs are the
/// ceiling-rounded pro-rata amounts for exactly `desired_shares`.
pub fn quote_deposit(
    reserve_x: u64,
    reserve_y: u64,
    share_supply: u64,
    desired_shares: u64,
    max_x: u64,
    max_y: u64,
) -> Result<DepositAmounts, AmmError> {
    if desired_shares == 0 {
        return Err(AmmError::InvalidAmount);
    }

    if share_supply == 0 {
        if max_x == 0 || max_y == 0 {
            return Err(AmmError::InvalidAmount);
        }
        let minted = integer_sqrt(mul_u64(max_x, max_y));
        if minted <= MINIMUM_LIQUIDITY {
            return Err(AmmError::ZeroLiquidity);
        }
        let shares_to_caller = minted - MINIMUM_LIQUIDITY;
        if shares_to_caller < desired_shares {
            return Err(AmmError::SlippageExceeded);
        }
        return Ok(DepositAmounts {
            amount_x: max_x,
            amount_y: max_y,
            shares_to_caller,
            shares_to_reserve: MINIMUM_LIQUIDITY,
        });
    }

    let amount_x = mul_div_ceil(desired_shares, reserve_x, share_supply)?;
    let amount_y = mul_div_ceil(desired_shares, reserve_y, share_supply)?;
    if amount_x > max_x || amount_y > max_y {
        return Err(AmmError::SlippageExceeded);
    }
    Ok(DepositAmounts {
        amount_x,
        amount_y,
        shares_to_caller: desired_shares,
        shares_to_reserve: 0,
    })
}

/// Resolve a withdrawal of `shares` against the caller's minimum-output
/// bounds. Payouts are floor-rounded pro-rata amounts.
pub fn quote_withdraw(
    reserve_x: u64,
    reserve_y: u64,
    share_supply: u64,
    shares: u64,
    min_x: u64,
    min_y: u64,
) -> Result<WithdrawAmounts, AmmError> {
    if shares == 0 {
        return Err(AmmError::InvalidAmount);
    }
    if share_supply == 0 {
        return Err(AmmError::ZeroLiquidity);
    }
    if shares > share_supply {
        return Err(AmmError::InsufficientLiquidity);
    }

    let amount_x = mul_div_floor(shares, reserve_x, share_supply)?;
    let amount_y = mul_div_floor(shares, reserve_y, share_supply)?;
    if amount_x < min_x || amount_y < min_y {
        return Err(AmmError::SlippageExceeded);
    }
    Ok(WithdrawAmounts { amount_x, amount_y })
}

/// Quote a swap of `amount_in` against `(reserve_in, reserve_out)`.
///
/// The fee is taken on the input side and stays in the pool: the output is
/// computed from the fee-reduced input, while the full input is added to the
/// reserve. `amount_out` is strictly below `reserve_out`; a quote that
/// rounds to zero output is rejected rather than executed.
pub fn quote_swap(
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u16,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<SwapOutcome, AmmError> {
    if fee_bps as u64 >= BPS_DENOMINATOR {
        return Err(AmmError::InvalidFee);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::ZeroLiquidity);
    }
    if amount_in == 0 {
        return Err(AmmError::InvalidAmount);
    }

    let amount_in_after_fee =
        mul_div_floor(amount_in, BPS_DENOMINATOR - fee_bps as u64, BPS_DENOMINATOR)?;
    let denominator = checked_add(reserve_in, amount_in_after_fee)?;
    // Ceiling here is what keeps the product from ever shrinking.
    let reserve_out_kept = mul_div_ceil(reserve_in, reserve_out, denominator)?;
    let amount_out = checked_sub(reserve_out, reserve_out_kept)?;
    if amount_out == 0 {
        return Err(AmmError::InvalidAmount);
    }
    if amount_out < min_amount_out {
        return Err(AmmError::SlippageExceeded);
    }

    Ok(SwapOutcome {
        amount_out,
        new_reserve_in: checked_add(reserve_in, amount_in)?,
        new_reserve_out: reserve_out_kept,
    })
}
