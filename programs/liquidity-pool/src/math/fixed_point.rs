//! Overflow-checked integer arithmetic for balances and share supply.
//!
//! Every product of two u64 amounts is widened to u128 before dividing, and
//! every narrowing back to u64 is checked. Rounding direction is explicit at
//! each call site: floor for amounts paid out of the pool, ceiling for
//! amounts charged into it.

use crate::error::AmmError;

/// Multiply two u64 values and return the u128 product.
#[inline]
pub fn mul_u64(a: u64, b: u64) -> u128 {
    (a as u128) * (b as u128)
}

/// `floor(a * b / denominator)` with a widened intermediate.
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> Result<u64, AmmError> {
    if denominator == 0 {
        return Err(AmmError::ArithmeticOverflow);
    }
    let quotient = mul_u64(a, b) / denominator as u128;
    u64::try_from(quotient).map_err(|_| AmmError::ArithmeticOverflow)
}

/// `ceil(a * b / denominator)` with a widened intermediate.
pub fn mul_div_ceil(a: u64, b: u64, denominator: u64) -> Result<u64, AmmError> {
    if denominator == 0 {
        return Err(AmmError::ArithmeticOverflow);
    }
    let denom = denominator as u128;
    let quotient = (mul_u64(a, b) + denom - 1) / denom;
    u64::try_from(quotient).map_err(|_| AmmError::ArithmeticOverflow)
}

/// Floor of the exact square root, Babylonian method.
pub fn integer_sqrt(value: u128) -> u64 {
    if value <= 1 {
        return value as u64;
    }
    let mut x0 = value / 2;
    let mut x1 = (x0 + value / x0) / 2;
    while x1 < x0 {
        x0 = x1;
        x1 = (x0 + value / x0) / 2;
    }
    x0 as u64
}

pub fn checked_add(a: u64, b: u64) -> Result<u64, AmmError> {
    a.checked_add(b).ok_or(AmmError::ArithmeticOverflow)
}

pub fn checked_sub(a: u64, b: u64) -> Result<u64, AmmError> {
    a.checked_sub(b).ok_or(AmmError::ArithmeticOverflow)
}
