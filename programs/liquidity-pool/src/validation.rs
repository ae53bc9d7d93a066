//! Validation layer shared by every instruction handler.
//!
//! Account-shape checks plus the pool-level guard rails: fee range, pause
//! flag, authority, and the defensive invariant assertions. All of these run
//! before (or, for the invariant checks, instead of committing) any state
//! write.

use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, msg, pubkey::Pubkey};

use crate::error::AmmError;
use crate::math::curve::BPS_DENOMINATOR;
use crate::math::fixed_point::mul_u64;
use crate::state::PoolConfig;

/// Validate that an account is a signer
pub fn validate_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        msg!("Account {} must be a signer", account.key);
        return Err(AmmError::Unauthorized.into());
    }
    Ok(())
}

/// Validate that an account is writable
pub fn validate_writable(account: &AccountInfo) -> ProgramResult {
    if !account.is_writable {
        msg!("Account {} must be writable", account.key);
        return Err(AmmError::InvalidAccountData.into());
    }
    Ok(())
}

/// Validate that an account is owned by the expected program
pub fn validate_owner(account: &AccountInfo, expected_owner: &Pubkey) -> ProgramResult {
    if account.owner != expected_owner {
        msg!(
            "Account owner mismatch. Expected: {}, Actual: {}",
            expected_owner,
            account.owner
        );
        return Err(AmmError::Unauthorized.into());
    }
    Ok(())
}

/// Validate that an account sits at its expected derived address
pub fn validate_pda(account: &AccountInfo, expected: &Pubkey) -> ProgramResult {
    if account.key != expected {
        msg!("PDA mismatch. Expected: {}, Actual: {}", expected, account.key);
        return Err(AmmError::InvalidPda.into());
    }
    Ok(())
}

/// The ledger service must be the SPL Token program
pub fn validate_token_program(account: &AccountInfo) -> ProgramResult {
    if account.key != &spl_token::id() {
        msg!("Unexpected token program {}", account.key);
        return Err(AmmError::InvalidAccountData.into());
    }
    Ok(())
}

/// Fee must stay below 100%
pub fn validate_fee(fee_bps: u16) -> ProgramResult {
    if fee_bps as u64 >= BPS_DENOMINATOR {
        msg!("Fee {} bps is out of range", fee_bps);
        return Err(AmmError::InvalidFee.into());
    }
    Ok(())
}

/// Reject operations against a paused pool
pub fn validate_unlocked(config: &PoolConfig) -> ProgramResult {
    if config.locked {
        msg!("Pool is locked");
        return Err(AmmError::PoolLocked.into());
    }
    Ok(())
}

/// Only the pool authority may run privileged operations
pub fn validate_authority(config: &PoolConfig, signer: &AccountInfo) -> ProgramResult {
    match config.authority {
        Some(authority) if &authority == signer.key => Ok(()),
        _ => {
            msg!("Signer {} is not the pool authority", signer.key);
            Err(AmmError::Unauthorized.into())
        }
    }
}

/// Post-condition for swaps: the reserve product never decreases.
pub fn check_constant_product(
    reserve_x_before: u64,
    reserve_y_before: u64,
    reserve_x_after: u64,
    reserve_y_after: u64,
) -> ProgramResult {
    if mul_u64(reserve_x_after, reserve_y_after) < mul_u64(reserve_x_before, reserve_y_before) {
        msg!("Constant product decreased");
        return Err(AmmError::InvariantViolation.into());
    }
    Ok(())
}

/// The vault must hold at least the book reserve. Unsolicited donations
/// above the book amount are tolerated and never paid out.
pub fn check_ledger_backing(vault_amount: u64, book_reserve: u64) -> ProgramResult {
    if vault_amount < book_reserve {
        msg!(
            "Vault holds {} but book reserve is {}",
            vault_amount,
            book_reserve
        );
        return Err(AmmError::InvariantViolation.into());
    }
    Ok(())
}

/// The LP mint supply must match the book share supply exactly.
pub fn check_share_supply(mint_supply: u64, share_supply: u64) -> ProgramResult {
    if mint_supply != share_supply {
        msg!(
            "LP mint supply {} diverges from book supply {}",
            mint_supply,
            share_supply
        );
        return Err(AmmError::InvariantViolation.into());
    }
    Ok(())
}
