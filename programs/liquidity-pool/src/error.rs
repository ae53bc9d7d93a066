use num_derive::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq)]
pub enum AmmError {
    #[error("Invalid instruction")]
    InvalidInstruction = 0,

    #[error("Invalid account data")]
    InvalidAccountData = 1,

    #[error("Invalid PDA")]
    InvalidPda = 2,

    #[error("Pool not initialized")]
    NotInitialized = 3,

    #[error("Pool already exists for this seed")]
    SeedCollision = 4,

    #[error("Fee must be below 10000 basis points")]
    InvalidFee = 5,

    #[error("Pool assets must be distinct")]
    InvalidAssetPair = 6,

    #[error("Pool has no liquidity")]
    ZeroLiquidity = 7,

    #[error("Invalid amount")]
    InvalidAmount = 8,

    #[error("Slippage tolerance exceeded")]
    SlippageExceeded = 9,

    #[error("Insufficient liquidity")]
    InsufficientLiquidity = 10,

    #[error("Insufficient token balance")]
    InsufficientBalance = 11,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 12,

    #[error("Constant product invariant violated")]
    InvariantViolation = 13,

    #[error("Pool is locked")]
    PoolLocked = 14,

    #[error("Unauthorized")]
    Unauthorized = 15,
}

impl PrintProgramError for AmmError {
    fn print<E>(&self) {
        use solana_program::msg;
        msg!("AmmError: {}", self);
    }
}

impl From<AmmError> for ProgramError {
    fn from(e: AmmError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for AmmError {
    fn type_of() -> &'static str {
        "AmmError"
    }
}
