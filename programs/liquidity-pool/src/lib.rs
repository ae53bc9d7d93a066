use solana_program::{
    account_info::AccountInfo,
    entrypoint,
    entrypoint::ProgramResult,
    pubkey::Pubkey,
};

pub mod cpi;
pub mod error;
pub mod instruction;
pub mod math;
pub mod pda;
pub mod processor;
pub mod state;
pub mod validation;

use crate::processor::Processor;

solana_program::declare_id!("CPLP1111111111111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
entrypoint!(process);

pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    Processor::process(program_id, accounts, instruction_data)
}
