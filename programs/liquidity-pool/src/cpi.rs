//! SPL Token program CPI helpers
//!
//! The token program is the pool's ledger: it owns custody, authorization,
//! and balance checks, and each invocation either fully applies or fails.
//! Helpers that act for the pool sign with the config PDA seeds; helpers
//! that act for the caller rely on the caller's transaction signature.

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};

use spl_token::{
    instruction as token_instruction,
    state::{Account as TokenAccount, Mint},
};

use crate::error::AmmError;

/// Create an account at a program-derived address.
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    owner: &Pubkey,
    space: usize,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let rent = Rent::get()?;
    invoke_signed(
        &system_instruction::create_account(
            payer.key,
            new_account.key,
            rent.minimum_balance(space),
            space as u64,
            owner,
        ),
        &[payer.clone(), new_account.clone(), system_program.clone()],
        &[signer_seeds],
    )
}

/// Create and initialize a mint at a program-derived address.
pub fn create_pda_mint<'a>(
    payer: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    mint_authority: &Pubkey,
    decimals: u8,
    system_program: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    create_pda_account(
        payer,
        mint,
        system_program,
        token_program.key,
        Mint::LEN,
        signer_seeds,
    )?;
    invoke(
        &token_instruction::initialize_mint2(
            token_program.key,
            mint.key,
            mint_authority,
            None,
            decimals,
        )?,
        &[mint.clone(), token_program.clone()],
    )
}

/// Create and initialize a token account at a program-derived address.
pub fn create_pda_token_account<'a>(
    payer: &AccountInfo<'a>,
    token_account: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    owner: &Pubkey,
    system_program: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    create_pda_account(
        payer,
        token_account,
        system_program,
        token_program.key,
        TokenAccount::LEN,
        signer_seeds,
    )?;
    invoke(
        &token_instruction::initialize_account3(
            token_program.key,
            token_account.key,
            mint.key,
            owner,
        )?,
        &[token_account.clone(), mint.clone(), token_program.clone()],
    )
}

/// Transfer tokens; signs with the given seeds when acting for a PDA.
pub fn transfer<'a>(
    source: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> ProgramResult {
    let instruction = token_instruction::transfer(
        token_program.key,
        source.key,
        destination.key,
        authority.key,
        &[],
        amount,
    )?;
    let accounts = [
        source.clone(),
        destination.clone(),
        authority.clone(),
        token_program.clone(),
    ];
    if signer_seeds.is_empty() {
        invoke(&instruction, &accounts)
    } else {
        invoke_signed(&instruction, &accounts, signer_seeds)
    }
}

/// Mint new tokens with the config PDA as mint authority.
pub fn mint_to<'a>(
    mint: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    mint_authority: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> ProgramResult {
    let instruction = token_instruction::mint_to(
        token_program.key,
        mint.key,
        destination.key,
        mint_authority.key,
        &[],
        amount,
    )?;
    let accounts = [
        mint.clone(),
        destination.clone(),
        mint_authority.clone(),
        token_program.clone(),
    ];
    if signer_seeds.is_empty() {
        invoke(&instruction, &accounts)
    } else {
        invoke_signed(&instruction, &accounts, signer_seeds)
    }
}

/// Burn tokens from the caller's account.
pub fn burn<'a>(
    token_account: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> ProgramResult {
    let instruction = token_instruction::burn(
        token_program.key,
        token_account.key,
        mint.key,
        authority.key,
        &[],
        amount,
    )?;
    let accounts = [
        token_account.clone(),
        mint.clone(),
        authority.clone(),
        token_program.clone(),
    ];
    if signer_seeds.is_empty() {
        invoke(&instruction, &accounts)
    } else {
        invoke_signed(&instruction, &accounts, signer_seeds)
    }
}

/// Helper to get token account data
pub fn token_account_data(account: &AccountInfo) -> Result<TokenAccount, ProgramError> {
    TokenAccount::unpack(&account.data.borrow())
        .map_err(|_| AmmError::InvalidAccountData.into())
}

/// Helper to get mint data
pub fn mint_data(mint: &AccountInfo) -> Result<Mint, ProgramError> {
    Mint::unpack(&mint.data.borrow()).map_err(|_| AmmError::InvalidAccountData.into())
}
