use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::error::AmmError;
use crate::pda::{LpMintPda, LpReservePda, PoolConfigPda, VaultPda};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum PoolInstruction {
    /// Create a pool for a new `(seed, mint pair)`. Moves no tokens.
    /// Accounts:
    /// 0. `[signer, writable]` Initializer (pays rent)
    /// 1. `[]` Mint X
    /// 2. `[]` Mint Y
    /// 3. `[writable]` Pool config PDA
    /// 4. `[writable]` LP mint PDA
    /// 5. `[writable]` Vault X PDA
    /// 6. `[writable]` Vault Y PDA
    /// 7. `[writable]` LP reserve PDA
    /// 8. `[]` Token program
    /// 9. `[]` System program
    Initialize {
        seed: u64,
        fee_bps: u16,
        authority: Option<Pubkey>,
    },

    /// Mint `shares` against at most `max_x` / `max_y` of the assets.
    /// Accounts:
    /// 0. `[signer]` Depositor
    /// 1. `[writable]` Pool config PDA
    /// 2. `[writable]` LP mint PDA
    /// 3. `[writable]` Vault X PDA
    /// 4. `[writable]` Vault Y PDA
    /// 5. `[writable]` LP reserve PDA
    /// 6. `[writable]` Depositor asset X account
    /// 7. `[writable]` Depositor asset Y account
    /// 8. `[writable]` Depositor LP account
    /// 9. `[]` Token program
    Deposit {
        shares: u64,
        max_x: u64,
        max_y: u64,
    },

    /// Trade `amount_in` of one asset for at least `min_amount_out` of the
    /// other.
    /// Accounts:
    /// 0. `[signer]` Trader
    /// 1. `[writable]` Pool config PDA
    /// 2. `[writable]` Vault X PDA
    /// 3. `[writable]` Vault Y PDA
    /// 4. `[writable]` Trader asset X account
    /// 5. `[writable]` Trader asset Y account
    /// 6. `[]` Token program
    Swap {
        x_to_y: bool,
        amount_in: u64,
        min_amount_out: u64,
    },

    /// Burn `shares` for at least `min_x` / `min_y` of the assets.
    /// Accounts:
    /// 0. `[signer]` Withdrawer
    /// 1. `[writable]` Pool config PDA
    /// 2. `[writable]` LP mint PDA
    /// 3. `[writable]` Vault X PDA
    /// 4. `[writable]` Vault Y PDA
    /// 5. `[writable]` Withdrawer asset X account
    /// 6. `[writable]` Withdrawer asset Y account
    /// 7. `[writable]` Withdrawer LP account
    /// 8. `[]` Token program
    Withdraw {
        shares: u64,
        min_x: u64,
        min_y: u64,
    },

    /// Pause or resume the pool. Authority only.
    /// Accounts:
    /// 0. `[signer]` Pool authority
    /// 1. `[writable]` Pool config PDA
    SetLocked { locked: bool },
}

impl PoolInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let mut data = input;
        let instruction =
            Self::deserialize(&mut data).map_err(|_| AmmError::InvalidInstruction)?;
        if !data.is_empty() {
            return Err(AmmError::InvalidInstruction.into());
        }
        Ok(instruction)
    }

    pub fn pack(&self) -> Vec<u8> {
        self.try_to_vec().unwrap()
    }
}

// Helper functions to create instructions

pub fn initialize(
    program_id: &Pubkey,
    initializer: &Pubkey,
    mint_x: &Pubkey,
    mint_y: &Pubkey,
    seed: u64,
    fee_bps: u16,
    authority: Option<Pubkey>,
) -> Instruction {
    let (config, _) = PoolConfigPda::derive(program_id, seed);
    let (lp_mint, _) = LpMintPda::derive(program_id, &config);
    let (vault_x, _) = VaultPda::derive(program_id, &config, mint_x);
    let (vault_y, _) = VaultPda::derive(program_id, &config, mint_y);
    let (lp_reserve, _) = LpReservePda::derive(program_id, &config);

    let accounts = vec![
        AccountMeta::new(*initializer, true),
        AccountMeta::new_readonly(*mint_x, false),
        AccountMeta::new_readonly(*mint_y, false),
        AccountMeta::new(config, false),
        AccountMeta::new(lp_mint, false),
        AccountMeta::new(vault_x, false),
        AccountMeta::new(vault_y, false),
        AccountMeta::new(lp_reserve, false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: PoolInstruction::Initialize {
            seed,
            fee_bps,
            authority,
        }
        .pack(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn deposit(
    program_id: &Pubkey,
    user: &Pubkey,
    mint_x: &Pubkey,
    mint_y: &Pubkey,
    user_x: &Pubkey,
    user_y: &Pubkey,
    user_lp: &Pubkey,
    seed: u64,
    shares: u64,
    max_x: u64,
    max_y: u64,
) -> Instruction {
    let (config, _) = PoolConfigPda::derive(program_id, seed);
    let (lp_mint, _) = LpMintPda::derive(program_id, &config);
    let (vault_x, _) = VaultPda::derive(program_id, &config, mint_x);
    let (vault_y, _) = VaultPda::derive(program_id, &config, mint_y);
    let (lp_reserve, _) = LpReservePda::derive(program_id, &config);

    let accounts = vec![
        AccountMeta::new_readonly(*user, true),
        AccountMeta::new(config, false),
        AccountMeta::new(lp_mint, false),
        AccountMeta::new(vault_x, false),
        AccountMeta::new(vault_y, false),
        AccountMeta::new(lp_reserve, false),
        AccountMeta::new(*user_x, false),
        AccountMeta::new(*user_y, false),
        AccountMeta::new(*user_lp, false),
        AccountMeta::new_readonly(spl_token::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: PoolInstruction::Deposit {
            shares,
            max_x,
            max_y,
        }
        .pack(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn swap(
    program_id: &Pubkey,
    user: &Pubkey,
    mint_x: &Pubkey,
    mint_y: &Pubkey,
    user_x: &Pubkey,
    user_y: &Pubkey,
    seed: u64,
    x_to_y: bool,
    amount_in: u64,
    min_amount_out: u64,
) -> Instruction {
    let (config, _) = PoolConfigPda::derive(program_id, seed);
    let (vault_x, _) = VaultPda::derive(program_id, &config, mint_x);
    let (vault_y, _) = VaultPda::derive(program_id, &config, mint_y);

    let accounts = vec![
        AccountMeta::new_readonly(*user, true),
        AccountMeta::new(config, false),
        AccountMeta::new(vault_x, false),
        AccountMeta::new(vault_y, false),
        AccountMeta::new(*user_x, false),
        AccountMeta::new(*user_y, false),
        AccountMeta::new_readonly(spl_token::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: PoolInstruction::Swap {
            x_to_y,
            amount_in,
            min_amount_out,
        }
        .pack(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn withdraw(
    program_id: &Pubkey,
    user: &Pubkey,
    mint_x: &Pubkey,
    mint_y: &Pubkey,
    user_x: &Pubkey,
    user_y: &Pubkey,
    user_lp: &Pubkey,
    seed: u64,
    shares: u64,
    min_x: u64,
    min_y: u64,
) -> Instruction {
    let (config, _) = PoolConfigPda::derive(program_id, seed);
    let (lp_mint, _) = LpMintPda::derive(program_id, &config);
    let (vault_x, _) = VaultPda::derive(program_id, &config, mint_x);
    let (vault_y, _) = VaultPda::derive(program_id, &config, mint_y);

    let accounts = vec![
        AccountMeta::new_readonly(*user, true),
        AccountMeta::new(config, false),
        AccountMeta::new(lp_mint, false),
        AccountMeta::new(vault_x, false),
        AccountMeta::new(vault_y, false),
        AccountMeta::new(*user_x, false),
        AccountMeta::new(*user_y, false),
        AccountMeta::new(*user_lp, false),
        AccountMeta::new_readonly(spl_token::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: PoolInstruction::Withdraw {
            shares,
            min_x,
            min_y,
        }
        .pack(),
    }
}

pub fn set_locked(
    program_id: &Pubkey,
    authority: &Pubkey,
    seed: u64,
    locked: bool,
) -> Instruction {
    let (config, _) = PoolConfigPda::derive(program_id, seed);

    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(config, false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: PoolInstruction::SetLocked { locked }.pack(),
    }
}
