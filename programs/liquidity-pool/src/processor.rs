use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    cpi,
    error::AmmError,
    instruction::PoolInstruction,
    math::curve,
    pda::{seeds, LpMintPda, LpReservePda, PoolConfigPda, VaultPda},
    state::{PoolBumps, PoolConfig},
    validation,
};

/// Decimals of the share token, matching the assets the pool was built for.
const LP_DECIMALS: u8 = 6;

pub struct Processor;

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = PoolInstruction::unpack(instruction_data)?;

        match instruction {
            PoolInstruction::Initialize {
                seed,
                fee_bps,
                authority,
            } => {
                msg!("Instruction: Initialize");
                Self::process_initialize(program_id, accounts, seed, fee_bps, authority)
            }
            PoolInstruction::Deposit {
                shares,
                max_x,
                max_y,
            } => {
                msg!("Instruction: Deposit");
                Self::process_deposit(program_id, accounts, shares, max_x, max_y)
            }
            PoolInstruction::Swap {
                x_to_y,
                amount_in,
                min_amount_out,
            } => {
                msg!("Instruction: Swap");
                Self::process_swap(program_id, accounts, x_to_y, amount_in, min_amount_out)
            }
            PoolInstruction::Withdraw {
                shares,
                min_x,
                min_y,
            } => {
                msg!("Instruction: Withdraw");
                Self::process_withdraw(program_id, accounts, shares, min_x, min_y)
            }
            PoolInstruction::SetLocked { locked } => {
                msg!("Instruction: SetLocked");
                Self::process_set_locked(program_id, accounts, locked)
            }
        }
    }

    fn process_initialize(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        seed: u64,
        fee_bps: u16,
        authority: Option<Pubkey>,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let initializer_info = next_account_info(account_info_iter)?;
        let mint_x_info = next_account_info(account_info_iter)?;
        let mint_y_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;
        let lp_mint_info = next_account_info(account_info_iter)?;
        let vault_x_info = next_account_info(account_info_iter)?;
        let vault_y_info = next_account_info(account_info_iter)?;
        let lp_reserve_info = next_account_info(account_info_iter)?;
        let token_program_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        validation::validate_signer(initializer_info)?;
        validation::validate_token_program(token_program_info)?;
        validation::validate_fee(fee_bps)?;

        if mint_x_info.key == mint_y_info.key {
            msg!("Pool assets must be two distinct mints");
            return Err(AmmError::InvalidAssetPair.into());
        }
        // Both assets must be live mints on the ledger
        cpi::mint_data(mint_x_info)?;
        cpi::mint_data(mint_y_info)?;

        let (config_key, config_bump) = PoolConfigPda::derive(program_id, seed);
        validation::validate_pda(config_info, &config_key)?;
        if config_info.owner == program_id || !config_info.data_is_empty() {
            msg!("Pool already exists for seed {}", seed);
            return Err(AmmError::SeedCollision.into());
        }

        let (lp_mint_key, lp_mint_bump) = LpMintPda::derive(program_id, &config_key);
        validation::validate_pda(lp_mint_info, &lp_mint_key)?;
        let (vault_x_key, vault_x_bump) = VaultPda::derive(program_id, &config_key, mint_x_info.key);
        validation::validate_pda(vault_x_info, &vault_x_key)?;
        let (vault_y_key, vault_y_bump) = VaultPda::derive(program_id, &config_key, mint_y_info.key);
        validation::validate_pda(vault_y_info, &vault_y_key)?;
        let (lp_reserve_key, lp_reserve_bump) = LpReservePda::derive(program_id, &config_key);
        validation::validate_pda(lp_reserve_info, &lp_reserve_key)?;

        let seed_bytes = seed.to_le_bytes();
        cpi::create_pda_account(
            initializer_info,
            config_info,
            system_program_info,
            program_id,
            PoolConfig::LEN,
            &[seeds::CONFIG, &seed_bytes, &[config_bump]],
        )?;
        cpi::create_pda_mint(
            initializer_info,
            lp_mint_info,
            &config_key,
            LP_DECIMALS,
            system_program_info,
            token_program_info,
            &[seeds::LP_MINT, config_key.as_ref(), &[lp_mint_bump]],
        )?;
        cpi::create_pda_token_account(
            initializer_info,
            vault_x_info,
            mint_x_info,
            &config_key,
            system_program_info,
            token_program_info,
            &[
                seeds::VAULT,
                config_key.as_ref(),
                mint_x_info.key.as_ref(),
                &[vault_x_bump],
            ],
        )?;
        cpi::create_pda_token_account(
            initializer_info,
            vault_y_info,
            mint_y_info,
            &config_key,
            system_program_info,
            token_program_info,
            &[
                seeds::VAULT,
                config_key.as_ref(),
                mint_y_info.key.as_ref(),
                &[vault_y_bump],
            ],
        )?;
        cpi::create_pda_token_account(
            initializer_info,
            lp_reserve_info,
            lp_mint_info,
            &config_key,
            system_program_info,
            token_program_info,
            &[seeds::LP_RESERVE, config_key.as_ref(), &[lp_reserve_bump]],
        )?;

        let config = PoolConfig::new(
            seed,
            fee_bps,
            authority,
            *mint_x_info.key,
            *mint_y_info.key,
            PoolBumps {
                config: config_bump,
                lp_mint: lp_mint_bump,
                vault_x: vault_x_bump,
                vault_y: vault_y_bump,
                lp_reserve: lp_reserve_bump,
            },
        );
        config.save(&mut config_info.data.borrow_mut())?;

        msg!("Pool initialized with seed {} at {} bps", seed, fee_bps);
        Ok(())
    }

    fn process_deposit(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        shares: u64,
        max_x: u64,
        max_y: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let user_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;
        let lp_mint_info = next_account_info(account_info_iter)?;
        let vault_x_info = next_account_info(account_info_iter)?;
        let vault_y_info = next_account_info(account_info_iter)?;
        let lp_reserve_info = next_account_info(account_info_iter)?;
        let user_x_info = next_account_info(account_info_iter)?;
        let user_y_info = next_account_info(account_info_iter)?;
        let user_lp_info = next_account_info(account_info_iter)?;
        let token_program_info = next_account_info(account_info_iter)?;

        validation::validate_signer(user_info)?;
        validation::validate_token_program(token_program_info)?;
        let mut config = Self::load_pool(program_id, config_info)?;
        validation::validate_unlocked(&config)?;

        let config_key = *config_info.key;
        let (lp_mint_key, _) = LpMintPda::derive(program_id, &config_key);
        validation::validate_pda(lp_mint_info, &lp_mint_key)?;
        let (vault_x_key, _) = VaultPda::derive(program_id, &config_key, &config.mint_x);
        validation::validate_pda(vault_x_info, &vault_x_key)?;
        let (vault_y_key, _) = VaultPda::derive(program_id, &config_key, &config.mint_y);
        validation::validate_pda(vault_y_info, &vault_y_key)?;
        let (lp_reserve_key, _) = LpReservePda::derive(program_id, &config_key);
        validation::validate_pda(lp_reserve_info, &lp_reserve_key)?;

        Self::check_ledger_sync(&config, lp_mint_info, vault_x_info, vault_y_info)?;

        let user_x = cpi::token_account_data(user_x_info)?;
        let user_y = cpi::token_account_data(user_y_info)?;
        let user_lp = cpi::token_account_data(user_lp_info)?;
        if user_x.mint != config.mint_x || user_y.mint != config.mint_y {
            msg!("Depositor token accounts do not match the pool assets");
            return Err(AmmError::InvalidAccountData.into());
        }
        if user_lp.mint != lp_mint_key {
            msg!("Depositor share account does not match the pool LP mint");
            return Err(AmmError::InvalidAccountData.into());
        }

        let quote = curve::quote_deposit(
            config.reserve_x,
            config.reserve_y,
            config.share_supply,
            shares,
            max_x,
            max_y,
        )?;
        if user_x.amount < quote.amount_x || user_y.amount < quote.amount_y {
            msg!("Depositor balance below required deposit amounts");
            return Err(AmmError::InsufficientBalance.into());
        }

        cpi::transfer(
            user_x_info,
            vault_x_info,
            user_info,
            token_program_info,
            quote.amount_x,
            &[],
        )?;
        cpi::transfer(
            user_y_info,
            vault_y_info,
            user_info,
            token_program_info,
            quote.amount_y,
            &[],
        )?;

        let seed_bytes = config.seed.to_le_bytes();
        let config_bump = [config.bumps.config];
        let config_seeds: &[&[u8]] = &[seeds::CONFIG, &seed_bytes, &config_bump];
        cpi::mint_to(
            lp_mint_info,
            user_lp_info,
            config_info,
            token_program_info,
            quote.shares_to_caller,
            &[config_seeds],
        )?;
        if quote.shares_to_reserve > 0 {
            cpi::mint_to(
                lp_mint_info,
                lp_reserve_info,
                config_info,
                token_program_info,
                quote.shares_to_reserve,
                &[config_seeds],
            )?;
        }

        config.apply_deposit(quote.amount_x, quote.amount_y, quote.total_shares()?)?;
        config.save(&mut config_info.data.borrow_mut())?;

        msg!(
            "Deposited {} / {} for {} shares",
            quote.amount_x,
            quote.amount_y,
            quote.shares_to_caller
        );
        Ok(())
    }

    fn process_swap(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        x_to_y: bool,
        amount_in: u64,
        min_amount_out: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let user_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;
        let vault_x_info = next_account_info(account_info_iter)?;
        let vault_y_info = next_account_info(account_info_iter)?;
        let user_x_info = next_account_info(account_info_iter)?;
        let user_y_info = next_account_info(account_info_iter)?;
        let token_program_info = next_account_info(account_info_iter)?;

        validation::validate_signer(user_info)?;
        validation::validate_token_program(token_program_info)?;
        let mut config = Self::load_pool(program_id, config_info)?;
        validation::validate_unlocked(&config)?;

        let config_key = *config_info.key;
        let (vault_x_key, _) = VaultPda::derive(program_id, &config_key, &config.mint_x);
        validation::validate_pda(vault_x_info, &vault_x_key)?;
        let (vault_y_key, _) = VaultPda::derive(program_id, &config_key, &config.mint_y);
        validation::validate_pda(vault_y_info, &vault_y_key)?;

        validation::check_ledger_backing(
            cpi::token_account_data(vault_x_info)?.amount,
            config.reserve_x,
        )?;
        validation::check_ledger_backing(
            cpi::token_account_data(vault_y_info)?.amount,
            config.reserve_y,
        )?;

        let user_x = cpi::token_account_data(user_x_info)?;
        let user_y = cpi::token_account_data(user_y_info)?;
        if user_x.mint != config.mint_x || user_y.mint != config.mint_y {
            msg!("Trader token accounts do not match the pool assets");
            return Err(AmmError::InvalidAccountData.into());
        }

        let (reserve_in, reserve_out) = config.reserves_for(x_to_y);
        let outcome =
            curve::quote_swap(reserve_in, reserve_out, config.fee_bps, amount_in, min_amount_out)?;

        let (user_in_info, user_in_amount, user_out_info, vault_in_info, vault_out_info) =
            if x_to_y {
                (user_x_info, user_x.amount, user_y_info, vault_x_info, vault_y_info)
            } else {
                (user_y_info, user_y.amount, user_x_info, vault_y_info, vault_x_info)
            };
        if user_in_amount < amount_in {
            msg!("Trader balance below swap input");
            return Err(AmmError::InsufficientBalance.into());
        }

        cpi::transfer(
            user_in_info,
            vault_in_info,
            user_info,
            token_program_info,
            amount_in,
            &[],
        )?;
        let seed_bytes = config.seed.to_le_bytes();
        let config_bump = [config.bumps.config];
        let config_seeds: &[&[u8]] = &[seeds::CONFIG, &seed_bytes, &config_bump];
        cpi::transfer(
            vault_out_info,
            user_out_info,
            config_info,
            token_program_info,
            outcome.amount_out,
            &[config_seeds],
        )?;

        let (reserve_x_before, reserve_y_before) = (config.reserve_x, config.reserve_y);
        config.apply_swap(x_to_y, amount_in, outcome.amount_out)?;
        validation::check_constant_product(
            reserve_x_before,
            reserve_y_before,
            config.reserve_x,
            config.reserve_y,
        )?;
        config.save(&mut config_info.data.borrow_mut())?;

        msg!("Swapped {} in for {} out", amount_in, outcome.amount_out);
        Ok(())
    }

    fn process_withdraw(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        shares: u64,
        min_x: u64,
        min_y: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let user_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;
        let lp_mint_info = next_account_info(account_info_iter)?;
        let vault_x_info = next_account_info(account_info_iter)?;
        let vault_y_info = next_account_info(account_info_iter)?;
        let user_x_info = next_account_info(account_info_iter)?;
        let user_y_info = next_account_info(account_info_iter)?;
        let user_lp_info = next_account_info(account_info_iter)?;
        let token_program_info = next_account_info(account_info_iter)?;

        validation::validate_signer(user_info)?;
        validation::validate_token_program(token_program_info)?;
        let mut config = Self::load_pool(program_id, config_info)?;
        validation::validate_unlocked(&config)?;

        let config_key = *config_info.key;
        let (lp_mint_key, _) = LpMintPda::derive(program_id, &config_key);
        validation::validate_pda(lp_mint_info, &lp_mint_key)?;
        let (vault_x_key, _) = VaultPda::derive(program_id, &config_key, &config.mint_x);
        validation::validate_pda(vault_x_info, &vault_x_key)?;
        let (vault_y_key, _) = VaultPda::derive(program_id, &config_key, &config.mint_y);
        validation::validate_pda(vault_y_info, &vault_y_key)?;

        Self::check_ledger_sync(&config, lp_mint_info, vault_x_info, vault_y_info)?;

        let user_x = cpi::token_account_data(user_x_info)?;
        let user_y = cpi::token_account_data(user_y_info)?;
        let user_lp = cpi::token_account_data(user_lp_info)?;
        if user_x.mint != config.mint_x || user_y.mint != config.mint_y {
            msg!("Withdrawer token accounts do not match the pool assets");
            return Err(AmmError::InvalidAccountData.into());
        }
        if user_lp.mint != lp_mint_key {
            msg!("Withdrawer share account does not match the pool LP mint");
            return Err(AmmError::InvalidAccountData.into());
        }
        if user_lp.amount < shares {
            msg!("Withdrawer holds fewer shares than requested");
            return Err(AmmError::InsufficientLiquidity.into());
        }

        let amounts = curve::quote_withdraw(
            config.reserve_x,
            config.reserve_y,
            config.share_supply,
            shares,
            min_x,
            min_y,
        )?;

        cpi::burn(
            user_lp_info,
            lp_mint_info,
            user_info,
            token_program_info,
            shares,
            &[],
        )?;
        let seed_bytes = config.seed.to_le_bytes();
        let config_bump = [config.bumps.config];
        let config_seeds: &[&[u8]] = &[seeds::CONFIG, &seed_bytes, &config_bump];
        cpi::transfer(
            vault_x_info,
            user_x_info,
            config_info,
            token_program_info,
            amounts.amount_x,
            &[config_seeds],
        )?;
        cpi::transfer(
            vault_y_info,
            user_y_info,
            config_info,
            token_program_info,
            amounts.amount_y,
            &[config_seeds],
        )?;

        config.apply_withdraw(amounts.amount_x, amounts.amount_y, shares)?;
        config.save(&mut config_info.data.borrow_mut())?;

        msg!(
            "Withdrew {} / {} for {} shares",
            amounts.amount_x,
            amounts.amount_y,
            shares
        );
        Ok(())
    }

    fn process_set_locked(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        locked: bool,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let authority_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;

        validation::validate_signer(authority_info)?;
        let mut config = Self::load_pool(program_id, config_info)?;
        validation::validate_authority(&config, authority_info)?;

        config.locked = locked;
        config.save(&mut config_info.data.borrow_mut())?;

        msg!("Pool lock set to {}", locked);
        Ok(())
    }

    /// Load and address-check the pool config behind any operation.
    fn load_pool(program_id: &Pubkey, config_info: &AccountInfo) -> Result<PoolConfig, ProgramError> {
        validation::validate_owner(config_info, program_id)?;
        validation::validate_writable(config_info)?;
        let config = PoolConfig::load(&config_info.data.borrow())?;
        if !config.is_initialized {
            return Err(AmmError::NotInitialized.into());
        }
        let (expected, _) = PoolConfigPda::derive(program_id, config.seed);
        validation::validate_pda(config_info, &expected)?;
        Ok(config)
    }

    /// Defensive cross-check of book state against the ledger.
    fn check_ledger_sync(
        config: &PoolConfig,
        lp_mint_info: &AccountInfo,
        vault_x_info: &AccountInfo,
        vault_y_info: &AccountInfo,
    ) -> ProgramResult {
        validation::check_share_supply(cpi::mint_data(lp_mint_info)?.supply, config.share_supply)?;
        validation::check_ledger_backing(
            cpi::token_account_data(vault_x_info)?.amount,
            config.reserve_x,
        )?;
        validation::check_ledger_backing(
            cpi::token_account_data(vault_y_info)?.amount,
            config.reserve_y,
        )
    }
}
