use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::error::AmmError;
use crate::math::fixed_point::{checked_add, checked_sub};

/// Bumps for every PDA the pool owns, captured at initialization.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolBumps {
    pub config: u8,
    pub lp_mint: u8,
    pub vault_x: u8,
    pub vault_y: u8,
    pub lp_reserve: u8,
}

/// Per-pool state record. One account per `(program, seed)` pair; the
/// parameters above the reserves are fixed at initialization.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct PoolConfig {
    pub is_initialized: bool,
    pub seed: u64,
    pub fee_bps: u16,
    /// Pause flag; every mutating operation refuses the pool while set.
    pub locked: bool,
    /// May toggle `locked`. `None` means the pool has no privileged operations.
    pub authority: Option<Pubkey>,
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    /// Book reserves; the vaults must always hold at least these amounts.
    pub reserve_x: u64,
    pub reserve_y: u64,
    /// Total LP shares outstanding, including the locked minimum.
    pub share_supply: u64,
    pub bumps: PoolBumps,
}

impl PoolConfig {
    /// Account size. `authority` is reserved at its `Some` encoding.
    pub const LEN: usize = 1 + 8 + 2 + 1 + (1 + 32) + 32 + 32 + 8 + 8 + 8 + 5;

    pub fn new(
        seed: u64,
        fee_bps: u16,
        authority: Option<Pubkey>,
        mint_x: Pubkey,
        mint_y: Pubkey,
        bumps: PoolBumps,
    ) -> Self {
        Self {
            is_initialized: true,
            seed,
            fee_bps,
            locked: false,
            authority,
            mint_x,
            mint_y,
            reserve_x: 0,
            reserve_y: 0,
            share_supply: 0,
            bumps,
        }
    }

    /// Deserialize from account data. A `None` authority encodes shorter
    /// than `LEN`, so trailing zero bytes are expected and ignored.
    pub fn load(account_data: &[u8]) -> Result<Self, ProgramError> {
        let mut data: &[u8] = account_data;
        Self::deserialize(&mut data).map_err(|_| AmmError::InvalidAccountData.into())
    }

    pub fn save(&self, account_data: &mut [u8]) -> Result<(), ProgramError> {
        self.serialize(&mut &mut account_data[..])
            .map_err(|_| AmmError::InvalidAccountData.into())
    }

    /// Reserves ordered as `(reserve_in, reserve_out)` for a swap direction.
    pub fn reserves_for(&self, x_to_y: bool) -> (u64, u64) {
        if x_to_y {
            (self.reserve_x, self.reserve_y)
        } else {
            (self.reserve_y, self.reserve_x)
        }
    }

    pub fn apply_deposit(
        &mut self,
        amount_x: u64,
        amount_y: u64,
        shares: u64,
    ) -> Result<(), AmmError> {
        self.reserve_x = checked_add(self.reserve_x, amount_x)?;
        self.reserve_y = checked_add(self.reserve_y, amount_y)?;
        self.share_supply = checked_add(self.share_supply, shares)?;
        Ok(())
    }

    pub fn apply_withdraw(
        &mut self,
        amount_x: u64,
        amount_y: u64,
        shares: u64,
    ) -> Result<(), AmmError> {
        self.reserve_x = checked_sub(self.reserve_x, amount_x)?;
        self.reserve_y = checked_sub(self.reserve_y, amount_y)?;
        self.share_supply = checked_sub(self.share_supply, shares)?;
        Ok(())
    }

    pub fn apply_swap(
        &mut self,
        x_to_y: bool,
        amount_in: u64,
        amount_out: u64,
    ) -> Result<(), AmmError> {
        if x_to_y {
            self.reserve_x = checked_add(self.reserve_x, amount_in)?;
            self.reserve_y = checked_sub(self.reserve_y, amount_out)?;
        } else {
            self.reserve_y = checked_add(self.reserve_y, amount_in)?;
            self.reserve_x = checked_sub(self.reserve_x, amount_out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bumps() -> PoolBumps {
        PoolBumps {
            config: 255,
            lp_mint: 254,
            vault_x: 253,
            vault_y: 252,
            lp_reserve: 251,
        }
    }

    fn sample(authority: Option<Pubkey>) -> PoolConfig {
        PoolConfig::new(
            42,
            30,
            authority,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            bumps(),
        )
    }

    #[test]
    fn round_trips_through_fixed_buffer() {
        let mut data = vec![0u8; PoolConfig::LEN];
        let config = sample(Some(Pubkey::new_unique()));
        config.save(&mut data).unwrap();
        assert_eq!(PoolConfig::load(&data).unwrap(), config);
    }

    #[test]
    fn none_authority_leaves_trailing_bytes() {
        let mut data = vec![0u8; PoolConfig::LEN];
        let config = sample(None);
        config.save(&mut data).unwrap();
        assert_eq!(PoolConfig::load(&data).unwrap(), config);
    }

    #[test]
    fn some_encoding_fills_len_exactly() {
        let config = sample(Some(Pubkey::new_unique()));
        let encoded = config.try_to_vec().unwrap();
        assert_eq!(encoded.len(), PoolConfig::LEN);
    }

    #[test]
    fn state_transitions_are_checked() {
        let mut config = sample(None);
        config.apply_deposit(100, 200, 50).unwrap();
        assert_eq!((config.reserve_x, config.reserve_y, config.share_supply), (100, 200, 50));

        config.apply_swap(true, 10, 20).unwrap();
        assert_eq!((config.reserve_x, config.reserve_y), (110, 180));

        config.apply_withdraw(11, 18, 5).unwrap();
        assert_eq!((config.reserve_x, config.reserve_y, config.share_supply), (99, 162, 45));

        assert_eq!(
            config.apply_withdraw(1_000, 0, 0),
            Err(AmmError::ArithmeticOverflow)
        );
        assert_eq!(
            config.apply_swap(false, 1, u64::MAX),
            Err(AmmError::ArithmeticOverflow)
        );
    }

    #[test]
    fn reserves_follow_direction() {
        let mut config = sample(None);
        config.apply_deposit(7, 9, 3).unwrap();
        assert_eq!(config.reserves_for(true), (7, 9));
        assert_eq!(config.reserves_for(false), (9, 7));
    }
}
