//! Program Derived Address derivation for pool accounts.
//!
//! Every pool account is derived from the program id (the namespace), the
//! pool seed, and a role prefix, so lookup by `(namespace, seed)` needs no
//! registry.

use solana_program::pubkey::Pubkey;

/// PDA seed constants
pub mod seeds {
    pub const CONFIG: &[u8] = b"config";
    pub const LP_MINT: &[u8] = b"lp_mint";
    pub const VAULT: &[u8] = b"vault";
    pub const LP_RESERVE: &[u8] = b"lp_reserve";
}

/// Pool config account, keyed by the caller-chosen seed.
pub struct PoolConfigPda;
impl PoolConfigPda {
    pub fn derive(program_id: &Pubkey, seed: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[seeds::CONFIG, &seed.to_le_bytes()], program_id)
    }
}

/// Share token mint, keyed by the pool config.
pub struct LpMintPda;
impl LpMintPda {
    pub fn derive(program_id: &Pubkey, config: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[seeds::LP_MINT, config.as_ref()], program_id)
    }
}

/// Reserve vault for one of the pool's two assets.
pub struct VaultPda;
impl VaultPda {
    pub fn derive(program_id: &Pubkey, config: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[seeds::VAULT, config.as_ref(), mint.as_ref()],
            program_id,
        )
    }
}

/// Pool-owned LP token account holding the permanently locked minimum.
pub struct LpReservePda;
impl LpReservePda {
    pub fn derive(program_id: &Pubkey, config: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[seeds::LP_RESERVE, config.as_ref()], program_id)
    }
}
