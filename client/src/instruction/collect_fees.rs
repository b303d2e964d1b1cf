//! Mint the fees accrued by a pool.
use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::instruction::PoolInstruction;

/// The collect fees instruction only carries the pool seed.
#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct Params {
    #[allow(missing_docs)]
    pub pool_seed: [u8; 32],
}

crate::instruction::borsh_params!(Params, PoolInstruction::CollectFees);

/// The required accounts for a collect_fees instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    #[allow(missing_docs)]
    pub spl_token_program: &'a T,
    #[allow(missing_docs)]
    pub clock_sysvar: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pool: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub mint: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub signal_provider_pool_token: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub fee_pool_token: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub burn_pool_token: &'a T,
}
