//! Exchange pool tokens for a share of every pool asset.
use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::instruction::PoolInstruction;

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
/**
The required arguments for a redeem instruction.
*/
pub struct Params {
    #[allow(missing_docs)]
    pub pool_seed: [u8; 32],
    #[allow(missing_docs)]
    pub pool_token_amount: u64,
}

crate::instruction::borsh_params!(Params, PoolInstruction::Redeem);

/// The required accounts for a redeem instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    #[allow(missing_docs)]
    pub spl_token_program: &'a T,
    #[allow(missing_docs)]
    pub clock_sysvar: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub mint: &'a T,
    #[allow(missing_docs)]
    #[cons(signer)]
    pub source_owner: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub source_pool_token: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pool: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pool_assets: &'a [T],
    #[allow(missing_docs)]
    #[cons(writable)]
    pub target_assets: &'a [T],
}
