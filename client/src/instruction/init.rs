//! Allocate a pool account and its token mint.
use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::instruction::PoolInstruction;

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
/**
The required arguments for an init instruction.
*/
pub struct Params {
    #[allow(missing_docs)]
    pub pool_seed: [u8; 32],
    /// Sizes the pool account. The number of assets a pool holds can never exceed it.
    pub max_number_of_assets: u32,
    #[allow(missing_docs)]
    pub number_of_markets: u16,
}

crate::instruction::borsh_params!(Params, PoolInstruction::Init);

/// The required accounts for an init instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    #[allow(missing_docs)]
    pub system_program: &'a T,
    #[allow(missing_docs)]
    pub rent_sysvar: &'a T,
    #[allow(missing_docs)]
    pub spl_token_program: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pool: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub mint: &'a T,
    #[allow(missing_docs)]
    #[cons(writable, signer)]
    pub payer: &'a T,
}
