//! Buy into an existing pool.
use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::instruction::PoolInstruction;

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
/**
The required arguments for a deposit instruction.
*/
pub struct Params {
    #[allow(missing_docs)]
    pub pool_seed: [u8; 32],
    /// The number of pool tokens to mint. The source assets are debited proportionally.
    pub pool_token_amount: u64,
}

crate::instruction::borsh_params!(Params, PoolInstruction::Deposit);

/// The required accounts for a deposit instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    #[allow(missing_docs)]
    pub spl_token_program: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub mint: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub target_pool_token: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub signal_provider_pool_token: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub fee_pool_token: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub burn_pool_token: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pool: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pool_assets: &'a [T],
    #[allow(missing_docs)]
    #[cons(signer)]
    pub source_owner: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub source_assets: &'a [T],
}
