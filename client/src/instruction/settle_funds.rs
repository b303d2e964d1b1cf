//! Settle the venue balances of a pool order.
use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::instruction::PoolInstruction;

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
/**
The required arguments for a settle_funds instruction.
*/
pub struct Params {
    #[allow(missing_docs)]
    pub pool_seed: [u8; 32],
    /// Index of the market's price coin in the pool asset list
    pub pc_index: u64,
    /// Index of the market's coin in the pool asset list
    pub coin_index: u64,
}

crate::instruction::borsh_params!(Params, PoolInstruction::SettleFunds);

/// The required accounts for a settle_funds instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    #[allow(missing_docs)]
    #[cons(writable)]
    pub market: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub open_orders: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pool: &'a T,
    #[allow(missing_docs)]
    pub mint: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub coin_vault: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pc_vault: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub coin_pool_asset: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pc_pool_asset: &'a T,
    #[allow(missing_docs)]
    pub vault_signer: &'a T,
    #[allow(missing_docs)]
    pub spl_token_program: &'a T,
    #[allow(missing_docs)]
    pub venue_program: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub referrer: Option<&'a T>,
}
