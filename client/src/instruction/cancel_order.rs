//! Cancel a pool order on its venue market.
use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::{instruction::PoolInstruction, state::Side};

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
/**
The required arguments for a cancel_order instruction.
*/
pub struct Params {
    #[allow(missing_docs)]
    pub pool_seed: [u8; 32],
    #[allow(missing_docs)]
    pub side: Side,
    /// The venue order id
    pub order_id: u128,
}

crate::instruction::borsh_params!(Params, PoolInstruction::CancelOrder);

/// The required accounts for a cancel_order instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    #[allow(missing_docs)]
    #[cons(signer)]
    pub signal_provider: &'a T,
    #[allow(missing_docs)]
    pub market: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub open_orders: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub request_queue: &'a T,
    #[allow(missing_docs)]
    pub pool: &'a T,
    #[allow(missing_docs)]
    pub venue_program: &'a T,
}
