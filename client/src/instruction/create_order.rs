//! Place an order on a venue market on behalf of the pool.
use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::{
    instruction::PoolInstruction,
    state::{OrderType, SelfTradeBehavior, Side},
};

/// Size of a create order payload, tag included.
pub const PAYLOAD_LEN: usize = 120;

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
/**
The required arguments for a create_order instruction.
*/
pub struct Params {
    #[allow(missing_docs)]
    pub pool_seed: [u8; 32],
    #[allow(missing_docs)]
    pub side: Side,
    /// Price of one coin lot, in price coin lots
    pub limit_price: u64,
    /// Maximum quantity, as a fraction of the paying pool asset out of 2^16
    pub max_quantity: u16,
    #[allow(missing_docs)]
    pub order_type: OrderType,
    #[allow(missing_docs)]
    pub client_id: u64,
    #[allow(missing_docs)]
    pub self_trade_behavior: SelfTradeBehavior,
    /// Index of the paying asset in the pool asset list
    pub source_index: u64,
    /// Index of the received asset in the pool asset list, which is the current list length for a new asset
    pub target_index: u64,
    /// Index of the market in the authorized market list
    pub market_index: u16,
    #[allow(missing_docs)]
    pub coin_lot_size: u64,
    #[allow(missing_docs)]
    pub pc_lot_size: u64,
    #[allow(missing_docs)]
    pub target_mint: [u8; 32],
}

crate::instruction::borsh_params!(Params, PoolInstruction::CreateOrder);

/// The required accounts for a create_order instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    #[allow(missing_docs)]
    #[cons(signer)]
    pub signal_provider: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub market: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub payer_pool_asset: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub open_orders: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub request_queue: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pool: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub coin_vault: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub pc_vault: &'a T,
    #[allow(missing_docs)]
    pub spl_token_program: &'a T,
    #[allow(missing_docs)]
    pub rent_sysvar: &'a T,
    #[allow(missing_docs)]
    pub venue_program: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub referrer: Option<&'a T>,
}
