//! Metadata of the order book venue the pools trade on.
use solana_program::pubkey::Pubkey;

use crate::error::BotResult;

#[allow(missing_docs)]
pub mod serum;

pub use serum::LedgerVenue;

/// Number of order slots of an open orders account.
pub const MAX_ORDERS: usize = 128;

/// The market fields needed to build pool instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketInfo {
    #[allow(missing_docs)]
    pub address: Pubkey,
    /// Used to derive the vault signer
    pub vault_signer_nonce: u64,
    #[allow(missing_docs)]
    pub coin_mint: Pubkey,
    /// Mint of the price coin
    pub pc_mint: Pubkey,
    #[allow(missing_docs)]
    pub coin_vault: Pubkey,
    #[allow(missing_docs)]
    pub pc_vault: Pubkey,
    #[allow(missing_docs)]
    pub request_queue: Pubkey,
    #[allow(missing_docs)]
    pub event_queue: Pubkey,
    #[allow(missing_docs)]
    pub bids: Pubkey,
    #[allow(missing_docs)]
    pub asks: Pubkey,
    #[allow(missing_docs)]
    pub coin_lot_size: u64,
    #[allow(missing_docs)]
    pub pc_lot_size: u64,
}

/// The balances and order slots of an open orders account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenOrdersInfo {
    #[allow(missing_docs)]
    pub address: Pubkey,
    #[allow(missing_docs)]
    pub market: Pubkey,
    #[allow(missing_docs)]
    pub owner: Pubkey,
    #[allow(missing_docs)]
    pub native_coin_free: u64,
    #[allow(missing_docs)]
    pub native_coin_total: u64,
    #[allow(missing_docs)]
    pub native_pc_free: u64,
    #[allow(missing_docs)]
    pub native_pc_total: u64,
    /// Bit `i` is set when slot `i` is free
    pub free_slot_bits: u128,
    /// Bit `i` is set when slot `i` holds a bid
    pub is_bid_bits: u128,
    /// Order ids by slot, zero for free slots
    pub orders: Vec<u128>,
}

impl OpenOrdersInfo {
    /// The order id held in the first slot, if any.
    pub fn first_order(&self) -> Option<u128> {
        self.orders.first().copied().filter(|id| *id != 0)
    }

    /// Whether the order in `slot` is a bid.
    pub fn slot_is_bid(&self, slot: usize) -> bool {
        slot < MAX_ORDERS && (self.is_bid_bits >> slot) & 1 == 1
    }
}

/// A read-only source of venue metadata.
#[allow(async_fn_in_trait)]
pub trait Venue {
    /// Read a market. Fails with [`BotError::AccountUnavailable`](crate::error::BotError::AccountUnavailable)
    /// when it does not exist.
    async fn market(&self, address: &Pubkey) -> BotResult<MarketInfo>;

    /// Read an open orders account.
    async fn open_orders(&self, address: &Pubkey) -> BotResult<OpenOrdersInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_order() {
        let mut info = OpenOrdersInfo {
            address: Pubkey::new_unique(),
            market: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            native_coin_free: 0,
            native_coin_total: 0,
            native_pc_free: 0,
            native_pc_total: 0,
            free_slot_bits: u128::MAX,
            is_bid_bits: 0b10,
            orders: vec![0; MAX_ORDERS],
        };
        assert_eq!(info.first_order(), None);
        info.orders[0] = 42;
        assert_eq!(info.first_order(), Some(42));
        assert!(!info.slot_is_bid(0));
        assert!(info.slot_is_bid(1));
        assert!(!info.slot_is_bid(MAX_ORDERS));
    }
}
