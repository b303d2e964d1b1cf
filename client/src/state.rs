//! Pool account layouts and the order vocabulary shared with the venue.
use borsh::{BorshDeserialize, BorshSerialize};
use num_derive::FromPrimitive;
use solana_program::pubkey::Pubkey;

use crate::error::{BotError, BotResult};

pub mod order_tracker;
pub mod pool_asset;
pub mod pool_header;

pub use order_tracker::OrderTracker;
pub use pool_asset::{unpack_assets, PoolAsset};
pub use pool_header::{unpack_markets, PoolHeader, PoolStatus};

/// Side of an order.
#[derive(
    BorshDeserialize, BorshSerialize, Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, Hash,
)]
#[repr(u8)]
pub enum Side {
    /// Pays with the price coin
    Bid,
    /// Pays with the coin
    Ask,
}

/// Matching behavior of a new order.
#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum OrderType {
    /// Matches what it can, the rest rests on the book
    Limit,
    /// Matches what it can, the rest is cancelled
    ImmediateOrCancel,
    /// Rejected if any part would match
    PostOnly,
}

/// What the venue does when an order would match an order of the same owner.
#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum SelfTradeBehavior {
    DecrementTake,
    CancelProvide,
    AbortTransaction,
}

/// Side of a venue order, read off its 128-bit identifier.
///
/// The venue stores bid sequence numbers bitwise negated in the low 64 bits of the id, so for any
/// realistic sequence number the top bit of byte 7 (little-endian) is set for bids and clear for asks.
/// This is a convention about the venue's id layout, not something the venue guarantees.
pub fn side_from_order_id(order_id: u128) -> Side {
    let byte = order_id.to_le_bytes()[7];
    if byte & 0x80 != 0 {
        Side::Bid
    } else {
        Side::Ask
    }
}

/// A fully decoded pool account.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolState {
    #[allow(missing_docs)]
    pub header: PoolHeader,
    /// Authorized markets, in the index space referenced by order instructions
    pub markets: Vec<Pubkey>,
    /// Non-empty asset slots, in the index space referenced by order instructions
    pub assets: Vec<PoolAsset>,
}

impl PoolState {
    /// Decode a whole pool account: header, authorized markets, then asset slots.
    pub fn unpack(data: &[u8]) -> BotResult<Self> {
        let header = PoolHeader::unpack(data)?;
        let markets_start = PoolHeader::LEN;
        let markets_end = markets_start + header.number_of_markets as usize * 32;
        let markets = unpack_markets(&data[markets_start..], header.number_of_markets)?;
        let assets = unpack_assets(data.get(markets_end..).ok_or(BotError::TruncatedAccount {
            expected: markets_end,
            actual: data.len(),
        })?);
        Ok(Self {
            header,
            markets,
            assets,
        })
    }

    /// Position of `mint` in the asset list. The list must come from a fresh read.
    pub fn asset_index(&self, mint: &Pubkey) -> Option<usize> {
        self.assets.iter().position(|a| &a.mint_address == mint)
    }

    /// Position of `market` in the authorized market list.
    pub fn market_index(&self, market: &Pubkey) -> Option<usize> {
        self.markets.iter().position(|m| m == market)
    }

    /// Mints of the pool assets, in pool order.
    pub fn asset_mints(&self) -> Vec<Pubkey> {
        self.assets.iter().map(|a| a.mint_address).collect()
    }
}
