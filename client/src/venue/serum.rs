//! Serum v3 account layouts.
//!
//! Every account of the venue is framed by a 5 byte `serum` head and a 7 byte `padding` tail, the
//! records below start right after the head.
use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use enumflags2::{bitflags, BitFlags};
use solana_program::pubkey::Pubkey;

use crate::{
    error::{BotError, BotResult},
    ledger::Ledger,
    venue::{MarketInfo, OpenOrdersInfo, Venue, MAX_ORDERS},
};

const ACCOUNT_HEAD: &[u8; 5] = b"serum";
const ACCOUNT_HEAD_LEN: usize = 5;
const ACCOUNT_TAIL_LEN: usize = 7;

#[bitflags]
#[repr(u64)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AccountFlag {
    Initialized = 1 << 0,
    Market = 1 << 1,
    OpenOrders = 1 << 2,
}

/// Serum v3 market account record.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
#[repr(C)]
pub struct MarketState {
    pub account_flags: u64,
    pub own_address: Pubkey,
    pub vault_signer_nonce: u64,
    pub coin_mint: Pubkey,
    pub pc_mint: Pubkey,
    pub coin_vault: Pubkey,
    pub coin_deposits_total: u64,
    pub coin_fees_accrued: u64,
    pub pc_vault: Pubkey,
    pub pc_deposits_total: u64,
    pub pc_fees_accrued: u64,
    pub pc_dust_threshold: u64,
    pub request_queue: Pubkey,
    pub event_queue: Pubkey,
    pub bids: Pubkey,
    pub asks: Pubkey,
    pub coin_lot_size: u64,
    pub pc_lot_size: u64,
    pub fee_rate_bps: u64,
    pub referrer_rebates_accrued: u64,
}

impl MarketState {
    #[allow(missing_docs)]
    pub const LEN: usize = size_of::<Self>();
}

/// The 128 bit fields are kept as byte arrays: the record is unaligned in the account.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
#[repr(C)]
pub struct OpenOrders {
    pub account_flags: u64,
    pub market: Pubkey,
    pub owner: Pubkey,
    pub native_coin_free: u64,
    pub native_coin_total: u64,
    pub native_pc_free: u64,
    pub native_pc_total: u64,
    pub free_slot_bits: [u8; 16],
    pub is_bid_bits: [u8; 16],
    pub orders: [[u8; 16]; MAX_ORDERS],
    pub client_order_ids: [u64; MAX_ORDERS],
    pub referrer_rebates_accrued: u64,
}

impl OpenOrders {
    #[allow(missing_docs)]
    pub const LEN: usize = size_of::<Self>();
}

/// Full size of an open orders account, framing included.
pub const OPEN_ORDERS_ACCOUNT_LEN: usize = ACCOUNT_HEAD_LEN + OpenOrders::LEN + ACCOUNT_TAIL_LEN;

fn unframe<T: Pod>(data: &[u8], expected_flag: AccountFlag) -> BotResult<T> {
    if data.get(..ACCOUNT_HEAD_LEN) != Some(&ACCOUNT_HEAD[..]) {
        return Err(BotError::InvalidAccountData);
    }
    let record = data
        .get(ACCOUNT_HEAD_LEN..ACCOUNT_HEAD_LEN + size_of::<T>())
        .ok_or(BotError::InvalidAccountData)?;
    let flags = BitFlags::<AccountFlag>::from_bits_truncate(u64::from_le_bytes(
        *arrayref::array_ref![record, 0, 8],
    ));
    if !flags.contains(AccountFlag::Initialized | expected_flag) {
        return Err(BotError::InvalidAccountData);
    }
    Ok(bytemuck::pod_read_unaligned(record))
}

/// Decode a framed market account.
pub fn unpack_market(address: &Pubkey, data: &[u8]) -> BotResult<MarketInfo> {
    let state: MarketState = unframe(data, AccountFlag::Market)?;
    Ok(MarketInfo {
        address: *address,
        vault_signer_nonce: state.vault_signer_nonce,
        coin_mint: state.coin_mint,
        pc_mint: state.pc_mint,
        coin_vault: state.coin_vault,
        pc_vault: state.pc_vault,
        request_queue: state.request_queue,
        event_queue: state.event_queue,
        bids: state.bids,
        asks: state.asks,
        coin_lot_size: state.coin_lot_size,
        pc_lot_size: state.pc_lot_size,
    })
}

/// Decode a framed open orders account.
pub fn unpack_open_orders(address: &Pubkey, data: &[u8]) -> BotResult<OpenOrdersInfo> {
    let state: OpenOrders = unframe(data, AccountFlag::OpenOrders)?;
    Ok(OpenOrdersInfo {
        address: *address,
        market: state.market,
        owner: state.owner,
        native_coin_free: state.native_coin_free,
        native_coin_total: state.native_coin_total,
        native_pc_free: state.native_pc_free,
        native_pc_total: state.native_pc_total,
        free_slot_bits: u128::from_le_bytes(state.free_slot_bits),
        is_bid_bits: u128::from_le_bytes(state.is_bid_bits),
        orders: state.orders.iter().map(|o| u128::from_le_bytes(*o)).collect(),
    })
}

/// Reads venue accounts straight from the ledger.
#[derive(Clone, Debug)]
pub struct LedgerVenue<L> {
    ledger: L,
}

impl<L: Ledger> LedgerVenue<L> {
    #[allow(missing_docs)]
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    async fn fetch(&self, address: &Pubkey) -> BotResult<Vec<u8>> {
        self.ledger
            .account_data(address)
            .await?
            .ok_or(BotError::AccountUnavailable(*address))
    }
}

impl<L: Ledger> Venue for LedgerVenue<L> {
    async fn market(&self, address: &Pubkey) -> BotResult<MarketInfo> {
        unpack_market(address, &self.fetch(address).await?)
    }

    async fn open_orders(&self, address: &Pubkey) -> BotResult<OpenOrdersInfo> {
        unpack_open_orders(address, &self.fetch(address).await?)
    }
}
