//! The pool header is the fixed-size prefix of every pool account. The authorized market list and the
//! pool asset slots follow it directly.
use std::num::NonZeroU8;

use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use enumflags2::{bitflags, BitFlags};
use solana_program::pubkey::Pubkey;

use crate::{
    codec::{self, Width},
    error::{BotError, BotResult},
};

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StatusFlag {
    PendingOrder = 1 << 6,
    Locked = 1 << 7,
}

const STATUS_PENDING_ORDER_MASK: u8 = 0x3f;
const STATUS_UNLOCKED: u8 = STATUS_PENDING_ORDER_MASK;
/// Maximum number of orders a pool can have in flight.
pub const MAX_PENDING_ORDERS: u8 = 64;

/// Lock and pending order state of a pool, packed in a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStatus {
    /// Allocated by `init`, not yet populated by `create`
    Uninitialized,
    /// Open to deposits, no order in flight
    Unlocked,
    /// Closed to deposits by the signal provider
    Locked,
    /// Between 1 and 64 orders are in flight.
    PendingOrder(NonZeroU8),
    /// Closed to deposits with orders in flight
    LockedPendingOrder(NonZeroU8),
}

impl PoolStatus {
    /// Decode a status byte. The pending counter is only read when the pending flag is set.
    pub fn from_byte(byte: u8) -> BotResult<Self> {
        if byte == 0 {
            return Ok(PoolStatus::Uninitialized);
        }
        let flags = BitFlags::<StatusFlag>::from_bits_truncate(byte);
        let pending = || {
            NonZeroU8::new((byte & STATUS_PENDING_ORDER_MASK) + 1)
                .ok_or(BotError::InvalidStatusByte(byte))
        };
        let status = match (
            flags.contains(StatusFlag::Locked),
            flags.contains(StatusFlag::PendingOrder),
        ) {
            (false, false) => PoolStatus::Unlocked,
            (false, true) => PoolStatus::PendingOrder(pending()?),
            (true, false) => PoolStatus::Locked,
            (true, true) => PoolStatus::LockedPendingOrder(pending()?),
        };
        Ok(status)
    }

    /// Encode the status byte. Fails when more than 64 orders are pending.
    pub fn to_byte(self) -> BotResult<u8> {
        let counter = |n: NonZeroU8| {
            if n.get() > MAX_PENDING_ORDERS {
                return Err(BotError::InvalidStatusByte(n.get()));
            }
            Ok(STATUS_PENDING_ORDER_MASK & (n.get() - 1))
        };
        let byte = match self {
            PoolStatus::Uninitialized => 0,
            PoolStatus::Unlocked => STATUS_UNLOCKED,
            PoolStatus::Locked => BitFlags::from_flag(StatusFlag::Locked).bits(),
            PoolStatus::PendingOrder(n) => StatusFlag::PendingOrder as u8 | counter(n)?,
            PoolStatus::LockedPendingOrder(n) => {
                (StatusFlag::Locked | StatusFlag::PendingOrder).bits() | counter(n)?
            }
        };
        Ok(byte)
    }

    /// Number of orders in flight, zero outside of the pending states.
    pub fn pending_orders(&self) -> u8 {
        match self {
            PoolStatus::PendingOrder(n) | PoolStatus::LockedPendingOrder(n) => n.get(),
            _ => 0,
        }
    }

    /// A locked pool refuses deposits.
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            PoolStatus::Locked | PoolStatus::LockedPendingOrder(_)
        )
    }
}

/// The fixed part of a pool account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolHeader {
    /// The order-book program the pool trades on
    pub venue_program_id: Pubkey,
    /// Bumped seed deriving the pool address
    pub seed: [u8; 32],
    /// The only signer allowed to trade the pool assets
    pub signal_provider: Pubkey,
    #[allow(missing_docs)]
    pub status: PoolStatus,
    /// Length of the authorized market list following the header
    pub number_of_markets: u16,
    /// Share of the pool tokens minted as fees each period, out of 2^16
    pub fee_ratio: u16,
    #[allow(missing_docs)]
    pub last_fee_collection_timestamp: u64,
    /// Minimum number of seconds between two fee collections
    pub fee_collection_period: u64,
}

impl PoolHeader {
    #[allow(missing_docs)]
    pub const LEN: usize = 117;

    /// Decode the header from the start of a pool account.
    pub fn unpack(src: &[u8]) -> BotResult<Self> {
        let src = src.get(..Self::LEN).ok_or(BotError::TruncatedAccount {
            expected: Self::LEN,
            actual: src.len(),
        })?;
        let src = array_ref![src, 0, PoolHeader::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (venue_program_id, seed, signal_provider, status, fixed) =
            array_refs![src, 32, 32, 32, 1, 20];
        Ok(Self {
            venue_program_id: Pubkey::new_from_array(*venue_program_id),
            seed: *seed,
            signal_provider: Pubkey::new_from_array(*signal_provider),
            status: PoolStatus::from_byte(status[0])?,
            number_of_markets: codec::read_u16(fixed, 0)?,
            fee_ratio: codec::read_u16(fixed, 2)?,
            last_fee_collection_timestamp: codec::read_u64(fixed, 4)?,
            fee_collection_period: codec::read_u64(fixed, 12)?,
        })
    }

    /// Encode the header into the start of `dst`.
    pub fn pack_into_slice(&self, dst: &mut [u8]) -> BotResult {
        let len = dst.len();
        let dst = dst.get_mut(..Self::LEN).ok_or(BotError::TruncatedAccount {
            expected: Self::LEN,
            actual: len,
        })?;
        let dst = array_mut_ref![dst, 0, PoolHeader::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (venue_program_id, seed, signal_provider, status, fixed) =
            mut_array_refs![dst, 32, 32, 32, 1, 20];
        venue_program_id.copy_from_slice(self.venue_program_id.as_ref());
        seed.copy_from_slice(&self.seed);
        signal_provider.copy_from_slice(self.signal_provider.as_ref());
        status[0] = self.status.to_byte()?;
        let mut buf = Vec::with_capacity(20);
        codec::write(&mut buf, self.number_of_markets as u128, Width::U16)?;
        codec::write(&mut buf, self.fee_ratio as u128, Width::U16)?;
        codec::write(&mut buf, self.last_fee_collection_timestamp as u128, Width::U64)?;
        codec::write(&mut buf, self.fee_collection_period as u128, Width::U64)?;
        fixed.copy_from_slice(&buf);
        Ok(())
    }

    /// Whether `create` populated the pool.
    pub fn is_initialized(&self) -> bool {
        self.status != PoolStatus::Uninitialized
    }
}

/// Read the `count` authorized market addresses at the start of `src`.
pub fn unpack_markets(src: &[u8], count: u16) -> BotResult<Vec<Pubkey>> {
    let len = count as usize * 32;
    let src = src.get(..len).ok_or(BotError::TruncatedAccount {
        expected: len,
        actual: src.len(),
    })?;
    src.chunks_exact(32)
        .map(|chunk| codec::read_pubkey(chunk, 0))
        .collect()
}
