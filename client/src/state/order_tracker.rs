//! Per-order bookkeeping account kept by the pool while a venue order is open.
use num_traits::FromPrimitive;

use crate::{
    codec,
    error::{BotError, BotResult},
    state::Side,
};

/// Bookkeeping of one in-flight order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTracker {
    #[allow(missing_docs)]
    pub side: Side,
    /// Paying asset committed per pool token
    pub source_amount_per_token: u64,
    /// Received asset not yet settled
    pub pending_target_amount: u64,
    /// Paying asset committed in total
    pub source_total_amount: u64,
}

impl OrderTracker {
    #[allow(missing_docs)]
    pub const LEN: usize = 32;

    /// Decode an order tracker account.
    pub fn unpack(src: &[u8]) -> BotResult<Self> {
        if src.len() < Self::LEN {
            return Err(BotError::TruncatedAccount {
                expected: Self::LEN,
                actual: src.len(),
            });
        }
        let side = Side::from_u8(codec::read_u8(src, 0)?).ok_or(BotError::InvalidAccountData)?;
        Ok(Self {
            side,
            source_amount_per_token: codec::read_u64(src, 1)?,
            pending_target_amount: codec::read_u64(src, 9)?,
            source_total_amount: codec::read_u64(src, 17)?,
        })
    }

    /// A zero per-token amount marks a tracker which was never written to.
    pub fn is_initialized(&self) -> bool {
        self.source_amount_per_token != 0
    }
}
