//! Read access to the ledger runtime.
//!
//! Submission of the built instructions is left to the caller: a rejected transaction never goes
//! through this crate.
use solana_program::{pubkey::Pubkey, rent::Rent};

use crate::error::BotResult;

/// Reads the accounts the workflows depend on.
#[allow(async_fn_in_trait)]
pub trait Ledger {
    /// Raw data of an account, `None` when the account does not exist.
    ///
    /// Transport failures are reported as [`BotError::Ledger`](crate::error::BotError::Ledger).
    async fn account_data(&self, address: &Pubkey) -> BotResult<Option<Vec<u8>>>;

    /// Every account owned by `program_id`.
    async fn program_accounts(&self, program_id: &Pubkey) -> BotResult<Vec<(Pubkey, Vec<u8>)>>;

    /// Lamports required for an account of `data_len` bytes to be rent exempt.
    async fn minimum_balance(&self, data_len: usize) -> BotResult<u64> {
        Ok(Rent::default().minimum_balance(data_len))
    }

    /// Whether an account is stored at `address`.
    async fn account_exists(&self, address: &Pubkey) -> BotResult<bool> {
        Ok(self.account_data(address).await?.is_some())
    }
}
