//! Populate an initialized pool with its first assets.
use bonfida_utils::InstructionsAccount;
use solana_program::pubkey::Pubkey;

use crate::{
    codec::{self, Width},
    error::{BotError, BotResult},
    instruction::{InstructionParams, PoolInstruction},
};

/// Length of the fixed part of the payload, tag excluded.
const FIXED_LEN: usize = 32 + 32 + 32 + 2 + 8 + 8;

/**
The required arguments for a create instruction.

The market list and the deposit amounts are appended after the fixed fields without any length
prefix. The number of markets is carried by the payload, the number of deposit amounts is implied
by its length.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    #[allow(missing_docs)]
    pub pool_seed: [u8; 32],
    #[allow(missing_docs)]
    pub venue_program_id: Pubkey,
    #[allow(missing_docs)]
    pub signal_provider: Pubkey,
    #[allow(missing_docs)]
    pub fee_collection_period: u64,
    /// Share of the pool tokens minted as fees each period, out of 2^16
    pub fee_ratio: u64,
    #[allow(missing_docs)]
    pub markets: Vec<Pubkey>,
    /// One amount per source asset, in the order of the source asset accounts
    pub deposit_amounts: Vec<u64>,
}

impl InstructionParams for Params {
    const INSTRUCTION: PoolInstruction = PoolInstruction::Create;

    fn pack_fields(&self, dst: &mut Vec<u8>) -> BotResult {
        dst.extend_from_slice(&self.pool_seed);
        dst.extend_from_slice(&self.venue_program_id.to_bytes());
        dst.extend_from_slice(&self.signal_provider.to_bytes());
        codec::write(dst, self.markets.len() as u128, Width::U16)?;
        codec::write(dst, self.fee_collection_period as u128, Width::U64)?;
        codec::write(dst, self.fee_ratio as u128, Width::U64)?;
        for market in &self.markets {
            dst.extend_from_slice(&market.to_bytes());
        }
        for amount in &self.deposit_amounts {
            codec::write(dst, *amount as u128, Width::U64)?;
        }
        Ok(())
    }

    fn unpack_fields(src: &[u8]) -> BotResult<Self> {
        if src.len() < FIXED_LEN {
            return Err(BotError::MalformedLength {
                expected: FIXED_LEN,
                actual: src.len(),
            });
        }
        let mut pool_seed = [0u8; 32];
        pool_seed.copy_from_slice(&src[..32]);
        let number_of_markets = codec::read_u16(src, 96)? as usize;
        let markets_end = FIXED_LEN + 32 * number_of_markets;
        let markets = src
            .get(FIXED_LEN..markets_end)
            .ok_or(BotError::MalformedLength {
                expected: markets_end,
                actual: src.len(),
            })?
            .chunks_exact(32)
            .map(|chunk| codec::read_pubkey(chunk, 0))
            .collect::<BotResult<Vec<_>>>()?;
        let amounts = &src[markets_end..];
        if amounts.len() % 8 != 0 {
            return Err(BotError::InvalidInstruction);
        }
        let deposit_amounts = amounts
            .chunks_exact(8)
            .map(|chunk| codec::read_u64(chunk, 0))
            .collect::<BotResult<Vec<_>>>()?;
        Ok(Self {
            pool_seed,
            venue_program_id: codec::read_pubkey(src, 32)?,
            signal_provider: codec::read_pubkey(src, 64)?,
            fee_collection_period: codec::read_u64(src, 98)?,
            fee_ratio: codec::read_u64(src, 106)?,
            markets,
            deposit_amounts,
        })
    }
}

/// The required accounts for a create instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    #[allow(missing_docs)]
    pub spl_token_program: &'a T,
    #[allow(missing_docs)]
    pub clock_sysvar: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub mint: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub target_pool_token: &'a T,
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
