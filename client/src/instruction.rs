//! Pool program instruction encoders.
use bonfida_utils::InstructionsAccount;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::{instruction::Instruction, msg, pubkey::Pubkey};

use crate::error::{BotError, BotResult};

#[allow(missing_docs)]
pub mod cancel_order;
#[allow(missing_docs)]
pub mod collect_fees;
#[allow(missing_docs)]
pub mod create;
#[allow(missing_docs)]
pub mod create_order;
#[allow(missing_docs)]
pub mod deposit;
#[allow(missing_docs)]
pub mod init;
#[allow(missing_docs)]
pub mod redeem;
#[allow(missing_docs)]
pub mod settle_funds;

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
/// Describes all possible pool instructions and their required accounts.
///
/// Every payload starts with the instruction tag followed by the 32 byte pool seed.
pub enum PoolInstruction {
    /// Allocate the pool account and its token mint.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description            |
    /// |-------|----------|--------|------------------------|
    /// | 0     | ❌       | ❌     | The system program     |
    /// | 1     | ❌       | ❌     | The rent sysvar        |
    /// | 2     | ❌       | ❌     | The spl token program  |
    /// | 3     | ✅       | ❌     | The pool account       |
    /// | 4     | ✅       | ❌     | The pool token mint    |
    /// | 5     | ✅       | ✅     | The fee payer          |
    Init,
    /// Populate an initialized pool with its first assets and authorized markets, minting pool tokens
    /// in return.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                                 |
    /// |-------|----------|--------|---------------------------------------------|
    /// | 0     | ❌       | ❌     | The spl token program                       |
    /// | 1     | ❌       | ❌     | The clock sysvar                            |
    /// | 2     | ✅       | ❌     | The pool token mint                         |
    /// | 3     | ✅       | ❌     | The pool token account receiving the tokens |
    /// | 4     | ✅       | ❌     | The pool account                            |
    /// | 5..   | ✅       | ❌     | The pool asset accounts                     |
    /// | ..    | ❌       | ✅     | The owner of the source assets              |
    /// | ..    | ✅       | ❌     | The source asset accounts                   |
    Create,
    /// Buy into an existing pool.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                                 |
    /// |-------|----------|--------|---------------------------------------------|
    /// | 0     | ❌       | ❌     | The spl token program                       |
    /// | 1     | ✅       | ❌     | The pool token mint                         |
    /// | 2     | ✅       | ❌     | The pool token account receiving the tokens |
    /// | 3     | ✅       | ❌     | The signal provider fee account             |
    /// | 4     | ✅       | ❌     | The fee owner fee account                   |
    /// | 5     | ✅       | ❌     | The burn owner fee account                  |
    /// | 6     | ✅       | ❌     | The pool account                            |
    /// | 7..   | ✅       | ❌     | The pool asset accounts                     |
    /// | ..    | ❌       | ✅     | The owner of the source assets              |
    /// | ..    | ✅       | ❌     | The source asset accounts                   |
    Deposit,
    /// Place an order on an authorized venue market on behalf of the pool.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                   |
    /// |-------|----------|--------|-------------------------------|
    /// | 0     | ❌       | ✅     | The signal provider           |
    /// | 1     | ✅       | ❌     | The market                    |
    /// | 2     | ✅       | ❌     | The pool asset paying         |
    /// | 3     | ✅       | ❌     | The open orders account       |
    /// | 4     | ✅       | ❌     | The market request queue      |
    /// | 5     | ✅       | ❌     | The pool account              |
    /// | 6     | ✅       | ❌     | The market coin vault         |
    /// | 7     | ✅       | ❌     | The market price coin vault   |
    /// | 8     | ❌       | ❌     | The spl token program         |
    /// | 9     | ❌       | ❌     | The rent sysvar               |
    /// | 10    | ❌       | ❌     | The venue program             |
    /// | 11    | ✅       | ❌     | The optional fee referrer     |
    CreateOrder,
    /// Cancel an outstanding order of the pool.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description              |
    /// |-------|----------|--------|--------------------------|
    /// | 0     | ❌       | ✅     | The signal provider      |
    /// | 1     | ❌       | ❌     | The market               |
    /// | 2     | ✅       | ❌     | The open orders account  |
    /// | 3     | ✅       | ❌     | The market request queue |
    /// | 4     | ❌       | ❌     | The pool account         |
    /// | 5     | ❌       | ❌     | The venue program        |
    CancelOrder,
    /// Move the proceeds of filled orders back into the pool asset accounts.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                 |
    /// |-------|----------|--------|-----------------------------|
    /// | 0     | ✅       | ❌     | The market                  |
    /// | 1     | ✅       | ❌     | The open orders account     |
    /// | 2     | ✅       | ❌     | The pool account            |
    /// | 3     | ❌       | ❌     | The pool token mint         |
    /// | 4     | ✅       | ❌     | The market coin vault       |
    /// | 5     | ✅       | ❌     | The market price coin vault |
    /// | 6     | ✅       | ❌     | The pool coin asset         |
    /// | 7     | ✅       | ❌     | The pool price coin asset   |
    /// | 8     | ❌       | ❌     | The market vault signer     |
    /// | 9     | ❌       | ❌     | The spl token program       |
    /// | 10    | ❌       | ❌     | The venue program           |
    /// | 11    | ✅       | ❌     | The optional fee referrer   |
    SettleFunds,
    /// Burn pool tokens in exchange for a share of every pool asset.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                       |
    /// |-------|----------|--------|-----------------------------------|
    /// | 0     | ❌       | ❌     | The spl token program             |
    /// | 1     | ❌       | ❌     | The clock sysvar                  |
    /// | 2     | ✅       | ❌     | The pool token mint               |
    /// | 3     | ❌       | ✅     | The owner of the pool tokens      |
    /// | 4     | ✅       | ❌     | The pool token account            |
    /// | 5     | ✅       | ❌     | The pool account                  |
    /// | 6..   | ✅       | ❌     | The pool asset accounts           |
    /// | ..    | ✅       | ❌     | The accounts receiving the assets |
    Redeem,
    /// Mint the accrued fees to the three fee receivers.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                     |
    /// |-------|----------|--------|---------------------------------|
    /// | 0     | ❌       | ❌     | The spl token program           |
    /// | 1     | ❌       | ❌     | The clock sysvar                |
    /// | 2     | ✅       | ❌     | The pool account                |
    /// | 3     | ✅       | ❌     | The pool token mint             |
    /// | 4     | ✅       | ❌     | The signal provider fee account |
    /// | 5     | ✅       | ❌     | The fee owner fee account       |
    /// | 6     | ✅       | ❌     | The burn owner fee account      |
    CollectFees,
}

impl PoolInstruction {
    /// Split an instruction payload into its tag and the remaining fields.
    pub fn unpack_tag(data: &[u8]) -> BotResult<(Self, &[u8])> {
        let (tag, rest) = data.split_first().ok_or(BotError::InvalidInstruction)?;
        match PoolInstruction::from_u8(*tag) {
            Some(instruction) => Ok((instruction, rest)),
            None => {
                msg!("Unsupported instruction tag {}", tag);
                Err(BotError::InvalidInstruction)
            }
        }
    }
}

/// The fields of a pool instruction payload, following the tag.
pub trait InstructionParams: Sized {
    /// The tag leading the payload
    const INSTRUCTION: PoolInstruction;

    /// Append the fields to `dst`.
    fn pack_fields(&self, dst: &mut Vec<u8>) -> BotResult;

    /// Decode the fields, tag excluded.
    fn unpack_fields(src: &[u8]) -> BotResult<Self>;

    /// The full payload: tag then fields.
    fn pack(&self) -> BotResult<Vec<u8>> {
        let mut data = vec![Self::INSTRUCTION as u8];
        self.pack_fields(&mut data)?;
        Ok(data)
    }

    /// Decode a full payload, checking its tag.
    fn unpack(data: &[u8]) -> BotResult<Self> {
        let (instruction, fields) = PoolInstruction::unpack_tag(data)?;
        if instruction != Self::INSTRUCTION {
            msg!("Expected a {:?} instruction, got {:?}", Self::INSTRUCTION, instruction);
            return Err(BotError::InvalidInstruction);
        }
        Self::unpack_fields(fields)
    }
}

/// Implements [`InstructionParams`] for a record whose borsh serialization is the wire layout.
macro_rules! borsh_params {
    ($params:ty, $instruction:expr) => {
        impl $crate::instruction::InstructionParams for $params {
            const INSTRUCTION: $crate::instruction::PoolInstruction = $instruction;

            fn pack_fields(&self, dst: &mut Vec<u8>) -> $crate::error::BotResult {
                borsh::BorshSerialize::serialize(self, dst)?;
                Ok(())
            }

            fn unpack_fields(src: &[u8]) -> $crate::error::BotResult<Self> {
                Ok(<Self as borsh::BorshDeserialize>::try_from_slice(src)?)
            }
        }
    };
}
pub(crate) use borsh_params;

fn build<P: InstructionParams>(
    program_id: Pubkey,
    accounts: &impl InstructionsAccount,
    params: &P,
) -> BotResult<Instruction> {
    Ok(Instruction {
        program_id,
        accounts: accounts.get_accounts_vec(),
        data: params.pack()?,
    })
}

/// Allocate a pool account and its token mint.
pub fn init(
    program_id: Pubkey,
    accounts: init::Accounts<Pubkey>,
    params: &init::Params,
) -> BotResult<Instruction> {
    build(program_id, &accounts, params)
}

/**
Populate a pool allocated by [`init`].

The pool asset and source asset lists are matched by position, and `params.deposit_amounts` gives the
amount moved from each source asset.
*/
pub fn create(
    program_id: Pubkey,
    accounts: create::Accounts<Pubkey>,
    params: &create::Params,
) -> BotResult<Instruction> {
    build(program_id, &accounts, params)
}

/// Buy `pool_token_amount` pool tokens with a proportional share of every pool asset.
pub fn deposit(
    program_id: Pubkey,
    accounts: deposit::Accounts<Pubkey>,
    params: &deposit::Params,
) -> BotResult<Instruction> {
    build(program_id, &accounts, params)
}

/**
Place a venue order on behalf of the pool.

The payload has a fixed size, independent of the number of pool assets or authorized markets.
Assets and markets are referenced by their index in the pool account.
*/
pub fn create_order(
    program_id: Pubkey,
    accounts: create_order::Accounts<Pubkey>,
    params: &create_order::Params,
) -> BotResult<Instruction> {
    build(program_id, &accounts, params)
}

/// Cancel the order held in the first slot of a pool open orders account.
pub fn cancel_order(
    program_id: Pubkey,
    accounts: cancel_order::Accounts<Pubkey>,
    params: &cancel_order::Params,
) -> BotResult<Instruction> {
    build(program_id, &accounts, params)
}

/// Move the settled balances of a pool open orders account back to the pool assets.
pub fn settle_funds(
    program_id: Pubkey,
    accounts: settle_funds::Accounts<Pubkey>,
    params: &settle_funds::Params,
) -> BotResult<Instruction> {
    build(program_id, &accounts, params)
}

/// Burn pool tokens and receive a proportional share of every pool asset.
pub fn redeem(
    program_id: Pubkey,
    accounts: redeem::Accounts<Pubkey>,
    params: &redeem::Params,
) -> BotResult<Instruction> {
    build(program_id, &accounts, params)
}

/// Mint the fees accrued since the last collection.
pub fn collect_fees(
    program_id: Pubkey,
    accounts: collect_fees::Accounts<Pubkey>,
    params: &collect_fees::Params,
) -> BotResult<Instruction> {
    build(program_id, &accounts, params)
}
