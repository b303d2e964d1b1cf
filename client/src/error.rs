//! Error types of the pool client.
use num_derive::FromPrimitive;
use solana_program::{decode_error::DecodeError, program_error::ProgramError, pubkey::Pubkey};
use thiserror::Error;

#[allow(missing_docs)]
pub type BotResult<T = ()> = Result<T, BotError>;

#[derive(Clone, Copy, Debug, FromPrimitive, PartialEq, Eq)]
enum BotErrorCode {
    MalformedLength,
    Overflow,
    TruncatedAccount,
    InvalidStatusByte,
    InvalidAccountData,
    InvalidInstruction,
    SourceAssetUnavailable,
    PoolUnavailable,
    AccountUnavailable,
    UninitializedPool,
    UnauthorizedMarket,
    UnknownPoolAsset,
    NoOpenOrder,
    PendingOrders,
    SeedSearchExhausted,
    InvalidDerivation,
    Ledger,
    InvalidConfig,
    DuplicateAsset,
}

/// Every failure a client operation can surface.
///
/// Local validation errors (codec, layout) are raised before any ledger read. Resource errors abort the
/// workflow that hit them: no partial instruction list is ever returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BotError {
    #[error("Expected at least {expected} bytes, got {actual}")]
    MalformedLength { expected: usize, actual: usize },
    #[error("The value {value} does not fit in {width_bytes} bytes")]
    Overflow { value: u128, width_bytes: usize },
    #[error("The account holds {actual} bytes, at least {expected} are required")]
    TruncatedAccount { expected: usize, actual: usize },
    #[error("Invalid pool status byte {0:#04x}")]
    InvalidStatusByte(u8),
    #[error("The account data could not be decoded")]
    InvalidAccountData,
    #[error("The instruction data could not be decoded")]
    InvalidInstruction,
    #[error("The source asset account {0} is unavailable")]
    SourceAssetUnavailable(Pubkey),
    #[error("The pool account {0} is unavailable")]
    PoolUnavailable(Pubkey),
    #[error("The account {0} is unavailable")]
    AccountUnavailable(Pubkey),
    #[error("The pool {0} has not been created yet")]
    UninitializedPool(Pubkey),
    #[error("The market {0} is not authorized for this pool")]
    UnauthorizedMarket(Pubkey),
    #[error("The pool does not hold any {0} asset")]
    UnknownPoolAsset(Pubkey),
    #[error("The open orders account {0} has no outstanding order")]
    NoOpenOrder(Pubkey),
    #[error("The pool has {0} pending order(s)")]
    PendingOrders(u8),
    #[error("No usable pool seed was found after {attempts} attempts")]
    SeedSearchExhausted { attempts: u32 },
    #[error("The seeds do not derive a valid program address")]
    InvalidDerivation,
    #[error("Ledger error: {0}")]
    Ledger(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Two source accounts hold the same mint {0}")]
    DuplicateAsset(Pubkey),
}

impl BotError {
    fn code(&self) -> BotErrorCode {
        match self {
            BotError::MalformedLength { .. } => BotErrorCode::MalformedLength,
            BotError::Overflow { .. } => BotErrorCode::Overflow,
            BotError::TruncatedAccount { .. } => BotErrorCode::TruncatedAccount,
            BotError::InvalidStatusByte(_) => BotErrorCode::InvalidStatusByte,
            BotError::InvalidAccountData => BotErrorCode::InvalidAccountData,
            BotError::InvalidInstruction => BotErrorCode::InvalidInstruction,
            BotError::SourceAssetUnavailable(_) => BotErrorCode::SourceAssetUnavailable,
            BotError::PoolUnavailable(_) => BotErrorCode::PoolUnavailable,
            BotError::AccountUnavailable(_) => BotErrorCode::AccountUnavailable,
            BotError::UninitializedPool(_) => BotErrorCode::UninitializedPool,
            BotError::UnauthorizedMarket(_) => BotErrorCode::UnauthorizedMarket,
            BotError::UnknownPoolAsset(_) => BotErrorCode::UnknownPoolAsset,
            BotError::NoOpenOrder(_) => BotErrorCode::NoOpenOrder,
            BotError::PendingOrders(_) => BotErrorCode::PendingOrders,
            BotError::SeedSearchExhausted { .. } => BotErrorCode::SeedSearchExhausted,
            BotError::InvalidDerivation => BotErrorCode::InvalidDerivation,
            BotError::Ledger(_) => BotErrorCode::Ledger,
            BotError::InvalidConfig(_) => BotErrorCode::InvalidConfig,
            BotError::DuplicateAsset(_) => BotErrorCode::DuplicateAsset,
        }
    }

    /// Local validation failures are detected before any ledger access and are never worth retrying.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            BotError::MalformedLength { .. }
                | BotError::Overflow { .. }
                | BotError::TruncatedAccount { .. }
                | BotError::InvalidStatusByte(_)
                | BotError::InvalidAccountData
                | BotError::InvalidInstruction
                | BotError::InvalidConfig(_)
        )
    }
}

impl From<BotError> for ProgramError {
    fn from(e: BotError) -> Self {
        ProgramError::Custom(e.code() as u32)
    }
}

impl<T> DecodeError<T> for BotError {
    fn type_of() -> &'static str {
        "BotError"
    }
}

impl From<serde_json::Error> for BotError {
    fn from(e: serde_json::Error) -> Self {
        BotError::InvalidConfig(e.to_string())
    }
}

impl From<std::io::Error> for BotError {
    fn from(_: std::io::Error) -> Self {
        BotError::InvalidInstruction
    }
}
