//! Client configuration.
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{error::BotResult, venue::serum::OPEN_ORDERS_ACCOUNT_LEN};

/// Program identities and pool creation parameters shared by every workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// The pool program
    #[serde(with = "pubkey_string")]
    pub program_id: Pubkey,
    /// The order book program the pools trade on
    #[serde(with = "pubkey_string")]
    pub venue_program_id: Pubkey,
    /// Owner of the fee pool token accounts
    #[serde(with = "pubkey_string")]
    pub fee_owner: Pubkey,
    /// Owner of the pool token accounts receiving the burnt share of the fees
    #[serde(with = "pubkey_string")]
    pub burn_owner: Pubkey,
    /// Defaults to the SPL token program
    #[serde(with = "pubkey_string", default = "spl_token::id")]
    pub token_program_id: Pubkey,
    /// Asset slots allocated for every new pool
    #[serde(default = "default_max_number_of_assets")]
    pub max_number_of_assets: u32,
    /// Bound of the random pool seed search
    #[serde(default = "default_max_seed_attempts")]
    pub max_seed_attempts: u32,
    /// Size of the open orders accounts created for new orders
    #[serde(default = "default_open_orders_len")]
    pub open_orders_len: usize,
}

fn default_max_number_of_assets() -> u32 {
    10
}

fn default_max_seed_attempts() -> u32 {
    1_000
}

fn default_open_orders_len() -> usize {
    OPEN_ORDERS_ACCOUNT_LEN
}

impl BotConfig {
    /// A configuration with default values for every optional field.
    pub fn new(program_id: Pubkey, venue_program_id: Pubkey, fee_owner: Pubkey, burn_owner: Pubkey) -> Self {
        Self {
            program_id,
            venue_program_id,
            fee_owner,
            burn_owner,
            token_program_id: spl_token::id(),
            max_number_of_assets: default_max_number_of_assets(),
            max_seed_attempts: default_max_seed_attempts(),
            open_orders_len: default_open_orders_len(),
        }
    }

    /// Parse a JSON configuration. Public keys are base58 strings.
    pub fn from_json(json: &str) -> BotResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Public keys are written as base58 strings.
mod pubkey_string {
    use std::str::FromStr;

    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use solana_program::pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(key)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(D::Error::custom)
    }
}
