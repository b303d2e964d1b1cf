#![allow(dead_code)]
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use bytemuck::Zeroable;
use signal_pool::{
    config::BotConfig,
    error::{BotError, BotResult},
    ledger::Ledger,
    state::{PoolAsset, PoolHeader, PoolStatus},
    venue::serum::{MarketState, OpenOrders},
    PoolClient,
};
use solana_program::{program_pack::Pack, pubkey::Pubkey};
use spl_associated_token_account::get_associated_token_address;

/// An in-memory ledger shared by the client and the test.
#[derive(Clone, Default)]
pub struct TestLedger {
    accounts: Arc<RwLock<HashMap<Pubkey, (Pubkey, Vec<u8>)>>>,
    offline: Arc<RwLock<bool>>,
}

impl TestLedger {
    pub fn set_account(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.accounts.write().unwrap().insert(address, (owner, data));
    }

    pub fn remove_account(&self, address: &Pubkey) {
        self.accounts.write().unwrap().remove(address);
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.write().unwrap() = offline;
    }

    fn check_online(&self) -> BotResult {
        if *self.offline.read().unwrap() {
            return Err(BotError::Ledger("connection refused".to_owned()));
        }
        Ok(())
    }
}

impl Ledger for TestLedger {
    async fn account_data(&self, address: &Pubkey) -> BotResult<Option<Vec<u8>>> {
        self.check_online()?;
        Ok(self
            .accounts
            .read()
            .unwrap()
            .get(address)
            .map(|(_, data)| data.clone()))
    }

    async fn program_accounts(&self, program_id: &Pubkey) -> BotResult<Vec<(Pubkey, Vec<u8>)>> {
        self.check_online()?;
        Ok(self
            .accounts
            .read()
            .unwrap()
            .iter()
            .filter(|(_, (owner, _))| owner == program_id)
            .map(|(address, (_, data))| (*address, data.clone()))
            .collect())
    }
}

pub fn test_config() -> BotConfig {
    BotConfig::new(
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
    )
}

pub fn token_account_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let account = spl_token::state::Account {
        mint: *mint,
        owner: *owner,
        amount,
        state: spl_token::state::AccountState::Initialized,
        ..Default::default()
    };
    let mut data = vec![0; spl_token::state::Account::LEN];
    spl_token::state::Account::pack(account, &mut data).unwrap();
    data
}

pub fn mint_data(supply: u64) -> Vec<u8> {
    let mint = spl_token::state::Mint {
        supply,
        decimals: 6,
        is_initialized: true,
        ..Default::default()
    };
    let mut data = vec![0; spl_token::state::Mint::LEN];
    spl_token::state::Mint::pack(mint, &mut data).unwrap();
    data
}

/// Store a token account of `owner` at its associated address.
pub fn add_token_account(ledger: &TestLedger, owner: &Pubkey, mint: &Pubkey, amount: u64) -> Pubkey {
    let address = get_associated_token_address(owner, mint);
    ledger.set_account(address, spl_token::id(), token_account_data(mint, owner, amount));
    address
}

pub fn pool_data(header: &PoolHeader, markets: &[Pubkey], assets: &[PoolAsset]) -> Vec<u8> {
    let mut data = vec![0; PoolHeader::LEN];
    header.pack_into_slice(&mut data).unwrap();
    for market in markets {
        data.extend_from_slice(market.as_ref());
    }
    for asset in assets {
        let mut slot = [0; PoolAsset::LEN];
        asset.pack_into_slice(&mut slot);
        data.extend_from_slice(&slot);
    }
    data
}

fn framed(record: &[u8]) -> Vec<u8> {
    let mut data = b"serum".to_vec();
    data.extend_from_slice(record);
    data.extend_from_slice(b"padding");
    data
}

pub struct TestMarket {
    pub address: Pubkey,
    pub coin_mint: Pubkey,
    pub pc_mint: Pubkey,
    pub state: MarketState,
}

/// A venue market with a valid vault signer nonce.
pub fn add_market(ledger: &TestLedger, venue_program_id: &Pubkey, coin_mint: Pubkey, pc_mint: Pubkey) -> TestMarket {
    let address = Pubkey::new_unique();
    let vault_signer_nonce = (0..u64::MAX)
        .find(|n| {
            Pubkey::create_program_address(&[address.as_ref(), &n.to_le_bytes()], venue_program_id).is_ok()
        })
        .unwrap();
    let mut state = MarketState::zeroed();
    // Initialized market
    state.account_flags = 0b11;
    state.own_address = address;
    state.vault_signer_nonce = vault_signer_nonce;
    state.coin_mint = coin_mint;
    state.pc_mint = pc_mint;
    state.coin_vault = Pubkey::new_unique();
    state.pc_vault = Pubkey::new_unique();
    state.request_queue = Pubkey::new_unique();
    state.event_queue = Pubkey::new_unique();
    state.bids = Pubkey::new_unique();
    state.asks = Pubkey::new_unique();
    state.coin_lot_size = 1_000;
    state.pc_lot_size = 10;
    ledger.set_account(address, *venue_program_id, framed(bytemuck::bytes_of(&state)));
    TestMarket {
        address,
        coin_mint,
        pc_mint,
        state,
    }
}

/// An open orders account holding `orders`, `is_bid_bits` marking the bid slots.
pub fn add_open_orders(
    ledger: &TestLedger,
    venue_program_id: &Pubkey,
    market: &Pubkey,
    owner: &Pubkey,
    orders: &[u128],
    is_bid_bits: u128,
) -> Pubkey {
    let address = Pubkey::new_unique();
    let mut state = OpenOrders::zeroed();
    // Initialized open orders
    state.account_flags = 0b101;
    state.market = *market;
    state.owner = *owner;
    state.free_slot_bits = (u128::MAX << orders.len()).to_le_bytes();
    state.is_bid_bits = is_bid_bits.to_le_bytes();
    for (slot, id) in state.orders.iter_mut().zip(orders) {
        *slot = id.to_le_bytes();
    }
    ledger.set_account(address, *venue_program_id, framed(bytemuck::bytes_of(&state)));
    address
}

/// A created pool living in a [`TestLedger`].
pub struct TestPool {
    pub client: PoolClient<TestLedger>,
    pub ledger: TestLedger,
    pub seed: [u8; 32],
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub signal_provider: Pubkey,
    pub header: PoolHeader,
    pub markets: Vec<Pubkey>,
    pub assets: Vec<PoolAsset>,
}

impl TestPool {
    /// A pool holding `assets` (zero mints are written as empty slots) and authorized on `markets`.
    pub fn new(markets: Vec<Pubkey>, assets: Vec<PoolAsset>) -> Self {
        let config = test_config();
        let ledger = TestLedger::default();
        let client = PoolClient::new(config.clone(), ledger.clone());
        let addresses = client.deriver().derive_bumped(&mut rand::thread_rng()).unwrap();
        let signal_provider = Pubkey::new_unique();
        let header = PoolHeader {
            venue_program_id: config.venue_program_id,
            seed: addresses.seed,
            signal_provider,
            status: PoolStatus::Unlocked,
            number_of_markets: markets.len() as u16,
            fee_ratio: 100,
            last_fee_collection_timestamp: 0,
            fee_collection_period: 604_800,
        };
        let pool = Self {
            client,
            ledger,
            seed: addresses.seed,
            pool: addresses.pool,
            mint: addresses.mint,
            signal_provider,
            header,
            markets,
            assets,
        };
        pool.write();
        pool.ledger
            .set_account(pool.mint, spl_token::id(), mint_data(1_000_000));
        for asset in pool.assets.iter().filter(|a| a.is_initialized()) {
            add_token_account(&pool.ledger, &pool.pool, &asset.mint_address, asset.amount_in_token);
        }
        pool
    }

    /// Store the current header, markets and assets in the pool account.
    pub fn write(&self) {
        self.ledger.set_account(
            self.pool,
            self.client.config.program_id,
            pool_data(&self.header, &self.markets, &self.assets),
        );
    }

    pub fn config(&self) -> &BotConfig {
        &self.client.config
    }
}

pub fn asset(amount_in_token: u64) -> PoolAsset {
    PoolAsset {
        mint_address: Pubkey::new_unique(),
        amount_in_token,
    }
}

pub fn empty_slot() -> PoolAsset {
    PoolAsset {
        mint_address: Pubkey::default(),
        amount_in_token: 0,
    }
}
