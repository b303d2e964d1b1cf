//! Assembly of the ordered instruction lists behind every pool workflow.
//!
//! Each workflow reads the current ledger state, then either returns the complete list of instructions
//! to submit in a single transaction, or fails without returning anything. Nothing is cached between
//! calls: asset and market indices are resolved against a fresh read of the pool account every time.
use solana_program::{
    instruction::Instruction, program_pack::Pack, pubkey::Pubkey, system_instruction, system_program,
    sysvar,
};
use solana_sdk::signature::{Keypair, Signer};
use spl_associated_token_account::{
    get_associated_token_address_with_program_id, instruction::create_associated_token_account,
};

use crate::{
    address::{AddressDeriver, AddressOracle, ProgramAddressOracle},
    config::BotConfig,
    error::{BotError, BotResult},
    instruction::{self, cancel_order, collect_fees, create, create_order, deposit, init, redeem, settle_funds},
    ledger::Ledger,
    state::{side_from_order_id, OrderTracker, OrderType, PoolState, SelfTradeBehavior, Side},
    venue::{LedgerVenue, MarketInfo, Venue},
};

/// A pool ready to be initialized and created.
#[derive(Debug)]
pub struct CreatedPool {
    /// The bumped pool seed, which identifies the pool in every later workflow
    pub seed: [u8; 32],
    #[allow(missing_docs)]
    pub pool: Pubkey,
    #[allow(missing_docs)]
    pub mint: Pubkey,
    /// In execution order
    pub instructions: Vec<Instruction>,
}

/// What the signal provider wants to trade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderRequest {
    /// One of the pool's authorized markets
    pub market: Pubkey,
    #[allow(missing_docs)]
    pub side: Side,
    /// Price of one coin lot, in price coin lots
    pub limit_price: u64,
    /// Fraction of the paying pool asset committed to the order, out of 2^16
    pub max_quantity: u16,
    #[allow(missing_docs)]
    pub order_type: OrderType,
    #[allow(missing_docs)]
    pub client_id: u64,
    #[allow(missing_docs)]
    pub self_trade_behavior: SelfTradeBehavior,
    /// Price coin account receiving the referral rebates
    pub referrer: Option<Pubkey>,
}

/// The instructions placing an order along with the accounts they create.
///
/// The transaction must be signed by `open_orders`, the signal provider and the payer.
#[derive(Debug)]
pub struct OrderSubmission {
    /// The venue account created to hold the order
    pub open_orders: Keypair,
    #[allow(missing_docs)]
    pub order_tracker: Pubkey,
    /// Index of the paying asset in the pool asset list
    pub source_asset_index: u64,
    /// Index of the received asset, equal to the asset count when the pool does not hold it yet
    pub target_asset_index: u64,
    /// In execution order
    pub instructions: Vec<Instruction>,
}

/// A pool account along with its addresses.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolInfo {
    /// The bumped pool seed, which identifies the pool in every later workflow
    pub seed: [u8; 32],
    #[allow(missing_docs)]
    pub address: Pubkey,
    #[allow(missing_docs)]
    pub mint: Pubkey,
    #[allow(missing_docs)]
    pub state: PoolState,
}

/// Assembles the instruction lists of every pool workflow from fresh ledger reads.
pub struct PoolClient<L, V = LedgerVenue<L>, O = ProgramAddressOracle> {
    #[allow(missing_docs)]
    pub config: BotConfig,
    ledger: L,
    venue: V,
    deriver: AddressDeriver<O>,
}

impl<L: Ledger + Clone> PoolClient<L> {
    /// A client reading the venue accounts from the same ledger.
    pub fn new(config: BotConfig, ledger: L) -> Self {
        let venue = LedgerVenue::new(ledger.clone());
        Self::with_parts(config, ledger, venue, ProgramAddressOracle)
    }
}

impl<L: Ledger, V: Venue, O: AddressOracle> PoolClient<L, V, O> {
    /// A client with its own venue reader and address oracle.
    pub fn with_parts(config: BotConfig, ledger: L, venue: V, oracle: O) -> Self {
        let deriver = AddressDeriver::with_oracle(config.program_id, config.max_seed_attempts, oracle);
        Self {
            config,
            ledger,
            venue,
            deriver,
        }
    }

    /// The derivations of the configured pool program.
    pub fn deriver(&self) -> &AddressDeriver<O> {
        &self.deriver
    }

    /// The associated token account of `owner` for `mint`.
    pub fn token_account(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(owner, mint, &self.config.token_program_id)
    }

    /// Queue the creation of the `owner` token account for `mint` unless it already exists.
    async fn bootstrap_token_account(
        &self,
        payer: &Pubkey,
        owner: &Pubkey,
        mint: &Pubkey,
        instructions: &mut Vec<Instruction>,
    ) -> BotResult<Pubkey> {
        let address = self.token_account(owner, mint);
        if !self.ledger.account_exists(&address).await? {
            tracing::debug!(%owner, %mint, %address, "Creating missing token account");
            instructions.push(create_associated_token_account(
                payer,
                owner,
                mint,
                &self.config.token_program_id,
            ));
        }
        Ok(address)
    }

    async fn load_pool(&self, seed: &[u8; 32]) -> BotResult<(Pubkey, PoolState)> {
        let pool = self.deriver.pool_address(seed)?;
        let data = self
            .ledger
            .account_data(&pool)
            .await?
            .ok_or(BotError::PoolUnavailable(pool))?;
        let state = PoolState::unpack(&data)?;
        if !state.header.is_initialized() {
            return Err(BotError::UninitializedPool(pool));
        }
        Ok((pool, state))
    }

    async fn load_token_account(&self, address: &Pubkey) -> BotResult<spl_token::state::Account> {
        let data = self
            .ledger
            .account_data(address)
            .await?
            .ok_or(BotError::AccountUnavailable(*address))?;
        spl_token::state::Account::unpack(&data).map_err(|_| BotError::InvalidAccountData)
    }

    /**
    Derive a new pool and build its init and create instructions.

    `deposit_amounts[i]` is moved from `source_assets[i]`, all of which must be token accounts owned by
    `source_owner`. The pool and source owner token accounts which do not exist yet are created first.
    Each source account must hold a different mint, otherwise [`BotError::DuplicateAsset`] is returned.
    */
    #[allow(clippy::too_many_arguments)]
    pub async fn create_pool(
        &self,
        payer: &Pubkey,
        source_owner: &Pubkey,
        source_assets: &[Pubkey],
        signal_provider: &Pubkey,
        deposit_amounts: &[u64],
        markets: &[Pubkey],
        fee_collection_period: u64,
        fee_ratio: u64,
    ) -> BotResult<CreatedPool> {
        if deposit_amounts.len() != source_assets.len() {
            return Err(BotError::MalformedLength {
                expected: source_assets.len(),
                actual: deposit_amounts.len(),
            });
        }
        let number_of_markets = u16::try_from(markets.len()).map_err(|_| BotError::Overflow {
            value: markets.len() as u128,
            width_bytes: 2,
        })?;

        let mut mints = Vec::with_capacity(source_assets.len());
        for source in source_assets {
            let data = self
                .ledger
                .account_data(source)
                .await?
                .ok_or(BotError::SourceAssetUnavailable(*source))?;
            let account = spl_token::state::Account::unpack(&data)
                .map_err(|_| BotError::SourceAssetUnavailable(*source))?;
            if mints.contains(&account.mint) {
                return Err(BotError::DuplicateAsset(account.mint));
            }
            mints.push(account.mint);
        }

        let addresses = self.deriver.derive_bumped(&mut rand::thread_rng())?;
        let mut instructions = vec![instruction::init(
            self.config.program_id,
            init::Accounts {
                system_program: &system_program::id(),
                rent_sysvar: &sysvar::rent::id(),
                spl_token_program: &self.config.token_program_id,
                pool: &addresses.pool,
                mint: &addresses.mint,
                payer,
            },
            &init::Params {
                pool_seed: addresses.seed,
                max_number_of_assets: self.config.max_number_of_assets,
                number_of_markets,
            },
        )?];

        let mut pool_assets = Vec::with_capacity(mints.len());
        for mint in &mints {
            pool_assets.push(
                self.bootstrap_token_account(payer, &addresses.pool, mint, &mut instructions)
                    .await?,
            );
        }
        let target_pool_token = self
            .bootstrap_token_account(payer, source_owner, &addresses.mint, &mut instructions)
            .await?;

        instructions.push(instruction::create(
            self.config.program_id,
            create::Accounts {
                spl_token_program: &self.config.token_program_id,
                clock_sysvar: &sysvar::clock::id(),
                mint: &addresses.mint,
                target_pool_token: &target_pool_token,
                pool: &addresses.pool,
                pool_assets: &pool_assets,
                source_owner,
                source_assets,
            },
            &create::Params {
                pool_seed: addresses.seed,
                venue_program_id: self.config.venue_program_id,
                signal_provider: *signal_provider,
                fee_collection_period,
                fee_ratio,
                markets: markets.to_vec(),
                deposit_amounts: deposit_amounts.to_vec(),
            },
        )?);

        tracing::info!(
            pool = %addresses.pool,
            mint = %addresses.mint,
            instructions = instructions.len(),
            "Assembled pool creation"
        );
        Ok(CreatedPool {
            seed: addresses.seed,
            pool: addresses.pool,
            mint: addresses.mint,
            instructions,
        })
    }

    /**
    Buy `pool_token_amount` pool tokens with the `source_owner` token accounts of every pool asset.

    Only the depositor's pool token account is created when missing. The signal provider, fee and burn
    pool token accounts are referenced as they are, their creation is left to [`PoolClient::collect_fees`].
    */
    pub async fn deposit(
        &self,
        payer: &Pubkey,
        source_owner: &Pubkey,
        seed: &[u8; 32],
        pool_token_amount: u64,
    ) -> BotResult<Vec<Instruction>> {
        let (pool, state) = self.load_pool(seed).await?;
        let mint = self.deriver.mint_address(seed)?;
        let mints = state.asset_mints();
        let pool_assets: Vec<Pubkey> = mints.iter().map(|m| self.token_account(&pool, m)).collect();
        let source_assets: Vec<Pubkey> = mints
            .iter()
            .map(|m| self.token_account(source_owner, m))
            .collect();

        let mut instructions = vec![];
        let target_pool_token = self
            .bootstrap_token_account(payer, source_owner, &mint, &mut instructions)
            .await?;
        instructions.push(instruction::deposit(
            self.config.program_id,
            deposit::Accounts {
                spl_token_program: &self.config.token_program_id,
                mint: &mint,
                target_pool_token: &target_pool_token,
                signal_provider_pool_token: &self.token_account(&state.header.signal_provider, &mint),
                fee_pool_token: &self.token_account(&self.config.fee_owner, &mint),
                burn_pool_token: &self.token_account(&self.config.burn_owner, &mint),
                pool: &pool,
                pool_assets: &pool_assets,
                source_owner,
                source_assets: &source_assets,
            },
            &deposit::Params {
                pool_seed: *seed,
                pool_token_amount,
            },
        )?);

        tracing::info!(%pool, instructions = instructions.len(), "Assembled deposit");
        Ok(instructions)
    }

    /**
    Place an order for the pool on one of its authorized markets.

    A bid pays with the market's price coin and receives its coin, an ask does the opposite. When the pool
    does not hold the received asset yet, it is appended to the asset list: its index is the current
    length of the list.
    */
    pub async fn create_order(
        &self,
        payer: &Pubkey,
        seed: &[u8; 32],
        request: &OrderRequest,
    ) -> BotResult<OrderSubmission> {
        let (pool, state) = self.load_pool(seed).await?;
        let market_index = state
            .market_index(&request.market)
            .ok_or(BotError::UnauthorizedMarket(request.market))?;
        let market = self.venue.market(&request.market).await?;
        let (source_mint, target_mint) = match request.side {
            Side::Bid => (market.pc_mint, market.coin_mint),
            Side::Ask => (market.coin_mint, market.pc_mint),
        };
        let source_asset_index = state
            .asset_index(&source_mint)
            .ok_or(BotError::UnknownPoolAsset(source_mint))?;
        let target_asset_index = state.asset_index(&target_mint).unwrap_or(state.assets.len());

        let open_orders = Keypair::new();
        let order_tracker = self
            .deriver
            .order_tracker_address(seed, &open_orders.pubkey())?;
        let venue_program_id = state.header.venue_program_id;
        let lamports = self.ledger.minimum_balance(self.config.open_orders_len).await?;
        let mut instructions = vec![system_instruction::create_account(
            payer,
            &open_orders.pubkey(),
            lamports,
            self.config.open_orders_len as u64,
            &venue_program_id,
        )];
        self.bootstrap_token_account(payer, &pool, &target_mint, &mut instructions)
            .await?;

        instructions.push(instruction::create_order(
            self.config.program_id,
            create_order::Accounts {
                signal_provider: &state.header.signal_provider,
                market: &request.market,
                payer_pool_asset: &self.token_account(&pool, &source_mint),
                open_orders: &open_orders.pubkey(),
                request_queue: &market.request_queue,
                pool: &pool,
                coin_vault: &market.coin_vault,
                pc_vault: &market.pc_vault,
                spl_token_program: &self.config.token_program_id,
                rent_sysvar: &sysvar::rent::id(),
                venue_program: &venue_program_id,
                referrer: request.referrer.as_ref(),
            },
            &create_order::Params {
                pool_seed: *seed,
                side: request.side,
                limit_price: request.limit_price,
                max_quantity: request.max_quantity,
                order_type: request.order_type,
                client_id: request.client_id,
                self_trade_behavior: request.self_trade_behavior,
                source_index: source_asset_index as u64,
                target_index: target_asset_index as u64,
                market_index: market_index as u16,
                coin_lot_size: market.coin_lot_size,
                pc_lot_size: market.pc_lot_size,
                target_mint: target_mint.to_bytes(),
            },
        )?);

        tracing::info!(
            %pool,
            open_orders = %open_orders.pubkey(),
            source_asset_index,
            target_asset_index,
            instructions = instructions.len(),
            "Assembled order creation"
        );
        Ok(OrderSubmission {
            open_orders,
            order_tracker,
            source_asset_index: source_asset_index as u64,
            target_asset_index: target_asset_index as u64,
            instructions,
        })
    }

    /**
    Cancel the order held in the first slot of `open_orders`.

    The side is read off the order id: the high bit of its eighth byte is set for bids. A disagreement
    with the venue's bid bitmap is logged but does not change the side sent.
    */
    pub async fn cancel_order(
        &self,
        seed: &[u8; 32],
        market: &Pubkey,
        open_orders: &Pubkey,
    ) -> BotResult<Vec<Instruction>> {
        let (pool, state) = self.load_pool(seed).await?;
        let market_info = self.venue.market(market).await?;
        let orders = self.venue.open_orders(open_orders).await?;
        let order_id = orders
            .first_order()
            .ok_or(BotError::NoOpenOrder(*open_orders))?;
        let side = side_from_order_id(order_id);
        if (side == Side::Bid) != orders.slot_is_bid(0) {
            tracing::warn!(
                %open_orders,
                %order_id,
                ?side,
                "The order id side disagrees with the venue's bid bitmap"
            );
        }

        let instructions = vec![instruction::cancel_order(
            self.config.program_id,
            cancel_order::Accounts {
                signal_provider: &state.header.signal_provider,
                market,
                open_orders,
                request_queue: &market_info.request_queue,
                pool: &pool,
                venue_program: &state.header.venue_program_id,
            },
            &cancel_order::Params {
                pool_seed: *seed,
                side,
                order_id,
            },
        )?];
        tracing::info!(%pool, %order_id, ?side, "Assembled order cancellation");
        Ok(instructions)
    }

    /// Move the funds released by the venue back into the pool asset accounts.
    pub async fn settle_funds(
        &self,
        seed: &[u8; 32],
        market: &Pubkey,
        open_orders: &Pubkey,
        referrer: Option<&Pubkey>,
    ) -> BotResult<Vec<Instruction>> {
        let (pool, state) = self.load_pool(seed).await?;
        let MarketInfo {
            coin_mint,
            pc_mint,
            coin_vault,
            pc_vault,
            vault_signer_nonce,
            ..
        } = self.venue.market(market).await?;
        let coin_index = state
            .asset_index(&coin_mint)
            .ok_or(BotError::UnknownPoolAsset(coin_mint))?;
        let pc_index = state
            .asset_index(&pc_mint)
            .ok_or(BotError::UnknownPoolAsset(pc_mint))?;
        let venue_program_id = state.header.venue_program_id;
        let vault_signer =
            self.deriver
                .vault_signer_address(market, vault_signer_nonce, &venue_program_id)?;

        let instructions = vec![instruction::settle_funds(
            self.config.program_id,
            settle_funds::Accounts {
                market,
                open_orders,
                pool: &pool,
                mint: &self.deriver.mint_address(seed)?,
                coin_vault: &coin_vault,
                pc_vault: &pc_vault,
                coin_pool_asset: &self.token_account(&pool, &coin_mint),
                pc_pool_asset: &self.token_account(&pool, &pc_mint),
                vault_signer: &vault_signer,
                spl_token_program: &self.config.token_program_id,
                venue_program: &venue_program_id,
                referrer,
            },
            &settle_funds::Params {
                pool_seed: *seed,
                pc_index: pc_index as u64,
                coin_index: coin_index as u64,
            },
        )?];
        tracing::info!(%pool, coin_index, pc_index, "Assembled settlement");
        Ok(instructions)
    }

    /// Burn `pool_token_amount` pool tokens of `source_owner` in exchange for a share of every pool asset.
    ///
    /// Refused while the pool has orders in flight.
    pub async fn redeem(
        &self,
        payer: &Pubkey,
        source_owner: &Pubkey,
        seed: &[u8; 32],
        pool_token_amount: u64,
    ) -> BotResult<Vec<Instruction>> {
        let (pool, state) = self.load_pool(seed).await?;
        let pending = state.header.status.pending_orders();
        if pending > 0 {
            return Err(BotError::PendingOrders(pending));
        }
        let mint = self.deriver.mint_address(seed)?;
        let mut instructions = vec![];
        let mut pool_assets = Vec::with_capacity(state.assets.len());
        let mut target_assets = Vec::with_capacity(state.assets.len());
        for asset_mint in state.asset_mints() {
            pool_assets.push(self.token_account(&pool, &asset_mint));
            target_assets.push(
                self.bootstrap_token_account(payer, source_owner, &asset_mint, &mut instructions)
                    .await?,
            );
        }

        instructions.push(instruction::redeem(
            self.config.program_id,
            redeem::Accounts {
                spl_token_program: &self.config.token_program_id,
                clock_sysvar: &sysvar::clock::id(),
                mint: &mint,
                source_owner,
                source_pool_token: &self.token_account(source_owner, &mint),
                pool: &pool,
                pool_assets: &pool_assets,
                target_assets: &target_assets,
            },
            &redeem::Params {
                pool_seed: *seed,
                pool_token_amount,
            },
        )?);
        tracing::info!(%pool, instructions = instructions.len(), "Assembled redemption");
        Ok(instructions)
    }

    /// Mint the accrued fees, creating the missing fee receiving accounts first.
    ///
    /// This is the only workflow creating the signal provider, fee and burn pool token accounts.
    pub async fn collect_fees(&self, payer: &Pubkey, seed: &[u8; 32]) -> BotResult<Vec<Instruction>> {
        let (pool, state) = self.load_pool(seed).await?;
        let mint = self.deriver.mint_address(seed)?;
        let mut instructions = vec![];
        let signal_provider_pool_token = self
            .bootstrap_token_account(payer, &state.header.signal_provider, &mint, &mut instructions)
            .await?;
        let fee_pool_token = self
            .bootstrap_token_account(payer, &self.config.fee_owner, &mint, &mut instructions)
            .await?;
        let burn_pool_token = self
            .bootstrap_token_account(payer, &self.config.burn_owner, &mint, &mut instructions)
            .await?;

        instructions.push(instruction::collect_fees(
            self.config.program_id,
            collect_fees::Accounts {
                spl_token_program: &self.config.token_program_id,
                clock_sysvar: &sysvar::clock::id(),
                pool: &pool,
                mint: &mint,
                signal_provider_pool_token: &signal_provider_pool_token,
                fee_pool_token: &fee_pool_token,
                burn_pool_token: &burn_pool_token,
            },
            &collect_fees::Params { pool_seed: *seed },
        )?);
        tracing::info!(%pool, instructions = instructions.len(), "Assembled fee collection");
        Ok(instructions)
    }

    /// Read and decode the pool account of `seed`.
    pub async fn fetch_pool_info(&self, seed: &[u8; 32]) -> BotResult<PoolInfo> {
        let (address, state) = self.load_pool(seed).await?;
        Ok(PoolInfo {
            seed: *seed,
            address,
            mint: self.deriver.mint_address(seed)?,
            state,
        })
    }

    /// The pool token supply and the balance of every pool asset account, in pool asset order.
    pub async fn fetch_pool_balances(&self, seed: &[u8; 32]) -> BotResult<(u64, Vec<u64>)> {
        let (pool, state) = self.load_pool(seed).await?;
        let mint = self.deriver.mint_address(seed)?;
        let mint_data = self
            .ledger
            .account_data(&mint)
            .await?
            .ok_or(BotError::AccountUnavailable(mint))?;
        let supply = spl_token::state::Mint::unpack(&mint_data)
            .map_err(|_| BotError::InvalidAccountData)?
            .supply;
        let mut balances = Vec::with_capacity(state.assets.len());
        for asset_mint in state.asset_mints() {
            let account = self
                .load_token_account(&self.token_account(&pool, &asset_mint))
                .await?;
            balances.push(account.amount);
        }
        Ok((supply, balances))
    }

    /// Seeds of the created pools, optionally restricted to those of one signal provider.
    pub async fn find_pool_seeds(&self, signal_provider: Option<&Pubkey>) -> BotResult<Vec<[u8; 32]>> {
        let accounts = self.ledger.program_accounts(&self.config.program_id).await?;
        let seeds = accounts
            .into_iter()
            .filter_map(|(address, data)| {
                let state = PoolState::unpack(&data).ok()?;
                let header = state.header;
                let matches_provider = signal_provider.map_or(true, |s| s == &header.signal_provider);
                let is_pool = self.deriver.pool_address(&header.seed).ok() == Some(address);
                (header.is_initialized() && matches_provider && is_pool).then_some(header.seed)
            })
            .collect();
        Ok(seeds)
    }

    /// The bookkeeping account the pool keeps for the order of `open_orders`, if it exists.
    pub async fn fetch_order_tracker(
        &self,
        seed: &[u8; 32],
        open_orders: &Pubkey,
    ) -> BotResult<Option<OrderTracker>> {
        let address = self.deriver.order_tracker_address(seed, open_orders)?;
        self.ledger
            .account_data(&address)
            .await?
            .map(|data| OrderTracker::unpack(&data))
            .transpose()
    }
}
