//! Program address derivation for pools, pool token mints, order trackers and venue vault signers.
use rand::Rng;
use solana_program::pubkey::Pubkey;

use crate::error::{BotError, BotResult};

/// Discriminator appended to the pool seed to derive the pool token mint.
pub const MINT_DISCRIMINATOR: u8 = 1;

/// Source of program address derivations.
///
/// Both methods report an unusable derivation (on-curve point, or no bump found) as `None`.
pub trait AddressOracle {
    /// Find the first bump making `seeds` derive a valid address.
    fn find(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<(Pubkey, u8)>;
    /// Derive the address of `seeds` as they are.
    fn create(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<Pubkey>;
}

/// Derivations as performed by the ledger runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgramAddressOracle;

impl AddressOracle for ProgramAddressOracle {
    fn find(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<(Pubkey, u8)> {
        Pubkey::try_find_program_address(seeds, program_id)
    }

    fn create(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<Pubkey> {
        Pubkey::create_program_address(seeds, program_id).ok()
    }
}

/// The addresses of a freshly derived pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolAddresses {
    /// The last byte holds the bump of the pool address
    pub seed: [u8; 32],
    /// The pool account, derived from the full seed
    pub pool: Pubkey,
    /// The pool token mint
    pub mint: Pubkey,
}

/// Derives every program address of the pool program.
#[derive(Clone, Debug)]
pub struct AddressDeriver<O = ProgramAddressOracle> {
    /// The pool program
    pub program_id: Pubkey,
    /// Number of random seeds tried by [`AddressDeriver::derive_bumped`]
    pub max_attempts: u32,
    oracle: O,
}

impl AddressDeriver<ProgramAddressOracle> {
    /// A deriver using the runtime derivations.
    pub fn new(program_id: Pubkey, max_attempts: u32) -> Self {
        Self::with_oracle(program_id, max_attempts, ProgramAddressOracle)
    }
}

impl<O: AddressOracle> AddressDeriver<O> {
    /// A deriver backed by a custom [`AddressOracle`].
    pub fn with_oracle(program_id: Pubkey, max_attempts: u32, oracle: O) -> Self {
        Self {
            program_id,
            max_attempts,
            oracle,
        }
    }

    /// Search for a random pool seed.
    ///
    /// Each attempt draws 32 random bytes, finds the bump of the first 31 and stores it in the last byte,
    /// so that the whole seed derives the pool address on its own. The seed is only accepted when the
    /// mint derivation also yields a valid address. Fails with [`BotError::SeedSearchExhausted`] once
    /// `max_attempts` seeds have been rejected.
    pub fn derive_bumped<R: Rng + ?Sized>(&self, rng: &mut R) -> BotResult<PoolAddresses> {
        for attempt in 1..=self.max_attempts {
            let mut seed = [0u8; 32];
            rng.fill(&mut seed);
            let (pool, bump) = match self.oracle.find(&[&seed[..31]], &self.program_id) {
                Some(found) => found,
                None => {
                    tracing::debug!(attempt, "No bump found for the pool seed");
                    continue;
                }
            };
            seed[31] = bump;
            match self.mint_address(&seed) {
                Ok(mint) => {
                    tracing::debug!(attempt, %pool, %mint, "Found pool seed");
                    return Ok(PoolAddresses { seed, pool, mint });
                }
                Err(_) => tracing::debug!(attempt, "The mint derivation is invalid for the pool seed"),
            }
        }
        Err(BotError::SeedSearchExhausted {
            attempts: self.max_attempts,
        })
    }

    /// A single derivation from the full seed followed by a discriminator byte.
    pub fn derive_fixed(&self, seed: &[u8; 32], discriminator: u8) -> BotResult<Pubkey> {
        self.oracle
            .create(&[seed, &[discriminator]], &self.program_id)
            .ok_or(BotError::InvalidDerivation)
    }

    /// The pool account of a bumped seed.
    pub fn pool_address(&self, seed: &[u8; 32]) -> BotResult<Pubkey> {
        self.oracle
            .create(&[seed], &self.program_id)
            .ok_or(BotError::InvalidDerivation)
    }

    /// The pool token mint of a pool seed.
    pub fn mint_address(&self, seed: &[u8; 32]) -> BotResult<Pubkey> {
        self.derive_fixed(seed, MINT_DISCRIMINATOR)
    }

    /// The bookkeeping account of the order held by `open_orders`.
    pub fn order_tracker_address(&self, seed: &[u8; 32], open_orders: &Pubkey) -> BotResult<Pubkey> {
        self.oracle
            .find(&[seed, &open_orders.to_bytes()], &self.program_id)
            .map(|(address, _)| address)
            .ok_or(BotError::InvalidDerivation)
    }

    /// The authority of a venue market's vaults.
    pub fn vault_signer_address(
        &self,
        market: &Pubkey,
        nonce: u64,
        venue_program_id: &Pubkey,
    ) -> BotResult<Pubkey> {
        self.oracle
            .create(&[&market.to_bytes(), &nonce.to_le_bytes()], venue_program_id)
            .ok_or(BotError::InvalidDerivation)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    struct Rejecting {
        calls: Cell<u32>,
    }

    impl AddressOracle for Rejecting {
        fn find(&self, _seeds: &[&[u8]], _program_id: &Pubkey) -> Option<(Pubkey, u8)> {
            self.calls.set(self.calls.get() + 1);
            None
        }

        fn create(&self, _seeds: &[&[u8]], _program_id: &Pubkey) -> Option<Pubkey> {
            None
        }
    }

    /// Finds pool addresses but never a mint address.
    struct NoMint {
        calls: Cell<u32>,
    }

    impl AddressOracle for NoMint {
        fn find(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<(Pubkey, u8)> {
            self.calls.set(self.calls.get() + 1);
            ProgramAddressOracle.find(seeds, program_id)
        }

        fn create(&self, _seeds: &[&[u8]], _program_id: &Pubkey) -> Option<Pubkey> {
            None
        }
    }

    #[test]
    fn bumped_seed_derives_the_pool() {
        let deriver = AddressDeriver::new(Pubkey::new_unique(), 1_000);
        let mut rng = StdRng::seed_from_u64(42);
        let addresses = deriver.derive_bumped(&mut rng).unwrap();
        assert_eq!(deriver.pool_address(&addresses.seed).unwrap(), addresses.pool);
        assert_eq!(deriver.mint_address(&addresses.seed).unwrap(), addresses.mint);
        assert_eq!(
            deriver.derive_fixed(&addresses.seed, MINT_DISCRIMINATOR).unwrap(),
            addresses.mint
        );
        let (_, bump) = Pubkey::find_program_address(&[&addresses.seed[..31]], &deriver.program_id);
        assert_eq!(addresses.seed[31], bump);
    }

    #[test]
    fn fixed_derivations_are_deterministic() {
        let deriver = AddressDeriver::new(Pubkey::new_unique(), 1_000);
        let addresses = deriver.derive_bumped(&mut rand::thread_rng()).unwrap();
        let open_orders = Pubkey::new_unique();
        assert_eq!(
            deriver.order_tracker_address(&addresses.seed, &open_orders).unwrap(),
            deriver.order_tracker_address(&addresses.seed, &open_orders).unwrap()
        );
        assert_ne!(
            deriver.order_tracker_address(&addresses.seed, &open_orders).unwrap(),
            deriver.order_tracker_address(&addresses.seed, &Pubkey::new_unique()).unwrap()
        );
    }

    #[test]
    fn vault_signer() {
        let deriver = AddressDeriver::new(Pubkey::new_unique(), 1_000);
        let venue = Pubkey::new_unique();
        let market = Pubkey::new_unique();
        let nonce = (0..u64::MAX)
            .find(|n| Pubkey::create_program_address(&[&market.to_bytes(), &n.to_le_bytes()], &venue).is_ok())
            .unwrap();
        let expected =
            Pubkey::create_program_address(&[&market.to_bytes(), &nonce.to_le_bytes()], &venue).unwrap();
        assert_eq!(deriver.vault_signer_address(&market, nonce, &venue).unwrap(), expected);
    }

    #[test]
    fn seed_search_is_bounded() {
        let oracle = Rejecting {
            calls: Cell::new(0),
        };
        let deriver = AddressDeriver::with_oracle(Pubkey::new_unique(), 25, oracle);
        assert_eq!(
            deriver.derive_bumped(&mut rand::thread_rng()),
            Err(BotError::SeedSearchExhausted { attempts: 25 })
        );
        assert_eq!(deriver.oracle.calls.get(), 25);
    }

    #[test]
    fn missing_mint_rejects_the_seed() {
        let oracle = NoMint {
            calls: Cell::new(0),
        };
        let deriver = AddressDeriver::with_oracle(Pubkey::new_unique(), 7, oracle);
        assert_eq!(
            deriver.derive_bumped(&mut rand::thread_rng()),
            Err(BotError::SeedSearchExhausted { attempts: 7 })
        );
        assert_eq!(deriver.oracle.calls.get(), 7);
        assert_eq!(deriver.mint_address(&[0; 32]), Err(BotError::InvalidDerivation));
    }
}
