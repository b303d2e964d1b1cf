//! Asset slots following the market list of a pool account.
use solana_program::pubkey::Pubkey;

/// One asset slot of a pool account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolAsset {
    #[allow(missing_docs)]
    pub mint_address: Pubkey,
    /// Amount held per pool token
    pub amount_in_token: u64,
}

impl PoolAsset {
    #[allow(missing_docs)]
    pub const LEN: usize = 40;

    #[allow(missing_docs)]
    pub fn unpack_from_slice(src: &[u8; PoolAsset::LEN]) -> Self {
        let (mint_address, amount) = arrayref::array_refs![src, 32, 8];
        Self {
            mint_address: Pubkey::new_from_array(*mint_address),
            amount_in_token: u64::from_le_bytes(*amount),
        }
    }

    #[allow(missing_docs)]
    pub fn pack_into_slice(&self, dst: &mut [u8; PoolAsset::LEN]) {
        let (mint_address, amount) = arrayref::mut_array_refs![dst, 32, 8];
        mint_address.copy_from_slice(self.mint_address.as_ref());
        *amount = self.amount_in_token.to_le_bytes();
    }

    /// Slots with an all-zero mint are free and never hold an asset.
    pub fn is_initialized(&self) -> bool {
        self.mint_address != Pubkey::default()
    }
}

/// Decode the asset slots of a pool, skipping the empty ones.
///
/// Surviving entries keep their relative order: their position in the returned list is the pool asset
/// index used by order instructions. A trailing partial slot is ignored.
pub fn unpack_assets(src: &[u8]) -> Vec<PoolAsset> {
    src.chunks_exact(PoolAsset::LEN)
        .map(|slot| PoolAsset::unpack_from_slice(arrayref::array_ref![slot, 0, PoolAsset::LEN]))
        .filter(PoolAsset::is_initialized)
        .collect()
}
