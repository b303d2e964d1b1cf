//! Fixed-width little-endian integer encoding shared by the instruction encoder and the account parsers.
use solana_program::pubkey::Pubkey;

use crate::error::{BotError, BotResult};

/// Supported integer widths, valued by their byte count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Width {
    U8 = 1,
    U16 = 2,
    U32 = 4,
    U64 = 8,
    U128 = 16,
}

impl Width {
    /// Number of bytes taken by an encoded value.
    pub const fn len(self) -> usize {
        self as usize
    }

    /// Largest value representable at this width.
    pub const fn max_value(self) -> u128 {
        match self {
            Width::U8 => u8::MAX as u128,
            Width::U16 => u16::MAX as u128,
            Width::U32 => u32::MAX as u128,
            Width::U64 => u64::MAX as u128,
            Width::U128 => u128::MAX,
        }
    }
}

/// Encode `value` on exactly `width` bytes, little-endian.
///
/// Values which do not fit are rejected rather than truncated.
pub fn encode(value: u128, width: Width) -> BotResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(width.len());
    write(&mut buf, value, width)?;
    Ok(buf)
}

/// Append the encoding of `value` to `buf`.
pub fn write(buf: &mut Vec<u8>, value: u128, width: Width) -> BotResult {
    if value > width.max_value() {
        return Err(BotError::Overflow {
            value,
            width_bytes: width.len(),
        });
    }
    buf.extend_from_slice(&value.to_le_bytes()[..width.len()]);
    Ok(())
}

/// Decode the first `width` bytes of `src`. Extra bytes are ignored.
pub fn decode(src: &[u8], width: Width) -> BotResult<u128> {
    let bytes = src.get(..width.len()).ok_or(BotError::MalformedLength {
        expected: width.len(),
        actual: src.len(),
    })?;
    let mut le = [0u8; 16];
    le[..width.len()].copy_from_slice(bytes);
    Ok(u128::from_le_bytes(le))
}

fn tail(src: &[u8], offset: usize, width: usize) -> BotResult<&[u8]> {
    src.get(offset..offset + width)
        .ok_or(BotError::MalformedLength {
            expected: offset + width,
            actual: src.len(),
        })
}

/// Read the byte at `offset`.
pub fn read_u8(src: &[u8], offset: usize) -> BotResult<u8> {
    Ok(decode(tail(src, offset, 1)?, Width::U8)? as u8)
}

/// Read a little-endian u16 starting at `offset`.
pub fn read_u16(src: &[u8], offset: usize) -> BotResult<u16> {
    Ok(decode(tail(src, offset, 2)?, Width::U16)? as u16)
}

/// Read a little-endian u64 starting at `offset`.
pub fn read_u64(src: &[u8], offset: usize) -> BotResult<u64> {
    Ok(decode(tail(src, offset, 8)?, Width::U64)? as u64)
}

/// Read the 32 bytes of a public key starting at `offset`.
pub fn read_pubkey(src: &[u8], offset: usize) -> BotResult<Pubkey> {
    let bytes = tail(src, offset, 32)?;
    let mut key = [0u8; 32];
    key.copy_from_slice(bytes);
    Ok(Pubkey::new_from_array(key))
}
