//! Bit-level access to fixed-width edge payloads
//!
//! The Poly graph stores one relationship bitmask per edge slot. The payload is
//! the narrowest of `u8`/`u16`/`u32`/`u64` that holds every relationship bit.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::BitOr;

/// Bit operations over an unsigned edge payload.
///
/// Out-of-range bit indices are treated as unset: `is_set` returns `false` and
/// `set`/`unset` return the value unchanged.
pub trait DataIndexer:
    Copy + Eq + Hash + Default + Debug + BitOr<Output = Self> + Send + Sync + 'static
{
    /// Number of usable bits
    const BITS: u32;

    /// Payload with no bits set
    fn empty() -> Self;

    fn set(self, bit: u32) -> Self;

    fn unset(self, bit: u32) -> Self;

    fn is_set(self, bit: u32) -> bool;

    /// Highest usable bit index (bit width - 1)
    fn max_idx() -> u32 {
        Self::BITS - 1
    }
}

macro_rules! impl_data_indexer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DataIndexer for $ty {
                const BITS: u32 = <$ty>::BITS;

                #[inline]
                fn empty() -> Self {
                    0
                }

                #[inline]
                fn set(self, bit: u32) -> Self {
                    match (1 as $ty).checked_shl(bit) {
                        Some(mask) => self | mask,
                        None => self,
                    }
                }

                #[inline]
                fn unset(self, bit: u32) -> Self {
                    match (1 as $ty).checked_shl(bit) {
                        Some(mask) => self & !mask,
                        None => self,
                    }
                }

                #[inline]
                fn is_set(self, bit: u32) -> bool {
                    match (1 as $ty).checked_shl(bit) {
                        Some(mask) => self & mask != 0,
                        None => false,
                    }
                }
            }
        )*
    };
}

impl_data_indexer!(u8, u16, u32, u64);

/// Payload width chosen for a Poly graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadWidth {
    U8,
    U16,
    U32,
    U64,
}

impl PayloadWidth {
    /// Smallest width with at least `bits` bits, `None` beyond 64.
    pub fn for_bits(bits: u32) -> Option<Self> {
        match bits {
            0..=8 => Some(PayloadWidth::U8),
            9..=16 => Some(PayloadWidth::U16),
            17..=32 => Some(PayloadWidth::U32),
            33..=64 => Some(PayloadWidth::U64),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            PayloadWidth::U8 => u8::BITS,
            PayloadWidth::U16 => u16::BITS,
            PayloadWidth::U32 => u32::BITS,
            PayloadWidth::U64 => u64::BITS,
        }
    }

    pub fn bytes(&self) -> usize {
        (self.bits() / 8) as usize
    }
}
