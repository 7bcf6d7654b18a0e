use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl};

use super::CHAR_BIT;

/// An unsigned integer that can back a [`Bitmap`](crate::Bitmap).
///
/// Every implementor has a power-of-two width,
/// so addressing a bit is a shift and a mask instead of a division.
pub trait Word:
    Copy
    + Eq
    + Default
    + fmt::Debug
    + fmt::Binary
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + 'static
{
    /// A word with no bits set.
    const ZERO: Self;
    /// A word with only the least significant bit set.
    const ONE: Self;
    /// A word with every bit set.
    const MAX: Self;
    /// The width of the word in bits.
    const BITS: u32;
    /// `log2(BITS)`: how far to shift a bit index to get a word index.
    const ADDR_BITS: u32 = Self::BITS.trailing_zeros();
    /// `BITS - 1`: masks a bit index down to a position inside a word.
    const ADDR_MASK: usize = (Self::BITS - 1) as usize;

    /// Number of set bits.
    fn count_ones(self) -> u32;
    /// Append the bytes of this word, least significant byte first.
    fn extend_le_bytes(self, out: &mut Vec<u8>);
    /// Append the bytes of this word as they are laid out in host memory.
    fn extend_ne_bytes(self, out: &mut Vec<u8>);

    /// Whether bit `bit` is set.
    #[inline]
    fn bit(self, bit: u32) -> bool {
        self & (Self::ONE << bit) != Self::ZERO
    }

    /// Return a copy of this word with bit `bit` set to `value`.
    #[inline]
    fn with_bit(self, bit: u32, value: bool) -> Self {
        if value {
            // x | 1 = 1, x | 0 = x
            self | (Self::ONE << bit)
        } else {
            // x & 1 = x, x & 0 = 0
            self & !(Self::ONE << bit)
        }
    }

    /// A word with the lowest `bits` bits set.
    #[inline]
    fn low_mask(bits: u32) -> Self {
        if bits >= Self::BITS {
            Self::MAX
        } else {
            !(Self::MAX << bits)
        }
    }
}

macro_rules! impl_word {
    ($($int: ty),*) => {
        $(
            impl Word for $int {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$int>::MAX;
                const BITS: u32 = std::mem::size_of::<$int>() as u32 * CHAR_BIT;

                #[inline]
                fn count_ones(self) -> u32 {
                    <$int>::count_ones(self)
                }
                fn extend_le_bytes(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
                fn extend_ne_bytes(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64);
