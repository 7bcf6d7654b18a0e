#![warn(missing_docs)]
//! Facts about the platform this crate was compiled for.

use std::mem;

use target_lexicon::{Endianness, Triple};

mod word;
pub use word::Word;

/// Size of a `bool` in bytes
///
/// This is `sizeof(bool)` on the host ABI, as reported by the compiler.
pub const BOOL_SIZE: usize = mem::size_of::<bool>();

/// Number of bits in a byte
pub const CHAR_BIT: u32 = 8;

/// The target triple for the host.
///
/// A "target triple" is used to represent information about a compiler target.
/// Traditionaly, the target triple uses this format: `<architecture>-<vendor>-<operating system>`
/// The target triple is represented as a struct and contains additional
/// information like ABI and endianness.
pub const TARGET: Triple = Triple::host();

/// The byte order of the host.
///
/// Falls back to what rustc says about the build target if the triple
/// doesn't carry an endianness (e.g. `unknown`).
pub fn host_endianness() -> Endianness {
    TARGET.endianness().unwrap_or(if cfg!(target_endian = "big") {
        Endianness::Big
    } else {
        Endianness::Little
    })
}

/// How many `W` words are needed to hold `bits` bits.
pub fn words_for<W: Word>(bits: usize) -> usize {
    // integer division, but taking the ceiling instead of the floor
    // https://stackoverflow.com/a/17974/7669110
    (bits + W::ADDR_MASK) >> W::ADDR_BITS
}

/// Map a bit address to its physical address `(word, bit)`.
///
/// Bit 0 of a word is always its least significant bit,
/// regardless of the byte order of the host.
#[inline]
pub fn split_index<W: Word>(n: usize) -> (usize, u32) {
    (n >> W::ADDR_BITS, (n & W::ADDR_MASK) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_size_comes_from_the_compiler() {
        assert_eq!(BOOL_SIZE, mem::size_of::<bool>());
        assert_eq!(BOOL_SIZE, mem::size_of_val(&true));
        assert!(mem::align_of::<bool>() <= BOOL_SIZE);
    }

    #[test]
    fn endianness_matches_rustc() {
        let expected = if cfg!(target_endian = "little") {
            Endianness::Little
        } else {
            Endianness::Big
        };
        assert_eq!(host_endianness(), expected);
    }

    #[test]
    fn word_counts() {
        assert_eq!(words_for::<u32>(0), 0);
        assert_eq!(words_for::<u32>(1), 1);
        assert_eq!(words_for::<u32>(32), 1);
        assert_eq!(words_for::<u32>(33), 2);
        assert_eq!(words_for::<u8>(235), 30);
        assert_eq!(words_for::<u64>(235), 4);
        for bits in 0..300 {
            let expected = (bits + 15) / 16;
            assert_eq!(words_for::<u16>(bits), expected);
        }
    }

    #[test]
    fn physical_address() {
        assert_eq!(split_index::<u32>(0), (0, 0));
        assert_eq!(split_index::<u32>(31), (0, 31));
        assert_eq!(split_index::<u32>(32), (1, 0));
        assert_eq!(split_index::<u8>(17), (2, 1));
        assert_eq!(split_index::<u64>(130), (2, 2));
    }
}
