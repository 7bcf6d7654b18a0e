use std::fmt;
use std::iter::FromIterator;
use std::ops::{Bound, Range, RangeBounds};

use log::{debug, trace};

use crate::arch::{split_index, words_for, Word};
use crate::error::BitmapError;

mod ops;

/// A fixed-length array of booleans, packed one per bit.
///
/// A `[bool; N]` costs `N * BOOL_SIZE` bytes; a bitmap costs `N / 8` (rounded up to a whole word).
///
/// Bit `n` is stored in word `n / W::BITS` at bit `n % W::BITS`,
/// counting from the least significant bit. This holds no matter the byte order of the host:
/// integers are opaque values, so `get(0)` is always `words()[0] & 1`.
/// The raw bytes only differ between hosts if you look at them directly with [`to_ne_bytes`].
///
/// [`to_ne_bytes`]: Bitmap::to_ne_bytes
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Bitmap<W: Word = u32> {
    words: Vec<W>,
    /// The number of valid bits.
    ///
    /// Usually not a multiple of `W::BITS`: the bits in the last word past `len`
    /// are never readable and are always kept zero.
    len: usize,
}

impl Bitmap {
    /// A bitmap of `len` bits, all false, backed by 32-bit words.
    pub fn new(len: usize) -> Self {
        Self::zeroed(len)
    }
}

impl<W: Word> Bitmap<W> {
    /// A bitmap of `len` bits, all false.
    pub fn zeroed(len: usize) -> Self {
        let words = words_for::<W>(len);
        debug!(
            "allocating {} words of {} bits for a bitmap of {} bits",
            words,
            W::BITS,
            len
        );
        Bitmap {
            words: vec![W::ZERO; words],
            len,
        }
    }

    /// The number of booleans in the bitmap.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of words backing the bitmap.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The backing words, in order.
    pub fn words(&self) -> &[W] {
        &self.words
    }

    /// Map the bit address n to its physical address (word, bit)
    fn addr(&self, n: usize) -> Result<(usize, u32), BitmapError> {
        if n >= self.len {
            return Err(BitmapError::IndexOutOfRange {
                index: n,
                len: self.len,
            });
        }
        Ok(split_index::<W>(n))
    }

    /// Read a bit that is already known to be in bounds.
    #[inline]
    fn bit(&self, n: usize) -> bool {
        let (word, bit) = split_index::<W>(n);
        self.words[word].bit(bit)
    }

    pub fn get(&self, n: usize) -> Result<bool, BitmapError> {
        let (word, bit) = self.addr(n)?;
        Ok(self.words[word].bit(bit))
    }

    pub fn set(&mut self, n: usize, value: bool) -> Result<(), BitmapError> {
        let (word, bit) = self.addr(n)?;
        let slot = &mut self.words[word];
        *slot = slot.with_bit(bit, value);
        trace!("set [{},{}] = {:b}", word, bit, *slot);
        Ok(())
    }

    /// Turn any range of bit indices into `start..end`, clamped to the bitmap.
    ///
    /// Bounds past the end are cut back to `len`,
    /// and a range that ends before it starts is empty.
    fn clamp<R: RangeBounds<usize>>(&self, range: R) -> Range<usize> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        let end = end.min(self.len);
        start.min(end)..end
    }

    /// Read every bit in `range` that exists.
    pub fn get_range<R: RangeBounds<usize>>(&self, range: R) -> Vec<bool> {
        self.clamp(range).map(|n| self.bit(n)).collect()
    }

    /// Write `values` to the bits in `range`, pairwise.
    ///
    /// Stops at whichever of the two runs out first;
    /// bits of `range` past the end of the bitmap are ignored.
    /// Returns the number of bits written.
    pub fn set_range<R, I>(&mut self, range: R, values: I) -> usize
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = bool>,
    {
        let mut written = 0;
        for (n, value) in self.clamp(range).zip(values) {
            let (word, bit) = split_index::<W>(n);
            self.words[word] = self.words[word].with_bit(bit, value);
            written += 1;
        }
        written
    }

    /// Append a bit to the end, growing the bitmap by one.
    pub fn push(&mut self, value: bool) {
        let (word, bit) = split_index::<W>(self.len);
        if word == self.words.len() {
            self.words.push(W::ZERO);
        }
        self.words[word] = self.words[word].with_bit(bit, value);
        self.len += 1;
    }

    pub fn iter(&self) -> Iter<'_, W> {
        Iter {
            bitmap: self,
            range: 0..self.len,
        }
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }

    /// Set every bit to `value`.
    pub fn fill(&mut self, value: bool) {
        let word = if value { W::MAX } else { W::ZERO };
        for slot in &mut self.words {
            *slot = word;
        }
        self.clear_padding();
    }

    /// Set every bit to false.
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// The number of bits that are true.
    pub fn count_ones(&self) -> usize {
        // padding is always zero, so there is no need to mask the last word
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// The number of bits that are false.
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    /// The backing words as little-endian bytes.
    ///
    /// Bit `n` of the bitmap is bit `n % 8` of byte `n / 8`.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * (W::BITS / 8) as usize);
        for &word in &self.words {
            word.extend_le_bytes(&mut bytes);
        }
        bytes
    }

    /// The backing words as they are laid out in memory on this host.
    ///
    /// On a big-endian host the bytes of each word come most significant first,
    /// so bit 0 of the bitmap ends up in the *last* byte of the first word.
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * (W::BITS / 8) as usize);
        for &word in &self.words {
            word.extend_ne_bytes(&mut bytes);
        }
        bytes
    }

    /// Zero the bits of the last word that are past `len`.
    fn clear_padding(&mut self) {
        let used = (self.len & W::ADDR_MASK) as u32;
        if used == 0 {
            // either there are no words, or the last word is completely full
            return;
        }
        if let Some(last) = self.words.last_mut() {
            *last = *last & W::low_mask(used);
        }
    }
}

/// An iterator over the bits of a [`Bitmap`], in index order.
#[derive(Clone, Debug)]
pub struct Iter<'a, W: Word> {
    bitmap: &'a Bitmap<W>,
    range: Range<usize>,
}

impl<W: Word> Iterator for Iter<'_, W> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.range.next().map(|n| self.bitmap.bit(n))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<W: Word> DoubleEndedIterator for Iter<'_, W> {
    fn next_back(&mut self) -> Option<bool> {
        self.range.next_back().map(|n| self.bitmap.bit(n))
    }
}

impl<W: Word> ExactSizeIterator for Iter<'_, W> {}

impl<'a, W: Word> IntoIterator for &'a Bitmap<W> {
    type Item = bool;
    type IntoIter = Iter<'a, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<W: Word> Extend<bool> for Bitmap<W> {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<W: Word> FromIterator<bool> for Bitmap<W> {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bitmap = Bitmap::default();
        bitmap.extend(iter);
        bitmap
    }
}

impl<W: Word> fmt::Debug for Bitmap<W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Bitmap[")?;
        for bit in self {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}
