//! Whole-bitmap operations, a word at a time.

use std::ops::Not;

use super::Bitmap;
use crate::arch::Word;
use crate::error::BitmapError;

impl<W: Word> Bitmap<W> {
    fn zip_words<F>(&mut self, other: &Self, op: F) -> Result<(), BitmapError>
    where
        F: Fn(W, W) -> W,
    {
        if self.len != other.len {
            return Err(BitmapError::LengthMismatch {
                left: self.len,
                right: other.len,
            });
        }
        for (left, &right) in self.words.iter_mut().zip(&other.words) {
            *left = op(*left, right);
        }
        Ok(())
    }

    /// `self[n] = self[n] | other[n]` for every `n`.
    pub fn union_with(&mut self, other: &Self) -> Result<(), BitmapError> {
        self.zip_words(other, |l, r| l | r)
    }

    /// `self[n] = self[n] & other[n]` for every `n`.
    pub fn intersect_with(&mut self, other: &Self) -> Result<(), BitmapError> {
        self.zip_words(other, |l, r| l & r)
    }

    /// `self[n] = self[n] & !other[n]` for every `n`.
    pub fn difference_with(&mut self, other: &Self) -> Result<(), BitmapError> {
        // padding in `self` is already zero, so `!r` can't leak into it
        self.zip_words(other, |l, r| l & !r)
    }

    /// `self[n] = self[n] ^ other[n]` for every `n`.
    pub fn symmetric_difference_with(&mut self, other: &Self) -> Result<(), BitmapError> {
        self.zip_words(other, |l, r| l ^ r)
    }

    /// Flip every bit.
    pub fn invert(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.clear_padding();
    }
}

impl<W: Word> Not for Bitmap<W> {
    type Output = Self;

    fn not(mut self) -> Self {
        self.invert();
        self
    }
}
