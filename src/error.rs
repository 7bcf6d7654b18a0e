use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
/// Everything that can go wrong when addressing a [`Bitmap`](crate::Bitmap).
pub enum BitmapError {
    #[error("index {index} out of range for bitmap of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot combine bitmaps of different lengths ({left} and {right})")]
    LengthMismatch { left: usize, right: usize },
}
