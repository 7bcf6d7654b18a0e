//! How wide is a `bool`, and how to make it narrower.
//!
//! [`write_report`] prints the storage width of `bool` on the host.
//! [`Bitmap`] stores one boolean per bit instead of one per [`arch::BOOL_SIZE`] bytes.
#![warn(variant_size_differences)]
#![warn(unreachable_pub)]
#![warn(deprecated_in_future)]
#![forbid(unsafe_code)]

pub mod arch;
mod bitmap;
mod error;
mod report;

pub use bitmap::{Bitmap, Iter};
pub use error::BitmapError;
pub use report::{bool_size_line, write_report, REPORT_PREFIX};
