//! Minimal FITS support: a single primary HDU holding a 2-D image.
//!
//! Headers are read as 2880-byte blocks of 80-byte cards up to `END`. Pixel
//! data is big-endian in any of the standard `BITPIX` encodings and comes back
//! as `f64` after `BSCALE`/`BZERO` scaling. Writing always produces
//! `BITPIX = -64`.

pub mod errors;
pub mod header;
pub mod reader;
pub mod writer;

pub use errors::{FitsError, Result};
pub use header::{BitPix, Header, HeaderCard, HeaderValue};
pub use reader::{describe, read_header, read_primary_image, read_primary_image_from, FitsImage, HduSummary};
pub use writer::{write_primary_image, write_primary_image_to};

pub(crate) const CARD_SIZE: usize = 80;
pub(crate) const BLOCK_SIZE: usize = 2880;
pub(crate) const CARDS_PER_BLOCK: usize = BLOCK_SIZE / CARD_SIZE;
