//! FITS images and stacking.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`fits`] | Primary-HDU reader/writer and header cards |
//! | [`stack`] | Mean and median stacking of aligned 2-D images |
//! | [`signal`] | 1-D Gaussian pulse, noisy copies and their mean |
//!
//! ```ignore
//! use skywork_images::{brightest_pixel, StackMethod, StackParams};
//!
//! let stacked = StackParams::new("big_dataset_for_stacking", 1000)
//!     .with_method(StackMethod::Mean)
//!     .run()?;
//! if let Some((row, col, value)) = brightest_pixel(&stacked) {
//!     println!("peak {value} at ({row}, {col})");
//! }
//! ```

pub mod errors;
pub mod fits;
pub mod signal;
pub mod stack;

pub use errors::{Result, StackError};
pub use fits::{
    describe, read_primary_image, write_primary_image, BitPix, FitsError, FitsImage, HduSummary,
};
pub use signal::{gaussian_signal, mean_stack_1d, noisy_copies, rms_error};
pub use stack::{
    brightest_pixel, mean_stack, median_stack, stack, stack_files, StackMethod, StackParams,
};
