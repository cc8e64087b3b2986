//! Nearest-neighbour queries over in-memory catalogues.
//!
//! - [`closest`]: single-target linear scan
//! - [`crossmatch`]: match every row of one catalogue against another
//! - [`band_index`]: declination bands that restrict the scan without
//!   changing its result

pub mod band_index;
pub mod closest;
pub mod crossmatch;

pub use band_index::{crossmatch_indexed, DecBandIndex};
pub use closest::find_closest;
pub use crossmatch::{
    crossmatch, run_crossmatch, write_matches_csv, CrossmatchParams, CrossmatchResult,
    CrossmatchStrategy, Match,
};

/// Ordering used by every scan: strictly smaller wins, and NaN never beats a
/// number. A NaN best is replaced by the first finite distance.
#[inline]
pub(crate) fn is_closer(candidate: f64, best: f64) -> bool {
    candidate < best || (best.is_nan() && !candidate.is_nan())
}
