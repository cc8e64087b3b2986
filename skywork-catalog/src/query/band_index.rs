//! Declination-band index for cross-matching.
//!
//! Entries of the second catalogue are bucketed into horizontal bands of fixed
//! declination height. A great-circle separation is never smaller than the
//! declination difference, so a query with radius `r` around declination `δ`
//! only needs the bands overlapping `[δ − r, δ + r]`. Right ascension is not
//! pruned, which keeps wrap-around at 0h and the poles trivially correct.
//!
//! Within the scanned candidates the smallest distance wins and ties go to the
//! smallest id, which is exactly what the brute-force scan reports.

use super::crossmatch::CrossmatchResult;
use super::is_closer;
use crate::entry::Position;
use crate::errors::{CatalogError, Result};
use log::{debug, warn};
use skywork_core::angular_dist;

const DEC_MIN: f64 = -90.0;
const DEC_SPAN: f64 = 180.0;

/// Lower bound on the band height; it also caps the index at 10 800 bands.
pub const MIN_BAND_HEIGHT_DEG: f64 = 1.0 / 60.0;

/// Slack added to the band query so rounding in the haversine result can
/// never hide an entry sitting on a band edge.
const QUERY_PAD_DEG: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct DecBandIndex {
    band_height_deg: f64,
    positions: Vec<(f64, f64)>,
    bands: Vec<Vec<usize>>,
    /// Non-finite or out-of-range declinations; scanned for every query.
    unbanded: Vec<usize>,
}

impl DecBandIndex {
    /// Band height used when the caller gives none.
    pub fn band_height_for(radius_deg: f64) -> f64 {
        if radius_deg.is_finite() {
            radius_deg.max(MIN_BAND_HEIGHT_DEG)
        } else {
            DEC_SPAN
        }
    }

    /// Buckets `catalog` by declination.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidParameter`] unless `band_height_deg` is finite and
    /// at least [`MIN_BAND_HEIGHT_DEG`].
    pub fn build<P: Position>(catalog: &[P], band_height_deg: f64) -> Result<Self> {
        if !(band_height_deg.is_finite() && band_height_deg >= MIN_BAND_HEIGHT_DEG) {
            return Err(CatalogError::InvalidParameter {
                name: "band_height_deg",
                message: format!(
                    "must be finite and at least {:.6} deg, got {}",
                    MIN_BAND_HEIGHT_DEG, band_height_deg
                ),
            });
        }

        let band_count = ((DEC_SPAN / band_height_deg).ceil() as usize).max(1);
        let mut bands = vec![Vec::new(); band_count];
        let mut unbanded = Vec::new();
        let mut positions = Vec::with_capacity(catalog.len());

        for (index, entry) in catalog.iter().enumerate() {
            let (ra, dec) = entry.position();
            positions.push((ra, dec));
            if ra.is_finite() && (DEC_MIN..=DEC_MIN + DEC_SPAN).contains(&dec) {
                let band = band_of(dec, band_height_deg, band_count);
                bands[band].push(index);
            } else {
                unbanded.push(index);
            }
        }

        if !unbanded.is_empty() {
            warn!(
                "{} entries have a non-finite or out-of-range position and are scanned for every query",
                unbanded.len()
            );
        }
        debug!(
            "DecBandIndex: {} entries in {} bands of {:.4} deg, {} unbanded",
            positions.len(),
            band_count,
            band_height_deg,
            unbanded.len()
        );

        Ok(Self {
            band_height_deg,
            positions,
            bands,
            unbanded,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn band_height_deg(&self) -> f64 {
        self.band_height_deg
    }

    /// Nearest entry to `(ra, dec)` among those that could lie within
    /// `radius_deg`; `None` when no candidate exists.
    ///
    /// Returns a 0-based index.
    pub fn nearest_within(&self, ra: f64, dec: f64, radius_deg: f64) -> Option<(usize, f64)> {
        if radius_deg.is_nan() || radius_deg < 0.0 || !dec.is_finite() {
            return None;
        }

        let band_count = self.bands.len();
        // Outside [-90, 90] the declination difference no longer bounds the
        // haversine distance, so every band is a candidate.
        let (lo, hi) = if radius_deg.is_infinite() || dec.abs() > 90.0 {
            (0, band_count - 1)
        } else {
            (
                band_of(dec - radius_deg - QUERY_PAD_DEG, self.band_height_deg, band_count),
                band_of(dec + radius_deg + QUERY_PAD_DEG, self.band_height_deg, band_count),
            )
        };

        let candidates = self.bands[lo..=hi]
            .iter()
            .flatten()
            .chain(self.unbanded.iter());

        let mut best: Option<(usize, f64)> = None;
        for &index in candidates {
            let (ra2, dec2) = self.positions[index];
            let distance = angular_dist(ra2, dec2, ra, dec);
            best = match best {
                None => Some((index, distance)),
                Some((best_index, best_distance)) => {
                    let tie = distance == best_distance && index < best_index;
                    if is_closer(distance, best_distance) || tie {
                        Some((index, distance))
                    } else {
                        best
                    }
                }
            };
        }
        best
    }
}

fn band_of(dec: f64, height: f64, band_count: usize) -> usize {
    let raw = ((dec - DEC_MIN) / height).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(band_count - 1)
    }
}

/// Cross-match against a prebuilt [`DecBandIndex`].
///
/// Produces the same result as [`crossmatch`](super::crossmatch) on the
/// catalogue the index was built from.
pub fn crossmatch_indexed<P: Position>(
    cat1: &[P],
    index: &DecBandIndex,
    radius_deg: f64,
) -> CrossmatchResult {
    let mut result = CrossmatchResult::with_capacity(cat1.len());

    for (index1, entry) in cat1.iter().enumerate() {
        let (ra1, dec1) = entry.position();
        let nearest = index.nearest_within(ra1, dec1, radius_deg);
        result.decide(index1 + 1, nearest, radius_deg);
    }

    result
}
