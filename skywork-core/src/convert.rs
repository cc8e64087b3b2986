//! Sexagesimal field conversion.
//!
//! Catalogues such as the BSS radio survey store positions as six numbers per
//! row: `rah ram ras ded dem des`. These helpers fold each triple into decimal
//! degrees with plain `f64` arithmetic, in exactly the order written, so the
//! results are bit-for-bit reproducible across loaders.

use crate::constants::{DEGREES_PER_HOUR, MINUTES_PER_UNIT, SECONDS_PER_UNIT};

/// Converts right ascension in hours, minutes, seconds to degrees.
///
/// No range checks are applied; out-of-range or negative fields pass through
/// arithmetically.
///
/// ```
/// use skywork_core::hms2dec;
///
/// assert!((hms2dec(4.0, 6.6, 34.0) - 61.791666666666664).abs() < 1e-12);
/// ```
#[inline]
pub fn hms2dec(h: f64, m: f64, s: f64) -> f64 {
    DEGREES_PER_HOUR * (h + m / MINUTES_PER_UNIT + s / SECONDS_PER_UNIT)
}

/// Converts declination in degrees, arcminutes, arcseconds to degrees.
///
/// The sign of the whole angle comes from `d` alone: minutes and seconds are
/// always added to `|d|`. A declination of `-00° 30'` therefore cannot be
/// expressed through `d`; use [`parse_dms`](crate::parse_dms) on the string
/// form instead.
///
/// ```
/// use skywork_core::dms2dec;
///
/// assert!((dms2dec(-16.0, 36.5, 4.4) - (-16.609555555555556)).abs() < 1e-12);
/// assert!((dms2dec(22.0, 57.0, 18.0) - 22.955).abs() < 1e-12);
/// ```
#[inline]
pub fn dms2dec(d: f64, m: f64, s: f64) -> f64 {
    if d < 0.0 {
        -(d.abs() + m / MINUTES_PER_UNIT + s / SECONDS_PER_UNIT)
    } else {
        d + m / MINUTES_PER_UNIT + s / SECONDS_PER_UNIT
    }
}
