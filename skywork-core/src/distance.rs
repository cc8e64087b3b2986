//! Great-circle separation between two sky positions.

use crate::angle::Angle;

/// Angular distance in degrees between `(ra1, dec1)` and `(ra2, dec2)`.
///
/// Uses the haversine form, which stays accurate for the arcsecond-scale
/// separations that catalogue cross-matching cares about:
///
/// ```text
/// a = sin²(|dec1 − dec2| / 2)
/// b = cos(dec1) · cos(dec2) · sin²(|ra1 − ra2| / 2)
/// d = 2 · asin(√(a + b))
/// ```
///
/// The result lies in `[0, 180]`. Non-finite inputs yield NaN, which never
/// compares less than anything; callers scanning for a minimum therefore treat
/// such rows as never-closer.
///
/// ```
/// use skywork_core::angular_dist;
///
/// let d = angular_dist(10.2, 12.3, 6.4, -8.8);
/// assert!((d - 21.435312977951494).abs() < 1e-10);
/// ```
#[inline]
pub fn angular_dist(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    let (ra1, dec1) = (Angle::from_degrees(ra1), Angle::from_degrees(dec1));
    let (ra2, dec2) = (Angle::from_degrees(ra2), Angle::from_degrees(dec2));

    let half_ddec = (dec1 - dec2).abs() / 2.0;
    let half_dra = (ra1 - ra2).abs() / 2.0;

    let a = half_ddec.sin().powi(2);
    let b = dec1.cos() * dec2.cos() * half_dra.sin().powi(2);

    // Rounding can push a + b a hair above 1 for antipodal points.
    let h = (a + b).min(1.0);
    (Angle::from_radians(libm::asin(libm::sqrt(h))) * 2.0).degrees()
}
