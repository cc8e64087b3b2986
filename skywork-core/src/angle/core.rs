//! Core angle type.
//!
//! [`Angle`] stores radians and converts to the units catalogues use:
//! degrees for declination and hours for right ascension.
//!
//! ```
//! use skywork_core::Angle;
//!
//! let ra = Angle::from_hms(4.0, 6.6, 34.0);
//! assert!((ra.degrees() - 61.791666666666664).abs() < 1e-10);
//!
//! let dec = Angle::from_dms(-16.0, 36.5, 4.4);
//! assert!((dec.degrees() + 16.609555555555556).abs() < 1e-10);
//! ```

use crate::constants::{ARCSEC_PER_DEGREE, DEGREES_PER_HOUR, DEG_TO_RAD, RAD_TO_DEG};
use crate::convert::{dms2dec, hms2dec};

/// An angular measurement stored as radians.
///
/// `PartialEq`/`PartialOrd` compare the radian value; `Eq`/`Ord` are absent
/// because the value can be NaN.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Angle {
    rad: f64,
}

impl Angle {
    #[inline]
    pub const fn from_radians(rad: f64) -> Self {
        Self { rad }
    }

    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        Self {
            rad: deg * DEG_TO_RAD,
        }
    }

    /// Creates an angle from decimal hours (1h = 15°).
    #[inline]
    pub fn from_hours(h: f64) -> Self {
        Self::from_degrees(h * DEGREES_PER_HOUR)
    }

    #[inline]
    pub fn from_arcseconds(arcsec: f64) -> Self {
        Self::from_degrees(arcsec / ARCSEC_PER_DEGREE)
    }

    /// Creates an angle from sexagesimal right ascension fields.
    ///
    /// Same arithmetic as [`hms2dec`].
    #[inline]
    pub fn from_hms(h: f64, m: f64, s: f64) -> Self {
        Self::from_degrees(hms2dec(h, m, s))
    }

    /// Creates an angle from sexagesimal declination fields.
    ///
    /// Same arithmetic as [`dms2dec`]: the sign comes from `d` alone.
    #[inline]
    pub fn from_dms(d: f64, m: f64, s: f64) -> Self {
        Self::from_degrees(dms2dec(d, m, s))
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.rad
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.rad * RAD_TO_DEG
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.degrees() / DEGREES_PER_HOUR
    }

    #[inline]
    pub fn arcseconds(self) -> f64 {
        self.degrees() * ARCSEC_PER_DEGREE
    }

    #[inline]
    pub fn sin(self) -> f64 {
        libm::sin(self.rad)
    }

    #[inline]
    pub fn cos(self) -> f64 {
        libm::cos(self.rad)
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self {
            rad: self.rad.abs(),
        }
    }
}
