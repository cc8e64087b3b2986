//! Catalogue row types.
//!
//! Rows only need to yield a position in decimal degrees; the search code is
//! generic over [`Position`] so either row layout can sit on either side of a
//! match.

use serde::Serialize;
use skywork_core::{dms2dec, hms2dec};

/// A sky position in decimal degrees.
pub trait Position {
    fn ra_deg(&self) -> f64;
    fn dec_deg(&self) -> f64;

    #[inline]
    fn position(&self) -> (f64, f64) {
        (self.ra_deg(), self.dec_deg())
    }
}

/// A row written as `rah ram ras ded dem des`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SexagesimalEntry {
    pub ra_h: f64,
    pub ra_m: f64,
    pub ra_s: f64,
    pub dec_d: f64,
    pub dec_m: f64,
    pub dec_s: f64,
}

impl SexagesimalEntry {
    pub const FIELDS: usize = 6;

    pub fn new(fields: [f64; 6]) -> Self {
        let [ra_h, ra_m, ra_s, dec_d, dec_m, dec_s] = fields;
        Self {
            ra_h,
            ra_m,
            ra_s,
            dec_d,
            dec_m,
            dec_s,
        }
    }

    /// Builds an entry from the first six values of `fields`.
    pub fn from_slice(fields: &[f64]) -> Option<Self> {
        let fields: [f64; 6] = fields.get(..Self::FIELDS)?.try_into().ok()?;
        Some(Self::new(fields))
    }
}

impl Position for SexagesimalEntry {
    #[inline]
    fn ra_deg(&self) -> f64 {
        hms2dec(self.ra_h, self.ra_m, self.ra_s)
    }

    #[inline]
    fn dec_deg(&self) -> f64 {
        dms2dec(self.dec_d, self.dec_m, self.dec_s)
    }
}

/// A row already converted to decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeEntry {
    pub ra: f64,
    pub dec: f64,
}

impl DegreeEntry {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }
}

impl Position for DegreeEntry {
    #[inline]
    fn ra_deg(&self) -> f64 {
        self.ra
    }

    #[inline]
    fn dec_deg(&self) -> f64 {
        self.dec
    }
}

impl Position for (f64, f64) {
    #[inline]
    fn ra_deg(&self) -> f64 {
        self.0
    }

    #[inline]
    fn dec_deg(&self) -> f64 {
        self.1
    }
}

impl<P: Position + ?Sized> Position for &P {
    #[inline]
    fn ra_deg(&self) -> f64 {
        (**self).ra_deg()
    }

    #[inline]
    fn dec_deg(&self) -> f64 {
        (**self).dec_deg()
    }
}
