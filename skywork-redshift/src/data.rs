//! SDSS magnitudes and the colour features derived from them.

use crate::error::{Error, Result};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Colour indices `u−g, g−r, r−i, i−z`.
pub type Features = [f64; 4];

pub const FEATURE_NAMES: [&str; 4] = ["u-g", "g-r", "r-i", "i-z"];

/// One galaxy: five-band magnitudes and its spectroscopic redshift.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorRecord {
    pub u: f64,
    pub g: f64,
    pub r: f64,
    pub i: f64,
    pub z: f64,
    pub redshift: f64,
}

impl ColorRecord {
    pub fn features(&self) -> Features {
        [
            self.u - self.g,
            self.g - self.r,
            self.r - self.i,
            self.i - self.z,
        ]
    }
}

pub fn load_colors<P: AsRef<Path>>(path: P) -> Result<Vec<ColorRecord>> {
    let path = path.as_ref();
    let records = parse_colors(File::open(path)?)?;
    info!("Loaded {} galaxies from {:?}", records.len(), path);
    Ok(records)
}

/// Reads CSV with a header naming `u, g, r, i, z, redshift`; other columns
/// are ignored and column order does not matter.
pub fn parse_colors<R: Read>(reader: R) -> Result<Vec<ColorRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<ColorRecord>, csv::Error>>()?;

    if records.is_empty() {
        return Err(Error::Empty);
    }
    Ok(records)
}

pub fn get_features_targets(records: &[ColorRecord]) -> (Vec<Features>, Vec<f64>) {
    records.iter().map(|r| (r.features(), r.redshift)).unzip()
}
