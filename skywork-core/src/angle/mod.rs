mod core;
mod format;
mod ops;
mod parse;
#[cfg(feature = "serde")]
mod serde_;

pub use core::Angle;
pub use format::{format_dms, format_hms, DmsFmt, HmsFmt};
pub use parse::{parse_dms, parse_hms, AngleUnits, ParseAngle};
