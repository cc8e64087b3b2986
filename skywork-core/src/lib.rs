//! Angles, sexagesimal conversion and angular separation.
//!
//! `skywork-core` holds the arithmetic shared by the rest of the workspace:
//! turning catalogue coordinates written as hours/minutes/seconds and
//! degrees/arcminutes/arcseconds into decimal degrees, and measuring the
//! great-circle distance between two sky positions.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`convert`] | [`hms2dec`] and [`dms2dec`] on raw numeric fields |
//! | [`angle`] | [`Angle`] type, sexagesimal parsing ([`AngleUnits`]) and formatting |
//! | [`distance`] | Haversine [`angular_dist`] |
//! | [`constants`] | Unit conversion factors |
//! | [`errors`] | [`SkyError`] and [`SkyResult`] |
//!
//! # Quick Start
//!
//! ```
//! use skywork_core::{angular_dist, dms2dec, hms2dec};
//!
//! let ra = hms2dec(23.0, 12.0, 6.0);
//! let dec = dms2dec(-66.0, 5.0, 5.1);
//! assert!((ra - 348.025).abs() < 1e-10);
//! assert!(dec < -66.0);
//!
//! let d = angular_dist(21.07, 0.1, 21.15, 8.2);
//! assert!((d - 8.100392318146506).abs() < 1e-9);
//! ```
//!
//! # Units
//!
//! Every public function takes and returns **degrees**. Radians only appear
//! inside the trigonometry.

pub mod angle;
pub mod constants;
pub mod convert;
pub mod distance;
pub mod errors;

pub use angle::{format_dms, format_hms, parse_dms, parse_hms, Angle, AngleUnits};
pub use convert::{dms2dec, hms2dec};
pub use distance::angular_dist;
pub use errors::{SkyError, SkyResult};
