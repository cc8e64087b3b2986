//! Catalogue loading and positional cross-matching.
//!
//! Pairs objects between two catalogues by nearest angular distance. The
//! first catalogue stores positions as six sexagesimal fields per row (the
//! BSS radio survey layout), the second as decimal degrees (the SuperCOSMOS
//! layout). Both are read into memory and scanned.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`entry`] | [`SexagesimalEntry`], [`DegreeEntry`] and the [`Position`] trait |
//! | [`loader`] | Whitespace and CSV catalogue readers |
//! | [`query::closest`] | [`find_closest`]: linear nearest-neighbour scan |
//! | [`query::crossmatch`] | [`crossmatch`]: brute-force match within a radius |
//! | [`query::band_index`] | [`DecBandIndex`]: declination bands that prune the scan |
//!
//! # Quick Start
//!
//! ```ignore
//! use skywork_catalog::{load_degree_catalog, load_sexagesimal_catalog, crossmatch};
//!
//! let bss = load_sexagesimal_catalog("bss.dat", 1)?;
//! let sc = load_degree_catalog("super.csv")?;
//!
//! let result = crossmatch(&bss, &sc, 40.0 / 3600.0);
//! println!("{} matched, {} unmatched", result.matches.len(), result.no_matches.len());
//! ```
//!
//! # Identifiers
//!
//! Catalogue order defines identity. Every id reported by this crate is
//! **1-based**: the first row of a catalogue is id 1.
//!
//! # Features
//!
//! - **`cli`** (default): builds the `crossmatch` binary.

pub mod entry;
pub mod errors;
pub mod loader;
pub mod query;

pub use entry::{DegreeEntry, Position, SexagesimalEntry};
pub use errors::{CatalogError, Result};
pub use loader::{
    load_degree_catalog, load_sexagesimal_catalog, parse_degree_catalog,
    parse_sexagesimal_catalog,
};
pub use query::{
    crossmatch, crossmatch_indexed, find_closest, run_crossmatch, write_matches_csv,
    CrossmatchParams, CrossmatchResult, CrossmatchStrategy, DecBandIndex, Match,
};
