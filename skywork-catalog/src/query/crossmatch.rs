//! Brute-force catalogue cross-match.
//!
//! For each entry of the first catalogue, [`crossmatch`] scans the whole second
//! catalogue for its nearest neighbour and only then decides: within the radius
//! it becomes a [`Match`], otherwise its id goes to `no_matches`. Every id of
//! the first catalogue lands in exactly one of the two lists, once.
//!
//! The scan costs O(n·m). For larger inputs, [`run_crossmatch`] with
//! [`CrossmatchStrategy::Indexed`] produces the same result through a
//! [`DecBandIndex`](super::DecBandIndex).

use super::band_index::{crossmatch_indexed, DecBandIndex};
use super::closest::nearest_neighbour;
use crate::entry::Position;
use crate::errors::Result;
use log::debug;
use serde::Serialize;
use std::io::Write;

/// Default match radius used by the BSS / SuperCOSMOS exercise: 40 arcseconds.
pub const DEFAULT_RADIUS_DEG: f64 = 40.0 / 3600.0;

/// A pair of 1-based ids and their separation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Match {
    pub id1: usize,
    pub id2: usize,
    pub distance_deg: f64,
}

/// Output of a cross-match, both lists in first-catalogue order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossmatchResult {
    pub matches: Vec<Match>,
    pub no_matches: Vec<usize>,
}

impl CrossmatchResult {
    /// Number of first-catalogue entries covered by the result.
    pub fn total(&self) -> usize {
        self.matches.len() + self.no_matches.len()
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            matches: Vec::with_capacity(n),
            no_matches: Vec::new(),
        }
    }

    /// Records the outcome for one first-catalogue entry.
    pub(crate) fn decide(&mut self, id1: usize, nearest: Option<(usize, f64)>, radius_deg: f64) {
        match nearest {
            Some((index2, distance_deg)) if distance_deg <= radius_deg => self.matches.push(Match {
                id1,
                id2: index2 + 1,
                distance_deg,
            }),
            _ => self.no_matches.push(id1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossmatchStrategy {
    /// Scan every second-catalogue entry.
    Brute,
    /// Prune with declination bands; `None` picks a band height from the radius.
    Indexed { band_height_deg: Option<f64> },
}

#[derive(Debug, Clone, Copy)]
pub struct CrossmatchParams {
    /// Maximum accepted separation, in degrees.
    pub radius_deg: f64,
    pub strategy: CrossmatchStrategy,
}

impl Default for CrossmatchParams {
    fn default() -> Self {
        Self {
            radius_deg: DEFAULT_RADIUS_DEG,
            strategy: CrossmatchStrategy::Brute,
        }
    }
}

impl CrossmatchParams {
    pub fn with_radius_arcsec(arcsec: f64) -> Self {
        Self {
            radius_deg: arcsec / 3600.0,
            ..Self::default()
        }
    }
}

/// Matches every entry of `cat1` to its nearest `cat2` entry within `radius_deg`.
///
/// - An empty `cat2` leaves every id unmatched.
/// - `radius_deg` of zero only accepts exact coincidences; a negative or NaN
///   radius accepts nothing.
/// - Rows with non-finite coordinates produce NaN distances and stay unmatched.
pub fn crossmatch<P1: Position, P2: Position>(
    cat1: &[P1],
    cat2: &[P2],
    radius_deg: f64,
) -> CrossmatchResult {
    let mut result = CrossmatchResult::with_capacity(cat1.len());

    for (index1, entry) in cat1.iter().enumerate() {
        let (ra1, dec1) = entry.position();
        let nearest = nearest_neighbour(cat2, ra1, dec1);
        result.decide(index1 + 1, nearest, radius_deg);
    }

    debug!(
        "crossmatch: {} x {} entries, {} matched within {:.6} deg",
        cat1.len(),
        cat2.len(),
        result.matches.len(),
        radius_deg
    );
    result
}

/// Runs a cross-match with the strategy chosen in `params`.
///
/// # Errors
///
/// Only the indexed strategy can fail, when given an invalid band height.
pub fn run_crossmatch<P1: Position, P2: Position>(
    cat1: &[P1],
    cat2: &[P2],
    params: &CrossmatchParams,
) -> Result<CrossmatchResult> {
    match params.strategy {
        CrossmatchStrategy::Brute => Ok(crossmatch(cat1, cat2, params.radius_deg)),
        CrossmatchStrategy::Indexed { band_height_deg } => {
            let height = band_height_deg.unwrap_or_else(|| DecBandIndex::band_height_for(params.radius_deg));
            let index = DecBandIndex::build(cat2, height)?;
            Ok(crossmatch_indexed(cat1, &index, params.radius_deg))
        }
    }
}

/// Writes `matches` as CSV with an `id1,id2,distance_deg` header.
pub fn write_matches_csv<W: Write>(writer: W, matches: &[Match]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for m in matches {
        wtr.serialize(m)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{DegreeEntry, SexagesimalEntry};
    use std::collections::HashSet;

    fn arcsec(x: f64) -> f64 {
        x / 3600.0
    }

    fn cat1() -> Vec<DegreeEntry> {
        vec![
            DegreeEntry::new(10.0, 10.0),
            DegreeEntry::new(20.0, -20.0),
            DegreeEntry::new(30.0, 30.0),
        ]
    }

    fn cat2() -> Vec<DegreeEntry> {
        vec![
            DegreeEntry::new(30.0, 30.0 + arcsec(3.0)),
            DegreeEntry::new(10.0, 10.0 + arcsec(20.0)),
            DegreeEntry::new(10.0, 10.0 + arcsec(10.0)),
            DegreeEntry::new(200.0, 0.0),
        ]
    }

    #[test]
    fn test_each_id_decided_once() {
        let result = crossmatch(&cat1(), &cat2(), arcsec(40.0));
        assert_eq!(result.total(), 3);

        let mut seen = HashSet::new();
        for m in &result.matches {
            assert!(seen.insert(m.id1));
        }
        for id in &result.no_matches {
            assert!(seen.insert(*id));
        }
        assert_eq!(seen, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_picks_nearest_within_radius() {
        let result = crossmatch(&cat1(), &cat2(), arcsec(40.0));
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].id1, 1);
        assert_eq!(result.matches[0].id2, 3);
        assert!((result.matches[0].distance_deg - arcsec(10.0)).abs() < 1e-9);
        assert_eq!(result.matches[1].id1, 3);
        assert_eq!(result.matches[1].id2, 1);
        assert_eq!(result.no_matches, vec![2]);
    }

    #[test]
    fn test_unmatched_when_nearest_outside_radius() {
        let result = crossmatch(&cat1(), &cat2(), arcsec(5.0));
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].id1, 3);
        assert_eq!(result.no_matches, vec![1, 2]);
    }

    #[test]
    fn test_no_duplicates_when_running_best_starts_outside_radius() {
        // The nearest entry comes last, after several entries outside the
        // radius. Each id must still be reported exactly once.
        let c1 = vec![DegreeEntry::new(0.0, 0.0)];
        let c2 = vec![
            DegreeEntry::new(5.0, 0.0),
            DegreeEntry::new(3.0, 0.0),
            DegreeEntry::new(1.0, 0.0),
            DegreeEntry::new(0.0, arcsec(1.0)),
        ];
        let result = crossmatch(&c1, &c2, arcsec(5.0));
        assert!(result.no_matches.is_empty());
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].id2, 4);
    }

    #[test]
    fn test_empty_inputs() {
        let empty: Vec<DegreeEntry> = Vec::new();
        let result = crossmatch(&empty, &cat2(), 1.0);
        assert!(result.matches.is_empty());
        assert!(result.no_matches.is_empty());

        let result = crossmatch(&cat1(), &empty, 1.0);
        assert!(result.matches.is_empty());
        assert_eq!(result.no_matches, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_and_negative_radius() {
        let c1 = vec![DegreeEntry::new(1.0, 1.0), DegreeEntry::new(2.0, 2.0)];
        let c2 = vec![DegreeEntry::new(1.0, 1.0), DegreeEntry::new(2.0, 2.0 + arcsec(1.0))];

        let result = crossmatch(&c1, &c2, 0.0);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].distance_deg, 0.0);
        assert_eq!(result.no_matches, vec![2]);

        let result = crossmatch(&c1, &c2, -1.0);
        assert!(result.matches.is_empty());
        assert_eq!(result.no_matches, vec![1, 2]);

        let result = crossmatch(&c1, &c2, f64::NAN);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_non_finite_rows_stay_unmatched() {
        let c1 = vec![DegreeEntry::new(f64::NAN, 0.0), DegreeEntry::new(10.0, 10.0)];
        let c2 = vec![DegreeEntry::new(f64::INFINITY, 0.0), DegreeEntry::new(10.0, 10.0)];
        let result = crossmatch(&c1, &c2, 1.0);
        assert_eq!(result.no_matches, vec![1]);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].id2, 2);
    }

    #[test]
    fn test_sexagesimal_first_catalog() {
        let c1 = vec![SexagesimalEntry::new([11.0, 41.0, 12.0, -32.0, 30.0, 0.0])];
        let c2 = vec![DegreeEntry::new(0.0, 0.0), DegreeEntry::new(175.3, -32.5)];
        let result = crossmatch(&c1, &c2, arcsec(1.0));
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].id2, 2);
    }

    #[test]
    fn test_run_crossmatch_strategies_agree() {
        let brute = run_crossmatch(&cat1(), &cat2(), &CrossmatchParams::with_radius_arcsec(40.0)).unwrap();
        let params = CrossmatchParams {
            radius_deg: arcsec(40.0),
            strategy: CrossmatchStrategy::Indexed { band_height_deg: None },
        };
        let indexed = run_crossmatch(&cat1(), &cat2(), &params).unwrap();
        assert_eq!(brute, indexed);
    }

    #[test]
    fn test_write_matches_csv() {
        let matches = [
            Match { id1: 1, id2: 3, distance_deg: 0.5 },
            Match { id1: 4, id2: 2, distance_deg: 0.25 },
        ];
        let mut out = Vec::new();
        write_matches_csv(&mut out, &matches).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "id1,id2,distance_deg\n1,3,0.5\n4,2,0.25\n");
    }

    #[test]
    fn test_write_matches_csv_reads_back() {
        let result = crossmatch(&cat1(), &cat2(), arcsec(40.0));
        let mut out = Vec::new();
        write_matches_csv(&mut out, &result.matches).unwrap();

        let mut rdr = csv::Reader::from_reader(out.as_slice());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers, vec!["id1", "id2", "distance_deg"]);
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), result.matches.len());
        for (row, m) in rows.iter().zip(&result.matches) {
            assert_eq!(row[0].parse::<usize>().unwrap(), m.id1);
            assert_eq!(row[1].parse::<usize>().unwrap(), m.id2);
            assert_eq!(row[2].parse::<f64>().unwrap(), m.distance_deg);
        }
    }
}
