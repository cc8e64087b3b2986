//! Catalogue readers.
//!
//! Two layouts are supported:
//!
//! - **Whitespace tables** (`bss.dat`): one object per line, an identifier
//!   column followed by `rah ram ras ded dem des`. Any trailing columns are
//!   ignored. Blank lines and `#` comments are skipped.
//! - **CSV with a header** (`super.csv`): the first two columns are RA and Dec
//!   in decimal degrees.
//!
//! Both reject an input with no data rows, so downstream searches never index
//! into an empty catalogue.

use crate::entry::{DegreeEntry, SexagesimalEntry};
use crate::errors::{CatalogError, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Column holding `rah` in the BSS layout (column 0 is the object id).
pub const BSS_FIRST_COLUMN: usize = 1;

pub fn load_sexagesimal_catalog<P: AsRef<Path>>(
    path: P,
    first_column: usize,
) -> Result<Vec<SexagesimalEntry>> {
    let path = path.as_ref();
    debug!("Reading sexagesimal catalogue {:?}", path);
    let entries = parse_sexagesimal_catalog(File::open(path)?, first_column)?;
    info!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

pub fn load_degree_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<DegreeEntry>> {
    let path = path.as_ref();
    debug!("Reading degree catalogue {:?}", path);
    let entries = parse_degree_catalog(File::open(path)?)?;
    info!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Parses a whitespace-delimited table, taking six positional fields
/// starting at `first_column`.
pub fn parse_sexagesimal_catalog<R: Read>(
    reader: R,
    first_column: usize,
) -> Result<Vec<SexagesimalEntry>> {
    let needed = first_column + SexagesimalEntry::FIELDS;
    let mut entries = Vec::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line_no = index as u64 + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = trimmed.split_whitespace().collect();
        if columns.len() < needed {
            return Err(CatalogError::malformed(
                line_no,
                format!("expected at least {} columns, found {}", needed, columns.len()),
            ));
        }

        let mut fields = [0.0; SexagesimalEntry::FIELDS];
        for (slot, text) in fields.iter_mut().zip(&columns[first_column..needed]) {
            *slot = parse_field(text, line_no)?;
        }
        entries.push(SexagesimalEntry::new(fields));
    }

    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(entries)
}

/// Parses a CSV table with a header row; columns 0 and 1 are RA and Dec.
pub fn parse_degree_catalog<R: Read>(reader: R) -> Result<Vec<DegreeEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line_no = record.position().map_or(0, |p| p.line());
        if record.len() < 2 {
            return Err(CatalogError::malformed(
                line_no,
                format!("expected at least 2 columns, found {}", record.len()),
            ));
        }
        let ra = parse_field(&record[0], line_no)?;
        let dec = parse_field(&record[1], line_no)?;
        entries.push(DegreeEntry::new(ra, dec));
    }

    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(entries)
}

fn parse_field(text: &str, line: u64) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| CatalogError::malformed(line, format!("'{}' is not a number", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Position;

    const BSS_SAMPLE: &str = "\
# id rah ram ras ded dem des
1 00 00 22.78 -29 16 48.5
2  00 01 45.67 -27 52 39.5  extra

3 00 02 35.55 -23 54 44.0
";

    const SUPER_SAMPLE: &str = "\
RA,Dec,Bj,Rf
0.094976,-29.280143,19.12,18.01
0.440285,-27.877639,20.54,19.70
";

    #[test]
    fn test_parse_sexagesimal_skips_comments_and_blanks() {
        let cat = parse_sexagesimal_catalog(BSS_SAMPLE.as_bytes(), BSS_FIRST_COLUMN).unwrap();
        assert_eq!(cat.len(), 3);
        assert_eq!(cat[1], SexagesimalEntry::new([0.0, 1.0, 45.67, -27.0, 52.0, 39.5]));
    }

    #[test]
    fn test_parse_sexagesimal_positions() {
        let cat = parse_sexagesimal_catalog(BSS_SAMPLE.as_bytes(), BSS_FIRST_COLUMN).unwrap();
        let (ra, dec) = cat[0].position();
        assert!((ra - 15.0 * 22.78 / 3600.0).abs() < 1e-12);
        assert!((dec + (29.0 + 16.0 / 60.0 + 48.5 / 3600.0)).abs() < 1e-12);
    }

    #[test]
    fn test_parse_sexagesimal_short_row() {
        let err = parse_sexagesimal_catalog("1 00 00 22.78 -29\n".as_bytes(), 1).unwrap_err();
        match err {
            CatalogError::Malformed { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_sexagesimal_bad_number() {
        let err = parse_sexagesimal_catalog("1 00 xx 22.78 -29 16 48.5\n".as_bytes(), 1).unwrap_err();
        assert!(err.to_string().contains("'xx' is not a number"));
    }

    #[test]
    fn test_parse_sexagesimal_empty() {
        let err = parse_sexagesimal_catalog("# only a comment\n\n".as_bytes(), 1).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn test_parse_degree_catalog() {
        let cat = parse_degree_catalog(SUPER_SAMPLE.as_bytes()).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat[0], DegreeEntry::new(0.094976, -29.280143));
    }

    #[test]
    fn test_parse_degree_catalog_header_only() {
        let err = parse_degree_catalog("RA,Dec\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn test_parse_degree_catalog_bad_value() {
        let err = parse_degree_catalog("RA,Dec\n1.0,north\n".as_bytes()).unwrap_err();
        match err {
            CatalogError::Malformed { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("north"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_degree_catalog("/nonexistent/super.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
