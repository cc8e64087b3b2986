//! Angle parsing from string representations.
//!
//! Catalogue files and command lines write coordinates in several notations:
//!
//! ```text
//! Colon-separated:  12:34:56.789     -16:36:04.4
//! Space-separated:  12 34 56.789     -16 36 04.4
//! Letter markers:   12h34m56.789s    -16d36m04.4s
//! Symbol notation:  -16d 36' 04.4"
//! Verbose:          12 hours 34 minutes 56 seconds
//! ```
//!
//! Unlike [`dms2dec`](crate::dms2dec), a leading `-` here negates the whole
//! angle, so `-00:30:00` parses to −0.5°. Signs are only accepted at the start.
//!
//! ```
//! use skywork_core::AngleUnits;
//!
//! let ra = "04:06.6:34".hms();
//! assert!(ra.is_err()); // minutes must be whole in colon form
//!
//! let ra = "4h6m34s".hms().unwrap();
//! assert!((ra.hours() - (4.0 + 6.0 / 60.0 + 34.0 / 3600.0)).abs() < 1e-12);
//!
//! let dec = "-00:30:00".dms().unwrap();
//! assert!((dec.degrees() + 0.5).abs() < 1e-12);
//! ```

use super::Angle;
use crate::SkyError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Parse strings as angles with an explicit unit.
pub trait AngleUnits {
    /// Parse as decimal degrees.
    fn deg(&self) -> Result<Angle, SkyError>;
    /// Parse as decimal hours (1 hour = 15 degrees).
    fn hours(&self) -> Result<Angle, SkyError>;
    /// Parse as arcseconds (3600 arcsec = 1 degree).
    fn arcsec(&self) -> Result<Angle, SkyError>;
    /// Parse degrees-minutes-seconds. See module docs for accepted formats.
    fn dms(&self) -> Result<Angle, SkyError>;
    /// Parse hours-minutes-seconds. See module docs for accepted formats.
    fn hms(&self) -> Result<Angle, SkyError>;
}

impl AngleUnits for str {
    #[inline]
    fn deg(&self) -> Result<Angle, SkyError> {
        parse_decimal(self).map(Angle::from_degrees)
    }

    #[inline]
    fn hours(&self) -> Result<Angle, SkyError> {
        parse_decimal(self).map(Angle::from_hours)
    }

    #[inline]
    fn arcsec(&self) -> Result<Angle, SkyError> {
        parse_decimal(self).map(Angle::from_arcseconds)
    }

    #[inline]
    fn dms(&self) -> Result<Angle, SkyError> {
        parse_dms(self)
    }

    #[inline]
    fn hms(&self) -> Result<Angle, SkyError> {
        parse_hms(self)
    }
}

/// Coordinate-aware parsing used by the command-line tools.
///
/// Right ascension tries HMS then decimal degrees; declination tries DMS then
/// decimal degrees. Both return decimal degrees.
pub trait ParseAngle {
    fn to_ra_degrees(&self) -> Result<f64, SkyError>;
    fn to_dec_degrees(&self) -> Result<f64, SkyError>;
}

impl ParseAngle for str {
    fn to_ra_degrees(&self) -> Result<f64, SkyError> {
        sexagesimal_or_degrees(self, parse_hms(self), "right ascension (HMS or degrees)")
    }

    fn to_dec_degrees(&self) -> Result<f64, SkyError> {
        sexagesimal_or_degrees(self, parse_dms(self), "declination (DMS or degrees)")
    }
}

// A string that matched the sexagesimal layout but carries out-of-range
// fields keeps its own error instead of falling back to decimal degrees.
fn sexagesimal_or_degrees(
    s: &str,
    sexagesimal: Result<Angle, SkyError>,
    expected: &str,
) -> Result<f64, SkyError> {
    match sexagesimal {
        Ok(angle) => Ok(angle.degrees()),
        Err(err @ SkyError::InvalidInput { .. }) => Err(err),
        Err(_) => s
            .deg()
            .map(Angle::degrees)
            .map_err(|_| SkyError::parse(s, expected)),
    }
}

fn parse_decimal(s: &str) -> Result<f64, SkyError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| SkyError::parse(s, "a number"))
}

static COLON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*([+-])?(\d{1,3})\s*:\s*(\d{1,2})\s*:\s*(\d{1,2}(?:\.\d+)?)\s*$"#)
        .expect("colon pattern compiles")
});

static HMS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?xi)
        ^\s*
        ([+-])?                 # optional sign
        (\d{1,3})               # hours
        [h\s]+                  # h marker or whitespace
        (\d{1,2})               # minutes
        [m\s']+                 # m marker or whitespace
        (\d{1,2}(?:\.\d+)?)     # seconds with optional fraction
        [s\s"]*
        $
        "#,
    )
    .expect("HMS pattern compiles")
});

static DMS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?xi)
        ^\s*
        ([+-])?                 # optional sign
        (\d{1,3})               # degrees
        [d\s]+                  # d marker or whitespace
        (\d{1,2})               # arcminutes
        [m\s']+                 # m marker, apostrophe or whitespace
        (\d{1,2}(?:\.\d+)?)     # arcseconds with optional fraction
        [s\s"]*
        $
        "#,
    )
    .expect("DMS pattern compiles")
});

/// Parse a string as hours-minutes-seconds, returning the angle.
///
/// Accepts `12:34:56`, `12 34 56`, `12h34m56s`, `12 hours 34 min 56 sec`.
///
/// # Errors
///
/// [`SkyError::Parse`] when the layout is not recognised,
/// [`SkyError::InvalidInput`] when minutes or seconds are 60 or more.
pub fn parse_hms(s: &str) -> Result<Angle, SkyError> {
    let normalized = normalize_input(s);
    let caps = COLON_REGEX
        .captures(&normalized)
        .or_else(|| HMS_REGEX.captures(&normalized))
        .ok_or_else(|| SkyError::parse(s, "HMS"))?;
    Ok(Sexagesimal::from_captures(&caps, s, "HMS")?.to_angle(Angle::from_hours))
}

/// Parse a string as degrees-minutes-seconds, returning the angle.
///
/// Accepts `45:30:15`, `45 30 15`, `45d30m15s`, `45d 30' 15"`,
/// `45 deg 30 arcmin 15 arcsec`.
pub fn parse_dms(s: &str) -> Result<Angle, SkyError> {
    let normalized = normalize_input(s);
    let caps = COLON_REGEX
        .captures(&normalized)
        .or_else(|| DMS_REGEX.captures(&normalized))
        .ok_or_else(|| SkyError::parse(s, "DMS"))?;
    Ok(Sexagesimal::from_captures(&caps, s, "DMS")?.to_angle(Angle::from_degrees))
}

/// Unsigned fields of a matched sexagesimal string plus its leading sign.
struct Sexagesimal {
    negative: bool,
    whole: f64,
    minutes: f64,
    seconds: f64,
}

impl Sexagesimal {
    fn from_captures(caps: &regex::Captures, input: &str, notation: &str) -> Result<Self, SkyError> {
        let field = |i: usize| -> Result<f64, SkyError> {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .ok_or_else(|| SkyError::parse(input, notation))
        };
        let fields = Self {
            negative: caps.get(1).is_some_and(|m| m.as_str() == "-"),
            whole: field(2)?,
            minutes: field(3)?,
            seconds: field(4)?,
        };

        if fields.minutes >= 60.0 || fields.seconds >= 60.0 {
            return Err(SkyError::invalid_input(
                notation,
                &format!("minutes and seconds must be below 60 in '{}'", input.trim()),
            ));
        }
        Ok(fields)
    }

    /// Sums the fields in the unit of the leading field, then applies the sign
    /// to the whole angle.
    fn to_angle(&self, unit: fn(f64) -> Angle) -> Angle {
        let magnitude = unit(self.whole) + unit(self.minutes / 60.0) + unit(self.seconds / 3600.0);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

fn normalize_input(s: &str) -> String {
    let mut result = s.trim().to_lowercase();

    for (long, short) in [
        ("degrees", "d"),
        ("degree", "d"),
        ("deg", "d"),
        ("°", "d"),
        ("arcminutes", "m"),
        ("arcminute", "m"),
        ("arcmin", "m"),
        ("minutes", "m"),
        ("minute", "m"),
        ("min", "m"),
        ("arcseconds", "s"),
        ("arcsecond", "s"),
        ("arcsec", "s"),
        ("seconds", "s"),
        ("second", "s"),
        ("sec", "s"),
        ("''", "\""),
        ("hours", "h"),
        ("hour", "h"),
        ("hrs", "h"),
        ("hr", "h"),
    ] {
        result = result.replace(long, short);
    }

    result
}
