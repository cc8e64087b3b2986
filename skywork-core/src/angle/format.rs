//! Sexagesimal formatting for table output.
//!
//! ```
//! use skywork_core::{format_dms, format_hms};
//!
//! assert_eq!(format_hms(348.025, 2), "23h12m06.00s");
//! assert_eq!(format_dms(-16.609555555555556, 1), "-16d36m34.4s");
//! ```

use super::Angle;
use core::fmt;

/// Degrees-minutes-seconds formatter with an explicit sign.
pub struct DmsFmt {
    pub frac_digits: u8,
}

/// Hours-minutes-seconds formatter; negative angles wrap into `[0, 24h)`.
pub struct HmsFmt {
    pub frac_digits: u8,
}

impl DmsFmt {
    pub fn fmt(&self, a: Angle) -> String {
        let sign = if a.degrees() < 0.0 { '-' } else { '+' };
        let (whole, min, sec) = split_sexagesimal(a.degrees().abs(), self.frac_digits);
        let width = seconds_width(self.frac_digits);
        format!(
            "{sign}{whole:02}d{min:02}m{sec:0width$.prec$}s",
            prec = self.frac_digits as usize
        )
    }
}

impl HmsFmt {
    pub fn fmt(&self, a: Angle) -> String {
        let hours = a.hours().rem_euclid(24.0);
        let (whole, min, sec) = split_sexagesimal(hours, self.frac_digits);
        let width = seconds_width(self.frac_digits);
        format!(
            "{whole:02}h{min:02}m{sec:0width$.prec$}s",
            prec = self.frac_digits as usize
        )
    }
}

/// Formats decimal degrees of right ascension as `HHhMMmSS.ss s`.
pub fn format_hms(ra_deg: f64, frac_digits: u8) -> String {
    HmsFmt { frac_digits }.fmt(Angle::from_degrees(ra_deg))
}

/// Formats decimal degrees of declination as `±DDdMMmSS.s s`.
pub fn format_dms(dec_deg: f64, frac_digits: u8) -> String {
    DmsFmt { frac_digits }.fmt(Angle::from_degrees(dec_deg))
}

// Rounds seconds first so 59.999 never prints as "60".
fn split_sexagesimal(value: f64, frac_digits: u8) -> (u64, u64, f64) {
    let scale = 10f64.powi(frac_digits as i32);
    let total_units = libm::round(value * 3600.0 * scale);
    let units_per_minute = 60.0 * scale;

    let whole = libm::trunc(total_units / (60.0 * units_per_minute));
    let rem = total_units - whole * 60.0 * units_per_minute;
    let min = libm::trunc(rem / units_per_minute);
    let sec = (rem - min * units_per_minute) / scale;

    (whole as u64, min as u64, sec)
}

fn seconds_width(frac_digits: u8) -> usize {
    if frac_digits == 0 {
        2
    } else {
        3 + frac_digits as usize
    }
}

impl fmt::Display for Angle {
    /// Decimal degrees with 6 decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hms() {
        assert_eq!(format_hms(348.025, 2), "23h12m06.00s");
        assert_eq!(format_hms(0.0, 0), "00h00m00s");
    }

    #[test]
    fn test_hms_wraps_negative() {
        assert_eq!(format_hms(-22.5, 0), "22h30m00s");
    }

    #[test]
    fn test_dms() {
        assert_eq!(format_dms(-16.609555555555556, 1), "-16d36m34.4s");
        assert_eq!(format_dms(22.955, 0), "+22d57m18s");
    }

    #[test]
    fn test_rounding_carries_into_minutes() {
        // 10° 59' 59.9999" rounds to 11° 00' 00.0"
        let deg = 10.0 + 59.0 / 60.0 + 59.9999 / 3600.0;
        assert_eq!(format_dms(deg, 1), "+11d00m00.0s");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Angle::from_degrees(45.5)), "45.500000°");
    }
}
