use super::is_closer;
use crate::entry::Position;
use crate::errors::{CatalogError, Result};
use skywork_core::angular_dist;

/// Finds the catalogue entry nearest to `(target_ra, target_dec)`.
///
/// Returns the 1-based id and the separation in degrees. The scan starts from
/// entry 0 and keeps the first strictly smaller distance, so the earliest entry
/// wins a tie. Entries whose distance is NaN are never preferred over a finite
/// one.
///
/// # Errors
///
/// [`CatalogError::Empty`] if the catalogue has no entries.
pub fn find_closest<P: Position>(catalog: &[P], target_ra: f64, target_dec: f64) -> Result<(usize, f64)> {
    nearest_neighbour(catalog, target_ra, target_dec)
        .map(|(index, distance)| (index + 1, distance))
        .ok_or(CatalogError::Empty)
}

/// 0-based index and distance of the nearest entry, or `None` when empty.
pub(crate) fn nearest_neighbour<P: Position>(
    catalog: &[P],
    target_ra: f64,
    target_dec: f64,
) -> Option<(usize, f64)> {
    let (first, rest) = catalog.split_first()?;
    let mut closest_index = 0;
    let mut closest = angular_dist(first.ra_deg(), first.dec_deg(), target_ra, target_dec);

    for (offset, entry) in rest.iter().enumerate() {
        let current = angular_dist(entry.ra_deg(), entry.dec_deg(), target_ra, target_dec);
        if is_closer(current, closest) {
            closest_index = offset + 1;
            closest = current;
        }
    }

    Some((closest_index, closest))
}
