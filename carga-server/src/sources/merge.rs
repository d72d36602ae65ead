//! Cross-source station merging.
//!
//! The two feeds describe overlapping real-world sites with unrelated
//! identifiers, so the only workable join key is proximity: two
//! stations closer than the dedup threshold are the same site.

use tracing::debug;

use crate::domain::Station;
use crate::spatial;

/// Merge the primary (richer) station set with the secondary (live)
/// one.
///
/// A secondary station within [`spatial::DUPLICATE_THRESHOLD_M`] of a
/// primary station is folded into it: the primary record wins, but when
/// it carries no availability data at all the live feed's counts are
/// adopted. Secondary stations with no primary counterpart (or no
/// coordinates to match on) are appended. Primary order is preserved.
pub fn merge_stations(primary: Vec<Station>, secondary: Vec<Station>) -> Vec<Station> {
    let mut merged = primary;
    let mut folded = 0usize;

    for candidate in secondary {
        let duplicate_of = candidate.coordinate.and_then(|coord| {
            merged.iter().position(|existing| {
                existing
                    .coordinate
                    .is_some_and(|e| spatial::same_site(e.point(), coord.point()))
            })
        });

        match duplicate_of {
            Some(idx) => {
                folded += 1;
                let existing = &mut merged[idx];
                if existing.availability().evse_count == 0
                    && candidate.availability().evse_count > 0
                {
                    existing.set_availability(candidate.availability());
                }
            }
            None => merged.push(candidate),
        }
    }

    debug!(total = merged.len(), folded, "merged station sources");

    merged
}
