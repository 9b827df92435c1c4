//! Tier bands over ranked standings.

use crate::models::{Standing, Tier, TierBands};

/// Size of each band for `n` ranked teams: `ceil(n / 4)`.
pub fn band_size(n: usize) -> usize {
    n.div_ceil(4)
}

/// Tier of the zero-based `rank` among `n` ranked teams.
pub fn tier_for_rank(rank: usize, n: usize) -> Option<Tier> {
    if rank >= n {
        return None;
    }
    let band = rank / band_size(n);
    Tier::ALL.get(band).copied()
}

/// Split standings (best first) into four contiguous bands. The last bands
/// may be short or empty; every standing lands in exactly one band.
pub fn assign_tiers(sorted: &[Standing]) -> TierBands {
    let n = sorted.len();
    let size = band_size(n);
    let bound = |k: usize| (k * size).min(n);

    TierBands {
        s: sorted[..bound(1)].to_vec(),
        a: sorted[bound(1)..bound(2)].to_vec(),
        b: sorted[bound(2)..bound(3)].to_vec(),
        c: sorted[bound(3)..].to_vec(),
    }
}
