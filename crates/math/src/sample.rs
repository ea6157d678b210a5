//! Deterministic subsampling.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Pick at most `cap` row indices out of `n`, without replacement.
///
/// When `n <= cap` every index is returned. The RNG is seeded from
/// `seed`, so identical inputs always select identical rows. Indices come
/// back sorted ascending to preserve the source row order.
#[must_use]
pub fn sample_indices(n: usize, cap: usize, seed: u64) -> Vec<usize> {
    if n <= cap {
        return (0..n).collect();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, n, cap).into_vec();
    picked.sort_unstable();
    picked
}
