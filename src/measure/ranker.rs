//! Tie-breaking ranker: random permutation, then descending-score sort.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Deterministic generator from an explicit seed, for reproducible runs and
/// tests.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generator seeded from the wall clock.
///
/// This is the default tie-breaking source: output varies between runs
/// whenever score ties exist.
pub fn clock_rng() -> ChaCha8Rng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    ChaCha8Rng::seed_from_u64(nanos)
}

/// Order `(score, label)` items by score descending, breaking exact score
/// ties uniformly at random.
///
/// Shuffles before sorting so equal-score items already sit in random
/// relative order; the sort itself need not be stable.
pub fn rank_by_score<R: Rng + ?Sized>(items: &mut [(f32, f32)], rng: &mut R) {
    items.shuffle(rng);
    items.sort_unstable_by(|a, b| b.0.total_cmp(&a.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_descending_without_ties() {
        let mut items = vec![(0.1, 0.0), (0.9, 1.0), (0.5, 0.0)];
        rank_by_score(&mut items, &mut seeded_rng(7));
        assert_eq!(items, vec![(0.9, 1.0), (0.5, 0.0), (0.1, 0.0)]);
    }

    #[test]
    fn test_no_ties_order_is_seed_independent() {
        let items = vec![(0.3, 1.0), (0.7, 0.0), (0.2, 1.0), (0.9, 0.0)];
        let mut first = items.clone();
        rank_by_score(&mut first, &mut seeded_rng(0));
        for seed in 1..20 {
            let mut other = items.clone();
            rank_by_score(&mut other, &mut seeded_rng(seed));
            assert_eq!(other, first);
        }
    }

    #[test]
    fn test_same_seed_breaks_ties_identically() {
        let items = vec![(0.5, 1.0), (0.5, 2.0), (0.5, 3.0)];
        let mut a = items.clone();
        let mut b = items.clone();
        rank_by_score(&mut a, &mut seeded_rng(42));
        rank_by_score(&mut b, &mut seeded_rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ties_vary_across_seeds() {
        // Two equal-score items: over a few seeds both relative orders show up.
        let items = vec![(0.5, 1.0), (0.5, 2.0)];
        let mut seen_first = false;
        let mut seen_second = false;
        for seed in 0..32 {
            let mut list = items.clone();
            rank_by_score(&mut list, &mut seeded_rng(seed));
            match list[0].1 {
                l if l == 1.0 => seen_first = true,
                _ => seen_second = true,
            }
        }
        assert!(seen_first && seen_second);
    }
}
