/*
 * rng.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The engine's private random source.
//!
//! Every random draw the engine makes (choice weighting, chance gates, the
//! `rand` built-in, wildcard sampling) routes through one [`Sampler`] owned
//! by the engine instance. Seeded construction makes the whole draw sequence
//! reproducible; there is no module-level generator anywhere.

use std::hash::{Hash, Hasher};

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHasher;

pub(crate) struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub(crate) fn new(seed: Option<u64>) -> Sampler {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Sampler { rng }
    }

    /// Evaluate a chance gate: true with probability `chance`.
    ///
    /// A chance of 0 never passes and a chance of 1 always passes; values
    /// outside [0, 1] clamp to those behaviors.
    pub(crate) fn passes(&mut self, chance: f64) -> bool {
        // `gen` is a reserved keyword in edition 2024
        self.rng.r#gen::<f64>() < chance
    }

    /// Uniform value in `[lo, hi]`. Reversed bounds are swapped.
    pub(crate) fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform index into a non-empty list.
    pub(crate) fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Draw one index by relative weight. `None` when the weights cannot
    /// form a distribution (empty, all zero, negative, or NaN).
    pub(crate) fn pick_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.rng))
    }
}

/// Hash-derived wildcard index: a fixed {seed, source, name} always yields
/// the same index, independent of how many draws the sequential stream has
/// consumed elsewhere in the document.
///
/// `FxHasher` rather than the std hasher: its output is stable across runs
/// and compiler releases, which this index is contractually required to be.
pub(crate) fn stable_index(seed: u64, source: &str, name: &str, len: usize) -> usize {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    source.hash(&mut hasher);
    name.hash(&mut hasher);
    (hasher.finish() % len as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let mut a = Sampler::new(Some(7));
        let mut b = Sampler::new(Some(7));
        for _ in 0..100 {
            assert_eq!(a.index(1000), b.index(1000));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut sampler = Sampler::new(Some(1));
        for _ in 0..1000 {
            assert!(sampler.passes(1.0));
            assert!(!sampler.passes(0.0));
        }
    }

    #[test]
    fn test_uniform_swaps_reversed_bounds() {
        let mut sampler = Sampler::new(Some(2));
        for _ in 0..100 {
            let v = sampler.uniform(5.0, 1.0);
            assert!((1.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn test_weighted_zero_weight_never_drawn() {
        let mut sampler = Sampler::new(Some(3));
        for _ in 0..1000 {
            assert_eq!(sampler.pick_weighted(&[0.0, 1.0]), Some(1));
        }
    }

    #[test]
    fn test_weighted_rejects_degenerate_weights() {
        let mut sampler = Sampler::new(Some(4));
        assert_eq!(sampler.pick_weighted(&[]), None);
        assert_eq!(sampler.pick_weighted(&[0.0, 0.0]), None);
        assert_eq!(sampler.pick_weighted(&[1.0, -1.0]), None);
    }

    #[test]
    fn test_stable_index_is_deterministic() {
        let a = stable_index(42, "wildcards", "color", 10);
        let b = stable_index(42, "wildcards", "color", 10);
        assert_eq!(a, b);
        assert!(a < 10);
    }

    #[test]
    fn test_stable_index_varies_by_inputs() {
        // Not a collision-freedom guarantee, just a sanity check that the
        // inputs participate in the hash.
        let base = stable_index(42, "wildcards", "color", 1_000_000);
        assert_ne!(stable_index(43, "wildcards", "color", 1_000_000), base);
        assert_ne!(stable_index(42, "other", "color", 1_000_000), base);
        assert_ne!(stable_index(42, "wildcards", "mood", 1_000_000), base);
    }
}
