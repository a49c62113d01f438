//! Random primitives consumed by generation, plus per-floor seed mixing.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// The three sampling primitives generation relies on, built on raw bits.
///
/// One generation run owns its source exclusively; floors generated in
/// parallel each need their own instance (see [`floor_rng`]).
pub trait RandomSource {
    fn next_bits(&mut self) -> u64;

    /// Uniform integer in `lo..=hi`. Returns `lo` when `hi < lo`.
    fn int_in_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        (i64::from(lo) + (self.next_bits() % span) as i64) as i32
    }

    /// Uniform real in `[0, 1)` with 53 bits of precision.
    fn unit_f64(&mut self) -> f64 {
        (self.next_bits() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// Draws one index with probability proportional to its weight.
    ///
    /// Non-positive and non-finite weights never win. Returns `None` when no
    /// weight is positive.
    fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let usable = |weight: f64| weight.is_finite() && weight > 0.0;
        let total: f64 = weights.iter().copied().filter(|&w| usable(w)).sum();
        if total <= 0.0 {
            return None;
        }

        let target = self.unit_f64() * total;
        let mut cumulative = 0.0;
        let mut last_usable = None;
        for (index, &weight) in weights.iter().enumerate() {
            if !usable(weight) {
                continue;
            }
            cumulative += weight;
            last_usable = Some(index);
            if target < cumulative {
                return Some(index);
            }
        }
        // Rounding can leave `target` a hair above the final running sum.
        last_usable
    }
}

impl<R: Rng> RandomSource for R {
    fn next_bits(&mut self) -> u64 {
        self.next_u64()
    }
}

pub fn derive_floor_seed(run_seed: u64, floor: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(floor).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// An independent ChaCha8 stream for one floor of one run.
pub fn floor_rng(run_seed: u64, floor: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_floor_seed(run_seed, floor))
}
