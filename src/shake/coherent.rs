//! Coherent noise used to drive shake displacement.

use std::sync::LazyLock;

use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Fixed permutation seed. Sources decorrelate through their own seed
/// coordinate, so every source shares one generator.
const PERMUTATION_SEED: u32 = 0;

/// Seeds are drawn from `[-SEED_RANGE, SEED_RANGE]`.
pub const SEED_RANGE: f32 = 12_500.0;

/// Lattice period of the permutation table. Perlin noise repeats every
/// `PERIOD` cells on each axis.
const PERIOD: f64 = 256.0;

static SHARED: LazyLock<ShakeNoise> = LazyLock::new(ShakeNoise::new);

/// Process-wide generator shared by every source.
pub fn shared() -> &'static ShakeNoise {
    &SHARED
}

/// 2D Perlin noise remapped to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct ShakeNoise {
    perlin: Perlin,
}

impl Default for ShakeNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl ShakeNoise {
    /// Noise generator with the shared permutation table.
    pub fn new() -> Self {
        Self {
            perlin: Perlin::new(PERMUTATION_SEED),
        }
    }

    /// Sample `N(a, b)` in `[0, 1]`.
    ///
    /// Coordinates are wrapped into one noise period first, so arbitrarily
    /// large arguments stay valid. Non-finite coordinates read as zero.
    #[inline]
    pub fn sample(&self, a: f32, b: f32) -> f32 {
        let v = self.perlin.get([wrap(a), wrap(b)]);
        (v * 0.5 + 0.5).clamp(0.0, 1.0) as f32
    }

    /// Per-axis noise centred on zero, each component in `[-0.5, 0.5]`.
    ///
    /// The three axes read decorrelated coordinate pairs built from the
    /// noise argument `p` and the source `seed`.
    #[inline]
    pub fn axes(&self, p: f32, seed: f32) -> Vec3 {
        Vec3::new(
            self.sample(p, seed),
            self.sample(seed, p),
            self.sample(p - seed, seed - p),
        ) - Vec3::splat(0.5)
    }
}

#[inline]
fn wrap(coordinate: f32) -> f64 {
    let c = f64::from(coordinate);
    if c.is_finite() {
        c.rem_euclid(PERIOD)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_unit_range() {
        let noise = ShakeNoise::new();
        for i in 0..200 {
            let a = i as f32 * 0.37 - 40.0;
            let b = i as f32 * -1.13 + 12_000.0;
            let v = noise.sample(a, b);
            assert!((0.0..=1.0).contains(&v), "N({a}, {b}) = {v}");
        }
    }

    #[test]
    fn axes_are_centred() {
        let noise = ShakeNoise::new();
        for i in 0..100 {
            let v = noise.axes(i as f32 * 0.21, 731.5);
            assert!(v.abs().max_element() <= 0.5);
        }
    }

    #[test]
    fn deterministic_and_coherent() {
        let noise = ShakeNoise::new();
        assert_eq!(noise.sample(3.3, -8.1), noise.sample(3.3, -8.1));
        // small steps in the argument give small steps in the output
        let a = noise.sample(10.25, 42.7);
        let b = noise.sample(10.26, 42.7);
        assert!((a - b).abs() < 0.05);
    }

    #[test]
    fn huge_and_non_finite_coordinates_are_total() {
        let noise = ShakeNoise::new();
        for (a, b) in [
            (1.0e20, 3.5),
            (-4.0e30, 1.0e12),
            (f32::MAX, f32::MIN),
            (f32::NAN, 2.0),
            (f32::INFINITY, f32::NEG_INFINITY),
        ] {
            let v = noise.sample(a, b);
            assert!((0.0..=1.0).contains(&v), "N({a}, {b}) = {v}");
        }
        assert_eq!(noise.sample(f32::NAN, 7.25), noise.sample(0.0, 7.25));
    }

    #[test]
    fn repeats_every_period() {
        let noise = ShakeNoise::new();
        let a = noise.sample(5.3, 17.6);
        let b = noise.sample(5.3 + 256.0, 17.6 - 512.0);
        assert!((a - b).abs() < 1e-3);
    }

    #[test]
    fn output_varies_across_arguments() {
        let noise = ShakeNoise::new();
        let values: Vec<f32> =
            (0..64).map(|i| noise.sample(i as f32 * 0.37 + 0.1, 9.4)).collect();
        let (lo, hi) = values
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        assert!(hi - lo > 0.1, "range [{lo}, {hi}]");
        assert!(values.iter().any(|&v| (v - 0.5).abs() > 0.05));
    }
}
