// SPDX-License-Identifier: AGPL-3.0-only

//! Shared constants and the deterministic test-source PRNG.
//!
//! The LCG (Knuth MMIX parameters) is used for random spinor sources and
//! random link configurations in tests. Determinism matters: the stencil
//! operators are cross-validated between serial and parallel sweeps, so
//! test inputs must be reproducible from a seed alone.

/// Number of colors (SU(3)).
pub const N_COLORS: usize = 3;

/// Number of spin components of a Wilson fermion.
pub const N_SPIN: usize = 4;

/// Number of spacetime dimensions of the 4D stencil.
pub const N_DIM: usize = 4;

/// LCG multiplier (Knuth MMIX).
pub const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// LCG increment (Knuth MMIX).
pub const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// Divisor for the 53-bit LCG → uniform [0, 1) conversion.
pub const LCG_53_DIVISOR: f64 = (1u64 << 53) as f64;

/// Guard against ln(0) in the Box-Muller transform.
pub const DIVISION_GUARD: f64 = 1e-30;

/// Advance the LCG state by one step.
#[inline]
pub fn lcg_step(seed: &mut u64) {
    *seed = seed
        .wrapping_mul(LCG_MULTIPLIER)
        .wrapping_add(LCG_INCREMENT);
}

/// Uniform f64 in [0, 1) from 53 bits of LCG state.
#[inline]
pub fn lcg_uniform_f64(seed: &mut u64) -> f64 {
    lcg_step(seed);
    (*seed >> 11) as f64 / LCG_53_DIVISOR
}

/// Box-Muller Gaussian deviate N(0, 1) from two LCG draws.
#[inline]
pub fn lcg_gaussian(seed: &mut u64) -> f64 {
    let u1 = lcg_uniform_f64(seed);
    let u2 = lcg_uniform_f64(seed);
    (-2.0 * u1.max(DIVISION_GUARD).ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
