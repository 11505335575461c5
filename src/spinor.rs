// SPDX-License-Identifier: AGPL-3.0-only

//! Site-local spinor algebra: 12-component (4 spin × 3 color) vectors and
//! the fixed spin structures of the Wilson stencil.
//!
//! The gamma matrices are kept in the chiral basis of the tmLQCD family of
//! codes, where every row has exactly one nonzero entry equal to ±1 or ±i
//! and γ5 = γ_t γ_x γ_y γ_z = diag(1, 1, −1, −1). Each structure is a
//! constant signed-permutation table, so applying one is a branch-free
//! gather with a single complex factor per spin row — no allocation, no
//! failure path.
//!
//! # References
//!
//! - Gattringer & Lang, "QCD on the Lattice" (2010), App. A.2

use std::ops::{AddAssign, SubAssign};

use crate::color::{ColorMatrix, ColorVector};
use crate::complex::Complex64;

const P1: Complex64 = Complex64::new(1.0, 0.0);
const M1: Complex64 = Complex64::new(-1.0, 0.0);
const PI: Complex64 = Complex64::new(0.0, 1.0);
const MI: Complex64 = Complex64::new(0.0, -1.0);
const Z0: Complex64 = Complex64::new(0.0, 0.0);

/// One of the fixed spin structures acting on the 4-component spin index.
///
/// `T`/`X`/`Y`/`Z` are the directional gamma matrices (direction order of
/// the stencil sweep), `Five` is the chirality operator, `Plus`/`Minus`
/// are the chiral projectors (1 ± γ5)/2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gamma {
    T,
    X,
    Y,
    Z,
    Five,
    Plus,
    Minus,
}

/// Signed-permutation row table: output spin row a reads input spin row
/// `rows[a].0` multiplied by `rows[a].1`.
type GammaRows = [(usize, Complex64); 4];

const GAMMA_T: GammaRows = [(2, M1), (3, M1), (0, M1), (1, M1)];
const GAMMA_X: GammaRows = [(3, MI), (2, MI), (1, PI), (0, PI)];
const GAMMA_Y: GammaRows = [(3, M1), (2, P1), (1, P1), (0, M1)];
const GAMMA_Z: GammaRows = [(2, MI), (3, PI), (0, PI), (1, MI)];
const GAMMA_5: GammaRows = [(0, P1), (1, P1), (2, M1), (3, M1)];
const PROJ_P: GammaRows = [(0, P1), (1, P1), (2, Z0), (3, Z0)];
const PROJ_M: GammaRows = [(0, Z0), (1, Z0), (2, P1), (3, P1)];

impl Gamma {
    /// Directional gamma for stencil direction mu ∈ {0: t, 1: x, 2: y, 3: z}.
    #[inline]
    #[must_use]
    pub const fn direction(mu: usize) -> Self {
        match mu {
            0 => Self::T,
            1 => Self::X,
            2 => Self::Y,
            _ => Self::Z,
        }
    }

    #[inline]
    const fn rows(self) -> &'static GammaRows {
        match self {
            Self::T => &GAMMA_T,
            Self::X => &GAMMA_X,
            Self::Y => &GAMMA_Y,
            Self::Z => &GAMMA_Z,
            Self::Five => &GAMMA_5,
            Self::Plus => &PROJ_P,
            Self::Minus => &PROJ_M,
        }
    }
}

/// 4 spin × 3 color complex vector at one lattice site.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Spinor {
    /// Color vectors indexed by spin: `c[spin][color]`.
    pub c: [ColorVector; 4],
}

impl Spinor {
    /// All-zero spinor.
    pub const ZERO: Self = Self {
        c: [[Complex64::ZERO; 3]; 4],
    };

    /// Apply a spin structure: color components untouched, spin rows
    /// permuted and scaled by the table factors.
    #[inline]
    pub fn gamma(&self, g: Gamma) -> Self {
        let rows = g.rows();
        let mut out = Self::ZERO;
        for (a, (src, f)) in rows.iter().enumerate() {
            for c in 0..3 {
                out.c[a][c] = *f * self.c[*src][c];
            }
        }
        out
    }

    /// Multiply by a real scalar.
    #[inline]
    pub fn scale_re(&self, s: f64) -> Self {
        let mut out = *self;
        for sp in out.c.iter_mut() {
            for c in sp.iter_mut() {
                *c = c.scale(s);
            }
        }
        out
    }

    /// Multiply by the purely imaginary scalar i·a.
    #[inline]
    pub fn scale_im(&self, a: f64) -> Self {
        let mut out = *self;
        for sp in out.c.iter_mut() {
            for c in sp.iter_mut() {
                *c = c.times_i(a);
            }
        }
        out
    }

    /// Hermitian inner product <self | other> = Σ conj(self)·other.
    #[inline]
    pub fn dot(&self, other: &Self) -> Complex64 {
        let mut s = Complex64::ZERO;
        for a in 0..4 {
            for c in 0..3 {
                s += self.c[a][c].conj() * other.c[a][c];
            }
        }
        s
    }

    /// Squared norm.
    #[inline]
    #[must_use]
    pub fn norm_sq(&self) -> f64 {
        self.dot(self).re
    }
}

impl AddAssign for Spinor {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for a in 0..4 {
            for c in 0..3 {
                self.c[a][c] += rhs.c[a][c];
            }
        }
    }
}

impl SubAssign for Spinor {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        for a in 0..4 {
            for c in 0..3 {
                self.c[a][c] -= rhs.c[a][c];
            }
        }
    }
}

/// U·ψ: the color matrix applied to every spin component.
#[inline]
pub fn cm_mul_spinor(u: &ColorMatrix, s: &Spinor) -> Spinor {
    let mut out = Spinor::ZERO;
    for a in 0..4 {
        out.c[a] = u.mul_vec(&s.c[a]);
    }
    out
}

/// U†·ψ: the adjoint color matrix applied to every spin component.
#[inline]
pub fn cm_dag_mul_spinor(u: &ColorMatrix, s: &Spinor) -> Spinor {
    let mut out = Spinor::ZERO;
    for a in 0..4 {
        out.c[a] = u.adjoint_mul_vec(&s.c[a]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::lcg_gaussian;

    fn random_spinor(seed: &mut u64) -> Spinor {
        let mut s = Spinor::ZERO;
        for sp in s.c.iter_mut() {
            for c in sp.iter_mut() {
                *c = Complex64::new(lcg_gaussian(seed), lcg_gaussian(seed));
            }
        }
        s
    }

    fn assert_spinor_eq(a: &Spinor, b: &Spinor, tol: f64, what: &str) {
        for sp in 0..4 {
            for c in 0..3 {
                assert!(
                    (a.c[sp][c].re - b.c[sp][c].re).abs() < tol
                        && (a.c[sp][c].im - b.c[sp][c].im).abs() < tol,
                    "{what}: mismatch at spin {sp} color {c}"
                );
            }
        }
    }

    #[test]
    fn gamma5_is_idempotent() {
        let mut seed = 17u64;
        let s = random_spinor(&mut seed);
        let twice = s.gamma(Gamma::Five).gamma(Gamma::Five);
        assert_spinor_eq(&twice, &s, 1e-15, "gamma5 squared");
    }

    #[test]
    fn directional_gammas_square_to_identity() {
        let mut seed = 29u64;
        for mu in 0..4 {
            let g = Gamma::direction(mu);
            let s = random_spinor(&mut seed);
            let twice = s.gamma(g).gamma(g);
            assert_spinor_eq(&twice, &s, 1e-15, "gamma_mu squared");
        }
    }

    #[test]
    fn gamma5_is_product_of_directional_gammas() {
        let mut seed = 31u64;
        let s = random_spinor(&mut seed);
        let prod = s
            .gamma(Gamma::Z)
            .gamma(Gamma::Y)
            .gamma(Gamma::X)
            .gamma(Gamma::T);
        let direct = s.gamma(Gamma::Five);
        assert_spinor_eq(&prod, &direct, 1e-15, "gamma5 factorization");
    }

    #[test]
    fn directional_gammas_anticommute_with_gamma5() {
        let mut seed = 37u64;
        for mu in 0..4 {
            let g = Gamma::direction(mu);
            let s = random_spinor(&mut seed);
            let mut anti = s.gamma(Gamma::Five).gamma(g);
            anti += s.gamma(g).gamma(Gamma::Five);
            assert!(
                anti.norm_sq() < 1e-28,
                "gamma_{mu} should anticommute with gamma5"
            );
        }
    }

    #[test]
    fn gammas_are_hermitian() {
        let mut seed = 41u64;
        for g in [Gamma::T, Gamma::X, Gamma::Y, Gamma::Z, Gamma::Five] {
            let v = random_spinor(&mut seed);
            let w = random_spinor(&mut seed);
            let lhs = v.gamma(g).dot(&w);
            let rhs = v.dot(&w.gamma(g));
            assert!(
                (lhs.re - rhs.re).abs() < 1e-12 && (lhs.im - rhs.im).abs() < 1e-12,
                "<gv|w> should equal <v|gw> for {g:?}"
            );
        }
    }

    #[test]
    fn projectors_decompose_identity() {
        let mut seed = 43u64;
        let s = random_spinor(&mut seed);

        let p = s.gamma(Gamma::Plus);
        let m = s.gamma(Gamma::Minus);

        // idempotent
        assert_spinor_eq(&p.gamma(Gamma::Plus), &p, 1e-15, "P+ idempotent");
        assert_spinor_eq(&m.gamma(Gamma::Minus), &m, 1e-15, "P- idempotent");

        // orthogonal
        assert!(p.gamma(Gamma::Minus).norm_sq() < 1e-30, "P- P+ = 0");

        // sum to identity
        let mut sum = p;
        sum += m;
        assert_spinor_eq(&sum, &s, 1e-15, "P+ + P- = 1");
    }

    #[test]
    fn dot_is_conjugate_symmetric() {
        let mut seed = 47u64;
        let a = random_spinor(&mut seed);
        let b = random_spinor(&mut seed);
        let ab = a.dot(&b);
        let ba = b.dot(&a);
        assert!((ab.re - ba.re).abs() < 1e-12);
        assert!((ab.im + ba.im).abs() < 1e-12);
    }

    #[test]
    fn color_action_commutes_with_spin_action() {
        let mut seed = 53u64;
        let u = ColorMatrix::random_unitary(&mut seed, 0.4);
        let s = random_spinor(&mut seed);
        let a = cm_mul_spinor(&u, &s.gamma(Gamma::Y));
        let b = cm_mul_spinor(&u, &s).gamma(Gamma::Y);
        assert_spinor_eq(&a, &b, 1e-13, "U and gamma act on different indices");
    }

    #[test]
    fn dag_mul_undoes_mul_for_unitary_links() {
        let mut seed = 59u64;
        let u = ColorMatrix::random_unitary(&mut seed, 0.4);
        let s = random_spinor(&mut seed);
        let back = cm_dag_mul_spinor(&u, &cm_mul_spinor(&u, &s));
        assert_spinor_eq(&back, &s, 1e-10, "U† U = 1");
    }
}
