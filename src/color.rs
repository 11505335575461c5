// SPDX-License-Identifier: AGPL-3.0-only

//! 3×3 color matrices and color vectors.
//!
//! A gauge link `U_μ`(x) is a 3×3 unitary matrix acting on the color index
//! of the fermion field; the stencil needs the products U·v and U†·v per
//! spin component, plus real/complex rescaling for boundary phases and
//! antiperiodic sign flips.
//!
//! Storage: row-major, `m[row][col]`.
//!
//! # References
//!
//! - Gattringer & Lang, "QCD on the Lattice" (2010), Ch. 2

use std::ops::Mul;

use crate::complex::Complex64;
use crate::constants::{lcg_gaussian, DIVISION_GUARD};

/// Color vector at one (site, spin) slot: 3 complex components.
pub type ColorVector = [Complex64; 3];

/// 3×3 complex matrix — a gauge link variable.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct ColorMatrix {
    /// Matrix elements `m[row][col]`.
    pub m: [[Complex64; 3]; 3],
}

impl Mul for ColorMatrix {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                let mut s = Complex64::ZERO;
                for k in 0..3 {
                    s += self.m[i][k] * rhs.m[k][j];
                }
                r.m[i][j] = s;
            }
        }
        r
    }
}

impl ColorMatrix {
    /// 3×3 identity.
    pub const IDENTITY: Self = Self {
        m: [
            [Complex64::ONE, Complex64::ZERO, Complex64::ZERO],
            [Complex64::ZERO, Complex64::ONE, Complex64::ZERO],
            [Complex64::ZERO, Complex64::ZERO, Complex64::ONE],
        ],
    };

    /// Zero matrix.
    pub const ZERO: Self = Self {
        m: [[Complex64::ZERO; 3]; 3],
    };

    /// Conjugate transpose (adjoint).
    pub fn adjoint(self) -> Self {
        let mut r = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                r.m[i][j] = self.m[j][i].conj();
            }
        }
        r
    }

    /// Scale every element by a real factor.
    ///
    /// The explicit-antiperiodic stencil variants use this with ±1 on the
    /// temporal links at the time edges.
    pub fn scale(self, s: f64) -> Self {
        let mut r = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                r.m[i][j] = self.m[i][j].scale(s);
            }
        }
        r
    }

    /// Scale every element by a complex factor (boundary-phase folding).
    pub fn scale_complex(self, s: Complex64) -> Self {
        let mut r = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                r.m[i][j] = self.m[i][j] * s;
            }
        }
        r
    }

    /// U·v
    #[inline]
    pub fn mul_vec(&self, v: &ColorVector) -> ColorVector {
        let mut r = [Complex64::ZERO; 3];
        for (c, rc) in r.iter_mut().enumerate() {
            for cp in 0..3 {
                *rc += self.m[c][cp] * v[cp];
            }
        }
        r
    }

    /// U†·v, without forming the adjoint: `r_c` = Σ_c' conj(U_{c',c}) v_c'
    #[inline]
    pub fn adjoint_mul_vec(&self, v: &ColorVector) -> ColorVector {
        let mut r = [Complex64::ZERO; 3];
        for (c, rc) in r.iter_mut().enumerate() {
            for cp in 0..3 {
                *rc += self.m[cp][c].conj() * v[cp];
            }
        }
        r
    }

    /// Frobenius norm squared.
    #[must_use]
    pub fn norm_sq(self) -> f64 {
        let mut s = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                s += self.m[i][j].abs_sq();
            }
        }
        s
    }

    /// Random unitary matrix near the identity, for test configurations.
    ///
    /// Builds exp(i ε H) ≈ 1 + iεH − (εH)²/2 from a random traceless
    /// Hermitian H, then projects back onto the unitary manifold by
    /// Gram-Schmidt on the rows with det fixed via the conjugate cross
    /// product.
    pub fn random_unitary(seed: &mut u64, epsilon: f64) -> Self {
        let mut h = [[Complex64::ZERO; 3]; 3];

        let a3 = lcg_gaussian(seed) * epsilon;
        let a8 = lcg_gaussian(seed) * epsilon;
        h[0][0] = Complex64::new(a3 + a8 / 3.0_f64.sqrt(), 0.0);
        h[1][1] = Complex64::new(-a3 + a8 / 3.0_f64.sqrt(), 0.0);
        h[2][2] = Complex64::new(-2.0 * a8 / 3.0_f64.sqrt(), 0.0);

        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            let re = lcg_gaussian(seed) * epsilon;
            let im = lcg_gaussian(seed) * epsilon;
            h[i][j] = Complex64::new(re, im);
            h[j][i] = Complex64::new(re, -im);
        }

        let mut u = Self::IDENTITY;
        for (i, row) in u.m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell += Complex64::I * h[i][j];
                let h2_ij = (0..3).fold(Complex64::ZERO, |acc, k| acc + h[i][k] * h[k][j]);
                *cell -= h2_ij.scale(0.5);
            }
        }

        u.reunitarize()
    }

    /// Project onto the unitary manifold: orthonormalize rows 0 and 1,
    /// rebuild row 2 as the conjugate cross product so det = 1.
    pub fn reunitarize(self) -> Self {
        let mut u = self;

        let n0 = row_norm(&u, 0);
        if n0 > DIVISION_GUARD {
            let inv = 1.0 / n0;
            for j in 0..3 {
                u.m[0][j] = u.m[0][j].scale(inv);
            }
        }

        let dot01 = row_dot(&u, 0, 1);
        for j in 0..3 {
            u.m[1][j] -= u.m[0][j] * dot01;
        }
        let n1 = row_norm(&u, 1);
        if n1 > DIVISION_GUARD {
            let inv = 1.0 / n1;
            for j in 0..3 {
                u.m[1][j] = u.m[1][j].scale(inv);
            }
        }

        u.m[2][0] = (u.m[0][1] * u.m[1][2] - u.m[0][2] * u.m[1][1]).conj();
        u.m[2][1] = (u.m[0][2] * u.m[1][0] - u.m[0][0] * u.m[1][2]).conj();
        u.m[2][2] = (u.m[0][0] * u.m[1][1] - u.m[0][1] * u.m[1][0]).conj();

        u
    }
}

fn row_norm(u: &ColorMatrix, row: usize) -> f64 {
    let mut s = 0.0;
    for j in 0..3 {
        s += u.m[row][j].abs_sq();
    }
    s.sqrt()
}

fn row_dot(u: &ColorMatrix, r1: usize, r2: usize) -> Complex64 {
    let mut s = Complex64::ZERO;
    for j in 0..3 {
        s += u.m[r1][j].conj() * u.m[r2][j];
    }
    s
}
