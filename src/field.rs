// SPDX-License-Identifier: AGPL-3.0-only

//! Spinor field storage and the BLAS-1 style helpers external solvers
//! expect from the operator's vector space.
//!
//! A field owns one `Spinor` per site. The length is a constructor
//! argument rather than a property of the geometry so the same type can
//! carry a 4D field, a 5D field (L5·volume sites, slice-major), or a
//! field with a distributed provider's halo tail. Halo contents are
//! whatever the last exchange left there — operators never write them.

use crate::complex::Complex64;
use crate::constants::{lcg_step, LCG_53_DIVISOR};
use crate::spinor::{Gamma, Spinor};

/// Fermion field: one 12-component spinor per site.
pub struct SpinorField {
    pub data: Vec<Spinor>,
}

impl SpinorField {
    /// All-zero field over `n` sites.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![Spinor::ZERO; n],
        }
    }

    /// Deterministic random field (uniform in [−0.5, 0.5) per component),
    /// for stochastic sources and tests.
    #[must_use]
    pub fn random(n: usize, seed: u64) -> Self {
        let mut rng = seed;
        let mut draw = move || {
            lcg_step(&mut rng);
            (rng >> 11) as f64 / LCG_53_DIVISOR - 0.5
        };
        let mut data = vec![Spinor::ZERO; n];
        for site in &mut data {
            for sp in site.c.iter_mut() {
                for c in sp.iter_mut() {
                    let re = draw();
                    let im = draw();
                    *c = Complex64::new(re, im);
                }
            }
        }
        Self { data }
    }

    /// Number of sites (including any halo tail).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// <self | other> = Σ_x Σ_{spin,color} conj(self)·other
    #[must_use]
    pub fn dot(&self, other: &Self) -> Complex64 {
        let mut s = Complex64::ZERO;
        for (a, b) in self.data.iter().zip(other.data.iter()) {
            s += a.dot(b);
        }
        s
    }

    /// ||self||²
    #[must_use]
    pub fn norm_sq(&self) -> f64 {
        self.data.iter().map(Spinor::norm_sq).sum()
    }

    /// self += a·x
    pub fn axpy(&mut self, a: Complex64, x: &Self) {
        for (s, xs) in self.data.iter_mut().zip(x.data.iter()) {
            for sp in 0..4 {
                for c in 0..3 {
                    s.c[sp][c] += a * xs.c[sp][c];
                }
            }
        }
    }

    /// self *= a
    pub fn scale_inplace(&mut self, a: f64) {
        for s in &mut self.data {
            *s = s.scale_re(a);
        }
    }

    /// Zero every site.
    pub fn zero(&mut self) {
        for s in &mut self.data {
            *s = Spinor::ZERO;
        }
    }

    /// Copy every site from another field of the same length.
    pub fn copy_from(&mut self, other: &Self) {
        self.data.copy_from_slice(&other.data);
    }

    /// Apply a spin structure at every site, in place.
    pub fn mul_gamma_inplace(&mut self, g: Gamma) {
        for s in &mut self.data {
            *s = s.gamma(g);
        }
    }
}
