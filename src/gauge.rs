// SPDX-License-Identifier: AGPL-3.0-only

//! Gauge-link storage: one color matrix per (site, direction).
//!
//! Links are stored flat as `links[site·4 + mu]`, direction order t,x,y,z.
//! Boundary phases (twisted or antiperiodic-in-time) are folded into the
//! links once, up front, so the phase-folded stencil variants read links
//! verbatim. The store is owned by the caller in production (gauge I/O and
//! smearing are external); the constructors here exist for tests and for
//! the single-partition backend.

use crate::color::ColorMatrix;
use crate::complex::Complex64;
use crate::error::StencilError;
use crate::geometry::Lattice;

/// Gauge field on the local lattice: `links[site·4 + mu]`.
#[derive(Debug)]
pub struct GaugeField {
    links: Vec<ColorMatrix>,
    volume: usize,
}

impl GaugeField {
    /// Cold configuration: every link is the identity.
    #[must_use]
    pub fn cold(lat: &Lattice) -> Self {
        Self {
            links: vec![ColorMatrix::IDENTITY; lat.volume() * 4],
            volume: lat.volume(),
        }
    }

    /// Deterministic random unitary configuration for tests.
    #[must_use]
    pub fn random(lat: &Lattice, seed: u64) -> Self {
        let mut rng = seed;
        let links = (0..lat.volume() * 4)
            .map(|_| ColorMatrix::random_unitary(&mut rng, 0.4))
            .collect();
        Self {
            links,
            volume: lat.volume(),
        }
    }

    /// Adopt caller-provided links (length must be 4·volume).
    pub fn from_links(lat: &Lattice, links: Vec<ColorMatrix>) -> Result<Self, StencilError> {
        if links.len() != lat.volume() * 4 {
            return Err(StencilError::VolumeMismatch {
                expected: lat.volume() * 4,
                got: links.len(),
            });
        }
        Ok(Self {
            links,
            volume: lat.volume(),
        })
    }

    /// `U_mu`(x)
    #[inline]
    #[must_use]
    pub fn link(&self, site: usize, mu: usize) -> &ColorMatrix {
        &self.links[site * 4 + mu]
    }

    /// Replace `U_mu`(x).
    pub fn set_link(&mut self, site: usize, mu: usize, u: ColorMatrix) {
        self.links[site * 4 + mu] = u;
    }

    /// Number of sites the store covers.
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.volume
    }

    /// Fold a per-direction unit phase into every link.
    ///
    /// Applying this with `BoundaryPolicy::phases` realizes twisted or
    /// antiperiodic boundary conditions without touching the sweeps. The
    /// folding is multiplicative, so calling it with the conjugate phases
    /// undoes it.
    pub fn fold_boundary_phase(&mut self, phases: [Complex64; 4]) {
        for site in 0..self.volume {
            for (mu, phase) in phases.iter().enumerate() {
                let idx = site * 4 + mu;
                self.links[idx] = self.links[idx].scale_complex(*phase);
            }
        }
    }
}
