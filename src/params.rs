// SPDX-License-Identifier: AGPL-3.0-only

//! Run parameters for the operator family.
//!
//! What a legacy lattice code keeps in mutable globals (kappa, mu, the
//! 5D couplings, the process grid) lives here in one explicit struct, so
//! every operator call is a pure function of its arguments and two runs
//! with the same parameters are bit-identical. The struct is serde-enabled
//! so the external input-file layer can deserialize it directly.

use serde::{Deserialize, Serialize};

use crate::complex::Complex64;
use crate::error::StencilError;

/// Boundary-condition policy for the gauge links in each direction.
///
/// `Periodic` leaves the links as stored. `AntiperiodicTime` and
/// `Twisted` are realized by folding a unit-modulus phase per direction
/// into the links once, up front (see `GaugeField::fold_boundary_phase`);
/// the stencil sweeps themselves stay policy-agnostic. The explicit
/// sign-flip alternative lives in the operator family itself
/// (`apply_wilson_antiperiodic`), not here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// No phase: links used exactly as stored.
    Periodic,
    /// Antiperiodic in time via the phase e^{iπ/T_global} on every
    /// temporal link (twist angle 1 in the time direction).
    AntiperiodicTime,
    /// Arbitrary twist angles per direction, in units of π over the
    /// global extent.
    Twisted { theta: [f64; 4] },
}

impl BoundaryPolicy {
    /// Per-direction link phase for a lattice of the given global extents.
    #[must_use]
    pub fn phases(&self, global_dims: [usize; 4]) -> [Complex64; 4] {
        let theta = match self {
            Self::Periodic => [0.0; 4],
            Self::AntiperiodicTime => [1.0, 0.0, 0.0, 0.0],
            Self::Twisted { theta } => *theta,
        };
        let mut phases = [Complex64::ONE; 4];
        for mu in 0..4 {
            phases[mu] = Complex64::from_polar(std::f64::consts::PI * theta[mu] / global_dims[mu] as f64);
        }
        phases
    }
}

/// Scalar parameters of the Dirac operator family, fixed for a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiracParams {
    /// Hopping parameter of the 4D operator (> 0).
    pub kappa: f64,
    /// Twisted-mass parameter.
    pub mu: f64,
    /// Hopping parameter of the 5D domain-wall operator (> 0).
    pub kappa5: f64,
    /// Domain-wall mass coupling the two boundary slices.
    pub m5: f64,
    /// Extent of the 5th dimension (number of flavor slices, ≥ 2).
    pub l5: usize,
    /// Boundary-condition policy for link-phase folding.
    pub boundary: BoundaryPolicy,
    /// Time coordinate of this process in the process grid.
    pub proc_t: usize,
    /// Extent of the process grid in the time direction.
    pub nproc_t: usize,
}

impl DiracParams {
    /// Parameters for a single-partition run (process grid 1×1×1×1).
    #[must_use]
    pub fn single_partition(kappa: f64, mu: f64) -> Self {
        Self {
            kappa,
            mu,
            kappa5: kappa,
            m5: 0.0,
            l5: 2,
            boundary: BoundaryPolicy::Periodic,
            proc_t: 0,
            nproc_t: 1,
        }
    }

    /// Check the invariants the sweeps assume.
    pub fn validate(&self) -> Result<(), StencilError> {
        if !(self.kappa > 0.0) || !(self.kappa5 > 0.0) {
            return Err(StencilError::NonPositiveKappa);
        }
        if self.l5 < 2 {
            return Err(StencilError::ExtentTooSmall5d { l5: self.l5 });
        }
        if self.proc_t >= self.nproc_t {
            return Err(StencilError::BadProcessGrid {
                proc_t: self.proc_t,
                nproc_t: self.nproc_t,
            });
        }
        Ok(())
    }

    /// 1/(2κ), the 4D mass-term coefficient.
    #[inline]
    #[must_use]
    pub fn one_over_two_kappa(&self) -> f64 {
        0.5 / self.kappa
    }

    /// 2κμ, the dimensionless twisted-mass combination of the corrector.
    #[inline]
    #[must_use]
    pub fn two_kappa_mu(&self) -> f64 {
        2.0 * self.kappa * self.mu
    }

    /// 1/(2κ5), the 5D identity-part coefficient.
    #[inline]
    #[must_use]
    pub fn one_over_two_kappa5(&self) -> f64 {
        0.5 / self.kappa5
    }

    /// Does this process own the global t = 0 edge?
    #[inline]
    #[must_use]
    pub fn owns_time_origin(&self) -> bool {
        self.proc_t == 0
    }

    /// Does this process own the global t = T_global − 1 edge?
    #[inline]
    #[must_use]
    pub fn owns_time_end(&self) -> bool {
        self.proc_t + 1 == self.nproc_t
    }
}
