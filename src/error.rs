// SPDX-License-Identifier: AGPL-3.0-only

//! Typed errors for lattice and parameter construction.
//!
//! The stencil sweeps themselves are total and infallible — once geometry,
//! gauge field, and parameters are validated there is no recoverable
//! failure mode inside an operator application (mismatched buffers are a
//! caller bug, guarded by `debug_assert!`). Everything that can go wrong
//! goes wrong at construction time, and does so with a pattern-matchable
//! enum rather than an opaque string.

use std::fmt;

/// Errors from lattice, gauge-field, or parameter construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StencilError {
    /// A lattice extent is zero (dimension index in sweep order t,x,y,z).
    ZeroExtent { dim: usize },

    /// A field or link buffer does not match the lattice volume.
    VolumeMismatch { expected: usize, got: usize },

    /// The hopping parameter must be positive.
    NonPositiveKappa,

    /// The 5th dimension needs at least two slices for the domain-wall
    /// boundary coupling to be well defined.
    ExtentTooSmall5d { l5: usize },

    /// Process time coordinate lies outside the process grid.
    BadProcessGrid { proc_t: usize, nproc_t: usize },
}

impl fmt::Display for StencilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroExtent { dim } => {
                write!(f, "lattice extent in dimension {dim} is zero")
            }
            Self::VolumeMismatch { expected, got } => {
                write!(f, "buffer holds {got} sites, lattice needs {expected}")
            }
            Self::NonPositiveKappa => write!(f, "hopping parameter kappa must be > 0"),
            Self::ExtentTooSmall5d { l5 } => {
                write!(f, "domain-wall extent L5 = {l5}, need at least 2")
            }
            Self::BadProcessGrid { proc_t, nproc_t } => {
                write!(
                    f,
                    "process time coordinate {proc_t} outside grid of extent {nproc_t}"
                )
            }
        }
    }
}

impl std::error::Error for StencilError {}
