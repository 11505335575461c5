// SPDX-License-Identifier: AGPL-3.0-only

//! dirac-stencil — lattice QCD Dirac stencil operator family
//!
//! Nearest-neighbor fermion operators on a 4D Euclidean lattice: the
//! Wilson and twisted-mass operators, their hopping-parameter expansion
//! combinators, and the 5D domain-wall extension. Sweeps are pure
//! functions of (field, links, geometry, parameters); distribution
//! enters only through the neighbor tables and an injected halo
//! exchange, so the single-partition backend here doubles as the test
//! oracle for any distributed provider.
//!
//! ## Modules
//!   - `complex` — minimal f64 complex arithmetic for the kernels
//!   - `constants` — color/spin dimensions, deterministic LCG for tests
//!   - `color` — SU(3)-like color vectors and matrices
//!   - `spinor` — 4-spinors and the chiral gamma basis (signed tables)
//!   - `geometry` — site indexing and periodic neighbor tables
//!   - `field` — spinor fields and BLAS-1 helpers for external solvers
//!   - `gauge` — link storage and boundary-phase folding
//!   - `params` — run parameters (kappa, mu, 5D couplings, process grid)
//!   - `error` — construction-time validation errors
//!   - `dirac` — the 4D operator family (Q, γ5·Q, hopping, Wilson variants)
//!   - `hpe` — hopping-expansion combinators ((B·H)^n, γ5(B†H)⁴γ5)
//!   - `domain_wall` — 5D domain-wall operator and the 4D ↔ 5D reshape

pub mod color;
pub mod complex;
pub mod constants;
pub mod dirac;
pub mod domain_wall;
pub mod error;
pub mod field;
pub mod gauge;
pub mod geometry;
pub mod hpe;
pub mod params;
pub mod spinor;
