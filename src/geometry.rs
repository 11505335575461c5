// SPDX-License-Identifier: AGPL-3.0-only

//! Lattice topology: site indexing and neighbor tables.
//!
//! The stencil operators only ever ask three questions of the geometry:
//! how many local sites are there, who is the forward neighbor of site x
//! in direction mu, and who is the backward neighbor. `Lattice` answers
//! them from precomputed tables, the moral equivalent of the `g_iup`/
//! `g_idn` arrays every lattice code carries.
//!
//! This provider is single-partition and wraps periodically, which makes
//! it the identity-exchange test backend: no neighbor index ever points
//! past `volume()`. A distributed provider would hand out indices into a
//! halo tail beyond the local volume and pair the field with a real
//! exchange call; the operator sweeps are written against indices, not
//! coordinates, so they are oblivious to the difference.
//!
//! Conventions: `dims = [T, LX, LY, LZ]`, direction order t,x,y,z
//! (mu = 0..4), site index z-fastest:
//! `idx = ((t·LX + x)·LY + y)·LZ + z`.

use crate::error::StencilError;

/// Single-partition periodic 4D lattice with precomputed neighbor tables.
#[derive(Debug)]
pub struct Lattice {
    dims: [usize; 4],
    volume: usize,
    fwd: Vec<[usize; 4]>,
    bwd: Vec<[usize; 4]>,
}

impl Lattice {
    /// Build a periodic lattice. Fails on any zero extent.
    pub fn periodic(dims: [usize; 4]) -> Result<Self, StencilError> {
        for (dim, &n) in dims.iter().enumerate() {
            if n == 0 {
                return Err(StencilError::ZeroExtent { dim });
            }
        }
        let volume = dims[0] * dims[1] * dims[2] * dims[3];

        let mut fwd = vec![[0usize; 4]; volume];
        let mut bwd = vec![[0usize; 4]; volume];
        for idx in 0..volume {
            let x = Self::coords_of(dims, idx);
            for mu in 0..4 {
                let mut up = x;
                up[mu] = (x[mu] + 1) % dims[mu];
                let mut dn = x;
                dn[mu] = (x[mu] + dims[mu] - 1) % dims[mu];
                fwd[idx][mu] = Self::index_of(dims, up);
                bwd[idx][mu] = Self::index_of(dims, dn);
            }
        }

        Ok(Self {
            dims,
            volume,
            fwd,
            bwd,
        })
    }

    const fn index_of(dims: [usize; 4], x: [usize; 4]) -> usize {
        ((x[0] * dims[1] + x[1]) * dims[2] + x[2]) * dims[3] + x[3]
    }

    const fn coords_of(dims: [usize; 4], idx: usize) -> [usize; 4] {
        let z = idx % dims[3];
        let rem = idx / dims[3];
        let y = rem % dims[2];
        let rem = rem / dims[2];
        let x = rem % dims[1];
        let t = rem / dims[1];
        [t, x, y, z]
    }

    /// Extents `[T, LX, LY, LZ]`.
    #[must_use]
    pub const fn dims(&self) -> [usize; 4] {
        self.dims
    }

    /// Number of local sites.
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.volume
    }

    /// Sites per time slice (LX·LY·LZ).
    #[must_use]
    pub const fn spatial_volume(&self) -> usize {
        self.dims[1] * self.dims[2] * self.dims[3]
    }

    /// Linear index of coordinates `[t, x, y, z]`.
    #[must_use]
    pub const fn site_index(&self, x: [usize; 4]) -> usize {
        Self::index_of(self.dims, x)
    }

    /// Coordinates `[t, x, y, z]` of a linear index.
    #[must_use]
    pub const fn site_coords(&self, idx: usize) -> [usize; 4] {
        Self::coords_of(self.dims, idx)
    }

    /// Time slice of a site.
    #[must_use]
    pub const fn time_slice(&self, idx: usize) -> usize {
        idx / self.spatial_volume()
    }

    /// Forward neighbor of `idx` in direction `mu`.
    #[inline]
    #[must_use]
    pub fn fwd(&self, idx: usize, mu: usize) -> usize {
        self.fwd[idx][mu]
    }

    /// Backward neighbor of `idx` in direction `mu`.
    #[inline]
    #[must_use]
    pub fn bwd(&self, idx: usize, mu: usize) -> usize {
        self.bwd[idx][mu]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extent_is_rejected() {
        let err = Lattice::periodic([4, 4, 0, 4]).unwrap_err();
        assert_eq!(err, StencilError::ZeroExtent { dim: 2 });
    }

    #[test]
    fn index_coords_roundtrip() {
        let lat = Lattice::periodic([4, 6, 8, 10]).unwrap();
        for idx in 0..lat.volume() {
            assert_eq!(lat.site_index(lat.site_coords(idx)), idx);
        }
    }

    #[test]
    fn neighbors_are_inverse() {
        let lat = Lattice::periodic([4, 3, 3, 3]).unwrap();
        for idx in 0..lat.volume() {
            for mu in 0..4 {
                assert_eq!(lat.bwd(lat.fwd(idx, mu), mu), idx);
                assert_eq!(lat.fwd(lat.bwd(idx, mu), mu), idx);
            }
        }
    }

    #[test]
    fn periodic_wrap_in_time() {
        let lat = Lattice::periodic([4, 2, 2, 2]).unwrap();
        let origin = lat.site_index([0, 1, 1, 1]);
        let top = lat.site_index([3, 1, 1, 1]);
        assert_eq!(lat.bwd(origin, 0), top);
        assert_eq!(lat.fwd(top, 0), origin);
    }

    #[test]
    fn time_slice_from_index() {
        let lat = Lattice::periodic([5, 2, 3, 2]).unwrap();
        for idx in 0..lat.volume() {
            assert_eq!(lat.time_slice(idx), lat.site_coords(idx)[0]);
        }
    }
}
