// SPDX-License-Identifier: AGPL-3.0-only

//! Hopping-parameter expansion combinators.
//!
//! The twisted-mass operator factors as Q ∝ A − H with the site-diagonal
//! twist A_± = 1 ± i·2κμ·γ5. Expanding Q^{-1} in powers of B·H with
//! B = A^{-1} gives the series these combinators evaluate term by term:
//! `bh_n` produces (B H)^n φ for any order n, and `gamma5_bdagh4_gamma5`
//! the fourth-order γ5-sandwiched adjoint term γ5 (B† H)⁴ γ5 φ used when
//! subtracting the leading terms of disconnected loops.
//!
//! Chained hops need fresh halos between applications. The exchange is an
//! injected closure: the single-partition backend passes a no-op (the
//! periodic neighbor tables never leave the local volume), a distributed
//! provider passes its real halo refresh. Each combinator calls the
//! exchange on a buffer immediately after writing it and expects the
//! initial `phi` to arrive with its halo already fresh.

use crate::dirac::apply_hopping;
use crate::field::SpinorField;
use crate::gauge::GaugeField;
use crate::geometry::Lattice;
use crate::params::DiracParams;
use crate::spinor::Gamma;

/// In-place inverse twist: φ ← (1 ± i·2κμ·γ5)^{-1} φ, with the sign
/// picked by `sign` (+1 inverts the +twist, −1 the −twist).
///
/// Since γ5² = 1 the inverse is closed-form:
/// (1 ∓ i·2κμ·γ5) / (1 + (2κμ)²).
pub fn mul_one_pm_imu_inv(phi: &mut SpinorField, sign: f64, params: &DiracParams) {
    let two_kappa_mu = params.two_kappa_mu();
    let norminv = 1.0 / (1.0 + two_kappa_mu * two_kappa_mu);

    for s in &mut phi.data {
        let mut t = *s;
        t += s.gamma(Gamma::Five).scale_im(-sign * two_kappa_mu);
        *s = t.scale_re(norminv);
    }
}

/// xi ← (B H)^n φ, ping-ponging between `xi` and `phi` so no third
/// buffer is needed. `phi` is clobbered for n ≥ 2. The result always
/// lands in `xi`; n = 0 degenerates to a copy.
///
/// `exchange` is called on each buffer right after it is written, so a
/// distributed caller sees every intermediate with a stale halo exactly
/// once and can refresh it before the next hop reads it.
pub fn bh_n<F>(
    xi: &mut SpinorField,
    phi: &mut SpinorField,
    n: usize,
    lat: &Lattice,
    links: &GaugeField,
    params: &DiracParams,
    exchange: &mut F,
) where
    F: FnMut(&mut SpinorField),
{
    for _ in 0..n / 2 {
        apply_hopping(xi, phi, lat, links, params);
        mul_one_pm_imu_inv(xi, 1.0, params);
        exchange(xi);

        apply_hopping(phi, xi, lat, links, params);
        mul_one_pm_imu_inv(phi, 1.0, params);
        exchange(phi);
    }

    if n % 2 == 1 {
        apply_hopping(xi, phi, lat, links, params);
        mul_one_pm_imu_inv(xi, 1.0, params);
        exchange(xi);
    } else {
        xi.copy_from(phi);
    }
}

/// xi ← γ5 (B† H)⁴ γ5 φ, with B† = (1 − i·2κμ·γ5)^{-1}.
///
/// `phi` is read-only; `work` is scratch of the same length as `xi`.
pub fn gamma5_bdagh4_gamma5<F>(
    xi: &mut SpinorField,
    phi: &SpinorField,
    work: &mut SpinorField,
    lat: &Lattice,
    links: &GaugeField,
    params: &DiracParams,
    exchange: &mut F,
) where
    F: FnMut(&mut SpinorField),
{
    for ix in 0..lat.volume() {
        xi.data[ix] = phi.data[ix].gamma(Gamma::Five);
    }

    for _ in 0..2 {
        exchange(xi);
        apply_hopping(work, xi, lat, links, params);
        mul_one_pm_imu_inv(work, -1.0, params);

        exchange(work);
        apply_hopping(xi, work, lat, links, params);
        mul_one_pm_imu_inv(xi, -1.0, params);
    }

    for ix in 0..lat.volume() {
        xi.data[ix] = xi.data[ix].gamma(Gamma::Five);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex64;

    fn noop(_: &mut SpinorField) {}

    fn setup() -> (Lattice, GaugeField, DiracParams) {
        let lat = Lattice::periodic([4, 2, 2, 2]).unwrap();
        let links = GaugeField::random(&lat, 19);
        let params = DiracParams::single_partition(0.131, 0.035);
        (lat, links, params)
    }

    #[test]
    fn zero_input_stays_zero() {
        let (lat, links, params) = setup();
        let mut phi = SpinorField::zeros(lat.volume());
        let mut xi = SpinorField::random(lat.volume(), 6);
        let mut work = SpinorField::random(lat.volume(), 7);

        mul_one_pm_imu_inv(&mut phi, 1.0, &params);
        assert!(phi.norm_sq() < 1e-30);

        bh_n(&mut xi, &mut phi, 5, &lat, &links, &params, &mut noop);
        assert!(xi.norm_sq() < 1e-30);

        gamma5_bdagh4_gamma5(&mut xi, &phi, &mut work, &lat, &links, &params, &mut noop);
        assert!(xi.norm_sq() < 1e-30);
    }

    #[test]
    fn corrector_inverts_the_twist() {
        let (_, _, params) = setup();
        let orig = SpinorField::random(16, 8);

        // Apply A_+ = 1 + i·2κμ·γ5 by hand, then its inverse.
        let mut f = SpinorField::zeros(16);
        f.copy_from(&orig);
        let tkm = params.two_kappa_mu();
        for s in &mut f.data {
            let mut t = *s;
            t += s.gamma(Gamma::Five).scale_im(tkm);
            *s = t;
        }
        mul_one_pm_imu_inv(&mut f, 1.0, &params);

        f.axpy(Complex64::new(-1.0, 0.0), &orig);
        assert!(f.norm_sq() < 1e-28, "B_+ A_+ should be the identity");
    }

    #[test]
    fn opposite_signs_invert_opposite_twists() {
        let (_, _, params) = setup();
        let orig = SpinorField::random(16, 15);

        let mut f = SpinorField::zeros(16);
        f.copy_from(&orig);
        let tkm = params.two_kappa_mu();
        for s in &mut f.data {
            let mut t = *s;
            t += s.gamma(Gamma::Five).scale_im(-tkm);
            *s = t;
        }
        mul_one_pm_imu_inv(&mut f, -1.0, &params);

        f.axpy(Complex64::new(-1.0, 0.0), &orig);
        assert!(f.norm_sq() < 1e-28, "B_- A_- should be the identity");
    }

    #[test]
    fn order_zero_is_a_copy() {
        let (lat, links, params) = setup();
        let mut phi = SpinorField::random(lat.volume(), 3);
        let snapshot = phi.dot(&phi);
        let mut xi = SpinorField::zeros(lat.volume());

        bh_n(&mut xi, &mut phi, 0, &lat, &links, &params, &mut noop);

        let mut d = SpinorField::zeros(lat.volume());
        d.copy_from(&xi);
        d.axpy(Complex64::new(-1.0, 0.0), &phi);
        assert!(d.norm_sq() < 1e-30);
        assert!((phi.dot(&phi).re - snapshot.re).abs() < 1e-30, "n = 0 must not touch phi");
    }

    #[test]
    fn order_one_matches_manual_step() {
        let (lat, links, params) = setup();
        let src = SpinorField::random(lat.volume(), 5);

        let mut phi = SpinorField::zeros(lat.volume());
        phi.copy_from(&src);
        let mut xi = SpinorField::zeros(lat.volume());
        bh_n(&mut xi, &mut phi, 1, &lat, &links, &params, &mut noop);

        let mut expect = SpinorField::zeros(lat.volume());
        apply_hopping(&mut expect, &src, &lat, &links, &params);
        mul_one_pm_imu_inv(&mut expect, 1.0, &params);

        xi.axpy(Complex64::new(-1.0, 0.0), &expect);
        assert!(xi.norm_sq() < 1e-28);
    }

    #[test]
    fn odd_order_composes_even_order() {
        // (B H)^3 = (B H) ∘ (B H)^2 with the identity exchange.
        let (lat, links, params) = setup();
        let src = SpinorField::random(lat.volume(), 11);

        let mut phi = SpinorField::zeros(lat.volume());
        phi.copy_from(&src);
        let mut xi = SpinorField::zeros(lat.volume());
        bh_n(&mut xi, &mut phi, 3, &lat, &links, &params, &mut noop);

        let mut a = SpinorField::zeros(lat.volume());
        let mut b = SpinorField::zeros(lat.volume());
        b.copy_from(&src);
        bh_n(&mut a, &mut b, 2, &lat, &links, &params, &mut noop);
        let mut expect = SpinorField::zeros(lat.volume());
        apply_hopping(&mut expect, &a, &lat, &links, &params);
        mul_one_pm_imu_inv(&mut expect, 1.0, &params);

        xi.axpy(Complex64::new(-1.0, 0.0), &expect);
        assert!(xi.norm_sq() < 1e-26);
    }

    #[test]
    fn exchange_sees_every_intermediate() {
        let (lat, links, params) = setup();
        let mut phi = SpinorField::random(lat.volume(), 2);
        let mut xi = SpinorField::zeros(lat.volume());

        let mut calls = 0usize;
        bh_n(&mut xi, &mut phi, 5, &lat, &links, &params, &mut |_| {
            calls += 1;
        });
        assert_eq!(calls, 5, "one exchange per hop application");
    }

    #[test]
    fn g5_sandwich_matches_manual_composition() {
        let (lat, links, params) = setup();
        let phi = SpinorField::random(lat.volume(), 27);

        let mut xi = SpinorField::zeros(lat.volume());
        let mut work = SpinorField::zeros(lat.volume());
        gamma5_bdagh4_gamma5(&mut xi, &phi, &mut work, &lat, &links, &params, &mut noop);

        // Same thing spelled out step by step.
        let mut cur = SpinorField::zeros(lat.volume());
        cur.copy_from(&phi);
        cur.mul_gamma_inplace(Gamma::Five);
        let mut tmp = SpinorField::zeros(lat.volume());
        for _ in 0..4 {
            apply_hopping(&mut tmp, &cur, &lat, &links, &params);
            mul_one_pm_imu_inv(&mut tmp, -1.0, &params);
            cur.copy_from(&tmp);
        }
        cur.mul_gamma_inplace(Gamma::Five);

        xi.axpy(Complex64::new(-1.0, 0.0), &cur);
        assert!(xi.norm_sq() < 1e-26);
    }
}
