// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Nodal corrections of the Doodson engine.
//!
//! The standard set expresses `f` and `u` as sine/cosine series in the
//! node and perigee longitudes; compound constituents combine the
//! corrections of their parents. The group-modulation variant replaces
//! the series of selected constituents with richer expansions over
//! `(h, p, N, p₁)` and falls back to the standard set elsewhere.

use super::Constituent;

/// Nodal amplitude factor and phase correction (degrees).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodalCorrections {
    pub f: f64,
    /// Phase correction in degrees.
    pub u: f64,
}

impl NodalCorrections {
    fn from_terms(term1: f64, term2: f64) -> Self {
        Self {
            f: term1.hypot(term2),
            u: term1.atan2(term2).to_degrees(),
        }
    }
}

/// Standard correction for one constituent. `omega` and `perigee` are the
/// longitudes of the lunar node and perigee in degrees.
pub fn standard(omega: f64, perigee: f64, ident: Constituent) -> NodalCorrections {
    use Constituent::*;

    let n = omega.to_radians();
    let p = perigee.to_radians();
    let (sinn, cosn) = n.sin_cos();
    let (sin2n, cos2n) = (2.0 * n).sin_cos();
    let (sin2p, cos2p) = (2.0 * p).sin_cos();

    let (term1, term2) = match ident {
        Mm | MSm => (
            -0.0534 * sin2p - 0.0219 * (2.0 * p - n).sin(),
            1.0 - 0.1308 * cosn - 0.0534 * cos2p - 0.0219 * (2.0 * p - n).cos(),
        ),
        Mf | MSqm | Mqm => (
            -0.04324 * sin2p - 0.41465 * sinn - 0.03873 * sin2n,
            1.0 + 0.04324 * cos2p + 0.41465 * cosn + 0.03873 * cos2n,
        ),
        // Linear tide, not compound.
        MSf => (0.137 * sinn, 1.0),
        Mtm => (
            -0.018 * sin2p - 0.4145 * sinn - 0.040 * sin2n,
            1.0 + 0.018 * cos2p + 0.4145 * cosn + 0.040 * cos2n,
        ),
        MStm => (
            -0.380 * sin2p - 0.413 * sinn - 0.037 * sin2n,
            1.0 + 0.380 * cos2p + 0.413 * cosn + 0.037 * cos2n,
        ),
        O1 => (
            0.1886 * sinn - 0.0058 * sin2n - 0.0065 * sin2p,
            1.0 + 0.1886 * cosn - 0.0058 * cos2n - 0.0065 * cos2p,
        ),
        _2Q1 | Q1 | Rho1 | Sigma1 => (0.1886 * sinn, 1.0 + 0.1886 * cosn),
        Tau1 => (0.219 * sinn, 1.0 - 0.219 * cosn),
        Beta1 => (0.226 * sinn, 1.0 + 0.226 * cosn),
        // Assumes the M1 argument includes p.
        M1 => (
            -0.2294 * sinn - 0.3594 * sin2p - 0.0664 * (2.0 * p - n).sin(),
            1.0 + 0.1722 * cosn + 0.3594 * cos2p + 0.0664 * (2.0 * p - n).cos(),
        ),
        Chi1 => (-0.250 * sinn, 1.0 + 0.193 * cosn),
        P1 => (-0.0112 * sinn, 1.0 - 0.0112 * cosn),
        K1 => (
            -0.1554 * sinn + 0.0031 * sin2n,
            1.0 + 0.1158 * cosn - 0.0028 * cos2n,
        ),
        J1 | Theta1 => (-0.227 * sinn, 1.0 + 0.169 * cosn),
        OO1 | Ups1 => (
            -0.640 * sinn - 0.134 * sin2n - 0.150 * sin2p,
            1.0 + 0.640 * cosn + 0.134 * cos2n + 0.150 * cos2p,
        ),
        M2 | _2N2 | Mu2 | N2 | Nu2 | Lambda2 | MS4 | Eps2 | SN4 | _2SM6 => (
            -0.03731 * sinn + 0.00052 * sin2n,
            1.0 - 0.03731 * cosn + 0.00052 * cos2n,
        ),
        N2P => (
            0.1705 * sinn - 0.0035 * sin2n - 0.0176 * sin2p,
            1.0 + 0.1705 * cosn - 0.0035 * cos2n - 0.0176 * cos2p,
        ),
        L2 => (
            -0.250 * sin2p - 0.110 * (2.0 * p - n).sin() - 0.037 * sinn,
            1.0 - 0.250 * cos2p - 0.110 * (2.0 * p - n).cos() - 0.037 * cosn,
        ),
        L2P => (-0.2495 * sinn, 1.0 + 0.1315 * cosn),
        K2 | SK4 => (
            -0.3108 * sinn - 0.0324 * sin2n,
            1.0 + 0.2853 * cosn + 0.0324 * cos2n,
        ),
        Gamma2 => (
            0.147 * (2.0 * (n - p)).sin(),
            1.0 + 0.147 * (2.0 * (n - p)).cos(),
        ),
        Delta2 => (
            0.505 * sin2p + 0.505 * sinn - 0.165 * sin2n,
            1.0 - 0.505 * cos2p - 0.505 * cosn + 0.165 * cos2n,
        ),
        Eta2 => (-0.436 * sinn, 1.0 + 0.436 * cosn),
        S2 => (0.00225 * sinn, 1.0 + 0.00225 * cosn),
        // Linear 3rd-degree terms.
        M3 => (-0.05644 * sinn, 1.0 - 0.05644 * cosn),
        M13 => (-0.01815 * sinn, 1.0 - 0.27837 * cosn),
        _ => (0.0, 1.0),
    };

    let correction = NodalCorrections::from_terms(term1, term2);
    if term1 != 0.0 {
        return correction;
    }

    // Compound constituents combine their parents' corrections.
    let parent = |ident| standard(omega, perigee, ident);
    match ident {
        SO1 => {
            let o1 = parent(O1);
            NodalCorrections { f: o1.f, u: -o1.u }
        }
        M4 | MN4 | N4 | _2MS2 | MSN6 | _2MS6 => {
            let m2 = parent(M2);
            NodalCorrections {
                f: m2.f * m2.f,
                u: 2.0 * m2.u,
            }
        }
        MSN2 => {
            let m2 = parent(M2);
            NodalCorrections {
                f: m2.f * m2.f,
                u: 0.0,
            }
        }
        _2MN2 => {
            let m2 = parent(M2);
            NodalCorrections {
                f: m2.f.powi(3),
                u: m2.u,
            }
        }
        _2SM2 => {
            let m2 = parent(M2);
            NodalCorrections { f: m2.f, u: -m2.u }
        }
        M6 | _2MN6 => {
            let m2 = parent(M2);
            NodalCorrections {
                f: m2.f.powi(3),
                u: 3.0 * m2.u,
            }
        }
        M8 => {
            let m2 = parent(M2);
            NodalCorrections {
                f: m2.f.powi(4),
                u: 4.0 * m2.u,
            }
        }
        MK4 | MKS2 => {
            let (m2, k2) = (parent(M2), parent(K2));
            NodalCorrections {
                f: m2.f * k2.f,
                u: m2.u + k2.u,
            }
        }
        MSK6 => {
            let (m2, k2) = (parent(M2), parent(K2));
            NodalCorrections {
                f: m2.f * k2.f,
                u: m2.u - k2.u,
            }
        }
        _2MK6 => {
            let (m2, k2) = (parent(M2), parent(K2));
            NodalCorrections {
                f: m2.f * m2.f * k2.f,
                u: 2.0 * m2.u + k2.u,
            }
        }
        MO3 => {
            let (m2, o1) = (parent(M2), parent(O1));
            NodalCorrections {
                f: m2.f * o1.f,
                u: m2.u + o1.u,
            }
        }
        MK3 => {
            let (m2, k1) = (parent(M2), parent(K1));
            NodalCorrections {
                f: m2.f * k1.f,
                u: m2.u + k1.u,
            }
        }
        _2MK3 => {
            let (m2, k1) = (parent(M2), parent(K1));
            NodalCorrections {
                f: m2.f * m2.f * k1.f,
                u: 2.0 * m2.u - k1.u,
            }
        }
        _ => correction,
    }
}

/// Group-modulation correction. `perihelion`, `omega`, `perigee` and
/// `hsolar` are the solar-perigee, node, lunar-perigee and solar
/// longitudes in degrees.
pub fn group(
    perihelion: f64,
    omega: f64,
    perigee: f64,
    hsolar: f64,
    ident: Constituent,
) -> NodalCorrections {
    use Constituent::*;

    let h = hsolar.to_radians();
    let p = perigee.to_radians();
    let o = -omega.to_radians();
    let pp = perihelion.to_radians();

    let (term1, term2) = match ident {
        Mm => (
            -0.0137 * (-2.0 * h + 2.0 * p - o).sin()
                + 0.1912 * (-2.0 * h + 2.0 * p).sin()
                - 0.0125 * (-2.0 * h + 2.0 * p + o).sin()
                - 0.0657 * (-o).sin()
                - 0.0653 * o.sin()
                - 0.0534 * (2.0 * p).sin()
                - 0.0219 * (2.0 * p + o).sin()
                - 0.0139 * (2.0 * h).sin(),
            1.0 + 0.0137 * (2.0 * h - 2.0 * p - o).cos()
                + 0.1912 * (-2.0 * h + 2.0 * p).cos()
                - 0.0125 * (-2.0 * h + 2.0 * p + o).cos()
                - 0.1309 * o.cos()
                - 0.0534 * (2.0 * p).cos()
                - 0.0219 * (2.0 * p + o).cos()
                - 0.0139 * (2.0 * h).cos(),
        ),
        Mf => (
            0.0875 * (-2.0 * h).sin()
                + 0.0432 * (-2.0 * p).sin()
                + 0.4145 * o.sin()
                + 0.0387 * (2.0 * o).sin(),
            1.0 + 0.0875 * (2.0 * h).cos()
                + 0.0432 * (2.0 * p).cos()
                + 0.4145 * o.cos()
                + 0.0387 * (2.0 * o).cos(),
        ),
        Mtm => (
            0.0721 * (-2.0 * h).sin()
                + 0.1897 * (-2.0 * h + 2.0 * p).sin()
                + 0.0784 * (-2.0 * h + 2.0 * p + o).sin()
                + 0.4146 * o.sin(),
            1.0 + 0.0721 * (2.0 * h).cos()
                + 0.1897 * (-2.0 * h + 2.0 * p).cos()
                + 0.0784 * (-2.0 * h + 2.0 * p + o).cos()
                + 0.4146 * o.cos(),
        ),
        Mqm => (
            1.207 * (-2.0 * h + 2.0 * p).sin()
                + 0.497 * (-2.0 * h + 2.0 * p + o).sin()
                + 0.414 * o.sin(),
            1.0 + 1.207 * (-2.0 * h + 2.0 * p).cos()
                + 0.497 * (-2.0 * h + 2.0 * p + o).cos()
                + 0.414 * o.cos(),
        ),
        _2Q1 => (
            0.1886 * (-o).sin()
                + 0.2274 * (2.0 * h - 2.0 * p - o).sin()
                + 1.2086 * (2.0 * h - 2.0 * p).sin(),
            1.0 + 0.1886 * o.cos()
                + 0.2274 * (2.0 * h - 2.0 * p - o).cos()
                + 1.2086 * (2.0 * h - 2.0 * p).cos(),
        ),
        Sigma1 => (
            0.1561 * (-2.0 * h + 2.0 * p - o).sin() - 0.1882 * o.sin()
                + 0.7979 * (-2.0 * h + 2.0 * p).sin()
                + 0.0815 * (h - pp).sin(),
            1.0 + 0.1561 * (-2.0 * h + 2.0 * p - o).cos()
                + 0.1882 * o.cos()
                + 0.8569 * (-2.0 * h + 2.0 * p).cos()
                + 0.0538 * (h - pp).cos(),
        ),
        Q1 => (
            0.1886 * (-o).sin()
                + 0.0359 * (2.0 * h - 2.0 * p - o).sin()
                + 0.1901 * (2.0 * h - 2.0 * p).sin(),
            1.0 + 0.1886 * o.cos()
                + 0.0359 * (2.0 * h - 2.0 * p - o).cos()
                + 0.1901 * (2.0 * h - 2.0 * p).cos(),
        ),
        O1 => (
            -0.0058 * (-2.0 * o).sin() + 0.1886 * (-o).sin()
                - 0.0065 * (2.0 * p).sin()
                - 0.0131 * (2.0 * h).sin(),
            1.0 - 0.0058 * (2.0 * o).cos() + 0.1886 * o.cos()
                - 0.0065 * (2.0 * p).cos()
                - 0.0131 * (2.0 * h).cos(),
        ),
        // Central line is 155.655.
        M1 => (
            0.0941 * (-2.0 * h).sin()
                + 0.0664 * (-2.0 * p - o).sin()
                + 0.3594 * (-2.0 * p).sin()
                + 0.2008 * o.sin()
                + 0.1910 * (2.0 * h - 2.0 * p).sin()
                + 0.0422 * (2.0 * h - 2.0 * p + o).sin(),
            1.0 + 0.0941 * (2.0 * h).cos()
                + 0.0664 * (2.0 * p + o).cos()
                + 0.3594 * (2.0 * p).cos()
                + 0.2008 * o.cos()
                + 0.1910 * (2.0 * h - 2.0 * p).cos()
                + 0.0422 * (2.0 * h - 2.0 * p + o).cos(),
        ),
        K1 => (
            -0.0184 * (-3.0 * h + pp).sin()
                + 0.0036 * (-2.0 * h - o).sin()
                + 0.3166 * (2.0 * h).sin()
                - 0.0026 * (h + pp).sin()
                + 0.0075 * (-h + pp).sin()
                + 0.1558 * o.sin()
                - 0.0030 * (2.0 * o).sin()
                + 0.0049 * (h - pp).sin()
                + 0.0128 * (2.0 * h).sin(),
            1.0 - 0.0184 * (-3.0 * h + pp).cos()
                + 0.0036 * (2.0 * h + o).cos()
                - 0.3166 * (2.0 * h).cos()
                + 0.0026 * (h + pp).cos()
                + 0.0075 * (h - pp).cos()
                + 0.1164 * o.cos()
                - 0.0030 * (2.0 * o).cos()
                + 0.0049 * (h - pp).cos()
                + 0.0128 * (2.0 * h).cos(),
        ),
        J1 => (
            0.1922 * (-2.0 * h + 2.0 * p).sin()
                + 0.0378 * (-2.0 * h + 2.0 * p + o).sin()
                + 0.2268 * o.sin()
                - 0.0155 * (2.0 * p).sin(),
            1.0 + 0.1922 * (-2.0 * h + 2.0 * p).cos()
                + 0.0378 * (-2.0 * h + 2.0 * p + o).cos()
                + 0.1701 * o.cos()
                - 0.0155 * (2.0 * p).cos(),
        ),
        OO1 => (
            0.3029 * (-2.0 * h).sin()
                + 0.0593 * (-2.0 * h + o).sin()
                + 0.1497 * (-2.0 * p).sin()
                + 0.6404 * o.sin()
                + 0.1337 * (2.0 * o).sin(),
            1.0 + 0.3029 * (-2.0 * h).cos()
                + 0.0593 * (-2.0 * h + o).cos()
                + 0.1497 * (-2.0 * p).cos()
                + 0.6404 * o.cos()
                + 0.1337 * (2.0 * o).cos(),
        ),
        Eps2 => (
            0.385 * (-2.0 * h + 2.0 * p).sin(),
            1.0 + 0.385 * (-2.0 * h + 2.0 * p).cos(),
        ),
        // Better is Mu2 unless 2MS2 is active.
        _2N2 => (
            0.0374 * o.sin() + 1.2064 * (2.0 * h - 2.0 * p).sin()
                - 0.0139 * (-h + pp).sin()
                - 0.0170 * (h - 2.0 * p + pp).sin()
                - 0.0104 * (h - p).sin()
                + 0.0156 * (h - pp).sin()
                - 0.0448 * (2.0 * h - 2.0 * p - o).sin()
                + 0.0808 * (3.0 * h - 2.0 * p - 4.939).sin()
                + 0.0369 * (4.0 * h - 4.0 * p).sin(),
            1.0 - 0.0374 * o.cos() + 1.2064 * (2.0 * h - 2.0 * p).cos()
                - 0.0139 * (-h + pp).cos()
                - 0.0170 * (h - 2.0 * p + pp).cos()
                - 0.0104 * (h - p).cos()
                + 0.0156 * (h - pp).cos()
                - 0.0448 * (2.0 * h - 2.0 * p - o).cos()
                + 0.0808 * (3.0 * h - 2.0 * p - 4.939).cos()
                + 0.0369 * (4.0 * h - 4.0 * p).cos(),
        ),
        Mu2 => (
            -0.0115 * (-3.0 * h + 2.0 * p + pp).sin()
                - 0.0310 * (-2.0 * h + 2.0 * p - o).sin()
                + 0.8289 * (-2.0 * h + 2.0 * p).sin()
                - 0.0140 * (-h + pp).sin()
                - 0.0086 * (-h + p).sin()
                + 0.0130 * (-h + 2.0 * p - pp).sin()
                + 0.0371 * o.sin()
                + 0.0670 * (h - pp).sin()
                + 0.0306 * (2.0 * h - 2.0 * p).sin(),
            1.0 - 0.0115 * (-3.0 * h + 2.0 * p + pp).cos()
                - 0.0310 * (-2.0 * h + 2.0 * p - o).cos()
                + 0.8289 * (-2.0 * h + 2.0 * p).cos()
                - 0.0140 * (-h + pp).cos()
                - 0.0086 * (-h + p).cos()
                + 0.0130 * (-h + 2.0 * p - pp).cos()
                - 0.0371 * o.cos()
                + 0.0670 * (h - pp).cos()
                + 0.0306 * (2.0 * h - 2.0 * p).cos(),
        ),
        N2 => (
            -0.0084 * (-h + pp).sin() - 0.0373 * (-o).sin()
                + 0.0093 * (h - pp).sin()
                + 0.1899 * (2.0 * h - 2.0 * p).sin()
                - 0.0071 * (2.0 * h - 2.0 * p - o).sin(),
            1.0 - 0.0084 * (-h + pp).cos() - 0.0373 * o.cos()
                + 0.0093 * (h - pp).cos()
                + 0.1899 * (2.0 * h - 2.0 * p).cos()
                - 0.0071 * (2.0 * h - 2.0 * p - o).cos(),
        ),
        M2 => (
            -0.0030 * (-2.0 * h + 2.0 * p).sin() - 0.0373 * (-o).sin()
                + 0.0065 * (h - pp).sin()
                + 0.0011 * (2.0 * h).sin(),
            1.0 - 0.0030 * (-2.0 * h + 2.0 * p).cos() - 0.0373 * o.cos()
                - 0.0004 * (h - pp).cos()
                + 0.0011 * (2.0 * h).cos(),
        ),
        L2 => (
            0.2609 * (-2.0 * h + 2.0 * p).sin() - 0.0370 * (-o).sin()
                - 0.2503 * (2.0 * p).sin()
                - 0.1103 * (2.0 * p + o).sin()
                - 0.0491 * (2.0 * h).sin()
                - 0.0230 * (2.0 * h + o).sin(),
            1.0 + 0.2609 * (-2.0 * h + 2.0 * p).cos() - 0.0370 * o.cos()
                - 0.2503 * (2.0 * p).cos()
                - 0.1103 * (2.0 * p + o).cos()
                - 0.0491 * (2.0 * h).cos()
                - 0.0230 * (2.0 * h + o).cos(),
        ),
        S2 => (
            0.0585 * (-h + pp).sin() - 0.0084 * (h - pp).sin()
                + 0.2720 * (2.0 * h).sin()
                + 0.0811 * (2.0 * h + o).sin()
                + 0.0088 * (2.0 * h + 2.0 * o).sin(),
            1.0 + 0.0585 * (-h + pp).cos() - 0.0084 * (h - pp).cos()
                + 0.2720 * (2.0 * h).cos()
                + 0.0811 * (2.0 * h + o).cos()
                + 0.0088 * (2.0 * h + 2.0 * o).cos(),
        ),
        _ => (0.0, 0.0),
    };

    if term2 == 0.0 {
        standard(omega, perigee, ident)
    } else {
        NodalCorrections::from_terms(term1, term2)
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::ConstituentId;

    #[test]
    fn test_neutral_node_at_zero() {
        // With the node and perigee at zero every sine term vanishes.
        let c = standard(0.0, 0.0, Constituent::S4);
        assert_float_eq!(c.f, 1.0, abs <= 1e-12);
        assert_float_eq!(c.u, 0.0, abs <= 1e-12);
    }

    #[test]
    fn test_m2_compounds() {
        let omega = 35.0;
        let perigee = 110.0;
        let m2 = standard(omega, perigee, Constituent::M2);
        let m4 = standard(omega, perigee, Constituent::M4);
        let m6 = standard(omega, perigee, Constituent::M6);
        let m8 = standard(omega, perigee, Constituent::M8);

        assert_float_eq!(m4.f, m2.f * m2.f, rel <= 1e-12);
        assert_float_eq!(m4.u, 2.0 * m2.u, rel <= 1e-12);
        assert_float_eq!(m6.f, m2.f.powi(3), rel <= 1e-12);
        assert_float_eq!(m6.u, 3.0 * m2.u, rel <= 1e-12);
        assert_float_eq!(m8.f, m2.f.powi(4), rel <= 1e-12);
        assert_float_eq!(m8.u, 4.0 * m2.u, rel <= 1e-12);
    }

    #[test]
    fn test_mixed_compounds() {
        let omega = -63.0;
        let perigee = 20.0;
        let m2 = standard(omega, perigee, Constituent::M2);
        let k1 = standard(omega, perigee, Constituent::K1);
        let k2 = standard(omega, perigee, Constituent::K2);
        let o1 = standard(omega, perigee, Constituent::O1);

        let mk3 = standard(omega, perigee, Constituent::MK3);
        assert_float_eq!(mk3.f, m2.f * k1.f, rel <= 1e-12);
        assert_float_eq!(mk3.u, m2.u + k1.u, rel <= 1e-12);

        let mk4 = standard(omega, perigee, Constituent::MK4);
        assert_float_eq!(mk4.f, m2.f * k2.f, rel <= 1e-12);
        assert_float_eq!(mk4.u, m2.u + k2.u, rel <= 1e-12);

        let mo3 = standard(omega, perigee, Constituent::MO3);
        assert_float_eq!(mo3.f, m2.f * o1.f, rel <= 1e-12);
        assert_float_eq!(mo3.u, m2.u + o1.u, rel <= 1e-12);

        let so1 = standard(omega, perigee, Constituent::SO1);
        assert_float_eq!(so1.f, o1.f, rel <= 1e-12);
        assert_float_eq!(so1.u, -o1.u, rel <= 1e-12);
    }

    #[test]
    fn test_f_is_positive_everywhere() {
        for omega in (-180..180).step_by(30) {
            for perigee in (-180..180).step_by(45) {
                for &ident in Constituent::all() {
                    let c = standard(f64::from(omega), f64::from(perigee), ident);
                    assert!(c.f > 0.0, "{ident:?} at {omega}/{perigee}: f = {}", c.f);
                }
            }
        }
    }

    #[test]
    fn test_group_falls_back_to_standard() {
        // R2 has no group series; both paths must agree.
        let standard_value = standard(12.0, 34.0, Constituent::R2);
        let group_value = group(56.0, 12.0, 34.0, 78.0, Constituent::R2);
        assert_eq!(standard_value, group_value);
    }

    #[test]
    fn test_group_differs_where_defined() {
        let standard_value = standard(12.0, 34.0, Constituent::M2);
        let group_value = group(283.0, 12.0, 34.0, 100.0, Constituent::M2);
        assert!((standard_value.f - group_value.f).abs() > 1e-6);
    }
}
