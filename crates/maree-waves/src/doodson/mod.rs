// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! The Doodson engine: 7-vector arguments with Ray-style nodal
//! corrections and linear/Fourier admittance.

mod inference;
mod nodal;
mod table;
mod wave;

pub use inference::Inference;
pub use nodal::NodalCorrections;
pub use table::WaveTable;
pub use wave::Wave;

use maree_astro::Astronomic;
use maree_math::math::normalize_degrees_symmetric;

use crate::{ConstituentId, UnknownConstituentError};

/// The tidal constituents of the Doodson development.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Constituent {
    _2MK3,
    _2MK6,
    _2MN2,
    _2MN6,
    _2MS2,
    _2MS6,
    _2N2,
    _2Q1,
    _2SM2,
    _2SM6,
    Alpha2,
    Beta1,
    Beta2,
    Chi1,
    Delta2,
    Eps2,
    Eta2,
    Gamma2,
    J1,
    K1,
    K2,
    L2,
    L2P,
    Lambda2,
    M1,
    M13,
    M2,
    M3,
    M4,
    M6,
    M8,
    Mf,
    MK3,
    MK4,
    MKS2,
    Mm,
    MN4,
    MO3,
    Mqm,
    MS4,
    MSf,
    MSK6,
    MSm,
    MSN2,
    MSN6,
    MSqm,
    MStm,
    Mtm,
    Mu2,
    N2,
    N2P,
    N4,
    Node,
    Nu2,
    O1,
    OO1,
    P1,
    Phi1,
    Pi1,
    Psi1,
    Q1,
    R2,
    R4,
    Rho1,
    S1,
    S2,
    S4,
    S6,
    Sa,
    Sa1,
    Sigma1,
    SK4,
    SN4,
    SO1,
    Ssa,
    Sta,
    T2,
    Tau1,
    Theta1,
    Ups1,
}

use Constituent::*;

/// Every constituent, in canonical order; a constituent's discriminant is
/// its index here.
pub const ALL: [Constituent; 80] = [
    _2MK3, _2MK6, _2MN2, _2MN6, _2MS2, _2MS6, _2N2, _2Q1, _2SM2, _2SM6, Alpha2,
    Beta1, Beta2, Chi1, Delta2, Eps2, Eta2, Gamma2, J1, K1, K2, L2, L2P, Lambda2,
    M1, M13, M2, M3, M4, M6, M8, Mf, MK3, MK4, MKS2, Mm, MN4, MO3, Mqm, MS4, MSf,
    MSK6, MSm, MSN2, MSN6, MSqm, MStm, Mtm, Mu2, N2, N2P, N4, Node, Nu2, O1, OO1,
    P1, Phi1, Pi1, Psi1, Q1, R2, R4, Rho1, S1, S2, S4, S6, Sa, Sa1, Sigma1, SK4,
    SN4, SO1, Ssa, Sta, T2, Tau1, Theta1, Ups1,
];

const NAMES: [&str; 80] = [
    "2MK3", "2MK6", "2MN2", "2MN6", "2MS2", "2MS6", "2N2", "2Q1", "2SM2",
    "2SM6", "Alpha2", "Beta1", "Beta2", "Chi1", "Delta2", "Eps2", "Eta2",
    "Gamma2", "J1", "K1", "K2", "L2", "L2P", "Lambda2", "M1", "M13", "M2", "M3",
    "M4", "M6", "M8", "Mf", "MK3", "MK4", "MKS2", "Mm", "MN4", "MO3", "Mqm",
    "MS4", "MSf", "MSK6", "MSm", "MSN2", "MSN6", "MSqm", "MStm", "Mtm", "Mu2",
    "N2", "N2P", "N4", "Node", "Nu2", "O1", "OO1", "P1", "Phi1", "Pi1", "Psi1",
    "Q1", "R2", "R4", "Rho1", "S1", "S2", "S4", "S6", "Sa", "Sa1", "Sigma1",
    "SK4", "SN4", "SO1", "Ssa", "Sta", "T2", "Tau1", "Theta1", "Ups1",
];

impl Constituent {
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl ConstituentId for Constituent {
    fn parse(name: &str) -> Result<Self, UnknownConstituentError> {
        NAMES
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .map(|index| ALL[index])
            .ok_or_else(|| UnknownConstituentError(name.to_owned()))
    }

    fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    fn all() -> &'static [Self] {
        &ALL
    }
}

/// Doodson's six astronomical variables `[τ, s, h, p, N′, p₁]` in degrees,
/// normalized to [-180, 180).
pub fn celestial_vector(angles: &Astronomic) -> [f64; 6] {
    let tau = angles.t() - angles.s() + angles.h() - std::f64::consts::PI;
    [
        normalize_degrees_symmetric(tau.to_degrees()),
        normalize_degrees_symmetric(angles.s().to_degrees()),
        normalize_degrees_symmetric(angles.h().to_degrees()),
        normalize_degrees_symmetric(angles.p().to_degrees()),
        normalize_degrees_symmetric(-angles.n().to_degrees()),
        normalize_degrees_symmetric(angles.p1().to_degrees()),
    ]
}

/// Doodson's tidal argument in degrees for the given Doodson number.
pub fn doodson_argument(angles: &Astronomic, doodson: [i8; 7]) -> f64 {
    let beta = celestial_vector(angles);
    let mut argument = f64::from(doodson[6]) * 90.0;
    for (&multiplier, value) in doodson[..6].iter().zip(beta) {
        argument += f64::from(multiplier) * value;
    }
    normalize_degrees_symmetric(argument)
}

/// Frequency in degrees per hour of a wave with the given Doodson number,
/// from the motion of the celestial vector around J2000.
pub fn tidal_frequency(doodson: [i8; 7]) -> f64 {
    use std::sync::OnceLock;

    static RATES: OnceLock<[f64; 6]> = OnceLock::new();

    let rates = RATES.get_or_init(|| {
        use maree_astro::Formulae;

        // Interval of 0.05 day around J2000.
        let t1 = 946_728_000.0;
        let del = 0.05;
        let t2 = t1 + del * 86_400.0;

        let beta1 = celestial_vector(&Astronomic::at(Formulae::Iers, t1));
        let beta2 = celestial_vector(&Astronomic::at(Formulae::Iers, t2));

        let mut rates = [0.0; 6];
        for (rate, (b2, b1)) in rates.iter_mut().zip(beta2.iter().zip(beta1)) {
            *rate = normalize_degrees_symmetric(b2 - b1) / (24.0 * del);
        }
        rates
    });

    doodson[..6]
        .iter()
        .zip(rates)
        .map(|(&multiplier, rate)| f64::from(multiplier) * rate)
        .sum()
}

/// Equilibrium amplitude of the 18.6-year node tide in centimeters, used
/// when the Node donor is not provided by the model. In-phase only: the
/// Doodson argument of the node constituent already carries its 90° shift,
/// so the equilibrium response is the plain cosine row of the order-2
/// potential.
pub fn node_tide(latitude: f64) -> f64 {
    // Order-2 potential row (0, 0, 0, 1, 0) and the long-period Love
    // combination 1 + k₂ − h₂.
    let amplitude = 0.02793;
    let love = 1.0 + 0.299 - 0.606;
    let sin_lat = latitude.to_radians().sin();
    let c20 = (5.0 / (4.0 * std::f64::consts::PI)).sqrt()
        * 1.5f64.mul_add(sin_lat * sin_lat, -0.5);
    amplitude * love * c20 * 1e2
}
