// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Per-constituent descriptors of the Darwin catalogue.

use num::complex::Complex64;

use maree_astro::Astronomic;
use maree_math::math::normalize_radians;

use super::Constituent;
use crate::WaveKind;

/// Fundamental rates in degrees per hour (total motion per Julian century
/// divided by its 876 600 hours).
const HOURS_PER_JULIAN_CENTURY: f64 = 36_525.0 * 24.0;
const T_RATE: f64 = 15.0;
const S_RATE: f64 = (1336.0 * 360.0 + 307.892) / HOURS_PER_JULIAN_CENTURY;
const H_RATE: f64 = (100.0 * 360.0 + 0.769) / HOURS_PER_JULIAN_CENTURY;
const P_RATE: f64 = (11.0 * 360.0 + 109.032) / HOURS_PER_JULIAN_CENTURY;
const N_RATE: f64 = (-5.0 * 360.0 - 134.142) / HOURS_PER_JULIAN_CENTURY;
const P1_RATE: f64 = 1.719 / HOURS_PER_JULIAN_CENTURY;

/// Closed-form node-factor formulae (Schureman).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeFactor {
    Unity,
    O1,
    Oo1,
    J1,
    M1,
    M2,
    M3,
    Mf,
    Mm,
    M2Squared,
    M2Cubed,
    M2Fourth,
    K1,
    K2,
    Formula79,
    L2,
    M2K2,
    M2K1,
    M2O1,
    M2L2,
    M2FourthL2,
    O1Squared,
    M2SquaredK1,
    M2SquaredK2,
    M2CubedK2,
    Formula141,
    Formula144,
    Formula146,
    Formula147,
}

impl NodeFactor {
    /// Evaluates the formula for the given astronomical angles.
    pub fn evaluate(self, angles: &Astronomic) -> f64 {
        match self {
            NodeFactor::Unity => angles.f_1(),
            NodeFactor::O1 => angles.f_o1(),
            NodeFactor::Oo1 => angles.f_oo1(),
            NodeFactor::J1 => angles.f_j1(),
            NodeFactor::M1 => angles.f_m1(),
            NodeFactor::M2 => angles.f_m2(),
            NodeFactor::M3 => angles.f_m3(),
            NodeFactor::Mf => angles.f_mf(),
            NodeFactor::Mm => angles.f_mm(),
            NodeFactor::M2Squared => angles.f_m22(),
            NodeFactor::M2Cubed => angles.f_m23(),
            NodeFactor::M2Fourth => angles.f_m24(),
            NodeFactor::K1 => angles.f_k1(),
            NodeFactor::K2 => angles.f_k2(),
            NodeFactor::Formula79 => angles.f_79(),
            NodeFactor::L2 => angles.f_l2(),
            NodeFactor::M2K2 => angles.f_m2_k2(),
            NodeFactor::M2K1 => angles.f_m2_k1(),
            NodeFactor::M2O1 => angles.f_m2_o1(),
            NodeFactor::M2L2 => angles.f_m2_l2(),
            NodeFactor::M2FourthL2 => angles.f_m24_l2(),
            NodeFactor::O1Squared => angles.f_o12(),
            NodeFactor::M2SquaredK1 => angles.f_m22_k1(),
            NodeFactor::M2SquaredK2 => angles.f_m22_k2(),
            NodeFactor::M2CubedK2 => angles.f_m23_k2(),
            NodeFactor::Formula141 => angles.f_141(),
            NodeFactor::Formula144 => angles.f_144(),
            NodeFactor::Formula146 => angles.f_146(),
            NodeFactor::Formula147 => angles.f_147(),
        }
    }
}

/// Secondary correction subtracted from the nodal phase `u`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ArgumentCorrection {
    #[default]
    None,
    /// `u −= R` (Schureman formula 196, constituent L₂).
    R,
    /// `u −= 1/√(2.310 + 1.435·cos 2(p − ξ))` (formula 207, constituent M₁).
    Formula207,
}

impl ArgumentCorrection {
    fn evaluate(self, angles: &Astronomic) -> f64 {
        match self {
            ArgumentCorrection::None => 0.0,
            ArgumentCorrection::R => angles.r(),
            ArgumentCorrection::Formula207 => {
                let p = angles.p() - angles.xi();
                1.0 / 1.435f64.mul_add((2.0 * p).cos(), 2.310).sqrt()
            }
        }
    }
}

/// Immutable part of a wave: the Darwin argument and its modulation rules.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Descriptor {
    pub kind: WaveKind,
    /// True when the constituent may be filled by admittance.
    pub admittance: bool,
    /// Multipliers on `(T, s, h, p, N, p₁, 90°, ξ, ν, ν′, ν″)`.
    pub argument: [i8; 11],
    pub node_factor: NodeFactor,
    pub correction: ArgumentCorrection,
}

/// A constituent descriptor plus its per-evaluation state.
#[derive(Clone, Copy, Debug)]
pub struct Wave {
    ident: Constituent,
    descriptor: Descriptor,
    frequency: f64,
    tide: Complex64,
    v: f64,
    u: f64,
    f: f64,
    modeled: bool,
    dynamic: bool,
}

impl Wave {
    /// Builds the wave descriptor of a constituent with neutral
    /// per-evaluation state.
    pub fn new(ident: Constituent) -> Self {
        let descriptor = descriptor(ident);
        let [t, s, h, p, n, p1, ..] = descriptor.argument;
        let degrees_per_hour = f64::from(t) * T_RATE
            + f64::from(s) * S_RATE
            + f64::from(h) * H_RATE
            + f64::from(p) * P_RATE
            + f64::from(n) * N_RATE
            + f64::from(p1) * P1_RATE;
        Self {
            ident,
            descriptor,
            frequency: degrees_per_hour.to_radians(),
            tide: Complex64::default(),
            v: 0.0,
            u: 0.0,
            f: 1.0,
            modeled: false,
            dynamic: false,
        }
    }

    pub fn ident(&self) -> Constituent {
        self.ident
    }

    pub fn kind(&self) -> WaveKind {
        self.descriptor.kind
    }

    /// True when the constituent may be filled by admittance.
    pub fn admittance(&self) -> bool {
        self.descriptor.admittance
    }

    /// Multipliers on `(T, s, h, p, N, p₁, 90°, ξ, ν, ν′, ν″)`.
    pub fn argument(&self) -> [i8; 11] {
        self.descriptor.argument
    }

    /// Angular frequency in radians per hour.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Period in hours.
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.frequency
    }

    pub fn tide(&self) -> Complex64 {
        self.tide
    }

    pub fn set_tide(&mut self, tide: Complex64) {
        self.tide = tide;
    }

    pub fn modeled(&self) -> bool {
        self.modeled
    }

    pub fn set_modeled(&mut self, modeled: bool) {
        self.modeled = modeled;
    }

    pub fn dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = dynamic;
    }

    /// Greenwich argument V in radians, normalized to [0, 2π).
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Nodal phase correction u in radians.
    pub fn u(&self) -> f64 {
        self.u
    }

    /// Nodal amplitude factor f.
    pub fn f(&self) -> f64 {
        self.f
    }

    /// `V + u` normalized to [0, 2π).
    pub fn vu(&self) -> f64 {
        normalize_radians(self.v + self.u)
    }

    /// Updates `f`, `V` and `u` for the given astronomical angles.
    pub fn compute_nodal_corrections(&mut self, angles: &Astronomic) {
        let [t, s, h, p, _, p1, shift, xi, nu, nuprim, nusec] = self.descriptor.argument;

        self.f = self.descriptor.node_factor.evaluate(angles);

        let v = f64::from(t) * angles.t()
            + f64::from(s) * angles.s()
            + f64::from(h) * angles.h()
            + f64::from(p) * angles.p()
            + f64::from(p1) * angles.p1()
            + f64::from(shift) * std::f64::consts::FRAC_PI_2;

        let u = f64::from(xi) * angles.xi()
            + f64::from(nu) * angles.nu()
            + f64::from(nuprim) * angles.nuprim()
            + f64::from(nusec) * angles.nusec()
            - self.descriptor.correction.evaluate(angles);

        self.v = normalize_radians(v);
        self.u = u;
    }

    /// `f · (Re(z)·cos(V+u) + Im(z)·sin(V+u))`.
    pub fn corrected_tide(&self) -> f64 {
        crate::corrected_tide(self.tide, self.f, self.vu())
    }

    /// The 7-element Doodson number equivalent to the Darwin argument.
    pub fn doodson_numbers(&self) -> [i8; 7] {
        crate::xdo::darwin_to_doodson(self.descriptor.argument)
    }

    /// XDO numerical code of the wave.
    pub fn xdo_numerical(&self) -> String {
        crate::xdo::encode_numerical(self.doodson_numbers())
            .expect("catalogue arguments are encodable")
    }

    /// XDO alphabetical code of the wave.
    pub fn xdo_alphabetical(&self) -> String {
        crate::xdo::encode_alphabetical(self.doodson_numbers())
            .expect("catalogue arguments are encodable")
    }
}

/// Shorthand for the catalogue below.
const fn desc(
    kind: WaveKind,
    admittance: bool,
    argument: [i8; 11],
    node_factor: NodeFactor,
    correction: ArgumentCorrection,
) -> Descriptor {
    Descriptor {
        kind,
        admittance,
        argument,
        node_factor,
        correction,
    }
}

/// The Darwin coefficient catalogue. Argument order is
/// `(T, s, h, p, N, p₁, 90°, ξ, ν, ν′, ν″)`.
pub(crate) fn descriptor(ident: Constituent) -> Descriptor {
    use ArgumentCorrection::{Formula207, R};
    use Constituent::*;
    use NodeFactor as F;
    use WaveKind::{LongPeriod as Lp, ShortPeriod as Sp};

    const NONE: ArgumentCorrection = ArgumentCorrection::None;

    match ident {
        Mm => desc(Lp, false, [0, 1, 0, -1, 0, 0, 0, 0, 0, 0, 0], F::Mm, NONE),
        Mf => desc(Lp, false, [0, 2, 0, 0, 0, 0, 0, -2, 0, 0, 0], F::Mf, NONE),
        Mtm => desc(Lp, false, [0, 3, 0, -1, 0, 0, 0, -2, 0, 0, 0], F::Mf, NONE),
        MSqm => desc(Lp, false, [0, 4, -2, 0, 0, 0, 0, -2, 0, 0, 0], F::Mf, NONE),
        Ssa => desc(Lp, false, [0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0], F::Unity, NONE),
        Sa => desc(Lp, false, [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0], F::Unity, NONE),
        MSf => desc(Lp, false, [0, 2, -2, 0, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        A5 => desc(Lp, false, [0, 2, -2, 0, 0, 0, 0, 0, 0, 0, 0], F::Mm, NONE),
        Sa1 => desc(Lp, false, [0, 0, 1, 0, 0, -1, 0, 0, 0, 0, 0], F::Unity, NONE),
        Sta => desc(Lp, false, [0, 0, 3, 0, 0, -1, 0, 0, 0, 0, 0], F::Unity, NONE),
        Mm2 => desc(Lp, false, [0, 1, 0, 0, 0, 0, -1, -1, 0, 0, 0], F::Formula141, NONE),
        Mm1 => desc(Lp, false, [0, 1, 0, 1, 0, 0, 2, -2, 0, 0, 0], F::Mf, NONE),
        Mf1 => desc(Lp, false, [0, 2, 0, -2, 0, 0, 0, 0, 0, 0, 0], F::Mm, NONE),
        Mf2 => desc(Lp, false, [0, 2, 0, -1, 0, 0, -1, -1, 0, 0, 0], F::Formula141, NONE),
        M0 => desc(Lp, false, [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], F::Mm, NONE),
        _2Q1 => desc(Sp, true, [1, -4, 1, 2, 0, 0, 1, 2, -1, 0, 0], F::O1, NONE),
        Sigma1 => desc(Sp, true, [1, -4, 3, 0, 0, 0, 1, 2, -1, 0, 0], F::O1, NONE),
        Q1 => desc(Sp, false, [1, -3, 1, 1, 0, 0, 1, 2, -1, 0, 0], F::O1, NONE),
        Rho1 => desc(Sp, true, [1, -3, 3, -1, 0, 0, 1, 2, -1, 0, 0], F::O1, NONE),
        O1 => desc(Sp, false, [1, -2, 1, 0, 0, 0, 1, 2, -1, 0, 0], F::O1, NONE),
        MP1 => desc(Sp, false, [1, -2, 3, 0, 0, 0, -1, 0, -1, 0, 0], F::J1, NONE),
        M1 => desc(Sp, false, [1, -1, 1, 1, 0, 0, -1, 0, -1, 0, 0], F::M1, Formula207),
        M11 => desc(Sp, true, [1, -1, 1, -1, 0, 0, -1, 2, -1, 0, 0], F::O1, NONE),
        M12 => desc(Sp, true, [1, -1, 1, 1, 0, 0, -1, 0, -1, 0, 0], F::J1, NONE),
        M13 => desc(Sp, true, [1, -1, 1, 0, 0, 0, 0, 1, -1, 0, 0], F::Formula144, NONE),
        Chi1 => desc(Sp, true, [1, -1, 3, -1, 0, 0, -1, 0, -1, 0, 0], F::J1, NONE),
        Pi1 => desc(Sp, true, [1, 0, -2, 0, 0, 1, 1, 0, 0, 0, 0], F::Unity, NONE),
        P1 => desc(Sp, false, [1, 0, -1, 0, 0, 0, 1, 0, 0, 0, 0], F::Unity, NONE),
        S1 => desc(Sp, false, [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], F::Unity, NONE),
        K1 => desc(Sp, false, [1, 0, 1, 0, 0, 0, -1, 0, 0, -1, 0], F::K1, NONE),
        Psi1 => desc(Sp, false, [1, 0, 2, 0, 0, -1, -1, 0, 0, 0, 0], F::Unity, NONE),
        Phi1 => desc(Sp, true, [1, 0, 3, 0, 0, 0, -1, 0, 0, 0, 0], F::Unity, NONE),
        Theta1 => desc(Sp, true, [1, 1, -1, 1, 0, 0, -1, 0, -1, 0, 0], F::J1, NONE),
        J1 => desc(Sp, true, [1, 1, 1, -1, 0, 0, -1, 0, -1, 0, 0], F::J1, NONE),
        OO1 => desc(Sp, true, [1, 2, 1, 0, 0, 0, -1, -2, -1, 0, 0], F::Oo1, NONE),
        SO1 => desc(Sp, false, [1, 2, -1, 0, 0, 0, -1, 0, -1, 0, 0], F::O1, NONE),
        MNS2 => desc(Sp, false, [2, -5, 4, 1, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        Eps2 => desc(Sp, true, [2, -5, 4, 1, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        _2NS2 => desc(Sp, false, [2, -6, 4, 2, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        MNuS2 => desc(Sp, false, [2, -5, 6, -1, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        _2N2 => desc(Sp, true, [2, -4, 2, 2, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        Mu2 => desc(Sp, true, [2, -4, 4, 0, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        _2MS2 => desc(Sp, false, [2, -4, 4, 0, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        _2MK2 => desc(Sp, false, [2, -4, 2, 0, 0, 0, 0, 4, -4, 0, 2], F::M2SquaredK2, NONE),
        N2 => desc(Sp, false, [2, -3, 2, 1, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        N2P => desc(Sp, false, [2, -3, 2, 0, 0, 0, 1, 3, -2, 0, 0], F::Formula146, NONE),
        Nu2 => desc(Sp, true, [2, -3, 4, -1, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        M2 => desc(Sp, false, [2, -2, 2, 0, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        MKS2 => desc(Sp, false, [2, -2, 4, 0, 0, 0, 0, 2, -2, 0, -2], F::M2K2, NONE),
        MSK2 => desc(Sp, false, [2, -2, 0, 0, 0, 0, 0, 2, -2, 0, 2], F::M2K2, NONE),
        Lambda2 => desc(Sp, true, [2, -1, 0, 1, 0, 0, 2, 2, -2, 0, 0], F::M2, NONE),
        L2 => desc(Sp, true, [2, -1, 2, -1, 0, 0, 2, 2, -2, 0, 0], F::L2, R),
        L2P => desc(Sp, false, [2, -1, 2, 0, 0, 0, -1, 1, -2, 0, 0], F::Formula147, NONE),
        _2MN2 => desc(Sp, false, [2, -1, 2, -1, 0, 0, 2, 2, -2, 0, 0], F::M2Cubed, NONE),
        NKM2 => desc(Sp, false, [2, -1, 2, 1, 0, 0, 0, 0, 0, 0, -2], F::M2SquaredK2, NONE),
        T2 => desc(Sp, true, [2, 0, -1, 0, 0, 1, 0, 0, 0, 0, 0], F::Unity, NONE),
        S2 => desc(Sp, false, [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], F::Unity, NONE),
        R2 => desc(Sp, false, [2, 0, 1, 0, 0, -1, 2, 0, 0, 0, 0], F::Unity, NONE),
        K2 => desc(Sp, false, [2, 0, 2, 0, 0, 0, 0, 0, 0, 0, -2], F::K2, NONE),
        MSN2 => desc(Sp, false, [2, 1, 0, -1, 0, 0, 0, 0, 0, 0, 0], F::M2Squared, NONE),
        Eta2 => desc(Sp, true, [2, 1, 2, -1, 0, 0, 0, 0, -2, 0, 0], F::Formula79, NONE),
        _2SM2 => desc(Sp, false, [2, 2, -2, 0, 0, 0, 0, -2, 2, 0, 0], F::M2, NONE),
        SKM2 => desc(Sp, false, [2, 2, 0, 0, 0, 0, 0, -2, 2, 0, -2], F::M2K2, NONE),
        _2SMu2 => desc(Sp, false, [2, 4, -4, 0, 0, 0, 0, -2, 2, 0, 0], F::M2, NONE),
        OQ2 => desc(Sp, false, [2, -5, 2, 1, 0, 0, 2, 0, 0, 0, 0], F::O1Squared, NONE),
        MO3 => desc(Sp, false, [3, -4, 3, 0, 0, 0, 1, 4, -3, 0, 0], F::M2O1, NONE),
        _2MK3 => desc(Sp, false, [3, -4, 3, 0, 0, 0, 1, 4, -4, 1, 0], F::M2SquaredK1, NONE),
        M3 => desc(Sp, false, [3, -3, 3, 0, 0, 0, 0, 3, -3, 0, 0], F::M3, NONE),
        MK3 => desc(Sp, false, [3, -2, 3, 0, 0, 0, -1, 2, -2, -1, 0], F::M2K1, NONE),
        SO3 => desc(Sp, false, [3, -2, 1, 0, 0, 0, 1, 2, -1, 0, 0], F::O1, NONE),
        SK3 => desc(Sp, false, [3, 0, 1, 0, 0, 0, -1, 0, 0, -1, 0], F::K1, NONE),
        N4 => desc(Sp, false, [4, -6, 4, 2, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        _2MNS4 => desc(Sp, false, [4, -7, 6, 1, 0, 0, 0, 6, -6, 0, 0], F::M2Cubed, NONE),
        MN4 => desc(Sp, false, [4, -5, 4, 1, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        MNu4 => desc(Sp, false, [4, -5, 6, -1, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        M4 => desc(Sp, false, [4, -4, 4, 0, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        _3MS4 => desc(Sp, false, [4, -6, 6, 0, 0, 0, 0, 6, -6, 0, 0], F::M2Cubed, NONE),
        SN4 => desc(Sp, false, [4, -3, 2, 1, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        NK4 => desc(Sp, false, [4, -3, 4, 1, 0, 0, 0, 2, -2, 0, -2], F::M2K2, NONE),
        MS4 => desc(Sp, false, [4, -2, 2, 0, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        MK4 => desc(Sp, false, [4, -2, 4, 0, 0, 0, 0, 2, -2, 0, -2], F::M2K2, NONE),
        ML4 => desc(Sp, false, [4, -3, 4, -1, 0, 0, 0, 4, -4, 0, 0], F::M2L2, NONE),
        _2MSN4 => desc(Sp, false, [4, -1, 2, -1, 0, 0, 0, 2, -2, 0, 0], F::M2Cubed, NONE),
        S4 => desc(Sp, false, [4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], F::Unity, NONE),
        SK4 => desc(Sp, false, [4, 0, 2, 0, 0, 0, 0, 0, 0, 0, -2], F::K2, NONE),
        R4 => desc(Sp, false, [4, 0, 2, 0, 0, -2, 0, 0, 0, 0, 0], F::Unity, NONE),
        _2MP5 => desc(Sp, false, [5, -4, 3, 0, 0, 0, 1, 4, -4, 0, 0], F::M2Squared, NONE),
        _2MN6 => desc(Sp, false, [6, -7, 6, 1, 0, 0, 0, 6, -6, 0, 0], F::M2Cubed, NONE),
        M6 => desc(Sp, false, [6, -6, 6, 0, 0, 0, 0, 6, -6, 0, 0], F::M2Cubed, NONE),
        MSN6 => desc(Sp, false, [6, -5, 4, 1, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        MNK6 => desc(Sp, false, [6, -5, 6, 1, 0, 0, 0, 4, -4, 0, -2], F::M2SquaredK2, NONE),
        _2NM6 => desc(Sp, false, [6, -8, 6, 2, 0, 0, 0, 6, -6, 0, 0], F::M2FourthL2, NONE),
        _2MS6 => desc(Sp, false, [6, -4, 4, 0, 0, 0, 0, 4, -4, 0, 0], F::M2Squared, NONE),
        _2MK6 => desc(Sp, false, [6, -4, 6, 0, 0, 0, 0, 4, -4, 0, -2], F::M2CubedK2, NONE),
        _2SM6 => desc(Sp, false, [6, -2, 2, 0, 0, 0, 0, 2, -2, 0, 0], F::M2, NONE),
        MSK6 => desc(Sp, false, [6, -2, 4, 0, 0, 0, 0, 2, -2, -2, 0], F::M2K2, NONE),
        S6 => desc(Sp, false, [6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], F::Unity, NONE),
        M8 => desc(Sp, false, [8, -8, 8, 0, 0, 0, 0, 8, -8, 0, 0], F::M2Fourth, NONE),
        _3MS8 => desc(Sp, false, [8, -6, 6, 0, 0, 0, 0, 6, -6, 0, 0], F::M2Cubed, NONE),
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;
    use rstest::rstest;

    use super::*;
    use crate::ConstituentId;

    #[rstest]
    #[case::o1(Constituent::O1, 13.9430356)]
    #[case::p1(Constituent::P1, 14.9589314)]
    #[case::s1(Constituent::S1, 15.0)]
    #[case::k1(Constituent::K1, 15.0410686)]
    #[case::q1(Constituent::Q1, 13.3986609)]
    #[case::_2n2(Constituent::_2N2, 27.8953548)]
    #[case::mu2(Constituent::Mu2, 27.9682084)]
    #[case::n2(Constituent::N2, 28.4397295)]
    #[case::nu2(Constituent::Nu2, 28.5125831)]
    #[case::m2(Constituent::M2, 28.9841042)]
    #[case::l2(Constituent::L2, 29.5284789)]
    #[case::t2(Constituent::T2, 29.9589333)]
    #[case::s2(Constituent::S2, 30.0)]
    #[case::k2(Constituent::K2, 30.0821373)]
    #[case::m4(Constituent::M4, 57.9682084)]
    fn test_frequencies(#[case] ident: Constituent, #[case] degrees_per_hour: f64) {
        let wave = Wave::new(ident);
        assert_float_eq!(
            wave.frequency().to_degrees(),
            degrees_per_hour,
            abs <= 1e-7
        );
    }

    #[test]
    fn test_every_constituent_has_a_descriptor() {
        for &ident in Constituent::all() {
            let wave = Wave::new(ident);
            assert!(wave.frequency() >= 0.0, "{ident:?}");
        }
    }

    #[test]
    fn test_long_period_waves_have_no_solar_angle() {
        for &ident in Constituent::all() {
            let wave = Wave::new(ident);
            if wave.kind() == WaveKind::LongPeriod {
                assert_eq!(wave.argument()[0], 0, "{ident:?}");
            }
        }
    }

    #[test]
    fn test_node_factor_unity() {
        use maree_astro::{Astronomic, Formulae};

        let angles = Astronomic::at(Formulae::SchuremanOrder1, 0.0);
        let mut wave = Wave::new(Constituent::S2);
        wave.compute_nodal_corrections(&angles);
        assert_float_eq!(wave.f(), 1.0, abs <= 1e-15);
        assert_float_eq!(wave.u(), 0.0, abs <= 1e-15);
    }

    #[test]
    fn test_v_normalized() {
        use maree_astro::{Astronomic, Formulae};

        let angles = Astronomic::at(Formulae::SchuremanOrder1, 123_456_789.0);
        for &ident in Constituent::all() {
            let mut wave = Wave::new(ident);
            wave.compute_nodal_corrections(&angles);
            assert!(
                (0.0..std::f64::consts::TAU).contains(&wave.v()),
                "{ident:?}: v = {}",
                wave.v()
            );
        }
    }
}
