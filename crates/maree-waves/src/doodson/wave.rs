// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Per-constituent descriptors of the Doodson catalogue.

use num::complex::Complex64;

use maree_astro::Astronomic;
use maree_math::math::normalize_radians;

use super::{doodson_argument, Constituent};
use crate::WaveKind;

/// A constituent keyed by its 7-element Doodson number, plus the
/// per-evaluation state.
#[derive(Clone, Copy, Debug)]
pub struct Wave {
    ident: Constituent,
    kind: WaveKind,
    doodson: [i8; 7],
    tide: Complex64,
    /// Doodson tidal argument, degrees.
    argument: f64,
    f: f64,
    /// Nodal phase correction, degrees.
    u: f64,
    modeled: bool,
    dynamic: bool,
}

/// The Doodson numbers `(τ, s, h, p, N′, p₁, ×90°)` of the catalogue.
fn doodson_numbers(ident: Constituent) -> ([i8; 7], WaveKind) {
    use Constituent::*;
    use WaveKind::{LongPeriod as Lp, ShortPeriod as Sp};

    match ident {
        _2MK3 => ([3, -1, 0, 0, 0, 0, 3], Sp),
        _2MK6 => ([6, 2, 0, 0, 0, 0, 0], Sp),
        _2MN2 => ([2, 1, 0, -1, 0, 0, 0], Sp),
        _2MN6 => ([6, -1, 0, 1, 0, 0, 0], Sp),
        _2MS2 => ([2, -2, 2, 0, 0, 0, 0], Sp),
        _2MS6 => ([6, 2, -2, 0, 0, 0, 0], Sp),
        _2N2 => ([2, -2, 0, 2, 0, 0, 0], Sp),
        _2Q1 => ([1, -3, 0, 2, 0, 0, 3], Sp),
        _2SM2 => ([2, 4, -4, 0, 0, 0, 0], Sp),
        _2SM6 => ([6, 4, -4, 0, 0, 0, 0], Sp),
        Alpha2 => ([2, 0, -1, 0, 0, 1, 2], Sp),
        Beta1 => ([1, 0, -2, 1, 0, 0, 1], Sp),
        Beta2 => ([2, 0, 1, 0, 0, -1, 0], Sp),
        Chi1 => ([1, 0, 2, -1, 0, 0, 1], Sp),
        Delta2 => ([2, 0, 2, 0, 0, 0, 0], Sp),
        Eps2 => ([2, -3, 2, 1, 0, 0, 0], Sp),
        Eta2 => ([2, 3, 0, -1, 0, 0, 0], Sp),
        Gamma2 => ([2, 0, -2, 2, 0, 0, 2], Sp),
        J1 => ([1, 2, 0, -1, 0, 0, 1], Sp),
        K1 => ([1, 1, 0, 0, 0, 0, 1], Sp),
        K2 => ([2, 2, 0, 0, 0, 0, 0], Sp),
        L2 => ([2, 1, 0, -1, 0, 0, 2], Sp),
        L2P => ([2, 1, 0, 0, 0, 0, 3], Sp),
        Lambda2 => ([2, 1, -2, 1, 0, 0, 2], Sp),
        M1 => ([1, 0, 0, 1, 0, 0, 1], Sp),
        M13 => ([1, 0, 0, 0, 0, 0, 2], Sp),
        M2 => ([2, 0, 0, 0, 0, 0, 0], Sp),
        M3 => ([3, 0, 0, 0, 0, 0, 2], Sp),
        M4 => ([4, 0, 0, 0, 0, 0, 0], Sp),
        M6 => ([6, 0, 0, 0, 0, 0, 0], Sp),
        M8 => ([8, 0, 0, 0, 0, 0, 0], Sp),
        Mf => ([0, 2, 0, 0, 0, 0, 0], Lp),
        MK3 => ([3, 1, 0, 0, 0, 0, 1], Sp),
        MK4 => ([4, 2, 0, 0, 0, 0, 0], Sp),
        MKS2 => ([2, 0, 2, 0, 0, 0, 0], Sp),
        Mm => ([0, 1, 0, -1, 0, 0, 0], Lp),
        MN4 => ([4, -1, 0, 1, 0, 0, 0], Sp),
        MO3 => ([3, -1, 0, 0, 0, 0, 3], Sp),
        Mqm => ([0, 4, 0, -2, 0, 0, 0], Lp),
        MS4 => ([4, 2, -2, 0, 0, 0, 0], Sp),
        MSf => ([0, 2, -2, 0, 0, 0, 0], Lp),
        MSK6 => ([6, 4, -2, 0, 0, 0, 0], Sp),
        MSm => ([0, 1, -2, 1, 0, 0, 0], Lp),
        MSN2 => ([2, 3, -2, -1, 0, 0, 0], Sp),
        MSN6 => ([6, 1, -2, 1, 0, 0, 0], Sp),
        MSqm => ([0, 4, -2, 0, 0, 0, 0], Lp),
        MStm => ([0, 3, -2, 1, 0, 0, 0], Lp),
        Mtm => ([0, 3, 0, -1, 0, 0, 0], Lp),
        Mu2 => ([2, -2, 2, 0, 0, 0, 0], Sp),
        N2 => ([2, -1, 0, 1, 0, 0, 0], Sp),
        N2P => ([2, -1, 0, 0, 0, 0, 1], Sp),
        N4 => ([4, -2, 0, 2, 0, 0, 0], Sp),
        Node => ([0, 0, 0, 0, 1, 0, 2], Lp),
        Nu2 => ([2, -1, 2, -1, 0, 0, 0], Sp),
        O1 => ([1, -1, 0, 0, 0, 0, 3], Sp),
        OO1 => ([1, 3, 0, 0, 0, 0, 1], Sp),
        P1 => ([1, 1, -2, 0, 0, 0, 3], Sp),
        Phi1 => ([1, 1, 2, 0, 0, 0, 1], Sp),
        Pi1 => ([1, 1, -3, 0, 0, 1, 3], Sp),
        Psi1 => ([1, 1, 1, 0, 0, -1, 1], Sp),
        Q1 => ([1, -2, 0, 1, 0, 0, 3], Sp),
        R2 => ([2, 2, -1, 0, 0, -1, 2], Sp),
        R4 => ([4, 4, -3, 0, 0, 0, 0], Sp),
        Rho1 => ([1, -2, 2, -1, 0, 0, 3], Sp),
        S1 => ([1, 1, -1, 0, 0, 0, 2], Sp),
        S2 => ([2, 2, -2, 0, 0, 0, 0], Sp),
        S4 => ([4, 4, -4, 0, 0, 0, 0], Sp),
        S6 => ([6, 6, -6, 0, 0, 0, 0], Sp),
        Sa => ([0, 0, 1, 0, 0, 0, 0], Lp),
        Sa1 => ([0, 0, 1, 0, 0, -1, 0], Lp),
        Sigma1 => ([1, -3, 2, 0, 0, 0, 3], Sp),
        SK4 => ([4, 4, -2, 0, 0, 0, 0], Sp),
        SN4 => ([4, 1, -2, 1, 0, 0, 0], Sp),
        SO1 => ([1, 3, -2, 0, 0, 0, 1], Sp),
        Ssa => ([0, 0, 2, 0, 0, 0, 0], Lp),
        Sta => ([0, 0, 3, 0, 0, 0, 0], Lp),
        T2 => ([2, 2, -3, 0, 0, 1, 0], Sp),
        Tau1 => ([1, -1, 2, 0, 0, 0, 1], Sp),
        Theta1 => ([1, 2, -2, 1, 0, 0, 1], Sp),
        Ups1 => ([1, 4, 0, -1, 0, 0, 1], Sp),
    }
}

impl Wave {
    /// Builds the wave descriptor of a constituent with neutral
    /// per-evaluation state.
    pub fn new(ident: Constituent) -> Self {
        let (doodson, kind) = doodson_numbers(ident);
        Self {
            ident,
            kind,
            doodson,
            tide: Complex64::default(),
            argument: 0.0,
            f: 1.0,
            u: 0.0,
            modeled: false,
            dynamic: false,
        }
    }

    pub fn ident(&self) -> Constituent {
        self.ident
    }

    pub fn kind(&self) -> WaveKind {
        self.kind
    }

    /// Doodson numbers `(τ, s, h, p, N′, p₁, ×90°)`.
    pub fn doodson(&self) -> [i8; 7] {
        self.doodson
    }

    /// Frequency in degrees per hour.
    pub fn frequency(&self) -> f64 {
        super::tidal_frequency(self.doodson)
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

    /// Nodal amplitude factor.
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Nodal phase correction in degrees.
    pub fn u(&self) -> f64 {
        self.u
    }

    /// Doodson tidal argument in degrees.
    pub fn argument(&self) -> f64 {
        self.argument
    }

    pub(crate) fn set_nodal_corrections(&mut self, f: f64, u: f64) {
        self.f = f;
        self.u = u;
    }

    pub(crate) fn set_argument(&mut self, argument: f64) {
        self.argument = argument;
    }

    /// Recomputes the Doodson argument from astronomical angles.
    pub fn update_argument(&mut self, angles: &Astronomic) {
        self.argument = doodson_argument(angles, self.doodson);
    }

    /// `argument + u` in radians, normalized to [0, 2π).
    pub fn vu(&self) -> f64 {
        normalize_radians((self.argument + self.u).to_radians())
    }

    /// `f · (Re(z)·cos(arg+u) + Im(z)·sin(arg+u))`.
    pub fn corrected_tide(&self) -> f64 {
        crate::corrected_tide(self.tide, self.f, self.vu())
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::ConstituentId;

    #[test]
    fn test_catalogue_is_total() {
        for &ident in Constituent::all() {
            let wave = Wave::new(ident);
            assert_eq!(wave.ident(), ident);
        }
    }

    #[test]
    fn test_long_period_waves_have_zero_tau() {
        for &ident in Constituent::all() {
            let wave = Wave::new(ident);
            if wave.kind() == WaveKind::LongPeriod {
                assert_eq!(wave.doodson()[0], 0, "{ident:?}");
            } else {
                assert!(wave.doodson()[0] > 0, "{ident:?}");
            }
        }
    }

    #[test]
    fn test_frequency_bands() {
        for &ident in Constituent::all() {
            let wave = Wave::new(ident);
            let tau = wave.doodson()[0];
            let frequency = wave.frequency();
            // Species number fixes the band around n lunar days per day;
            // purely solar overtides sit at most ~3.1 deg/h above it.
            let center = f64::from(tau) * 14.49;
            assert!(
                (frequency - center).abs() < 3.5,
                "{ident:?}: {frequency} deg/h for species {tau}"
            );
        }
    }

    #[test]
    fn test_default_corrections_are_neutral() {
        let wave = Wave::new(Constituent::S2);
        assert_float_eq!(wave.f(), 1.0, abs <= 1e-15);
        assert_float_eq!(wave.u(), 0.0, abs <= 1e-15);
    }
}
