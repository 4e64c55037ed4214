// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! The Darwin wave table: random access by constituent, iteration in
//! canonical order, nodal-correction broadcast and spline admittance.

use num::complex::Complex64;

use maree_astro::Astronomic;

use super::{Constituent, Inference, Wave};
use crate::{
    ConstituentId, DynamicGroups, InferenceKind, TideSum, UnsupportedInferenceError,
    WaveKind, WaveTable as WaveTableTrait,
};

/// Spline admittance coefficients applied to (K₂, N₂, M₂)
/// (see GRL 18(5):845-848, 1991).
const SPLINE_MU2: [f64; 3] = [0.069439968323, 0.351535557706, -0.046278307672];
const SPLINE_NU2: [f64; 3] = [-0.006104695053, 0.156878802427, 0.006755704028];
const SPLINE_L2: [f64; 3] = [0.077137765667, -0.051653455134, 0.027869916824];
const SPLINE_T2: [f64; 3] = [0.180480173707, -0.020101177502, 0.008331518844];
const SPLINE_LAMBDA2: [f64; 3] = [0.016503557465, -0.013307812292, 0.007753383202];

/// A sparse map from constituent to wave, iterated in canonical order.
#[derive(Clone, Debug)]
pub struct WaveTable {
    waves: Vec<Option<Wave>>,
}

impl Default for WaveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveTable {
    /// Builds a table holding every known constituent.
    pub fn new() -> Self {
        Self {
            waves: Constituent::all()
                .iter()
                .map(|&ident| Some(Wave::new(ident)))
                .collect(),
        }
    }

    /// Builds a table holding only the selected constituents.
    pub fn with_constituents(constituents: &[Constituent]) -> Self {
        Self {
            waves: Constituent::all()
                .iter()
                .map(|ident| {
                    constituents
                        .contains(ident)
                        .then(|| Wave::new(*ident))
                })
                .collect(),
        }
    }

    /// Number of waves present in the table.
    pub fn len(&self) -> usize {
        self.waves.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, ident: Constituent) -> Option<&Wave> {
        self.waves[ident.index()].as_ref()
    }

    pub fn get_mut(&mut self, ident: Constituent) -> Option<&mut Wave> {
        self.waves[ident.index()].as_mut()
    }

    /// Iterates over the waves present, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Wave> {
        self.waves.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Wave> {
        self.waves.iter_mut().flatten()
    }

    /// Names of the constituents present.
    pub fn constituents(&self) -> Vec<&'static str> {
        self.iter().map(|wave| wave.ident().name()).collect()
    }

    fn tide_of(&self, ident: Constituent) -> Complex64 {
        self.get(ident).map(Wave::tide).unwrap_or_default()
    }

    fn infer(&mut self, ident: Constituent, value: Complex64) {
        if let Some(wave) = self.get_mut(ident)
            && wave.admittance()
            && !wave.modeled()
            && !wave.dynamic()
        {
            wave.set_tide(value);
        }
    }

    /// Fills the minor constituents from the seven majors
    /// (O₁, Q₁, K₁, 2N₂, N₂, M₂, K₂).
    pub fn admittance(&mut self) {
        use Constituent::*;

        // Diurnal inferences from Richard Ray's perth2 program.
        let q1 = self.tide_of(Q1);
        let o1 = self.tide_of(O1);
        let k1 = self.tide_of(K1);

        self.infer(_2Q1, 0.263 * q1 - 0.0252 * o1);
        self.infer(Sigma1, 0.297 * q1 - 0.0264 * o1);
        self.infer(Rho1, 0.164 * q1 + 0.0048 * o1);

        self.infer(M11, 0.0389 * o1 + 0.0282 * k1);
        self.infer(M12, 0.0140 * o1 + 0.0101 * k1);
        self.infer(Chi1, 0.0064 * o1 + 0.0060 * k1);
        self.infer(Pi1, 0.0030 * o1 + 0.0171 * k1);
        self.infer(Phi1, -0.0015 * o1 + 0.0152 * k1);
        self.infer(Theta1, -0.0065 * o1 + 0.0155 * k1);
        self.infer(J1, -0.0389 * o1 + 0.0836 * k1);
        self.infer(OO1, -0.0431 * o1 + 0.0613 * k1);

        // Semi-diurnal inferences from Richard Ray's perth3 program.
        let n2 = self.tide_of(N2);
        let m2 = self.tide_of(M2);

        self.infer(_2N2, 0.264 * n2 - 0.0253 * m2);

        // ε₂ takes advantage of 2N₂, inferred or modeled.
        let two_n2 = self.tide_of(_2N2);
        self.infer(Eps2, 0.53285 * two_n2 - 0.03304 * n2);

        let k2 = self.tide_of(K2);
        self.infer(Eta2, -0.0034925 * m2 + 0.0831707 * k2);

        // Spline admittances over (K₂, N₂, M₂).
        self.infer(Mu2, SPLINE_MU2[0] * k2 + SPLINE_MU2[1] * n2 + SPLINE_MU2[2] * m2);
        self.infer(Nu2, SPLINE_NU2[0] * k2 + SPLINE_NU2[1] * n2 + SPLINE_NU2[2] * m2);
        self.infer(
            Lambda2,
            SPLINE_LAMBDA2[0] * k2 + SPLINE_LAMBDA2[1] * n2 + SPLINE_LAMBDA2[2] * m2,
        );
        self.infer(L2, SPLINE_L2[0] * k2 + SPLINE_L2[1] * n2 + SPLINE_L2[2] * m2);
        self.infer(T2, SPLINE_T2[0] * k2 + SPLINE_T2[1] * n2 + SPLINE_T2[2] * m2);
    }

    /// Returns the names of the waves whose period is small enough to be
    /// resolved by a time series of the given duration (seconds); `factor`
    /// scales the acceptance threshold.
    pub fn select_waves_for_analysis(duration: f64, factor: f64) -> Vec<&'static str> {
        WaveTable::new()
            .iter()
            .filter(|wave| wave.period() < factor * (duration / 3600.0))
            .map(|wave| wave.ident().name())
            .collect()
    }
}

impl WaveTableTrait for WaveTable {
    type Id = Constituent;
    type Inference = Inference;

    fn set_tide(&mut self, id: Constituent, tide: Complex64) {
        if let Some(wave) = self.get_mut(id) {
            wave.set_tide(tide);
        }
    }

    fn set_modeled(&mut self, id: Constituent, modeled: bool) {
        if let Some(wave) = self.get_mut(id) {
            wave.set_modeled(modeled);
        }
    }

    fn set_dynamic(&mut self, id: Constituent, dynamic: bool) {
        if let Some(wave) = self.get_mut(id) {
            wave.set_dynamic(dynamic);
        }
    }

    fn compute_nodal_corrections(&mut self, angles: &Astronomic, _group_modulations: bool) {
        for wave in self.iter_mut() {
            wave.compute_nodal_corrections(angles);
        }
    }

    fn inference(
        &self,
        kind: InferenceKind,
    ) -> Result<Inference, UnsupportedInferenceError> {
        Inference::from_kind(kind)
    }

    fn apply_inference(&mut self, inference: &Inference, _latitude: f64) {
        if matches!(inference, Inference::Spline) {
            self.admittance();
        }
    }

    fn summation(&self) -> TideSum {
        let mut sum = TideSum::default();
        for wave in self.iter() {
            let tide = wave.corrected_tide();
            match wave.kind() {
                WaveKind::ShortPeriod => sum.short_period += tide,
                WaveKind::LongPeriod => sum.long_period += tide,
            }
        }
        sum
    }

    fn dynamic_long_period_groups(&self) -> DynamicGroups {
        let dynamic =
            |ident| self.get(ident).map(Wave::dynamic).unwrap_or(false);
        DynamicGroups {
            mm: dynamic(Constituent::Mm),
            mf: dynamic(Constituent::Mf),
            mtm: dynamic(Constituent::Mtm),
            msqm: dynamic(Constituent::MSqm),
            ssa: dynamic(Constituent::Ssa),
        }
    }
}
