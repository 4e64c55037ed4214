// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! The Doodson wave table.

use num::complex::Complex64;

use maree_astro::Astronomic;
use maree_math::math::normalize_degrees_symmetric;

use super::{celestial_vector, nodal, Constituent, Inference, Wave};
use crate::{
    ConstituentId, DynamicGroups, InferenceKind, TideSum, UnsupportedInferenceError,
    WaveKind, WaveTable as WaveTableTrait,
};

/// A dense table over the whole Doodson catalogue.
#[derive(Clone, Debug)]
pub struct WaveTable {
    waves: Vec<Wave>,
}

impl Default for WaveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveTable {
    pub fn new() -> Self {
        Self {
            waves: Constituent::all().iter().map(|&ident| Wave::new(ident)).collect(),
        }
    }

    pub fn wave(&self, ident: Constituent) -> &Wave {
        &self.waves[ident.index()]
    }

    pub fn wave_mut(&mut self, ident: Constituent) -> &mut Wave {
        &mut self.waves[ident.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wave> {
        self.waves.iter()
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

impl WaveTableTrait for WaveTable {
    type Id = Constituent;
    type Inference = Inference;

    fn set_tide(&mut self, id: Constituent, tide: Complex64) {
        self.wave_mut(id).set_tide(tide);
    }

    fn set_modeled(&mut self, id: Constituent, modeled: bool) {
        self.wave_mut(id).set_modeled(modeled);
    }

    fn set_dynamic(&mut self, id: Constituent, dynamic: bool) {
        self.wave_mut(id).set_dynamic(dynamic);
    }

    fn compute_nodal_corrections(&mut self, angles: &Astronomic, group_modulations: bool) {
        let beta = celestial_vector(angles);
        let omega = -beta[4];
        let perigee = beta[3];
        let hsolar = beta[2];
        let psolar = beta[5];

        for wave in &mut self.waves {
            let correction = if group_modulations {
                nodal::group(psolar, omega, perigee, hsolar, wave.ident())
            } else {
                nodal::standard(omega, perigee, wave.ident())
            };
            wave.set_nodal_corrections(correction.f, correction.u);

            let doodson = wave.doodson();
            let mut argument = f64::from(doodson[6]) * 90.0;
            for (&multiplier, value) in doodson[..6].iter().zip(beta) {
                argument += f64::from(multiplier) * value;
            }
            wave.set_argument(normalize_degrees_symmetric(argument));
        }
    }

    fn inference(
        &self,
        kind: InferenceKind,
    ) -> Result<Inference, UnsupportedInferenceError> {
        Inference::from_kind(kind)
    }

    fn apply_inference(&mut self, inference: &Inference, latitude: f64) {
        inference.apply(self, latitude);
    }

    fn summation(&self) -> TideSum {
        let mut sum = TideSum::default();
        for wave in &self.waves {
            let tide = wave.corrected_tide();
            match wave.kind() {
                WaveKind::ShortPeriod => sum.short_period += tide,
                WaveKind::LongPeriod => sum.long_period += tide,
            }
        }
        sum
    }

    fn dynamic_long_period_groups(&self) -> DynamicGroups {
        DynamicGroups {
            mm: self.wave(Constituent::Mm).dynamic(),
            mf: self.wave(Constituent::Mf).dynamic(),
            mtm: self.wave(Constituent::Mtm).dynamic(),
            msqm: self.wave(Constituent::MSqm).dynamic(),
            ssa: self.wave(Constituent::Ssa).dynamic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use maree_astro::Formulae;

    use super::*;

    #[test]
    fn test_nodal_corrections_update_every_wave() {
        let mut table = WaveTable::new();
        let angles = Astronomic::at(Formulae::Iers, 946_728_000.0);
        table.compute_nodal_corrections(&angles, false);

        for wave in table.iter() {
            assert!(wave.f() > 0.0, "{:?}", wave.ident());
            assert!(
                (-180.0..180.0).contains(&wave.argument()),
                "{:?}: argument {}",
                wave.ident(),
                wave.argument()
            );
        }
    }

    #[test]
    fn test_s2_stays_almost_unmodulated() {
        let mut table = WaveTable::new();
        let angles = Astronomic::at(Formulae::Iers, 946_728_000.0);
        table.compute_nodal_corrections(&angles, false);

        let s2 = table.wave(Constituent::S2);
        assert_float_eq!(s2.f(), 1.0, abs <= 0.01);
        assert_float_eq!(s2.u(), 0.0, abs <= 0.2);
    }

    #[test]
    fn test_group_modulations_change_m2() {
        let mut table = WaveTable::new();
        let angles = Astronomic::at(Formulae::Iers, 946_728_000.0);
        table.compute_nodal_corrections(&angles, false);
        let standard_f = table.wave(Constituent::M2).f();
        table.compute_nodal_corrections(&angles, true);
        let group_f = table.wave(Constituent::M2).f();
        assert!((standard_f - group_f).abs() > 1e-6);
    }

    #[test]
    fn test_summation_uses_argument_and_u() {
        let mut table = WaveTable::new();
        table.set_tide(Constituent::M2, Complex64::new(100.0, 0.0));
        let angles = Astronomic::at(Formulae::Iers, 946_728_000.0);
        table.compute_nodal_corrections(&angles, false);

        let m2 = table.wave(Constituent::M2);
        let expected = m2.f() * 100.0 * m2.vu().cos();
        assert_float_eq!(table.summation().short_period, expected, abs <= 1e-9);
    }
}
