// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Admittance of the Doodson engine.
//!
//! Minor constituents are inferred from three donors per band —
//! (Q₁, O₁, K₁), (N₂, M₂, S₂) and (Node, Mm, Mf) — by interpolating the
//! admittance (observed over equilibrium amplitude) across frequency,
//! either piecewise-linearly or with a Munk–Cartwright Fourier fit. The
//! long-period band is always linear.

use num::complex::Complex64;

use super::{node_tide, tidal_frequency, wave::Wave, Constituent, WaveTable};
use crate::{InferenceKind, UnsupportedInferenceError, WaveKind};

/// Love numbers `(k, h, l)` from the PMM95B model (Mathews et al., 1995)
/// for the diurnal band; Wahr's 1981 values outside 5–22 degrees/hour.
pub(crate) fn love_pmm95b(frequency: f64) -> (f64, f64, f64) {
    if frequency < 5.0 {
        return (0.299, 0.606, 0.0840);
    }
    if frequency > 22.0 {
        return (0.302, 0.609, 0.0852);
    }

    // Free-core-nutation frequency in cycles per sidereal day (Mathews
    // Table 1) and the K₁/O₁ reference frequencies.
    let f_fcn = 1.0023214;
    let f_k1 = 15.041068;
    let f_o1 = 13.943036;

    let f = frequency / f_k1;
    let frac = (f - f_o1 / f_k1) / (f_fcn - f);

    (
        0.00127f64.mul_add(-frac, 0.2962),
        0.002532f64.mul_add(-frac, 0.5994),
        0.00007932f64.mul_add(frac, 0.08378),
    )
}

/// Equilibrium amplitudes (meters) of the inferred diurnal constituents.
const DIURNAL: [(Constituent, f64); 19] = [
    (Constituent::_2Q1, 0.006638),
    (Constituent::Sigma1, 0.008023),
    (Constituent::Q1, 0.050184),
    (Constituent::Rho1, 0.009540),
    (Constituent::O1, 0.262163),
    (Constituent::Tau1, 0.003430),
    (Constituent::Beta1, 0.001941),
    (Constituent::M1, 0.020604),
    (Constituent::Chi1, 0.003925),
    (Constituent::Pi1, 0.007125),
    (Constituent::P1, 0.122008),
    (Constituent::K1, 0.368731),
    (Constituent::Psi1, 0.002929),
    (Constituent::Phi1, 0.005247),
    (Constituent::Theta1, 0.003966),
    (Constituent::J1, 0.020618),
    (Constituent::SO1, 0.003417),
    (Constituent::OO1, 0.011293),
    (Constituent::Ups1, 0.002157),
];

/// Equilibrium amplitudes of the inferred semidiurnal constituents.
const SEMIDIURNAL: [(Constituent, f64); 17] = [
    (Constituent::Eps2, 0.004669),
    (Constituent::_2N2, 0.016011),
    (Constituent::Mu2, 0.019316),
    (Constituent::N2, 0.121006),
    (Constituent::Nu2, 0.022983),
    (Constituent::Gamma2, 0.001902),
    (Constituent::Alpha2, 0.002178),
    (Constituent::M2, 0.631931),
    (Constituent::Beta2, 0.001921),
    (Constituent::Delta2, 0.000714),
    (Constituent::Lambda2, 0.004662),
    (Constituent::L2, 0.017862),
    (Constituent::T2, 0.017180),
    (Constituent::S2, 0.294019),
    (Constituent::R2, 0.002463),
    (Constituent::K2, 0.079924),
    (Constituent::Eta2, 0.004467),
];

/// Equilibrium amplitudes of the inferred long-period constituents.
const LONG_PERIOD: [(Constituent, f64); 12] = [
    (Constituent::Node, 0.027929),
    // Gravitational argument, not the conventional Sa.
    (Constituent::Sa1, 0.004922),
    (Constituent::Ssa, 0.030988),
    (Constituent::Sta, 0.001809),
    (Constituent::MSm, 0.006728),
    (Constituent::Mm, 0.035184),
    (Constituent::MSf, 0.005837),
    (Constituent::Mf, 0.066607),
    (Constituent::MStm, 0.002422),
    (Constituent::Mtm, 0.012753),
    (Constituent::MSqm, 0.002037),
    (Constituent::Mqm, 0.001687),
];

/// Piecewise-linear admittance across three donors.
fn linear_interpolation(
    x1: f64,
    y1: Complex64,
    x2: f64,
    y2: Complex64,
    x3: f64,
    y3: Complex64,
    x: f64,
) -> Complex64 {
    if x <= x2 {
        let slope = (y2 - y1) / (x2 - x1);
        y1 + slope * (x - x1)
    } else {
        let slope = (y3 - y2) / (x3 - x2);
        y2 + slope * (x - x2)
    }
}

/// Munk–Cartwright Fourier admittance. The inverse matrices are fixed for
/// the (Q₁, O₁, K₁) and (N₂, M₂, S₂) donor triplets.
fn fourier_interpolation(species: u8, z: [Complex64; 3], x: f64) -> Complex64 {
    let ainv: [[f64; 3]; 3] = match species {
        1 => [
            [3.1214, -3.8494, 1.7280],
            [-3.1727, 3.9559, -0.7832],
            [1.4380, -3.0297, 1.5917],
        ],
        _ => [
            [3.3133, -4.2538, 1.9405],
            [-3.3133, 4.2538, -0.9405],
            [1.5018, -3.2579, 1.7561],
        ],
    };

    let c: Vec<Complex64> = ainv
        .iter()
        .map(|row| row.iter().zip(z).map(|(&a, zk)| a * zk).sum())
        .collect();

    let f = x * 48.0f64.to_radians();
    c[0] + c[1] * f.cos() + c[2] * f.sin()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Interpolation {
    Linear,
    Fourier,
}

/// One inferred constituent with its frequency and equilibrium amplitude.
#[derive(Clone, Copy, Debug)]
struct Inferred {
    ident: Constituent,
    frequency: f64,
    amplitude: f64,
}

/// Precomputed admittance state of the Doodson engine.
#[derive(Clone, Debug)]
pub enum Inference {
    Interpolated(Admittance),
    Zero,
}

#[derive(Clone, Debug)]
pub struct Admittance {
    interpolation: Interpolation,
    diurnal: Vec<Inferred>,
    semidiurnal: Vec<Inferred>,
    long_period: Vec<Inferred>,
    /// Donor frequencies: (Q₁, O₁, K₁, N₂, M₂, S₂, Node, Mm, Mf).
    donor_frequencies: [f64; 9],
    /// Donor amplitudes; the diurnal three carry the `1 + k − h` factor.
    donor_amplitudes: [f64; 9],
}

fn band(table: &[(Constituent, f64)]) -> Vec<Inferred> {
    let mut band: Vec<Inferred> = table
        .iter()
        .map(|&(ident, amplitude)| Inferred {
            ident,
            frequency: tidal_frequency(Wave::new(ident).doodson()),
            amplitude,
        })
        .collect();
    band.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    band
}

impl Inference {
    pub(crate) fn from_kind(
        kind: InferenceKind,
    ) -> Result<Self, UnsupportedInferenceError> {
        let interpolation = match kind {
            InferenceKind::Linear => Interpolation::Linear,
            InferenceKind::Fourier => Interpolation::Fourier,
            InferenceKind::Zero => return Ok(Inference::Zero),
            InferenceKind::Spline => {
                return Err(UnsupportedInferenceError {
                    kind,
                    engine: "doodson",
                })
            }
        };

        let diurnal = band(&DIURNAL);
        let semidiurnal = band(&SEMIDIURNAL);
        let long_period = band(&LONG_PERIOD);

        let lookup = |band: &[Inferred], ident| {
            band.iter()
                .find(|inferred| inferred.ident == ident)
                .map(|inferred| (inferred.frequency, inferred.amplitude))
                .expect("donor missing from its band")
        };

        let (x1, a1) = lookup(&diurnal, Constituent::Q1);
        let (x2, a2) = lookup(&diurnal, Constituent::O1);
        let (x3, a3) = lookup(&diurnal, Constituent::K1);
        let (x4, a4) = lookup(&semidiurnal, Constituent::N2);
        let (x5, a5) = lookup(&semidiurnal, Constituent::M2);
        let (x6, a6) = lookup(&semidiurnal, Constituent::S2);
        let (x7, a7) = lookup(&long_period, Constituent::Node);
        let (x8, a8) = lookup(&long_period, Constituent::Mm);
        let (x9, a9) = lookup(&long_period, Constituent::Mf);

        let gamma = |x: f64| {
            let (k, h, _) = love_pmm95b(x);
            1.0 + k - h
        };

        Ok(Inference::Interpolated(Admittance {
            interpolation,
            diurnal,
            semidiurnal,
            long_period,
            donor_frequencies: [x1, x2, x3, x4, x5, x6, x7, x8, x9],
            donor_amplitudes: [
                a1 * gamma(x1),
                a2 * gamma(x2),
                a3 * gamma(x3),
                a4,
                a5,
                a6,
                a7,
                a8,
                a9,
            ],
        }))
    }

    /// Fills the unmodeled minors of `table` from the donors.
    pub(crate) fn apply(&self, table: &mut WaveTable, latitude: f64) {
        let Inference::Interpolated(admittance) = self else {
            return;
        };
        admittance.apply(table, latitude);
    }
}

impl Admittance {
    fn apply(&self, table: &mut WaveTable, latitude: f64) {
        let [x1, x2, x3, x4, x5, x6, x7, x8, x9] = self.donor_frequencies;
        let [a1, a2, a3, a4, a5, a6, a7, a8, a9] = self.donor_amplitudes;

        let y1 = table.wave(Constituent::Q1).tide() / a1;
        let y2 = table.wave(Constituent::O1).tide() / a2;
        let y3 = table.wave(Constituent::K1).tide() / a3;
        let y4 = table.wave(Constituent::N2).tide() / a4;
        let y5 = table.wave(Constituent::M2).tide() / a5;
        let y6 = table.wave(Constituent::S2).tide() / a6;
        let y8 = table.wave(Constituent::Mm).tide() / a8;
        let y9 = table.wave(Constituent::Mf).tide() / a9;

        // The 18.6-year node donor falls back to its equilibrium value
        // when the model does not provide it.
        let node = table.wave(Constituent::Node);
        let node_value = if node.modeled() {
            node.tide()
        } else {
            Complex64::new(node_tide(latitude), 0.0)
        };
        let y7 = node_value / a7;

        let interpolate_1 = |x: f64| match self.interpolation {
            Interpolation::Linear => linear_interpolation(x1, y1, x2, y2, x3, y3, x),
            Interpolation::Fourier => fourier_interpolation(1, [y1, y2, y3], x),
        };
        let interpolate_2 = |x: f64| match self.interpolation {
            Interpolation::Linear => linear_interpolation(x4, y4, x5, y5, x6, y6, x),
            Interpolation::Fourier => fourier_interpolation(2, [y4, y5, y6], x),
        };

        for inferred in &self.diurnal {
            let wave = table.wave_mut(inferred.ident);
            if wave.modeled() || wave.dynamic() || wave.kind() != WaveKind::ShortPeriod {
                continue;
            }
            let (k, h, _) = love_pmm95b(inferred.frequency);
            let gamma = 1.0 + k - h;
            wave.set_tide(interpolate_1(inferred.frequency) * gamma * inferred.amplitude);
        }

        for inferred in &self.semidiurnal {
            let wave = table.wave_mut(inferred.ident);
            if wave.modeled() || wave.dynamic() || wave.kind() != WaveKind::ShortPeriod {
                continue;
            }
            wave.set_tide(interpolate_2(inferred.frequency) * inferred.amplitude);
        }

        // The long-period band is always interpolated linearly.
        for inferred in &self.long_period {
            let wave = table.wave_mut(inferred.ident);
            if wave.modeled() || wave.dynamic() || wave.kind() != WaveKind::LongPeriod {
                continue;
            }
            let y = linear_interpolation(x7, y7, x8, y8, x9, y9, inferred.frequency);
            wave.set_tide(y * inferred.amplitude);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn test_love_numbers_bands() {
        let (k, h, l) = love_pmm95b(1.0);
        assert_eq!((k, h, l), (0.299, 0.606, 0.0840));
        let (k, h, l) = love_pmm95b(30.0);
        assert_eq!((k, h, l), (0.302, 0.609, 0.0852));

        // O1 sits at the diurnal reference point, where frac = 0.
        let (k, h, _) = love_pmm95b(13.943036);
        assert_float_eq!(k, 0.2962, abs <= 1e-9);
        assert_float_eq!(h, 0.5994, abs <= 1e-9);
    }

    #[test]
    fn test_linear_interpolation_hits_donors() {
        let y1 = Complex64::new(1.0, 0.0);
        let y2 = Complex64::new(2.0, 1.0);
        let y3 = Complex64::new(3.0, -1.0);
        assert_eq!(linear_interpolation(1.0, y1, 2.0, y2, 3.0, y3, 1.0), y1);
        assert_eq!(linear_interpolation(1.0, y1, 2.0, y2, 3.0, y3, 2.0), y2);
        assert_eq!(linear_interpolation(1.0, y1, 2.0, y2, 3.0, y3, 3.0), y3);
    }

    #[test]
    fn test_inference_fills_unmodeled_minors() {
        let mut table = WaveTable::new();
        for ident in [
            Constituent::Q1,
            Constituent::O1,
            Constituent::K1,
            Constituent::N2,
            Constituent::M2,
            Constituent::S2,
            Constituent::Mm,
            Constituent::Mf,
        ] {
            table.wave_mut(ident).set_modeled(true);
            table.wave_mut(ident).set_tide(Complex64::new(10.0, 5.0));
        }

        let inference = Inference::from_kind(InferenceKind::Linear).unwrap();
        inference.apply(&mut table, 43.0);

        // A minor between O₁ and K₁ picks up a non-zero value...
        assert!(table.wave(Constituent::P1).tide().norm() > 0.0);
        // ...while the donors keep theirs.
        assert_float_eq!(
            table.wave(Constituent::M2).tide().re,
            10.0,
            abs <= 1e-12
        );
    }

    #[test]
    fn test_zero_inference_is_inert() {
        let mut table = WaveTable::new();
        table.wave_mut(Constituent::M2).set_modeled(true);
        table
            .wave_mut(Constituent::M2)
            .set_tide(Complex64::new(10.0, 5.0));

        let inference = Inference::from_kind(InferenceKind::Zero).unwrap();
        inference.apply(&mut table, 0.0);
        assert_eq!(table.wave(Constituent::N2).tide(), Complex64::default());
    }

    #[test]
    fn test_spline_is_not_a_doodson_policy() {
        assert!(Inference::from_kind(InferenceKind::Spline).is_err());
    }

    #[test]
    fn test_fourier_matches_donors_roughly() {
        // The Fourier fit passes through the three donor admittances.
        let z = [
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 0.5),
            Complex64::new(0.5, -0.5),
        ];
        let x_q1 = tidal_frequency([1, -2, 0, 1, 0, 0, 3]);
        let x_o1 = tidal_frequency([1, -1, 0, 0, 0, 0, 3]);
        let x_k1 = tidal_frequency([1, 1, 0, 0, 0, 0, 1]);
        for (x, expected) in [(x_q1, z[0]), (x_o1, z[1]), (x_k1, z[2])] {
            let y = fourier_interpolation(1, z, x);
            assert_float_eq!(y.re, expected.re, abs <= 0.05);
            assert_float_eq!(y.im, expected.im, abs <= 0.05);
        }
    }
}
