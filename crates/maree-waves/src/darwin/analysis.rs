// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Harmonic analysis and synthesis helpers.
//!
//! Analysis expresses a sea-level series as a linear sum of constituents
//! with known nodal modulation, then recovers the complex amplitudes by
//! least squares over the normal equations.

use num::complex::Complex64;
use thiserror::Error;

use maree_astro::{Astronomic, Formulae};
use maree_math::linear_algebra::solve_in_place;

use super::WaveTable;
use crate::WaveTable as _;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("`f` and `vu` could not be broadcast together with shapes ({0}, {1}) and ({2}, {3})")]
    ModulationShapeMismatch(usize, usize, usize, usize),
    #[error("`h` has {0} samples but the modulations carry {1}")]
    SampleCountMismatch(usize, usize),
    #[error("`waves` must contain as many elements as the table ({expected}), got {actual}")]
    WaveCountMismatch { expected: usize, actual: usize },
    #[error("the normal equations are singular")]
    Singular,
}

/// Least-squares recovery of complex constituent amplitudes.
///
/// `f` and `vu` are `(n_waves, n_samples)` matrices of nodal amplitude
/// factors and corrected arguments; `h` is the observed series. A NaN
/// anywhere in `h` short-circuits to an all-NaN result.
pub fn harmonic_analysis(
    h: &[f64],
    f: &[Vec<f64>],
    vu: &[Vec<f64>],
) -> Result<Vec<Complex64>, AnalysisError> {
    let w = f.len();
    if w != vu.len() {
        return Err(AnalysisError::ModulationShapeMismatch(
            w,
            f.first().map_or(0, Vec::len),
            vu.len(),
            vu.first().map_or(0, Vec::len),
        ));
    }
    for (f_row, vu_row) in f.iter().zip(vu) {
        if f_row.len() != vu_row.len() {
            return Err(AnalysisError::ModulationShapeMismatch(
                w,
                f_row.len(),
                vu.len(),
                vu_row.len(),
            ));
        }
        if f_row.len() != h.len() {
            return Err(AnalysisError::SampleCountMismatch(h.len(), f_row.len()));
        }
    }

    if h.iter().any(|value| value.is_nan()) {
        return Ok(vec![Complex64::new(f64::NAN, f64::NAN); w]);
    }

    let n = h.len();
    let rows = 2 * w;

    // H stacks f·cos(v+u) over f·sin(v+u).
    let mut matrix = vec![0.0; rows * n];
    for (row, (f_row, vu_row)) in f.iter().zip(vu).enumerate() {
        for (col, (&fk, &vuk)) in f_row.iter().zip(vu_row).enumerate() {
            matrix[row * n + col] = fk * vuk.cos();
            matrix[(row + w) * n + col] = fk * vuk.sin();
        }
    }

    // Normal equations: (H·Hᵀ)·x = H·h.
    let mut normal = vec![0.0; rows * rows];
    for i in 0..rows {
        for j in i..rows {
            let mut sum = 0.0;
            for k in 0..n {
                sum += matrix[i * n + k] * matrix[j * n + k];
            }
            normal[i * rows + j] = sum;
            normal[j * rows + i] = sum;
        }
    }

    let mut rhs = vec![0.0; rows];
    for (i, slot) in rhs.iter_mut().enumerate() {
        *slot = matrix[i * n..(i + 1) * n]
            .iter()
            .zip(h)
            .map(|(a, b)| a * b)
            .sum();
    }

    solve_in_place(&mut normal, &mut rhs, rows).map_err(|_| AnalysisError::Singular)?;

    Ok((0..w)
        .map(|i| Complex64::new(rhs[i], rhs[i + w]))
        .collect())
}

impl WaveTable {
    /// Nodal modulation matrices `(f, v+u)` of shape
    /// `(n_waves, n_epochs)` for the waves of this table.
    pub fn compute_nodal_modulations(
        &self,
        epochs: &[f64],
        formulae: Formulae,
    ) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let mut table = self.clone();
        let mut angles = Astronomic::new(formulae);
        let w = table.len();

        let mut f = vec![Vec::with_capacity(epochs.len()); w];
        let mut vu = vec![Vec::with_capacity(epochs.len()); w];

        for &epoch in epochs {
            angles.update(epoch);
            table.compute_nodal_corrections(&angles, false);
            for (index, wave) in table.iter().enumerate() {
                f[index].push(wave.f());
                vu[index].push(wave.vu());
            }
        }
        (f, vu)
    }

    /// Synthesizes a tide series from analyzed constituents. `waves` holds
    /// one complex amplitude per wave of the table, in canonical order.
    pub fn tide_from_tide_series(
        &self,
        epochs: &[f64],
        waves: &[Complex64],
        formulae: Formulae,
    ) -> Result<Vec<f64>, AnalysisError> {
        if waves.len() != self.len() {
            return Err(AnalysisError::WaveCountMismatch {
                expected: self.len(),
                actual: waves.len(),
            });
        }

        let mut table = self.clone();
        let mut angles = Astronomic::new(formulae);
        let mut result = Vec::with_capacity(epochs.len());

        for &epoch in epochs {
            angles.update(epoch);
            table.compute_nodal_corrections(&angles, false);
            let tide = table
                .iter()
                .zip(waves)
                .map(|(wave, z)| {
                    let phi = wave.vu();
                    wave.f() * z.re.mul_add(phi.cos(), z.im * phi.sin())
                })
                .sum();
            result.push(tide);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::darwin::Constituent;

    #[test]
    fn test_analysis_recovers_synthesis() {
        // Synthesize a noise-free signal from known amplitudes, analyze it
        // back and compare.
        let table = WaveTable::with_constituents(&[
            Constituent::M2,
            Constituent::S2,
            Constituent::K1,
            Constituent::O1,
        ]);
        let amplitudes = [
            Complex64::new(120.0, -30.0),
            Complex64::new(40.0, 10.0),
            Complex64::new(25.0, 5.0),
            Complex64::new(-12.0, 8.0),
        ];
        let epochs: Vec<f64> = (0..240).map(|k| k as f64 * 3600.0).collect();

        let series = table
            .tide_from_tide_series(&epochs, &amplitudes, Formulae::SchuremanOrder1)
            .unwrap();
        let (f, vu) = table.compute_nodal_modulations(&epochs, Formulae::SchuremanOrder1);
        let recovered = harmonic_analysis(&series, &f, &vu).unwrap();

        for (expected, actual) in amplitudes.iter().zip(&recovered) {
            assert_float_eq!(expected.re, actual.re, abs <= 1e-6);
            assert_float_eq!(expected.im, actual.im, abs <= 1e-6);
        }
    }

    #[test]
    fn test_analysis_propagates_nan() {
        let h = vec![1.0, f64::NAN, 3.0];
        let f = vec![vec![1.0; 3]];
        let vu = vec![vec![0.0; 3]];
        let result = harmonic_analysis(&h, &f, &vu).unwrap();
        assert!(result[0].re.is_nan() && result[0].im.is_nan());
    }

    #[test]
    fn test_analysis_shape_mismatch() {
        let h = vec![1.0; 4];
        let f = vec![vec![1.0; 4]];
        let vu = vec![vec![0.0; 3]];
        assert!(harmonic_analysis(&h, &f, &vu).is_err());
    }

    #[test]
    fn test_synthesis_wave_count_mismatch() {
        let table = WaveTable::with_constituents(&[Constituent::M2]);
        let result =
            table.tide_from_tide_series(&[0.0], &[], Formulae::SchuremanOrder1);
        assert_eq!(
            result,
            Err(AnalysisError::WaveCountMismatch {
                expected: 1,
                actual: 0
            })
        );
    }
}
