// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! The Doodson engine end to end, with linear admittance and group
//! modulations.

use float_eq::assert_float_eq;
use num::complex::Complex64;

use maree::doodson::{Constituent, WaveTable};
use maree::{
    evaluate_tide, table_for_model, GridError, GridSource, GridSpec, InferenceKind,
    Settings, TidalModel, TideType,
};

struct Uniform {
    value: Complex64,
}

fn spec() -> GridSpec {
    GridSpec {
        lat_min: -90.0,
        lat_step: 0.5,
        n_lat: 361,
        lon_min: 0.0,
        lon_step: 0.5,
        n_lon: 720,
        transpose: false,
    }
}

impl GridSource for Uniform {
    fn spec(&self) -> GridSpec {
        spec()
    }

    fn read_cell(&self, _: usize, _: usize) -> Result<Option<Complex64>, GridError> {
        Ok(Some(self.value))
    }
}

fn model() -> TidalModel<Constituent> {
    let donors = [
        (Constituent::Q1, Complex64::new(5.0, -1.0)),
        (Constituent::O1, Complex64::new(26.0, 4.0)),
        (Constituent::K1, Complex64::new(37.0, -8.0)),
        (Constituent::N2, Complex64::new(12.0, 2.0)),
        (Constituent::M2, Complex64::new(63.0, -20.0)),
        (Constituent::S2, Complex64::new(29.0, 6.0)),
        (Constituent::Mm, Complex64::new(3.5, 0.2)),
        (Constituent::Mf, Complex64::new(6.7, -0.4)),
    ];
    let sources = donors
        .into_iter()
        .map(|(ident, value)| {
            (ident, Box::new(Uniform { value }) as Box<dyn GridSource>)
        })
        .collect();
    TidalModel::in_memory_from_sources(TideType::Tide, sources).unwrap()
}

fn predict(settings: &Settings) -> Vec<maree::Prediction> {
    let model = model();
    let table: WaveTable = table_for_model(&model);
    let epochs: Vec<f64> = (0..24).map(|k| 1_041_379_200.0 + k as f64 * 3600.0).collect();
    let lons = vec![123.4; epochs.len()];
    let lats = vec![-21.7; epochs.len()];
    evaluate_tide(&model, &table, &epochs, &lons, &lats, settings).unwrap()
}

#[test]
fn doodson_engine_predicts_finite_tides() {
    let predictions = predict(&Settings::perth());
    for prediction in &predictions {
        assert_eq!(prediction.quality, 4);
        assert!(prediction.tide.is_finite());
    }
    // A semi-diurnal signal this strong swings by tens of centimeters
    // over a day.
    let max = predictions.iter().map(|p| p.tide).fold(f64::MIN, f64::max);
    let min = predictions.iter().map(|p| p.tide).fold(f64::MAX, f64::min);
    assert!(max - min > 50.0, "implausibly flat series: {min}..{max}");
}

#[test]
fn linear_admittance_fills_minors() {
    let with_inference = predict(&Settings::perth());
    let without = predict(&Settings::perth().with_inference(InferenceKind::Zero));
    let delta: f64 = with_inference
        .iter()
        .zip(&without)
        .map(|(a, b)| (a.tide - b.tide).abs())
        .sum();
    assert!(delta > 1.0, "inference contributed nothing");
}

#[test]
fn fourier_and_linear_admittance_roughly_agree() {
    let linear = predict(&Settings::perth());
    let fourier = predict(&Settings::perth().with_inference(InferenceKind::Fourier));
    for (a, b) in linear.iter().zip(&fourier) {
        // Different interpolants over the same donors: same ballpark.
        assert_float_eq!(a.tide, b.tide, abs <= 0.3 * a.tide.abs().max(10.0));
    }
}

#[test]
fn group_modulations_change_the_series() {
    let standard = predict(&Settings::perth());
    let grouped = predict(&Settings::perth().with_group_modulations(true));
    let delta: f64 = standard
        .iter()
        .zip(&grouped)
        .map(|(a, b)| (a.tide - b.tide).abs())
        .sum();
    assert!(delta > 0.1);
}
