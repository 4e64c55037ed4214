// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! End-to-end scenarios over synthetic constituent grids.

use float_eq::assert_float_eq;
use num::complex::Complex64;

use maree::darwin::Constituent;
use maree::{
    evaluate_tide_from_constituents, AccessMode, Error, GridError, GridSource,
    GridSpec, InferenceKind, Maree, Settings, TideType, UNDEFINED,
};

/// A synthetic quarter-degree global grid holding one constant complex
/// value everywhere north of `land_below` degrees of latitude.
struct Uniform {
    value: Complex64,
    land_below: f64,
}

fn spec() -> GridSpec {
    GridSpec {
        lat_min: -90.0,
        lat_step: 0.25,
        n_lat: 721,
        lon_min: 0.0,
        lon_step: 0.25,
        n_lon: 1440,
        transpose: false,
    }
}

impl GridSource for Uniform {
    fn spec(&self) -> GridSpec {
        spec()
    }

    fn read_cell(&self, i_lat: usize, i_lon: usize) -> Result<Option<Complex64>, GridError> {
        let _ = i_lon;
        if spec().lat_value(i_lat) < self.land_below {
            Ok(None)
        } else {
            Ok(Some(self.value))
        }
    }
}

fn constituents() -> Vec<(Constituent, Complex64)> {
    vec![
        (Constituent::M2, Complex64::new(120.0, -35.0)),
        (Constituent::S2, Complex64::new(40.0, 10.0)),
        (Constituent::K1, Complex64::new(22.0, 3.0)),
        (Constituent::O1, Complex64::new(-12.0, 8.0)),
    ]
}

fn handle(mode: AccessMode, land_below: f64) -> Maree {
    let sources = constituents()
        .into_iter()
        .map(|(ident, value)| {
            (
                ident,
                Box::new(Uniform { value, land_below }) as Box<dyn GridSource>,
            )
        })
        .collect();
    Maree::from_sources(TideType::Tide, mode, sources).unwrap()
}

#[test]
fn grid_prediction_matches_constituent_prediction() {
    // Over a uniform field the interpolated constituents equal the grid
    // constants, so the full pipeline must agree with the grid-free
    // prediction from the same complex amplitudes.
    let settings = Settings::default().with_inference(InferenceKind::Zero);
    let mut handle = handle(AccessMode::Direct, -95.0)
        .with_settings(settings)
        .unwrap();

    let epochs: Vec<f64> = (0..48).map(|k| 1_041_379_200.0 + k as f64 * 1800.0).collect();
    let expected = evaluate_tide_from_constituents::<maree::darwin::WaveTable>(
        &constituents(),
        &epochs,
        59.195,
        &settings,
    )
    .unwrap();

    for (&epoch, &(tide, long_period)) in epochs.iter().zip(&expected) {
        let (h, h_lp, quality) = handle.evaluate(59.195, -7.688, epoch).unwrap();
        assert_eq!(quality, 4);
        assert_float_eq!(h, tide, abs <= 1e-9);
        assert_float_eq!(h_lp, long_period, abs <= 1e-9);
    }
}

#[test]
fn memory_and_direct_modes_agree() {
    let mut memory = handle(AccessMode::Memory, -95.0);
    let mut direct = handle(AccessMode::Direct, -95.0);
    for k in 0..24 {
        let epoch = 1_041_379_200.0 + k as f64 * 3600.0;
        let a = memory.evaluate(43.5, 352.25, epoch).unwrap();
        let b = direct.evaluate(43.5, 352.25, epoch).unwrap();
        assert_float_eq!(a.0, b.0, abs <= 1e-9);
        assert_float_eq!(a.1, b.1, abs <= 1e-9);
        assert_eq!(a.2, b.2);
    }
}

#[test]
fn land_yields_nan_tide_and_valid_long_period() {
    let mut handle = handle(AccessMode::Memory, 0.0);
    let (h, h_lp, quality) = handle.evaluate(-45.0, 120.0, 1_041_379_200.0).unwrap();
    assert_eq!(quality, UNDEFINED);
    assert!(h.is_nan());
    assert!(h_lp.is_finite());
    assert_eq!(handle.min_number(), UNDEFINED);
}

#[test]
fn longitude_wraps() {
    let mut handle = handle(AccessMode::Memory, -95.0);
    let epoch = 1_041_379_200.0;
    let a = handle.evaluate(12.3, 10.5, epoch).unwrap();
    let b = handle.evaluate(12.3, 370.5, epoch).unwrap();
    assert_float_eq!(a.0, b.0, abs <= 1e-9);
    assert_float_eq!(a.1, b.1, abs <= 1e-9);
}

#[test]
fn bulk_matches_single_queries() {
    let single = handle(AccessMode::Memory, -95.0);
    let epochs: Vec<f64> = (0..96).map(|k| 1_041_379_200.0 + k as f64 * 900.0).collect();
    let lons = vec![5.6; epochs.len()];
    let lats = vec![-33.1; epochs.len()];

    let bulk = single.evaluate_many(&epochs, &lons, &lats).unwrap();

    let mut sequential = handle(AccessMode::Memory, -95.0);
    for (index, &epoch) in epochs.iter().enumerate() {
        let (h, h_lp, quality) = sequential.evaluate(-33.1, 5.6, epoch).unwrap();
        assert_float_eq!(bulk[index].tide, h, abs <= 1e-9);
        assert_float_eq!(bulk[index].long_period, h_lp, abs <= 1e-9);
        assert_eq!(bulk[index].quality, quality);
    }
}

#[test]
fn admittance_enriches_spectrum() {
    // With spline admittance on, the inferred minors shift the prediction
    // relative to the zero policy.
    let epoch = 1_041_379_200.0;
    let mut with_spline = handle(AccessMode::Memory, -95.0);
    let mut without = handle(AccessMode::Memory, -95.0)
        .with_settings(Settings::default().with_inference(InferenceKind::Zero))
        .unwrap();

    let (a, _, _) = with_spline.evaluate(40.0, 10.0, epoch).unwrap();
    let (b, _, _) = without.evaluate(40.0, 10.0, epoch).unwrap();
    assert!((a - b).abs() > 1e-6, "admittance had no effect: {a} vs {b}");
}

#[test]
fn invalid_latitude_is_rejected() {
    let mut handle = handle(AccessMode::Memory, -95.0);
    let result = handle.evaluate(91.0, 0.0, 0.0);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn configuration_drives_the_handle() {
    let dir = std::env::temp_dir().join("maree-config-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tide.conf");
    std::fs::write(
        &path,
        "# synthetic model\n\
         TIDE_M2_FILE = m2.nc\n\
         TIDE_K1_FILE = k1.nc\n\
         TIDE_K1_AMPLITUDE = amp_k1\n",
    )
    .unwrap();

    let opener = |source: &maree::WaveSource| -> Result<Box<dyn GridSource>, Error> {
        let value = match source.constituent {
            Constituent::M2 => Complex64::new(100.0, 0.0),
            _ => Complex64::new(10.0, 5.0),
        };
        Ok(Box::new(Uniform {
            value,
            land_below: -95.0,
        }))
    };

    let mut handle =
        Maree::open_with(TideType::Tide, AccessMode::Memory, &path, &opener).unwrap();
    let (h, _, quality) = handle.evaluate(0.0, 180.0, 1_041_379_200.0).unwrap();
    assert_eq!(quality, 4);
    assert!(h.is_finite());
}
