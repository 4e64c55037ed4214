// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Per-thread scratch state that short-circuits recomputation when
//! successive queries cluster in time or space. Never shared between
//! threads; each worker owns its own instance.

use num::complex::Complex64;

use maree_astro::{Astronomic, Formulae};

/// Corner values of the cell enclosing the last query, in the order
/// south-west, south-east, north-west, north-east.
#[derive(Clone, Debug)]
pub(crate) struct CellCorners {
    pub west_lon: f64,
    pub east_lon: f64,
    pub south_lat: f64,
    pub north_lat: f64,
    /// One corner quadruple per wave of the model.
    pub values: Vec<[Option<Complex64>; 4]>,
}

impl CellCorners {
    pub(crate) fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.south_lat..=self.north_lat).contains(&lat)
            && (self.west_lon..=self.east_lon).contains(&lon)
    }
}

/// Caches the last astronomical evaluation and the last interpolated cell.
#[derive(Clone, Debug)]
pub struct Accelerator {
    time_tolerance: f64,
    epoch: f64,
    angles: Astronomic,
    pub(crate) corners: Option<CellCorners>,
}

impl Accelerator {
    /// `time_tolerance` is the number of seconds during which astronomical
    /// angles are considered constant; zero disables the angle cache.
    pub fn new(formulae: Formulae, time_tolerance: f64) -> Self {
        Self {
            time_tolerance,
            epoch: f64::MAX,
            angles: Astronomic::new(formulae),
            corners: None,
        }
    }

    /// The astronomical angles at `epoch`, reusing the last evaluation
    /// when it is within the tolerance.
    pub fn calculate_angles(&mut self, epoch: f64) -> &Astronomic {
        if (epoch - self.epoch).abs() > self.time_tolerance {
            self.epoch = epoch;
            self.angles.update(epoch);
        }
        &self.angles
    }

    /// Drops the cached cell, forcing the next query to re-read corners.
    pub fn clear_cell(&mut self) {
        self.corners = None;
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn test_zero_tolerance_always_updates() {
        let mut acc = Accelerator::new(Formulae::SchuremanOrder1, 0.0);
        let s0 = acc.calculate_angles(0.0).s();
        let s1 = acc.calculate_angles(3600.0).s();
        assert!((s0 - s1).abs() > 0.0);
    }

    #[test]
    fn test_tolerance_reuses_angles() {
        let mut acc = Accelerator::new(Formulae::SchuremanOrder1, 3600.0);
        let s0 = acc.calculate_angles(0.0).s();
        // Within the tolerance the stale angles are served.
        let s1 = acc.calculate_angles(1800.0).s();
        assert_float_eq!(s0, s1, abs <= 0.0);
        // Beyond the tolerance they are refreshed.
        let s2 = acc.calculate_angles(7200.0).s();
        assert!((s0 - s2).abs() > 0.0);
    }

    #[test]
    fn test_cell_contains() {
        let corners = CellCorners {
            west_lon: 10.0,
            east_lon: 11.0,
            south_lat: 45.0,
            north_lat: 46.0,
            values: Vec::new(),
        };
        assert!(corners.contains(45.5, 10.5));
        assert!(!corners.contains(46.5, 10.5));
        assert!(!corners.contains(45.5, 11.5));
    }
}
