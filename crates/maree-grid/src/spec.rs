// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Geometry of a regular latitude/longitude raster.

use maree_math::interpolate::EPSILON;

/// Pseudo-infinite longitude bound of a globally wrapping grid.
const UNBOUNDED_LON: f64 = 1.0e250;

/// Metadata of a regular grid. All per-constituent rasters of one model
/// share the same spec; a mismatch at load time is fatal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub lat_min: f64,
    pub lat_step: f64,
    pub n_lat: usize,
    pub lon_min: f64,
    pub lon_step: f64,
    pub n_lon: usize,
    /// True when cells are stored longitude-major.
    pub transpose: bool,
}

impl GridSpec {
    /// Latitude of the last row.
    pub fn lat_max(&self) -> f64 {
        self.lat_min + self.lat_step * (self.n_lat - 1) as f64
    }

    /// Longitude of the last column, or an unbounded value when the grid
    /// covers the full circumference.
    pub fn lon_max(&self) -> f64 {
        if self.is_circular() {
            UNBOUNDED_LON
        } else {
            self.lon_min + self.lon_step * (self.n_lon - 1) as f64
        }
    }

    /// True when the grid wraps around the sphere.
    pub fn is_circular(&self) -> bool {
        (self.lon_step * self.n_lon as f64 - 360.0).abs() < EPSILON
    }

    /// Number of cells in one raster.
    pub fn len(&self) -> usize {
        self.n_lat * self.n_lon
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of a cell, honoring the axis order.
    pub fn cell_index(&self, i_lat: usize, i_lon: usize) -> usize {
        if self.transpose {
            i_lon * self.n_lat + i_lat
        } else {
            i_lat * self.n_lon + i_lon
        }
    }

    pub fn lat_value(&self, index: usize) -> f64 {
        self.lat_min + self.lat_step * index as f64
    }

    pub fn lon_value(&self, index: usize) -> f64 {
        self.lon_min + self.lon_step * index as f64
    }

    /// Brings a longitude into `[base, base + 360°)`.
    pub fn normalize_longitude(base: f64, longitude: f64) -> f64 {
        let mut result = longitude;
        while result >= base + 360.0 - EPSILON {
            result -= 360.0;
        }
        while result < base - EPSILON {
            result += 360.0;
        }
        if (result - base).abs() <= EPSILON {
            result = base;
        }
        result
    }

    /// True when the position lies inside the grid bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max()).contains(&lat)
            && (self.lon_min..=self.lon_max()).contains(&lon)
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    fn global() -> GridSpec {
        GridSpec {
            lat_min: -90.0,
            lat_step: 1.0,
            n_lat: 181,
            lon_min: 0.0,
            lon_step: 1.0,
            n_lon: 360,
            transpose: false,
        }
    }

    #[test]
    fn test_circular_grid_has_unbounded_longitude() {
        let spec = global();
        assert!(spec.is_circular());
        assert!(spec.lon_max() > 1e200);
        assert!(spec.contains(0.0, 359.5));
    }

    #[test]
    fn test_bounded_grid() {
        let spec = GridSpec {
            n_lon: 100,
            ..global()
        };
        assert!(!spec.is_circular());
        assert_float_eq!(spec.lon_max(), 99.0, abs <= 1e-12);
        assert!(!spec.contains(0.0, 120.0));
    }

    #[test]
    fn test_normalize_longitude() {
        assert_float_eq!(GridSpec::normalize_longitude(0.0, -10.0), 350.0, abs <= 1e-9);
        assert_float_eq!(GridSpec::normalize_longitude(0.0, 370.0), 10.0, abs <= 1e-9);
        assert_float_eq!(GridSpec::normalize_longitude(-180.0, 185.0), -175.0, abs <= 1e-9);
        assert_float_eq!(GridSpec::normalize_longitude(0.0, 360.0), 0.0, abs <= 1e-9);
    }

    #[test]
    fn test_cell_index_axis_order() {
        let spec = global();
        assert_eq!(spec.cell_index(2, 3), 2 * 360 + 3);
        let transposed = GridSpec {
            transpose: true,
            ..global()
        };
        assert_eq!(transposed.cell_index(2, 3), 3 * 181 + 2);
    }
}
