// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Long-period equilibrium ocean tide.
//!
//! Sums the order-2 and order-3 rows of the Cartwright–Tayler–Edden
//! potential over Ray's 1990 mean longitudes. Rows belonging to a wave that
//! the model provides dynamically are zeroed so the constituent is not
//! counted twice.

use std::f64::consts::PI;

use maree_math::math::normalize_degrees;

/// One potential row: multipliers on `(s, h, p, N′, p₁)` and an amplitude
/// in meters.
type Row = [f64; 6];

/// Order-2 potential (106 waves).
const ORDER2: [Row; 106] = [
    [0.0, 0.0, 0.0, 1.0, 0.0, 0.02793],
    [0.0, 0.0, 0.0, 2.0, 0.0, -0.00027],
    [0.0, 0.0, 2.0, 1.0, 0.0, 0.00004],
    [0.0, 1.0, 0.0, -1.0, -1.0, -0.00004],
    [0.0, 1.0, 0.0, 0.0, -1.0, -0.00492],
    [0.0, 1.0, 0.0, 0.0, 1.0, 0.00026],
    [0.0, 1.0, 0.0, 1.0, -1.0, 0.00005],
    [0.0, 2.0, -2.0, -1.0, 0.0, 0.00002],
    [0.0, 2.0, -2.0, 0.0, 0.0, -0.00031],
    [0.0, 2.0, 0.0, 0.0, 0.0, -0.03095],
    [0.0, 2.0, 0.0, 0.0, -2.0, -0.00008],
    [0.0, 2.0, 0.0, 1.0, 0.0, 0.00077],
    [0.0, 2.0, 0.0, 2.0, 0.0, 0.00017],
    [0.0, 3.0, 0.0, 0.0, -1.0, -0.00181],
    [0.0, 3.0, 0.0, 1.0, -1.0, 0.00003],
    [0.0, 4.0, 0.0, 0.0, -2.0, -0.00007],
    [1.0, -3.0, 1.0, -1.0, 1.0, 0.00002],
    [1.0, -3.0, 1.0, 0.0, 1.0, -0.00029],
    [1.0, -3.0, 1.0, 1.0, 1.0, 0.00002],
    [1.0, -2.0, -1.0, -2.0, 0.0, 0.00003],
    [1.0, -2.0, -1.0, -1.0, 0.0, 0.00007],
    [1.0, -2.0, 1.0, -1.0, 0.0, 0.00048],
    [1.0, -2.0, 1.0, 0.0, 0.0, -0.00673],
    [1.0, -2.0, 1.0, 1.0, 0.0, 0.00043],
    [1.0, -1.0, -1.0, -1.0, 1.0, 0.00002],
    [1.0, -1.0, -1.0, 0.0, 1.0, -0.00021],
    [1.0, -1.0, -1.0, 1.0, 1.0, 0.00000],
    [1.0, -1.0, 0.0, 0.0, 0.0, 0.00020],
    [1.0, -1.0, 1.0, 0.0, -1.0, 0.00005],
    [1.0, 0.0, -1.0, -2.0, 0.0, -0.00003],
    [1.0, 0.0, -1.0, -1.0, 0.0, 0.00231],
    [1.0, 0.0, -1.0, 0.0, 0.0, -0.03518],
    [1.0, 0.0, -1.0, 1.0, 0.0, 0.00228],
    [1.0, 0.0, 1.0, 0.0, 0.0, 0.00189],
    [1.0, 0.0, 1.0, 1.0, 0.0, 0.00077],
    [1.0, 0.0, 1.0, 2.0, 0.0, 0.00021],
    [1.0, 1.0, -1.0, 0.0, -1.0, 0.00018],
    [1.0, 2.0, -1.0, 0.0, 0.0, 0.00049],
    [1.0, 2.0, -1.0, 1.0, 0.0, 0.00024],
    [1.0, 2.0, -1.0, 2.0, 0.0, 0.00004],
    [1.0, 3.0, -1.0, 0.0, -1.0, 0.00003],
    [2.0, -4.0, 2.0, 0.0, 0.0, -0.00011],
    [2.0, -3.0, 0.0, 0.0, 1.0, -0.00038],
    [2.0, -3.0, 0.0, 1.0, 1.0, 0.00002],
    [2.0, -2.0, 0.0, -1.0, 0.0, -0.00042],
    [2.0, -2.0, 0.0, 0.0, 0.0, -0.00582],
    [2.0, -2.0, 0.0, 1.0, 0.0, 0.00037],
    [2.0, -2.0, 2.0, 0.0, 0.0, 0.00004],
    [2.0, -1.0, -2.0, 0.0, 1.0, -0.00004],
    [2.0, -1.0, -1.0, 0.0, 0.0, 0.00003],
    [2.0, -1.0, 0.0, 0.0, -1.0, 0.00007],
    [2.0, -1.0, 0.0, 0.0, 1.0, -0.00020],
    [2.0, -1.0, 0.0, 1.0, 1.0, -0.00004],
    [2.0, 0.0, -2.0, -1.0, 0.0, 0.00015],
    [2.0, 0.0, -2.0, 0.0, 0.0, -0.00288],
    [2.0, 0.0, -2.0, 1.0, 0.0, 0.00019],
    [2.0, 0.0, 0.0, 0.0, 0.0, -0.06662],
    [2.0, 0.0, 0.0, 1.0, 0.0, -0.02762],
    [2.0, 0.0, 0.0, 2.0, 0.0, -0.00258],
    [2.0, 0.0, 0.0, 3.0, 0.0, 0.00007],
    [2.0, 1.0, -2.0, 0.0, -1.0, 0.00003],
    [2.0, 1.0, 0.0, 0.0, -1.0, 0.00023],
    [2.0, 1.0, 0.0, 1.0, -1.0, 0.00006],
    [2.0, 2.0, -2.0, 0.0, 0.0, 0.00020],
    [2.0, 2.0, -2.0, 1.0, 0.0, 0.00008],
    [2.0, 2.0, 0.0, 2.0, 0.0, 0.00003],
    [3.0, -5.0, 1.0, 0.0, 1.0, -0.00002],
    [3.0, -4.0, 1.0, 0.0, 0.0, -0.00017],
    [3.0, -3.0, -1.0, 0.0, 1.0, -0.00007],
    [3.0, -3.0, 1.0, 0.0, 1.0, -0.00012],
    [3.0, -3.0, 1.0, 1.0, 1.0, -0.00004],
    [3.0, -2.0, -1.0, -1.0, 0.0, -0.00010],
    [3.0, -2.0, -1.0, 0.0, 0.0, -0.00091],
    [3.0, -2.0, -1.0, 1.0, 0.0, 0.00006],
    [3.0, -2.0, 1.0, 0.0, 0.0, -0.00242],
    [3.0, -2.0, 1.0, 1.0, 0.0, -0.00100],
    [3.0, -2.0, 1.0, 2.0, 0.0, -0.00009],
    [3.0, -1.0, -1.0, 0.0, 1.0, -0.00013],
    [3.0, -1.0, -1.0, 1.0, 1.0, -0.00004],
    [3.0, -1.0, 0.0, 0.0, 0.0, 0.00006],
    [3.0, -1.0, 0.0, 1.0, 0.0, 0.00003],
    [3.0, -1.0, 1.0, 0.0, -1.0, 0.00003],
    [3.0, 0.0, -3.0, 0.0, 0.0, -0.00023],
    [3.0, 0.0, -3.0, 1.0, -1.0, 0.00004],
    [3.0, 0.0, -3.0, 1.0, 1.0, 0.00004],
    [3.0, 0.0, -1.0, 0.0, 0.0, -0.01275],
    [3.0, 0.0, -1.0, 1.0, 0.0, -0.00528],
    [3.0, 0.0, -1.0, 2.0, 0.0, -0.00051],
    [3.0, 0.0, 1.0, 2.0, 0.0, 0.00005],
    [3.0, 0.0, 1.0, 3.0, 0.0, 0.00002],
    [3.0, 1.0, -1.0, 0.0, -1.0, 0.00011],
    [3.0, 1.0, -1.0, 1.0, -1.0, 0.00004],
    [4.0, -4.0, 0.0, 0.0, 0.0, -0.00008],
    [4.0, -4.0, 2.0, 0.0, 0.0, -0.00006],
    [4.0, -4.0, 2.0, 1.0, 0.0, -0.00002],
    [4.0, -3.0, 0.0, 0.0, 1.0, -0.00014],
    [4.0, -3.0, 0.0, 1.0, 1.0, -0.00006],
    [4.0, -2.0, -2.0, 0.0, 0.0, -0.00011],
    [4.0, -2.0, 0.0, 0.0, 0.0, -0.00205],
    [4.0, -2.0, 0.0, 1.0, 0.0, -0.00085],
    [4.0, -2.0, 0.0, 2.0, 0.0, -0.00008],
    [4.0, -1.0, -2.0, 0.0, 1.0, -0.00003],
    [4.0, -1.0, 0.0, 0.0, -1.0, 0.00003],
    [4.0, 0.0, -2.0, 0.0, 0.0, -0.00169],
    [4.0, 0.0, -2.0, 1.0, 0.0, -0.00070],
    [4.0, 0.0, -2.0, 2.0, 0.0, -0.00006],
];

/// Order-3 potential (17 waves).
const ORDER3: [Row; 17] = [
    [0.0, 0.0, 1.0, 0.0, 0.0, -0.00021],
    [0.0, 2.0, -1.0, 0.0, 0.0, -0.00004],
    [1.0, -2.0, 0.0, 0.0, 0.0, 0.00004],
    [1.0, 0.0, 0.0, -1.0, 0.0, 0.00019],
    [1.0, 0.0, 0.0, 0.0, 0.0, -0.00375],
    [1.0, 0.0, 0.0, 1.0, 0.0, -0.00059],
    [1.0, 0.0, 0.0, 2.0, 0.0, 0.00005],
    [2.0, -2.0, 1.0, 0.0, 0.0, -0.00012],
    [2.0, 0.0, -1.0, 0.0, 0.0, -0.00061],
    [2.0, 0.0, -1.0, 1.0, 0.0, -0.00010],
    [3.0, -2.0, 0.0, 0.0, 0.0, -0.00010],
    [3.0, 0.0, -2.0, 0.0, 0.0, -0.00007],
    [3.0, 0.0, 0.0, 0.0, 0.0, -0.00030],
    [3.0, 0.0, 0.0, 1.0, 0.0, -0.00019],
    [3.0, 0.0, 0.0, 2.0, 0.0, -0.00004],
    [4.0, 0.0, -1.0, 0.0, 0.0, -0.00008],
    [4.0, 0.0, -1.0, 1.0, 0.0, -0.00005],
];

/// Row groups belonging to a named long-period wave.
const MM_ROWS: [usize; 4] = [29, 30, 31, 32];
const MF_ROWS: [usize; 4] = [56, 57, 58, 59];
const MTM_ROWS: [usize; 3] = [85, 86, 87];
const MSQM_ROWS: [usize; 3] = [98, 99, 100];
const SSA_ROWS: [usize; 3] = [9, 11, 12];

/// Elastic response factor of the degree-2 potential (1 − h₂ + k₂).
const LOVE_ORDER2: f64 = 1.0 - 0.609 + 0.302;
/// Elastic response factor of the degree-3 potential (1 − h₃ + k₃).
const LOVE_ORDER3: f64 = 1.0 - 0.291 + 0.093;

/// Long-period waves the model provides dynamically; their rows are
/// excluded from the equilibrium sum.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DynamicGroups {
    pub mm: bool,
    pub mf: bool,
    pub mtm: bool,
    pub msqm: bool,
    pub ssa: bool,
}

/// The long-period equilibrium evaluator, with its order-2 table already
/// pruned of the dynamic groups.
#[derive(Clone, Debug)]
pub struct LongPeriodEquilibrium {
    order2: [Row; 106],
}

impl Default for LongPeriodEquilibrium {
    fn default() -> Self {
        Self::new(DynamicGroups::default())
    }
}

impl LongPeriodEquilibrium {
    pub fn new(dynamic: DynamicGroups) -> Self {
        let mut order2 = ORDER2;
        let mut zero = |rows: &[usize]| {
            for &row in rows {
                order2[row] = [0.0; 6];
            }
        };
        if dynamic.mm {
            zero(&MM_ROWS);
        }
        if dynamic.mf {
            zero(&MF_ROWS);
        }
        if dynamic.mtm {
            zero(&MTM_ROWS);
        }
        if dynamic.msqm {
            zero(&MSQM_ROWS);
        }
        if dynamic.ssa {
            zero(&SSA_ROWS);
        }
        Self { order2 }
    }

    /// Equilibrium long-period tide in centimeters at the given UTC epoch
    /// (seconds since 1970-01-01T00:00:00Z) and latitude (degrees).
    pub fn height(&self, epoch: f64, latitude: f64) -> f64 {
        // Days since Ray's 1990 reference for the mean-longitude fits.
        let days = epoch / 86_400.0 + 7305.0 + 33_282.0 - 46_796.0;

        let longitudes = [
            normalize_degrees(13.17639650f64.mul_add(days, 290.210)).to_radians(),
            normalize_degrees(0.98564730f64.mul_add(days, 280.120)).to_radians(),
            normalize_degrees(0.11140410f64.mul_add(days, 274.350)).to_radians(),
            normalize_degrees(0.05295390f64.mul_add(days, 343.510)).to_radians(),
            normalize_degrees(283.000).to_radians(),
        ];

        let argument = |row: &Row| {
            row[..5]
                .iter()
                .zip(longitudes)
                .map(|(&coefficient, longitude)| coefficient * longitude)
                .sum::<f64>()
        };

        let mut h20 = 0.0;
        for row in &self.order2 {
            h20 += argument(row).cos() * row[5];
        }

        let mut h30 = 0.0;
        for row in &ORDER3 {
            h30 += argument(row).sin() * row[5];
        }

        let sin_lat = latitude.to_radians().sin();
        let c20 = (5.0 / (4.0 * PI)).sqrt() * 1.5f64.mul_add(sin_lat * sin_lat, -0.5);
        let c30 = (7.0 / (4.0 * PI)).sqrt()
            * 2.5f64.mul_add(sin_lat * sin_lat, -1.5)
            * sin_lat;

        // Meters to centimeters.
        (LOVE_ORDER2 * c20 * h20 + LOVE_ORDER3 * c30 * h30) * 1e2
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    /// UTC epoch of a CNES Julian day (days since 1950-01-01T00:00:00Z).
    fn cnes_epoch(day: f64) -> f64 {
        (day - 7305.0) * 86_400.0
    }

    #[test]
    fn test_known_value_with_dynamic_groups() {
        // CNES day 1, latitude 1°, with the Mm, Mf, Mtm and MSqm groups
        // dynamic; the expected value comes from the FES distribution.
        let lpe = LongPeriodEquilibrium::new(DynamicGroups {
            mm: true,
            mf: true,
            mtm: true,
            msqm: true,
            ssa: false,
        });
        assert_float_eq!(
            lpe.height(cnes_epoch(1.0), 1.0),
            -1.124059213786,
            abs <= 1e-6
        );
    }

    #[test]
    fn test_all_groups_static_changes_height() {
        let all = LongPeriodEquilibrium::default();
        let pruned = LongPeriodEquilibrium::new(DynamicGroups {
            mf: true,
            ..DynamicGroups::default()
        });
        let epoch = cnes_epoch(12_053.0);
        assert!((all.height(epoch, 30.0) - pruned.height(epoch, 30.0)).abs() > 1e-6);
    }

    #[test]
    fn test_single_mf_row_matches_closed_form() {
        // Keep only the Mf row and compare against the closed-form cosine
        // term scaled by the Legendre factor at 45° latitude.
        let mut lpe = LongPeriodEquilibrium::default();
        for (index, row) in lpe.order2.iter_mut().enumerate() {
            if index != 56 {
                *row = [0.0; 6];
            }
        }

        let epoch = 946_728_000.0; // J2000
        let days = epoch / 86_400.0 + 7305.0 + 33_282.0 - 46_796.0;
        let s =
            normalize_degrees(13.17639650f64.mul_add(days, 290.210)).to_radians();
        let sin_lat = 45.0f64.to_radians().sin();
        let c20 =
            (5.0 / (4.0 * PI)).sqrt() * 1.5f64.mul_add(sin_lat * sin_lat, -0.5);
        let expected = LOVE_ORDER2 * c20 * (-0.06662) * (2.0 * s).cos() * 1e2;

        assert_float_eq!(lpe.height(epoch, 45.0), expected, abs <= 1e-9);
    }

    #[test]
    fn test_zeroed_table_returns_zero_order2() {
        let lpe = LongPeriodEquilibrium {
            order2: [[0.0; 6]; 106],
        };
        // Only the order-3 sine terms remain; at the equator the degree-3
        // Legendre factor vanishes, so the height is exactly zero.
        assert_float_eq!(lpe.height(0.0, 0.0), 0.0, abs <= 1e-12);
    }

    #[test]
    fn test_vanishes_at_magic_latitude() {
        // The degree-2 Legendre factor vanishes where sin²φ = 1/3 and the
        // degree-3 contribution is three orders of magnitude smaller.
        let latitude = (1.0f64 / 3.0).sqrt().asin().to_degrees();
        let value = LongPeriodEquilibrium::default().height(cnes_epoch(1000.0), latitude);
        assert!(value.abs() < 0.1, "height {value} too large");
    }
}
