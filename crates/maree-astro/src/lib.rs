// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Astronomical arguments for tidal prediction: the six fundamental
//! longitudes under four interchangeable formulae, the auxiliary angles of
//! Schureman's development, the closed-form node factors and the ΔT
//! (TT − UTC) series needed by the modern formulae.

pub mod angles;
pub mod delta_t;

pub use angles::{Astronomic, Formulae};
