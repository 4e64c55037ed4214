// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Tidal constituent catalogues and everything that turns a set of complex
//! constituent values into an instantaneous tide: nodal corrections,
//! admittance, the long-period equilibrium sum and the harmonic-analysis
//! helpers.
//!
//! Two engines coexist. The `darwin` engine carries Schureman's development
//! (11-tuple arguments, closed-form node factors, spline admittance); the
//! `doodson` engine carries Doodson-number arguments with Ray-style
//! sine-series nodal corrections and linear/Fourier admittance. Both
//! implement the [`WaveTable`] trait consumed by the prediction driver.

use std::fmt::Debug;
use std::hash::Hash;

use num::complex::Complex64;
use thiserror::Error;

use maree_astro::Astronomic;

pub mod darwin;
pub mod doodson;
pub mod long_period;
pub mod xdo;

pub use long_period::{DynamicGroups, LongPeriodEquilibrium};

/// Period class of a tidal wave.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WaveKind {
    /// Period longer than one day.
    LongPeriod,
    /// Diurnal and shorter.
    ShortPeriod,
}

/// A name could not be matched against a constituent registry.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown constituent name: {0}")]
pub struct UnknownConstituentError(pub String);

/// Admittance policy used to fill minor constituents.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InferenceKind {
    /// Hard-coded spline/linear combinations of the seven Darwin majors.
    #[default]
    Spline,
    /// Piecewise-linear admittance interpolation in frequency.
    Linear,
    /// Munk–Cartwright low-order Fourier admittance.
    Fourier,
    /// No inference; unmodeled minors stay at zero.
    Zero,
}

/// The requested admittance policy does not exist for this engine.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("inference policy {kind:?} is not supported by the {engine} engine")]
pub struct UnsupportedInferenceError {
    pub kind: InferenceKind,
    pub engine: &'static str,
}

/// Identifier of a tidal constituent within one registry.
pub trait ConstituentId:
    Copy + Clone + Debug + Eq + Hash + Ord + Send + Sync + 'static
{
    /// Case-insensitive lookup of a constituent name.
    fn parse(name: &str) -> Result<Self, UnknownConstituentError>;

    /// Canonical name of the constituent.
    fn name(self) -> &'static str;

    /// Every identifier of the registry, in canonical order.
    fn all() -> &'static [Self];
}

/// The short-period and long-period halves of a constituent summation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TideSum {
    /// Sum over the short-period waves, in the grid's units.
    pub short_period: f64,
    /// Sum over the modeled long-period waves.
    pub long_period: f64,
}

/// An ordered collection of waves ready for prediction.
///
/// The per-evaluation state (tide value, nodal corrections) is owned by the
/// table; workers clone the table and mutate their private copy.
pub trait WaveTable: Clone + Send {
    /// The constituent registry this table is keyed by.
    type Id: ConstituentId;

    /// Precomputed admittance state.
    type Inference: Send + Sync;

    /// Stores an interpolated tide value for a constituent.
    fn set_tide(&mut self, id: Self::Id, tide: Complex64);

    /// Marks a constituent as provided by the model grid.
    fn set_modeled(&mut self, id: Self::Id, modeled: bool);

    /// Marks a constituent as dynamic (a major participating in
    /// admittance, excluded from the equilibrium long-period sum).
    fn set_dynamic(&mut self, id: Self::Id, dynamic: bool);

    /// Updates `f`, `u` and the Greenwich argument of every wave.
    fn compute_nodal_corrections(&mut self, angles: &Astronomic, group_modulations: bool);

    /// Builds the admittance state for the requested policy.
    fn inference(
        &self,
        kind: InferenceKind,
    ) -> Result<Self::Inference, UnsupportedInferenceError>;

    /// Fills unmodeled minor constituents from the majors.
    fn apply_inference(&mut self, inference: &Self::Inference, latitude: f64);

    /// Sums the corrected contributions of every wave.
    fn summation(&self) -> TideSum;

    /// Long-period groups excluded from the equilibrium sum because the
    /// corresponding wave is dynamic.
    fn dynamic_long_period_groups(&self) -> DynamicGroups;
}

/// Corrected contribution of one wave:
/// `f · (Re(z)·cos(v + u) + Im(z)·sin(v + u))`.
pub(crate) fn corrected_tide(tide: Complex64, f: f64, vu: f64) -> f64 {
    f * tide.re.mul_add(vu.cos(), tide.im * vu.sin())
}
