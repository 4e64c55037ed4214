// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Ocean and solid-earth radial tide prediction.
//!
//! Marée combines a global grid of tidal harmonic constituents with an
//! astronomical-argument engine: given a position and a UTC time it
//! returns the short-period tide, the long-period equilibrium tide and a
//! quality flag counting the grid corners that backed the interpolation.
//!
//! ```no_run
//! use maree::{AccessMode, Maree, TideType};
//!
//! # fn example(sources: Vec<(maree::darwin::Constituent, Box<dyn maree::GridSource>)>)
//! # -> Result<(), maree::Error> {
//! let mut handle = Maree::from_sources(TideType::Tide, AccessMode::Memory, sources)?;
//! let (tide, long_period, quality) = handle.evaluate(59.195, -7.688, 1_041_379_200.0)?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

mod config;
mod driver;
mod handle;
mod settings;

pub use config::{buffer_size_from_env, Config, WaveSource, BUFFER_SIZE_ENV};
pub use driver::{
    evaluate_equilibrium_long_period, evaluate_tide, evaluate_tide_from_constituents,
    table_for_model, Prediction,
};
pub use handle::{GridOpener, Maree};
pub use settings::Settings;

pub use maree_astro::{Astronomic, Formulae};
pub use maree_grid::{
    AccessMode, Accelerator, GridError, GridSource, GridSpec, Quality, TidalModel,
    TideType, MIN_BUFFER_MIB, UNDEFINED,
};
pub use maree_waves::{
    darwin, doodson, DynamicGroups, InferenceKind, LongPeriodEquilibrium, TideSum,
    UnknownConstituentError, UnsupportedInferenceError, WaveKind, WaveTable,
};

/// Errors surfaced by the prediction pipeline. `NoData` is not among
/// them: a query on land is reported through the quality flag.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    UnknownConstituent(#[from] UnknownConstituentError),
    #[error(transparent)]
    UnsupportedInference(#[from] UnsupportedInferenceError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
