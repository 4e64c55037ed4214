// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Gridded tidal constituents.
//!
//! A tidal model is a set of per-constituent rasters of complex amplitudes
//! sharing one [`GridSpec`]. Cells are read either from memory or through
//! a bounded LRU cache over a [`GridSource`]; queries interpolate the four
//! neighboring cells with land-aware weights.

use num::complex::Complex64;
use thiserror::Error;

mod accelerator;
mod cache;
mod model;
mod spec;

pub use accelerator::Accelerator;
pub use model::{AccessMode, TidalModel};
pub use spec::GridSpec;

/// Number of valid corners that entered an interpolation: 4 means fully
/// interpolated, 1–3 extrapolated near a coast, 0 no data.
pub type Quality = u8;

/// Quality flag of an undefined result.
pub const UNDEFINED: Quality = 0;

/// Kinds of tide a model can carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TideType {
    /// Ocean tide.
    Tide,
    /// Radial (loading) tide.
    Radial,
}

/// Smallest accepted cache budget in MiB.
pub const MIN_BUFFER_MIB: usize = 64;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid read failed: {0}")]
    Io(String),
    #[error("the definition of grids is not constant")]
    SchemaMismatch,
    #[error("the buffer size must be at least {MIN_BUFFER_MIB} MiB, got {0}")]
    BufferTooSmall(usize),
    #[error("the model handles no constituent grid")]
    Empty,
    #[error("the access mode of the model does not support this operation")]
    WrongAccessMode,
}

/// Capability producing complex constituent values for integer cell
/// indices; land is reported as `None`.
pub trait GridSource: Send + Sync {
    /// Geometry shared by every source of a model.
    fn spec(&self) -> GridSpec;

    /// Reads one cell; `None` marks a land (fill) value.
    fn read_cell(&self, i_lat: usize, i_lon: usize) -> Result<Option<Complex64>, GridError>;
}
