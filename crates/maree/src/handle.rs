// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! The prediction handle: a loaded Darwin-engine model plus the mutable
//! state of a single-query evaluation loop.

use maree_grid::{AccessMode, Accelerator, GridSource, Quality, TidalModel, TideType};
use maree_waves::darwin::{Constituent, WaveTable};
use maree_waves::{LongPeriodEquilibrium, WaveTable as _};

use crate::config::{buffer_size_from_env, Config, WaveSource};
use crate::driver::{evaluate_one, evaluate_tide, table_for_model, Prediction};
use crate::{Error, Settings};

/// Opens the byte-level producer behind a configured grid file. The file
/// format is outside the scope of this crate; implementors typically wrap
/// a raster library.
pub trait GridOpener {
    fn open(&self, source: &WaveSource) -> Result<Box<dyn GridSource>, Error>;
}

impl<F> GridOpener for F
where
    F: Fn(&WaveSource) -> Result<Box<dyn GridSource>, Error>,
{
    fn open(&self, source: &WaveSource) -> Result<Box<dyn GridSource>, Error> {
        self(source)
    }
}

/// A loaded tidal model ready for queries.
pub struct Maree {
    model: TidalModel<Constituent>,
    settings: Settings,
    table: WaveTable,
    inference: maree_waves::darwin::Inference,
    long_period: LongPeriodEquilibrium,
    accelerator: Accelerator,
    last_quality: Quality,
}

impl Maree {
    /// Builds a handle from already-opened grid sources.
    pub fn from_sources(
        tide_type: TideType,
        mode: AccessMode,
        sources: Vec<(Constituent, Box<dyn GridSource>)>,
    ) -> Result<Self, Error> {
        let mut model = match mode {
            AccessMode::Memory => TidalModel::in_memory_from_sources(tide_type, sources)?,
            AccessMode::Direct => {
                let buffer_mib = buffer_size_from_env()?;
                TidalModel::direct(tide_type, sources, buffer_mib)?
            }
        };
        // Grid-provided waves are dynamic: trusted as-is, excluded from
        // the equilibrium long-period sum.
        model.set_dynamic(model.identifiers().to_vec());

        Self::from_model(model, Settings::default())
    }

    /// Builds a handle by reading a configuration file and opening every
    /// grid it names through `opener`.
    pub fn open_with(
        tide_type: TideType,
        mode: AccessMode,
        config_path: impl AsRef<std::path::Path>,
        opener: &dyn GridOpener,
    ) -> Result<Self, Error> {
        let config = Config::read(config_path)?;
        let mut sources = Vec::new();
        for wave_source in config.wave_sources(tide_type)? {
            let source = opener.open(&wave_source)?;
            sources.push((wave_source.constituent, source));
        }
        Self::from_sources(tide_type, mode, sources)
    }

    /// Builds a handle around an existing model.
    pub fn from_model(
        model: TidalModel<Constituent>,
        settings: Settings,
    ) -> Result<Self, Error> {
        let table: WaveTable = table_for_model(&model);
        let inference = table.inference(settings.inference())?;
        let long_period = LongPeriodEquilibrium::new(table.dynamic_long_period_groups());
        let accelerator =
            Accelerator::new(settings.astronomic_formulae(), settings.time_tolerance());
        Ok(Self {
            model,
            settings,
            table,
            inference,
            long_period,
            accelerator,
            last_quality: 0,
        })
    }

    /// Replaces the settings, rebuilding the dependent state.
    pub fn with_settings(self, settings: Settings) -> Result<Self, Error> {
        Self::from_model(self.model, settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn model(&self) -> &TidalModel<Constituent> {
        &self.model
    }

    /// Resizes the direct-mode cache budget in MiB.
    pub fn set_buffer_size(&self, buffer_mib: usize) -> Result<(), Error> {
        self.model.set_buffer_size(buffer_mib)?;
        Ok(())
    }

    /// Computes the tide at a position and UTC epoch. Returns the
    /// short-period tide, the long-period tide and the quality flag; over
    /// land the short-period tide is NaN and the quality 0.
    pub fn evaluate(
        &mut self,
        lat: f64,
        lon: f64,
        epoch: f64,
    ) -> Result<(f64, f64, Quality), Error> {
        let prediction = evaluate_one(
            &self.model,
            &mut self.table,
            &self.inference,
            &self.long_period,
            &mut self.accelerator,
            &self.settings,
            epoch,
            lon,
            lat,
        )?;
        self.last_quality = prediction.quality;
        Ok((prediction.tide, prediction.long_period, prediction.quality))
    }

    /// Bulk evaluation with the parallel driver.
    pub fn evaluate_many(
        &self,
        epochs: &[f64],
        lons: &[f64],
        lats: &[f64],
    ) -> Result<Vec<Prediction>, Error> {
        evaluate_tide(&self.model, &self.table, epochs, lons, lats, &self.settings)
    }

    /// Corner count of the last single query.
    pub fn min_number(&self) -> Quality {
        self.last_quality
    }
}
