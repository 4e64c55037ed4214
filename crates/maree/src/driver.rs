// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! The prediction driver.
//!
//! One query flows cache → interpolation → astronomical angles → nodal
//! corrections → admittance → summation. Bulk evaluation partitions the
//! input into contiguous ranges, one rayon worker per range, each owning a
//! private wave-table clone and accelerator; the first failure wins after
//! the workers join.

use num::complex::Complex64;
use rayon::prelude::*;

use maree_grid::{Accelerator, Quality, TidalModel, TideType, UNDEFINED};
use maree_waves::{LongPeriodEquilibrium, WaveTable};

use crate::{Error, Settings};

/// The outcome of one query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// Short-period tide in the units of the grids (centimeters by
    /// convention); NaN over land.
    pub tide: f64,
    /// Long-period tide: equilibrium value plus the modeled long-period
    /// constituents.
    pub long_period: f64,
    /// Number of grid corners backing the interpolation.
    pub quality: Quality,
}

/// Builds a wave table configured for a model: every constituent the
/// model provides is flagged `modeled`, and the model's dynamic list is
/// applied.
pub fn table_for_model<W: WaveTable + Default>(model: &TidalModel<W::Id>) -> W {
    let mut table = W::default();
    for &ident in model.identifiers() {
        table.set_modeled(ident, true);
    }
    for &ident in model.dynamic() {
        table.set_dynamic(ident, true);
    }
    table
}

fn check_query(lat: f64, epoch: f64) -> Result<(), Error> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidArgument(format!(
            "latitude {lat} is outside [-90, 90]"
        )));
    }
    if epoch.is_nan() {
        return Err(Error::InvalidArgument("time is NaN".to_owned()));
    }
    Ok(())
}

/// Evaluates one query against a model. The wave table keeps the
/// per-evaluation state and must belong to the calling thread.
pub(crate) fn evaluate_one<W: WaveTable>(
    model: &TidalModel<W::Id>,
    table: &mut W,
    inference: &W::Inference,
    long_period: &LongPeriodEquilibrium,
    acc: &mut Accelerator,
    settings: &Settings,
    epoch: f64,
    lon: f64,
    lat: f64,
) -> Result<Prediction, Error> {
    check_query(lat, epoch)?;

    let quality = model.interpolate(
        lat,
        lon,
        |ident, value| table.set_tide(ident, value.unwrap_or_default()),
        acc,
    )?;

    let equilibrium = model.tide_type() == TideType::Tide
        && settings.compute_long_period_equilibrium();

    // A query on land still gets the equilibrium long-period tide, which
    // does not depend on the grids.
    if quality == UNDEFINED {
        let lp = if equilibrium {
            long_period.height(epoch, lat)
        } else {
            0.0
        };
        return Ok(Prediction {
            tide: f64::NAN,
            long_period: lp,
            quality,
        });
    }

    let angles = *acc.calculate_angles(epoch);
    table.compute_nodal_corrections(&angles, settings.group_modulations());

    let mut lp = if equilibrium {
        long_period.height(epoch, lat)
    } else {
        0.0
    };

    table.apply_inference(inference, lat);

    let sum = table.summation();
    lp += sum.long_period;

    Ok(Prediction {
        tide: sum.short_period,
        long_period: lp,
        quality,
    })
}

fn worker_count(requested: usize) -> usize {
    if requested == 0 {
        std::thread::available_parallelism().map_or(1, |n| n.get())
    } else {
        requested
    }
}

/// Evaluates the tide for every `(epoch, lon, lat)` triple.
pub fn evaluate_tide<W>(
    model: &TidalModel<W::Id>,
    prototype: &W,
    epochs: &[f64],
    lons: &[f64],
    lats: &[f64],
    settings: &Settings,
) -> Result<Vec<Prediction>, Error>
where
    W: WaveTable + Sync,
{
    if epochs.len() != lons.len() || epochs.len() != lats.len() {
        return Err(Error::InvalidArgument(format!(
            "epoch, longitude and latitude must have the same length, got {}, {} and {}",
            epochs.len(),
            lons.len(),
            lats.len()
        )));
    }

    let inference = prototype.inference(settings.inference())?;
    let long_period = LongPeriodEquilibrium::new(prototype.dynamic_long_period_groups());

    let workers = worker_count(settings.num_threads());
    if workers <= 1 || epochs.len() <= 1 {
        let mut table = prototype.clone();
        let mut acc =
            Accelerator::new(settings.astronomic_formulae(), settings.time_tolerance());
        return epochs
            .iter()
            .zip(lons)
            .zip(lats)
            .map(|((&epoch, &lon), &lat)| {
                evaluate_one(
                    model,
                    &mut table,
                    &inference,
                    &long_period,
                    &mut acc,
                    settings,
                    epoch,
                    lon,
                    lat,
                )
            })
            .collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|err| Error::InvalidArgument(err.to_string()))?;

    let chunk = epochs.len().div_ceil(workers);
    let chunks = pool.install(|| {
        epochs
            .par_chunks(chunk)
            .zip(lons.par_chunks(chunk))
            .zip(lats.par_chunks(chunk))
            .map(|((epochs, lons), lats)| {
                let mut table = prototype.clone();
                let mut acc = Accelerator::new(
                    settings.astronomic_formulae(),
                    settings.time_tolerance(),
                );
                epochs
                    .iter()
                    .zip(lons)
                    .zip(lats)
                    .map(|((&epoch, &lon), &lat)| {
                        evaluate_one(
                            model,
                            &mut table,
                            &inference,
                            &long_period,
                            &mut acc,
                            settings,
                            epoch,
                            lon,
                            lat,
                        )
                    })
                    .collect::<Result<Vec<_>, Error>>()
            })
            .collect::<Result<Vec<_>, Error>>()
    })?;

    Ok(chunks.into_iter().flatten().collect())
}

/// Predicts the tide from a fixed set of complex constituents, without
/// any grid. Returns `(short_period, long_period)` per epoch.
pub fn evaluate_tide_from_constituents<W>(
    constituents: &[(W::Id, Complex64)],
    epochs: &[f64],
    latitude: f64,
    settings: &Settings,
) -> Result<Vec<(f64, f64)>, Error>
where
    W: WaveTable + Default,
{
    check_query(latitude, 0.0)?;

    let mut table = W::default();
    for &(ident, tide) in constituents {
        table.set_tide(ident, tide);
        table.set_modeled(ident, true);
        table.set_dynamic(ident, true);
    }

    let long_period = LongPeriodEquilibrium::new(table.dynamic_long_period_groups());
    let mut acc =
        Accelerator::new(settings.astronomic_formulae(), settings.time_tolerance());

    let mut result = Vec::with_capacity(epochs.len());
    for &epoch in epochs {
        check_query(latitude, epoch)?;
        let angles = *acc.calculate_angles(epoch);
        table.compute_nodal_corrections(&angles, settings.group_modulations());

        let mut lp = if settings.compute_long_period_equilibrium() {
            long_period.height(epoch, latitude)
        } else {
            0.0
        };
        let sum = table.summation();
        lp += sum.long_period;
        result.push((sum.short_period, lp));
    }
    Ok(result)
}

/// Equilibrium long-period tide alone, independent of any model.
pub fn evaluate_equilibrium_long_period(
    epochs: &[f64],
    latitudes: &[f64],
) -> Result<Vec<f64>, Error> {
    if epochs.len() != latitudes.len() {
        return Err(Error::InvalidArgument(format!(
            "epoch and latitude must have the same length, got {} and {}",
            epochs.len(),
            latitudes.len()
        )));
    }
    let long_period = LongPeriodEquilibrium::default();
    epochs
        .iter()
        .zip(latitudes)
        .map(|(&epoch, &lat)| {
            check_query(lat, epoch)?;
            Ok(long_period.height(epoch, lat))
        })
        .collect()
}
