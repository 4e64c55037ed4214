// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! A tidal model: per-constituent rasters behind one of two access modes,
//! and the land-aware interpolation of the four cells around a query.

use std::sync::Mutex;

use num::complex::Complex64;

use maree_math::interpolate::bilinear;

use crate::accelerator::{Accelerator, CellCorners};
use crate::cache::LruCache;
use crate::{GridError, GridSource, GridSpec, Quality, TideType, MIN_BUFFER_MIB, UNDEFINED};

/// How cell values are produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessMode {
    /// Full rasters resident in memory.
    Memory,
    /// Reads through a bounded LRU cache over the sources.
    Direct,
}

enum Storage {
    Memory(Vec<Box<[Option<Complex64>]>>),
    Direct {
        sources: Vec<Box<dyn GridSource>>,
        cache: Mutex<LruCache>,
    },
}

/// A loaded tidal model keyed by constituent identifiers of type `Id`.
pub struct TidalModel<Id> {
    tide_type: TideType,
    spec: GridSpec,
    identifiers: Vec<Id>,
    dynamic: Vec<Id>,
    storage: Storage,
}

fn entry_budget(buffer_mib: usize, n_grids: usize) -> Result<usize, GridError> {
    if buffer_mib < MIN_BUFFER_MIB {
        return Err(GridError::BufferTooSmall(buffer_mib));
    }
    let entries = (buffer_mib << 20) / (size_of::<Complex64>() * n_grids);
    Ok(entries / 8 * 8)
}

impl<Id: Copy + Eq> TidalModel<Id> {
    /// Builds an in-memory model from full rasters. Every raster must
    /// carry the same [`GridSpec`] and `spec.len()` cells.
    pub fn in_memory(
        tide_type: TideType,
        grids: Vec<(Id, GridSpec, Vec<Option<Complex64>>)>,
    ) -> Result<Self, GridError> {
        let Some((_, spec, _)) = grids.first() else {
            return Err(GridError::Empty);
        };
        let spec = *spec;

        let mut identifiers = Vec::with_capacity(grids.len());
        let mut rasters = Vec::with_capacity(grids.len());
        for (ident, grid_spec, values) in grids {
            if grid_spec != spec || values.len() != spec.len() {
                return Err(GridError::SchemaMismatch);
            }
            identifiers.push(ident);
            rasters.push(values.into_boxed_slice());
        }

        Ok(Self {
            tide_type,
            spec,
            identifiers,
            dynamic: Vec::new(),
            storage: Storage::Memory(rasters),
        })
    }

    /// Builds an in-memory model by reading every cell of every source.
    pub fn in_memory_from_sources(
        tide_type: TideType,
        sources: Vec<(Id, Box<dyn GridSource>)>,
    ) -> Result<Self, GridError> {
        let mut grids = Vec::with_capacity(sources.len());
        for (ident, source) in sources {
            let spec = source.spec();
            let mut values = Vec::with_capacity(spec.len());
            // Cell order must match `GridSpec::cell_index`.
            if spec.transpose {
                for i_lon in 0..spec.n_lon {
                    for i_lat in 0..spec.n_lat {
                        values.push(source.read_cell(i_lat, i_lon)?);
                    }
                }
            } else {
                for i_lat in 0..spec.n_lat {
                    for i_lon in 0..spec.n_lon {
                        values.push(source.read_cell(i_lat, i_lon)?);
                    }
                }
            }
            grids.push((ident, spec, values));
        }
        Self::in_memory(tide_type, grids)
    }

    /// Builds a direct-access model reading through an LRU cache bounded
    /// by `buffer_mib` mebibytes.
    pub fn direct(
        tide_type: TideType,
        sources: Vec<(Id, Box<dyn GridSource>)>,
        buffer_mib: usize,
    ) -> Result<Self, GridError> {
        let Some((_, first)) = sources.first() else {
            return Err(GridError::Empty);
        };
        let spec = first.spec();
        if sources.iter().any(|(_, source)| source.spec() != spec) {
            return Err(GridError::SchemaMismatch);
        }

        let max_entries = entry_budget(buffer_mib, sources.len())?;
        let (identifiers, sources): (Vec<Id>, Vec<Box<dyn GridSource>>) =
            sources.into_iter().unzip();

        Ok(Self {
            tide_type,
            spec,
            identifiers,
            dynamic: Vec::new(),
            storage: Storage::Direct {
                sources,
                cache: Mutex::new(LruCache::new(max_entries)),
            },
        })
    }

    /// Resizes the cache budget; only meaningful in direct mode.
    pub fn set_buffer_size(&self, buffer_mib: usize) -> Result<(), GridError> {
        let Storage::Direct { cache, .. } = &self.storage else {
            return Err(GridError::WrongAccessMode);
        };
        let max_entries = entry_budget(buffer_mib, self.identifiers.len())?;
        cache.lock().unwrap().set_max_entries(max_entries);
        Ok(())
    }

    pub fn tide_type(&self) -> TideType {
        self.tide_type
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn access_mode(&self) -> AccessMode {
        match self.storage {
            Storage::Memory(_) => AccessMode::Memory,
            Storage::Direct { .. } => AccessMode::Direct,
        }
    }

    /// The constituents handled by the model, in load order.
    pub fn identifiers(&self) -> &[Id] {
        &self.identifiers
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Declares constituents whose grid values are dynamic (excluded from
    /// the equilibrium long-period sum and from admittance).
    pub fn set_dynamic(&mut self, dynamic: Vec<Id>) {
        self.dynamic = dynamic;
    }

    pub fn dynamic(&self) -> &[Id] {
        &self.dynamic
    }

    /// Reads one corner cell for every wave into `out[wave][corner]`.
    fn read_corner(
        &self,
        i_lat: usize,
        i_lon: usize,
        corner: usize,
        out: &mut [[Option<Complex64>; 4]],
    ) -> Result<(), GridError> {
        let cell = self.spec.cell_index(i_lat, i_lon);
        match &self.storage {
            Storage::Memory(rasters) => {
                for (slot, raster) in out.iter_mut().zip(rasters) {
                    slot[corner] = raster[cell];
                }
            }
            Storage::Direct { sources, cache } => {
                let mut cache = cache.lock().unwrap();
                if let Some(values) = cache.get(cell) {
                    for (slot, &value) in out.iter_mut().zip(values) {
                        slot[corner] = value;
                    }
                    return Ok(());
                }
                // Miss: read the cell from every source, then publish the
                // complete entry. A failed read leaves the cache untouched.
                let mut values = Vec::with_capacity(sources.len());
                for source in sources {
                    values.push(source.read_cell(i_lat, i_lon)?);
                }
                for (slot, &value) in out.iter_mut().zip(&values) {
                    slot[corner] = value;
                }
                cache.insert(cell, values.into_boxed_slice());
            }
        }
        Ok(())
    }

    /// Locates the cell around `(lat, lon)` and reads its four corners
    /// for every wave, reusing the accelerator's cell when possible.
    fn nearest_corners(
        &self,
        lat: f64,
        lon: f64,
        acc: &mut Accelerator,
    ) -> Result<bool, GridError> {
        if acc
            .corners
            .as_ref()
            .is_some_and(|corners| corners.contains(lat, lon))
        {
            return Ok(true);
        }

        let spec = &self.spec;
        let normalized = GridSpec::normalize_longitude(spec.lon_min, lon);
        if !spec.contains(lat, normalized) {
            return Ok(false);
        }

        let mut i_lat1 = ((lat - spec.lat_min) / spec.lat_step).trunc() as usize;
        let mut i_lon1 = ((normalized - spec.lon_min) / spec.lon_step).trunc() as usize;

        let i_lat2 = if lat >= spec.lat_max() {
            i_lat1 -= 1;
            i_lat1 + 1
        } else {
            i_lat1 + 1
        };
        let i_lon2 = if normalized >= spec.lon_max() {
            i_lon1 -= 1;
            i_lon1 + 1
        } else {
            i_lon1 + 1
        };

        let south_lat = spec.lat_value(i_lat1);
        let north_lat = spec.lat_value(i_lat2);
        let mut west_lon = spec.lon_value(i_lon1);
        let mut east_lon = spec.lon_value(i_lon2);

        // Express the corner longitudes in the frame of the query so that
        // wrap-around cells interpolate over a contiguous span.
        if west_lon != lon {
            let gap = west_lon - east_lon;
            east_lon = GridSpec::normalize_longitude(lon, east_lon);
            west_lon = east_lon + gap;
        }

        let i_lon1 = i_lon1 % spec.n_lon;
        let i_lon2 = i_lon2 % spec.n_lon;

        let mut values = vec![[None; 4]; self.identifiers.len()];
        self.read_corner(i_lat1, i_lon1, 0, &mut values)?;
        self.read_corner(i_lat1, i_lon2, 1, &mut values)?;
        self.read_corner(i_lat2, i_lon1, 2, &mut values)?;
        self.read_corner(i_lat2, i_lon2, 3, &mut values)?;

        acc.corners = Some(CellCorners {
            west_lon,
            east_lon,
            south_lat,
            north_lat,
            values,
        });
        Ok(true)
    }

    /// Interpolates every wave at `(lat, lon)`.
    ///
    /// `sink` receives each constituent with its interpolated value, or
    /// `None` when all four corners are masked. The returned quality is
    /// the minimum corner count over the waves that had data, or
    /// [`UNDEFINED`] when none had.
    pub fn interpolate(
        &self,
        lat: f64,
        lon: f64,
        mut sink: impl FnMut(Id, Option<Complex64>),
        acc: &mut Accelerator,
    ) -> Result<Quality, GridError> {
        if !self.nearest_corners(lat, lon, acc)? {
            for &ident in &self.identifiers {
                sink(ident, None);
            }
            return Ok(UNDEFINED);
        }

        let corners = acc.corners.as_ref().unwrap();
        let x = (corners.west_lon, corners.east_lon);
        let y = (corners.south_lat, corners.north_lat);

        let mut quality: Quality = 4;
        let mut defined = false;

        for (&ident, cell) in self.identifiers.iter().zip(&corners.values) {
            let real = cell.map(|value| value.map(|z| z.re));
            let imaginary = cell.map(|value| value.map(|z| z.im));

            let (re, count) = bilinear(x, y, real, (lon, lat));
            let (im, _) = bilinear(x, y, imaginary, (lon, lat));

            match (re, im) {
                (Some(re), Some(im)) => {
                    sink(ident, Some(Complex64::new(re, im)));
                    defined = true;
                    quality = quality.min(count);
                }
                _ => sink(ident, None),
            }
        }

        Ok(if defined { quality } else { UNDEFINED })
    }
}
