// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Settings for the tide computation.

use maree_astro::Formulae;
use maree_waves::InferenceKind;

/// Settings driving one evaluation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    formulae: Formulae,
    inference: InferenceKind,
    time_tolerance: f64,
    group_modulations: bool,
    compute_long_period_equilibrium: bool,
    num_threads: usize,
}

impl Default for Settings {
    /// The defaults fit FES-style models: Schureman order-1 angles and
    /// spline admittance, with the equilibrium long-period tide included.
    fn default() -> Self {
        Self {
            formulae: Formulae::SchuremanOrder1,
            inference: InferenceKind::Spline,
            time_tolerance: 0.0,
            group_modulations: false,
            compute_long_period_equilibrium: true,
            num_threads: 0,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for GOT-style models driven by the Doodson engine: IERS
    /// angles, linear admittance, no equilibrium long-period tide.
    pub fn perth() -> Self {
        Self {
            formulae: Formulae::Iers,
            inference: InferenceKind::Linear,
            compute_long_period_equilibrium: false,
            ..Self::default()
        }
    }

    pub fn with_astronomic_formulae(mut self, formulae: Formulae) -> Self {
        self.formulae = formulae;
        self
    }

    pub fn astronomic_formulae(&self) -> Formulae {
        self.formulae
    }

    pub fn with_inference(mut self, inference: InferenceKind) -> Self {
        self.inference = inference;
        self
    }

    pub fn inference(&self) -> InferenceKind {
        self.inference
    }

    /// Time in seconds during which astronomical angles are considered
    /// constant; zero disables the cache.
    pub fn with_time_tolerance(mut self, time_tolerance: f64) -> Self {
        self.time_tolerance = time_tolerance;
        self
    }

    pub fn time_tolerance(&self) -> f64 {
        self.time_tolerance
    }

    /// Only effective with the Doodson engine.
    pub fn with_group_modulations(mut self, group_modulations: bool) -> Self {
        self.group_modulations = group_modulations;
        self
    }

    pub fn group_modulations(&self) -> bool {
        self.group_modulations
    }

    pub fn with_compute_long_period_equilibrium(mut self, compute: bool) -> Self {
        self.compute_long_period_equilibrium = compute;
        self
    }

    pub fn compute_long_period_equilibrium(&self) -> bool {
        self.compute_long_period_equilibrium
    }

    /// Number of worker threads; zero selects the host's logical CPU
    /// count, one disables parallelism.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.astronomic_formulae(), Formulae::SchuremanOrder1);
        assert_eq!(settings.inference(), InferenceKind::Spline);
        assert!(settings.compute_long_period_equilibrium());
        assert!(!settings.group_modulations());
    }

    #[test]
    fn test_perth_defaults() {
        let settings = Settings::perth();
        assert_eq!(settings.astronomic_formulae(), Formulae::Iers);
        assert_eq!(settings.inference(), InferenceKind::Linear);
        assert!(!settings.compute_long_period_equilibrium());
    }

    #[test]
    fn test_builder_chaining() {
        let settings = Settings::new()
            .with_time_tolerance(3600.0)
            .with_num_threads(4)
            .with_inference(InferenceKind::Zero);
        assert_eq!(settings.time_tolerance(), 3600.0);
        assert_eq!(settings.num_threads(), 4);
        assert_eq!(settings.inference(), InferenceKind::Zero);
    }
}
