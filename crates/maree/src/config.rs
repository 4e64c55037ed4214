// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Key-value configuration mapping constituents to grid files.
//!
//! The recognized keys are exactly
//! `{TIDE, RADIAL}_{constituent}_{FILE, LATITUDE, LONGITUDE, AMPLITUDE,
//! PHASE}`; everything else is reported as a fatal error with the complete
//! list of offenders. Values support `${NAME}` environment substitution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;

use maree_grid::TideType;
use maree_waves::darwin::Constituent;
use maree_waves::ConstituentId;

use crate::Error;

/// Environment variable giving the direct-mode cache budget in MiB.
pub const BUFFER_SIZE_ENV: &str = "FES_BUFFER_SIZE";

/// Default cache budget in MiB.
const DEFAULT_BUFFER_MIB: usize = 64;

const KEY_SUFFIXES: [&str; 5] = ["FILE", "LATITUDE", "LONGITUDE", "AMPLITUDE", "PHASE"];

/// Default variable names inside a grid file.
const DEFAULT_LATITUDE: &str = "latitude";
const DEFAULT_LONGITUDE: &str = "longitude";
const DEFAULT_AMPLITUDE: &str = "amplitude";
const DEFAULT_PHASE: &str = "phase";

/// One constituent's grid description from the configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WaveSource {
    pub constituent: Constituent,
    pub file: PathBuf,
    pub latitude: String,
    pub longitude: String,
    pub amplitude: String,
    pub phase: String,
}

/// A parsed configuration file.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Keys uppercased; values with environment substitution applied.
    entries: BTreeMap<String, String>,
}

fn substitute_environment(value: &str) -> Result<String, Error> {
    let pattern = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    let mut result = String::with_capacity(value.len());
    let mut last = 0;
    for capture in pattern.captures_iter(value) {
        let whole = capture.get(0).unwrap();
        let name = &capture[1];
        result.push_str(&value[last..whole.start()]);
        let expansion = std::env::var(name).map_err(|_| {
            Error::InvalidConfig(format!("undefined environment variable: {name}"))
        })?;
        result.push_str(&expansion);
        last = whole.end();
    }
    result.push_str(&value[last..]);
    Ok(result)
}

impl Config {
    /// Reads a configuration file from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            Error::InvalidConfig(format!("{}: {err}", path.as_ref().display()))
        })?;
        Self::parse(&content)
    }

    /// Parses configuration text: `KEY = value` lines, `#`/`;` comments.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut entries = BTreeMap::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::InvalidConfig(format!(
                    "line {}: expected KEY = value, got {line:?}",
                    number + 1
                )));
            };
            entries.insert(
                key.trim().to_ascii_uppercase(),
                substitute_environment(value.trim())?,
            );
        }
        Ok(Self { entries })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_ascii_uppercase()).map(String::as_str)
    }

    /// Extracts the grid descriptions for one tide type, rejecting any
    /// key the program does not handle.
    pub fn wave_sources(&self, tide_type: TideType) -> Result<Vec<WaveSource>, Error> {
        self.check_handled_keys()?;

        let prefix = prefix(tide_type);
        let mut sources = Vec::new();
        for &constituent in Constituent::all() {
            let name = constituent.name().to_ascii_uppercase();
            let Some(file) = self.get(&format!("{prefix}_{name}_FILE")) else {
                continue;
            };
            let variable = |suffix: &str, default: &str| {
                self.get(&format!("{prefix}_{name}_{suffix}"))
                    .unwrap_or(default)
                    .to_owned()
            };
            sources.push(WaveSource {
                constituent,
                file: PathBuf::from(file),
                latitude: variable("LATITUDE", DEFAULT_LATITUDE),
                longitude: variable("LONGITUDE", DEFAULT_LONGITUDE),
                amplitude: variable("AMPLITUDE", DEFAULT_AMPLITUDE),
                phase: variable("PHASE", DEFAULT_PHASE),
            });
        }

        if sources.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "the configuration file defines no {} wave",
                match tide_type {
                    TideType::Tide => "tide",
                    TideType::Radial => "radial",
                }
            )));
        }
        Ok(sources)
    }

    fn check_handled_keys(&self) -> Result<(), Error> {
        let mut unhandled: Vec<&str> = Vec::new();
        'entries: for key in self.entries.keys() {
            for tide_prefix in ["TIDE", "RADIAL"] {
                for &constituent in Constituent::all() {
                    let name = constituent.name().to_ascii_uppercase();
                    for suffix in KEY_SUFFIXES {
                        if key == &format!("{tide_prefix}_{name}_{suffix}") {
                            continue 'entries;
                        }
                    }
                }
            }
            unhandled.push(key);
        }

        if unhandled.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidConfig(format!(
                "configuration file contains unhandled keys: {}",
                unhandled.join(", ")
            )))
        }
    }
}

fn prefix(tide_type: TideType) -> &'static str {
    match tide_type {
        TideType::Tide => "TIDE",
        TideType::Radial => "RADIAL",
    }
}

/// Reads the cache budget (MiB) from [`BUFFER_SIZE_ENV`], defaulting to
/// 64 when the variable is unset.
pub fn buffer_size_from_env() -> Result<usize, Error> {
    match std::env::var(BUFFER_SIZE_ENV) {
        Err(_) => Ok(DEFAULT_BUFFER_MIB),
        Ok(value) => value.trim().parse::<usize>().ok().filter(|&v| v > 0).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "{BUFFER_SIZE_ENV} defines an invalid memory size: {value}"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let config = Config::parse(
            "# ocean tide\nTIDE_M2_FILE = /data/m2.nc\nTIDE_M2_AMPLITUDE = amp\n",
        )
        .unwrap();
        let sources = config.wave_sources(TideType::Tide).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].constituent, Constituent::M2);
        assert_eq!(sources[0].file, PathBuf::from("/data/m2.nc"));
        assert_eq!(sources[0].amplitude, "amp");
        // Unspecified variable names fall back to their defaults.
        assert_eq!(sources[0].phase, "phase");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let config = Config::parse("tide_m2_file = m2.nc\n").unwrap();
        let sources = config.wave_sources(TideType::Tide).unwrap();
        assert_eq!(sources[0].constituent, Constituent::M2);
    }

    #[test]
    fn test_unknown_keys_are_all_reported() {
        let config = Config::parse(
            "TIDE_M2_FILE = m2.nc\nTIDE_M2_COLOR = blue\nRADIAL_XX_FILE = x.nc\n",
        )
        .unwrap();
        let error = config.wave_sources(TideType::Tide).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("TIDE_M2_COLOR"), "{message}");
        assert!(message.contains("RADIAL_XX_FILE"), "{message}");
    }

    #[test]
    fn test_no_wave_defined() {
        let config = Config::parse("RADIAL_M2_FILE = m2.nc\n").unwrap();
        assert!(config.wave_sources(TideType::Tide).is_err());
        assert!(config.wave_sources(TideType::Radial).is_ok());
    }

    #[test]
    fn test_environment_substitution() {
        // Safety: test-local variable, no concurrent reader cares.
        unsafe { std::env::set_var("MAREE_TEST_ROOT", "/srv/tides") };
        let config = Config::parse("TIDE_K1_FILE = ${MAREE_TEST_ROOT}/k1.nc\n").unwrap();
        let sources = config.wave_sources(TideType::Tide).unwrap();
        assert_eq!(sources[0].file, PathBuf::from("/srv/tides/k1.nc"));
    }

    #[test]
    fn test_undefined_environment_variable() {
        let result = Config::parse("TIDE_K1_FILE = ${MAREE_TEST_UNSET_VARIABLE}/k1.nc\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_line() {
        assert!(Config::parse("TIDE_M2_FILE\n").is_err());
    }
}
