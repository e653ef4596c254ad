//! Equalizer configuration
//!
//! Sources, later ones winning:
//! 1. `sixband.toml` in the working directory, or the file given with `--config`
//! 2. Environment variables prefixed with `SIXBAND_` (`SIXBAND_PRESET`,
//!    `SIXBAND_GAINS_BAND0` .. `SIXBAND_GAINS_BAND5`)
//! 3. Command-line overrides

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sixband_core::{clamp_db, EqError, GainPreset, GainVector, BAND_COUNT};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Config file picked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "sixband.toml";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "SIXBAND";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EqConfig {
    /// Preset the gains start from (kebab-case name)
    #[serde(default)]
    pub preset: Option<String>,

    /// Explicit per-band gains, applied on top of the preset
    #[serde(default)]
    pub gains: GainSettings,
}

/// Optional gain per band in dB
///
/// Field names carry no underscore so they map cleanly onto
/// `SIXBAND_GAINS_BANDn` environment variables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GainSettings {
    #[serde(default)]
    pub band0: Option<i32>,
    #[serde(default)]
    pub band1: Option<i32>,
    #[serde(default)]
    pub band2: Option<i32>,
    #[serde(default)]
    pub band3: Option<i32>,
    #[serde(default)]
    pub band4: Option<i32>,
    #[serde(default)]
    pub band5: Option<i32>,
}

impl GainSettings {
    pub fn as_array(&self) -> [Option<i32>; BAND_COUNT] {
        [
            self.band0, self.band1, self.band2, self.band3, self.band4, self.band5,
        ]
    }

    /// Set one band's gain
    pub fn set(&mut self, band: usize, gain_db: i32) -> Result<()> {
        let slot = match band {
            0 => &mut self.band0,
            1 => &mut self.band1,
            2 => &mut self.band2,
            3 => &mut self.band3,
            4 => &mut self.band4,
            5 => &mut self.band5,
            _ => return Err(EqError::InvalidBandIndex(band).into()),
        };
        *slot = Some(gain_db);
        Ok(())
    }
}

impl EqConfig {
    /// Load configuration from file and process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(
            path,
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("_")
                .try_parsing(true),
        )
    }

    /// Load configuration from file and the given environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            // An explicitly named file must exist
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Apply command-line overrides
    pub fn apply_overrides(
        &mut self,
        preset: Option<String>,
        gains: &[(usize, i32)],
    ) -> Result<()> {
        if let Some(preset) = preset {
            self.preset = Some(preset);
        }
        for &(band, gain_db) in gains {
            self.gains.set(band, gain_db)?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.preset_value()?;
        Ok(())
    }

    /// Resolve the final gains: preset first, then explicit bands
    ///
    /// Out-of-range gains are clamped to +/-12 dB with a warning.
    pub fn gain_vector(&self) -> Result<GainVector> {
        let mut gains = self
            .preset_value()?
            .map_or_else(GainVector::flat, |preset| preset.gains());

        for (band, gain_db) in self.gains.as_array().into_iter().enumerate() {
            let Some(gain_db) = gain_db else {
                continue;
            };
            let stored = gains.set(band, gain_db)?;
            if stored != gain_db {
                warn!(
                    band,
                    requested = gain_db,
                    applied = stored,
                    "Gain out of range, clamped"
                );
            }
        }

        Ok(gains)
    }

    fn preset_value(&self) -> Result<Option<GainPreset>> {
        self.preset
            .as_deref()
            .map(|name| name.parse::<GainPreset>().map_err(CliError::from))
            .transpose()
    }
}

/// Parse a `BAND=DB` gain override such as `2=+6` or `0=-3`
pub fn parse_gain_spec(spec: &str) -> Result<(usize, i32)> {
    let invalid = || CliError::InvalidGainSpec(spec.to_string());

    let (band, gain) = spec.split_once('=').ok_or_else(invalid)?;
    let band: usize = band.trim().parse().map_err(|_| invalid())?;
    let gain = gain.trim();
    let gain: i32 = gain
        .strip_prefix('+')
        .unwrap_or(gain)
        .parse()
        .map_err(|_| invalid())?;

    if band >= BAND_COUNT {
        return Err(EqError::InvalidBandIndex(band).into());
    }
    if clamp_db(gain) != gain {
        warn!(band, gain, "Gain out of range, will be clamped");
    }
    Ok((band, gain))
}
