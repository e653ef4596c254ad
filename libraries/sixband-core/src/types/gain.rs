//! Per-band gain settings
//!
//! - Integer decibels, one value per band
//! - Range -12 to +12 dB, out-of-range writes are clamped
//! - Preset support

use crate::error::{EqError, Result};
use crate::types::BAND_COUNT;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lowest accepted gain in dB
pub const MIN_GAIN_DB: i32 = -12;

/// Highest accepted gain in dB
pub const MAX_GAIN_DB: i32 = 12;

/// Gain in dB for each band, in band order
///
/// A plain `Copy` value: handing one to the engine is an atomic snapshot.
/// Every write clamps to [`MIN_GAIN_DB`]..=[`MAX_GAIN_DB`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; BAND_COUNT]", into = "[i32; BAND_COUNT]")]
pub struct GainVector([i32; BAND_COUNT]);

impl GainVector {
    /// All bands at 0 dB
    pub const fn flat() -> Self {
        Self([0; BAND_COUNT])
    }

    /// Build from six values, clamping each
    pub fn new(gains_db: [i32; BAND_COUNT]) -> Self {
        Self(gains_db.map(clamp_db))
    }

    /// Build from a slice of up to six values; missing bands stay at 0 dB
    pub fn from_slice(gains_db: &[i32]) -> Result<Self> {
        if gains_db.len() > BAND_COUNT {
            return Err(EqError::InvalidBandIndex(gains_db.len() - 1));
        }
        let mut gains = Self::flat();
        for (index, &db) in gains_db.iter().enumerate() {
            gains.0[index] = clamp_db(db);
        }
        Ok(gains)
    }

    /// Every band at the same gain
    pub fn uniform(gain_db: i32) -> Self {
        Self([clamp_db(gain_db); BAND_COUNT])
    }

    /// Gain of one band in dB
    pub fn get(&self, band: usize) -> Option<i32> {
        self.0.get(band).copied()
    }

    /// Set one band's gain, returning the value actually stored
    pub fn set(&mut self, band: usize, gain_db: i32) -> Result<i32> {
        let slot = self
            .0
            .get_mut(band)
            .ok_or(EqError::InvalidBandIndex(band))?;
        *slot = clamp_db(gain_db);
        Ok(*slot)
    }

    /// Linear scale factor of one band
    pub fn linear(&self, band: usize) -> Option<f32> {
        self.get(band).map(db_to_linear)
    }

    /// All gains as an array
    pub fn as_array(&self) -> [i32; BAND_COUNT] {
        self.0
    }

    /// Iterate over the gains in band order
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    /// True when every band is at 0 dB
    pub fn is_flat(&self) -> bool {
        self.0.iter().all(|&db| db == 0)
    }
}

impl From<[i32; BAND_COUNT]> for GainVector {
    fn from(gains_db: [i32; BAND_COUNT]) -> Self {
        Self::new(gains_db)
    }
}

impl From<GainVector> for [i32; BAND_COUNT] {
    fn from(gains: GainVector) -> Self {
        gains.0
    }
}

/// Clamp a gain to the accepted range
pub fn clamp_db(gain_db: i32) -> i32 {
    gain_db.clamp(MIN_GAIN_DB, MAX_GAIN_DB)
}

/// Decibel to linear amplitude: `10^(dB/20)`
pub fn db_to_linear(gain_db: i32) -> f32 {
    10.0_f32.powf(gain_db as f32 / 20.0)
}

/// Named gain shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GainPreset {
    /// Flat - All bands at 0 dB
    #[default]
    Flat,

    /// Bass Boost - Enhanced low frequencies
    BassBoost,

    /// Treble Boost - Enhanced high frequencies
    TrebleBoost,

    /// V-Shape - Boosted lows and highs, reduced mids
    VShape,

    /// Vocal - Enhanced mid frequencies for voice
    Vocal,

    /// Loudness - Low-volume compensation, lows and highs lifted
    Loudness,
}

impl GainPreset {
    /// Every preset, in listing order
    pub const ALL: [Self; 6] = [
        Self::Flat,
        Self::BassBoost,
        Self::TrebleBoost,
        Self::VShape,
        Self::Vocal,
        Self::Loudness,
    ];

    /// Gain values for this preset
    pub fn gains(&self) -> GainVector {
        GainVector::new(match self {
            Self::Flat => [0; BAND_COUNT],
            Self::BassBoost => [6, 4, 0, 0, 0, 0],
            Self::TrebleBoost => [0, 0, 0, 2, 4, 6],
            Self::VShape => [5, 2, -2, -1, 3, 5],
            Self::Vocal => [-2, 0, 4, 3, 0, -2],
            Self::Loudness => [8, 3, 0, 0, 2, 4],
        })
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::BassBoost => "Bass Boost",
            Self::TrebleBoost => "Treble Boost",
            Self::VShape => "V-Shape",
            Self::Vocal => "Vocal",
            Self::Loudness => "Loudness",
        }
    }

    /// Kebab-case identifier accepted by [`GainPreset::from_str`]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::BassBoost => "bass-boost",
            Self::TrebleBoost => "treble-boost",
            Self::VShape => "v-shape",
            Self::Vocal => "vocal",
            Self::Loudness => "loudness",
        }
    }
}

impl FromStr for GainPreset {
    type Err = EqError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(&['_', ' '][..], "-");
        Self::ALL
            .into_iter()
            .find(|preset| preset.id() == wanted)
            .ok_or_else(|| EqError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_flat() {
        let gains = GainVector::default();
        assert!(gains.is_flat());
        assert_eq!(gains, GainVector::flat());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let gains = GainVector::new([-40, -13, -12, 12, 13, 99]);
        assert_eq!(gains.as_array(), [-12, -12, -12, 12, 12, 12]);
    }

    #[test]
    fn set_returns_stored_value() {
        let mut gains = GainVector::flat();
        assert_eq!(gains.set(3, 7).unwrap(), 7);
        assert_eq!(gains.set(3, -30).unwrap(), -12);
        assert_eq!(gains.get(3), Some(-12));
    }

    #[test]
    fn set_rejects_unknown_band() {
        let mut gains = GainVector::flat();
        assert_eq!(gains.set(6, 3), Err(EqError::InvalidBandIndex(6)));
        assert_eq!(gains.get(6), None);
    }

    #[test]
    fn from_slice_fills_missing_with_zero() {
        let gains = GainVector::from_slice(&[3, -3]).unwrap();
        assert_eq!(gains.as_array(), [3, -3, 0, 0, 0, 0]);
        assert!(GainVector::from_slice(&[0; 7]).is_err());
    }

    #[test]
    fn zero_db_is_unity() {
        assert_eq!(db_to_linear(0), 1.0);
        assert_eq!(GainVector::flat().linear(0), Some(1.0));
    }

    #[test]
    fn twelve_db_is_about_four_times() {
        assert!((db_to_linear(12) - 3.981).abs() < 1e-3);
        assert!((db_to_linear(-12) - 0.2512).abs() < 1e-3);
    }

    #[test]
    fn serde_clamps_on_read() {
        let gains: GainVector = serde_json::from_str("[0, 1, 2, 30, -30, 0]").unwrap();
        assert_eq!(gains.as_array(), [0, 1, 2, 12, -12, 0]);
        assert_eq!(serde_json::to_string(&gains).unwrap(), "[0,1,2,12,-12,0]");
    }

    #[test]
    fn preset_names_parse() {
        for preset in GainPreset::ALL {
            assert_eq!(preset.id().parse::<GainPreset>().unwrap(), preset);
        }
        assert_eq!("Bass_Boost".parse::<GainPreset>().unwrap(), GainPreset::BassBoost);
        assert!(matches!(
            "disco".parse::<GainPreset>(),
            Err(EqError::UnknownPreset(_))
        ));
    }

    #[test]
    fn preset_gains_in_range() {
        for preset in GainPreset::ALL {
            assert!(preset
                .gains()
                .iter()
                .all(|db| (MIN_GAIN_DB..=MAX_GAIN_DB).contains(&db)));
        }
        assert!(GainPreset::Flat.gains().is_flat());
    }
}
