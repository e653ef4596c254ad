//! Frequency band definitions
//!
//! The equalizer splits the signal into six fixed bands: five band-pass
//! regions covering 20 Hz - 10 kHz and one high-pass region above 10 kHz.

use crate::error::{EqError, Result};
use crate::types::SampleRate;

/// Number of bands the equalizer processes
pub const BAND_COUNT: usize = 6;

/// Filter shape of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandKind {
    /// Passes frequencies between the low and high cutoffs
    Bandpass,
    /// Passes frequencies above the cutoff
    Highpass,
}

impl BandKind {
    /// Lowercase name, as shown in listings
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bandpass => "bandpass",
            Self::Highpass => "highpass",
        }
    }
}

/// One frequency band of the equalizer
///
/// Immutable once built. The sample-rate independent invariants are checked
/// by [`BandDefinition::validate`]; the Nyquist bound needs a sample rate and
/// is checked by [`BandDefinition::validate_for`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandDefinition {
    low_cutoff_hz: f64,
    high_cutoff_hz: Option<f64>,
    kind: BandKind,
}

/// The fixed band layout, in gain-vector order
pub const STANDARD_BANDS: [BandDefinition; BAND_COUNT] = [
    BandDefinition::bandpass(20.0, 100.0),
    BandDefinition::bandpass(100.0, 500.0),
    BandDefinition::bandpass(500.0, 2000.0),
    BandDefinition::bandpass(2000.0, 5000.0),
    BandDefinition::bandpass(5000.0, 10000.0),
    BandDefinition::highpass(10000.0),
];

impl BandDefinition {
    /// Band-pass band between `low_hz` and `high_hz`
    pub const fn bandpass(low_hz: f64, high_hz: f64) -> Self {
        Self {
            low_cutoff_hz: low_hz,
            high_cutoff_hz: Some(high_hz),
            kind: BandKind::Bandpass,
        }
    }

    /// High-pass band above `cutoff_hz`
    pub const fn highpass(cutoff_hz: f64) -> Self {
        Self {
            low_cutoff_hz: cutoff_hz,
            high_cutoff_hz: None,
            kind: BandKind::Highpass,
        }
    }

    /// Lower cutoff (the only cutoff for a high-pass band)
    pub fn low_cutoff_hz(&self) -> f64 {
        self.low_cutoff_hz
    }

    /// Upper cutoff, `None` for a high-pass band
    pub fn high_cutoff_hz(&self) -> Option<f64> {
        self.high_cutoff_hz
    }

    /// Filter shape
    pub fn kind(&self) -> BandKind {
        self.kind
    }

    /// Label used in logs and listings, e.g. "100-500 Hz" or ">10000 Hz"
    pub fn label(&self) -> String {
        match self.high_cutoff_hz {
            Some(high) => format!("{}-{} Hz", self.low_cutoff_hz, high),
            None => format!(">{} Hz", self.low_cutoff_hz),
        }
    }

    /// Frequency at which the band's passband response is representative
    ///
    /// Geometric centre for band-pass bands; for a high-pass band, the
    /// geometric mean of the cutoff and the Nyquist frequency.
    pub fn reference_hz(&self, sample_rate: SampleRate) -> f64 {
        match self.high_cutoff_hz {
            Some(high) => (self.low_cutoff_hz * high).sqrt(),
            None => (self.low_cutoff_hz * sample_rate.nyquist_hz()).sqrt(),
        }
    }

    /// Check cutoffs are finite, positive and ordered
    pub fn validate(&self) -> Result<()> {
        check_cutoff(self, self.low_cutoff_hz)?;

        match (self.kind, self.high_cutoff_hz) {
            (BandKind::Bandpass, Some(high)) => {
                check_cutoff(self, high)?;
                if self.low_cutoff_hz >= high {
                    return Err(EqError::invalid_band(
                        self.label(),
                        format!(
                            "low cutoff {} Hz must be below high cutoff {} Hz",
                            self.low_cutoff_hz, high
                        ),
                    ));
                }
                Ok(())
            }
            (BandKind::Highpass, None) => Ok(()),
            (BandKind::Bandpass, None) => Err(EqError::invalid_band(
                self.label(),
                "band-pass band needs a high cutoff",
            )),
            (BandKind::Highpass, Some(_)) => Err(EqError::invalid_band(
                self.label(),
                "high-pass band takes a single cutoff",
            )),
        }
    }

    /// Full validation against a sample rate: every cutoff below Nyquist
    pub fn validate_for(&self, sample_rate: SampleRate) -> Result<()> {
        if sample_rate.as_hz() == 0 {
            return Err(EqError::InvalidSampleRate(0));
        }
        self.validate()?;

        let nyquist = sample_rate.nyquist_hz();
        let top = self.high_cutoff_hz.unwrap_or(self.low_cutoff_hz);
        if top >= nyquist {
            return Err(EqError::invalid_band(
                self.label(),
                format!(
                    "cutoff {} Hz is not below Nyquist {} Hz at {}",
                    top, nyquist, sample_rate
                ),
            ));
        }
        Ok(())
    }
}

fn check_cutoff(band: &BandDefinition, hz: f64) -> Result<()> {
    if !hz.is_finite() || hz <= 0.0 {
        return Err(EqError::invalid_band(
            band.label(),
            format!("cutoff {} Hz must be positive and finite", hz),
        ));
    }
    Ok(())
}
