/// Core error types for Sixband
use thiserror::Error;

/// Result type alias using `EqError`
pub type Result<T> = std::result::Result<T, EqError>;

/// Core error type for Sixband
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EqError {
    /// A band's cutoffs are unordered, non-positive, or beyond Nyquist
    #[error("Invalid band definition ({band}): {reason}")]
    InvalidBandDefinition {
        /// Human readable band label, e.g. "500-2000 Hz"
        band: String,
        /// What is wrong with it
        reason: String,
    },

    /// Sample rate of zero
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// Gain written to a band that does not exist
    #[error("Invalid band index: {0} (must be 0-5)")]
    InvalidBandIndex(usize),

    /// Band signals handed to the aggregator differ in length
    #[error("Band length mismatch: expected {expected} samples, found {found}")]
    LengthMismatch {
        /// Length of the first band signal
        expected: usize,
        /// Length of the offending band signal
        found: usize,
    },

    /// Preset name lookup failed
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl EqError {
    /// Create an invalid band definition error
    pub fn invalid_band(band: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBandDefinition {
            band: band.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_band_message_names_the_band() {
        let err = EqError::invalid_band("20-100 Hz", "cutoff 100 Hz is not below Nyquist 50 Hz");
        assert_eq!(
            err.to_string(),
            "Invalid band definition (20-100 Hz): cutoff 100 Hz is not below Nyquist 50 Hz"
        );
    }

    #[test]
    fn length_mismatch_message() {
        let err = EqError::LengthMismatch {
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "Band length mismatch: expected 4 samples, found 3");
    }
}
