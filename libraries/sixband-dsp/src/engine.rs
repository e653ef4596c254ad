//! Six-band equalizer engine

use crate::aggregate::{Aggregator, ProcessingStatus};
use crate::band::BandProcessor;
use crate::filter::{design_band, FilterCoefficients};
use sixband_core::{
    AudioBuffer, BandDefinition, GainVector, Result, SampleRate, BAND_COUNT, STANDARD_BANDS,
};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Equalized audio and how it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedAudio {
    /// Output samples at the input's sample rate
    pub buffer: AudioBuffer,
    /// Whether the numeric safety sweep replaced the output
    pub status: ProcessingStatus,
}

impl ProcessedAudio {
    /// True when the output was silenced because of non-finite samples
    pub fn is_degraded(&self) -> bool {
        self.status.is_degraded()
    }

    /// Drop the status and keep the buffer
    pub fn into_buffer(self) -> AudioBuffer {
        self.buffer
    }
}

/// Splits a buffer into six bands, applies per-band gain and sums them back
///
/// The engine only holds the band layout. Filters are designed for the
/// buffer's sample rate on every call and start from silence, so `apply` has
/// no side effects and the same input always gives the same output.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizerEngine {
    bands: [BandDefinition; BAND_COUNT],
}

impl EqualizerEngine {
    /// Engine over [`STANDARD_BANDS`]
    pub fn new() -> Self {
        Self {
            bands: STANDARD_BANDS,
        }
    }

    /// Engine over a custom band layout
    ///
    /// Cutoff ordering and positivity are checked here; the Nyquist bound
    /// can only be checked once a sample rate is known.
    pub fn with_bands(bands: [BandDefinition; BAND_COUNT]) -> Result<Self> {
        for band in &bands {
            band.validate()?;
        }
        Ok(Self { bands })
    }

    /// The band layout
    pub fn bands(&self) -> &[BandDefinition; BAND_COUNT] {
        &self.bands
    }

    /// Check every band against the Nyquist frequency of `sample_rate`
    pub fn validate_for(&self, sample_rate: SampleRate) -> Result<()> {
        for band in &self.bands {
            band.validate_for(sample_rate)?;
        }
        Ok(())
    }

    /// Design all six band filters for `sample_rate`
    pub fn design_filters(&self, sample_rate: SampleRate) -> Result<Vec<FilterCoefficients>> {
        self.validate_for(sample_rate)?;
        self.bands
            .iter()
            .map(|band| design_band(band, sample_rate))
            .collect()
    }

    /// Equalize a buffer
    ///
    /// Fails before touching any sample if a band does not fit below the
    /// buffer's Nyquist frequency.
    pub fn apply(&self, input: &AudioBuffer, gains: &GainVector) -> Result<ProcessedAudio> {
        let gains = *gains;
        let sample_rate = input.sample_rate;
        let filters = self.design_filters(sample_rate)?;

        debug!(
            samples = input.len(),
            sample_rate = sample_rate.as_hz(),
            gains = ?gains.as_array(),
            "Equalizing buffer"
        );

        let band_outputs = process_bands(&filters, &input.samples, &gains);
        let combined = Aggregator::combine(&band_outputs)?;

        debug!(status = ?combined.status, "Buffer equalized");

        Ok(ProcessedAudio {
            buffer: AudioBuffer::new(combined.samples, sample_rate),
            status: combined.status,
        })
    }

    /// Equalize raw mono samples at `sample_rate`
    pub fn apply_samples(
        &self,
        samples: &[f32],
        sample_rate: SampleRate,
        gains: &GainVector,
    ) -> Result<ProcessedAudio> {
        self.apply(&AudioBuffer::new(samples.to_vec(), sample_rate), gains)
    }
}

impl Default for EqualizerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(feature = "parallel"))]
fn process_bands(
    filters: &[FilterCoefficients],
    samples: &[f32],
    gains: &GainVector,
) -> Vec<Vec<f32>> {
    filters
        .iter()
        .zip(gains.iter())
        .map(|(coeffs, gain_db)| BandProcessor::new(coeffs).process(samples, gain_db))
        .collect()
}

#[cfg(feature = "parallel")]
fn process_bands(
    filters: &[FilterCoefficients],
    samples: &[f32],
    gains: &GainVector,
) -> Vec<Vec<f32>> {
    let gains = gains.as_array();
    filters
        .par_iter()
        .zip(&gains[..])
        .map(|(coeffs, &gain_db)| BandProcessor::new(coeffs).process(samples, gain_db))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{calculate_peak, generate_sine_wave};
    use sixband_core::EqError;

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EqualizerEngine>();
    }

    #[test]
    fn output_keeps_length_and_rate() {
        let engine = EqualizerEngine::new();
        let input = AudioBuffer::new(vec![0.1; 1000], SampleRate::DVD_QUALITY);
        let output = engine.apply(&input, &GainVector::uniform(3)).unwrap();
        assert_eq!(output.buffer.len(), 1000);
        assert_eq!(output.buffer.sample_rate, SampleRate::DVD_QUALITY);
        assert!(!output.is_degraded());
    }

    #[test]
    fn empty_buffer_gives_empty_output() {
        let engine = EqualizerEngine::new();
        let input = AudioBuffer::silence(0, SampleRate::CD_QUALITY);
        let output = engine.apply(&input, &GainVector::flat()).unwrap();
        assert!(output.buffer.is_empty());
        assert!(!output.is_degraded());
    }

    #[test]
    fn low_sample_rate_fails_before_processing() {
        let engine = EqualizerEngine::new();
        let input = AudioBuffer::new(vec![0.1; 64], SampleRate::new(16_000));
        assert!(matches!(
            engine.apply(&input, &GainVector::flat()),
            Err(EqError::InvalidBandDefinition { .. })
        ));
    }

    #[test]
    fn zero_sample_rate_rejected() {
        let engine = EqualizerEngine::new();
        assert_eq!(
            engine.apply_samples(&[0.0; 8], SampleRate::new(0), &GainVector::flat()),
            Err(EqError::InvalidSampleRate(0))
        );
    }

    #[test]
    fn custom_bands_are_validated() {
        let mut bands = STANDARD_BANDS;
        bands[3] = BandDefinition::bandpass(5000.0, 2000.0);
        assert!(EqualizerEngine::with_bands(bands).is_err());

        let engine = EqualizerEngine::with_bands(STANDARD_BANDS).unwrap();
        assert_eq!(engine, EqualizerEngine::default());
    }

    #[test]
    fn design_filters_per_band() {
        let filters = EqualizerEngine::new()
            .design_filters(SampleRate::CD_QUALITY)
            .unwrap();
        assert_eq!(filters.len(), BAND_COUNT);
        assert_eq!(filters[0].sections().len(), 4);
        assert_eq!(filters[5].sections().len(), 2);
    }

    #[test]
    fn apply_is_idempotent() {
        let engine = EqualizerEngine::new();
        let input = generate_sine_wave(440.0, 44_100, 0.25, 0.4);
        let gains = GainVector::new([3, -2, 5, 0, -7, 12]);

        let first = engine
            .apply_samples(&input, SampleRate::CD_QUALITY, &gains)
            .unwrap();
        let second = engine
            .apply_samples(&input, SampleRate::CD_QUALITY, &gains)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn gains_cut_the_signal() {
        let engine = EqualizerEngine::new();
        let input = generate_sine_wave(1000.0, 44_100, 0.5, 0.5);
        let flat = engine
            .apply_samples(&input, SampleRate::CD_QUALITY, &GainVector::flat())
            .unwrap();
        let cut = engine
            .apply_samples(&input, SampleRate::CD_QUALITY, &GainVector::uniform(-12))
            .unwrap();
        assert!(calculate_peak(&cut.buffer.samples) < calculate_peak(&flat.buffer.samples) * 0.3);
    }
}
