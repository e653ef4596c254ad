//! Per-band filtering and gain

use crate::filter::FilterCoefficients;
use sixband_core::db_to_linear;

/// Filters one buffer through one band and applies that band's gain
///
/// The filter state starts at zero for every call, so processing is a pure
/// function of the input samples, the coefficients and the gain.
#[derive(Debug, Clone, Copy)]
pub struct BandProcessor<'a> {
    coeffs: &'a FilterCoefficients,
}

impl<'a> BandProcessor<'a> {
    /// Create a processor for the given band filter
    pub fn new(coeffs: &'a FilterCoefficients) -> Self {
        Self { coeffs }
    }

    /// Band component of `input` scaled by `gain_db`
    ///
    /// The result always has the input's length and every sample lies in
    /// `[-1.0, 1.0]`: non-finite values become 0.0, everything else is
    /// clamped. The gain is not range-checked here; callers pass values from
    /// a [`sixband_core::GainVector`], which already clamps to +/-12 dB.
    pub fn process(&self, input: &[f32], gain_db: i32) -> Vec<f32> {
        let factor = f64::from(db_to_linear(gain_db));

        self.coeffs
            .filter(input)
            .into_iter()
            .map(|y| sanitize(y * factor))
            .collect()
    }
}

fn sanitize(sample: f64) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::design_band;
    use crate::test_utils::{analysis::calculate_peak, signals::generate_sine_wave};
    use sixband_core::{SampleRate, STANDARD_BANDS};

    const FS: SampleRate = SampleRate::CD_QUALITY;

    #[test]
    fn length_is_preserved() {
        let coeffs = design_band(&STANDARD_BANDS[3], FS).unwrap();
        let processor = BandProcessor::new(&coeffs);
        assert_eq!(processor.process(&[0.1; 333], 0).len(), 333);
        assert!(processor.process(&[], 6).is_empty());
    }

    #[test]
    fn gain_scales_band_output() {
        let coeffs = design_band(&STANDARD_BANDS[2], FS).unwrap();
        let processor = BandProcessor::new(&coeffs);
        let input = generate_sine_wave(1000.0, FS.as_hz(), 0.5, 0.1);

        let flat = processor.process(&input, 0);
        let boosted = processor.process(&input, 12);
        let ratio = calculate_peak(&boosted) / calculate_peak(&flat);
        assert!((ratio - 3.981).abs() < 0.01, "ratio {}", ratio);
    }

    #[test]
    fn output_is_clamped() {
        let coeffs = design_band(&STANDARD_BANDS[2], FS).unwrap();
        let processor = BandProcessor::new(&coeffs);
        let input = generate_sine_wave(1000.0, FS.as_hz(), 0.2, 1.0);

        let output = processor.process(&input, 12);
        assert!(output.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert_eq!(calculate_peak(&output), 1.0);
    }

    #[test]
    fn non_finite_input_is_zeroed() {
        let coeffs = design_band(&STANDARD_BANDS[0], FS).unwrap();
        let processor = BandProcessor::new(&coeffs);
        let mut input = vec![0.0_f32; 64];
        input[10] = f32::NAN;

        let output = processor.process(&input, 0);
        assert!(output.iter().all(|s| s.is_finite()));
        assert!(output[11..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn sanitize_rules() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize(1.7), 1.0);
        assert_eq!(sanitize(-3.0), -1.0);
        assert_eq!(sanitize(0.25), 0.25);
    }
}
