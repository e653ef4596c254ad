//! Butterworth band-pass and high-pass design.
//!
//! The design follows the classic analog-prototype route:
//!
//! 1. Normalize the cutoffs by Nyquist and pre-warp them so the digital
//!    filter hits the requested -3 dB points exactly.
//! 2. Place the N analog prototype poles on the left half of the unit
//!    circle at `exp(j * pi * (2k + N + 1) / (2N))`.
//! 3. Transform the low-pass prototype into a band-pass (2N poles) or a
//!    high-pass (N poles).
//! 4. Map poles and zeros to the z-plane with the bilinear transform.
//!
//! The result is returned both as polynomials and as the equivalent cascade
//! of second-order sections, see [`FilterCoefficients`].

use super::coeffs::FilterCoefficients;
use num_complex::Complex64;
use sixband_core::{BandDefinition, BandKind, EqError, Result, SampleRate};
use std::f64::consts::PI;

/// Order of every equalizer band filter
pub const FILTER_ORDER: usize = 4;

/// Highest prototype order accepted by the designers
pub const MAX_FILTER_ORDER: usize = 8;

/// Design sample rate of the normalized bilinear transform (Nyquist = 1)
const DESIGN_RATE: f64 = 2.0;

/// Poles, zeros and gain of a transfer function
#[derive(Debug, Clone)]
pub(crate) struct Zpk {
    pub zeros: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    pub gain: f64,
}

/// Design a band-pass filter passing `low_hz`..`high_hz`
///
/// # Arguments
/// * `low_hz` - Lower -3 dB point in Hz
/// * `high_hz` - Upper -3 dB point in Hz
/// * `sample_rate` - Rate the filter will run at
/// * `order` - Prototype order (the band-pass has twice as many poles)
pub fn design_bandpass(
    low_hz: f64,
    high_hz: f64,
    sample_rate: SampleRate,
    order: usize,
) -> Result<FilterCoefficients> {
    let band = BandDefinition::bandpass(low_hz, high_hz);
    band.validate_for(sample_rate)?;
    check_order(&band, order)?;

    let nyquist = sample_rate.nyquist_hz();
    let warped_low = prewarp(low_hz / nyquist);
    let warped_high = prewarp(high_hz / nyquist);

    let analog = lowpass_to_bandpass(&prototype_poles(order), warped_low, warped_high);
    Ok(FilterCoefficients::from_zpk(&bilinear(analog), order))
}

/// Design a high-pass filter passing everything above `cutoff_hz`
pub fn design_highpass(
    cutoff_hz: f64,
    sample_rate: SampleRate,
    order: usize,
) -> Result<FilterCoefficients> {
    let band = BandDefinition::highpass(cutoff_hz);
    band.validate_for(sample_rate)?;
    check_order(&band, order)?;

    let warped = prewarp(cutoff_hz / sample_rate.nyquist_hz());

    let analog = lowpass_to_highpass(&prototype_poles(order), warped);
    Ok(FilterCoefficients::from_zpk(&bilinear(analog), order))
}

/// Design the filter for one equalizer band at [`FILTER_ORDER`]
pub fn design_band(band: &BandDefinition, sample_rate: SampleRate) -> Result<FilterCoefficients> {
    match (band.kind(), band.high_cutoff_hz()) {
        (BandKind::Bandpass, Some(high)) => {
            design_bandpass(band.low_cutoff_hz(), high, sample_rate, FILTER_ORDER)
        }
        (BandKind::Highpass, None) => {
            design_highpass(band.low_cutoff_hz(), sample_rate, FILTER_ORDER)
        }
        _ => {
            // Mismatched kind/cutoff combination, let validation name the problem
            band.validate()?;
            Err(EqError::invalid_band(band.label(), "inconsistent band kind"))
        }
    }
}

fn check_order(band: &BandDefinition, order: usize) -> Result<()> {
    if order == 0 || order > MAX_FILTER_ORDER {
        return Err(EqError::invalid_band(
            band.label(),
            format!("filter order {} outside 1..={}", order, MAX_FILTER_ORDER),
        ));
    }
    Ok(())
}

/// Pre-warp a Nyquist-normalized frequency for the bilinear transform
fn prewarp(normalized: f64) -> f64 {
    2.0 * DESIGN_RATE * (PI * normalized / DESIGN_RATE).tan()
}

/// Analog Butterworth low-pass prototype poles (cutoff 1 rad/s, unity gain)
fn prototype_poles(order: usize) -> Vec<Complex64> {
    let n = order as f64;
    (0..order)
        .map(|k| {
            let angle = PI * (2.0 * k as f64 + n + 1.0) / (2.0 * n);
            Complex64::from_polar(1.0, angle)
        })
        .collect()
}

/// Low-pass prototype to band-pass between `w_low` and `w_high` (rad/s)
fn lowpass_to_bandpass(prototype: &[Complex64], w_low: f64, w_high: f64) -> Zpk {
    let bandwidth = w_high - w_low;
    let center_sq = w_low * w_high;

    let scaled: Vec<Complex64> = prototype.iter().map(|&p| p * (bandwidth / 2.0)).collect();

    // Each prototype pole splits into a pair around the centre frequency
    let mut poles = Vec::with_capacity(2 * scaled.len());
    poles.extend(scaled.iter().map(|&p| p + (p * p - center_sq).sqrt()));
    poles.extend(scaled.iter().map(|&p| p - (p * p - center_sq).sqrt()));

    Zpk {
        zeros: vec![Complex64::new(0.0, 0.0); prototype.len()],
        poles,
        gain: bandwidth.powi(prototype.len() as i32),
    }
}

/// Low-pass prototype to high-pass at `w_cutoff` (rad/s)
fn lowpass_to_highpass(prototype: &[Complex64], w_cutoff: f64) -> Zpk {
    let poles = prototype
        .iter()
        .map(|&p| Complex64::new(w_cutoff, 0.0) / p)
        .collect();

    let product: Complex64 = prototype.iter().map(|&p| -p).product();
    let gain = (Complex64::new(1.0, 0.0) / product).re;

    Zpk {
        zeros: vec![Complex64::new(0.0, 0.0); prototype.len()],
        poles,
        gain,
    }
}

/// Bilinear transform from the s-plane to the z-plane
fn bilinear(analog: Zpk) -> Zpk {
    let fs2 = 2.0 * DESIGN_RATE;
    let map = |s: &Complex64| (fs2 + *s) / (fs2 - *s);

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(map).collect();
    let poles: Vec<Complex64> = analog.poles.iter().map(map).collect();

    // Zeros at infinity land on Nyquist
    let missing = analog.poles.len().saturating_sub(analog.zeros.len());
    zeros.resize(zeros.len() + missing, Complex64::new(-1.0, 0.0));

    let num: Complex64 = analog.zeros.iter().map(|z| fs2 - *z).product();
    let den: Complex64 = analog.poles.iter().map(|p| fs2 - *p).product();

    Zpk {
        zeros,
        poles,
        gain: analog.gain * (num / den).re,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: SampleRate = SampleRate::CD_QUALITY;

    #[test]
    fn bandpass_tap_counts() {
        let coeffs = design_bandpass(500.0, 2000.0, FS, FILTER_ORDER).unwrap();
        assert_eq!(coeffs.feedforward().len(), 9);
        assert_eq!(coeffs.feedback().len(), 9);
        assert_eq!(coeffs.feedback()[0], 1.0);
        assert_eq!(coeffs.sections().len(), 4);
    }

    #[test]
    fn highpass_tap_counts() {
        let coeffs = design_highpass(10_000.0, FS, FILTER_ORDER).unwrap();
        assert_eq!(coeffs.feedforward().len(), 5);
        assert_eq!(coeffs.feedback().len(), 5);
        assert_eq!(coeffs.sections().len(), 2);
    }

    #[test]
    fn bandpass_feedforward_is_antisymmetric_pattern() {
        // Zeros at z = +1 and z = -1 only: odd taps vanish
        let coeffs = design_bandpass(500.0, 2000.0, FS, FILTER_ORDER).unwrap();
        for tap in coeffs.feedforward().iter().skip(1).step_by(2) {
            assert!(tap.abs() < 1e-12, "odd tap {}", tap);
        }
    }

    #[test]
    fn highpass_feedforward_is_binomial() {
        let coeffs = design_highpass(10_000.0, FS, FILTER_ORDER).unwrap();
        let b = coeffs.feedforward();
        let scale = b[0];
        let expected = [1.0, -4.0, 6.0, -4.0, 1.0];
        for (tap, want) in b.iter().zip(expected) {
            assert!((tap / scale - want).abs() < 1e-9);
        }
    }

    #[test]
    fn reference_values_at_cd_rate() {
        // High-pass at 10 kHz, order 4, 44.1 kHz
        let coeffs = design_highpass(10_000.0, FS, FILTER_ORDER).unwrap();
        let b = coeffs.feedforward();
        let a = coeffs.feedback();
        assert!((b[0] - 0.124322910172).abs() < 1e-9);
        assert!((a[1] - -0.363164166895).abs() < 1e-9);
        assert!((a[4] - 0.020241407268).abs() < 1e-9);
    }

    #[test]
    fn poles_inside_unit_circle() {
        for rate in [22_050, 44_100, 48_000, 96_000, 192_000] {
            let rate = SampleRate::new(rate);
            for (low, high) in [(20.0, 100.0), (100.0, 500.0), (5000.0, 10_000.0)] {
                let coeffs = design_bandpass(low, high, rate, FILTER_ORDER).unwrap();
                for section in coeffs.sections() {
                    // |a2| < 1 and |a1| < 1 + a2 keep a biquad stable
                    let [_, a1, a2] = section.feedback();
                    assert!(a2.abs() < 1.0 && a1.abs() < 1.0 + a2, "{}-{} Hz at {}", low, high, rate);
                }
            }
        }
    }

    #[test]
    fn invalid_definitions_rejected() {
        assert!(matches!(
            design_bandpass(2000.0, 500.0, FS, FILTER_ORDER),
            Err(EqError::InvalidBandDefinition { .. })
        ));
        assert!(design_bandpass(0.0, 500.0, FS, FILTER_ORDER).is_err());
        assert!(design_bandpass(5000.0, 22_050.0, FS, FILTER_ORDER).is_err());
        assert!(design_highpass(-1.0, FS, FILTER_ORDER).is_err());
        assert!(design_highpass(30_000.0, FS, FILTER_ORDER).is_err());
        assert_eq!(
            design_highpass(1000.0, SampleRate::new(0), FILTER_ORDER).unwrap_err(),
            EqError::InvalidSampleRate(0)
        );
    }

    #[test]
    fn order_limits() {
        assert!(design_highpass(1000.0, FS, 0).is_err());
        assert!(design_highpass(1000.0, FS, MAX_FILTER_ORDER + 1).is_err());
        assert!(design_highpass(1000.0, FS, 3).is_ok());
        assert_eq!(design_bandpass(100.0, 500.0, FS, 1).unwrap().sections().len(), 1);
    }

    #[test]
    fn design_is_deterministic() {
        let a = design_band(&sixband_core::STANDARD_BANDS[1], FS).unwrap();
        let b = design_band(&sixband_core::STANDARD_BANDS[1], FS).unwrap();
        assert_eq!(a, b);
    }
}
