//! Designed filter coefficients.
//!
//! A design is kept in two equivalent forms:
//! - the transfer-function polynomials (feed-forward `b`, feedback `a`),
//!   which describe the filter and are what callers inspect;
//! - the same transfer function factored into cascaded second-order
//!   sections, which is what gets executed.
//!
//! A 4th-order band-pass has 8 poles. For narrow low bands (20-100 Hz at
//! 44.1 kHz) those poles sit within 1e-3 of z = 1, and rounding the expanded
//! 8th-degree feedback polynomial to f64 moves them outside the unit circle.
//! Running the cascade keeps each pole pair in its own well-conditioned
//! biquad.

use super::design::Zpk;
use num_complex::Complex64;
use sixband_core::SampleRate;
use std::f64::consts::PI;

/// Imaginary parts below this are treated as real roots
const REAL_ROOT_TOLERANCE: f64 = 1e-10;

/// Outputs below this are flushed to zero
const DENORMAL_THRESHOLD: f64 = 1e-30;

/// One biquad stage: `b0 + b1 z^-1 + b2 z^-2` over `1 + a1 z^-1 + a2 z^-2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderSection {
    b: [f64; 3],
    a: [f64; 3],
}

impl SecondOrderSection {
    /// Feed-forward taps `[b0, b1, b2]`
    pub fn feedforward(&self) -> [f64; 3] {
        self.b
    }

    /// Feedback taps `[1, a1, a2]`
    pub fn feedback(&self) -> [f64; 3] {
        self.a
    }

    /// Run the section over `samples` in place, starting from zero state
    ///
    /// Transposed direct form II of the difference equation
    /// `y[n] = b0 x[n] + b1 x[n-1] + b2 x[n-2] - a1 y[n-1] - a2 y[n-2]`.
    pub fn process_in_place(&self, samples: &mut [f64]) {
        let [b0, b1, b2] = self.b;
        let [_, a1, a2] = self.a;
        let mut z1 = 0.0;
        let mut z2 = 0.0;

        for sample in samples.iter_mut() {
            let x = *sample;
            let mut y = b0 * x + z1;
            if y.abs() < DENORMAL_THRESHOLD {
                y = 0.0;
            }
            z1 = b1 * x - a1 * y + z2;
            z2 = b2 * x - a2 * y;
            *sample = y;
        }
    }

    fn response_at(&self, z_inv: Complex64) -> Complex64 {
        let z_inv2 = z_inv * z_inv;
        let num = self.b[0] + z_inv * self.b[1] + z_inv2 * self.b[2];
        let den = self.a[0] + z_inv * self.a[1] + z_inv2 * self.a[2];
        num / den
    }
}

/// Coefficients of a causal IIR filter
///
/// Derived from a band definition and a sample rate; recomputed for every
/// buffer and never carried between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    feedforward: Vec<f64>,
    feedback: Vec<f64>,
    sections: Vec<SecondOrderSection>,
    order: usize,
}

impl FilterCoefficients {
    pub(crate) fn from_zpk(zpk: &Zpk, order: usize) -> Self {
        let feedforward = expand(&zpk.zeros).iter().map(|c| c.re * zpk.gain).collect();
        let feedback = expand(&zpk.poles).iter().map(|c| c.re).collect();

        Self {
            feedforward,
            feedback,
            sections: factor_sections(zpk),
            order,
        }
    }

    /// Feed-forward (numerator) taps, highest power first
    pub fn feedforward(&self) -> &[f64] {
        &self.feedforward
    }

    /// Feedback (denominator) taps, `feedback()[0] == 1`
    pub fn feedback(&self) -> &[f64] {
        &self.feedback
    }

    /// The same filter as cascaded biquads
    pub fn sections(&self) -> &[SecondOrderSection] {
        &self.sections
    }

    /// Prototype order the filter was designed with
    pub fn order(&self) -> usize {
        self.order
    }

    /// Filter a whole buffer with zeroed initial state
    pub fn filter(&self, input: &[f32]) -> Vec<f64> {
        let mut samples: Vec<f64> = input.iter().map(|&s| f64::from(s)).collect();
        for section in &self.sections {
            section.process_in_place(&mut samples);
        }
        samples
    }

    /// Magnitude response at `frequency_hz` (linear, 1.0 = unity)
    pub fn magnitude_at(&self, frequency_hz: f64, sample_rate: SampleRate) -> f64 {
        if sample_rate.as_hz() == 0 {
            return 0.0;
        }
        let omega = 2.0 * PI * frequency_hz / f64::from(sample_rate.as_hz());
        let z_inv = Complex64::from_polar(1.0, -omega);

        self.sections
            .iter()
            .map(|section| section.response_at(z_inv))
            .product::<Complex64>()
            .norm()
    }

    /// Magnitude response at `frequency_hz` in dB
    pub fn magnitude_db_at(&self, frequency_hz: f64, sample_rate: SampleRate) -> f64 {
        20.0 * self.magnitude_at(frequency_hz, sample_rate).max(1e-12).log10()
    }
}

/// Monic polynomial with the given roots, highest power first
fn expand(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs
}

/// Quadratic (or linear) factors with real coefficients from a root set
///
/// Complex roots are taken with their conjugates; leftover real roots are
/// paired in order, and an odd one out becomes a first-order factor.
fn real_factors(roots: &[Complex64]) -> Vec<[f64; 3]> {
    let mut factors: Vec<[f64; 3]> = roots
        .iter()
        .filter(|r| r.im > REAL_ROOT_TOLERANCE)
        .map(|r| [1.0, -2.0 * r.re, r.norm_sqr()])
        .collect();

    let mut real: Vec<f64> = roots
        .iter()
        .filter(|r| r.im.abs() <= REAL_ROOT_TOLERANCE)
        .map(|r| r.re)
        .collect();

    while real.len() >= 2 {
        let r2 = real.pop().unwrap_or_default();
        let r1 = real.pop().unwrap_or_default();
        factors.push([1.0, -(r1 + r2), r1 * r2]);
    }
    if let Some(r) = real.pop() {
        factors.push([1.0, -r, 0.0]);
    }
    factors
}

fn factor_sections(zpk: &Zpk) -> Vec<SecondOrderSection> {
    let pole_factors = real_factors(&zpk.poles);
    let mut zero_factors = real_factors(&zpk.zeros).into_iter();

    // Spread the overall gain evenly so no single stage carries a tiny b0
    let count = pole_factors.len().max(1);
    let per_stage = zpk.gain.abs().powf(1.0 / count as f64);

    pole_factors
        .into_iter()
        .enumerate()
        .map(|(i, a)| {
            let sign = if i == 0 && zpk.gain < 0.0 { -1.0 } else { 1.0 };
            let zeros = zero_factors.next().unwrap_or([1.0, 0.0, 0.0]);
            SecondOrderSection {
                b: zeros.map(|c| c * per_stage * sign),
                a,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::design::{design_bandpass, design_highpass, FILTER_ORDER};
    use super::*;

    const FS: SampleRate = SampleRate::CD_QUALITY;

    #[test]
    fn expand_quadratic() {
        let roots = [Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)];
        let poly: Vec<f64> = expand(&roots).iter().map(|c| c.re).collect();
        assert_eq!(poly, vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn conjugate_pair_becomes_one_factor() {
        let roots = [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)];
        let factors = real_factors(&roots);
        assert_eq!(factors.len(), 1);
        assert!((factors[0][1] - -1.0).abs() < 1e-12);
        assert!((factors[0][2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn odd_real_root_becomes_first_order() {
        let roots = [Complex64::new(0.3, 0.0)];
        assert_eq!(real_factors(&roots), vec![[1.0, -0.3, 0.0]]);
    }

    #[test]
    fn bandpass_edges_are_minus_three_db() {
        let coeffs = design_bandpass(500.0, 2000.0, FS, FILTER_ORDER).unwrap();
        assert!((coeffs.magnitude_at(1000.0, FS) - 1.0).abs() < 1e-6);
        assert!((coeffs.magnitude_db_at(500.0, FS) - -3.0103).abs() < 0.01);
        assert!((coeffs.magnitude_db_at(2000.0, FS) - -3.0103).abs() < 0.01);
    }

    #[test]
    fn highpass_response_shape() {
        let coeffs = design_highpass(10_000.0, FS, FILTER_ORDER).unwrap();
        assert!((coeffs.magnitude_db_at(10_000.0, FS) - -3.0103).abs() < 0.01);
        assert!((coeffs.magnitude_at(20_000.0, FS) - 1.0).abs() < 1e-3);
        assert!(coeffs.magnitude_at(1000.0, FS) < 1e-3);
    }

    #[test]
    fn sections_match_polynomials() {
        // Well-conditioned band: both forms must agree
        let coeffs = design_bandpass(2000.0, 5000.0, FS, FILTER_ORDER).unwrap();
        let omega = 2.0 * PI * 3000.0 / 44_100.0;
        let z_inv = Complex64::from_polar(1.0, -omega);
        let eval = |taps: &[f64]| {
            taps.iter()
                .enumerate()
                .map(|(i, &t)| z_inv.powu(i as u32) * t)
                .sum::<Complex64>()
        };
        let direct = (eval(coeffs.feedforward()) / eval(coeffs.feedback())).norm();
        assert!((direct - coeffs.magnitude_at(3000.0, FS)).abs() < 1e-6);
    }

    #[test]
    fn lowest_band_stays_bounded() {
        let coeffs = design_bandpass(20.0, 100.0, FS, FILTER_ORDER).unwrap();
        let mut impulse = vec![0.0_f32; 44_100 * 2];
        impulse[0] = 1.0;
        let response = coeffs.filter(&impulse);
        assert!(response.iter().all(|s| s.is_finite()));
        let tail = response[response.len() - 100..]
            .iter()
            .fold(0.0_f64, |acc, s| acc.max(s.abs()));
        assert!(tail < 1e-12, "impulse response did not decay: {}", tail);
        assert!((coeffs.magnitude_at(44.72, FS) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn filter_starts_from_zero_state() {
        let coeffs = design_bandpass(100.0, 500.0, FS, FILTER_ORDER).unwrap();
        let input = vec![0.25_f32; 512];
        assert_eq!(coeffs.filter(&input), coeffs.filter(&input));
        assert!(coeffs.filter(&[]).is_empty());
    }
}
