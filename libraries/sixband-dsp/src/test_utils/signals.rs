//! Test signal generation
//!
//! All generators return mono samples.

use std::f64::consts::PI;

/// Generate a sine wave
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `duration` - Duration in seconds
/// * `amplitude` - Peak amplitude (0.0 to 1.0)
pub fn generate_sine_wave(
    frequency: f32,
    sample_rate: u32,
    duration: f32,
    amplitude: f32,
) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    let step = 2.0 * PI * f64::from(frequency) / f64::from(sample_rate);

    (0..num_samples)
        .map(|i| ((step * i as f64).sin() * f64::from(amplitude)) as f32)
        .collect()
}

/// Sum of equal-amplitude sines, one per frequency
///
/// The combined peak never exceeds `amplitude`.
pub fn generate_multitone(
    frequencies: &[f32],
    sample_rate: u32,
    duration: f32,
    amplitude: f32,
) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    let mut samples = vec![0.0_f32; num_samples];
    if frequencies.is_empty() {
        return samples;
    }

    let per_tone = amplitude / frequencies.len() as f32;
    for &freq in frequencies {
        let tone = generate_sine_wave(freq, sample_rate, duration, per_tone);
        for (out, s) in samples.iter_mut().zip(tone) {
            *out += s;
        }
    }
    samples
}

/// Generate an impulse (single sample spike at the start)
///
/// Useful for measuring impulse response.
pub fn generate_impulse(len: usize, amplitude: f32) -> Vec<f32> {
    let mut samples = vec![0.0; len];
    if let Some(first) = samples.first_mut() {
        *first = amplitude;
    }
    samples
}

/// Generate a constant (DC) signal
pub fn generate_dc(len: usize, level: f32) -> Vec<f32> {
    vec![level; len]
}
