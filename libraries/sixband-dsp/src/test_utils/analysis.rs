//! Level measurements for verification

/// Calculate RMS (Root Mean Square) level
///
/// # Returns
/// RMS value (0.0 to 1.0 for normalized audio)
pub fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}

/// Calculate peak level
///
/// Returns the absolute maximum sample value.
pub fn calculate_peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

/// Convert linear amplitude to dB
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -100.0 // Silence
    } else {
        20.0 * linear.log10()
    }
}

/// RMS level change from `input` to `output` in dB
pub fn gain_change_db(input: &[f32], output: &[f32]) -> f32 {
    linear_to_db(calculate_rms(output)) - linear_to_db(calculate_rms(input))
}

/// The second half of a signal, past the filters' start-up transient
pub fn steady_state(samples: &[f32]) -> &[f32] {
    &samples[samples.len() / 2..]
}

/// True when no sample is NaN or infinite
pub fn all_finite(samples: &[f32]) -> bool {
    samples.iter().all(|s| s.is_finite())
}

/// Maximum absolute difference between two signals
///
/// Signals of different length are infinitely far apart.
pub fn calculate_signal_difference(signal_a: &[f32], signal_b: &[f32]) -> f32 {
    if signal_a.len() != signal_b.len() {
        return f32::INFINITY;
    }

    signal_a
        .iter()
        .zip(signal_b.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max)
}
