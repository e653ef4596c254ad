//! 16-bit PCM conversion
//!
//! Decoding divides by 32768 so the full `i16` range maps onto
//! `[-1.0, 1.0)`. Encoding clamps first and scales by 32767, so `1.0` and
//! `-1.0` both stay representable.

const DECODE_SCALE: f32 = 32_768.0;
const ENCODE_SCALE: f32 = 32_767.0;

/// Normalize one 16-bit sample
pub fn i16_to_f32(sample: i16) -> f32 {
    f32::from(sample) / DECODE_SCALE
}

/// Quantize one sample to 16 bits; NaN encodes as silence
pub fn f32_to_i16(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    (sample.clamp(-1.0, 1.0) * ENCODE_SCALE).round() as i16
}

/// Normalize a slice of 16-bit samples
pub fn decode_i16(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| i16_to_f32(s)).collect()
}

/// Quantize a slice of samples to 16 bits
pub fn encode_i16(samples: &[f32]) -> Vec<i16> {
    samples.iter().map(|&s| f32_to_i16(s)).collect()
}
