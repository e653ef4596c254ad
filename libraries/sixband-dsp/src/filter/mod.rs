//! Digital Butterworth filter design
//!
//! Every band of the equalizer is a fixed-order (4) Butterworth filter,
//! designed fresh for the sample rate of each buffer.

mod coeffs;
mod design;

pub use coeffs::{FilterCoefficients, SecondOrderSection};
pub use design::{design_band, design_bandpass, design_highpass, FILTER_ORDER, MAX_FILTER_ORDER};
