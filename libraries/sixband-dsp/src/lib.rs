//! Sixband DSP
//!
//! The signal-processing engine of the Sixband equalizer.
//!
//! This crate provides:
//! - Butterworth band-pass / high-pass filter design (order 4)
//! - Per-band filtering, decibel gain and clamping
//! - Recombination with a whole-buffer numeric safety sweep
//! - 16-bit PCM conversion helpers
//!
//! # Architecture
//!
//! ```text
//!                  ┌──────────────────┐   ┌────────────────┐
//!             ┌──► │ design_band (x6) │─► │ BandProcessor  │──┐
//! ┌────────┐  │    └──────────────────┘   └────────────────┘  │   ┌────────────┐   ┌─────────┐
//! │ Buffer │──┤                 ...                           ├─► │ Aggregator │─► │ Output  │
//! └────────┘  │    ┌──────────────────┐   ┌────────────────┐  │   └────────────┘   └─────────┘
//!             └──► │ design_band      │─► │ BandProcessor  │──┘
//!                  └──────────────────┘   └────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use sixband_core::{AudioBuffer, GainVector, SampleRate};
//! use sixband_dsp::EqualizerEngine;
//!
//! # fn example() -> sixband_core::Result<()> {
//! let engine = EqualizerEngine::new();
//!
//! let input = AudioBuffer::new(vec![0.0; 4410], SampleRate::CD_QUALITY);
//! let mut gains = GainVector::flat();
//! gains.set(0, 6)?; // Lift the 20-100 Hz band
//!
//! let processed = engine.apply(&input, &gains)?;
//! assert_eq!(processed.buffer.len(), input.len());
//! assert!(!processed.is_degraded());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]

mod aggregate;
mod band;
mod engine;
pub mod filter;
pub mod pcm;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{Aggregator, Combined, Degradation, ProcessingStatus};
pub use band::BandProcessor;
pub use engine::{EqualizerEngine, ProcessedAudio};
pub use filter::{
    design_band, design_bandpass, design_highpass, FilterCoefficients, SecondOrderSection,
    FILTER_ORDER,
};
