//! Sixband Core
//!
//! Platform-agnostic types and error handling for the Sixband equalizer.
//!
//! This crate provides the foundational building blocks shared by the DSP
//! engine and the command-line front end.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Audio Types**: `AudioBuffer`, `SampleRate`
//! - **Band Types**: `BandDefinition`, `BandKind`, the fixed `STANDARD_BANDS`
//! - **Gain Types**: `GainVector`, `GainPreset`, `SharedGains`
//! - **Error Handling**: Unified `EqError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use sixband_core::{AudioBuffer, GainVector, SampleRate, STANDARD_BANDS};
//!
//! // A decoded one-second mono buffer at CD rate
//! let buffer = AudioBuffer::new(vec![0.0; 44_100], SampleRate::CD_QUALITY);
//! assert_eq!(buffer.duration_secs(), 1.0);
//!
//! // Boost the 500-2000 Hz band, out-of-range values are clamped
//! let mut gains = GainVector::flat();
//! gains.set(2, 20).unwrap();
//! assert_eq!(gains.get(2), Some(12));
//!
//! assert_eq!(STANDARD_BANDS[2].label(), "500-2000 Hz");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod shared;
pub mod types;

// Re-export commonly used types
pub use error::{EqError, Result};
pub use shared::SharedGains;

pub use types::{
    // Audio types
    AudioBuffer, SampleRate,
    // Band types
    BandDefinition, BandKind, BAND_COUNT, STANDARD_BANDS,
    // Gain types
    clamp_db, db_to_linear, GainPreset, GainVector, MAX_GAIN_DB, MIN_GAIN_DB,
};
