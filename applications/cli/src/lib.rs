//! Sixband CLI Library
//!
//! File handling and configuration for the `sixband` binary.
//!
//! This library exposes the binary's building blocks for testing purposes.

pub mod config;
pub mod error;
pub mod wav;

// Re-export commonly used types for convenience
pub use self::config::{parse_gain_spec, EqConfig, GainSettings};
pub use error::{CliError, Result};
