//! Test utilities for equalizer testing
//!
//! Mono test signal generation and the level measurements the equalizer
//! tests and benchmarks are written against.

pub mod analysis;
pub mod signals;

pub use analysis::*;
pub use signals::*;
