//! Recombination of band outputs

use sixband_core::{EqError, Result};
use std::fmt;
use tracing::warn;

/// Why a result was degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// The summed signal contained NaN or infinite samples; the whole buffer
    /// was replaced with silence
    NumericInstability {
        /// How many summed samples were non-finite
        non_finite_samples: usize,
    },
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumericInstability { non_finite_samples } => write!(
                f,
                "numeric instability ({} non-finite samples), output silenced",
                non_finite_samples
            ),
        }
    }
}

/// Outcome of a processing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingStatus {
    /// Output is the clamped sum of the bands
    #[default]
    Clean,
    /// Output was replaced to keep it safe
    Degraded(Degradation),
}

impl ProcessingStatus {
    /// True for [`ProcessingStatus::Degraded`]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Recombined samples and how they were obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Combined {
    /// Output samples, all within `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    /// Clean or degraded
    pub status: ProcessingStatus,
}

/// Sums band outputs sample by sample
///
/// Safety sweep on the sum:
/// 1. If any summed sample is NaN or infinite, every sample becomes 0.0 and
///    the result is flagged as degraded.
/// 2. Otherwise every sample is clamped to `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator;

impl Aggregator {
    /// Combine equally long band outputs
    ///
    /// No bands yields an empty, clean result. Bands of differing length are
    /// rejected with [`EqError::LengthMismatch`].
    pub fn combine<S: AsRef<[f32]>>(bands: &[S]) -> Result<Combined> {
        let Some(first) = bands.first() else {
            return Ok(Combined {
                samples: Vec::new(),
                status: ProcessingStatus::Clean,
            });
        };

        let len = first.as_ref().len();
        if let Some(bad) = bands.iter().find(|b| b.as_ref().len() != len) {
            return Err(EqError::LengthMismatch {
                expected: len,
                found: bad.as_ref().len(),
            });
        }

        let mut sum = vec![0.0_f32; len];
        for band in bands {
            for (acc, &s) in sum.iter_mut().zip(band.as_ref()) {
                *acc += s;
            }
        }

        let non_finite_samples = sum.iter().filter(|s| !s.is_finite()).count();
        if non_finite_samples > 0 {
            warn!(
                non_finite_samples,
                len, "Non-finite samples in band sum, silencing buffer"
            );
            sum.fill(0.0);
            return Ok(Combined {
                samples: sum,
                status: ProcessingStatus::Degraded(Degradation::NumericInstability {
                    non_finite_samples,
                }),
            });
        }

        for s in &mut sum {
            *s = s.clamp(-1.0, 1.0);
        }

        Ok(Combined {
            samples: sum,
            status: ProcessingStatus::Clean,
        })
    }
}
