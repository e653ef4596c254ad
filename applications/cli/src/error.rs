/// CLI error types
use sixband_core::EqError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid gain '{0}' (expected BAND=DB, e.g. 2=+6)")]
    InvalidGainSpec(String),

    #[error(
        "Unsupported WAV format: {channels} channel(s), {bits_per_sample}-bit {sample_format} \
         (need 16-bit mono PCM)"
    )]
    UnsupportedFormat {
        channels: u16,
        bits_per_sample: u16,
        sample_format: String,
    },

    #[error("Equalizer error: {0}")]
    Eq(#[from] EqError),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
