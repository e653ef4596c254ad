mod audio;
mod band;
mod gain;

pub use audio::{AudioBuffer, SampleRate};
pub use band::{BandDefinition, BandKind, BAND_COUNT, STANDARD_BANDS};
pub use gain::{clamp_db, db_to_linear, GainPreset, GainVector, MAX_GAIN_DB, MIN_GAIN_DB};
