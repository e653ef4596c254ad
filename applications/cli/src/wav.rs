//! 16-bit mono WAV reading and writing

use crate::error::{CliError, Result};
use sixband_core::{AudioBuffer, SampleRate};
use sixband_dsp::pcm;
use std::path::Path;
use tracing::debug;

/// Read a 16-bit mono PCM WAV file into a normalized buffer
pub fn read_mono_i16<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    if spec.channels != 1
        || spec.bits_per_sample != 16
        || spec.sample_format != hound::SampleFormat::Int
    {
        return Err(CliError::UnsupportedFormat {
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            sample_format: format!("{:?}", spec.sample_format).to_lowercase(),
        });
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(
        path = %path.display(),
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        "Read WAV file"
    );

    Ok(AudioBuffer::new(
        pcm::decode_i16(&samples),
        SampleRate::new(spec.sample_rate),
    ))
}

/// Write a buffer as a 16-bit mono PCM WAV file
pub fn write_mono_i16<P: AsRef<Path>>(path: P, buffer: &AudioBuffer) -> Result<()> {
    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate.as_hz(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in pcm::encode_i16(&buffer.samples) {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    debug!(path = %path.display(), samples = buffer.len(), "Wrote WAV file");
    Ok(())
}
