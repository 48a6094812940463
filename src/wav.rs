use std::io::{Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::audio::AudioBuffer;
use crate::error::{FilterError, Result};

/// Read a 16-bit integer PCM WAV file
///
/// # Errors
/// Returns `FilterError::UnsupportedFormat` for anything other than 16-bit
/// integer PCM, or for a file that fails to decode.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let reader = WavReader::open(path.as_ref())?;
    decode(reader)
}

/// Read a 16-bit integer PCM WAV stream
pub fn read_wav_from<R: Read>(reader: R) -> Result<AudioBuffer> {
    decode(WavReader::new(reader)?)
}

fn decode<R: Read>(mut reader: WavReader<R>) -> Result<AudioBuffer> {
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(FilterError::UnsupportedFormat(format!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    log::debug!(
        "Decoded {} samples, {} channel(s) at {} Hz",
        samples.len(),
        spec.channels,
        spec.sample_rate
    );

    AudioBuffer::new(samples, spec.channels, spec.sample_rate)
        .map_err(|e| FilterError::UnsupportedFormat(e.to_string()))
}

fn pcm16_spec(buffer: &AudioBuffer) -> WavSpec {
    WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Write a buffer as a 16-bit integer PCM WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &AudioBuffer) -> Result<()> {
    let mut writer = WavWriter::create(path.as_ref(), pcm16_spec(buffer))?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Write a buffer as 16-bit integer PCM WAV into a seekable stream
pub fn write_wav_to<W: Write + Seek>(writer: W, buffer: &AudioBuffer) -> Result<()> {
    let mut writer = WavWriter::new(writer, pcm16_spec(buffer))?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
