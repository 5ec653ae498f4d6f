// src/audio/encoder.rs

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::audio::types::AudioData;
use crate::error::Result;

fn wav_spec(audio: &AudioData) -> WavSpec {
    WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32, // 32-bit float for maximum quality
        sample_format: SampleFormat::Float,
    }
}

/// Encode PCM audio data to a WAV file on disk
pub fn encode_wav<P: AsRef<Path>>(audio: &AudioData, output_path: P) -> Result<()> {
    let mut writer = WavWriter::create(output_path, wav_spec(audio))?;

    for &sample in &audio.samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Encode PCM audio data to an in-memory WAV byte buffer
///
/// This is the output side of the transcoding engine's virtual storage:
/// the trimmed slice never touches the real filesystem.
pub fn encode_wav_bytes(audio: &AudioData) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let cursor = Cursor::new(&mut buffer);
        let mut writer = WavWriter::new(cursor, wav_spec(audio))?;

        for &sample in &audio.samples {
            writer.write_sample(sample)?;
        }

        writer.finalize()?;
    }
    Ok(buffer)
}
