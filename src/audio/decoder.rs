// src/audio/decoder.rs

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::types::{AudioData, AudioInfo};
use crate::error::{Result, TrimError};

/// Decode an audio file on disk to interleaved PCM samples in memory
///
/// Supports MP3, FLAC, WAV, OGG Vorbis, AAC, and more via symphonia.
pub fn decode_audio_file<P: AsRef<Path>>(path: P) -> Result<AudioData> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();

    let file = File::open(path).map_err(|e| TrimError::FileOpen {
        path: path_str,
        source: e,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    decode_stream(hint_for(path.extension().and_then(|e| e.to_str())), mss)
}

/// Decode an in-memory byte buffer to interleaved PCM samples
///
/// `name` is used only as a container-format hint (its extension); the
/// probe still sniffs the actual content, so a misleading name is not fatal.
pub fn decode_audio_bytes(name: &str, bytes: Vec<u8>) -> Result<AudioData> {
    let extension = Path::new(name).extension().and_then(|e| e.to_str());
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());
    decode_stream(hint_for(extension), mss)
}

fn hint_for(extension: Option<&str>) -> Hint {
    let mut hint = Hint::new();
    if let Some(extension) = extension {
        hint.with_extension(extension);
    }
    hint
}

fn decode_stream(hint: Hint, mss: MediaSourceStream) -> Result<AudioData> {
    // Probe the media source to detect format
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| TrimError::DecodeFailed(format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    // Find the default audio track (skip video/subtitle tracks)
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| TrimError::DecodeFailed("No audio track found".to_string()))?;

    let track_id = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| TrimError::DecodeFailed("Sample rate not found".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| TrimError::DecodeFailed(format!("Failed to create decoder: {}", e)))?;

    // Channel count comes from the first decoded buffer; codec metadata
    // omits it for some MP3s.
    let mut channels: Option<u16> = None;
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(_) => break, // End of stream
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| TrimError::DecodeFailed(format!("Decode error: {}", e)))?;

        let spec = *decoded.spec();
        channels.get_or_insert(spec.channels.count() as u16);

        // Interleave whatever sample format the codec produced into f32
        let mut sample_buf = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    let channels = channels
        .ok_or_else(|| TrimError::DecodeFailed("No audio samples decoded".to_string()))?;

    Ok(AudioData {
        samples,
        sample_rate,
        channels,
    })
}

/// Get audio file metadata without decoding all samples
///
/// Much faster than decode_audio_file() for just getting duration/info
pub fn get_audio_info<P: AsRef<Path>>(path: P) -> Result<AudioInfo> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();

    let file = File::open(path).map_err(|e| TrimError::FileOpen {
        path: path_str,
        source: e,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &hint_for(path.extension().and_then(|e| e.to_str())),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| TrimError::DecodeFailed(format!("Failed to probe: {}", e)))?;

    let format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| TrimError::DecodeFailed("No audio track".to_string()))?;

    let sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);

    // Duration from frame count, when the container reports it
    let duration_seconds = if let (Some(n_frames), Some(sr)) =
        (track.codec_params.n_frames, track.codec_params.sample_rate)
    {
        n_frames as f64 / sr as f64
    } else {
        0.0
    };

    Ok(AudioInfo {
        duration_seconds,
        sample_rate,
        channels,
        format: format!("{:?}", track.codec_params.codec),
        bit_depth: track.codec_params.bits_per_sample.map(|b| b as u16),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::encoder::encode_wav_bytes;

    fn sine_audio(duration_seconds: f64, sample_rate: u32, channels: u16) -> AudioData {
        let total = (duration_seconds * sample_rate as f64 * channels as f64) as usize;
        let samples = (0..total)
            .map(|i| {
                let t = i as f32 / (sample_rate as f32 * channels as f32);
                (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.5
            })
            .collect();
        AudioData {
            samples,
            sample_rate,
            channels,
        }
    }

    #[test]
    fn decode_bytes_roundtrip() {
        let audio = sine_audio(1.0, 8000, 1);
        let wav = encode_wav_bytes(&audio).unwrap();

        let decoded = decode_audio_bytes("clip.wav", wav).unwrap();
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.sample_rate, 8000);
        assert!((decoded.duration_seconds() - 1.0).abs() < 0.01);
    }

    #[test]
    fn decode_garbage_fails() {
        let result = decode_audio_bytes("noise.bin", vec![0u8; 64]);
        assert!(result.is_err());
    }

    #[test]
    fn decode_missing_file_fails() {
        let result = decode_audio_file("/nonexistent/path/audio.mp3");
        assert!(matches!(result, Err(TrimError::FileOpen { .. })));
    }

    #[test]
    fn info_missing_file_fails() {
        assert!(get_audio_info("/nonexistent/path/audio.mp3").is_err());
    }
}
