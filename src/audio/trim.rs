// src/audio/trim.rs

use crate::audio::types::AudioData;
use crate::error::{Result, TrimError};
use crate::region::RegionBounds;

/// Extract the `[start, end)` slice of decoded audio
///
/// An end past the file's duration is clamped rather than rejected; a
/// start past the duration is an error. Sample indices are aligned to
/// frame boundaries so channels stay interleaved correctly, and clamped
/// to the available data.
pub fn trim_audio(audio: &AudioData, bounds: &RegionBounds) -> Result<AudioData> {
    let duration = audio.duration_seconds();

    // An end past the end of the file (or an unbounded one) clamps to the
    // file's duration, the same way `-to` past end-of-input behaves.
    let end_seconds = if bounds.end.is_finite() {
        bounds.end.min(duration)
    } else {
        duration
    };

    if bounds.start >= duration {
        return Err(TrimError::RegionOutOfBounds {
            start: bounds.start,
            end: end_seconds,
            duration,
        });
    }

    // sample_index = time_in_seconds * sample_rate * num_channels
    let samples_per_second = audio.sample_rate as f64 * audio.channels as f64;

    let start_index = (bounds.start * samples_per_second) as usize;
    let end_index = (end_seconds * samples_per_second) as usize;

    // Align to frame boundaries (multiples of the channel count)
    let channels = audio.channels as usize;
    let start_index = (start_index / channels) * channels;
    let end_index = (end_index / channels) * channels;

    let start_index = start_index.min(audio.samples.len());
    let end_index = end_index.min(audio.samples.len());

    Ok(AudioData {
        samples: audio.samples[start_index..end_index].to_vec(),
        sample_rate: audio.sample_rate,
        channels: audio.channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_audio(duration_seconds: f64, sample_rate: u32, channels: u16) -> AudioData {
        let total = (duration_seconds * sample_rate as f64 * channels as f64) as usize;
        AudioData {
            samples: vec![0.5f32; total],
            sample_rate,
            channels,
        }
    }

    #[test]
    fn trim_middle_section() {
        let audio = constant_audio(10.0, 44100, 2);
        let bounds = RegionBounds::new(3.0, 7.0).unwrap();
        let trimmed = trim_audio(&audio, &bounds).unwrap();
        assert_eq!(trimmed.duration_seconds(), 4.0);
    }

    #[test]
    fn trim_from_start() {
        let audio = constant_audio(10.0, 44100, 2);
        let bounds = RegionBounds::new(0.0, 5.0).unwrap();
        let trimmed = trim_audio(&audio, &bounds).unwrap();
        assert_eq!(trimmed.duration_seconds(), 5.0);
    }

    #[test]
    fn end_past_duration_clamps_to_end_of_file() {
        let audio = constant_audio(10.0, 44100, 2);
        let bounds = RegionBounds::new(5.0, 15.0).unwrap();
        let trimmed = trim_audio(&audio, &bounds).unwrap();
        assert!((trimmed.duration_seconds() - 5.0).abs() < 0.001);
    }

    #[test]
    fn start_past_duration_is_rejected() {
        let audio = constant_audio(10.0, 44100, 2);
        let bounds = RegionBounds::new(12.0, 15.0).unwrap();
        let result = trim_audio(&audio, &bounds);
        assert!(matches!(result, Err(TrimError::RegionOutOfBounds { .. })));
    }

    #[test]
    fn unbounded_end_takes_the_rest() {
        let audio = constant_audio(10.0, 8000, 1);
        let bounds = RegionBounds::new(4.0, f64::INFINITY).unwrap();
        let trimmed = trim_audio(&audio, &bounds).unwrap();
        assert!((trimmed.duration_seconds() - 6.0).abs() < 0.001);
    }

    #[test]
    fn frame_alignment_preserved_for_stereo() {
        let audio = constant_audio(2.0, 44100, 2);
        let bounds = RegionBounds::new(0.25, 1.75).unwrap();
        let trimmed = trim_audio(&audio, &bounds).unwrap();
        assert_eq!(trimmed.samples.len() % 2, 0);
        assert_eq!(trimmed.channels, 2);
    }
}
